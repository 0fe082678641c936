//! Per-module-type translation completeness rules.
//!
//! The single contract throughout: a field that is absent or empty in the
//! source is never required in the translation; a field the source carries
//! must have a non-empty translated counterpart. Structured types recurse
//! into rows, items, and keyed maps, and the BOM rule respects the currently
//! visible component rows.

use std::collections::HashMap;

use crate::model::{
    ContentModule, ContentModuleTranslation, ModuleContent, ModuleId, ModuleType, Section,
    SectionTranslation,
};

/// True when the string carries visible content.
fn filled<S: AsRef<str>>(value: Option<S>) -> bool {
    value.is_some_and(|s| !s.as_ref().trim().is_empty())
}

/// A source field gates completion only when present; then the translated
/// counterpart must be filled.
fn requires(source: Option<&str>, translated: Option<&str>) -> bool {
    filled(source) && !filled(translated)
}

/// Decide whether a module's translation is missing or incomplete.
///
/// A module with no translation record is missing by definition. Otherwise
/// the check dispatches on the module type; unrecognized types only require a
/// `title`/`description` counterpart when the source carries one, so new
/// types default to "nothing required" rather than "always incomplete".
///
/// This is a pure predicate with no side effects.
pub fn is_module_translation_missing(
    module: &ContentModule,
    translation: Option<&ContentModuleTranslation>,
) -> bool {
    let Some(translation) = translation else {
        return true;
    };
    let source = &module.content;
    let translated = &translation.content;

    match &module.kind {
        ModuleType::Text | ModuleType::Testp => requires(
            source.as_text().and_then(|c| c.text.as_deref()),
            translated.as_text().and_then(|c| c.text.as_deref()),
        ),

        kind if kind.is_alert() => alert_missing(kind, source, translated),

        kind if kind.is_attachment() => {
            let s = source.as_attachment();
            let t = translated.as_attachment();
            requires(
                s.and_then(|c| c.title.as_deref()),
                t.and_then(|c| c.title.as_deref()),
            ) || requires(
                s.and_then(|c| c.description.as_deref()),
                t.and_then(|c| c.description.as_deref()),
            )
        }

        ModuleType::Link => {
            let s = source.as_link();
            let t = translated.as_link();
            requires(
                s.and_then(|c| c.text.as_deref()),
                t.and_then(|c| c.text.as_deref()),
            ) || requires(
                s.and_then(|c| c.description.as_deref()),
                t.and_then(|c| c.description.as_deref()),
            )
        }

        ModuleType::Table => table_missing(source, translated),

        ModuleType::Checklist => checklist_missing(source, translated),

        ModuleType::Bom => bom_missing(source, translated),

        // image, video, component, and anything unrecognized: only a source
        // title/description gates completion.
        _ => {
            requires(source.title(), translated.title())
                || requires(source.description(), translated.description())
        }
    }
}

/// Alert subtypes: title plus the per-subtype body field.
///
/// `warning` keeps its body under `message`; every sibling subtype uses
/// `description`. The lookup must stay per-subtype or previously authored
/// translations break.
fn alert_missing(kind: &ModuleType, source: &ModuleContent, translated: &ModuleContent) -> bool {
    let s = source.as_alert();
    let t = translated.as_alert();
    requires(
        s.and_then(|c| c.title.as_deref()),
        t.and_then(|c| c.title.as_deref()),
    ) || requires(
        s.and_then(|c| c.body_for(kind)),
        t.and_then(|c| c.body_for(kind)),
    )
}

/// Tables: headers must be mirrored shape-for-shape, and every source row
/// needs a same-shaped, fully filled translated row. The caption is never
/// required.
fn table_missing(source: &ModuleContent, translated: &ModuleContent) -> bool {
    let Some(s) = source.as_table() else {
        return false;
    };
    let t = translated.as_table();

    if let Some(headers) = s.headers.as_ref().filter(|h| !h.is_empty()) {
        let ok = t
            .and_then(|c| c.headers.as_ref())
            .is_some_and(|th| th.len() == headers.len() && th.iter().all(|h| filled(Some(h))));
        if !ok {
            return true;
        }
    }

    if let Some(rows) = s.rows.as_ref().filter(|r| !r.is_empty()) {
        let translated_rows = t.and_then(|c| c.rows.as_ref());
        for (idx, row) in rows.iter().enumerate() {
            let ok = translated_rows
                .and_then(|tr| tr.get(idx))
                .is_some_and(|tr| tr.len() == row.len() && tr.iter().all(|c| filled(Some(c))));
            if !ok {
                return true;
            }
        }
    }

    false
}

/// Checklists: every source item needs a translated item with non-empty text.
fn checklist_missing(source: &ModuleContent, translated: &ModuleContent) -> bool {
    let Some(s) = source.as_checklist() else {
        return false;
    };
    let items = translated.as_checklist().map(|c| c.items.as_slice());

    s.items.iter().enumerate().any(|(idx, _)| {
        let ok = items
            .and_then(|t| t.get(idx))
            .is_some_and(|t| filled(t.text.as_deref()));
        !ok
    })
}

/// BOM summaries: title, header strings, message strings, and the
/// descriptions of the currently visible component rows.
///
/// When no rows are visible, untranslated component descriptions never block
/// completion; translators are not asked to translate rows the reader cannot
/// see.
fn bom_missing(source: &ModuleContent, translated: &ModuleContent) -> bool {
    let Some(s) = source.as_bom() else {
        return false;
    };
    let t = translated.as_bom();

    if requires(s.title.as_deref(), t.and_then(|c| c.title.as_deref())) {
        return true;
    }

    if let Some(headers) = s.headers.as_ref() {
        let translated_headers = t.and_then(|c| c.headers.as_ref());
        for (key, value) in headers {
            if !filled(Some(value)) {
                continue;
            }
            let ok = translated_headers
                .and_then(|th| th.get(key))
                .is_some_and(|v| filled(Some(v)));
            if !ok {
                return true;
            }
        }
    }

    if let Some(messages) = s.messages.as_ref() {
        let translated_messages = t.and_then(|c| c.messages.as_ref());
        for (key, value) in messages {
            if !filled(Some(value)) {
                continue;
            }
            let ok = translated_messages
                .and_then(|tm| tm.get(key))
                .is_some_and(|v| filled(Some(v)));
            if !ok {
                return true;
            }
        }
    }

    let visible = s.visible_codes();
    if !visible.is_empty() {
        let descriptions = s.descriptions.as_ref();
        let translated_descriptions = t.and_then(|c| c.descriptions.as_ref());
        for code in visible {
            let described = descriptions
                .and_then(|d| d.get(code))
                .is_some_and(|v| filled(Some(v)));
            if !described {
                continue;
            }
            let ok = translated_descriptions
                .and_then(|td| td.get(code))
                .is_some_and(|v| filled(Some(v)));
            if !ok {
                return true;
            }
        }
    }

    false
}

/// Decide whether a section's translation is missing or incomplete.
///
/// Missing iff there is no record for the section, the translated title is
/// empty, the source carries a description without a translated counterpart,
/// or any child module is missing per [`is_module_translation_missing`].
pub fn is_section_translation_missing(
    section: &Section,
    modules: &[ContentModule],
    section_translation: Option<&SectionTranslation>,
    module_translations: &HashMap<ModuleId, ContentModuleTranslation>,
) -> bool {
    let Some(tr) = section_translation else {
        return true;
    };

    if !filled(Some(tr.title.as_str())) {
        return true;
    }

    if requires(section.description.as_deref(), tr.description.as_deref()) {
        return true;
    }

    modules
        .iter()
        .any(|m| is_module_translation_missing(m, module_translations.get(&m.id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        AlertContent, AttachmentContent, BomContent, ChecklistContent, ComponentContent,
        LinkContent, TableContent, TextContent,
    };
    use std::collections::BTreeMap;

    fn module(kind: ModuleType, content: ModuleContent) -> ContentModule {
        let mut m = ContentModule::new(1, 1, content);
        m.kind = kind;
        m
    }

    fn translated(content: ModuleContent) -> ContentModuleTranslation {
        ContentModuleTranslation::new(1, 2, content)
    }

    #[test]
    fn test_no_record_is_missing() {
        let m = module(
            ModuleType::Text,
            ModuleContent::Text(TextContent::new("hello")),
        );
        assert!(is_module_translation_missing(&m, None));
    }

    #[test]
    fn test_text_requires_counterpart() {
        let m = module(
            ModuleType::Text,
            ModuleContent::Text(TextContent::new("hello")),
        );
        let empty = translated(ModuleContent::Text(TextContent::default()));
        assert!(is_module_translation_missing(&m, Some(&empty)));

        let done = translated(ModuleContent::Text(TextContent::new("hallo")));
        assert!(!is_module_translation_missing(&m, Some(&done)));
    }

    #[test]
    fn test_empty_source_text_requires_nothing() {
        let m = module(ModuleType::Text, ModuleContent::Text(TextContent::default()));
        let empty = translated(ModuleContent::Text(TextContent::default()));
        assert!(!is_module_translation_missing(&m, Some(&empty)));
    }

    #[test]
    fn test_warning_uses_message_field() {
        let m = module(
            ModuleType::Warning,
            ModuleContent::Alert(AlertContent {
                title: None,
                message: Some("Do not touch".into()),
                description: None,
            }),
        );

        // Translating `description` does not satisfy a `warning` module.
        let wrong_field = translated(ModuleContent::Alert(AlertContent {
            title: None,
            message: None,
            description: Some("Nicht berühren".into()),
        }));
        assert!(is_module_translation_missing(&m, Some(&wrong_field)));

        let right_field = translated(ModuleContent::Alert(AlertContent {
            title: None,
            message: Some("Nicht berühren".into()),
            description: None,
        }));
        assert!(!is_module_translation_missing(&m, Some(&right_field)));
    }

    #[test]
    fn test_caution_uses_description_field() {
        let m = module(
            ModuleType::Caution,
            ModuleContent::Alert(AlertContent {
                title: Some("Caution".into()),
                message: None,
                description: Some("Hot parts".into()),
            }),
        );
        let tr = translated(ModuleContent::Alert(AlertContent {
            title: Some("Vorsicht".into()),
            message: None,
            description: Some("Heiße Teile".into()),
        }));
        assert!(!is_module_translation_missing(&m, Some(&tr)));
    }

    #[test]
    fn test_table_full_translation_complete() {
        let m = module(
            ModuleType::Table,
            ModuleContent::Table(TableContent::new(
                vec!["A".into(), "B".into()],
                vec![vec!["1".into(), "2".into()]],
            )),
        );
        let tr = translated(ModuleContent::Table(TableContent::new(
            vec!["A1".into(), "B1".into()],
            vec![vec!["1t".into(), "2t".into()]],
        )));
        assert!(!is_module_translation_missing(&m, Some(&tr)));
    }

    #[test]
    fn test_table_empty_cell_is_missing() {
        let m = module(
            ModuleType::Table,
            ModuleContent::Table(TableContent::new(
                vec!["A".into(), "B".into()],
                vec![vec!["1".into(), "2".into()]],
            )),
        );
        let tr = translated(ModuleContent::Table(TableContent::new(
            vec!["A1".into(), "B1".into()],
            vec![vec!["1t".into(), "".into()]],
        )));
        assert!(is_module_translation_missing(&m, Some(&tr)));
    }

    #[test]
    fn test_table_header_shape_mismatch_is_missing() {
        let m = module(
            ModuleType::Table,
            ModuleContent::Table(TableContent::new(
                vec!["A".into(), "B".into()],
                Vec::new(),
            )),
        );
        let tr = translated(ModuleContent::Table(TableContent::new(
            vec!["A1".into()],
            Vec::new(),
        )));
        assert!(is_module_translation_missing(&m, Some(&tr)));
    }

    #[test]
    fn test_table_caption_never_required() {
        let m = module(
            ModuleType::Table,
            ModuleContent::Table(TableContent {
                headers: Some(vec!["A".into()]),
                rows: None,
                caption: Some("Torque values".into()),
            }),
        );
        let tr = translated(ModuleContent::Table(TableContent {
            headers: Some(vec!["A1".into()]),
            rows: None,
            caption: None,
        }));
        assert!(!is_module_translation_missing(&m, Some(&tr)));
    }

    #[test]
    fn test_checklist_every_item_required() {
        let m = module(
            ModuleType::Checklist,
            ModuleContent::Checklist(ChecklistContent::from_texts(["Check oil", "Close lid"])),
        );

        let partial = translated(ModuleContent::Checklist(ChecklistContent::from_texts([
            "Öl prüfen",
        ])));
        assert!(is_module_translation_missing(&m, Some(&partial)));

        let full = translated(ModuleContent::Checklist(ChecklistContent::from_texts([
            "Öl prüfen",
            "Deckel schließen",
        ])));
        assert!(!is_module_translation_missing(&m, Some(&full)));
    }

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_bom_hidden_rows_do_not_gate() {
        // Source has a described component but an empty visibility filter:
        // only title/headers/messages gate completion.
        let m = module(
            ModuleType::Bom,
            ModuleContent::Bom(BomContent {
                title: Some("Parts".into()),
                headers: Some(map(&[("code", "Code")])),
                messages: Some(map(&[("empty", "No parts")])),
                descriptions: Some(map(&[("X001", "desc")])),
                filtered_component_codes: Some(Vec::new()),
                ..Default::default()
            }),
        );
        let tr = translated(ModuleContent::Bom(BomContent {
            title: Some("Teile".into()),
            headers: Some(map(&[("code", "Nummer")])),
            messages: Some(map(&[("empty", "Keine Teile")])),
            ..Default::default()
        }));
        assert!(!is_module_translation_missing(&m, Some(&tr)));
    }

    #[test]
    fn test_bom_visible_rows_gate() {
        let m = module(
            ModuleType::Bom,
            ModuleContent::Bom(BomContent {
                descriptions: Some(map(&[("X001", "Bolt"), ("X002", "Nut")])),
                filtered_component_codes: Some(vec!["X001".into()]),
                ..Default::default()
            }),
        );

        let without_visible = translated(ModuleContent::Bom(BomContent {
            descriptions: Some(map(&[("X002", "Mutter")])),
            ..Default::default()
        }));
        assert!(is_module_translation_missing(&m, Some(&without_visible)));

        // Only the visible code is required.
        let with_visible = translated(ModuleContent::Bom(BomContent {
            descriptions: Some(map(&[("X001", "Schraube")])),
            ..Default::default()
        }));
        assert!(!is_module_translation_missing(&m, Some(&with_visible)));
    }

    #[test]
    fn test_bom_missing_header_key() {
        let m = module(
            ModuleType::Bom,
            ModuleContent::Bom(BomContent {
                headers: Some(map(&[("code", "Code"), ("qty", "Quantity")])),
                ..Default::default()
            }),
        );
        let tr = translated(ModuleContent::Bom(BomContent {
            headers: Some(map(&[("code", "Nummer")])),
            ..Default::default()
        }));
        assert!(is_module_translation_missing(&m, Some(&tr)));
    }

    #[test]
    fn test_unknown_type_defaults_to_nothing_required() {
        let m = module(
            ModuleType::Unknown("hologram".into()),
            ModuleContent::Unknown(serde_json::json!({"frames": 12})),
        );
        let tr = translated(ModuleContent::Unknown(serde_json::Value::Null));
        assert!(!is_module_translation_missing(&m, Some(&tr)));
    }

    #[test]
    fn test_unknown_type_with_title_requires_it() {
        let m = module(
            ModuleType::Unknown("hologram".into()),
            ModuleContent::Unknown(serde_json::json!({"title": "Exploded view"})),
        );
        let tr = translated(ModuleContent::Unknown(serde_json::Value::Null));
        assert!(is_module_translation_missing(&m, Some(&tr)));

        let done = translated(ModuleContent::Unknown(
            serde_json::json!({"title": "Explosionsansicht"}),
        ));
        assert!(!is_module_translation_missing(&m, Some(&done)));
    }

    #[test]
    fn test_component_module_requires_nothing() {
        let m = module(
            ModuleType::Component,
            ModuleContent::Component(ComponentContent {
                component_id: Some(4),
                quantity: Some(2),
            }),
        );
        let tr = translated(ModuleContent::Component(ComponentContent::default()));
        assert!(!is_module_translation_missing(&m, Some(&tr)));
    }

    #[test]
    fn test_link_and_attachment_fields() {
        let link = module(
            ModuleType::Link,
            ModuleContent::Link(LinkContent {
                url: Some("https://example.com".into()),
                text: Some("Manual".into()),
                description: None,
            }),
        );
        let tr = translated(ModuleContent::Link(LinkContent {
            url: None,
            text: Some("Handbuch".into()),
            description: None,
        }));
        assert!(!is_module_translation_missing(&link, Some(&tr)));

        let attachment = module(
            ModuleType::Pdf,
            ModuleContent::Attachment(AttachmentContent {
                src: Some("spec.pdf".into()),
                filename: Some("spec.pdf".into()),
                title: Some("Spec sheet".into()),
                description: None,
            }),
        );
        let empty = translated(ModuleContent::Attachment(AttachmentContent::default()));
        assert!(is_module_translation_missing(&attachment, Some(&empty)));
    }

    #[test]
    fn test_section_missing_without_record() {
        let section = Section::new(1, 1, "Intro");
        assert!(is_section_translation_missing(
            &section,
            &[],
            None,
            &HashMap::new()
        ));
    }

    #[test]
    fn test_section_description_gates_when_present() {
        let section = Section::new(1, 1, "Intro").description("Overview");
        let only_title = SectionTranslation::new(1, 2).title("Einleitung");
        assert!(is_section_translation_missing(
            &section,
            &[],
            Some(&only_title),
            &HashMap::new()
        ));

        let full = SectionTranslation::new(1, 2)
            .title("Einleitung")
            .description("Überblick");
        assert!(!is_section_translation_missing(
            &section,
            &[],
            Some(&full),
            &HashMap::new()
        ));
    }

    #[test]
    fn test_section_rolls_up_module_verdicts() {
        let section = Section::new(1, 1, "Intro");
        let m = module(
            ModuleType::Text,
            ModuleContent::Text(TextContent::new("hello")),
        );
        let tr = SectionTranslation::new(1, 2).title("Einleitung");

        // Module untranslated: the section is missing.
        assert!(is_section_translation_missing(
            &section,
            std::slice::from_ref(&m),
            Some(&tr),
            &HashMap::new()
        ));

        let mut module_trs = HashMap::new();
        module_trs.insert(
            m.id,
            ContentModuleTranslation::new(m.id, 2, ModuleContent::Text(TextContent::new("hallo"))),
        );
        assert!(!is_section_translation_missing(
            &section,
            std::slice::from_ref(&m),
            Some(&tr),
            &module_trs
        ));
    }
}
