//! Integration tests for translation completeness over whole bundles.

use std::collections::HashMap;

use manualkit::model::{
    AlertContent, ContentModuleTranslation, ModuleContent, Section, SectionTranslation,
    TableContent, TextContent,
};
use manualkit::{
    is_module_translation_missing, is_section_translation_missing, translation_report,
    ManualBundle, ManualStore, MemoryStore,
};
use serde_json::json;

fn store(value: serde_json::Value) -> MemoryStore {
    let bundle: ManualBundle = serde_json::from_value(value).unwrap();
    MemoryStore::from_bundle(bundle)
}

#[test]
fn untranslated_section_is_missing() {
    // Scenario: section titled "Intro", no description, no translation record.
    let section = Section::new(1, 1, "Intro");
    assert!(is_section_translation_missing(
        &section,
        &[],
        None,
        &HashMap::new()
    ));
}

#[test]
fn table_scenario_from_storage() {
    let store = store(json!({
        "document": {"id": 1, "title": "Manual"},
        "sections": [{"id": 1, "documentId": 1, "order": 1, "title": "Specs"}],
        "modules": [{
            "id": 10, "sectionId": 1, "type": "table", "order": 1,
            "content": {"headers": ["A", "B"], "rows": [["1", "2"]]}
        }],
        "moduleTranslations": [{
            "moduleId": 10, "languageId": 2,
            "content": {"headers": ["A1", "B1"], "rows": [["1t", "2t"]]}
        }]
    }));

    let modules = store.modules(1).unwrap();
    let translation = store.module_translation(10, 2).unwrap();
    assert!(!is_module_translation_missing(
        &modules[0],
        translation.as_ref()
    ));

    // An empty translated cell flips the verdict.
    let broken = ContentModuleTranslation::new(
        10,
        2,
        ModuleContent::Table(TableContent::new(
            vec!["A1".into(), "B1".into()],
            vec![vec!["1t".into(), "".into()]],
        )),
    );
    assert!(is_module_translation_missing(&modules[0], Some(&broken)));
}

#[test]
fn bom_with_no_visible_rows_ignores_descriptions() {
    // Scenario: descriptions present, filter empty, translation covers only
    // title/headers/messages.
    let store = store(json!({
        "document": {"id": 1, "title": "Manual"},
        "sections": [{"id": 1, "documentId": 1, "order": 1, "title": "Parts"}],
        "modules": [{
            "id": 10, "sectionId": 1, "type": "bom", "order": 1,
            "content": {
                "bomId": 3,
                "title": "Parts list",
                "headers": {"code": "Code"},
                "messages": {"empty": "No parts"},
                "descriptions": {"X001": "desc"},
                "filteredComponentCodes": []
            }
        }],
        "moduleTranslations": [{
            "moduleId": 10, "languageId": 2,
            "content": {
                "title": "Teileliste",
                "headers": {"code": "Nummer"},
                "messages": {"empty": "Keine Teile"}
            }
        }]
    }));

    let modules = store.modules(1).unwrap();
    let translation = store.module_translation(10, 2).unwrap();
    assert!(!is_module_translation_missing(
        &modules[0],
        translation.as_ref()
    ));
}

#[test]
fn completeness_is_monotone_in_translated_fields() {
    // Adding a missing required field can only move a module towards
    // complete, never away from it.
    let store = store(json!({
        "document": {"id": 1, "title": "Manual"},
        "sections": [{"id": 1, "documentId": 1, "order": 1, "title": "Safety"}],
        "modules": [{
            "id": 10, "sectionId": 1, "type": "warning", "order": 1,
            "content": {"title": "Hot surface", "message": "Do not touch"}
        }]
    }));
    let modules = store.modules(1).unwrap();
    let module = &modules[0];

    let partial = ContentModuleTranslation::new(
        10,
        2,
        ModuleContent::Alert(AlertContent {
            title: Some("Heiße Oberfläche".into()),
            message: None,
            description: None,
        }),
    );
    assert!(is_module_translation_missing(module, Some(&partial)));

    let complete = ContentModuleTranslation::new(
        10,
        2,
        ModuleContent::Alert(AlertContent {
            title: Some("Heiße Oberfläche".into()),
            message: Some("Nicht berühren".into()),
            description: None,
        }),
    );
    assert!(!is_module_translation_missing(module, Some(&complete)));
}

#[test]
fn report_percent_over_bundle() {
    let store = store(json!({
        "document": {"id": 1, "title": "Manual"},
        "sections": [
            {"id": 1, "documentId": 1, "order": 1, "title": "Intro"},
            {"id": 2, "documentId": 1, "parentId": 1, "order": 1, "title": "Safety"}
        ],
        "modules": [
            {"id": 10, "sectionId": 1, "type": "text", "order": 1,
             "content": {"text": "hello"}},
            {"id": 11, "sectionId": 2, "type": "note", "order": 1,
             "content": {"description": "note body"}}
        ],
        "languages": [
            {"id": 1, "code": "en", "name": "English", "isDefault": true},
            {"id": 2, "code": "de", "name": "German"}
        ],
        "sectionTranslations": [
            {"sectionId": 1, "languageId": 2, "title": "Einleitung"}
        ],
        "moduleTranslations": [
            {"moduleId": 10, "languageId": 2, "content": {"text": "hallo"}}
        ]
    }));

    let report = translation_report(&store, 2).unwrap();
    assert_eq!(report.total_sections, 2);
    assert_eq!(report.total_modules, 2);
    // Section 1 complete (title + its module), section 2 untouched.
    assert_eq!(report.translated_sections, 1);
    assert_eq!(report.translated_modules, 1);
    assert_eq!(report.percent(), 50);
    assert!(!report.is_complete());
}

#[test]
fn upserting_missing_pieces_completes_the_report() {
    let mut s = store(json!({
        "document": {"id": 1, "title": "Manual"},
        "sections": [{"id": 1, "documentId": 1, "order": 1, "title": "Intro"}],
        "modules": [{"id": 10, "sectionId": 1, "type": "text", "order": 1,
                     "content": {"text": "hello"}}],
        "languages": [{"id": 2, "code": "de", "name": "German"}]
    }));

    assert_eq!(translation_report(&s, 2).unwrap().percent(), 0);

    s.upsert_section_translation(SectionTranslation::new(1, 2).title("Einleitung"))
        .unwrap();
    s.upsert_module_translation(ContentModuleTranslation::new(
        10,
        2,
        ModuleContent::Text(TextContent::new("hallo")),
    ))
    .unwrap();

    let report = translation_report(&s, 2).unwrap();
    assert_eq!(report.percent(), 100);
    assert!(report.is_complete());
}
