//! Plain text rendering for manuals.

use crate::error::Result;
use crate::model::{ContentModule, ModuleContent, ModuleType};

use super::{pick, ManualView, RenderOptions};

/// Convert a manual view to plain text.
///
/// Sections become underlined or indented headings, modules become flat
/// paragraphs; structure the text format cannot express is dropped rather
/// than approximated.
pub fn to_text(view: &ManualView, options: &RenderOptions) -> Result<String> {
    let mut output = String::new();

    if options.include_metadata {
        output.push_str(&view.document.title);
        output.push('\n');
        output.push_str(&"=".repeat(view.document.title.chars().count().max(3)));
        output.push_str("\n\n");
    }

    for node in view.tree.linearize() {
        let section = node.section;
        let overlay = view
            .translations
            .as_ref()
            .and_then(|set| set.sections.get(&section.id));

        let title = options
            .title_overrides
            .get(&section.id)
            .map(String::as_str)
            .or_else(|| {
                pick(
                    overlay.map(|tr| tr.title.as_str()),
                    Some(section.title.as_str()),
                )
            })
            .unwrap_or_default();

        let indent = "  ".repeat(node.depth.min(options.max_heading_level.saturating_sub(1) as usize));
        output.push_str(&format!("{indent}{title}\n\n"));

        if let Some(description) = pick(
            overlay.and_then(|tr| tr.description.as_deref()),
            section.description.as_deref(),
        ) {
            output.push_str(description);
            output.push_str("\n\n");
        }

        for module in view.section_modules(section.id) {
            render_module(&mut output, view, module);
        }
    }

    Ok(output.trim().to_string())
}

fn render_module(output: &mut String, view: &ManualView, module: &ContentModule) {
    let overlay = view.module_overlay(module.id);

    match &module.kind {
        ModuleType::Text | ModuleType::Testp => {
            let text = pick(
                overlay
                    .and_then(ModuleContent::as_text)
                    .and_then(|c| c.text.as_deref()),
                module.content.as_text().and_then(|c| c.text.as_deref()),
            );
            if let Some(text) = text {
                output.push_str(text);
                output.push_str("\n\n");
            }
        }

        kind if kind.is_alert() => {
            let source = module.content.as_alert();
            let translated = overlay.and_then(ModuleContent::as_alert);
            let tag = kind.as_str().to_uppercase().replace('-', " ");
            let title = pick(
                translated.and_then(|c| c.title.as_deref()),
                source.and_then(|c| c.title.as_deref()),
            )
            .unwrap_or(&tag);
            output.push_str(&format!("[{tag}] {title}\n"));
            if let Some(body) = pick(
                translated.and_then(|c| c.body_for(kind)),
                source.and_then(|c| c.body_for(kind)),
            ) {
                output.push_str(body);
                output.push('\n');
            }
            output.push('\n');
        }

        ModuleType::Table => {
            if let Some(table) = module.content.as_table() {
                if let Some(headers) = table.headers.as_ref() {
                    output.push_str(&headers.join("\t"));
                    output.push('\n');
                }
                for row in table.rows.as_deref().unwrap_or(&[]) {
                    output.push_str(&row.join("\t"));
                    output.push('\n');
                }
                output.push('\n');
            }
        }

        ModuleType::Checklist => {
            if let Some(checklist) = module.content.as_checklist() {
                let translated = overlay.and_then(ModuleContent::as_checklist);
                for (idx, item) in checklist.items.iter().enumerate() {
                    let text = pick(
                        translated
                            .and_then(|c| c.items.get(idx))
                            .and_then(|i| i.text.as_deref()),
                        item.text.as_deref(),
                    )
                    .unwrap_or("");
                    output.push_str(&format!("* {text}\n"));
                }
                output.push('\n');
            }
        }

        ModuleType::Link => {
            if let Some(link) = module.content.as_link() {
                let text = link.text.as_deref().unwrap_or("");
                let url = link.url.as_deref().unwrap_or("");
                output.push_str(&format!("{text} <{url}>\n\n"));
            }
        }

        ModuleType::Bom => {
            let source = module.content.as_bom();
            let entries = source
                .and_then(|c| c.bom_id)
                .and_then(|id| view.bom_entries.get(&id))
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            for entry in entries {
                output.push_str(&format!(
                    "{}\t{}\t{}\n",
                    entry.display_code(),
                    entry.description().unwrap_or("–"),
                    entry.item.quantity
                ));
            }
            if !entries.is_empty() {
                output.push('\n');
            }
        }

        // Media, attachments, components, and unknown types carry no prose.
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Document, Section, TextContent};
    use crate::tree::SectionTree;
    use std::collections::HashMap;

    #[test]
    fn test_plain_text_output() {
        let sections = vec![Section::new(1, 1, "Intro")];
        let module = ContentModule::new(10, 1, ModuleContent::Text(TextContent::new("Hello")));
        let mut modules = HashMap::new();
        modules.insert(1, vec![module]);

        let view = ManualView {
            document: Document::new(1, "Manual"),
            tree: SectionTree::build(&sections),
            modules,
            bom_entries: HashMap::new(),
            components: HashMap::new(),
            translations: None,
        };

        let text = to_text(&view, &RenderOptions::default()).unwrap();
        assert!(text.starts_with("Intro"));
        assert!(text.contains("Hello"));
        assert!(!text.contains('#'));
    }
}
