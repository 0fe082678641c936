//! JSON rendering for manuals.

use serde_json::{json, Value};

use crate::error::{Error, Result};
use crate::model::SectionId;
use crate::store::codec;

use super::{JsonFormat, ManualView};

/// Convert a manual view to JSON.
///
/// Sections are emitted as a nested hierarchy; module content is encoded in
/// its stored representation. When a translation overlay is present it is
/// attached verbatim next to the source content so consumers can apply their
/// own fallback rules.
pub fn to_json(view: &ManualView, format: JsonFormat) -> Result<String> {
    let value = json!({
        "document": &view.document,
        "sections": sections_json(view, None),
    });

    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(&value),
        JsonFormat::Compact => serde_json::to_string(&value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {e}")))
}

fn sections_json(view: &ManualView, parent: Option<SectionId>) -> Vec<Value> {
    view.tree
        .children_of(parent)
        .iter()
        .map(|section| {
            let overlay = view
                .translations
                .as_ref()
                .and_then(|set| set.sections.get(&section.id));

            let modules: Vec<Value> = view
                .section_modules(section.id)
                .iter()
                .map(|module| {
                    let mut value = json!({
                        "id": module.id,
                        "type": module.kind.as_str(),
                        "order": module.order,
                        "content": codec::encode_content(&module.content),
                    });
                    if let Some(translated) = view.module_overlay(module.id) {
                        value["translation"] = codec::encode_content(translated);
                    }
                    value
                })
                .collect();

            let mut value = json!({
                "id": section.id,
                "title": &section.title,
                "order": section.order,
                "modules": modules,
                "children": sections_json(view, Some(section.id)),
            });
            if let Some(description) = &section.description {
                value["description"] = json!(description);
            }
            if let Some(overlay) = overlay {
                value["translation"] = json!({
                    "title": &overlay.title,
                    "description": &overlay.description,
                    "status": overlay.status.as_str(),
                });
            }
            value
        })
        .collect()
}
