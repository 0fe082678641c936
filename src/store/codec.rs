//! Content codec at the storage boundary.
//!
//! Stored module and translation payloads are opaque structured records:
//! depending on the writer they arrive either as an already-parsed JSON
//! object or as a string-encoded JSON document. This module parses both
//! transparently on read and re-serializes on write, so the core only ever
//! sees typed [`ModuleContent`] values.
//!
//! Decoding is deliberately lenient: a field whose structure does not match
//! the module's expected shape is treated as absent, which falls back to the
//! conservative, translator-visible "missing" outcome instead of failing.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::model::{
    AlertContent, AttachmentContent, BomContent, ChecklistContent, ChecklistItem, ComponentContent,
    LinkContent, MediaContent, ModuleContent, ModuleType, TableContent, TextContent,
};

/// Decode a stored content payload into the typed shape for `kind`.
///
/// Accepts an object or a string-encoded JSON document. Anything that cannot
/// be interpreted at all decodes to the empty shape for the type.
pub fn decode_content(kind: &ModuleType, value: &Value) -> ModuleContent {
    let parsed;
    let object = match value {
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(inner) => {
                parsed = inner;
                &parsed
            }
            Err(_) => {
                log::warn!("content for module type {kind} is not valid JSON; treating as empty");
                return ModuleContent::empty_for(kind);
            }
        },
        other => other,
    };

    match kind {
        ModuleType::Text | ModuleType::Testp => ModuleContent::Text(TextContent {
            text: str_field(object, "text"),
        }),

        ModuleType::Image | ModuleType::Video => ModuleContent::Media(MediaContent {
            src: str_field(object, "src"),
            alt: str_field(object, "alt"),
            caption: str_field(object, "caption"),
            title: str_field(object, "title"),
        }),

        ModuleType::Table => ModuleContent::Table(TableContent {
            headers: string_array(object, "headers"),
            rows: row_array(object, "rows"),
            caption: str_field(object, "caption"),
        }),

        kind if kind.is_alert() => ModuleContent::Alert(AlertContent {
            title: str_field(object, "title"),
            message: str_field(object, "message"),
            description: str_field(object, "description"),
        }),

        ModuleType::Checklist => ModuleContent::Checklist(ChecklistContent {
            items: checklist_items(object),
        }),

        ModuleType::Bom => ModuleContent::Bom(BomContent {
            bom_id: u64_field(object, "bomId"),
            title: str_field(object, "title"),
            description: str_field(object, "description"),
            headers: string_map(object, "headers"),
            messages: string_map(object, "messages"),
            descriptions: string_map(object, "descriptions"),
            filter_settings: object.get("filterSettings").cloned(),
            filtered_component_codes: string_array(object, "filteredComponentCodes"),
        }),

        ModuleType::Link => ModuleContent::Link(LinkContent {
            url: str_field(object, "url"),
            text: str_field(object, "text"),
            description: str_field(object, "description"),
        }),

        kind if kind.is_attachment() => ModuleContent::Attachment(AttachmentContent {
            src: str_field(object, "src"),
            filename: str_field(object, "filename"),
            title: str_field(object, "title"),
            description: str_field(object, "description"),
        }),

        ModuleType::Component => ModuleContent::Component(ComponentContent {
            component_id: u64_field(object, "componentId"),
            quantity: object
                .get("quantity")
                .and_then(Value::as_u64)
                .map(|q| q as u32),
        }),

        // Unrecognized tag: keep the payload verbatim so generic
        // title/description access still works.
        _ => ModuleContent::Unknown(object.clone()),
    }
}

/// Serialize typed content back to the stored representation.
pub fn encode_content(content: &ModuleContent) -> Value {
    serde_json::to_value(content).unwrap_or(Value::Null)
}

fn str_field(value: &Value, name: &str) -> Option<String> {
    value
        .get(name)
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn u64_field(value: &Value, name: &str) -> Option<u64> {
    value.get(name).and_then(Value::as_u64)
}

/// An array of strings; a malformed field decodes to `None`, a malformed
/// element to an empty string.
fn string_array(value: &Value, name: &str) -> Option<Vec<String>> {
    let array = value.get(name)?.as_array()?;
    Some(
        array
            .iter()
            .map(|v| v.as_str().unwrap_or_default().to_string())
            .collect(),
    )
}

fn row_array(value: &Value, name: &str) -> Option<Vec<Vec<String>>> {
    let array = value.get(name)?.as_array()?;
    Some(
        array
            .iter()
            .map(|row| {
                row.as_array()
                    .map(|cells| {
                        cells
                            .iter()
                            .map(|c| c.as_str().unwrap_or_default().to_string())
                            .collect()
                    })
                    .unwrap_or_default()
            })
            .collect(),
    )
}

/// A string-to-string map; non-string values are dropped key by key.
fn string_map(value: &Value, name: &str) -> Option<BTreeMap<String, String>> {
    let object = value.get(name)?.as_object()?;
    Some(
        object
            .iter()
            .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
            .collect(),
    )
}

fn checklist_items(value: &Value) -> Vec<ChecklistItem> {
    value
        .get("items")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|item| ChecklistItem {
                    text: str_field(item, "text"),
                    checked: item
                        .get("checked")
                        .and_then(Value::as_bool)
                        .unwrap_or(false),
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_object_payload() {
        let content = decode_content(&ModuleType::Text, &json!({"text": "hello"}));
        assert_eq!(
            content.as_text().and_then(|t| t.text.as_deref()),
            Some("hello")
        );
    }

    #[test]
    fn test_decode_string_encoded_payload() {
        let stored = Value::String(r#"{"text": "hello"}"#.to_string());
        let content = decode_content(&ModuleType::Text, &stored);
        assert_eq!(
            content.as_text().and_then(|t| t.text.as_deref()),
            Some("hello")
        );
    }

    #[test]
    fn test_decode_garbage_string_is_empty_shape() {
        let stored = Value::String("not json at all".to_string());
        let content = decode_content(&ModuleType::Text, &stored);
        assert!(content.as_text().is_some_and(|t| t.text.is_none()));
    }

    #[test]
    fn test_malformed_headers_treated_as_absent() {
        // `headers` as a non-array must not fail; it decodes to None.
        let content = decode_content(
            &ModuleType::Table,
            &json!({"headers": "A;B", "rows": [["1", "2"]]}),
        );
        let table = content.as_table().unwrap();
        assert!(table.headers.is_none());
        assert_eq!(table.rows.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn test_decode_bom_payload() {
        let content = decode_content(
            &ModuleType::Bom,
            &json!({
                "bomId": 4,
                "title": "Parts",
                "headers": {"code": "Code", "qty": 7},
                "descriptions": {"X001": "Bolt"},
                "filteredComponentCodes": ["X001"]
            }),
        );
        let bom = content.as_bom().unwrap();
        assert_eq!(bom.bom_id, Some(4));
        // Non-string map values are dropped key by key.
        assert_eq!(bom.headers.as_ref().unwrap().len(), 1);
        assert_eq!(bom.visible_codes(), vec!["X001"]);
    }

    #[test]
    fn test_decode_checklist_payload() {
        let content = decode_content(
            &ModuleType::Checklist,
            &json!({"items": [{"text": "Check oil", "checked": true}, {"checked": "yes"}]}),
        );
        let checklist = content.as_checklist().unwrap();
        assert_eq!(checklist.items.len(), 2);
        assert!(checklist.items[0].checked);
        // Malformed `checked` falls back to false, malformed `text` to None.
        assert!(!checklist.items[1].checked);
        assert!(checklist.items[1].text.is_none());
    }

    #[test]
    fn test_decode_unknown_keeps_payload() {
        let payload = json!({"title": "Exploded view", "frames": 12});
        let content = decode_content(&ModuleType::Unknown("hologram".into()), &payload);
        assert_eq!(content.title(), Some("Exploded view"));
    }

    #[test]
    fn test_encode_round_trip() {
        let source = decode_content(
            &ModuleType::Table,
            &json!({"headers": ["A"], "rows": [["1"]], "caption": "T"}),
        );
        let encoded = encode_content(&source);
        let decoded = decode_content(&ModuleType::Table, &encoded);
        assert_eq!(
            decoded.as_table().and_then(|t| t.caption.as_deref()),
            Some("T")
        );
    }

    #[test]
    fn test_decode_alert_keeps_both_body_fields() {
        let content = decode_content(
            &ModuleType::Warning,
            &json!({"title": "Hot", "message": "Do not touch", "description": "ignored"}),
        );
        let alert = content.as_alert().unwrap();
        assert_eq!(alert.message.as_deref(), Some("Do not touch"));
        assert_eq!(alert.description.as_deref(), Some("ignored"));
    }
}
