//! Content module types and the module registry.
//!
//! A content module is a typed, ordered leaf attached to a section. The set
//! of module types is closed; every consumer dispatches exhaustively over the
//! tag and degrades gracefully on anything it does not recognize instead of
//! failing the whole document.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{BomId, ComponentId, ModuleId, SectionId};

/// A typed unit of content attached to a section.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentModule {
    /// Module identity
    pub id: ModuleId,

    /// Owning section
    pub section_id: SectionId,

    /// Module type tag
    #[serde(rename = "type")]
    pub kind: ModuleType,

    /// Sequence within the owning section
    #[serde(default)]
    pub order: i32,

    /// Typed content payload
    pub content: ModuleContent,
}

impl ContentModule {
    /// Create a new module with the given content.
    pub fn new(id: ModuleId, section_id: SectionId, content: ModuleContent) -> Self {
        Self {
            id,
            section_id,
            kind: content.kind(),
            order: 0,
            content,
        }
    }

    /// Set the sequence within the section and return self.
    pub fn order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }
}

/// The closed set of content module type tags.
///
/// Unrecognized tags deserialize into [`ModuleType::Unknown`] so that a
/// single malformed row cannot break an entire document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ModuleType {
    /// Plain text block
    Text,
    /// Image with alt text and caption
    Image,
    /// Video with caption
    Video,
    /// Table with headers and rows
    Table,
    /// Warning alert (body field is `message`)
    Warning,
    /// Danger alert
    Danger,
    /// Secondary warning alert
    WarningAlert,
    /// Caution alert
    Caution,
    /// Note alert
    Note,
    /// Safety instructions alert
    SafetyInstructions,
    /// Checklist of items
    Checklist,
    /// Generic file attachment
    File,
    /// PDF attachment
    Pdf,
    /// External link
    Link,
    /// Single component reference with quantity
    Component,
    /// Bill-of-materials summary
    Bom,
    /// 3D model attachment
    ThreeDModel,
    /// Test paragraph (text shape)
    Testp,
    /// Any tag not in the closed set
    Unknown(String),
}

impl ModuleType {
    /// String tag as stored.
    pub fn as_str(&self) -> &str {
        match self {
            ModuleType::Text => "text",
            ModuleType::Image => "image",
            ModuleType::Video => "video",
            ModuleType::Table => "table",
            ModuleType::Warning => "warning",
            ModuleType::Danger => "danger",
            ModuleType::WarningAlert => "warning-alert",
            ModuleType::Caution => "caution",
            ModuleType::Note => "note",
            ModuleType::SafetyInstructions => "safety-instructions",
            ModuleType::Checklist => "checklist",
            ModuleType::File => "file",
            ModuleType::Pdf => "pdf",
            ModuleType::Link => "link",
            ModuleType::Component => "component",
            ModuleType::Bom => "bom",
            ModuleType::ThreeDModel => "3d-model",
            ModuleType::Testp => "testp",
            ModuleType::Unknown(tag) => tag,
        }
    }

    /// Check whether this is one of the alert subtypes.
    pub fn is_alert(&self) -> bool {
        matches!(
            self,
            ModuleType::Warning
                | ModuleType::Danger
                | ModuleType::WarningAlert
                | ModuleType::Caution
                | ModuleType::Note
                | ModuleType::SafetyInstructions
        )
    }

    /// Check whether this is a file-like attachment type.
    pub fn is_attachment(&self) -> bool {
        matches!(
            self,
            ModuleType::File | ModuleType::Pdf | ModuleType::ThreeDModel
        )
    }

    /// The field carrying the alert body text for this subtype.
    ///
    /// `warning` stores its body under `message` while every other alert
    /// subtype uses `description`. This asymmetry exists in previously
    /// authored content and must not be unified.
    pub fn alert_body_field(&self) -> Option<&'static str> {
        match self {
            ModuleType::Warning => Some("message"),
            ModuleType::Danger
            | ModuleType::WarningAlert
            | ModuleType::Caution
            | ModuleType::Note
            | ModuleType::SafetyInstructions => Some("description"),
            _ => None,
        }
    }
}

impl fmt::Display for ModuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ModuleType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "text" => ModuleType::Text,
            "image" => ModuleType::Image,
            "video" => ModuleType::Video,
            "table" => ModuleType::Table,
            "warning" => ModuleType::Warning,
            "danger" => ModuleType::Danger,
            "warning-alert" => ModuleType::WarningAlert,
            "caution" => ModuleType::Caution,
            "note" => ModuleType::Note,
            "safety-instructions" => ModuleType::SafetyInstructions,
            "checklist" => ModuleType::Checklist,
            "file" => ModuleType::File,
            "pdf" => ModuleType::Pdf,
            "link" => ModuleType::Link,
            "component" => ModuleType::Component,
            "bom" => ModuleType::Bom,
            "3d-model" => ModuleType::ThreeDModel,
            "testp" => ModuleType::Testp,
            _ => ModuleType::Unknown(tag),
        }
    }
}

impl From<ModuleType> for String {
    fn from(kind: ModuleType) -> Self {
        kind.as_str().to_string()
    }
}

/// Typed content payload of a module or of a translation overlay.
///
/// Translation payloads mirror the source shape but may be partially
/// populated, so every translatable field is optional. An absent field means
/// "not applicable to this instance", never "untranslated".
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ModuleContent {
    /// `text` / `testp`
    Text(TextContent),
    /// `image` / `video`
    Media(MediaContent),
    /// `table`
    Table(TableContent),
    /// Alert subtypes
    Alert(AlertContent),
    /// `checklist`
    Checklist(ChecklistContent),
    /// `bom`
    Bom(BomContent),
    /// `link`
    Link(LinkContent),
    /// `file` / `pdf` / `3d-model`
    Attachment(AttachmentContent),
    /// `component`
    Component(ComponentContent),
    /// Payload of an unrecognized module type, kept verbatim
    Unknown(Value),
}

impl ModuleContent {
    /// The module type this content naturally belongs to.
    ///
    /// Shapes shared by several tags (media, alerts, attachments) report the
    /// first tag of their group; use the owning module's `kind` when the
    /// exact tag matters.
    pub fn kind(&self) -> ModuleType {
        match self {
            ModuleContent::Text(_) => ModuleType::Text,
            ModuleContent::Media(_) => ModuleType::Image,
            ModuleContent::Table(_) => ModuleType::Table,
            ModuleContent::Alert(_) => ModuleType::Warning,
            ModuleContent::Checklist(_) => ModuleType::Checklist,
            ModuleContent::Bom(_) => ModuleType::Bom,
            ModuleContent::Link(_) => ModuleType::Link,
            ModuleContent::Attachment(_) => ModuleType::File,
            ModuleContent::Component(_) => ModuleType::Component,
            ModuleContent::Unknown(_) => ModuleType::Unknown(String::new()),
        }
    }

    /// Empty content of the canonical shape for `kind`.
    pub fn empty_for(kind: &ModuleType) -> Self {
        match kind {
            ModuleType::Text | ModuleType::Testp => ModuleContent::Text(TextContent::default()),
            ModuleType::Image | ModuleType::Video => {
                ModuleContent::Media(MediaContent::default())
            }
            ModuleType::Table => ModuleContent::Table(TableContent::default()),
            k if k.is_alert() => ModuleContent::Alert(AlertContent::default()),
            ModuleType::Checklist => ModuleContent::Checklist(ChecklistContent::default()),
            ModuleType::Bom => ModuleContent::Bom(BomContent::default()),
            ModuleType::Link => ModuleContent::Link(LinkContent::default()),
            k if k.is_attachment() => ModuleContent::Attachment(AttachmentContent::default()),
            ModuleType::Component => ModuleContent::Component(ComponentContent::default()),
            _ => ModuleContent::Unknown(Value::Null),
        }
    }

    /// Generic `title` access across shapes.
    pub fn title(&self) -> Option<&str> {
        match self {
            ModuleContent::Media(c) => c.title.as_deref(),
            ModuleContent::Alert(c) => c.title.as_deref(),
            ModuleContent::Bom(c) => c.title.as_deref(),
            ModuleContent::Attachment(c) => c.title.as_deref(),
            ModuleContent::Unknown(v) => v.get("title").and_then(Value::as_str),
            _ => None,
        }
    }

    /// Generic `description` access across shapes.
    pub fn description(&self) -> Option<&str> {
        match self {
            ModuleContent::Alert(c) => c.description.as_deref(),
            ModuleContent::Bom(c) => c.description.as_deref(),
            ModuleContent::Link(c) => c.description.as_deref(),
            ModuleContent::Attachment(c) => c.description.as_deref(),
            ModuleContent::Unknown(v) => v.get("description").and_then(Value::as_str),
            _ => None,
        }
    }

    /// Access as text content.
    pub fn as_text(&self) -> Option<&TextContent> {
        match self {
            ModuleContent::Text(c) => Some(c),
            _ => None,
        }
    }

    /// Access as media content.
    pub fn as_media(&self) -> Option<&MediaContent> {
        match self {
            ModuleContent::Media(c) => Some(c),
            _ => None,
        }
    }

    /// Access as table content.
    pub fn as_table(&self) -> Option<&TableContent> {
        match self {
            ModuleContent::Table(c) => Some(c),
            _ => None,
        }
    }

    /// Access as alert content.
    pub fn as_alert(&self) -> Option<&AlertContent> {
        match self {
            ModuleContent::Alert(c) => Some(c),
            _ => None,
        }
    }

    /// Access as checklist content.
    pub fn as_checklist(&self) -> Option<&ChecklistContent> {
        match self {
            ModuleContent::Checklist(c) => Some(c),
            _ => None,
        }
    }

    /// Access as BOM summary content.
    pub fn as_bom(&self) -> Option<&BomContent> {
        match self {
            ModuleContent::Bom(c) => Some(c),
            _ => None,
        }
    }

    /// Access as link content.
    pub fn as_link(&self) -> Option<&LinkContent> {
        match self {
            ModuleContent::Link(c) => Some(c),
            _ => None,
        }
    }

    /// Access as attachment content.
    pub fn as_attachment(&self) -> Option<&AttachmentContent> {
        match self {
            ModuleContent::Attachment(c) => Some(c),
            _ => None,
        }
    }

    /// Access as component reference content.
    pub fn as_component(&self) -> Option<&ComponentContent> {
        match self {
            ModuleContent::Component(c) => Some(c),
            _ => None,
        }
    }
}

/// Content of `text` and `testp` modules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextContent {
    /// Body text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl TextContent {
    /// Create text content.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

/// Content of `image` and `video` modules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaContent {
    /// Source path or URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,

    /// Alternative text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,

    /// Caption shown below the media
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,

    /// Title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Content of `table` modules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableContent {
    /// Column headers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Vec<String>>,

    /// Body rows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<Vec<String>>>,

    /// Table caption
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl TableContent {
    /// Create a table from headers and rows.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            headers: Some(headers),
            rows: Some(rows),
            caption: None,
        }
    }

    /// Number of columns, based on headers or the first row.
    pub fn column_count(&self) -> usize {
        self.headers
            .as_ref()
            .map(|h| h.len())
            .or_else(|| self.rows.as_ref().and_then(|r| r.first()).map(|r| r.len()))
            .unwrap_or(0)
    }
}

/// Content of the alert subtypes.
///
/// Both `message` and `description` exist because `warning` stores its body
/// under `message` while the other subtypes use `description`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlertContent {
    /// Alert title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Body text of `warning` modules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Body text of every other alert subtype
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl AlertContent {
    /// The body text for the given alert subtype.
    pub fn body_for(&self, kind: &ModuleType) -> Option<&str> {
        match kind.alert_body_field() {
            Some("message") => self.message.as_deref(),
            Some("description") => self.description.as_deref(),
            _ => None,
        }
    }
}

/// One entry of a checklist.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChecklistItem {
    /// Item text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Whether the item ships pre-checked
    #[serde(default)]
    pub checked: bool,
}

/// Content of `checklist` modules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChecklistContent {
    /// Ordered checklist items
    #[serde(default)]
    pub items: Vec<ChecklistItem>,
}

impl ChecklistContent {
    /// Create a checklist from item texts.
    pub fn from_texts<S: Into<String>>(texts: impl IntoIterator<Item = S>) -> Self {
        Self {
            items: texts
                .into_iter()
                .map(|t| ChecklistItem {
                    text: Some(t.into()),
                    checked: false,
                })
                .collect(),
        }
    }
}

/// Content of `bom` modules: a rendered summary of a bill of materials.
///
/// `headers` and `messages` are keyed maps of UI strings; `descriptions` is
/// keyed by component code. `filtered_component_codes`, when present,
/// restricts which rows are visible to the reader.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BomContent {
    /// Referenced bill of materials
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bom_id: Option<BomId>,

    /// Summary title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Summary description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Column header strings, keyed by column
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,

    /// Auxiliary UI strings, keyed by message id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<BTreeMap<String, String>>,

    /// Per-component descriptions, keyed by component code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descriptions: Option<BTreeMap<String, String>>,

    /// Opaque filter settings, preserved round-trip
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_settings: Option<Value>,

    /// Component codes currently visible to the reader
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filtered_component_codes: Option<Vec<String>>,
}

impl BomContent {
    /// The component codes whose descriptions are currently visible.
    ///
    /// The explicit filter wins when present (even when empty); otherwise
    /// every described code is visible.
    pub fn visible_codes(&self) -> Vec<&str> {
        match &self.filtered_component_codes {
            Some(codes) => codes.iter().map(String::as_str).collect(),
            None => self
                .descriptions
                .as_ref()
                .map(|d| d.keys().map(String::as_str).collect())
                .unwrap_or_default(),
        }
    }
}

/// Content of `link` modules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinkContent {
    /// Target URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Link text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Longer description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Content of `file`, `pdf`, and `3d-model` modules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttachmentContent {
    /// Source path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,

    /// Original file name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    /// Title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Content of `component` modules: a single part reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentContent {
    /// Referenced component
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_id: Option<ComponentId>,

    /// Quantity of the component
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}
