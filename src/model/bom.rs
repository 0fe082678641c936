//! Bill-of-materials types.

use serde::{Deserialize, Serialize};

use super::{BomId, ComponentId};

/// A physical part referenced by BOMs and component modules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    /// Component identity
    pub id: ComponentId,

    /// Unique part code
    pub code: String,

    /// Part description
    #[serde(default)]
    pub description: String,
}

impl Component {
    /// Create a new component.
    pub fn new(id: ComponentId, code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            code: code.into(),
            description: description.into(),
        }
    }
}

/// A bill of materials.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bom {
    /// BOM identity
    pub id: BomId,

    /// Title
    pub title: String,

    /// Description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One row of a bill of materials.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BomItem {
    /// Row identity
    pub id: u64,

    /// Owning BOM
    pub bom_id: BomId,

    /// Referenced component
    pub component_id: ComponentId,

    /// Indentation depth in the exploded parts tree (>= 1)
    #[serde(default = "default_level")]
    pub level: u32,

    /// Quantity of the component (>= 1)
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_level() -> u32 {
    1
}

fn default_quantity() -> u32 {
    1
}

/// A BOM item with its component reference resolved.
///
/// This is the shape the comparison matcher consumes. `component` is `None`
/// when the referenced component no longer exists; such entries render as "–"
/// and never abort a comparison.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BomEntry {
    /// The raw BOM row
    pub item: BomItem,

    /// The resolved component, if it still exists
    pub component: Option<Component>,
}

impl BomEntry {
    /// Create an entry from an item and its resolved component.
    pub fn new(item: BomItem, component: Option<Component>) -> Self {
        Self { item, component }
    }

    /// The component code, if resolved.
    pub fn code(&self) -> Option<&str> {
        self.component.as_ref().map(|c| c.code.as_str())
    }

    /// The component description, if resolved.
    pub fn description(&self) -> Option<&str> {
        self.component.as_ref().map(|c| c.description.as_str())
    }

    /// Display label for rendering; "–" when the component is unresolved.
    pub fn display_code(&self) -> &str {
        self.code().unwrap_or("–")
    }
}
