//! Section types.

use serde::{Deserialize, Serialize};

use super::{DocumentId, SectionId};

/// A node in a document's hierarchical outline.
///
/// Sections form a tree via `parent_id` (`None` means root). The `order`
/// field is the sibling sequence; values need not be contiguous and ties are
/// broken by `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Section identity
    pub id: SectionId,

    /// Owning document
    pub document_id: DocumentId,

    /// Parent section, `None` for a root section
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<SectionId>,

    /// Sibling sequence within the parent
    #[serde(default)]
    pub order: i32,

    /// Section title
    pub title: String,

    /// Optional section description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Marks the section as reusable from the section library
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_module: bool,
}

impl Section {
    /// Create a new root section.
    pub fn new(id: SectionId, document_id: DocumentId, title: impl Into<String>) -> Self {
        Self {
            id,
            document_id,
            parent_id: None,
            order: 0,
            title: title.into(),
            description: None,
            is_module: false,
        }
    }

    /// Create a child section under `parent_id`.
    pub fn child_of(
        id: SectionId,
        document_id: DocumentId,
        parent_id: SectionId,
        title: impl Into<String>,
    ) -> Self {
        Self {
            parent_id: Some(parent_id),
            ..Self::new(id, document_id, title)
        }
    }

    /// Set the sibling order and return self.
    pub fn order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    /// Set the description and return self.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Check whether this is a root section.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}
