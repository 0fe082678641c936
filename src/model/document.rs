//! Document-level types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::DocumentId;

/// A technical manual. The section tree hangs off this root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Document identity
    pub id: DocumentId,

    /// Document title
    pub title: String,

    /// Document description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Version label (e.g., "1.2")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Lifecycle status
    #[serde(default)]
    pub status: DocumentStatus,

    /// Creation timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Last modification timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Document {
    /// Create a new draft document.
    pub fn new(id: DocumentId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            version: None,
            status: DocumentStatus::Draft,
            created_at: None,
            updated_at: None,
        }
    }
}

/// Document lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    /// Being authored
    #[default]
    Draft,
    /// Under review
    Review,
    /// Approved for publication
    Approved,
    /// Published to readers
    Published,
}

impl DocumentStatus {
    /// Check whether a transition to `next` is allowed.
    ///
    /// The flow is draft -> review -> approved -> published; any status may
    /// fall back to draft for rework.
    pub fn can_transition_to(self, next: DocumentStatus) -> bool {
        use DocumentStatus::*;
        match (self, next) {
            (Draft, Review) => true,
            (Review, Approved) => true,
            (Approved, Published) => true,
            (_, Draft) => self != Draft,
            _ => false,
        }
    }

    /// String tag as stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Draft => "draft",
            DocumentStatus::Review => "review",
            DocumentStatus::Approved => "approved",
            DocumentStatus::Published => "published",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_new() {
        let doc = Document::new(1, "Assembly manual");
        assert_eq!(doc.status, DocumentStatus::Draft);
        assert!(doc.description.is_none());
    }

    #[test]
    fn test_status_transitions() {
        assert!(DocumentStatus::Draft.can_transition_to(DocumentStatus::Review));
        assert!(DocumentStatus::Review.can_transition_to(DocumentStatus::Approved));
        assert!(DocumentStatus::Approved.can_transition_to(DocumentStatus::Published));
        assert!(DocumentStatus::Published.can_transition_to(DocumentStatus::Draft));

        assert!(!DocumentStatus::Draft.can_transition_to(DocumentStatus::Published));
        assert!(!DocumentStatus::Draft.can_transition_to(DocumentStatus::Draft));
        assert!(!DocumentStatus::Review.can_transition_to(DocumentStatus::Published));
    }

    #[test]
    fn test_status_serde_tags() {
        let json = serde_json::to_string(&DocumentStatus::Published).unwrap();
        assert_eq!(json, "\"published\"");
        let status: DocumentStatus = serde_json::from_str("\"review\"").unwrap();
        assert_eq!(status, DocumentStatus::Review);
    }
}
