//! Translation overlay types.
//!
//! A translation record is a language-specific overlay of the translatable
//! fields of one section or module. Records are created lazily the first time
//! a translator touches an entity for a language pair; an untouched entity
//! simply has no record.

use serde::{Deserialize, Serialize};

use super::{LanguageId, ModuleContent, ModuleId, SectionId};

/// Workflow status of a translation record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationStatus {
    /// Being worked on
    #[default]
    InProgress,
    /// Translator considers it done
    Translated,
    /// Under review
    InReview,
    /// Reviewed and approved
    Approved,
}

impl TranslationStatus {
    /// String tag as stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            TranslationStatus::InProgress => "in_progress",
            TranslationStatus::Translated => "translated",
            TranslationStatus::InReview => "in_review",
            TranslationStatus::Approved => "approved",
        }
    }
}

/// Translated title/description of one section for one language.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionTranslation {
    /// Translated section
    pub section_id: SectionId,

    /// Target language
    pub language_id: LanguageId,

    /// Translated title
    #[serde(default)]
    pub title: String,

    /// Translated description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Workflow status
    #[serde(default)]
    pub status: TranslationStatus,
}

impl SectionTranslation {
    /// Create a fresh in-progress record.
    pub fn new(section_id: SectionId, language_id: LanguageId) -> Self {
        Self {
            section_id,
            language_id,
            title: String::new(),
            description: None,
            status: TranslationStatus::InProgress,
        }
    }

    /// Set the translated title and return self.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the translated description and return self.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Translated content payload of one module for one language.
///
/// The payload mirrors the source module's shape but may be partially
/// populated.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentModuleTranslation {
    /// Translated module
    pub module_id: ModuleId,

    /// Target language
    pub language_id: LanguageId,

    /// Partially populated translated payload
    pub content: ModuleContent,

    /// Workflow status
    #[serde(default)]
    pub status: TranslationStatus,
}

impl ContentModuleTranslation {
    /// Create a record with the given translated payload.
    pub fn new(module_id: ModuleId, language_id: LanguageId, content: ModuleContent) -> Self {
        Self {
            module_id,
            language_id,
            content,
            status: TranslationStatus::InProgress,
        }
    }

    /// Set the workflow status and return self.
    pub fn status(mut self, status: TranslationStatus) -> Self {
        self.status = status;
        self
    }
}
