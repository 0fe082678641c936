//! Language types.

use serde::{Deserialize, Serialize};

use super::LanguageId;

/// A target language for translations.
///
/// At most one language may have `is_default` set; the default language
/// cannot be deleted, and neither can a language that still has translations.
/// Both invariants are enforced at the storage seam.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    /// Language identity
    pub id: LanguageId,

    /// ISO-style language code (e.g., "de", "fr")
    pub code: String,

    /// Display name
    pub name: String,

    /// Whether the language is offered to translators
    #[serde(default = "default_true")]
    pub is_active: bool,

    /// Whether this is the authoring language
    #[serde(default)]
    pub is_default: bool,
}

fn default_true() -> bool {
    true
}

impl Language {
    /// Create a new active, non-default language.
    pub fn new(id: LanguageId, code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            code: code.into(),
            name: name.into(),
            is_active: true,
            is_default: false,
        }
    }

    /// Mark this language as the authoring default and return self.
    pub fn default_language(mut self) -> Self {
        self.is_default = true;
        self
    }
}
