//! Rendering options and configuration.

use std::collections::HashMap;

use crate::model::SectionId;

/// Options for rendering manual content.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Maximum heading level (1-6); deeper sections reuse the deepest style
    pub max_heading_level: u8,

    /// Include a metadata header with title, version, and status
    pub include_metadata: bool,

    /// Character to use for unordered list markers
    pub list_marker: char,

    /// Per-document section title replacements, keyed by section id.
    ///
    /// Export-time title substitutions are supplied here as data per
    /// document; the render path carries no special-cased literals.
    pub title_overrides: HashMap<SectionId, String>,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum heading level.
    pub fn with_max_heading(mut self, level: u8) -> Self {
        self.max_heading_level = level.clamp(1, 6);
        self
    }

    /// Enable or disable the metadata header.
    pub fn with_metadata(mut self, include: bool) -> Self {
        self.include_metadata = include;
        self
    }

    /// Set the list marker character.
    pub fn with_list_marker(mut self, marker: char) -> Self {
        self.list_marker = marker;
        self
    }

    /// Replace the title of one section at render time.
    pub fn with_title_override(
        mut self,
        section_id: SectionId,
        title: impl Into<String>,
    ) -> Self {
        self.title_overrides.insert(section_id, title.into());
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_heading_level: 6,
            include_metadata: false,
            list_marker: '-',
            title_overrides: HashMap::new(),
        }
    }
}

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}
