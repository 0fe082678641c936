//! Section- and document-level translation status aggregation.

use std::collections::HashMap;

use serde::Serialize;

use crate::model::{
    ContentModule, ContentModuleTranslation, LanguageId, ModuleId, SectionId, SectionTranslation,
};
use crate::tree::SectionTree;

use super::{is_module_translation_missing, is_section_translation_missing};

/// Pre-fetched translation records for one language, keyed by entity id.
///
/// Aggregation consumes this batch shape instead of issuing one lookup per
/// section and per module.
#[derive(Debug, Clone, Default)]
pub struct TranslationSet {
    /// Section translations by section id
    pub sections: HashMap<SectionId, SectionTranslation>,

    /// Module translations by module id
    pub modules: HashMap<ModuleId, ContentModuleTranslation>,
}

impl TranslationSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Per-section rollup of one language's translation state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionStatus {
    /// The section
    pub section_id: SectionId,

    /// Source title, for display
    pub title: String,

    /// Nesting depth in the linearized tree
    pub depth: usize,

    /// Whether the section (title, description, or any module) is missing
    pub missing: bool,

    /// Child modules in the section
    pub module_total: usize,

    /// Child modules with a complete translation
    pub module_translated: usize,
}

/// Document-level translation progress for one language.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationReport {
    /// Target language
    pub language_id: LanguageId,

    /// Per-section rollups in pre-order
    pub sections: Vec<SectionStatus>,

    /// Total sections considered
    pub total_sections: usize,

    /// Sections whose translation is complete
    pub translated_sections: usize,

    /// Total modules considered
    pub total_modules: usize,

    /// Modules whose translation is complete
    pub translated_modules: usize,
}

impl TranslationReport {
    /// Walk the linearized tree and aggregate completeness verdicts.
    pub fn build(
        tree: &SectionTree,
        modules_by_section: &HashMap<SectionId, Vec<ContentModule>>,
        translations: &TranslationSet,
        language_id: LanguageId,
    ) -> Self {
        let mut sections = Vec::new();
        let mut translated_sections = 0;
        let mut total_modules = 0;
        let mut translated_modules = 0;

        for node in tree.linearize() {
            let section = node.section;
            let modules = modules_by_section
                .get(&section.id)
                .map(Vec::as_slice)
                .unwrap_or(&[]);

            let module_translated = modules
                .iter()
                .filter(|m| !is_module_translation_missing(m, translations.modules.get(&m.id)))
                .count();

            let missing = is_section_translation_missing(
                section,
                modules,
                translations.sections.get(&section.id),
                &translations.modules,
            );

            if !missing {
                translated_sections += 1;
            }
            total_modules += modules.len();
            translated_modules += module_translated;

            sections.push(SectionStatus {
                section_id: section.id,
                title: section.title.clone(),
                depth: node.depth,
                missing,
                module_total: modules.len(),
                module_translated,
            });
        }

        Self {
            language_id,
            total_sections: sections.len(),
            translated_sections,
            total_modules,
            translated_modules,
            sections,
        }
    }

    /// Overall completion percentage, rounded to the nearest integer.
    ///
    /// Defined as 0 when there is nothing to translate.
    pub fn percent(&self) -> u32 {
        let total = self.total_sections + self.total_modules;
        if total == 0 {
            return 0;
        }
        let translated = self.translated_sections + self.translated_modules;
        (100.0 * translated as f64 / total as f64).round() as u32
    }

    /// Whether every section and module is fully translated.
    pub fn is_complete(&self) -> bool {
        self.translated_sections == self.total_sections
            && self.translated_modules == self.total_modules
    }
}
