//! Rendering of manuals to Markdown, plain text, and JSON.
//!
//! Renderers consume the linearized section tree together with an optional
//! language overlay: where a translation record carries a field, the
//! translated value replaces the source value; anything missing falls back
//! to the source so an incomplete translation still renders a whole manual.

mod json;
mod markdown;
mod options;
mod text;

pub use json::to_json;
pub use markdown::{to_markdown, MarkdownRenderer};
pub use options::{JsonFormat, RenderOptions};
pub use text::to_text;

use std::collections::HashMap;

use crate::error::Result;
use crate::model::{
    BomEntry, BomId, Component, ComponentId, ContentModule, Document, LanguageId, ModuleContent,
    SectionId,
};
use crate::store::ManualStore;
use crate::translate::TranslationSet;
use crate::tree::SectionTree;

/// Everything a renderer needs for one manual: the document, the ordered
/// tree, modules per section, resolved BOM rows, and the optional language
/// overlay.
#[derive(Debug, Clone)]
pub struct ManualView {
    /// The document record
    pub document: Document,

    /// Ordered section hierarchy
    pub tree: SectionTree,

    /// Modules per section, each list ordered
    pub modules: HashMap<SectionId, Vec<ContentModule>>,

    /// Resolved rows of every BOM referenced by a `bom` module
    pub bom_entries: HashMap<BomId, Vec<BomEntry>>,

    /// Components referenced by `component` modules
    pub components: HashMap<ComponentId, Component>,

    /// Translation overlay for the target language, if any
    pub translations: Option<TranslationSet>,
}

impl ManualView {
    /// Assemble a view from a store, optionally overlaying one language.
    pub fn from_store<S: ManualStore>(store: &S, language_id: Option<LanguageId>) -> Result<Self> {
        let document = store.document()?;
        let sections = store.sections()?;
        let tree = SectionTree::build(&sections);

        let mut modules = HashMap::new();
        let mut bom_entries = HashMap::new();
        let mut components = HashMap::new();
        for section in &sections {
            let section_modules = store.modules(section.id)?;
            for module in &section_modules {
                if let Some(bom_id) = module.content.as_bom().and_then(|b| b.bom_id) {
                    if !bom_entries.contains_key(&bom_id) {
                        bom_entries.insert(bom_id, store.bom_entries(bom_id)?);
                    }
                }
                if let Some(id) = module.content.as_component().and_then(|c| c.component_id) {
                    if let Some(component) = store.component(id)? {
                        components.insert(id, component);
                    }
                }
            }
            modules.insert(section.id, section_modules);
        }

        let translations = match language_id {
            Some(language_id) => Some(store.translations_for_language(language_id)?),
            None => None,
        };

        Ok(Self {
            document,
            tree,
            modules,
            bom_entries,
            components,
            translations,
        })
    }

    /// Modules of one section in order.
    pub fn section_modules(&self, section_id: SectionId) -> &[ContentModule] {
        self.modules
            .get(&section_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Translated content overlay for one module, if any.
    pub fn module_overlay(&self, module_id: u64) -> Option<&ModuleContent> {
        self.translations
            .as_ref()
            .and_then(|set| set.modules.get(&module_id))
            .map(|tr| &tr.content)
    }
}

/// The translated value when it carries content, else the source value.
pub(crate) fn pick<'a>(translated: Option<&'a str>, source: Option<&'a str>) -> Option<&'a str> {
    match translated {
        Some(value) if !value.trim().is_empty() => Some(value),
        _ => source,
    }
}
