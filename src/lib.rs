//! # manualkit
//!
//! Composition, translation tracking, and BOM comparison for structured
//! technical manuals.
//!
//! A manual is a tree of sections, each holding an ordered list of typed
//! content modules (text, tables, alerts, checklists, BOM summaries, media,
//! attachments). Two engines operate over that tree: a multi-language
//! translation layer that decides per section and per module whether a
//! translation is complete, and a bill-of-materials comparison matcher that
//! scores component similarity between two BOMs to support "what changed"
//! document migration.
//!
//! ## Quick Start
//!
//! ```no_run
//! use manualkit::{load_bundle, render};
//!
//! fn main() -> manualkit::Result<()> {
//!     // Load a manual bundle
//!     let store = load_bundle("manual.json")?;
//!
//!     // Compute translation progress for language 2
//!     let report = manualkit::translation_report(&store, 2)?;
//!     println!("{}% translated", report.percent());
//!
//!     // Export to Markdown with the German overlay applied
//!     let view = render::ManualView::from_store(&store, Some(2))?;
//!     let markdown = render::to_markdown(&view, &render::RenderOptions::default())?;
//!     println!("{}", markdown);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Design
//!
//! - **Pure core**: tree building, completeness evaluation, and BOM matching
//!   are synchronous pure functions over in-memory snapshots; they own no
//!   shared state and are safe to call concurrently.
//! - **Degrade, never abort**: a section with a missing parent becomes a
//!   root, an unrecognized module type renders a placeholder and requires no
//!   translation, a missing component renders as "–". A single malformed
//!   record never blocks a whole document.
//! - **Codec boundary**: stored content payloads (objects or string-encoded
//!   JSON) are parsed at the storage edge; the core only sees typed records.

pub mod compare;
pub mod error;
pub mod model;
pub mod render;
pub mod store;
pub mod translate;
pub mod tree;

// Re-export commonly used types
pub use compare::{compare_boms, similarity, BomComparison, BomMatch, MigrationPlan};
pub use error::{Error, Result};
pub use model::{
    Bom, BomEntry, BomItem, Component, ContentModule, ContentModuleTranslation, Document,
    DocumentStatus, Language, ModuleContent, ModuleType, Section, SectionTranslation,
    TranslationStatus,
};
pub use render::{JsonFormat, ManualView, RenderOptions};
pub use store::{ManualBundle, ManualStore, MemoryStore};
pub use translate::{
    is_module_translation_missing, is_section_translation_missing, TranslationReport,
    TranslationSet,
};
pub use tree::{SectionTree, TreeNode};

use std::path::Path;

use model::{BomId, LanguageId};

/// Load a manual bundle from a JSON file into an in-memory store.
pub fn load_bundle<P: AsRef<Path>>(path: P) -> Result<MemoryStore> {
    MemoryStore::load(path)
}

/// Compute the translation report for one language over a whole store.
pub fn translation_report<S: ManualStore>(
    store: &S,
    language_id: LanguageId,
) -> Result<TranslationReport> {
    let sections = store.sections()?;
    let tree = SectionTree::build(&sections);

    let mut modules = std::collections::HashMap::new();
    for section in &sections {
        modules.insert(section.id, store.modules(section.id)?);
    }

    let translations = store.translations_for_language(language_id)?;
    Ok(TranslationReport::build(
        &tree,
        &modules,
        &translations,
        language_id,
    ))
}

/// Compare two stored BOMs by id.
pub fn compare_stored_boms<S: ManualStore>(
    store: &S,
    bom_a: BomId,
    bom_b: BomId,
) -> Result<BomComparison> {
    if store.bom(bom_a)?.is_none() {
        return Err(Error::BomNotFound(bom_a));
    }
    if store.bom(bom_b)?.is_none() {
        return Err(Error::BomNotFound(bom_b));
    }
    let entries_a = store.bom_entries(bom_a)?;
    let entries_b = store.bom_entries(bom_b)?;
    Ok(compare_boms(&entries_a, &entries_b))
}
