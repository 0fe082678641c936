//! Data model for structured technical manuals.
//!
//! This module defines the records the core algorithms operate on: documents,
//! hierarchical sections, typed content modules, languages and their
//! translation overlays, and bill-of-materials records. The model is
//! storage-agnostic; stored payloads are decoded into these types at the
//! storage boundary.

mod bom;
mod document;
mod language;
mod module;
mod section;
mod translation;

pub use bom::{Bom, BomEntry, BomItem, Component};
pub use document::{Document, DocumentStatus};
pub use language::Language;
pub use module::{
    AlertContent, AttachmentContent, BomContent, ChecklistContent, ChecklistItem, ComponentContent,
    ContentModule, LinkContent, MediaContent, ModuleContent, ModuleType, TableContent, TextContent,
};
pub use section::Section;
pub use translation::{ContentModuleTranslation, SectionTranslation, TranslationStatus};

/// Identifier for a document.
pub type DocumentId = u64;
/// Identifier for a section.
pub type SectionId = u64;
/// Identifier for a content module.
pub type ModuleId = u64;
/// Identifier for a language.
pub type LanguageId = u64;
/// Identifier for a component.
pub type ComponentId = u64;
/// Identifier for a bill of materials.
pub type BomId = u64;
