//! Storage seam.
//!
//! The core algorithms operate on in-memory snapshots; this module defines
//! the collaborator contract they expect from storage ([`ManualStore`]) and
//! an in-memory implementation backed by a JSON bundle ([`MemoryStore`]),
//! used by the CLI and the integration tests. Content payloads cross this
//! boundary through the [`codec`].

pub mod codec;

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::{
    Bom, BomEntry, BomId, BomItem, Component, ComponentId, ContentModule, ContentModuleTranslation,
    Document, Language, LanguageId, ModuleId, ModuleType, Section, SectionId, SectionTranslation,
    TranslationStatus,
};
use crate::translate::TranslationSet;

/// Collaborator contract the core expects from storage.
///
/// Implementations return owned snapshots; the core never holds references
/// into the store across calls.
pub trait ManualStore {
    /// The document this store holds.
    fn document(&self) -> Result<Document>;

    /// All sections of the document, unordered.
    fn sections(&self) -> Result<Vec<Section>>;

    /// Modules of one section, ordered by (order, id).
    fn modules(&self, section_id: SectionId) -> Result<Vec<ContentModule>>;

    /// Configured languages, optionally only active ones.
    fn languages(&self, active_only: bool) -> Result<Vec<Language>>;

    /// Translation record for one section/language pair, if any.
    fn section_translation(
        &self,
        section_id: SectionId,
        language_id: LanguageId,
    ) -> Result<Option<SectionTranslation>>;

    /// Translation record for one module/language pair, if any.
    fn module_translation(
        &self,
        module_id: ModuleId,
        language_id: LanguageId,
    ) -> Result<Option<ContentModuleTranslation>>;

    /// Create or update a section translation record.
    fn upsert_section_translation(&mut self, translation: SectionTranslation) -> Result<()>;

    /// Create or update a module translation record.
    fn upsert_module_translation(&mut self, translation: ContentModuleTranslation) -> Result<()>;

    /// All translation records for one language in one batch, replacing the
    /// per-entity lookup loop.
    fn translations_for_language(&self, language_id: LanguageId) -> Result<TranslationSet>;

    /// Look up a component.
    fn component(&self, id: ComponentId) -> Result<Option<Component>>;

    /// Look up a bill of materials.
    fn bom(&self, id: BomId) -> Result<Option<Bom>>;

    /// Rows of one BOM.
    fn bom_items(&self, bom_id: BomId) -> Result<Vec<BomItem>>;

    /// Rows of one BOM with components resolved; a missing component yields
    /// an entry with `component: None` rather than an error.
    fn bom_entries(&self, bom_id: BomId) -> Result<Vec<BomEntry>> {
        let items = self.bom_items(bom_id)?;
        let mut entries = Vec::with_capacity(items.len());
        for item in items {
            let component = self.component(item.component_id)?;
            if component.is_none() {
                log::warn!(
                    "BOM item {} references missing component {}",
                    item.id,
                    item.component_id
                );
            }
            entries.push(BomEntry::new(item, component));
        }
        Ok(entries)
    }
}

/// Raw module record as stored: content is an opaque JSON value.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawModule {
    id: ModuleId,
    section_id: SectionId,
    #[serde(rename = "type")]
    kind: ModuleType,
    #[serde(default)]
    order: i32,
    #[serde(default)]
    content: Value,
}

/// Raw module translation record as stored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawModuleTranslation {
    module_id: ModuleId,
    language_id: LanguageId,
    #[serde(default)]
    content: Value,
    #[serde(default)]
    status: TranslationStatus,
}

/// A whole manual as a single JSON document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualBundle {
    /// The document record
    pub document: Document,

    /// Flat section list
    #[serde(default)]
    pub sections: Vec<Section>,

    /// Modules across all sections
    #[serde(default)]
    modules: Vec<RawModule>,

    /// Configured languages
    #[serde(default)]
    pub languages: Vec<Language>,

    /// Section translation records
    #[serde(default)]
    pub section_translations: Vec<SectionTranslation>,

    /// Module translation records
    #[serde(default)]
    module_translations: Vec<RawModuleTranslation>,

    /// Known components
    #[serde(default)]
    pub components: Vec<Component>,

    /// Bills of materials
    #[serde(default)]
    pub boms: Vec<Bom>,

    /// BOM rows
    #[serde(default)]
    pub bom_items: Vec<BomItem>,
}

/// In-memory store over a [`ManualBundle`] snapshot.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    document: Document,
    sections: Vec<Section>,
    modules: Vec<ContentModule>,
    languages: Vec<Language>,
    section_translations: HashMap<(SectionId, LanguageId), SectionTranslation>,
    module_translations: HashMap<(ModuleId, LanguageId), ContentModuleTranslation>,
    components: HashMap<ComponentId, Component>,
    boms: HashMap<BomId, Bom>,
    bom_items: Vec<BomItem>,
}

impl MemoryStore {
    /// Build a store from a bundle, decoding all content payloads.
    ///
    /// A translation record that references a module no longer in the bundle
    /// is dropped with a warning instead of failing the load.
    pub fn from_bundle(bundle: ManualBundle) -> Self {
        let modules: Vec<ContentModule> = bundle
            .modules
            .into_iter()
            .map(|raw| ContentModule {
                id: raw.id,
                section_id: raw.section_id,
                content: codec::decode_content(&raw.kind, &raw.content),
                kind: raw.kind,
                order: raw.order,
            })
            .collect();

        let kinds: HashMap<ModuleId, ModuleType> =
            modules.iter().map(|m| (m.id, m.kind.clone())).collect();

        let mut module_translations = HashMap::new();
        for raw in bundle.module_translations {
            let Some(kind) = kinds.get(&raw.module_id) else {
                log::warn!(
                    "translation for language {} references missing module {}; dropped",
                    raw.language_id,
                    raw.module_id
                );
                continue;
            };
            module_translations.insert(
                (raw.module_id, raw.language_id),
                ContentModuleTranslation {
                    module_id: raw.module_id,
                    language_id: raw.language_id,
                    content: codec::decode_content(kind, &raw.content),
                    status: raw.status,
                },
            );
        }

        let section_translations = bundle
            .section_translations
            .into_iter()
            .map(|tr| ((tr.section_id, tr.language_id), tr))
            .collect();

        Self {
            document: bundle.document,
            sections: bundle.sections,
            modules,
            languages: bundle.languages,
            section_translations,
            module_translations,
            components: bundle.components.into_iter().map(|c| (c.id, c)).collect(),
            boms: bundle.boms.into_iter().map(|b| (b.id, b)).collect(),
            bom_items: bundle.bom_items,
        }
    }

    /// Load a bundle from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let bundle: ManualBundle = serde_json::from_str(&data)?;
        Ok(Self::from_bundle(bundle))
    }

    /// Delete a language.
    ///
    /// Refuses to delete the default language or a language that still has
    /// translation records.
    pub fn delete_language(&mut self, id: LanguageId) -> Result<()> {
        let language = self
            .languages
            .iter()
            .find(|l| l.id == id)
            .ok_or(Error::LanguageNotFound(id))?;
        if language.is_default {
            return Err(Error::DefaultLanguage(id));
        }
        let in_use = self.section_translations.keys().any(|(_, l)| *l == id)
            || self.module_translations.keys().any(|(_, l)| *l == id);
        if in_use {
            return Err(Error::LanguageInUse(id));
        }
        self.languages.retain(|l| l.id != id);
        Ok(())
    }

    /// Make `id` the default language, clearing the flag elsewhere so at most
    /// one default exists.
    pub fn set_default_language(&mut self, id: LanguageId) -> Result<()> {
        if !self.languages.iter().any(|l| l.id == id) {
            return Err(Error::LanguageNotFound(id));
        }
        for language in &mut self.languages {
            language.is_default = language.id == id;
        }
        Ok(())
    }

    /// Move the document through its lifecycle.
    ///
    /// Only draft -> review -> approved -> published steps (and a fallback to
    /// draft) are allowed.
    pub fn set_document_status(&mut self, next: crate::model::DocumentStatus) -> Result<()> {
        if !self.document.status.can_transition_to(next) {
            return Err(Error::InvalidStatusTransition {
                from: self.document.status.as_str().to_string(),
                to: next.as_str().to_string(),
            });
        }
        self.document.status = next;
        Ok(())
    }

    /// Rewrite the `order` fields of a sibling set in one batch.
    ///
    /// `ordered_ids` is the new sequence for the direct children of `parent`;
    /// every id must name an existing section under that parent.
    pub fn reorder_sections(
        &mut self,
        parent: Option<SectionId>,
        ordered_ids: &[SectionId],
    ) -> Result<()> {
        for id in ordered_ids {
            let known = self
                .sections
                .iter()
                .any(|s| s.id == *id && s.parent_id == parent);
            if !known {
                return Err(Error::SectionNotFound(*id));
            }
        }
        for (position, id) in ordered_ids.iter().enumerate() {
            if let Some(section) = self.sections.iter_mut().find(|s| s.id == *id) {
                section.order = position as i32 + 1;
            }
        }
        Ok(())
    }
}

impl ManualStore for MemoryStore {
    fn document(&self) -> Result<Document> {
        Ok(self.document.clone())
    }

    fn sections(&self) -> Result<Vec<Section>> {
        Ok(self.sections.clone())
    }

    fn modules(&self, section_id: SectionId) -> Result<Vec<ContentModule>> {
        let mut modules: Vec<ContentModule> = self
            .modules
            .iter()
            .filter(|m| m.section_id == section_id)
            .cloned()
            .collect();
        modules.sort_by_key(|m| (m.order, m.id));
        Ok(modules)
    }

    fn languages(&self, active_only: bool) -> Result<Vec<Language>> {
        Ok(self
            .languages
            .iter()
            .filter(|l| !active_only || l.is_active)
            .cloned()
            .collect())
    }

    fn section_translation(
        &self,
        section_id: SectionId,
        language_id: LanguageId,
    ) -> Result<Option<SectionTranslation>> {
        Ok(self
            .section_translations
            .get(&(section_id, language_id))
            .cloned())
    }

    fn module_translation(
        &self,
        module_id: ModuleId,
        language_id: LanguageId,
    ) -> Result<Option<ContentModuleTranslation>> {
        Ok(self
            .module_translations
            .get(&(module_id, language_id))
            .cloned())
    }

    fn upsert_section_translation(&mut self, translation: SectionTranslation) -> Result<()> {
        if !self.sections.iter().any(|s| s.id == translation.section_id) {
            return Err(Error::SectionNotFound(translation.section_id));
        }
        self.section_translations.insert(
            (translation.section_id, translation.language_id),
            translation,
        );
        Ok(())
    }

    fn upsert_module_translation(&mut self, translation: ContentModuleTranslation) -> Result<()> {
        if !self.modules.iter().any(|m| m.id == translation.module_id) {
            return Err(Error::ModuleNotFound(translation.module_id));
        }
        self.module_translations.insert(
            (translation.module_id, translation.language_id),
            translation,
        );
        Ok(())
    }

    fn translations_for_language(&self, language_id: LanguageId) -> Result<TranslationSet> {
        let mut set = TranslationSet::new();
        for ((section_id, lang), tr) in &self.section_translations {
            if *lang == language_id {
                set.sections.insert(*section_id, tr.clone());
            }
        }
        for ((module_id, lang), tr) in &self.module_translations {
            if *lang == language_id {
                set.modules.insert(*module_id, tr.clone());
            }
        }
        Ok(set)
    }

    fn component(&self, id: ComponentId) -> Result<Option<Component>> {
        Ok(self.components.get(&id).cloned())
    }

    fn bom(&self, id: BomId) -> Result<Option<Bom>> {
        Ok(self.boms.get(&id).cloned())
    }

    fn bom_items(&self, bom_id: BomId) -> Result<Vec<BomItem>> {
        Ok(self
            .bom_items
            .iter()
            .filter(|i| i.bom_id == bom_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bundle() -> ManualBundle {
        serde_json::from_value(json!({
            "document": {"id": 1, "title": "Pump manual"},
            "sections": [
                {"id": 1, "documentId": 1, "order": 1, "title": "Intro"},
                {"id": 2, "documentId": 1, "parentId": 1, "order": 1, "title": "Safety"}
            ],
            "modules": [
                {"id": 10, "sectionId": 1, "type": "text", "order": 2,
                 "content": {"text": "hello"}},
                {"id": 11, "sectionId": 1, "type": "text", "order": 1,
                 "content": "{\"text\": \"stringified\"}"}
            ],
            "languages": [
                {"id": 1, "code": "en", "name": "English", "isDefault": true},
                {"id": 2, "code": "de", "name": "German"}
            ],
            "moduleTranslations": [
                {"moduleId": 10, "languageId": 2, "content": {"text": "hallo"}},
                {"moduleId": 99, "languageId": 2, "content": {"text": "orphan"}}
            ],
            "components": [{"id": 5, "code": "A1", "description": "Bolt"}],
            "boms": [{"id": 3, "title": "Rev A"}],
            "bomItems": [
                {"id": 1, "bomId": 3, "componentId": 5},
                {"id": 2, "bomId": 3, "componentId": 6}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_modules_sorted_and_string_content_decoded() {
        let store = MemoryStore::from_bundle(bundle());
        let modules = store.modules(1).unwrap();
        assert_eq!(modules.len(), 2);
        assert_eq!(modules[0].id, 11);
        assert_eq!(
            modules[0].content.as_text().and_then(|t| t.text.as_deref()),
            Some("stringified")
        );
    }

    #[test]
    fn test_orphan_translation_dropped() {
        let store = MemoryStore::from_bundle(bundle());
        assert!(store.module_translation(10, 2).unwrap().is_some());
        assert!(store.module_translation(99, 2).unwrap().is_none());
    }

    #[test]
    fn test_bom_entries_resolve_components() {
        let store = MemoryStore::from_bundle(bundle());
        let entries = store.bom_entries(3).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].code(), Some("A1"));
        // Missing component degrades to an unresolved entry.
        assert!(entries[1].component.is_none());
        assert_eq!(entries[1].display_code(), "–");
    }

    #[test]
    fn test_language_invariants() {
        let mut store = MemoryStore::from_bundle(bundle());
        assert!(matches!(
            store.delete_language(1),
            Err(Error::DefaultLanguage(1))
        ));
        assert!(matches!(
            store.delete_language(2),
            Err(Error::LanguageInUse(2))
        ));

        store.set_default_language(2).unwrap();
        let defaults: Vec<_> = store
            .languages(false)
            .unwrap()
            .into_iter()
            .filter(|l| l.is_default)
            .collect();
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults[0].id, 2);
    }

    #[test]
    fn test_reorder_sections() {
        let mut store = MemoryStore::from_bundle(bundle());
        store.reorder_sections(None, &[1]).unwrap();
        assert!(matches!(
            store.reorder_sections(None, &[2]),
            Err(Error::SectionNotFound(2))
        ));

        // Add a sibling and swap the pair.
        store.sections.push({
            let mut s = Section::new(3, 1, "Maintenance");
            s.order = 2;
            s
        });
        store.reorder_sections(None, &[3, 1]).unwrap();
        let tree = crate::tree::SectionTree::build(&store.sections().unwrap());
        let roots: Vec<_> = tree.roots().iter().map(|s| s.id).collect();
        assert_eq!(roots, vec![3, 1]);
    }

    #[test]
    fn test_document_status_transitions() {
        let mut store = MemoryStore::from_bundle(bundle());
        use crate::model::DocumentStatus;

        assert!(matches!(
            store.set_document_status(DocumentStatus::Published),
            Err(Error::InvalidStatusTransition { .. })
        ));
        store.set_document_status(DocumentStatus::Review).unwrap();
        store.set_document_status(DocumentStatus::Approved).unwrap();
        store.set_document_status(DocumentStatus::Published).unwrap();
        assert_eq!(store.document().unwrap().status, DocumentStatus::Published);
    }

    #[test]
    fn test_upsert_rejects_unknown_targets() {
        let mut store = MemoryStore::from_bundle(bundle());
        assert!(matches!(
            store.upsert_section_translation(SectionTranslation::new(99, 2)),
            Err(Error::SectionNotFound(99))
        ));
        assert!(matches!(
            store.upsert_module_translation(ContentModuleTranslation::new(
                99,
                2,
                crate::model::ModuleContent::Text(crate::model::TextContent::new("x"))
            )),
            Err(Error::ModuleNotFound(99))
        ));
    }

    #[test]
    fn test_upsert_translation_lazy_creation() {
        let mut store = MemoryStore::from_bundle(bundle());
        assert!(store.section_translation(1, 2).unwrap().is_none());

        store
            .upsert_section_translation(SectionTranslation::new(1, 2).title("Einleitung"))
            .unwrap();
        let tr = store.section_translation(1, 2).unwrap().unwrap();
        assert_eq!(tr.title, "Einleitung");

        let set = store.translations_for_language(2).unwrap();
        assert_eq!(set.sections.len(), 1);
        assert_eq!(set.modules.len(), 1);
    }
}
