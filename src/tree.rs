//! Section tree construction and linearization.
//!
//! Sections arrive from storage as a flat list carrying parent references and
//! sibling order. The builder turns that list into an ordered hierarchy and a
//! pre-order sequence suitable for linear rendering, export, and navigation:
//! each section is immediately followed by all of its descendants before any
//! sibling.

use std::collections::HashMap;
use std::collections::HashSet;

use crate::model::{Section, SectionId};

/// An ordered section hierarchy for one document.
#[derive(Debug, Clone)]
pub struct SectionTree {
    /// Direct children per parent, each list sorted by (order, id).
    /// Roots are keyed by `None`.
    children: HashMap<Option<SectionId>, Vec<Section>>,
}

impl SectionTree {
    /// Build the tree from a flat section list.
    ///
    /// Sibling groups are sorted ascending by `order`, ties broken by `id` so
    /// the result is deterministic. A section whose `parent_id` names no
    /// section in the input is treated as a root rather than dropped; this
    /// keeps one corrupt row from breaking the whole tree and is logged as a
    /// data-integrity warning.
    pub fn build(sections: &[Section]) -> Self {
        let known: HashSet<SectionId> = sections.iter().map(|s| s.id).collect();

        let mut children: HashMap<Option<SectionId>, Vec<Section>> = HashMap::new();
        for section in sections {
            let parent = match section.parent_id {
                Some(parent_id) if !known.contains(&parent_id) => {
                    log::warn!(
                        "section {} references missing parent {}; treating as root",
                        section.id,
                        parent_id
                    );
                    None
                }
                parent => parent,
            };
            children.entry(parent).or_default().push(section.clone());
        }

        for group in children.values_mut() {
            group.sort_by_key(|s| (s.order, s.id));
        }

        Self { children }
    }

    /// Direct children of `parent` in sibling order. `None` yields the roots.
    pub fn children_of(&self, parent: Option<SectionId>) -> &[Section] {
        self.children.get(&parent).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Root sections in sibling order.
    pub fn roots(&self) -> &[Section] {
        self.children_of(None)
    }

    /// Total number of sections in the tree.
    pub fn len(&self) -> usize {
        self.children.values().map(Vec::len).sum()
    }

    /// Check whether the tree has no sections.
    pub fn is_empty(&self) -> bool {
        self.children.values().all(Vec::is_empty)
    }

    /// Pre-order linearization: every section immediately followed by its
    /// descendants, depth starting at 0 for roots.
    ///
    /// Sections caught in a parent cycle are unreachable from any root and
    /// are not emitted; this is logged as a data-integrity warning.
    pub fn linearize(&self) -> Vec<TreeNode<'_>> {
        let mut out = Vec::with_capacity(self.len());
        self.emit(None, 0, &mut out);
        if out.len() < self.len() {
            log::warn!(
                "{} sections unreachable from any root; parent references may form a cycle",
                self.len() - out.len()
            );
        }
        out
    }

    fn emit<'a>(&'a self, parent: Option<SectionId>, depth: usize, out: &mut Vec<TreeNode<'a>>) {
        for section in self.children_of(parent) {
            out.push(TreeNode { section, depth });
            self.emit(Some(section.id), depth + 1, out);
        }
    }
}

/// One entry of the pre-order linearization.
#[derive(Debug, Clone, Copy)]
pub struct TreeNode<'a> {
    /// The section
    pub section: &'a Section,

    /// Nesting depth, 0 for roots
    pub depth: usize,
}

impl TreeNode<'_> {
    /// Heading level for rendering, capped at `max`.
    ///
    /// Depth grows unbounded but heading styles do not; levels below the cap
    /// reuse the deepest style.
    pub fn heading_level(&self, max: u8) -> u8 {
        let level = self.depth.saturating_add(1).min(max as usize);
        level as u8
    }
}
