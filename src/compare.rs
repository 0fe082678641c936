//! Bill-of-materials comparison.
//!
//! Matches components between two BOMs by code/description similarity to
//! support "what changed" document migration. Matching and uniqueness use two
//! different equivalence notions on purpose: the match list is a fuzzy,
//! review-assist report, while the unique partitions use exact component
//! identity and decide what must be freshly authored in a migrated document.

use std::collections::HashSet;

use serde::Serialize;

use crate::model::{BomEntry, ComponentId};

/// Minimum similarity score for a pair to count as a match.
pub const MATCH_THRESHOLD: u32 = 50;

/// Similarity score between two component-enhanced items.
///
/// 100 for exactly equal codes; 85 when one code is a substring of the other;
/// 80 for exactly equal descriptions; 65 for a description substring; 0
/// otherwise. Empty strings never participate in equality or substring
/// checks, and an entry without a resolved component scores 0 against
/// everything. The function is symmetric.
pub fn similarity(a: &BomEntry, b: &BomEntry) -> u32 {
    let (Some(ca), Some(cb)) = (&a.component, &b.component) else {
        return 0;
    };

    if fields_equal(&ca.code, &cb.code) {
        return 100;
    }
    if fields_contain(&ca.code, &cb.code) {
        return 85;
    }
    if fields_equal(&ca.description, &cb.description) {
        return 80;
    }
    if fields_contain(&ca.description, &cb.description) {
        return 65;
    }
    0
}

fn fields_equal(a: &str, b: &str) -> bool {
    !a.is_empty() && a == b
}

fn fields_contain(a: &str, b: &str) -> bool {
    !a.is_empty() && !b.is_empty() && (a.contains(b) || b.contains(a))
}

/// One above-threshold pair from the cross-product scan.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BomMatch {
    /// Entry from the first BOM
    pub a: BomEntry,

    /// Entry from the second BOM
    pub b: BomEntry,

    /// Similarity score (always above [`MATCH_THRESHOLD`])
    pub score: u32,
}

/// Result of comparing two BOMs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BomComparison {
    /// Above-threshold pairs in (A, B) iteration order, undeduplicated: one
    /// item may appear in several matches.
    pub matches: Vec<BomMatch>,

    /// Items of A whose component id does not appear in B
    pub unique_to_a: Vec<BomEntry>,

    /// Items of B whose component id does not appear in A
    pub unique_to_b: Vec<BomEntry>,
}

impl BomComparison {
    /// Summarize what a migrated document would carry over vs. author fresh.
    pub fn migration_plan(&self) -> MigrationPlan {
        MigrationPlan {
            carried_over: self.matches.len(),
            to_author: self.unique_to_b.len(),
            to_retire: self.unique_to_a.len(),
        }
    }
}

/// Migration summary derived from a comparison.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationPlan {
    /// Fuzzy-matched pairs available for review
    pub carried_over: usize,

    /// Items only present in the new BOM; their content must be authored
    pub to_author: usize,

    /// Items only present in the old BOM; their content can be retired
    pub to_retire: usize,
}

/// Compare two component-enhanced item lists.
///
/// Scores the full |A|x|B| cross product; substring checks rule out an index,
/// so the quadratic scan is intrinsic to the design. Uniqueness is decided by
/// exact component-id presence on the other side, independent of the fuzzy
/// match list. Pure function over two snapshots; no shared state.
pub fn compare_boms(items_a: &[BomEntry], items_b: &[BomEntry]) -> BomComparison {
    let mut matches = Vec::new();
    for a in items_a {
        for b in items_b {
            let score = similarity(a, b);
            if score > MATCH_THRESHOLD {
                matches.push(BomMatch {
                    a: a.clone(),
                    b: b.clone(),
                    score,
                });
            }
        }
    }

    let ids_a: HashSet<ComponentId> = items_a.iter().map(|e| e.item.component_id).collect();
    let ids_b: HashSet<ComponentId> = items_b.iter().map(|e| e.item.component_id).collect();

    let unique_to_a = items_a
        .iter()
        .filter(|e| !ids_b.contains(&e.item.component_id))
        .cloned()
        .collect();
    let unique_to_b = items_b
        .iter()
        .filter(|e| !ids_a.contains(&e.item.component_id))
        .cloned()
        .collect();

    BomComparison {
        matches,
        unique_to_a,
        unique_to_b,
    }
}
