//! Translation completeness evaluation and status aggregation.
//!
//! The evaluator decides, per module and per section, whether a translation
//! covers every translatable field the source actually carries. The
//! aggregator rolls those verdicts up to section and document level.

mod completeness;
mod status;

pub use completeness::{is_module_translation_missing, is_section_translation_missing};
pub use status::{SectionStatus, TranslationReport, TranslationSet};
