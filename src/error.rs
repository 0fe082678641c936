//! Error types for the manualkit library.

use std::io;
use thiserror::Error;

/// Result type alias for manualkit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while working with manuals.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing bundle files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A bundle file could not be parsed as JSON.
    #[error("Bundle parsing error: {0}")]
    BundleParse(String),

    /// A referenced section does not exist in the store.
    #[error("Section not found: {0}")]
    SectionNotFound(u64),

    /// A referenced content module does not exist in the store.
    #[error("Content module not found: {0}")]
    ModuleNotFound(u64),

    /// A referenced language does not exist in the store.
    #[error("Language not found: {0}")]
    LanguageNotFound(u64),

    /// A referenced bill of materials does not exist in the store.
    #[error("BOM not found: {0}")]
    BomNotFound(u64),

    /// The default language cannot be removed.
    #[error("Language {0} is the default language and cannot be deleted")]
    DefaultLanguage(u64),

    /// A language that still has translations cannot be removed.
    #[error("Language {0} has existing translations and cannot be deleted")]
    LanguageInUse(u64),

    /// An invalid document status transition was requested.
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidStatusTransition {
        /// Current status
        from: String,
        /// Requested status
        to: String,
    },

    /// Error during rendering (Markdown, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::BundleParse(err.to_string())
    }
}
