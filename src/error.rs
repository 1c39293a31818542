//! Error types shared across the crate.
//!
//! Every failure a command can hit is one of these variants. The CLI prints
//! the message verbatim and exits nonzero; parser and store errors pass
//! through the ingestion path unchanged.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The input bytes could not be read as a ZIP archive.
    #[error("cannot read archive: {0}")]
    ArchiveFormat(String),

    /// No data file for the given category was found inside the archive.
    #[error("no {category} data file found in archive")]
    DataNotFound { category: &'static str },

    /// A candidate data file was not valid JSON or not a JSON array.
    /// Per-item problems inside a valid document are diagnostics, not errors.
    #[error("malformed data file {entry}: {source}")]
    Validation {
        entry: String,
        #[source]
        source: serde_json::Error,
    },

    /// Persistence medium failure.
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Unusable config file or undeterminable data directory.
    #[error("config error: {0}")]
    Config(String),
}
