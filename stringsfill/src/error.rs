//! All error types for the stringsfill crate.
//!
//! Recoverable ingestion problems (unreadable folders, undecodable files,
//! malformed statements) are logged and skipped instead of surfacing here.
//! What does surface is what a caller has to act on: failed writes, failed
//! translation batches and bad configuration.

use std::path::PathBuf;

use thiserror::Error;

use crate::translate::OracleError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read directory `{}`: {source}", path.display())]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write `{}`: {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown language `{0}`")]
    UnknownLanguage(String),

    #[error("translation of `{key}` failed: {source}")]
    Oracle {
        key: String,
        #[source]
        source: OracleError,
    },

    #[error("translation cancelled")]
    Cancelled,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
}

impl Error {
    /// Creates a new oracle error for the key that was being translated.
    pub fn oracle_error(key: impl Into<String>, source: OracleError) -> Self {
        Error::Oracle {
            key: key.into(),
            source,
        }
    }

    /// Whether committed work survives this error, i.e. the store is still
    /// worth saving after it.
    pub fn is_partial_batch(&self) -> bool {
        matches!(self, Error::Oracle { .. } | Error::Cancelled)
    }
}
