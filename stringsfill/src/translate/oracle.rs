//! The contract between the completion engine and a translation service.

use async_trait::async_trait;
use thiserror::Error;

/// One key to translate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub key: String,
    /// Source-language text of the key.
    pub text: String,
    /// Target language code, as used in the folder name (e.g. `ja`, `zh-Hans`).
    pub language: String,
}

impl TranslationRequest {
    pub fn new(
        key: impl Into<String>,
        text: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        TranslationRequest {
            key: key.into(),
            text: text.into(),
            language: language.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum OracleError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("translation service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("API key not set; expected it in `{0}`")]
    MissingApiKey(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("{0}")]
    Other(String),
}

/// A service translating one string at a time.
///
/// `Ok(None)` or an empty string means the service had nothing to offer for
/// this key; the key stays missing. `Err` means the service itself failed.
#[async_trait]
pub trait TranslationOracle: Send + Sync {
    async fn translate(&self, request: &TranslationRequest) -> Result<Option<String>, OracleError>;
}
