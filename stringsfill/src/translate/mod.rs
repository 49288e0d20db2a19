//! Automatic completion of missing translations.
//!
//! [`CompletionEngine`] walks the keys a language is missing and asks a
//! [`TranslationOracle`] for each one, strictly one request at a time.
//! [`OpenAiOracle`] is the bundled oracle, talking to an OpenAI-compatible
//! chat-completions endpoint with the messages built by [`prompt`].

pub mod engine;
pub mod openai;
pub mod oracle;
pub mod prompt;

pub use engine::{CompletionEngine, CompletionReport, CompletionState, Progress};
pub use openai::OpenAiOracle;
pub use oracle::{OracleError, TranslationOracle, TranslationRequest};
pub use prompt::{ChatMessage, PromptBuilder, Role};
