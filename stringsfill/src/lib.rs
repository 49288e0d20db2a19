#![forbid(unsafe_code)]
//! Localization string tables for Apple `.lproj` folders.
//!
//! stringsfill reads every `<lang>.lproj/<resource>.strings` file below a
//! directory into one [`LocalizationStore`] per resource, keeps the byte
//! encoding of the files so writes round-trip exactly, and fills in missing
//! translations through a pluggable [`TranslationOracle`].
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use stringsfill::{CompletionEngine, Layout, OpenAiOracle, OracleSettings, discover_stores};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let mut stores = discover_stores("MyApp/Resources", &Layout::default());
//! let store = stores.get_mut("Localizable.strings").unwrap();
//!
//! let oracle = OpenAiOracle::from_env(&OracleSettings::default())?;
//! let mut engine = CompletionEngine::new(Arc::new(oracle));
//! engine
//!     .complete_missing(store, "fr", |p| println!("{}/{}", p.done, p.total))
//!     .await?;
//! store.save("MyApp/Resources", "fr")?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod encoding;
pub mod error;
pub mod formats;
pub mod scanner;
pub mod store;
pub mod traits;
pub mod translate;

// Re-export most used types for easy consumption
pub use crate::{
    config::{Layout, OracleSettings, Settings},
    encoding::{DecodedText, TextEncoding},
    error::Error,
    formats::StringsFormat,
    scanner::discover_stores,
    store::{LocalizationStore, StoreEvent, StringTable},
    translate::{
        CompletionEngine, CompletionReport, CompletionState, OpenAiOracle, OracleError, Progress,
        TranslationOracle, TranslationRequest,
    },
};
