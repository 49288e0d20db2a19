//! Settings for directory layout and the translation service.
//!
//! Settings are plain serde structs loadable from TOML. Every field has a
//! default, so an empty file (or no file at all) is a valid configuration:
//!
//! ```toml
//! [layout]
//! folder_suffix = ".lproj"
//! extension = "strings"
//! source_languages = ["en", "Base"]
//!
//! [oracle]
//! model = "gpt-4"
//! brand_names = ["Air Code"]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// How language folders and resource files are named on disk.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Layout {
    /// Suffix identifying a language folder; the language code is the
    /// folder name without it.
    pub folder_suffix: String,
    /// Extension of resource files, without the dot.
    pub extension: String,
    /// Languages holding the source text, in order of preference.
    pub source_languages: Vec<String>,
}

impl Default for Layout {
    fn default() -> Self {
        Layout {
            folder_suffix: ".lproj".to_string(),
            extension: "strings".to_string(),
            source_languages: vec!["en".to_string(), "Base".to_string()],
        }
    }
}

impl Layout {
    /// Sets the source-language markers.
    pub fn with_source_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.source_languages = languages.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_source_language(&self, language: &str) -> bool {
        self.source_languages.iter().any(|marker| marker == language)
    }

    /// Extracts the language code from a folder name, if it is a language
    /// folder.
    pub fn language_of<'a>(&self, folder_name: &'a str) -> Option<&'a str> {
        folder_name
            .strip_suffix(self.folder_suffix.as_str())
            .filter(|code| !code.is_empty())
    }

    pub fn folder_name(&self, language: &str) -> String {
        format!("{}{}", language, self.folder_suffix)
    }

    pub fn is_resource_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == self.extension)
    }
}

/// Settings for the chat-completion translation service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct OracleSettings {
    /// Base URL of an OpenAI-compatible API.
    pub api_base: String,
    pub model: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// Product names the translator must leave untouched.
    pub brand_names: Vec<String>,
    pub timeout_secs: u64,
}

impl Default for OracleSettings {
    fn default() -> Self {
        OracleSettings {
            api_base: "https://api.openai.com/v1".to_string(),
            model: "gpt-4".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            brand_names: Vec::new(),
            timeout_secs: 60,
        }
    }
}

impl OracleSettings {
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_brand_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.brand_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Full URL of the chat-completions endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }
}

/// Top-level settings file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub layout: Layout,
    pub oracle: OracleSettings,
}

impl Settings {
    pub fn from_toml_str(content: &str) -> Result<Self, Error> {
        Ok(toml::from_str(content)?)
    }

    /// Reads settings from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
