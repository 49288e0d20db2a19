//! Chat messages sent to a language model for each translation request.
//!
//! Every request is the same fixed preamble (instructions plus two worked
//! examples) followed by one user message describing the key to translate.

use serde::{Deserialize, Serialize};

use super::oracle::TranslationRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        ChatMessage {
            role,
            content: content.into(),
        }
    }
}

const TRANSLATOR_ROLE: &str = "You are a professional app translator. You will be provided with \
a string, its localization key, and a target language code. Reply with the translation of the \
string into that language and NO OTHER TEXT.";

const KEEP_CODE: &str = "DO NOT translate text within `backticks`, it refers to code.";

const KEEP_SCRIPTS: &str = "DO NOT translate text that looks like script source code, although \
string literals inside that code may be translated.";

const EXAMPLES: [(&str, &str, &str, &str); 2] = [
    (
        "IMPORT_FAILED_ALERT_MESSAGE",
        "An error occurred during import. %@",
        "ja",
        "インポート中にエラーが発生しました。%@",
    ),
    (
        "PROJECT_COPIED_INFO",
        "The contents of project '%@' have been copied to the clipboard",
        "de",
        "Die Inhalte des Projekts \"%@\" wurden in die Zwischenablage kopiert",
    ),
];

/// The user message describing one request.
pub fn request_line(request: &TranslationRequest) -> String {
    format!(
        "Key: \"{}\", String: \"{}\", Language: {}",
        request.key, request.text, request.language
    )
}

/// Builds the message list for translation requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptBuilder {
    brand_names: Vec<String>,
}

impl PromptBuilder {
    /// `brand_names` are product names that must never be translated.
    pub fn new(brand_names: Vec<String>) -> Self {
        PromptBuilder { brand_names }
    }

    fn brand_rule(&self) -> String {
        if self.brand_names.is_empty() {
            "Product and brand names within the app should not be translated.".to_string()
        } else {
            let names = self
                .brand_names
                .iter()
                .map(|name| format!("'{}'", name))
                .collect::<Vec<_>>()
                .join(", ");
            format!(
                "Some brand names within the app should not be translated, such as {}.",
                names
            )
        }
    }

    /// Instructions and worked examples shared by every request.
    pub fn preamble(&self) -> Vec<ChatMessage> {
        let mut messages = vec![
            ChatMessage::new(Role::System, TRANSLATOR_ROLE),
            ChatMessage::new(Role::System, self.brand_rule()),
            ChatMessage::new(Role::System, KEEP_CODE),
            ChatMessage::new(Role::System, KEEP_SCRIPTS),
        ];

        for (key, text, language, answer) in EXAMPLES {
            let example = TranslationRequest::new(key, text, language);
            messages.push(ChatMessage::new(Role::User, request_line(&example)));
            messages.push(ChatMessage::new(Role::Assistant, answer));
        }

        messages
    }

    /// The complete conversation for `request`.
    pub fn messages(&self, request: &TranslationRequest) -> Vec<ChatMessage> {
        let mut messages = self.preamble();
        messages.push(ChatMessage::new(Role::User, request_line(request)));
        messages
    }
}
