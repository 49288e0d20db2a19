//! In-memory model of one resource across all of its language folders.
//!
//! A [`LocalizationStore`] holds the source-language strings of a resource
//! (e.g. `Localizable.strings`) and one key/value table per target language.
//! It knows how to read every `<lang>.lproj/<resource>` file below a root
//! directory and how to write one language back, preserving the encoding and
//! byte-order mark of the source file.
//!
//! Loading is best effort: unreadable folders are logged and skipped, and
//! undecodable files load as empty tables, so one bad file never hides the
//! rest of the resource.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use tracing::{debug, warn};

use crate::{
    config::Layout,
    encoding::{self, TextEncoding},
    error::Error,
    formats::{Pair, StringsFormat},
    traits::Parser,
};

/// Key to text mapping of one language.
pub type StringTable = BTreeMap<String, String>;

/// Change notifications emitted at the store's public operation boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    Loaded { language: String },
    TranslationAdded { language: String, key: String },
    TranslationRemoved { language: String, key: String },
    Saved { language: String, path: PathBuf },
}

type Listener = Arc<dyn Fn(&StoreEvent) + Send + Sync>;

/// A language folder found below a root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LanguageFolder {
    pub(crate) language: String,
    pub(crate) path: PathBuf,
}

/// Lists the language folders directly below `root`, sorted by name.
/// Hidden entries are ignored.
pub(crate) fn language_folders(
    root: &Path,
    layout: &Layout,
) -> Result<Vec<LanguageFolder>, Error> {
    let entries = fs::read_dir(root).map_err(|source| Error::DirectoryRead {
        path: root.to_path_buf(),
        source,
    })?;

    let mut folders: Vec<LanguageFolder> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| {
            let name = entry.file_name().to_str()?.to_string();
            if name.starts_with('.') {
                return None;
            }
            let language = layout.language_of(&name)?.to_string();
            Some(LanguageFolder {
                language,
                path: entry.path(),
            })
        })
        .collect();

    folders.sort_by(|a, b| a.language.cmp(&b.language));
    Ok(folders)
}

/// A file read from disk, decoded and parsed.
struct LoadedFile {
    format: StringsFormat,
    encoding: TextEncoding,
    has_bom: bool,
}

/// Reads and parses one resource file. `None` when the file does not exist
/// or cannot be read; an undecodable file yields an empty table.
fn read_resource_file(path: &Path) -> Option<LoadedFile> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "skipping unreadable file");
            return None;
        }
    };

    match encoding::decode(&bytes) {
        Some(decoded) => {
            let format = StringsFormat::from_reader(decoded.text.as_bytes())
                .unwrap_or_else(|err| {
                    warn!(path = %path.display(), error = %err, "unparsable file, loading it as empty");
                    StringsFormat::default()
                });
            Some(LoadedFile {
                format,
                encoding: decoded.encoding,
                has_bom: decoded.has_bom,
            })
        }
        None => {
            warn!(path = %path.display(), "undecodable file, loading it as empty");
            Some(LoadedFile {
                format: StringsFormat::default(),
                encoding: TextEncoding::default(),
                has_bom: false,
            })
        }
    }
}

/// One resource's source strings and all of its translations.
#[derive(Clone)]
pub struct LocalizationStore {
    resource_name: String,
    layout: Layout,
    key_order: Vec<String>,
    source_strings: StringTable,
    translations: BTreeMap<String, StringTable>,
    source_language: Option<String>,
    encoding: TextEncoding,
    has_byte_order_mark: bool,
    listener: Option<Listener>,
}

impl std::fmt::Debug for LocalizationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalizationStore")
            .field("resource_name", &self.resource_name)
            .field("source_language", &self.source_language)
            .field("keys", &self.key_order.len())
            .field("languages", &self.translations.keys().collect::<Vec<_>>())
            .field("encoding", &self.encoding)
            .field("has_byte_order_mark", &self.has_byte_order_mark)
            .finish()
    }
}

impl LocalizationStore {
    /// Creates an empty store for the resource file named `resource_name`.
    pub fn new(resource_name: impl Into<String>, layout: Layout) -> Self {
        LocalizationStore {
            resource_name: resource_name.into(),
            layout,
            key_order: Vec::new(),
            source_strings: StringTable::new(),
            translations: BTreeMap::new(),
            source_language: None,
            encoding: TextEncoding::default(),
            has_byte_order_mark: false,
            listener: None,
        }
    }

    pub fn resource_name(&self) -> &str {
        &self.resource_name
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Source keys in order of first appearance in the source file.
    pub fn key_order(&self) -> &[String] {
        &self.key_order
    }

    pub fn source_strings(&self) -> &StringTable {
        &self.source_strings
    }

    pub fn source_text(&self, key: &str) -> Option<&str> {
        self.source_strings.get(key).map(String::as_str)
    }

    /// The language the source strings were read from.
    pub fn source_language(&self) -> Option<&str> {
        self.source_language.as_deref()
    }

    pub fn translations(&self) -> &BTreeMap<String, StringTable> {
        &self.translations
    }

    pub fn translation(&self, language: &str) -> Option<&StringTable> {
        self.translations.get(language)
    }

    /// Target languages, sorted.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.translations.keys().map(String::as_str)
    }

    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    pub fn has_byte_order_mark(&self) -> bool {
        self.has_byte_order_mark
    }

    /// Registers the callback receiving [`StoreEvent`]s, replacing any
    /// previous one.
    pub fn set_listener<F>(&mut self, listener: F)
    where
        F: Fn(&StoreEvent) + Send + Sync + 'static,
    {
        self.listener = Some(Arc::new(listener));
    }

    fn notify(&self, event: StoreEvent) {
        if let Some(listener) = &self.listener {
            listener(&event);
        }
    }

    /// Loads the resource from every language folder below `root`.
    ///
    /// With `restrict_to_language`, only that language is re-read from disk
    /// and replaces its in-memory table, discarding edits made to it; the
    /// source strings and other languages are left alone. Restricting to the
    /// current source language re-reads the source strings.
    pub fn load<P: AsRef<Path>>(&mut self, root: P, restrict_to_language: Option<&str>) {
        let root = root.as_ref();
        let folders = match language_folders(root, &self.layout) {
            Ok(folders) => folders,
            Err(err) => {
                warn!(resource = %self.resource_name, error = %err, "cannot list language folders");
                return;
            }
        };

        match restrict_to_language {
            None => self.load_all(&folders),
            Some(language) => self.reload_language(&folders, language),
        }
    }

    fn load_all(&mut self, folders: &[LanguageFolder]) {
        let source_folder = self.layout.source_languages.iter().find_map(|marker| {
            folders
                .iter()
                .find(|folder| &folder.language == marker)
                .filter(|folder| folder.path.join(&self.resource_name).is_file())
        });

        match source_folder {
            Some(folder) => self.load_source(folder),
            None => {
                debug!(resource = %self.resource_name, "no source-language file found");
                self.clear_source();
            }
        }

        self.translations.clear();
        for folder in folders {
            if self.layout.is_source_language(&folder.language) {
                continue;
            }
            self.load_translation(folder);
        }
    }

    fn reload_language(&mut self, folders: &[LanguageFolder], language: &str) {
        let Some(folder) = folders.iter().find(|folder| folder.language == language) else {
            debug!(resource = %self.resource_name, language, "no folder for language");
            return;
        };

        if self.source_language.as_deref() == Some(language) {
            self.load_source(folder);
        } else if self.layout.is_source_language(language) {
            debug!(resource = %self.resource_name, language, "ignoring unused source-language folder");
        } else {
            self.load_translation(folder);
        }
    }

    fn clear_source(&mut self) {
        self.key_order.clear();
        self.source_strings.clear();
        self.source_language = None;
        self.encoding = TextEncoding::default();
        self.has_byte_order_mark = false;
    }

    fn load_source(&mut self, folder: &LanguageFolder) {
        let path = folder.path.join(&self.resource_name);
        let Some(file) = read_resource_file(&path) else {
            return;
        };

        self.key_order = file.format.unique_keys();
        self.source_strings = file.format.to_map();
        self.encoding = file.encoding;
        self.has_byte_order_mark = file.has_bom;
        self.source_language = Some(folder.language.clone());

        debug!(
            resource = %self.resource_name,
            language = %folder.language,
            keys = self.key_order.len(),
            encoding = %self.encoding,
            bom = self.has_byte_order_mark,
            "loaded source strings"
        );
        self.notify(StoreEvent::Loaded {
            language: folder.language.clone(),
        });
    }

    fn load_translation(&mut self, folder: &LanguageFolder) {
        let path = folder.path.join(&self.resource_name);
        let Some(file) = read_resource_file(&path) else {
            return;
        };

        let table = file.format.to_map();
        debug!(
            resource = %self.resource_name,
            language = %folder.language,
            keys = table.len(),
            "loaded translation"
        );
        self.translations.insert(folder.language.clone(), table);
        self.notify(StoreEvent::Loaded {
            language: folder.language.clone(),
        });
    }

    /// Writes `language` to `<root>/<language>.lproj/<resource>`, keys in
    /// alphabetical order, using the store's encoding and byte-order mark.
    ///
    /// The language folder is created if it does not exist yet.
    pub fn save<P: AsRef<Path>>(&self, root: P, language: &str) -> Result<PathBuf, Error> {
        let root = root.as_ref();
        let table = self
            .translations
            .get(language)
            .ok_or_else(|| Error::UnknownLanguage(language.to_string()))?;

        let folder = match language_folders(root, &self.layout)?
            .into_iter()
            .find(|folder| folder.language == language)
        {
            Some(folder) => folder.path,
            None => {
                let path = root.join(self.layout.folder_name(language));
                fs::create_dir_all(&path).map_err(|source| Error::FileWrite {
                    path: path.clone(),
                    source,
                })?;
                path
            }
        };

        let path = folder.join(&self.resource_name);
        let mut text = Vec::new();
        StringsFormat::from_map(table, None).to_writer(&mut text)?;
        let bytes = encoding::encode(
            &String::from_utf8_lossy(&text),
            self.encoding,
            self.has_byte_order_mark,
        );
        fs::write(&path, bytes).map_err(|source| Error::FileWrite {
            path: path.clone(),
            source,
        })?;

        debug!(path = %path.display(), keys = table.len(), "saved translation");
        self.notify(StoreEvent::Saved {
            language: language.to_string(),
            path: path.clone(),
        });
        Ok(path)
    }

    /// Sets the translation of `key`, creating the language table if needed.
    /// Returns the previous translation.
    pub fn set_translation(
        &mut self,
        language: &str,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        let key = key.into();
        let previous = self
            .translations
            .entry(language.to_string())
            .or_default()
            .insert(key.clone(), value.into());

        self.notify(StoreEvent::TranslationAdded {
            language: language.to_string(),
            key,
        });
        previous
    }

    /// Removes the translation of `key`; a no-op when it has none.
    pub fn remove_translation(&mut self, key: &str, language: &str) -> Option<String> {
        let removed = self.translations.get_mut(language)?.remove(key)?;
        self.notify(StoreEvent::TranslationRemoved {
            language: language.to_string(),
            key: key.to_string(),
        });
        Some(removed)
    }

    /// Sorted source keys with no translation in `language`, or `None` for a
    /// language the store does not know.
    pub fn missing_keys(&self, language: &str) -> Option<Vec<String>> {
        let table = self.translations.get(language)?;
        Some(
            self.source_strings
                .keys()
                .filter(|key| !table.contains_key(*key))
                .cloned()
                .collect(),
        )
    }

    /// `.strings` text of `language` in source key order, the form used for
    /// copying to the clipboard. Empty for an unknown language.
    pub fn export_text(&self, language: &str) -> String {
        self.translations
            .get(language)
            .map(|table| StringsFormat::from_map(table, Some(&self.key_order)).to_string())
            .unwrap_or_default()
    }

    /// A single `"KEY" = "VALUE";` statement for one translation.
    pub fn copy_statement(&self, key: &str, language: &str) -> Option<String> {
        let value = self.translations.get(language)?.get(key)?;
        Some(Pair::new(key, value.as_str()).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn store_with(
        source: &[(&str, &str)],
        language: &str,
        target: &[(&str, &str)],
    ) -> LocalizationStore {
        let mut store = LocalizationStore::new("Localizable.strings", Layout::default());
        for (key, value) in source {
            store.key_order.push(key.to_string());
            store.source_strings.insert(key.to_string(), value.to_string());
        }
        store.translations.insert(
            language.to_string(),
            target
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        );
        store
    }

    #[test]
    fn test_missing_keys_sorted_difference() {
        let store = store_with(
            &[("zeta", "Z"), ("alpha", "A"), ("mid", "M")],
            "fr",
            &[("mid", "M-fr")],
        );
        assert_eq!(store.missing_keys("fr").unwrap(), vec!["alpha", "zeta"]);
        assert!(store.missing_keys("de").is_none());
    }

    #[test]
    fn test_remove_translation() {
        let mut store = store_with(
            &[("a", "A"), ("b", "B")],
            "fr",
            &[("a", "a-fr"), ("b", "b-fr")],
        );
        assert_eq!(store.remove_translation("missing", "fr"), None);
        assert_eq!(store.remove_translation("a", "de"), None);
        assert_eq!(store.translation("fr").unwrap().len(), 2);

        assert_eq!(store.remove_translation("a", "fr"), Some("a-fr".to_string()));
        let fr = store.translation("fr").unwrap();
        assert_eq!(fr.len(), 1);
        assert_eq!(fr["b"], "b-fr");
    }

    #[test]
    fn test_export_text_uses_key_order() {
        let mut store = store_with(
            &[("zeta", "Z"), ("alpha", "A"), ("mid", "M")],
            "fr",
            &[("alpha", "A-fr"), ("zeta", "Z-fr")],
        );
        assert_eq!(
            store.export_text("fr"),
            "\"zeta\" = \"Z-fr\";\n\"alpha\" = \"A-fr\";"
        );

        store.set_translation("fr", "mid", "M-fr");
        store.remove_translation("zeta", "fr");
        assert_eq!(
            store.export_text("fr"),
            "\"alpha\" = \"A-fr\";\n\"mid\" = \"M-fr\";"
        );
        assert_eq!(store.export_text("de"), "");
    }

    #[test]
    fn test_copy_statement() {
        let store = store_with(&[("a", "A")], "fr", &[("a", "Un")]);
        assert_eq!(store.copy_statement("a", "fr").unwrap(), r#""a" = "Un";"#);
        assert!(store.copy_statement("b", "fr").is_none());
    }

    #[test]
    fn test_listener_receives_events() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let mut store = store_with(&[("a", "A")], "fr", &[]);
        store.set_listener(move |event| sink.lock().unwrap().push(event.clone()));

        store.set_translation("fr", "a", "Un");
        store.remove_translation("a", "fr");
        store.remove_translation("a", "fr");

        assert_eq!(
            *events.lock().unwrap(),
            vec![
                StoreEvent::TranslationAdded {
                    language: "fr".to_string(),
                    key: "a".to_string()
                },
                StoreEvent::TranslationRemoved {
                    language: "fr".to_string(),
                    key: "a".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_save_unknown_language() {
        let store = store_with(&[("a", "A")], "fr", &[]);
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            store.save(dir.path(), "de"),
            Err(Error::UnknownLanguage(lang)) if lang == "de"
        ));
    }

    #[test]
    fn test_save_missing_root_is_directory_error() {
        let store = store_with(&[("a", "A")], "fr", &[("a", "Un")]);
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            store.save(&missing, "fr"),
            Err(Error::DirectoryRead { .. })
        ));
    }
}
