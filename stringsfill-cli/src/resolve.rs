use stringsfill::{LocalizationStore, Settings, discover_stores};

/// Reads the settings file, or the defaults when none is given.
pub fn load_settings(path: Option<&str>) -> Result<Settings, String> {
    match path {
        Some(path) => Settings::load(path).map_err(|e| format!("Cannot load '{}': {}", path, e)),
        None => Ok(Settings::default()),
    }
}

/// Finds the store for `file` below `root`. The extension may be omitted.
pub fn open_store(root: &str, file: &str, settings: &Settings) -> Result<LocalizationStore, String> {
    let mut stores = discover_stores(root, &settings.layout);
    let with_extension = format!("{}.{}", file, settings.layout.extension);

    stores
        .remove(file)
        .or_else(|| stores.remove(&with_extension))
        .ok_or_else(|| {
            let known = stores.keys().cloned().collect::<Vec<_>>().join(", ");
            format!("Resource '{}' not found in {} (found: {})", file, root, known)
        })
}

/// Fails unless `store` has a table for `lang`.
pub fn require_language(store: &LocalizationStore, lang: &str) -> Result<(), String> {
    if store.translation(lang).is_some() {
        Ok(())
    } else {
        Err(format!(
            "Language '{}' not found for {} (available: {})",
            lang,
            store.resource_name(),
            store.languages().collect::<Vec<_>>().join(", ")
        ))
    }
}
