use stringsfill::Settings;
use tracing::info;

use crate::resolve::{open_store, require_language};

pub fn run_remove_command(
    root: &str,
    file: &str,
    lang: &str,
    key: &str,
    settings: &Settings,
) -> Result<(), String> {
    let mut store = open_store(root, file, settings)?;
    require_language(&store, lang)?;

    if store.remove_translation(key, lang).is_none() {
        println!("'{}' has no translation in '{}', nothing to remove", key, lang);
        return Ok(());
    }

    let path = store
        .save(root, lang)
        .map_err(|e| format!("Error writing output: {}", e))?;
    info!(key, language = lang, path = %path.display(), "removed translation");
    println!("Removed '{}' from {}", key, path.display());
    Ok(())
}
