use stringsfill::Settings;

use crate::resolve::{open_store, require_language};

/// Print every resource with its source language and per-language coverage.
pub fn print_list(root: &str, settings: &Settings) -> Result<(), String> {
    let stores = stringsfill::discover_stores(root, &settings.layout);
    if stores.is_empty() {
        return Err(format!("No resources found in {}", root));
    }

    for (name, store) in &stores {
        let bom = if store.has_byte_order_mark() {
            " with BOM"
        } else {
            ""
        };
        println!(
            "{} (source: {}, {} keys, {}{})",
            name,
            store.source_language().unwrap_or("none"),
            store.key_order().len(),
            store.encoding(),
            bom
        );

        for lang in store.languages() {
            let missing = store.missing_keys(lang).map(|keys| keys.len()).unwrap_or(0);
            let translated = store.translation(lang).map(|t| t.len()).unwrap_or(0);
            println!("  {}: {} translated, {} missing", lang, translated, missing);
        }
    }

    Ok(())
}

/// Print every source key with its source text and its translation in
/// `lang`, in source order. Untranslated keys are marked.
pub fn print_show(root: &str, file: &str, lang: &str, settings: &Settings) -> Result<(), String> {
    let store = open_store(root, file, settings)?;
    require_language(&store, lang)?;
    let table = store.translation(lang).cloned().unwrap_or_default();

    let width = store
        .key_order()
        .iter()
        .map(|key| key.chars().count())
        .max()
        .unwrap_or(0);

    for key in store.key_order() {
        let source = store.source_text(key).unwrap_or_default();
        match table.get(key) {
            Some(value) => println!("{:<width$}  {}  ->  {}", key, source, value),
            None => println!("{:<width$}  {}  ->  [missing]", key, source),
        }
    }

    let missing = store.missing_keys(lang).map(|keys| keys.len()).unwrap_or(0);
    println!(
        "{} keys, {} translated, {} missing",
        store.key_order().len(),
        store.key_order().len() - missing,
        missing
    );
    Ok(())
}

pub fn print_missing(root: &str, file: &str, lang: &str, settings: &Settings) -> Result<(), String> {
    let store = open_store(root, file, settings)?;
    require_language(&store, lang)?;

    for key in store.missing_keys(lang).unwrap_or_default() {
        println!("{}", key);
    }
    Ok(())
}

pub fn print_export(root: &str, file: &str, lang: &str, settings: &Settings) -> Result<(), String> {
    let store = open_store(root, file, settings)?;
    require_language(&store, lang)?;

    println!("{}", store.export_text(lang));
    Ok(())
}

pub fn print_copy(
    root: &str,
    file: &str,
    lang: &str,
    key: &str,
    settings: &Settings,
) -> Result<(), String> {
    let store = open_store(root, file, settings)?;
    require_language(&store, lang)?;

    let statement = store
        .copy_statement(key, lang)
        .ok_or_else(|| format!("Key '{}' has no translation in '{}'", key, lang))?;
    println!("{}", statement);
    Ok(())
}
