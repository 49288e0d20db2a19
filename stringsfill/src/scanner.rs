//! Discovery of resources below a root directory.

use std::{
    collections::BTreeMap,
    fs,
    path::Path,
};

use tracing::{info, warn};

use crate::{
    config::Layout,
    error::Error,
    store::{LocalizationStore, language_folders},
};

/// File names of the resource files directly inside `folder`, sorted.
fn resource_files(folder: &Path, layout: &Layout) -> Result<Vec<String>, Error> {
    let entries = fs::read_dir(folder).map_err(|source| Error::DirectoryRead {
        path: folder.to_path_buf(),
        source,
    })?;

    let mut names: Vec<String> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && layout.is_resource_file(path))
        .filter_map(|path| path.file_name()?.to_str().map(str::to_string))
        .filter(|name| !name.starts_with('.'))
        .collect();

    names.sort();
    Ok(names)
}

/// Builds one fully loaded store per distinct resource file name found in
/// any language folder below `root`.
///
/// Folders that cannot be read are logged and skipped.
pub fn discover_stores<P: AsRef<Path>>(
    root: P,
    layout: &Layout,
) -> BTreeMap<String, LocalizationStore> {
    let root = root.as_ref();
    let mut stores = BTreeMap::new();

    let folders = match language_folders(root, layout) {
        Ok(folders) => folders,
        Err(err) => {
            warn!(error = %err, "cannot scan for resources");
            return stores;
        }
    };

    for folder in &folders {
        let names = match resource_files(&folder.path, layout) {
            Ok(names) => names,
            Err(err) => {
                warn!(language = %folder.language, error = %err, "skipping language folder");
                continue;
            }
        };

        for name in names {
            if stores.contains_key(&name) {
                continue;
            }
            let mut store = LocalizationStore::new(name.clone(), layout.clone());
            store.load(root, None);
            stores.insert(name, store);
        }
    }

    info!(root = %root.display(), resources = stores.len(), "discovered resources");
    stores
}
