use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use stringsfill::{CompletionEngine, OpenAiOracle, Progress, Settings, StoreEvent};
use tracing::{info, warn};

use crate::resolve::{open_store, require_language};

fn print_progress(lang: &str, progress: Progress) {
    if progress.is_finished() {
        eprintln!("[{}] done", lang);
    } else {
        eprintln!("[{}] {}/{}", lang, progress.done, progress.total);
    }
}

pub fn run_translate_command(
    root: &str,
    file: &str,
    lang: &str,
    settings: &Settings,
) -> Result<(), String> {
    let mut store = open_store(root, file, settings)?;
    require_language(&store, lang)?;

    let committed = Arc::new(AtomicUsize::new(0));
    let counter = committed.clone();
    store.set_listener(move |event| {
        if matches!(event, StoreEvent::TranslationAdded { .. }) {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    });

    let oracle = OpenAiOracle::from_env(&settings.oracle).map_err(|e| e.to_string())?;
    let cancel = Arc::new(AtomicBool::new(false));
    let mut engine = CompletionEngine::new(Arc::new(oracle)).with_cancel_flag(cancel.clone());

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| format!("Failed to start async runtime: {}", e))?;

    let result = runtime.block_on(async {
        let flag = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("interrupted, stopping after the current key");
                flag.store(true, Ordering::SeqCst);
            }
        });
        engine
            .complete_missing(&mut store, lang, |progress| print_progress(lang, progress))
            .await
    });

    match result {
        Ok(report) => {
            if report.translated.is_empty() {
                println!("Nothing translated for '{}' ({} missing)", lang, report.missing);
                return Ok(());
            }
            let path = store
                .save(root, lang)
                .map_err(|e| format!("Error writing output: {}", e))?;
            println!(
                "Translated {} of {} missing keys into {}",
                report.translated.len(),
                report.missing,
                path.display()
            );
            Ok(())
        }
        Err(err) if err.is_partial_batch() && committed.load(Ordering::SeqCst) > 0 => {
            // Keep whatever was translated before the batch stopped.
            info!(
                language = lang,
                translated = committed.load(Ordering::SeqCst),
                "saving partial results"
            );
            let saved = store
                .save(root, lang)
                .map_err(|e| format!("{}; additionally failed to save: {}", err, e))?;
            Err(format!("{} (partial results saved to {})", err, saved.display()))
        }
        Err(err) if err.is_partial_batch() => {
            info!(language = lang, "nothing translated, leaving file untouched");
            Err(err.to_string())
        }
        Err(err) => Err(err.to_string()),
    }
}
