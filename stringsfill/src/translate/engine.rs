//! Filling in the keys a language is missing.
//!
//! Keys are translated in alphabetical order, one oracle call at a time, and
//! every result is written into the store as soon as it arrives. The first
//! oracle failure aborts the batch; whatever was written before it stays.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use tracing::{debug, info, warn};

use super::oracle::{TranslationOracle, TranslationRequest};
use crate::{error::Error, store::LocalizationStore};

/// Progress of a completion batch.
///
/// `(0, 0)` after the last key is the "finished" sentinel; it is reported
/// instead of `(total, total)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub done: usize,
    pub total: usize,
}

impl Progress {
    pub const FINISHED: Progress = Progress { done: 0, total: 0 };

    pub fn new(done: usize, total: usize) -> Self {
        Progress { done, total }
    }

    pub fn is_finished(&self) -> bool {
        *self == Self::FINISHED
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompletionState {
    #[default]
    Idle,
    Running,
    Completed,
    Failed,
}

/// What a finished batch did.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompletionReport {
    pub language: String,
    /// Keys that were missing when the batch started.
    pub missing: usize,
    /// Keys now translated, in translation order.
    pub translated: Vec<String>,
    /// Keys the oracle returned nothing for.
    pub skipped: Vec<String>,
}

/// Runs completion batches against an injected oracle.
pub struct CompletionEngine {
    oracle: Arc<dyn TranslationOracle>,
    state: CompletionState,
    cancel: Option<Arc<AtomicBool>>,
}

impl std::fmt::Debug for CompletionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionEngine")
            .field("state", &self.state)
            .field("cancellable", &self.cancel.is_some())
            .finish_non_exhaustive()
    }
}

impl CompletionEngine {
    pub fn new(oracle: Arc<dyn TranslationOracle>) -> Self {
        CompletionEngine {
            oracle,
            state: CompletionState::Idle,
            cancel: None,
        }
    }

    /// Checks `flag` before every oracle call; once set, the running batch
    /// stops with [`Error::Cancelled`].
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Replaces the oracle used by subsequent batches.
    pub fn set_oracle(&mut self, oracle: Arc<dyn TranslationOracle>) {
        self.oracle = oracle;
    }

    pub fn state(&self) -> CompletionState {
        self.state
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }

    /// Translates every source key `target` is missing.
    ///
    /// A language the store has no table for is a no-op. `on_progress`
    /// receives `(0, total)` first, then one update per stored translation.
    pub async fn complete_missing<F>(
        &mut self,
        store: &mut LocalizationStore,
        target: &str,
        mut on_progress: F,
    ) -> Result<CompletionReport, Error>
    where
        F: FnMut(Progress),
    {
        self.state = CompletionState::Running;
        let result = self.run(store, target, &mut on_progress).await;
        self.state = match result {
            Ok(_) => CompletionState::Completed,
            Err(_) => CompletionState::Failed,
        };
        result
    }

    async fn run<F>(
        &self,
        store: &mut LocalizationStore,
        target: &str,
        on_progress: &mut F,
    ) -> Result<CompletionReport, Error>
    where
        F: FnMut(Progress),
    {
        let mut report = CompletionReport {
            language: target.to_string(),
            ..Default::default()
        };

        let Some(missing) = store.missing_keys(target) else {
            debug!(
                resource = store.resource_name(),
                language = target,
                "unknown language, nothing to do"
            );
            return Ok(report);
        };

        let total = missing.len();
        report.missing = total;
        info!(
            resource = store.resource_name(),
            language = target,
            total,
            "translating missing keys"
        );
        on_progress(Progress::new(0, total));

        for (index, key) in missing.into_iter().enumerate() {
            if self.is_cancelled() {
                info!(
                    language = target,
                    done = report.translated.len(),
                    "translation cancelled"
                );
                return Err(Error::Cancelled);
            }

            let Some(text) = store.source_text(&key) else {
                continue;
            };
            let request = TranslationRequest::new(key.as_str(), text, target);

            match self.oracle.translate(&request).await {
                Ok(Some(value)) if !value.is_empty() => {
                    store.set_translation(target, key.as_str(), value);
                    report.translated.push(key);
                    if index + 1 < total {
                        on_progress(Progress::new(index + 1, total));
                    } else {
                        on_progress(Progress::FINISHED);
                    }
                }
                Ok(_) => {
                    debug!(key = %key, language = target, "no translation returned");
                    report.skipped.push(key);
                }
                Err(source) => {
                    warn!(
                        key = %key,
                        language = target,
                        error = %source,
                        "translation failed, aborting batch"
                    );
                    return Err(Error::oracle_error(key, source));
                }
            }
        }

        info!(
            language = target,
            translated = report.translated.len(),
            skipped = report.skipped.len(),
            "translation finished"
        );
        Ok(report)
    }
}
