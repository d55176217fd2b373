//! Selected image, result text and the single in-flight classify request.

use plant_core::{Classification, Classifier, ClassifierError};
use std::path::{Path, PathBuf};
use std::sync::{Arc, mpsc};
use std::thread;

pub const CLASSIFYING_TEXT: &str = "🔄 Classifying...";

type JobOutcome = (u64, Result<Classification, ClassifierError>);

#[derive(Debug, thiserror::Error)]
pub enum StartError {
    #[error("Please upload an image first!")]
    NoImage,
    #[error("A classification is already running.")]
    Busy,
    #[error("Could not start classification: {0}")]
    Spawn(#[from] std::io::Error),
}

struct Pending {
    generation: u64,
    rx: mpsc::Receiver<JobOutcome>,
}

/// Application state owned by the UI. Each new image or classify request
/// bumps `generation`; outcomes tagged with an older generation are dropped.
#[derive(Default)]
pub struct AppState {
    selected: Option<PathBuf>,
    result_text: String,
    generation: u64,
    pending: Option<Pending>,
}

impl AppState {
    pub fn selected(&self) -> Option<&Path> {
        self.selected.as_deref()
    }

    pub fn result_text(&self) -> &str {
        &self.result_text
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Makes `path` the current image, clears the last result and abandons
    /// any request still running for the previous image.
    pub fn select_image(&mut self, path: PathBuf) {
        self.generation += 1;
        if self.pending.take().is_some() {
            tracing::debug!("abandoning in-flight classification");
        }
        self.result_text.clear();
        self.selected = Some(path);
    }

    pub fn show_message(&mut self, text: impl Into<String>) {
        self.result_text = text.into();
    }

    /// Starts classifying the selected image on a worker thread. `notify` runs
    /// on that thread once the outcome has been sent.
    pub fn start_classify<F>(&mut self, classifier: Arc<Classifier>, notify: F) -> Result<(), StartError>
    where
        F: Fn() + Send + 'static,
    {
        if self.pending.is_some() {
            return Err(StartError::Busy);
        }
        let path = self.selected.clone().ok_or(StartError::NoImage)?;

        let generation = self.generation + 1;
        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name(format!("classify-{generation}"))
            .spawn(move || {
                let outcome = classifier.classify_path(&path);
                if tx.send((generation, outcome)).is_err() {
                    tracing::debug!("classify request {generation} finished after being abandoned");
                }
                notify();
            })?;

        self.generation = generation;
        self.result_text = CLASSIFYING_TEXT.to_string();
        self.pending = Some(Pending { generation, rx });
        Ok(())
    }

    /// Collects a finished outcome, if any. Returns true when the result text
    /// changed.
    pub fn poll(&mut self) -> bool {
        let Some(pending) = &self.pending else {
            return false;
        };
        let expected = pending.generation;
        match pending.rx.try_recv() {
            Ok((generation, outcome)) => {
                self.pending = None;
                if generation != expected || generation != self.generation {
                    tracing::debug!("dropping stale result for request {generation}");
                    return false;
                }
                self.result_text = match outcome {
                    Ok(classification) => classification.display_text(),
                    Err(e) => {
                        tracing::warn!("classification failed: {e}");
                        format!("Could not classify image: {e}")
                    }
                };
                true
            }
            Err(mpsc::TryRecvError::Empty) => false,
            Err(mpsc::TryRecvError::Disconnected) => {
                tracing::warn!("classification worker exited without a result");
                self.pending = None;
                self.result_text = "Classification stopped unexpectedly.".to_string();
                true
            }
        }
    }
}
