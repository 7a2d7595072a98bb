//! Progress reporting port for UI integration.

/// Events emitted while a submission's images are loaded and scored.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// An image was decoded and added to the submission.
    Loaded {
        /// Path to the image.
        path: String,
        /// Index in the submission (0-based).
        index: usize,
        /// Total images in the submission, if known.
        total: Option<usize>,
    },
    /// An image could not be loaded; the submission will not be scored.
    Skipped {
        /// Path of the image.
        path: String,
        /// Why loading failed.
        reason: String,
    },
    /// Loading is done and scoring is about to run.
    Scoring {
        /// Number of images in the submission.
        images: usize,
    },
    /// Scoring finished.
    Finished {
        /// Final quality score.
        score: u8,
        /// Gate decision.
        gate_pass: bool,
    },
}

/// Port for receiving progress events.
pub trait ProgressSink: Send + Sync {
    /// Called when a progress event occurs.
    fn on_event(&self, event: ProgressEvent);
}
