use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::trace;

use super::loader::{GalleryLoadError, GalleryLoader, LoadOutcome};

pub type LoadHandle = JoinHandle<Result<LoadOutcome, GalleryLoadError>>;

/// Visibility report for the sentinel at the end of the gallery.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityEntry {
    /// Fraction of the sentinel inside the viewport, in `[0.0, 1.0]`.
    pub intersection_ratio: f64,
    pub is_intersecting: bool,
}

impl VisibilityEntry {
    pub fn fully_visible() -> Self {
        Self {
            intersection_ratio: 1.0,
            is_intersecting: true,
        }
    }

    pub fn hidden() -> Self {
        Self {
            intersection_ratio: 0.0,
            is_intersecting: false,
        }
    }
}

/// Live observation of the gallery sentinel.
///
/// Dropping the observation tears it down; batches that land afterwards are
/// discarded.
pub struct SentinelObservation {
    loader: Arc<GalleryLoader>,
    generation: u64,
    initial_load: Option<LoadHandle>,
}

impl SentinelObservation {
    pub(super) fn new(loader: Arc<GalleryLoader>, generation: u64, initial_load: LoadHandle) -> Self {
        Self {
            loader,
            generation,
            initial_load: Some(initial_load),
        }
    }

    /// Hands out the mount-time load. Returns `None` on later calls.
    pub fn take_initial_load(&mut self) -> Option<LoadHandle> {
        self.initial_load.take()
    }

    /// Feeds a visibility change into the loader.
    ///
    /// Returns the spawned load when the sentinel crossed the threshold.
    pub fn notify(&self, entry: VisibilityEntry) -> Option<LoadHandle> {
        let threshold = self.loader.visibility_threshold();
        if !entry.is_intersecting || entry.intersection_ratio < threshold {
            trace!(ratio = entry.intersection_ratio, threshold, "sentinel below threshold");
            return None;
        }

        let loader = Arc::clone(&self.loader);
        Some(tokio::spawn(async move { loader.request_more().await }))
    }

    /// Tears the observation down.
    pub fn detach(self) {
        drop(self)
    }
}

impl Drop for SentinelObservation {
    fn drop(&mut self) {
        self.loader.teardown(self.generation);
    }
}
