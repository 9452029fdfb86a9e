use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, info_span, warn, Instrument};

use lm_core::ports::{GalleryEventPort, GalleryFeedPort};
use lm_core::GalleryState;

use super::sentinel::SentinelObservation;

/// Generation value meaning "no sentinel is attached".
const NOT_MOUNTED: u64 = 0;

#[derive(Debug, thiserror::Error)]
pub enum GalleryLoadError {
    #[error("gallery feed failed: {0}")]
    Fetch(#[source] anyhow::Error),
}

/// Why a load request did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotMounted,
    AlreadyLoading,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A batch landed and was appended at the tail.
    Appended { count: usize },
    /// The request was dropped before any fetch was issued.
    Skipped(SkipReason),
    /// The fetch finished after the observation it belonged to was torn down.
    Discarded,
}

/// Incremental gallery loader.
///
/// At most one fetch is outstanding at any time. Requests arriving while a
/// fetch is in flight are dropped, not queued.
pub struct GalleryLoader {
    state: Mutex<GalleryState>,
    feed: Arc<dyn GalleryFeedPort>,
    event_port: Arc<dyn GalleryEventPort>,
    batch_size: usize,
    visibility_threshold: f64,
    /// Generation of the attached observation, or `NOT_MOUNTED`.
    active_generation: AtomicU64,
    next_generation: AtomicU64,
}

impl GalleryLoader {
    pub fn new(
        feed: Arc<dyn GalleryFeedPort>,
        event_port: Arc<dyn GalleryEventPort>,
        batch_size: usize,
        visibility_threshold: f64,
    ) -> Self {
        Self {
            state: Mutex::new(GalleryState::default()),
            feed,
            event_port,
            batch_size,
            visibility_threshold,
            active_generation: AtomicU64::new(NOT_MOUNTED),
            next_generation: AtomicU64::new(NOT_MOUNTED),
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn visibility_threshold(&self) -> f64 {
        self.visibility_threshold
    }

    pub fn is_mounted(&self) -> bool {
        self.active_generation.load(Ordering::Acquire) != NOT_MOUNTED
    }

    pub async fn snapshot(&self) -> GalleryState {
        self.state.lock().await.clone()
    }

    /// Attaches a sentinel observation and issues the initial load.
    ///
    /// A later mount supersedes the earlier observation; fetches started under
    /// the earlier one are discarded when they land.
    pub fn mount(self: &Arc<Self>) -> SentinelObservation {
        let generation = self.next_generation.fetch_add(1, Ordering::AcqRel) + 1;
        self.active_generation.store(generation, Ordering::Release);
        info!(generation, batch_size = self.batch_size, "gallery mounted");

        let loader = Arc::clone(self);
        let initial_load = tokio::spawn(async move { loader.request_more().await });
        SentinelObservation::new(Arc::clone(self), generation, initial_load)
    }

    /// Requests the next batch.
    ///
    /// 已有请求在途时直接丢弃本次请求。
    ///
    /// A batch that lands after a remount is discarded and the load is issued
    /// again for the live observation, whose own initial load was dropped
    /// while the slot was taken.
    pub async fn request_more(&self) -> Result<LoadOutcome, GalleryLoadError> {
        loop {
            match self.fetch_once().await? {
                LoadOutcome::Discarded if self.is_mounted() => {
                    debug!("gallery load reissued for the live mount");
                }
                outcome => return Ok(outcome),
            }
        }
    }

    async fn fetch_once(&self) -> Result<LoadOutcome, GalleryLoadError> {
        let generation = self.active_generation.load(Ordering::Acquire);
        if generation == NOT_MOUNTED {
            debug!("gallery load skipped: not mounted");
            return Ok(LoadOutcome::Skipped(SkipReason::NotMounted));
        }

        let request = {
            let mut state = self.state.lock().await;
            match state.try_begin_fetch(self.batch_size) {
                Some(request) => {
                    self.event_port.emit_gallery_changed(&state).await;
                    request
                }
                None => {
                    debug!("gallery load skipped: fetch already in flight");
                    return Ok(LoadOutcome::Skipped(SkipReason::AlreadyLoading));
                }
            }
        };

        let span = info_span!(
            "usecase.gallery_loader.request_more",
            offset = request.offset,
            limit = request.limit,
            generation,
        );
        let fetched = self.feed.fetch_batch(request).instrument(span).await;

        let mut state = self.state.lock().await;
        if self.active_generation.load(Ordering::Acquire) != generation {
            state.abort_fetch();
            debug!(offset = request.offset, "gallery batch discarded after teardown");
            return Ok(LoadOutcome::Discarded);
        }

        match fetched {
            Ok(mut batch) => {
                if batch.len() > request.limit {
                    warn!(
                        received = batch.len(),
                        limit = request.limit,
                        "gallery feed returned an oversized batch; truncating"
                    );
                    batch.truncate(request.limit);
                } else if batch.len() < request.limit {
                    warn!(
                        received = batch.len(),
                        limit = request.limit,
                        "gallery feed returned a short batch"
                    );
                }
                let count = state.complete_fetch(batch);
                info!(count, total = state.len(), "gallery batch appended");
                self.event_port.emit_gallery_changed(&state).await;
                Ok(LoadOutcome::Appended { count })
            }
            Err(err) => {
                state.abort_fetch();
                warn!(error = %err, offset = request.offset, "gallery batch failed");
                self.event_port.emit_gallery_changed(&state).await;
                Err(GalleryLoadError::Fetch(err))
            }
        }
    }

    /// Detaches `generation` if it is still the active observation.
    pub(super) fn teardown(&self, generation: u64) -> bool {
        let detached = self
            .active_generation
            .compare_exchange(generation, NOT_MOUNTED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if detached {
            info!(generation, "gallery sentinel detached");
        }
        detached
    }
}
