//! Gallery commands
//! 画廊相关命令

use tracing::{debug, info_span, Instrument};

use lm_app::usecases::VisibilityEntry;
use lm_core::ports::observability::OptionalTrace;

use crate::bootstrap::AppRuntime;
use crate::commands::dto::GalleryView;
use crate::commands::error::CommandError;
use crate::commands::record_trace_fields;

pub async fn get_gallery(runtime: &AppRuntime, trace: &OptionalTrace) -> GalleryView {
    let span = info_span!(
        "command.gallery.get_gallery",
        trace_id = tracing::field::Empty,
        trace_ts = tracing::field::Empty,
    );
    record_trace_fields(&span, trace);
    async { GalleryView::from(&runtime.gallery().snapshot().await) }
        .instrument(span)
        .await
}

pub async fn mount(runtime: &AppRuntime, trace: &OptionalTrace) -> GalleryView {
    let span = info_span!(
        "command.gallery.mount",
        trace_id = tracing::field::Empty,
        trace_ts = tracing::field::Empty,
    );
    record_trace_fields(&span, trace);
    async {
        runtime.mount_gallery().await;
        GalleryView::from(&runtime.gallery().snapshot().await)
    }
    .instrument(span)
    .await
}

pub async fn unmount(runtime: &AppRuntime, trace: &OptionalTrace) -> GalleryView {
    let span = info_span!(
        "command.gallery.unmount",
        trace_id = tracing::field::Empty,
        trace_ts = tracing::field::Empty,
    );
    record_trace_fields(&span, trace);
    async {
        runtime.unmount_gallery().await;
        GalleryView::from(&runtime.gallery().snapshot().await)
    }
    .instrument(span)
    .await
}

/// Report the sentinel's visibility.
///
/// The load itself runs in the background; the response is the state right
/// after the report and the appended batch arrives as a `gallery_changed`
/// event.
pub async fn report_visibility(
    runtime: &AppRuntime,
    entry: VisibilityEntry,
    trace: &OptionalTrace,
) -> Result<GalleryView, CommandError> {
    let span = info_span!(
        "command.gallery.report_visibility",
        trace_id = tracing::field::Empty,
        trace_ts = tracing::field::Empty,
        ratio = entry.intersection_ratio,
    );
    record_trace_fields(&span, trace);
    async {
        {
            let observation = runtime.observation().lock().await;
            let observation = observation.as_ref().ok_or(CommandError::GalleryNotMounted)?;
            if observation.notify(entry).is_some() {
                debug!("Gallery load requested");
            }
        }
        Ok(GalleryView::from(&runtime.gallery().snapshot().await))
    }
    .instrument(span)
    .await
}

/// Load the next batch and wait for it.
pub async fn load_more(
    runtime: &AppRuntime,
    trace: &OptionalTrace,
) -> Result<GalleryView, CommandError> {
    let span = info_span!(
        "command.gallery.load_more",
        trace_id = tracing::field::Empty,
        trace_ts = tracing::field::Empty,
    );
    record_trace_fields(&span, trace);
    async {
        let outcome = runtime.gallery().request_more().await?;
        debug!(outcome = ?outcome, "Gallery load finished");
        Ok(GalleryView::from(&runtime.gallery().snapshot().await))
    }
    .instrument(span)
    .await
}
