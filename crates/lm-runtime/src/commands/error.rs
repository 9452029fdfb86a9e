use lm_app::usecases::GalleryLoadError;
use lm_core::ports::observability::TraceParseError;

/// Errors surfaced to the host as `{ "error": … }`.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error(transparent)]
    InvalidTrace(#[from] TraceParseError),

    #[error("Invalid command: {0}")]
    InvalidCommand(#[source] serde_json::Error),

    #[error("Invalid asset payload for {name}: {source}")]
    InvalidAsset {
        name: String,
        #[source]
        source: base64::DecodeError,
    },

    #[error("Gallery is not mounted")]
    GalleryNotMounted,

    #[error(transparent)]
    Gallery(#[from] GalleryLoadError),
}
