//! JSON command surface.
//!
//! One command per line:
//!
//! ```json
//! {"command": "capture_asset", "kind": "logo", "name": "logo.png", "data_base64": "iVBO…",
//!  "_trace": {"trace_id": "…", "timestamp": 1737100000000}}
//! ```
//!
//! Each command answers with `{"wizard": …}`, `{"gallery": …}` or
//! `{"error": …}`.

pub mod dto;
pub mod error;
pub mod gallery;
pub mod wizard;

use serde::{Deserialize, Serialize};
use tracing::{warn, Span};

use lm_app::usecases::VisibilityEntry;
use lm_core::ports::observability::{take_trace, OptionalTrace};
use lm_core::{AssetKind, Point, Rect};

use crate::bootstrap::AppRuntime;

pub use dto::{GalleryView, WizardView};
pub use error::CommandError;
use wizard::WizardInput;

/// Commands accepted from the host.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    GetWizardState,
    CaptureAsset {
        kind: AssetKind,
        name: String,
        data_base64: String,
    },
    NextStep,
    PreviousStep,
    SetPlacementText {
        text: String,
    },
    SetContactEmail {
        email: String,
    },
    SetContactName {
        name: String,
    },
    /// "Add Logo".
    Submit,
    /// "I am ready".
    AcknowledgeCostNotice,
    CancelCostNotice,
    SubmitContact,
    RequestPayment,
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        surfaces: Vec<Rect>,
    },
    GetGallery,
    MountGallery,
    UnmountGallery,
    SentinelVisibility {
        intersection_ratio: f64,
        is_intersecting: bool,
    },
    LoadMore,
}

/// One response line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CommandResponse {
    Wizard { wizard: WizardView },
    Gallery { gallery: GalleryView },
    Error { error: String },
}

impl From<WizardView> for CommandResponse {
    fn from(wizard: WizardView) -> Self {
        CommandResponse::Wizard { wizard }
    }
}

impl From<GalleryView> for CommandResponse {
    fn from(gallery: GalleryView) -> Self {
        CommandResponse::Gallery { gallery }
    }
}

impl From<CommandError> for CommandResponse {
    fn from(err: CommandError) -> Self {
        CommandResponse::Error {
            error: err.to_string(),
        }
    }
}

/// Record trace metadata on a command span.
pub fn record_trace_fields(span: &Span, trace: &OptionalTrace) {
    if let Some(trace) = trace {
        span.record("trace_id", tracing::field::display(&trace.trace_id));
        span.record("trace_ts", trace.timestamp);
    }
}

/// Parse a raw command line, stripping `_trace`.
pub fn parse_command(line: &str) -> Result<(Command, OptionalTrace), CommandError> {
    let mut value: serde_json::Value =
        serde_json::from_str(line).map_err(CommandError::InvalidJson)?;
    let trace = take_trace(&mut value)?;
    let command = serde_json::from_value(value).map_err(CommandError::InvalidCommand)?;
    Ok((command, trace))
}

/// Handle one raw line and produce its response.
pub async fn handle_line(runtime: &AppRuntime, line: &str) -> CommandResponse {
    let result = match parse_command(line) {
        Ok((command, trace)) => dispatch(runtime, command, &trace).await,
        Err(err) => Err(err),
    };
    match result {
        Ok(response) => response,
        Err(err) => {
            warn!(error = %err, "Command failed");
            err.into()
        }
    }
}

pub async fn dispatch(
    runtime: &AppRuntime,
    command: Command,
    trace: &OptionalTrace,
) -> Result<CommandResponse, CommandError> {
    let input = match command {
        Command::GetWizardState => return Ok(wizard::get_state(runtime, trace).await.into()),
        Command::CaptureAsset {
            kind,
            name,
            data_base64,
        } => {
            return wizard::capture_asset(runtime, kind, name, &data_base64, trace)
                .await
                .map(Into::into)
        }
        Command::GetGallery => return Ok(gallery::get_gallery(runtime, trace).await.into()),
        Command::MountGallery => return Ok(gallery::mount(runtime, trace).await.into()),
        Command::UnmountGallery => return Ok(gallery::unmount(runtime, trace).await.into()),
        Command::SentinelVisibility {
            intersection_ratio,
            is_intersecting,
        } => {
            let entry = VisibilityEntry {
                intersection_ratio,
                is_intersecting,
            };
            return gallery::report_visibility(runtime, entry, trace)
                .await
                .map(Into::into);
        }
        Command::LoadMore => return gallery::load_more(runtime, trace).await.map(Into::into),
        Command::NextStep => WizardInput::NextStep,
        Command::PreviousStep => WizardInput::PreviousStep,
        Command::SetPlacementText { text } => WizardInput::PlacementText(text),
        Command::SetContactEmail { email } => WizardInput::ContactEmail(email),
        Command::SetContactName { name } => WizardInput::ContactName(name),
        Command::Submit => WizardInput::Submit,
        Command::AcknowledgeCostNotice => WizardInput::AcknowledgeCostNotice,
        Command::CancelCostNotice => WizardInput::CancelCostNotice,
        Command::SubmitContact => WizardInput::SubmitContact,
        Command::RequestPayment => WizardInput::RequestPayment,
        Command::PointerDown { x, y, surfaces } => WizardInput::PointerDown {
            at: Point::new(x, y),
            surfaces,
        },
    };
    Ok(wizard::apply(runtime, input, trace).await.into())
}
