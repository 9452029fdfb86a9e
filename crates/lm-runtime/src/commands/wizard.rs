//! Wizard commands
//! 向导相关命令

use base64::Engine;
use tracing::{info_span, Instrument};

use lm_core::ports::observability::OptionalTrace;
use lm_core::{AssetKind, BinaryAsset, Point, Rect};

use crate::bootstrap::AppRuntime;
use crate::commands::dto::WizardView;
use crate::commands::error::CommandError;
use crate::commands::record_trace_fields;

pub async fn get_state(runtime: &AppRuntime, trace: &OptionalTrace) -> WizardView {
    let span = info_span!(
        "command.wizard.get_state",
        trace_id = tracing::field::Empty,
        trace_ts = tracing::field::Empty,
    );
    record_trace_fields(&span, trace);
    async { WizardView::from(&runtime.wizard().get_state().await) }
        .instrument(span)
        .await
}

/// Capture an uploaded file. `data_base64` is the file content in standard
/// base64.
pub async fn capture_asset(
    runtime: &AppRuntime,
    kind: AssetKind,
    name: String,
    data_base64: &str,
    trace: &OptionalTrace,
) -> Result<WizardView, CommandError> {
    let span = info_span!(
        "command.wizard.capture_asset",
        trace_id = tracing::field::Empty,
        trace_ts = tracing::field::Empty,
        kind = %kind,
        name = %name,
    );
    record_trace_fields(&span, trace);
    async {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(data_base64.trim())
            .map_err(|source| CommandError::InvalidAsset {
                name: name.clone(),
                source,
            })?;
        let state = runtime
            .wizard()
            .capture_asset(kind, BinaryAsset::new(name, bytes))
            .await;
        Ok(WizardView::from(&state))
    }
    .instrument(span)
    .await
}

/// Wizard commands that carry no payload beyond an optional text field.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardInput {
    NextStep,
    PreviousStep,
    PlacementText(String),
    ContactEmail(String),
    ContactName(String),
    Submit,
    AcknowledgeCostNotice,
    CancelCostNotice,
    SubmitContact,
    RequestPayment,
    PointerDown { at: Point, surfaces: Vec<Rect> },
}

impl WizardInput {
    fn span_name(&self) -> &'static str {
        match self {
            WizardInput::NextStep => "next_step",
            WizardInput::PreviousStep => "previous_step",
            WizardInput::PlacementText(_) => "set_placement_text",
            WizardInput::ContactEmail(_) => "set_contact_email",
            WizardInput::ContactName(_) => "set_contact_name",
            WizardInput::Submit => "submit",
            WizardInput::AcknowledgeCostNotice => "acknowledge_cost_notice",
            WizardInput::CancelCostNotice => "cancel_cost_notice",
            WizardInput::SubmitContact => "submit_contact",
            WizardInput::RequestPayment => "request_payment",
            WizardInput::PointerDown { .. } => "pointer_down",
        }
    }
}

pub async fn apply(runtime: &AppRuntime, input: WizardInput, trace: &OptionalTrace) -> WizardView {
    let span = info_span!(
        "command.wizard.apply",
        input = input.span_name(),
        trace_id = tracing::field::Empty,
        trace_ts = tracing::field::Empty,
    );
    record_trace_fields(&span, trace);
    async {
        let wizard = runtime.wizard();
        let state = match input {
            WizardInput::NextStep => wizard.next_step().await,
            WizardInput::PreviousStep => wizard.previous_step().await,
            WizardInput::PlacementText(text) => wizard.set_placement_text(text).await,
            WizardInput::ContactEmail(email) => wizard.set_contact_email(email).await,
            WizardInput::ContactName(name) => wizard.set_contact_name(name).await,
            WizardInput::Submit => wizard.submit().await,
            WizardInput::AcknowledgeCostNotice => wizard.acknowledge_cost_notice().await,
            WizardInput::CancelCostNotice => wizard.cancel_cost_notice().await,
            WizardInput::SubmitContact => wizard.submit_contact().await,
            WizardInput::RequestPayment => wizard.request_payment().await,
            WizardInput::PointerDown { at, surfaces } => wizard.pointer_down(at, surfaces).await,
        };
        WizardView::from(&state)
    }
    .instrument(span)
    .await
}
