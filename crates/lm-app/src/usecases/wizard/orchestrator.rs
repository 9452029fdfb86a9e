//! Wizard orchestrator.
//!
//! This module coordinates the wizard state machine and side effects.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, info_span, warn, Instrument};

use lm_core::ports::{PaymentRedirectPort, WizardEventPort};
use lm_core::{
    AssetKind, BinaryAsset, Point, Rect, Submission, SubmissionOutcome, ValidationError,
    WizardAction, WizardEvent, WizardState, WizardStateMachine,
};

use crate::usecases::wizard::context::WizardContext;
use crate::usecases::SubmitLogoRequest;

/// Orchestrator that drives wizard state and side effects.
pub struct WizardOrchestrator {
    context: Arc<WizardContext>,

    checkout_url: String,
    /// Background submissions and payment redirects.
    background: Mutex<Vec<JoinHandle<()>>>,
    last_outcome: Arc<Mutex<Option<SubmissionOutcome>>>,

    submit_logo_request: Arc<SubmitLogoRequest>,
    payment_redirect: Arc<dyn PaymentRedirectPort>,
    event_port: Arc<dyn WizardEventPort>,
}

impl WizardOrchestrator {
    pub fn new(
        submit_logo_request: Arc<SubmitLogoRequest>,
        payment_redirect: Arc<dyn PaymentRedirectPort>,
        event_port: Arc<dyn WizardEventPort>,
        checkout_url: impl Into<String>,
    ) -> Self {
        Self {
            context: WizardContext::default().arc(),
            checkout_url: checkout_url.into(),
            background: Mutex::new(Vec::new()),
            last_outcome: Arc::new(Mutex::new(None)),
            submit_logo_request,
            payment_redirect,
            event_port,
        }
    }

    pub async fn capture_asset(&self, kind: AssetKind, asset: BinaryAsset) -> WizardState {
        self.dispatch(WizardEvent::AssetCaptured { kind, asset }).await
    }

    pub async fn next_step(&self) -> WizardState {
        self.dispatch(WizardEvent::NextStep).await
    }

    pub async fn previous_step(&self) -> WizardState {
        self.dispatch(WizardEvent::PreviousStep).await
    }

    pub async fn set_placement_text(&self, text: String) -> WizardState {
        self.dispatch(WizardEvent::PlacementTextChanged { text }).await
    }

    pub async fn set_contact_email(&self, email: String) -> WizardState {
        self.dispatch(WizardEvent::ContactEmailChanged { email }).await
    }

    pub async fn set_contact_name(&self, name: String) -> WizardState {
        self.dispatch(WizardEvent::ContactNameChanged { name }).await
    }

    /// "Add Logo".
    pub async fn submit(&self) -> WizardState {
        self.dispatch(WizardEvent::SubmitRequested).await
    }

    /// "I am ready".
    pub async fn acknowledge_cost_notice(&self) -> WizardState {
        self.dispatch(WizardEvent::CostNoticeAcknowledged).await
    }

    pub async fn cancel_cost_notice(&self) -> WizardState {
        self.dispatch(WizardEvent::CostNoticeCancelled).await
    }

    pub async fn submit_contact(&self) -> WizardState {
        self.dispatch(WizardEvent::ContactSubmitted).await
    }

    pub async fn request_payment(&self) -> WizardState {
        self.dispatch(WizardEvent::PaymentRequested).await
    }

    pub async fn pointer_down(&self, at: Point, surfaces: Vec<Rect>) -> WizardState {
        self.dispatch(WizardEvent::PointerDown { at, surfaces }).await
    }

    pub async fn get_state(&self) -> WizardState {
        self.context.get_state().await
    }

    /// Outcome of the most recent background submission, if one has finished.
    pub async fn last_submission_outcome(&self) -> Option<SubmissionOutcome> {
        self.last_outcome.lock().await.clone()
    }

    /// Waits for every background submission and payment redirect started so far.
    pub async fn drain_submissions(&self) {
        let handles = std::mem::take(&mut *self.background.lock().await);
        for handle in handles {
            if let Err(err) = handle.await {
                error!(error = %err, "background wizard task did not complete");
            }
        }
    }

    pub async fn dispatch(&self, event: WizardEvent) -> WizardState {
        // Serialize dispatch so no two transitions read the same state.
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;

        let span = info_span!("usecase.wizard_orchestrator.dispatch", event = event.kind());
        async {
            let current = self.context.get_state().await;
            let (from_step, from_modal) = (current.step, current.modal);
            let (next, actions) = WizardStateMachine::transition(current, event);
            info!(
                from_step = ?from_step,
                to_step = ?next.step,
                from_modal = ?from_modal,
                to_modal = ?next.modal,
                error = ?next.error,
                "wizard state transition"
            );
            self.execute_actions(actions).await;
            self.set_state_and_emit(next.clone()).await;
            next
        }
        .instrument(span)
        .await
    }

    async fn execute_actions(&self, actions: Vec<WizardAction>) {
        for action in actions {
            match action {
                WizardAction::SubmitRequest { submission } => {
                    self.spawn_submission(submission).await;
                    debug!("wizard action SubmitRequest dispatched");
                }
                WizardAction::OpenPaymentRedirect => {
                    self.spawn_payment_redirect().await;
                    debug!("wizard action OpenPaymentRedirect dispatched");
                }
                WizardAction::ShowNotice { error } => {
                    self.show_notice(error).await;
                }
            }
        }
    }

    /// Fire-and-forget: the modal chain has already moved to `Purchase` and
    /// does not wait for, or roll back on, the outcome.
    async fn spawn_submission(&self, submission: Submission) {
        let use_case = self.submit_logo_request.clone();
        let event_port = self.event_port.clone();
        let last_outcome = self.last_outcome.clone();

        let span = info_span!("usecase.wizard_orchestrator.submission");
        let handle = tokio::spawn(
            async move {
                let outcome = match use_case.execute(&submission).await {
                    Ok(record_id) => {
                        info!(record_id = %record_id, "logo request submitted");
                        SubmissionOutcome::Succeeded { record_id }
                    }
                    Err(err) => {
                        error!(error = %err, "logo request submission failed");
                        SubmissionOutcome::Failed {
                            reason: err.to_string(),
                        }
                    }
                };
                *last_outcome.lock().await = Some(outcome.clone());
                event_port.emit_submission_outcome(&outcome).await;
            }
            .instrument(span),
        );

        self.track(handle).await;
    }

    /// The redirect is not awaited; a slow URL handler must not hold the
    /// dispatch lock.
    async fn spawn_payment_redirect(&self) {
        let redirect = self.payment_redirect.clone();
        let url = self.checkout_url.clone();

        let span = info_span!("usecase.wizard_orchestrator.payment_redirect", url = %url);
        let handle = tokio::spawn(
            async move {
                match redirect.open_external(&url).await {
                    Ok(()) => info!("payment page opened"),
                    Err(err) => warn!(error = %err, "failed to open payment page"),
                }
            }
            .instrument(span),
        );

        self.track(handle).await;
    }

    async fn track(&self, handle: JoinHandle<()>) {
        let mut background = self.background.lock().await;
        background.retain(|h| !h.is_finished());
        background.push(handle);
    }

    async fn show_notice(&self, error: ValidationError) {
        debug!(notice = ?error, "wizard showing blocking notice");
        self.event_port.emit_notice(error).await;
    }

    async fn set_state_and_emit(&self, state: WizardState) {
        self.event_port.emit_wizard_state_changed(&state).await;
        self.context.set_state(state).await;
    }
}
