use crate::submission::SubmissionOutcome;
use crate::wizard::{ValidationError, WizardState};

#[async_trait::async_trait]
pub trait WizardEventPort: Send + Sync {
    async fn emit_wizard_state_changed(&self, state: &WizardState);

    /// Blocking notice (alert) for the user.
    async fn emit_notice(&self, error: ValidationError);

    async fn emit_submission_outcome(&self, outcome: &SubmissionOutcome);
}
