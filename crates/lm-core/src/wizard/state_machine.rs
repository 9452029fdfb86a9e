//! Wizard state machine.
//!
//! Defines a pure state transition function for the logo submission flow:
//! three data-collection steps followed by the cost / contact / purchase
//! modal chain.

use serde::{Deserialize, Serialize};

use crate::asset::{AssetKind, BinaryAsset};
use crate::modal::{ModalPhase, OutsideInteraction, Point, Rect};
use crate::submission::Submission;

/// Wizard step.
///
/// 向导步骤。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    /// Upload the logo.
    ///
    /// 上传 Logo。
    #[default]
    Logo,
    /// Upload the image the logo goes onto.
    ///
    /// 上传目标图片。
    TargetImage,
    /// Describe placement and submit.
    ///
    /// 描述位置并提交。
    Description,
}

impl WizardStep {
    pub fn index(&self) -> u8 {
        match self {
            WizardStep::Logo => 0,
            WizardStep::TargetImage => 1,
            WizardStep::Description => 2,
        }
    }

    pub fn next(&self) -> Option<WizardStep> {
        match self {
            WizardStep::Logo => Some(WizardStep::TargetImage),
            WizardStep::TargetImage => Some(WizardStep::Description),
            WizardStep::Description => None,
        }
    }

    pub fn previous(&self) -> Option<WizardStep> {
        match self {
            WizardStep::Logo => None,
            WizardStep::TargetImage => Some(WizardStep::Logo),
            WizardStep::Description => Some(WizardStep::TargetImage),
        }
    }

    /// Asset that must be present before leaving this step.
    pub fn required_asset(&self) -> Option<AssetKind> {
        match self {
            WizardStep::Logo => Some(AssetKind::Logo),
            WizardStep::TargetImage => Some(AssetKind::TargetImage),
            WizardStep::Description => None,
        }
    }
}

/// Validation failures surfaced to the user.
///
/// 用户可见的校验错误。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum ValidationError {
    #[error("Please upload a logo.")]
    MissingLogo,
    #[error("Please upload a target image.")]
    MissingTargetImage,
    #[error("Please describe how the logo should be placed.")]
    MissingDescription,
    #[error("Please enter both your email and your name.")]
    MissingContactDetails,
}

/// Wizard flow state.
///
/// 向导流程状态。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WizardState {
    pub step: WizardStep,
    pub logo: Option<BinaryAsset>,
    pub target_image: Option<BinaryAsset>,
    pub placement_text: String,
    pub contact_email: String,
    pub contact_name: String,
    pub modal: ModalPhase,
    /// Inline error slot; holds at most one message.
    pub error: Option<ValidationError>,
}

impl WizardState {
    pub fn has_asset(&self, kind: AssetKind) -> bool {
        match kind {
            AssetKind::Logo => self.logo.is_some(),
            AssetKind::TargetImage => self.target_image.is_some(),
        }
    }

    /// "Previous" button state.
    pub fn can_go_previous(&self) -> bool {
        self.step.previous().is_some()
    }

    /// "Next" button state.
    pub fn can_go_next(&self) -> bool {
        match (self.step.next(), self.step.required_asset()) {
            (None, _) => false,
            (Some(_), Some(kind)) => self.has_asset(kind),
            (Some(_), None) => true,
        }
    }

    /// "Add Logo" button state.
    pub fn can_submit(&self) -> bool {
        self.step == WizardStep::Description
            && self.logo.is_some()
            && self.target_image.is_some()
            && !self.placement_text.is_empty()
    }

    pub fn next_label(&self) -> &'static str {
        if self.step.next().is_none() {
            "Finish"
        } else {
            "Next"
        }
    }
}

/// Events that drive the wizard.
///
/// 驱动向导的事件。
#[derive(Debug, Clone, PartialEq)]
pub enum WizardEvent {
    /// A file was selected for one of the asset inputs.
    ///
    /// 选择了文件。
    AssetCaptured { kind: AssetKind, asset: BinaryAsset },
    /// "Next" pressed.
    NextStep,
    /// "Previous" pressed.
    PreviousStep,
    PlacementTextChanged { text: String },
    ContactEmailChanged { email: String },
    ContactNameChanged { name: String },
    /// "Add Logo" pressed.
    ///
    /// 点击“添加 Logo”。
    SubmitRequested,
    /// "I am ready" pressed on the cost notice.
    CostNoticeAcknowledged,
    /// Cost notice closed without acknowledging.
    CostNoticeCancelled,
    /// "Submit" pressed on the contact form.
    ///
    /// 提交联系方式。
    ContactSubmitted,
    /// Purchase button pressed.
    PaymentRequested,
    /// Pointer pressed somewhere on the page; `surfaces` are the bounds of
    /// every modal surface currently rendered.
    PointerDown { at: Point, surfaces: Vec<Rect> },
}

impl WizardEvent {
    /// Stable name for logs; never includes user-entered text.
    pub fn kind(&self) -> &'static str {
        match self {
            WizardEvent::AssetCaptured { .. } => "asset_captured",
            WizardEvent::NextStep => "next_step",
            WizardEvent::PreviousStep => "previous_step",
            WizardEvent::PlacementTextChanged { .. } => "placement_text_changed",
            WizardEvent::ContactEmailChanged { .. } => "contact_email_changed",
            WizardEvent::ContactNameChanged { .. } => "contact_name_changed",
            WizardEvent::SubmitRequested => "submit_requested",
            WizardEvent::CostNoticeAcknowledged => "cost_notice_acknowledged",
            WizardEvent::CostNoticeCancelled => "cost_notice_cancelled",
            WizardEvent::ContactSubmitted => "contact_submitted",
            WizardEvent::PaymentRequested => "payment_requested",
            WizardEvent::PointerDown { .. } => "pointer_down",
        }
    }
}

/// Side-effects produced by state transitions.
///
/// 状态迁移产生的副作用。
#[derive(Debug, Clone, PartialEq)]
pub enum WizardAction {
    /// Hand the validated submission to the upload and record collaborators.
    ///
    /// 提交到上传与记录服务。
    SubmitRequest { submission: Submission },
    /// Open the external payment page.
    ///
    /// 打开外部支付页面。
    OpenPaymentRedirect,
    /// Show a blocking notice.
    ///
    /// 弹出阻塞提示。
    ShowNotice { error: ValidationError },
}

/// Pure wizard state machine.
///
/// 纯状态机：不包含副作用。
pub struct WizardStateMachine;

impl WizardStateMachine {
    pub fn transition(state: WizardState, event: WizardEvent) -> (WizardState, Vec<WizardAction>) {
        let mut state = state;
        match event {
            WizardEvent::AssetCaptured { kind, asset } => {
                match kind {
                    AssetKind::Logo => {
                        state.logo = Some(asset);
                        if state.step == WizardStep::Logo && !state.modal.is_active() {
                            state.step = WizardStep::TargetImage;
                        }
                    }
                    AssetKind::TargetImage => {
                        state.target_image = Some(asset);
                        if state.step == WizardStep::TargetImage && !state.modal.is_active() {
                            state.step = WizardStep::Description;
                        }
                    }
                }
                (state, Vec::new())
            }
            WizardEvent::NextStep => {
                if !state.modal.is_active() && state.can_go_next() {
                    if let Some(next) = state.step.next() {
                        state.step = next;
                    }
                }
                (state, Vec::new())
            }
            WizardEvent::PreviousStep => {
                if !state.modal.is_active() {
                    if let Some(previous) = state.step.previous() {
                        state.step = previous;
                    }
                }
                (state, Vec::new())
            }
            WizardEvent::PlacementTextChanged { text } => {
                state.placement_text = text;
                (state, Vec::new())
            }
            WizardEvent::ContactEmailChanged { email } => {
                state.contact_email = email;
                (state, Vec::new())
            }
            WizardEvent::ContactNameChanged { name } => {
                state.contact_name = name;
                (state, Vec::new())
            }
            WizardEvent::SubmitRequested => {
                if state.step != WizardStep::Description || state.modal.is_active() {
                    return (state, Vec::new());
                }
                state.error = None;
                if let Some(error) = Self::missing_request_input(&state) {
                    state.error = Some(error);
                    return (state, Vec::new());
                }
                state.modal = ModalPhase::CostConfirm;
                (state, Vec::new())
            }
            WizardEvent::CostNoticeAcknowledged => {
                if state.modal == ModalPhase::CostConfirm {
                    state.modal = ModalPhase::ContactInfo;
                }
                (state, Vec::new())
            }
            WizardEvent::CostNoticeCancelled => {
                if state.modal == ModalPhase::CostConfirm {
                    state.modal = ModalPhase::None;
                }
                (state, Vec::new())
            }
            WizardEvent::ContactSubmitted => {
                if state.modal != ModalPhase::ContactInfo {
                    return (state, Vec::new());
                }
                let email = state.contact_email.trim();
                let name = state.contact_name.trim();
                if email.is_empty() || name.is_empty() {
                    let error = ValidationError::MissingContactDetails;
                    return (state, vec![WizardAction::ShowNotice { error }]);
                }

                let (logo, target_image) = match (&state.logo, &state.target_image) {
                    (Some(logo), Some(target_image)) => (logo.clone(), target_image.clone()),
                    (None, _) => return Self::reject_contact(state, ValidationError::MissingLogo),
                    (_, None) => {
                        return Self::reject_contact(state, ValidationError::MissingTargetImage)
                    }
                };

                let submission = Submission {
                    logo,
                    target_image,
                    description: state.placement_text.clone(),
                    email: email.to_string(),
                    name: name.to_string(),
                };
                state.error = None;
                state.modal = ModalPhase::Purchase;
                (state, vec![WizardAction::SubmitRequest { submission }])
            }
            WizardEvent::PaymentRequested => {
                if state.modal == ModalPhase::Purchase {
                    return (state, vec![WizardAction::OpenPaymentRedirect]);
                }
                (state, Vec::new())
            }
            WizardEvent::PointerDown { at, surfaces } => {
                if state.modal.dismissible_by_outside_press()
                    && OutsideInteraction::new(&surfaces).is_outside(at)
                {
                    state.modal = ModalPhase::None;
                }
                (state, Vec::new())
            }
        }
    }

    /// Checks logo first, then target image, then description.
    fn missing_request_input(state: &WizardState) -> Option<ValidationError> {
        if state.logo.is_none() {
            return Some(ValidationError::MissingLogo);
        }
        if state.target_image.is_none() {
            return Some(ValidationError::MissingTargetImage);
        }
        if state.placement_text.trim().is_empty() {
            return Some(ValidationError::MissingDescription);
        }
        None
    }

    fn reject_contact(
        mut state: WizardState,
        error: ValidationError,
    ) -> (WizardState, Vec<WizardAction>) {
        state.error = Some(error);
        (state, vec![WizardAction::ShowNotice { error }])
    }
}
