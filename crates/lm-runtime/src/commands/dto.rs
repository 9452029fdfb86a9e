use serde::{Deserialize, Serialize};

use lm_core::{GalleryState, ItemRef, ModalPhase, ValidationError, WizardState, WizardStep};

/// Wizard view for the host shell.
///
/// Asset bytes never leave the runtime; the view only says which files are
/// selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardView {
    pub step: WizardStep,
    pub step_index: u8,
    pub logo_name: Option<String>,
    pub target_image_name: Option<String>,
    pub placement_text: String,
    pub contact_email: String,
    pub contact_name: String,
    pub modal: ModalPhase,
    pub error: Option<ErrorView>,
    pub can_go_previous: bool,
    pub can_go_next: bool,
    pub can_submit: bool,
    pub next_label: String,
}

/// Inline validation message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorView {
    pub code: ValidationError,
    pub message: String,
}

impl From<ValidationError> for ErrorView {
    fn from(error: ValidationError) -> Self {
        Self {
            code: error,
            message: error.to_string(),
        }
    }
}

impl From<&WizardState> for WizardView {
    fn from(state: &WizardState) -> Self {
        Self {
            step: state.step,
            step_index: state.step.index(),
            logo_name: state.logo.as_ref().map(|a| a.name().to_string()),
            target_image_name: state.target_image.as_ref().map(|a| a.name().to_string()),
            placement_text: state.placement_text.clone(),
            contact_email: state.contact_email.clone(),
            contact_name: state.contact_name.clone(),
            modal: state.modal,
            error: state.error.map(ErrorView::from),
            can_go_previous: state.can_go_previous(),
            can_go_next: state.can_go_next(),
            can_submit: state.can_submit(),
            next_label: state.next_label().to_string(),
        }
    }
}

/// Gallery view for the host shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryView {
    pub items: Vec<ItemRef>,
    pub is_loading: bool,
}

impl From<&GalleryState> for GalleryView {
    fn from(state: &GalleryState) -> Self {
        Self {
            items: state.items().to_vec(),
            is_loading: state.is_loading(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lm_core::{AssetKind, BinaryAsset, WizardEvent, WizardStateMachine};

    #[test]
    fn fresh_wizard_view_has_navigation_flags() {
        let view = WizardView::from(&WizardState::default());

        assert_eq!(view.step_index, 0);
        assert!(!view.can_go_previous);
        assert!(!view.can_go_next);
        assert!(!view.can_submit);
        assert_eq!(view.next_label, "Next");
        assert_eq!(view.modal, ModalPhase::None);
    }

    #[test]
    fn captured_asset_exposes_only_its_name() {
        let (state, _) = WizardStateMachine::transition(
            WizardState::default(),
            WizardEvent::AssetCaptured {
                kind: AssetKind::Logo,
                asset: BinaryAsset::new("logo.png", vec![0u8; 4]),
            },
        );

        let value = serde_json::to_value(WizardView::from(&state)).unwrap();

        assert_eq!(value["logo_name"], "logo.png");
        assert_eq!(value["step"], "target_image");
        assert_eq!(value["step_index"], 1);
        assert!(value.get("logo").is_none());
    }

    #[test]
    fn error_view_carries_code_and_message() {
        let state = WizardState {
            error: Some(ValidationError::MissingDescription),
            ..WizardState::default()
        };

        let view = WizardView::from(&state);

        let error = view.error.unwrap();
        assert_eq!(error.code, ValidationError::MissingDescription);
        assert_eq!(error.message, "Please describe how the logo should be placed.");
    }
}
