use serde::{Deserialize, Serialize};

/// Active modal phase.
///
/// Only one variant can be active, so the three dialogs are mutually
/// exclusive by construction.
///
/// 当前激活的弹窗阶段。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalPhase {
    /// No modal shown.
    ///
    /// 无弹窗。
    #[default]
    None,
    /// Cost notice awaiting "I am ready".
    ///
    /// 费用确认。
    CostConfirm,
    /// Contact email and name collection.
    ///
    /// 联系方式收集。
    ContactInfo,
    /// Purchase step linking to the external payment page.
    ///
    /// 购买跳转。
    Purchase,
}

impl ModalPhase {
    pub fn is_active(&self) -> bool {
        !matches!(self, ModalPhase::None)
    }

    /// Phases that close when the user presses outside the dialog.
    pub fn dismissible_by_outside_press(&self) -> bool {
        matches!(self, ModalPhase::CostConfirm | ModalPhase::Purchase)
    }
}

#[cfg(test)]
mod tests {
    use super::ModalPhase;

    #[test]
    fn only_none_is_inactive() {
        assert!(!ModalPhase::None.is_active());
        assert!(ModalPhase::CostConfirm.is_active());
        assert!(ModalPhase::ContactInfo.is_active());
        assert!(ModalPhase::Purchase.is_active());
    }

    #[test]
    fn contact_info_is_not_dismissible_by_outside_press() {
        assert!(ModalPhase::CostConfirm.dismissible_by_outside_press());
        assert!(ModalPhase::Purchase.dismissible_by_outside_press());
        assert!(!ModalPhase::ContactInfo.dismissible_by_outside_press());
        assert!(!ModalPhase::None.dismissible_by_outside_press());
    }
}
