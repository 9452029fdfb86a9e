//! Event Forwarding - Forward runtime events to the host shell
//! 事件转发 - 将运行时事件转发到宿主

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::warn;

use lm_core::ports::{GalleryEventPort, WizardEventPort};
use lm_core::{GalleryState, SubmissionOutcome, ValidationError, WizardState};

use crate::commands::dto::{GalleryView, WizardView};

/// Events pushed to the host, one JSON line each.
/// 推送到宿主的事件
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HostEvent {
    WizardStateChanged { wizard: WizardView },
    /// Blocking notice; the host shows it as an alert.
    Notice {
        code: ValidationError,
        message: String,
    },
    SubmissionOutcome { outcome: SubmissionOutcome },
    GalleryChanged { gallery: GalleryView },
}

impl HostEvent {
    pub fn notice(error: ValidationError) -> Self {
        HostEvent::Notice {
            code: error,
            message: error.to_string(),
        }
    }
}

/// Emitter backing both event ports with an unbounded channel.
#[derive(Clone)]
pub struct ChannelEventEmitter {
    tx: mpsc::UnboundedSender<HostEvent>,
}

impl ChannelEventEmitter {
    pub fn new(tx: mpsc::UnboundedSender<HostEvent>) -> Self {
        Self { tx }
    }

    /// Emitter plus the receiving end the host writer drains.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<HostEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    fn send(&self, event: HostEvent) {
        if let Err(err) = self.tx.send(event) {
            warn!(event = ?err.0, "Failed to send host event: receiver closed");
        }
    }
}

#[async_trait]
impl WizardEventPort for ChannelEventEmitter {
    async fn emit_wizard_state_changed(&self, state: &WizardState) {
        self.send(HostEvent::WizardStateChanged {
            wizard: WizardView::from(state),
        });
    }

    async fn emit_notice(&self, error: ValidationError) {
        self.send(HostEvent::notice(error));
    }

    async fn emit_submission_outcome(&self, outcome: &SubmissionOutcome) {
        self.send(HostEvent::SubmissionOutcome {
            outcome: outcome.clone(),
        });
    }
}

#[async_trait]
impl GalleryEventPort for ChannelEventEmitter {
    async fn emit_gallery_changed(&self, state: &GalleryState) {
        self.send(HostEvent::GalleryChanged {
            gallery: GalleryView::from(state),
        });
    }
}
