//! # Application Runtime / 应用运行时
//!
//! `AppRuntime` owns the wizard orchestrator and the gallery loader for one
//! session and is what the command handlers operate on.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use lm_app::usecases::{GalleryLoader, SentinelObservation, SubmitLogoRequest, WizardOrchestrator};
use lm_core::config::AppConfig;
use lm_core::ports::{GalleryEventPort, WizardEventPort};

use super::wiring::AppDeps;

/// Application runtime with dependencies.
///
/// 持有一次会话的向导编排器与画廊加载器。
pub struct AppRuntime {
    config: AppConfig,
    wizard: WizardOrchestrator,
    gallery: Arc<GalleryLoader>,
    observation: Mutex<Option<SentinelObservation>>,
}

impl AppRuntime {
    pub fn new(
        config: AppConfig,
        deps: AppDeps,
        wizard_events: Arc<dyn WizardEventPort>,
        gallery_events: Arc<dyn GalleryEventPort>,
    ) -> Self {
        let submit = Arc::new(SubmitLogoRequest::new(deps.asset_upload, deps.record_store));
        let wizard = WizardOrchestrator::new(
            submit,
            deps.payment_redirect,
            wizard_events,
            config.payment.checkout_url.clone(),
        );
        let gallery = Arc::new(GalleryLoader::new(
            deps.gallery_feed,
            gallery_events,
            config.gallery.batch_size,
            config.gallery.visibility_threshold,
        ));

        Self {
            config,
            wizard,
            gallery,
            observation: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn wizard(&self) -> &WizardOrchestrator {
        &self.wizard
    }

    pub fn gallery(&self) -> &Arc<GalleryLoader> {
        &self.gallery
    }

    /// Access to the live sentinel observation, if mounted.
    pub fn observation(&self) -> &Mutex<Option<SentinelObservation>> {
        &self.observation
    }

    /// Mounts the gallery and starts its initial load.
    ///
    /// Mounting again replaces the previous observation.
    pub async fn mount_gallery(&self) {
        let observation = self.gallery.mount();
        let previous = self.observation.lock().await.replace(observation);
        if previous.is_some() {
            info!("Gallery remounted; previous observation detached");
        }
    }

    pub async fn unmount_gallery(&self) {
        if let Some(observation) = self.observation.lock().await.take() {
            observation.detach();
        }
    }

    /// Tears the session down: stops gallery observation and waits for
    /// outstanding submissions.
    pub async fn shutdown(&self) {
        self.unmount_gallery().await;
        self.wizard.drain_submissions().await;
        info!("Runtime shut down");
    }
}
