//! # Dependency Injection / 依赖注入模块
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Resolve storage directories / 解析存储目录
//! - ✅ Create infra implementations / 创建 infra 层具体实现
//! - ✅ Hand them out as `Arc<dyn Port>` / 以 Port trait 对象交付
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No business logic / 禁止包含任何业务逻辑**
//! ❌ **No configuration validation / 禁止做配置验证**
//!
//! > **This is the only place allowed to depend on lm-infra + lm-app simultaneously.**
//! > **这是唯一允许同时依赖 lm-infra 和 lm-app 的地方。**

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use lm_core::config::AppConfig;
use lm_core::ports::{AssetUploadPort, GalleryFeedPort, PaymentRedirectPort, RecordStorePort};
use lm_infra::{
    FilesystemAssetStore, JsonFileRecordStore, LoggingPaymentOpener, PlaceholderGalleryFeed,
    SystemPaymentOpener,
};

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
/// 依赖注入错误（基础设施初始化失败）
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("No platform data directory; set storage paths explicitly")]
    DataDirUnavailable,

    #[error("Asset storage initialization failed: {0}")]
    AssetStorageInit(String),

    #[error("Record storage initialization failed: {0}")]
    RecordStorageInit(String),
}

/// Collaborators the use cases are built from.
#[derive(Clone)]
pub struct AppDeps {
    pub asset_upload: Arc<dyn AssetUploadPort>,
    pub record_store: Arc<dyn RecordStorePort>,
    pub payment_redirect: Arc<dyn PaymentRedirectPort>,
    pub gallery_feed: Arc<dyn GalleryFeedPort>,
}

/// Build infra adapters from configuration.
///
/// Empty storage paths resolve to `<data dir>/logomagic/{assets,records}`.
/// Both directories are created up front so a misconfigured path fails at
/// startup instead of on first submission.
pub fn wire_dependencies(config: &AppConfig) -> WiringResult<AppDeps> {
    let assets_dir = resolve_dir(&config.storage.assets_dir, "assets")?;
    let records_dir = resolve_dir(&config.storage.records_dir, "records")?;

    std::fs::create_dir_all(&assets_dir).map_err(|e| {
        WiringError::AssetStorageInit(format!(
            "Failed to create {}: {}",
            assets_dir.display(),
            e
        ))
    })?;
    std::fs::create_dir_all(&records_dir).map_err(|e| {
        WiringError::RecordStorageInit(format!(
            "Failed to create {}: {}",
            records_dir.display(),
            e
        ))
    })?;

    let payment_redirect: Arc<dyn PaymentRedirectPort> = if config.payment.open_in_browser {
        Arc::new(SystemPaymentOpener::for_current_platform())
    } else {
        Arc::new(LoggingPaymentOpener)
    };

    info!(
        assets_dir = %assets_dir.display(),
        records_dir = %records_dir.display(),
        open_in_browser = config.payment.open_in_browser,
        "Dependencies wired"
    );

    Ok(AppDeps {
        asset_upload: Arc::new(FilesystemAssetStore::new(assets_dir)),
        record_store: Arc::new(JsonFileRecordStore::new(records_dir)),
        payment_redirect,
        gallery_feed: Arc::new(PlaceholderGalleryFeed::new(
            config.gallery.placeholder_base_url.clone(),
            Duration::from_millis(config.gallery.placeholder_delay_ms),
        )),
    })
}

fn resolve_dir(configured: &Path, default_leaf: &str) -> WiringResult<PathBuf> {
    if !configured.as_os_str().is_empty() {
        return Ok(configured.to_path_buf());
    }
    lm_infra::default_data_dir()
        .map(|dir| dir.join(default_leaf))
        .ok_or(WiringError::DataDirUnavailable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_dirs_are_created() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = AppConfig::default();
        config.storage.assets_dir = temp_dir.path().join("a");
        config.storage.records_dir = temp_dir.path().join("r");

        wire_dependencies(&config).unwrap();

        assert!(temp_dir.path().join("a").is_dir());
        assert!(temp_dir.path().join("r").is_dir());
    }

    #[test]
    fn unwritable_assets_dir_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();

        let mut config = AppConfig::default();
        config.storage.assets_dir = blocker.join("assets");
        config.storage.records_dir = temp_dir.path().join("r");

        let err = wire_dependencies(&config).err().unwrap();
        assert!(matches!(err, WiringError::AssetStorageInit(_)));
    }

    #[test]
    fn configured_dir_wins_over_default() {
        let resolved = resolve_dir(Path::new("/srv/assets"), "assets").unwrap();
        assert_eq!(resolved, PathBuf::from("/srv/assets"));
    }
}
