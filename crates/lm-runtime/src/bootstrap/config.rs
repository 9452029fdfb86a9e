//! # Configuration Loader / 配置加载器
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Read TOML configuration files / 读取 TOML 配置文件
//! - ✅ Apply `LOGOMAGIC_*` environment overrides / 应用环境变量覆盖
//! - ✅ Report I/O and parsing errors with context / 报告带上下文的 I/O 和解析错误
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No validation logic / 禁止验证逻辑**
//! ❌ **No business rules / 禁止业务规则**
//!
//! Missing keys fall back to the `AppConfig` defaults; whatever else is in
//! the file is accepted as-is.

use std::path::{Path, PathBuf};

use anyhow::Context;
use lm_core::config::AppConfig;
use tracing::{debug, warn};

pub const CONFIG_PATH_ENV: &str = "LOGOMAGIC_CONFIG";
pub const CONFIG_FILE_NAME: &str = "config.toml";

pub const CHECKOUT_URL_ENV: &str = "LOGOMAGIC_CHECKOUT_URL";
pub const OPEN_IN_BROWSER_ENV: &str = "LOGOMAGIC_OPEN_IN_BROWSER";
pub const ASSETS_DIR_ENV: &str = "LOGOMAGIC_ASSETS_DIR";
pub const RECORDS_DIR_ENV: &str = "LOGOMAGIC_RECORDS_DIR";
pub const GALLERY_DELAY_ENV: &str = "LOGOMAGIC_GALLERY_DELAY_MS";
pub const GALLERY_BATCH_ENV: &str = "LOGOMAGIC_GALLERY_BATCH_SIZE";

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// # Errors / 错误
///
/// Returns error if:
/// - File cannot be read (I/O error)
/// - Content is not valid TOML or does not match the config shape
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config as TOML: {}", config_path.display()))?;
    Ok(config)
}

/// Resolve and load the configuration used at startup.
///
/// Lookup order: explicit path, `LOGOMAGIC_CONFIG`, then
/// `<config dir>/logomagic/config.toml`. An explicit path must exist; the
/// default location is optional. Environment overrides are applied last.
pub fn load_config_or_default(explicit: Option<PathBuf>) -> anyhow::Result<AppConfig> {
    let from_env = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);

    let mut config = match explicit.or(from_env) {
        Some(path) => load_config(&path)?,
        None => match default_config_path() {
            Some(path) if path.exists() => load_config(&path)?,
            _ => {
                debug!("No config file found, using defaults");
                AppConfig::default()
            }
        },
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

/// `<config dir>/logomagic/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(lm_infra::APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Apply `LOGOMAGIC_*` overrides read through `lookup`.
///
/// Unparseable numeric or boolean values are logged and ignored.
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(CHECKOUT_URL_ENV) {
        config.payment.checkout_url = url;
    }
    if let Some(raw) = lookup(OPEN_IN_BROWSER_ENV) {
        match parse_bool(&raw) {
            Some(value) => config.payment.open_in_browser = value,
            None => warn!(key = OPEN_IN_BROWSER_ENV, value = %raw, "ignoring invalid boolean"),
        }
    }
    if let Some(dir) = lookup(ASSETS_DIR_ENV) {
        config.storage.assets_dir = PathBuf::from(dir);
    }
    if let Some(dir) = lookup(RECORDS_DIR_ENV) {
        config.storage.records_dir = PathBuf::from(dir);
    }
    if let Some(raw) = lookup(GALLERY_DELAY_ENV) {
        match raw.trim().parse() {
            Ok(value) => config.gallery.placeholder_delay_ms = value,
            Err(_) => warn!(key = GALLERY_DELAY_ENV, value = %raw, "ignoring invalid number"),
        }
    }
    if let Some(raw) = lookup(GALLERY_BATCH_ENV) {
        match raw.trim().parse() {
            Ok(value) => config.gallery.batch_size = value,
            Err(_) => warn!(key = GALLERY_BATCH_ENV, value = %raw, "ignoring invalid number"),
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
