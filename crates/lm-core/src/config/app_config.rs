//! Application configuration domain model

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::gallery::DEFAULT_BATCH_SIZE;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Payment redirect settings
    pub payment: PaymentConfig,

    /// Inspiration gallery settings
    pub gallery: GalleryConfig,

    /// Local storage for uploaded assets and request records
    pub storage: StorageConfig,
}

/// Payment redirect configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentConfig {
    /// External checkout page opened from the purchase dialog
    pub checkout_url: String,

    /// Hand the URL to the platform opener; when false the URL is only logged
    pub open_in_browser: bool,
}

/// Gallery configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Items fetched per batch
    pub batch_size: usize,

    /// Intersection ratio at which the sentinel counts as visible (1.0 = fully)
    pub visibility_threshold: f64,

    /// Simulated latency of the placeholder feed
    pub placeholder_delay_ms: u64,

    /// Base path of placeholder images
    pub placeholder_base_url: String,
}

/// Storage configuration
///
/// Empty paths mean "use the platform data directory".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub assets_dir: PathBuf,
    pub records_dir: PathBuf,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            checkout_url: "https://pay.logomagic.pro/checkout".to_string(),
            open_in_browser: true,
        }
    }
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            visibility_threshold: 1.0,
            placeholder_delay_ms: 1000,
            placeholder_base_url: "/placeholder.svg".to_string(),
        }
    }
}
