//! # Configuration DTOs / 配置数据结构
//!
//! Pure data. Loading and environment overrides live in the runtime crate;
//! empty paths are valid facts and are resolved to platform defaults during
//! wiring.

mod app_config;

pub use app_config::{AppConfig, GalleryConfig, PaymentConfig, StorageConfig};
