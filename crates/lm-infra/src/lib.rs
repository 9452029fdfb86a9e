//! Infrastructure adapters for the LogoMagic Pro ports.

pub mod gallery;
pub mod record;
pub mod redirect;
pub mod storage;

pub use gallery::PlaceholderGalleryFeed;
pub use record::JsonFileRecordStore;
pub use redirect::{LoggingPaymentOpener, SystemPaymentOpener};
pub use storage::FilesystemAssetStore;

/// Application directory name under the platform data directory.
pub const APP_DIR_NAME: &str = "logomagic";

/// Platform data directory for this application, if one is known.
///
/// 平台数据目录。
pub fn default_data_dir() -> Option<std::path::PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join(APP_DIR_NAME))
}
