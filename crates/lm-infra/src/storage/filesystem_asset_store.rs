//! Filesystem-based asset storage
//! 基于文件系统的素材存储

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;
use uuid::Uuid;

use lm_core::ports::AssetUploadPort;
use lm_core::AssetUrl;

/// Fallback when the submitted name has no usable file component.
const FALLBACK_FILE_NAME: &str = "asset";

/// Filesystem-based asset storage
/// 基于文件系统的素材存储
///
/// Every upload lands in its own file, so two assets with the same original
/// name never overwrite each other.
pub struct FilesystemAssetStore {
    base_dir: PathBuf,
}

impl FilesystemAssetStore {
    /// Create a new asset store with the given base directory
    /// 使用给定基础目录创建新的素材存储
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Ensure the asset directory exists
    /// 确保素材目录存在
    async fn ensure_dir(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.base_dir)
            .await
            .context("Failed to create asset directory")
    }

    /// Unique on-disk path for an upload named `name`.
    fn asset_path(&self, name: &str) -> PathBuf {
        let file_name = Path::new(name)
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.is_empty())
            .unwrap_or(FALLBACK_FILE_NAME);
        self.base_dir
            .join(format!("{}-{}", Uuid::new_v4().simple(), file_name))
    }
}

#[async_trait]
impl AssetUploadPort for FilesystemAssetStore {
    async fn store(&self, name: &str, bytes: Bytes) -> Result<AssetUrl> {
        self.ensure_dir().await?;
        let path = self.asset_path(name);

        let mut file = tokio::fs::File::create(&path)
            .await
            .context("Failed to create asset file")?;
        tokio::io::AsyncWriteExt::write_all(&mut file, &bytes)
            .await
            .context("Failed to write asset data")?;
        file.sync_all().await.context("Failed to sync asset file")?;

        let absolute = tokio::fs::canonicalize(&path)
            .await
            .context("Failed to resolve asset path")?;
        debug!(path = %absolute.display(), size = bytes.len(), "asset stored");

        Ok(AssetUrl::new(format!("file://{}", absolute.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn path_of(url: &AssetUrl) -> PathBuf {
        PathBuf::from(url.as_str().trim_start_matches("file://"))
    }

    #[tokio::test]
    async fn store_writes_bytes_and_returns_file_url() {
        let temp_dir = TempDir::new().unwrap();
        let store = FilesystemAssetStore::new(temp_dir.path().join("assets"));

        let url = store
            .store("logo.png", Bytes::from_static(b"png-bytes"))
            .await
            .unwrap();

        assert!(url.as_str().starts_with("file://"));
        assert!(url.as_str().ends_with("-logo.png"));
        let stored = tokio::fs::read(path_of(&url)).await.unwrap();
        assert_eq!(stored, b"png-bytes");
    }

    #[tokio::test]
    async fn same_name_twice_yields_distinct_files() {
        let temp_dir = TempDir::new().unwrap();
        let store = FilesystemAssetStore::new(temp_dir.path().to_path_buf());

        let first = store.store("logo.png", Bytes::from_static(b"a")).await.unwrap();
        let second = store.store("logo.png", Bytes::from_static(b"b")).await.unwrap();

        assert_ne!(first, second);
        assert_eq!(tokio::fs::read(path_of(&first)).await.unwrap(), b"a");
        assert_eq!(tokio::fs::read(path_of(&second)).await.unwrap(), b"b");
    }

    #[tokio::test]
    async fn directory_components_in_name_are_dropped() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("assets");
        let store = FilesystemAssetStore::new(base.clone());

        let url = store
            .store("../../etc/passwd", Bytes::from_static(b"x"))
            .await
            .unwrap();

        let path = path_of(&url);
        assert_eq!(path.parent().unwrap(), base.canonicalize().unwrap());
        assert!(url.as_str().ends_with("-passwd"));
    }
}
