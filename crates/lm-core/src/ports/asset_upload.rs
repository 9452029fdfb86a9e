use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Arc;

use crate::submission::AssetUrl;

/// Asset upload collaborator.
///
/// Stores a named blob and returns a URL it can later be retrieved from.
#[async_trait]
pub trait AssetUploadPort: Send + Sync {
    // name 为用户选择文件时的原始文件名
    async fn store(&self, name: &str, bytes: Bytes) -> Result<AssetUrl>;
}

#[async_trait]
impl<T: AssetUploadPort + ?Sized> AssetUploadPort for Arc<T> {
    async fn store(&self, name: &str, bytes: Bytes) -> Result<AssetUrl> {
        (**self).store(name, bytes).await
    }
}
