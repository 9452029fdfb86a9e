use anyhow::Result;
use async_trait::async_trait;

use crate::gallery::{ItemRef, PageRequest};

/// Source of gallery items, paged by offset.
#[async_trait]
pub trait GalleryFeedPort: Send + Sync {
    async fn fetch_batch(&self, request: PageRequest) -> Result<Vec<ItemRef>>;
}
