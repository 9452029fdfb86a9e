use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use lm_core::ports::GalleryFeedPort;
use lm_core::{ItemRef, PageRequest};

/// Gallery feed producing numbered placeholder images after a fixed delay.
///
/// 占位图片源：模拟网络延迟后返回编号图片。
pub struct PlaceholderGalleryFeed {
    base_url: String,
    delay: Duration,
}

impl PlaceholderGalleryFeed {
    pub fn new(base_url: impl Into<String>, delay: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            delay,
        }
    }

    fn item(&self, ordinal: u64) -> ItemRef {
        ItemRef {
            url: format!(
                "{}?height=300&width=300&text=Image {}",
                self.base_url, ordinal
            ),
            ordinal,
        }
    }
}

#[async_trait]
impl GalleryFeedPort for PlaceholderGalleryFeed {
    async fn fetch_batch(&self, request: PageRequest) -> Result<Vec<ItemRef>> {
        tokio::time::sleep(self.delay).await;

        let start = request.offset as u64 + 1;
        let items: Vec<ItemRef> = (start..start + request.limit as u64)
            .map(|ordinal| self.item(ordinal))
            .collect();
        debug!(offset = request.offset, count = items.len(), "placeholder batch generated");
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn batch_is_numbered_from_offset() {
        let feed = PlaceholderGalleryFeed::new("/placeholder.svg", Duration::from_millis(1000));

        let items = feed
            .fetch_batch(PageRequest {
                offset: 10,
                limit: 10,
            })
            .await
            .unwrap();

        assert_eq!(items.len(), 10);
        assert_eq!(items[0].ordinal, 11);
        assert_eq!(
            items[0].url,
            "/placeholder.svg?height=300&width=300&text=Image 11"
        );
        assert_eq!(items[9].ordinal, 20);
    }

    #[tokio::test(start_paused = true)]
    async fn fetch_waits_for_configured_delay() {
        let feed = PlaceholderGalleryFeed::new("/placeholder.svg", Duration::from_millis(1000));
        let started = tokio::time::Instant::now();

        feed.fetch_batch(PageRequest { offset: 0, limit: 1 })
            .await
            .unwrap();

        assert!(started.elapsed() >= Duration::from_millis(1000));
    }
}
