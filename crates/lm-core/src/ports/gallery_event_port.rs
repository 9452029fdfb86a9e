use crate::gallery::GalleryState;

#[async_trait::async_trait]
pub trait GalleryEventPort: Send + Sync {
    async fn emit_gallery_changed(&self, state: &GalleryState);
}
