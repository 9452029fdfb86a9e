use anyhow::Result;
use async_trait::async_trait;

use crate::ids::RecordId;
use crate::submission::LogoRequestRecord;

/// Record store collaborator.
#[async_trait]
pub trait RecordStorePort: Send + Sync {
    async fn create_record(&self, record: &LogoRequestRecord) -> Result<RecordId>;
}
