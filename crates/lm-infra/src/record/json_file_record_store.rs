//! File-based logo request records
//!
//! Each record is written as a pretty-printed JSON document named after its
//! id inside the records directory.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::info;

use lm_core::ports::RecordStorePort;
use lm_core::{LogoRequestRecord, RecordId};

/// On-disk envelope of a logo request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: RecordId,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub record: LogoRequestRecord,
}

pub struct JsonFileRecordStore {
    records_dir: PathBuf,
}

impl JsonFileRecordStore {
    pub fn new(records_dir: PathBuf) -> Self {
        Self { records_dir }
    }

    fn record_path(&self, id: &RecordId) -> PathBuf {
        self.records_dir.join(format!("{}.json", id))
    }

    async fn ensure_dir(&self) -> anyhow::Result<()> {
        fs::create_dir_all(&self.records_dir).await?;
        Ok(())
    }

    /// Reads a stored record back.
    pub async fn load(&self, id: &RecordId) -> anyhow::Result<StoredRecord> {
        let content = fs::read_to_string(self.record_path(id))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to read record {id}: {e}"))?;
        let stored = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse record {id}: {e}"))?;
        Ok(stored)
    }
}

#[async_trait]
impl RecordStorePort for JsonFileRecordStore {
    async fn create_record(&self, record: &LogoRequestRecord) -> anyhow::Result<RecordId> {
        self.ensure_dir().await?;

        let stored = StoredRecord {
            id: RecordId::new(),
            created_at: Utc::now(),
            record: record.clone(),
        };
        let json = serde_json::to_string_pretty(&stored)
            .map_err(|e| anyhow::anyhow!("Failed to serialize record: {e}"))?;

        let path = self.record_path(&stored.id);
        let mut file = fs::File::create_new(&path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create record file: {e}"))?;

        file.write_all(json.as_bytes())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to write record file: {e}"))?;

        file.sync_all()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to sync record file: {e}"))?;

        info!(record_id = %stored.id, path = %path.display(), "logo request record created");
        Ok(stored.id)
    }
}
