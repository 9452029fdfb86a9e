//! Mock implementations of collaborator ports for testing.
//!
//! This module provides mock implementations using `mockall` for unit testing
//! port contracts without requiring real infrastructure.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use mockall::mock;
use mockall::predicate::eq;

use crate::ids::RecordId;
use crate::ports::{AssetUploadPort, RecordStorePort};
use crate::submission::{AssetUrl, LogoRequestRecord};

mock! {
    pub Upload {}

    #[async_trait]
    impl AssetUploadPort for Upload {
        async fn store(&self, name: &str, bytes: Bytes) -> anyhow::Result<AssetUrl>;
    }
}

mock! {
    pub Records {}

    #[async_trait]
    impl RecordStorePort for Records {
        async fn create_record(&self, record: &LogoRequestRecord) -> anyhow::Result<RecordId>;
    }
}

#[tokio::test]
async fn arc_upload_port_forwards_to_inner() {
    let mut upload = MockUpload::new();
    upload
        .expect_store()
        .withf(|name, bytes| name == "logo.png" && bytes == &Bytes::from_static(b"png"))
        .times(1)
        .returning(|name, _| Ok(AssetUrl::new(format!("mem://{}", name))));

    let shared: Arc<MockUpload> = Arc::new(upload);
    let url = AssetUploadPort::store(&shared, "logo.png", Bytes::from_static(b"png"))
        .await
        .unwrap();

    assert_eq!(url.as_str(), "mem://logo.png");
}

#[tokio::test]
async fn record_store_failure_surfaces_as_error() {
    let record = LogoRequestRecord {
        logo_url: AssetUrl::new("mem://logo.png"),
        target_image_url: AssetUrl::new("mem://shirt.jpg"),
        description: "center".to_string(),
        email: "a@b.com".to_string(),
        name: "A".to_string(),
    };

    let mut records = MockRecords::new();
    records
        .expect_create_record()
        .with(eq(record.clone()))
        .times(1)
        .returning(|_| Err(anyhow::anyhow!("quota exceeded")));

    let err = records.create_record(&record).await.unwrap_err();
    assert_eq!(err.to_string(), "quota exceeded");
}
