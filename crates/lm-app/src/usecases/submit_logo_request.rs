use std::sync::Arc;

use tracing::{debug, info, info_span, Instrument};

use lm_core::ports::{AssetUploadPort, RecordStorePort};
use lm_core::{AssetKind, AssetUrl, BinaryAsset, LogoRequestRecord, RecordId, Submission};

/// Errors produced while handing a submission to the collaborators.
#[derive(Debug, thiserror::Error)]
pub enum SubmitLogoRequestError {
    #[error("upload of {kind} failed: {source}")]
    Upload {
        kind: AssetKind,
        #[source]
        source: anyhow::Error,
    },
    #[error("create record failed: {0}")]
    Record(#[source] anyhow::Error),
}

/// Use case for persisting a validated logo request.
///
/// Both assets are uploaded concurrently under their own file names; the
/// record is created only after both uploads resolve.
pub struct SubmitLogoRequest {
    upload: Arc<dyn AssetUploadPort>,
    records: Arc<dyn RecordStorePort>,
}

impl SubmitLogoRequest {
    pub fn new(upload: Arc<dyn AssetUploadPort>, records: Arc<dyn RecordStorePort>) -> Self {
        Self { upload, records }
    }

    pub async fn execute(&self, submission: &Submission) -> Result<RecordId, SubmitLogoRequestError> {
        let span = info_span!(
            "usecase.submit_logo_request.execute",
            logo = %submission.logo.name(),
            target_image = %submission.target_image.name(),
        );
        async {
            let (logo_url, target_image_url) = futures::try_join!(
                self.store(AssetKind::Logo, &submission.logo),
                self.store(AssetKind::TargetImage, &submission.target_image),
            )?;

            let record = LogoRequestRecord::from_submission(submission, logo_url, target_image_url);
            let record_id = self
                .records
                .create_record(&record)
                .await
                .map_err(SubmitLogoRequestError::Record)?;

            info!(record_id = %record_id, "logo request recorded");
            Ok(record_id)
        }
        .instrument(span)
        .await
    }

    async fn store(&self, kind: AssetKind, asset: &BinaryAsset) -> Result<AssetUrl, SubmitLogoRequestError> {
        let url = self
            .upload
            .store(asset.name(), asset.bytes().clone())
            .await
            .map_err(|source| SubmitLogoRequestError::Upload { kind, source })?;
        debug!(kind = %kind, url = %url, size = asset.len(), "asset uploaded");
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bytes::Bytes;
    use mockall::mock;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::sync::{Notify, Semaphore};

    mock! {
        Upload {}

        #[async_trait]
        impl AssetUploadPort for Upload {
            async fn store(&self, name: &str, bytes: Bytes) -> anyhow::Result<AssetUrl>;
        }
    }

    mock! {
        Records {}

        #[async_trait]
        impl RecordStorePort for Records {
            async fn create_record(&self, record: &LogoRequestRecord) -> anyhow::Result<RecordId>;
        }
    }

    fn submission() -> Submission {
        Submission {
            logo: BinaryAsset::new("logo.png", vec![1u8, 2, 3]),
            target_image: BinaryAsset::new("shirt.jpg", vec![4u8, 5]),
            description: "top-left, 20% opacity".to_string(),
            email: "a@b.com".to_string(),
            name: "A".to_string(),
        }
    }

    #[tokio::test]
    async fn execute_uploads_both_assets_then_creates_record() {
        let mut upload = MockUpload::new();
        upload
            .expect_store()
            .times(2)
            .returning(|name, _| Ok(AssetUrl::new(format!("mem://{}", name))));

        let mut records = MockRecords::new();
        records
            .expect_create_record()
            .withf(|record| {
                record.logo_url.as_str() == "mem://logo.png"
                    && record.target_image_url.as_str() == "mem://shirt.jpg"
                    && record.description == "top-left, 20% opacity"
                    && record.email == "a@b.com"
                    && record.name == "A"
            })
            .times(1)
            .returning(|_| Ok(RecordId::from("rec-1")));

        let use_case = SubmitLogoRequest::new(Arc::new(upload), Arc::new(records));
        let record_id = use_case.execute(&submission()).await.unwrap();

        assert_eq!(record_id, RecordId::from("rec-1"));
    }

    #[tokio::test]
    async fn execute_skips_record_when_upload_fails() {
        let mut upload = MockUpload::new();
        upload.expect_store().returning(|name, _| {
            if name == "shirt.jpg" {
                Err(anyhow::anyhow!("bucket unavailable"))
            } else {
                Ok(AssetUrl::new("mem://logo.png"))
            }
        });

        let mut records = MockRecords::new();
        records.expect_create_record().times(0);

        let use_case = SubmitLogoRequest::new(Arc::new(upload), Arc::new(records));
        let err = use_case.execute(&submission()).await.unwrap_err();

        assert!(matches!(
            err,
            SubmitLogoRequestError::Upload {
                kind: AssetKind::TargetImage,
                ..
            }
        ));
        assert!(err.to_string().contains("bucket unavailable"));
    }

    #[tokio::test]
    async fn execute_maps_record_store_error() {
        let mut upload = MockUpload::new();
        upload
            .expect_store()
            .returning(|name, _| Ok(AssetUrl::new(format!("mem://{}", name))));

        let mut records = MockRecords::new();
        records
            .expect_create_record()
            .returning(|_| Err(anyhow::anyhow!("permission denied")));

        let use_case = SubmitLogoRequest::new(Arc::new(upload), Arc::new(records));
        let err = use_case.execute(&submission()).await.unwrap_err();

        assert!(matches!(err, SubmitLogoRequestError::Record(_)));
    }

    /// Upload port whose stores block until released.
    struct GatedUpload {
        gate: Semaphore,
        started: AtomicUsize,
        both_started: Notify,
        finished: AtomicUsize,
    }

    impl GatedUpload {
        fn new() -> Self {
            Self {
                gate: Semaphore::new(0),
                started: AtomicUsize::new(0),
                both_started: Notify::new(),
                finished: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl AssetUploadPort for GatedUpload {
        async fn store(&self, name: &str, _bytes: Bytes) -> anyhow::Result<AssetUrl> {
            if self.started.fetch_add(1, Ordering::SeqCst) + 1 == 2 {
                self.both_started.notify_one();
            }
            self.gate.acquire().await?.forget();
            self.finished.fetch_add(1, Ordering::SeqCst);
            Ok(AssetUrl::new(format!("mem://{}", name)))
        }
    }

    /// Records how many uploads had finished when the record was created.
    struct ObservedRecords {
        upload: Arc<GatedUpload>,
        finished_at_create: Mutex<Option<usize>>,
    }

    #[async_trait]
    impl RecordStorePort for ObservedRecords {
        async fn create_record(&self, _record: &LogoRequestRecord) -> anyhow::Result<RecordId> {
            let finished = self.upload.finished.load(Ordering::SeqCst);
            *self.finished_at_create.lock().unwrap() = Some(finished);
            Ok(RecordId::from("rec-1"))
        }
    }

    #[tokio::test]
    async fn execute_issues_both_uploads_before_either_resolves() {
        let upload = Arc::new(GatedUpload::new());
        let records = Arc::new(ObservedRecords {
            upload: upload.clone(),
            finished_at_create: Mutex::new(None),
        });
        let use_case = Arc::new(SubmitLogoRequest::new(upload.clone(), records.clone()));

        let task = tokio::spawn({
            let use_case = use_case.clone();
            async move { use_case.execute(&submission()).await }
        });

        tokio::time::timeout(Duration::from_secs(1), upload.both_started.notified())
            .await
            .expect("both uploads start while neither is released");
        assert_eq!(upload.started.load(Ordering::SeqCst), 2);

        upload.gate.add_permits(1);
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(upload.finished.load(Ordering::SeqCst), 1);
        assert!(records.finished_at_create.lock().unwrap().is_none());

        upload.gate.add_permits(1);
        let record_id = task.await.unwrap().unwrap();

        assert_eq!(record_id, RecordId::from("rec-1"));
        assert_eq!(*records.finished_at_create.lock().unwrap(), Some(2));
    }
}
