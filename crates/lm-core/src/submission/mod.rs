//! Submission payloads handed to the upload and record collaborators.

use serde::{Deserialize, Serialize};

use crate::asset::BinaryAsset;
use crate::ids::RecordId;

/// Retrievable location of an uploaded asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetUrl(String);

impl AssetUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AssetUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated logo request.
///
/// Only built by the wizard reducer once both assets are present and the
/// contact fields are non-empty after trimming.
///
/// 经过校验的提交内容。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub logo: BinaryAsset,
    pub target_image: BinaryAsset,
    pub description: String,
    pub email: String,
    pub name: String,
}

/// Flat record persisted by the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoRequestRecord {
    pub logo_url: AssetUrl,
    pub target_image_url: AssetUrl,
    pub description: String,
    pub email: String,
    pub name: String,
}

impl LogoRequestRecord {
    pub fn from_submission(
        submission: &Submission,
        logo_url: AssetUrl,
        target_image_url: AssetUrl,
    ) -> Self {
        Self {
            logo_url,
            target_image_url,
            description: submission.description.clone(),
            email: submission.email.clone(),
            name: submission.name.clone(),
        }
    }
}

/// Result of the background submission, reported after the modal chain has
/// already moved on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmissionOutcome {
    Succeeded { record_id: RecordId },
    Failed { reason: String },
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Succeeded { .. })
    }
}
