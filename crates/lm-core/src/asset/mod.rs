//! Captured binary assets.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Which wizard input an asset fills.
///
/// 资源对应的向导输入。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Logo,
    TargetImage,
}

impl AssetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Logo => "logo",
            AssetKind::TargetImage => "target_image",
        }
    }
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named blob captured from a file selection.
///
/// The content is immutable once captured; cloning shares the underlying
/// buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct BinaryAsset {
    name: String,
    bytes: Bytes,
}

impl BinaryAsset {
    pub fn new(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Original file name as selected by the user.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// Payloads can be several megabytes; keep them out of logs.
impl std::fmt::Debug for BinaryAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinaryAsset")
            .field("name", &self.name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_omits_payload() {
        let asset = BinaryAsset::new("logo.png", vec![0u8; 4096]);
        let rendered = format!("{:?}", asset);
        assert_eq!(rendered, "BinaryAsset { name: \"logo.png\", len: 4096 }");
    }

    #[test]
    fn clone_shares_content() {
        let asset = BinaryAsset::new("a.gif", Bytes::from_static(b"GIF89a"));
        let copy = asset.clone();
        assert_eq!(copy.bytes().as_ptr(), asset.bytes().as_ptr());
        assert_eq!(copy.name(), "a.gif");
    }

    #[test]
    fn asset_kind_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&AssetKind::TargetImage).unwrap(),
            "\"target_image\""
        );
    }
}
