//! Identifier newtypes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier returned by the record store for a stored logo request.
///
/// 记录存储返回的请求标识。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Fresh random id for a new record.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_id_new_is_unique() {
        assert_ne!(RecordId::new(), RecordId::new());
    }

    #[test]
    fn record_id_serializes_as_plain_string() {
        let id = RecordId::from("rec-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"rec-1\"");
        assert_eq!(id.to_string(), "rec-1");
        assert_eq!(id.as_str(), "rec-1");
    }
}
