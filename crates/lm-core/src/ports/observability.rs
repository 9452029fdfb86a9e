//! Trace metadata carried by host commands.
//!
//! Hosts may attach `{"_trace": {"trace_id": …, "timestamp": …}}` to any
//! command so log lines can be correlated with the UI event that caused them.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub const TRACE_FIELD: &str = "_trace";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceMetadata {
    pub trace_id: Uuid,
    /// Milliseconds since the Unix epoch, as stamped by the host.
    pub timestamp: u64,
}

pub type OptionalTrace = Option<TraceMetadata>;

#[derive(Debug, Error)]
pub enum TraceParseError {
    #[error("Failed to parse trace metadata: {0}")]
    InvalidTrace(String),
}

/// Removes the `_trace` field from a command object and parses it.
///
/// The field is stripped even when it fails to parse so the remaining
/// command can still be deserialized on its own.
pub fn take_trace(command: &mut serde_json::Value) -> Result<OptionalTrace, TraceParseError> {
    let trace_value = match command.as_object_mut().and_then(|o| o.remove(TRACE_FIELD)) {
        Some(value) => value,
        None => return Ok(None),
    };

    if trace_value.is_null() {
        return Ok(None);
    }

    serde_json::from_value(trace_value)
        .map(Some)
        .map_err(|err| TraceParseError::InvalidTrace(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn takes_trace_metadata_and_strips_field() {
        let mut command = json!({
            "command": "next_step",
            "_trace": {
                "trace_id": "a1b2c3d4-e5f6-7890-abcd-ef1234567890",
                "timestamp": 1737100000000u64
            }
        });

        let trace = take_trace(&mut command)
            .expect("trace metadata parse error")
            .expect("trace metadata missing");
        assert_eq!(
            trace.trace_id.to_string(),
            "a1b2c3d4-e5f6-7890-abcd-ef1234567890"
        );
        assert_eq!(trace.timestamp, 1737100000000u64);
        assert_eq!(command, json!({ "command": "next_step" }));
    }

    #[test]
    fn missing_or_null_trace_is_none() {
        let mut command = json!({ "command": "get_state" });
        assert!(take_trace(&mut command).unwrap().is_none());

        let mut command = json!({ "command": "get_state", "_trace": null });
        assert!(take_trace(&mut command).unwrap().is_none());
        assert!(command.get(TRACE_FIELD).is_none());
    }

    #[test]
    fn malformed_trace_is_reported_and_removed() {
        let mut command = json!({ "command": "get_state", "_trace": { "trace_id": 7 } });
        assert!(matches!(
            take_trace(&mut command),
            Err(TraceParseError::InvalidTrace(_))
        ));
        assert!(command.get(TRACE_FIELD).is_none());
    }
}
