//! Structured chain execution events for tracing and observability.
//!
//! Every pipe appended to a chain leaves one or more [`PipelineEvent`]s in
//! the chain's trace, which ends up on the configured
//! [`Pipeline`](crate::Pipeline).

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Events recorded while a chain executes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum PipelineEvent {
    /// A pipe is about to run.
    StepStart {
        /// Name of the pipe.
        step_name: String,
        /// The Rust type name of the input.
        input_type: String,
    },
    /// A pipe returned a value.
    StepEnd {
        /// Name of the pipe.
        step_name: String,
        /// Duration of execution in milliseconds.
        duration_ms: u128,
    },
    /// A same-type pipe failed and the previous value was carried forward.
    Recovered {
        /// Name of the pipe.
        step_name: String,
        /// The logged error message.
        message: String,
    },
    /// A pipe was not run because the chain had already failed.
    Skipped {
        /// Name of the pipe.
        step_name: String,
    },
    /// A pipe failed and the chain became a failure.
    Error {
        /// Name of the pipe.
        step_name: String,
        /// Error message describing what went wrong.
        message: String,
    },
    /// The chain's final type did not match the pipeline's declared type.
    Rejected {
        /// Name of the chain's final type.
        actual_type: String,
        /// Name of the declared type.
        expected_type: String,
    },
}

/// A timestamped trace entry containing a pipeline event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEntry {
    /// Unix epoch timestamp in milliseconds when this event occurred.
    pub timestamp: u128,
    /// The event that was recorded.
    #[serde(flatten)]
    pub event: PipelineEvent,
}

impl TraceEntry {
    /// Create a new trace entry with the current timestamp.
    #[must_use]
    pub fn new(event: PipelineEvent) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis())
            .unwrap_or_default();
        Self { timestamp, event }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_entry_serialization() {
        let entry = TraceEntry::new(PipelineEvent::StepStart {
            step_name: "Parse".to_string(),
            input_type: "alloc::string::String".to_string(),
        });

        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"type\":\"StepStart\""));
        assert!(json.contains("\"step_name\":\"Parse\""));
        assert!(json.contains("\"timestamp\":"));
    }

    #[test]
    fn test_rejected_event() {
        let event = PipelineEvent::Rejected {
            actual_type: "i32".to_string(),
            expected_type: "bool".to_string(),
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"Rejected\""));
        assert!(json.contains("\"actual_type\":\"i32\""));
    }
}
