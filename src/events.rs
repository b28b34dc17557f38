//! Streamed answer events.
//!
//! The chat backend streams answers as a sequence of typed events: text
//! deltas, one context payload carrying citations/thoughts/follow-ups, and a
//! terminal done or error marker. The same model is used when re-emitting
//! progress to the browser.
//!
//! # Example
//!
//! ```rust
//! use manualchat::events::{AnswerEvent, sse_event};
//!
//! let event = AnswerEvent::Delta { text: "Hello".to_string() };
//! let sse = sse_event(&event);
//! assert!(sse.contains("answer.delta"));
//! ```

use serde::{Deserialize, Serialize};

use crate::backend::types::AnswerContext;

/// Events emitted while an answer is being generated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "data")]
pub enum AnswerEvent {
    /// Incremental text delta of the answer body.
    #[serde(rename = "answer.delta")]
    Delta {
        /// The text fragment to append.
        text: String,
    },

    /// Structured context for the finished answer (data points, thoughts,
    /// follow-up questions). Sent once, typically just before `Done`.
    #[serde(rename = "answer.context")]
    Context(AnswerContext),

    /// An error occurred while generating the answer.
    #[serde(rename = "error")]
    Error {
        /// Error message.
        message: String,
    },

    /// The answer is complete.
    #[serde(rename = "done")]
    Done,
}

/// Convert an [`AnswerEvent`] to an SSE-formatted string.
///
/// The output follows the Server-Sent Events specification with both an
/// `event:` line (for `EventSource` listeners) and a `data:` line containing
/// the JSON payload.
pub fn sse_event(evt: &AnswerEvent) -> String {
    let json = serde_json::to_string(evt).unwrap_or_else(|e| {
        serde_json::json!({ "type": "error", "data": { "message": e.to_string() } }).to_string()
    });

    format!("event: {}\ndata: {json}\n\n", event_name(evt))
}

/// Get the SSE event name for an [`AnswerEvent`].
#[must_use]
pub fn event_name(evt: &AnswerEvent) -> &'static str {
    match evt {
        AnswerEvent::Delta { .. } => "answer.delta",
        AnswerEvent::Context(_) => "answer.context",
        AnswerEvent::Error { .. } => "error",
        AnswerEvent::Done => "done",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_serialization() {
        let event = AnswerEvent::Delta {
            text: "Hello".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("answer.delta"));
        assert!(json.contains("Hello"));
    }

    #[test]
    fn test_context_round_trip() {
        let event = AnswerEvent::Context(AnswerContext {
            data_points: vec!["manual.pdf#3: torque values".to_string()],
            thoughts: Some("searched torque tables".to_string()),
            followup_questions: vec!["Which wrench size?".to_string()],
        });
        let json = serde_json::to_string(&event).unwrap();
        let back: AnswerEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_sse_event_format() {
        let sse = sse_event(&AnswerEvent::Done);
        assert!(sse.starts_with("event: done\n"));
        assert!(sse.contains("data: "));
        assert!(sse.ends_with("\n\n"));
    }
}
