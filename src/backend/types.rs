//! Wire types shared with the chat backend.

use serde::{Deserialize, Serialize};

/// Role of a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// A message in the conversation sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Structured context accompanying an answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerContext {
    /// Retrieved source snippets backing the answer.
    #[serde(default)]
    pub data_points: Vec<String>,
    /// The model's reasoning trace, when the backend exposes one.
    #[serde(default)]
    pub thoughts: Option<String>,
    /// Suggested next questions.
    #[serde(default)]
    pub followup_questions: Vec<String>,
}

/// A complete answer from the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatAppResponse {
    /// Raw answer text, citation markers included.
    pub content: String,
    /// Structured context for the answer.
    #[serde(default)]
    pub context: AnswerContext,
}

/// User verdict on an answer, forwarded to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackReport {
    /// Session the rated answer belongs to.
    pub session_id: String,
    /// Zero-based index of the rated answer within the session.
    pub answer_index: usize,
    /// `good` or `bad`.
    pub rating: String,
    /// Free-text comment, possibly empty.
    pub comment: String,
    /// The question that produced the rated answer.
    pub question: String,
}

/// A cited manual file fetched from the backend.
#[derive(Debug, Clone)]
pub struct ContentFile {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&ChatMessage::user("hi")).unwrap();
        assert!(json.contains(r#""role":"user""#));
    }

    #[test]
    fn test_response_defaults_missing_context() {
        let response: ChatAppResponse = serde_json::from_str(r#"{"content":"x"}"#).unwrap();
        assert_eq!(response.content, "x");
        assert!(response.context.data_points.is_empty());
        assert!(response.context.thoughts.is_none());
    }
}
