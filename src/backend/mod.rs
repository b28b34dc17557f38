//! Chat backend collaborator.
//!
//! The frontend never answers questions itself; it forwards conversations to
//! a retrieval-augmented chat API and renders whatever comes back. That API
//! sits behind the [`ChatBackend`] trait so handlers and tests never care
//! whether they are talking to the real service or a canned double.
//!
//! [`http::HttpChatBackend`] is the production implementation.

pub mod http;
pub mod types;

pub use http::HttpChatBackend;
pub use types::{AnswerContext, ChatAppResponse, ChatMessage, ContentFile, FeedbackReport, MessageRole};

use futures::Stream;
use std::pin::Pin;

use crate::events::AnswerEvent;

/// Stream of answer events from the backend.
pub type AnswerStream = Pin<Box<dyn Stream<Item = anyhow::Result<AnswerEvent>> + Send>>;

/// The retrieval-augmented chat API this frontend renders for.
#[async_trait::async_trait]
pub trait ChatBackend: Send + Sync {
    /// Ask a question and wait for the complete answer.
    async fn chat(
        &self,
        messages: &[ChatMessage],
        machine: Option<&str>,
    ) -> anyhow::Result<ChatAppResponse>;

    /// Ask a question and stream the answer as it is generated.
    async fn chat_stream(
        &self,
        messages: &[ChatMessage],
        machine: Option<&str>,
    ) -> anyhow::Result<AnswerStream>;

    /// Forward a user's rating of an answer.
    async fn submit_feedback(&self, report: &FeedbackReport) -> anyhow::Result<()>;

    /// Fetch a cited manual file by its citation identifier.
    async fn fetch_content(&self, identifier: &str) -> anyhow::Result<ContentFile>;
}
