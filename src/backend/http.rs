//! HTTP implementation of the chat backend contract.
//!
//! Streaming answers arrive as Server-Sent Events: the response body is
//! buffered, split on blank-line frame boundaries and each `data:` line is
//! decoded as one [`AnswerEvent`] JSON payload.

use std::time::Duration;

use futures::StreamExt;
use tracing::debug;

use super::types::{ChatAppResponse, ChatMessage, ContentFile, FeedbackReport};
use super::{AnswerStream, ChatBackend};
use crate::answer::paths::{ContentPathResolver, PathResolver};
use crate::config::BackendConfig;
use crate::events::AnswerEvent;

/// Errors from the backend HTTP contract.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// Transport-level failure.
    #[error("backend request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status from the backend.
    #[error("backend returned {status} for {endpoint}")]
    Status {
        status: reqwest::StatusCode,
        endpoint: String,
    },

    /// A `data:` payload did not decode as an answer event.
    #[error("backend sent malformed event payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Chat backend reached over HTTP.
#[derive(Clone)]
pub struct HttpChatBackend {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    /// Applied per request, not on the client: an SSE stream may legitimately
    /// outlive any single-request budget.
    timeout: Duration,
    content: ContentPathResolver,
}

impl std::fmt::Debug for HttpChatBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpChatBackend")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl HttpChatBackend {
    /// Create a backend client from configuration.
    #[must_use]
    pub fn new(config: &BackendConfig) -> Self {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();
        let base_url = config.base_url.trim_end_matches('/').to_string();
        let content = ContentPathResolver::new(format!("{base_url}/content"));

        Self {
            http,
            base_url,
            api_key: config.api_key.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            content,
        }
    }

    fn chat_request(
        &self,
        messages: &[ChatMessage],
        machine: Option<&str>,
        stream: bool,
    ) -> reqwest::RequestBuilder {
        let body = serde_json::json!({
            "messages": messages,
            "machine": machine,
            "stream": stream,
        });

        let mut rb = self.http.post(format!("{}/chat", self.base_url)).json(&body);
        if let Some(key) = &self.api_key {
            rb = rb.bearer_auth(key);
        }
        rb
    }
}

#[async_trait::async_trait]
impl ChatBackend for HttpChatBackend {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        machine: Option<&str>,
    ) -> anyhow::Result<ChatAppResponse> {
        let resp = self
            .chat_request(messages, machine, false)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(BackendError::Http)?
            .error_for_status()
            .map_err(BackendError::Http)?;

        Ok(resp.json::<ChatAppResponse>().await.map_err(BackendError::Http)?)
    }

    async fn chat_stream(
        &self,
        messages: &[ChatMessage],
        machine: Option<&str>,
    ) -> anyhow::Result<AnswerStream> {
        let resp = self
            .chat_request(messages, machine, true)
            .send()
            .await
            .map_err(BackendError::Http)?
            .error_for_status()
            .map_err(BackendError::Http)?;

        let byte_stream = resp.bytes_stream();

        let out = async_stream::try_stream! {
            let mut buf = Vec::<u8>::new();

            futures::pin_mut!(byte_stream);
            while let Some(chunk) = byte_stream.next().await {
                let chunk = chunk.map_err(BackendError::Http)?;
                buf.extend_from_slice(&chunk);

                while let Some(pos) = find_double_newline(&buf) {
                    let frame = buf.drain(..pos + 2).collect::<Vec<_>>();
                    let text = String::from_utf8_lossy(&frame);

                    for line in text.lines() {
                        let line = line.trim();
                        if !line.starts_with("data:") {
                            continue;
                        }
                        let data = line.trim_start_matches("data:").trim();
                        if data.is_empty() {
                            continue;
                        }

                        let event: AnswerEvent =
                            serde_json::from_str(data).map_err(BackendError::Decode)?;
                        let done = matches!(event, AnswerEvent::Done);
                        yield event;
                        if done {
                            return;
                        }
                    }
                }
            }
        };

        Ok(Box::pin(out))
    }

    async fn submit_feedback(&self, report: &FeedbackReport) -> anyhow::Result<()> {
        let endpoint = format!("{}/feedback", self.base_url);
        let mut rb = self.http.post(&endpoint).json(report).timeout(self.timeout);
        if let Some(key) = &self.api_key {
            rb = rb.bearer_auth(key);
        }

        let resp = rb.send().await.map_err(BackendError::Http)?;
        if !resp.status().is_success() {
            return Err(BackendError::Status {
                status: resp.status(),
                endpoint,
            }
            .into());
        }

        debug!(
            answer_index = report.answer_index,
            rating = %report.rating,
            "feedback forwarded"
        );
        Ok(())
    }

    async fn fetch_content(&self, identifier: &str) -> anyhow::Result<ContentFile> {
        let endpoint = self.content.resolve(identifier);
        let mut rb = self.http.get(&endpoint).timeout(self.timeout);
        if let Some(key) = &self.api_key {
            rb = rb.bearer_auth(key);
        }

        let resp = rb.send().await.map_err(BackendError::Http)?;
        if !resp.status().is_success() {
            return Err(BackendError::Status {
                status: resp.status(),
                endpoint,
            }
            .into());
        }

        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);
        let bytes = resp.bytes().await.map_err(BackendError::Http)?.to_vec();

        Ok(ContentFile {
            bytes,
            content_type,
        })
    }
}

/// Find the position of a double newline in the buffer.
fn find_double_newline(buf: &[u8]) -> Option<usize> {
    buf.windows(2).position(|w| w == b"\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_double_newline() {
        assert_eq!(find_double_newline(b"data: {}\n\nrest"), Some(8));
        assert_eq!(find_double_newline(b"data: {}"), None);
    }

    #[test]
    fn test_base_url_trailing_slash_normalized() {
        let backend = HttpChatBackend::new(&crate::config::BackendConfig {
            base_url: "http://backend:8000/".to_string(),
            api_key: None,
            timeout_secs: 5,
            streaming: true,
        });
        assert_eq!(backend.base_url, "http://backend:8000");
    }
}
