//! Conversation rendering.

use crate::session::ChatTurn;
use crate::ui::chat::answer::AnswerRenderer;
use crate::ui::components::icons;
use crate::ui::escape;

/// Render a user question bubble.
#[must_use]
pub fn user_message(question: &str) -> String {
    format!(
        r#"<div class="user-message">{}</div>"#,
        escape::text(question)
    )
}

/// Render the placeholder for an answer that is still streaming in.
///
/// The wrapper subscribes to the turn's SSE stream; every `message` event
/// replaces its inner content with a freshly rendered answer snapshot and
/// the `done` event closes the connection.
#[must_use]
pub fn pending_answer(session_id: &str, index: usize) -> String {
    format!(
        r#"<div class="answer-stream" hx-ext="sse" sse-connect="/chat/stream/{session}/{index}" sse-swap="message" sse-close="done"><div class="answer answer-pending" id="answer-{index}">{spinner}</div></div>"#,
        session = escape::attr(session_id),
        spinner = icons::spinner("h-5 w-5"),
    )
}

/// Render one turn: the question plus whatever state its answer is in.
#[must_use]
pub fn turn_fragment(renderer: &AnswerRenderer<'_>, index: usize, turn: &ChatTurn) -> String {
    let answer = match &turn.answer {
        Some(response) => renderer.render(index, response, &turn.feedback, false),
        None => pending_answer(renderer.session_id, index),
    };
    format!("{}{answer}", user_message(&turn.question))
}

/// Render the whole conversation.
#[must_use]
pub fn message_list(renderer: &AnswerRenderer<'_>, turns: &[ChatTurn]) -> String {
    let mut html = String::new();
    for (index, turn) in turns.iter().enumerate() {
        html.push_str(&turn_fragment(renderer, index, turn));
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answer::sanitize::AmmoniaSanitizer;
    use crate::backend::types::ChatAppResponse;
    use crate::session::Feedback;

    fn resolve(id: &str) -> String {
        format!("/content/{id}")
    }

    #[test]
    fn test_user_message_escaped() {
        assert_eq!(
            user_message("is 5 < 7?"),
            r#"<div class="user-message">is 5 &lt; 7?</div>"#
        );
    }

    #[test]
    fn test_pending_answer_subscribes_to_stream() {
        let html = pending_answer("s-1", 2);
        assert!(html.contains(r#"sse-connect="/chat/stream/s-1/2""#));
        assert!(html.contains(r#"sse-swap="message""#));
        assert!(html.contains(r#"sse-close="done""#));
    }

    #[test]
    fn test_turn_with_answer_renders_inline() {
        let sanitizer = AmmoniaSanitizer::new();
        let renderer = AnswerRenderer {
            session_id: "s-1",
            resolver: &resolve,
            sanitizer: &sanitizer,
            show_followup_questions: true,
        };
        let turn = ChatTurn {
            question: "How?".to_string(),
            answer: Some(ChatAppResponse {
                content: "Like this [doc1].".to_string(),
                ..ChatAppResponse::default()
            }),
            feedback: Feedback::default(),
        };

        let html = message_list(&renderer, std::slice::from_ref(&turn));
        assert!(html.contains("user-message"));
        assert!(html.contains("<sup>1</sup>"));
        assert!(!html.contains("sse-connect"));
    }
}
