//! Chat shell layout.
//!
//! The complete chat interface: machine sidebar, example prompts for an
//! empty conversation, the message list, the input area and the analysis
//! panel target. The clear-chat endpoint re-renders this whole fragment.

use crate::config::UiConfig;
use crate::session::{ChatTurn, Session};
use crate::ui::chat::answer::AnswerRenderer;
use crate::ui::chat::clear_chat::clear_chat_button;
use crate::ui::chat::example::example_list;
use crate::ui::chat::input_area::input_area;
use crate::ui::chat::machine_select::machine_select;
use crate::ui::chat::message_list::message_list;
use crate::ui::escape;

/// Render the chat shell for a session snapshot.
#[must_use]
pub fn chat_shell(
    renderer: &AnswerRenderer<'_>,
    config: &UiConfig,
    turns: &[ChatTurn],
    machine: Option<&str>,
) -> String {
    let examples = if turns.is_empty() {
        format!(
            r#"<div class="chat-empty"><h2>Ask anything about your machine</h2>{}</div>"#,
            example_list(&config.examples),
        )
    } else {
        String::new()
    };

    format!(
        r#"<div id="chat-shell" class="chat-shell"><input type="hidden" id="chat-session" name="session_id" value="{session}"><aside class="chat-sidebar">{machines}{clear}</aside><section class="chat-column">{examples}<div id="chat-messages" class="chat-messages">{messages}</div>{input}<div id="analysis-panel" class="analysis-panel"></div></section></div>"#,
        session = escape::attr(renderer.session_id),
        machines = machine_select(&config.machines, machine),
        clear = clear_chat_button(turns.is_empty()),
        messages = message_list(renderer, turns),
        input = input_area(),
    )
}

/// Convenience wrapper rendering the shell straight from a session.
#[must_use]
pub fn chat_shell_for_session(
    renderer: &AnswerRenderer<'_>,
    config: &UiConfig,
    session: &Session,
) -> String {
    let turns = session.turns();
    let machine = session.machine();
    chat_shell(renderer, config, &turns, machine.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answer::sanitize::AmmoniaSanitizer;

    fn resolve(id: &str) -> String {
        format!("/content/{id}")
    }

    #[test]
    fn test_empty_shell_shows_examples() {
        let sanitizer = AmmoniaSanitizer::new();
        let renderer = AnswerRenderer {
            session_id: "s-1",
            resolver: &resolve,
            sanitizer: &sanitizer,
            show_followup_questions: true,
        };
        let config = UiConfig::default();
        let html = chat_shell(&renderer, &config, &[], None);

        assert!(html.contains(r#"id="chat-shell""#));
        assert!(html.contains(r#"id="example-list""#));
        assert!(html.contains("Change Inductive Switch"));
        assert!(html.contains("TT3/2000"));
        // Nothing to clear yet.
        assert!(html.contains("disabled"));
        assert!(html.contains(r#"value="s-1""#));
    }

    #[test]
    fn test_non_empty_shell_hides_examples() {
        let sanitizer = AmmoniaSanitizer::new();
        let renderer = AnswerRenderer {
            session_id: "s-1",
            resolver: &resolve,
            sanitizer: &sanitizer,
            show_followup_questions: true,
        };
        let config = UiConfig::default();
        let turns = vec![ChatTurn {
            question: "q".to_string(),
            answer: None,
            feedback: crate::session::Feedback::default(),
        }];
        let html = chat_shell(&renderer, &config, &turns, None);

        assert!(!html.contains(r#"id="example-list""#));
        assert!(html.contains("sse-connect"));
    }
}
