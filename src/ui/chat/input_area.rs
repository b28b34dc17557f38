//! Chat message input area.

use crate::ui::components::icons;
use crate::ui::components::{ButtonSize, ButtonVariant, button};

/// Render the message input form.
#[must_use]
pub fn input_area() -> String {
    let send_button = button(
        ButtonVariant::Primary,
        ButtonSize::Icon,
        r#"type="submit" title="Send question" aria-label="Send question""#,
        &icons::send("h-5 w-5"),
    );

    format!(
        r##"<div class="chat-input-area"><form class="chat-input-form" hx-post="/chat" hx-target="#chat-messages" hx-swap="beforeend" hx-include="#chat-session" hx-on--after-request="if(event.detail.successful) this.reset()"><textarea class="chat-input" name="message" placeholder="Ask about your machine (e.g. how to change the inductive switch)" rows="1" required></textarea>{send_button}</form><p class="chat-input-hint">Press Enter to send, Shift+Enter for new line</p></div>"##
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_posts_to_chat() {
        let html = input_area();
        assert!(html.contains(r#"hx-post="/chat""#));
        assert!(html.contains(r##"hx-target="#chat-messages""##));
        assert!(html.contains(r#"name="message""#));
        assert!(html.contains("required"));
    }
}
