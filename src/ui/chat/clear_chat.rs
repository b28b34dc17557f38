//! Clear-chat control.

use crate::ui::components::icons;
use crate::ui::components::{ButtonSize, ButtonVariant, button};

/// Render the clear-chat button. Disabled while there is nothing to clear.
#[must_use]
pub fn clear_chat_button(disabled: bool) -> String {
    let disabled = if disabled { "disabled" } else { "" };
    let attrs = format!(
        r##"hx-post="/chat/clear" hx-include="#chat-session" hx-target="#chat-shell" hx-swap="outerHTML" hx-confirm="Clear the whole conversation?" {disabled}"##
    );

    format!(
        r#"<div class="clear-chat-container" id="clear-chat">{button}</div>"#,
        button = button(
            ButtonVariant::Secondary,
            ButtonSize::Md,
            &attrs,
            &format!("{} Clear chat", icons::trash("h-4 w-4")),
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enabled_button_posts_clear() {
        let html = clear_chat_button(false);
        assert!(html.contains(r#"hx-post="/chat/clear""#));
        assert!(!html.contains("disabled"));
    }

    #[test]
    fn test_disabled_when_empty() {
        assert!(clear_chat_button(true).contains("disabled"));
    }
}
