//! Example prompt list.
//!
//! Canned prompts shown on an empty conversation. Each entry is a small form
//! whose button submits the example's value as the chat message - one
//! activation, one submission, value passed through unmodified.

use crate::config::ExamplePrompt;
use crate::ui::escape;

/// Render one example prompt.
#[must_use]
pub fn example(prompt: &ExamplePrompt) -> String {
    format!(
        r##"<li class="example"><form hx-post="/chat" hx-target="#chat-messages" hx-swap="beforeend" hx-include="#chat-session"><button class="example-button" name="message" value="{value}"><p class="example-text">{text}</p></button></form></li>"##,
        value = escape::attr(&prompt.value),
        text = escape::text(&prompt.text),
    )
}

/// Render the example list.
#[must_use]
pub fn example_list(prompts: &[ExamplePrompt]) -> String {
    let mut html = r#"<ul class="examples-nav-list" id="example-list">"#.to_string();
    for prompt in prompts {
        html.push_str(&example(prompt));
    }
    html.push_str("</ul>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_submits_exact_value() {
        let prompt = ExamplePrompt {
            text: "Lubricate the linear unit".to_string(),
            value: "Describe the steps to lubricate the linear unit".to_string(),
        };
        let html = example(&prompt);
        assert!(html.contains(r#"value="Describe the steps to lubricate the linear unit""#));
        assert!(html.contains("Lubricate the linear unit</p>"));
        assert!(html.contains(r#"hx-post="/chat""#));
    }

    #[test]
    fn test_example_value_escaped() {
        let prompt = ExamplePrompt {
            text: "x".to_string(),
            value: r#"a"b"#.to_string(),
        };
        assert!(example(&prompt).contains(r#"value="a&quot;b""#));
    }

    #[test]
    fn test_list_renders_all_examples() {
        let prompts = vec![
            ExamplePrompt {
                text: "one".to_string(),
                value: "one".to_string(),
            },
            ExamplePrompt {
                text: "two".to_string(),
                value: "two".to_string(),
            },
        ];
        let html = example_list(&prompts);
        assert_eq!(html.matches("<li").count(), 2);
        assert!(html.contains(r#"id="example-list""#));
    }
}
