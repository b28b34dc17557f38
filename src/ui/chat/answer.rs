//! Assistant answer rendering.
//!
//! Composes one assistant response into an interactive fragment: the parsed
//! citation markup, the numbered source list, follow-up question chips and
//! the feedback controls. Re-rendered wholesale on every streamed update;
//! the feedback subtree is also swapped on its own by the rating endpoints.

use crate::answer::parse_answer_to_html;
use crate::answer::paths::PathResolver;
use crate::answer::sanitize::HtmlSanitizer;
use crate::backend::types::ChatAppResponse;
use crate::session::{Feedback, FeedbackPhase, Rating};
use crate::ui::components::icons;
use crate::ui::components::{ButtonSize, ButtonVariant, button};
use crate::ui::escape;

/// Renders assistant answers with their collaborator seams plugged in.
pub struct AnswerRenderer<'a> {
    /// Session the rendered answers belong to.
    pub session_id: &'a str,
    /// Resolver for citation identifiers.
    pub resolver: &'a dyn PathResolver,
    /// Sanitizer applied to the parsed answer markup.
    pub sanitizer: &'a dyn HtmlSanitizer,
    /// Whether follow-up question chips are rendered.
    pub show_followup_questions: bool,
}

impl std::fmt::Debug for AnswerRenderer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnswerRenderer")
            .field("session_id", &self.session_id)
            .finish()
    }
}

impl AnswerRenderer<'_> {
    /// Render a complete answer.
    #[must_use]
    pub fn render(
        &self,
        index: usize,
        response: &ChatAppResponse,
        feedback: &Feedback,
        streaming: bool,
    ) -> String {
        let parsed = parse_answer_to_html(&response.content, streaming, self.resolver);
        let body = self.sanitizer.sanitize(&parsed.html);

        let mut html = format!(r#"<div class="answer" id="answer-{index}">"#);
        html.push_str(&self.header(index, response));
        html.push_str(&format!(r#"<div class="answer-text">{body}</div>"#));
        html.push_str(&self.citation_list(&parsed.citations));
        if !streaming {
            html.push_str(&self.followup_list(&response.context.followup_questions));
            html.push_str(&self.feedback_fragment(index, response, feedback));
        }
        html.push_str("</div>");
        html
    }

    /// Render a streaming snapshot of an answer that is still arriving.
    ///
    /// The parser runs in streaming mode so a half-typed citation marker is
    /// held back; feedback controls stay hidden until the answer settles.
    #[must_use]
    pub fn render_streaming(&self, index: usize, text: &str) -> String {
        let response = ChatAppResponse {
            content: text.to_string(),
            ..ChatAppResponse::default()
        };
        self.render(index, &response, &Feedback::default(), true)
    }

    fn header(&self, index: usize, response: &ChatAppResponse) -> String {
        let thoughts_disabled = if response.context.thoughts.is_none() {
            "disabled"
        } else {
            ""
        };
        let content_disabled = if response.context.data_points.is_empty() {
            "disabled"
        } else {
            ""
        };
        let session = escape::attr(self.session_id);

        let thoughts_button = button(
            ButtonVariant::Ghost,
            ButtonSize::Icon,
            &format!(
                r##"title="Show thought process" aria-label="Show thought process" hx-get="/analysis/{session}/{index}?tab=thoughts" hx-target="#analysis-panel" hx-swap="innerHTML" {thoughts_disabled}"##
            ),
            &icons::lightbulb("h-4 w-4"),
        );
        let content_button = button(
            ButtonVariant::Ghost,
            ButtonSize::Icon,
            &format!(
                r##"title="Show supporting content" aria-label="Show supporting content" hx-get="/analysis/{session}/{index}?tab=content" hx-target="#analysis-panel" hx-swap="innerHTML" {content_disabled}"##
            ),
            &icons::clipboard_list("h-4 w-4"),
        );

        format!(
            r#"<div class="answer-header">{sparkle}<div class="answer-actions">{thoughts_button}{content_button}</div></div>"#,
            sparkle = icons::sparkle("h-6 w-6 answer-icon"),
        )
    }

    fn citation_list(&self, citations: &[String]) -> String {
        if citations.is_empty() {
            return String::new();
        }

        let mut html = r#"<div class="answer-citations"><span class="citation-learn-more">Source:</span>"#.to_string();
        for (i, citation) in citations.iter().enumerate() {
            let mut parts = citation.split('|').map(str::trim);
            let identifier = parts.next().unwrap_or_default();
            let label = match parts.next() {
                Some(label) if !label.is_empty() => label,
                _ => identifier,
            };
            let path = self.resolver.resolve(identifier);

            html.push_str(&format!(
                r#"<a class="citation" title="{title}" href="{href}">{n}. {text}</a>"#,
                title = escape::attr(label),
                href = escape::attr(&path),
                n = i + 1,
                text = escape::text(label),
            ));
        }
        html.push_str("</div>");
        html
    }

    fn followup_list(&self, questions: &[String]) -> String {
        if questions.is_empty() || !self.show_followup_questions {
            return String::new();
        }

        let mut html = r#"<div class="answer-followups"><span class="followup-learn-more">Follow-up questions:</span>"#
            .to_string();
        for question in questions {
            let value = escape::attr(question);
            html.push_str(&format!(
                r##"<form class="followup-form" hx-post="/chat" hx-target="#chat-messages" hx-swap="beforeend" hx-include="#chat-session"><button class="followup-question" name="message" value="{value}" title="{value}">{text}</button></form>"##,
                text = escape::text(question),
            ));
        }
        html.push_str("</div>");
        html
    }

    /// The feedback subtree for one answer, swapped on its own by the
    /// rating and comment endpoints.
    #[must_use]
    pub fn feedback_fragment(
        &self,
        index: usize,
        response: &ChatAppResponse,
        feedback: &Feedback,
    ) -> String {
        let mut html = format!(r#"<div class="answer-feedback" id="feedback-{index}">"#);

        if feedback.is_submitted() {
            html.push_str(r#"<div class="answer-text">Thank you for your feedback!</div>"#);
            html.push_str("</div>");
            return html;
        }

        html.push_str(&self.rating_buttons(index, response, feedback));
        if let FeedbackPhase::Rated(rating) = feedback.phase {
            html.push_str(&self.comment_form(index, rating, &feedback.comment));
        }
        html.push_str("</div>");
        html
    }

    fn rating_buttons(&self, index: usize, response: &ChatAppResponse, feedback: &Feedback) -> String {
        let render_button = |rating: Rating, title: &str, icon: String, disabled: bool| {
            let active = if feedback.rating() == Some(rating) {
                format!("rating-active rating-{}", rating.as_str())
            } else {
                String::new()
            };
            let disabled = if disabled { "disabled" } else { "" };
            format!(
                r##"<button class="btn btn-ghost btn-icon {active}" title="{title}" aria-label="{title}" hx-post="/chat/answers/{index}/rating" hx-vals='{{"rating":"{value}"}}' hx-include="#chat-session" hx-target="#feedback-{index}" hx-swap="outerHTML" {disabled}>{icon}</button>"##,
                value = rating.as_str(),
            )
        };

        format!(
            r#"<div class="rating-buttons">{up}{down}</div>"#,
            up = render_button(
                Rating::Good,
                "Approve answer",
                icons::thumbs_up("h-4 w-4"),
                response.context.thoughts.is_none(),
            ),
            down = render_button(
                Rating::Bad,
                "Reject answer",
                icons::thumbs_down("h-4 w-4"),
                response.context.data_points.is_empty(),
            ),
        )
    }

    fn comment_form(&self, index: usize, rating: Rating, comment: &str) -> String {
        format!(
            r##"<form class="feedback-form feedback-{kind}" hx-post="/chat/answers/{index}/feedback" hx-include="#chat-session" hx-target="#feedback-{index}" hx-swap="outerHTML"><textarea class="feedback-field" name="comment" placeholder="Enter optional feedback">{comment}</textarea>{submit}</form>"##,
            kind = rating.as_str(),
            comment = escape::text(comment),
            submit = button(
                ButtonVariant::Primary,
                ButtonSize::Icon,
                r#"type="submit" title="Send feedback" aria-label="Send feedback""#,
                &icons::send("h-5 w-5"),
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answer::sanitize::AmmoniaSanitizer;
    use crate::backend::types::AnswerContext;

    fn resolve(id: &str) -> String {
        format!("/content/{id}")
    }

    fn renderer<'a>(sanitizer: &'a AmmoniaSanitizer, resolver: &'a dyn PathResolver) -> AnswerRenderer<'a> {
        AnswerRenderer {
            session_id: "s-1",
            resolver,
            sanitizer,
            show_followup_questions: true,
        }
    }

    fn response() -> ChatAppResponse {
        ChatAppResponse {
            content: "Replace the switch [csu.pdf#2|CSU manual] then test [csu.pdf#2|CSU manual].".to_string(),
            context: AnswerContext {
                data_points: vec!["csu.pdf#2: inductive switch".to_string()],
                thoughts: Some("looked up CSU frame".to_string()),
                followup_questions: vec!["How do I test the switch?".to_string()],
            },
        }
    }

    #[test]
    fn test_full_answer_fragment() {
        let sanitizer = AmmoniaSanitizer::new();
        let html = renderer(&sanitizer, &resolve).render(0, &response(), &Feedback::default(), false);

        assert!(html.contains(r#"id="answer-0""#));
        // Duplicate citation shares index 1; no second index exists.
        assert!(html.contains("<sup>1</sup>"));
        assert!(!html.contains("<sup>2</sup>"));
        // Source list uses the label half of the token.
        assert!(html.contains("Source:"));
        assert!(html.contains("1. CSU manual"));
        assert!(html.contains("/content/csu.pdf#2"));
        // Follow-ups and feedback controls are present on a settled answer.
        assert!(html.contains("Follow-up questions:"));
        assert!(html.contains("How do I test the switch?"));
        assert!(html.contains("rating-buttons"));
    }

    #[test]
    fn test_streaming_hides_feedback_and_followups() {
        let sanitizer = AmmoniaSanitizer::new();
        let html = renderer(&sanitizer, &resolve).render_streaming(3, "Partial fact [csu");

        assert!(html.contains(r#"id="answer-3""#));
        // The half-typed citation is held back.
        assert!(html.contains("Partial fact"));
        assert!(!html.contains("csu"));
        assert!(!html.contains("rating-buttons"));
        assert!(!html.contains("Follow-up questions:"));
    }

    #[test]
    fn test_hostile_answer_markup_sanitized() {
        let sanitizer = AmmoniaSanitizer::new();
        let response = ChatAppResponse {
            content: "Do this<script>alert(1)</script> [doc1]".to_string(),
            ..ChatAppResponse::default()
        };
        let html = renderer(&sanitizer, &resolve).render(0, &response, &Feedback::default(), false);

        assert!(!html.contains("<script>"));
        assert!(html.contains("<sup>1</sup>"));
    }

    #[test]
    fn test_disabled_action_buttons_without_context() {
        let sanitizer = AmmoniaSanitizer::new();
        let bare = ChatAppResponse {
            content: "answer".to_string(),
            ..ChatAppResponse::default()
        };
        let html = renderer(&sanitizer, &resolve).render(0, &bare, &Feedback::default(), false);

        // Both analysis buttons and both rating buttons end up disabled.
        assert_eq!(html.matches("disabled").count(), 4);
    }

    #[test]
    fn test_feedback_fragment_states() {
        let sanitizer = AmmoniaSanitizer::new();
        let renderer = renderer(&sanitizer, &resolve);
        let response = response();

        let idle = renderer.feedback_fragment(1, &response, &Feedback::default());
        assert!(idle.contains("rating-buttons"));
        assert!(!idle.contains("feedback-form"));

        let mut rated = Feedback::default();
        rated.toggle_rating(Rating::Bad);
        rated.set_comment("wrong torque value");
        let open = renderer.feedback_fragment(1, &response, &rated);
        assert!(open.contains("rating-active rating-bad"));
        assert!(open.contains("feedback-bad"));
        assert!(open.contains("wrong torque value"));

        rated.submit().unwrap();
        let done = renderer.feedback_fragment(1, &response, &rated);
        assert!(done.contains("Thank you for your feedback!"));
        assert!(!done.contains("rating-buttons"));
    }
}
