//! Analysis panel.
//!
//! Side panel showing what stands behind an answer: the model's thought
//! process on one tab, the retrieved supporting content on the other.

use crate::backend::types::AnswerContext;
use crate::ui::chat::loading_overlay::loading_overlay;
use crate::ui::escape;

/// Which analysis tab is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisTab {
    /// The model's reasoning trace.
    #[default]
    Thoughts,
    /// Retrieved source snippets.
    Content,
}

/// Render the analysis panel for one answer.
#[must_use]
pub fn analysis_panel(
    session_id: &str,
    index: usize,
    context: &AnswerContext,
    tab: AnalysisTab,
) -> String {
    let session = escape::attr(session_id);
    let tab_link = |target: AnalysisTab, label: &str| {
        let name = match target {
            AnalysisTab::Thoughts => "thoughts",
            AnalysisTab::Content => "content",
        };
        let active = if tab == target { "tab-active" } else { "" };
        format!(
            r##"<button class="analysis-tab {active}" hx-get="/analysis/{session}/{index}?tab={name}" hx-target="#analysis-panel" hx-swap="innerHTML">{label}</button>"##
        )
    };

    let body = match tab {
        AnalysisTab::Thoughts => thoughts_body(context),
        AnalysisTab::Content => content_body(context),
    };

    format!(
        r#"<div class="analysis">{overlay}<div class="analysis-tabs">{thoughts}{content}</div><div class="analysis-body">{body}</div></div>"#,
        overlay = loading_overlay("Loading manual"),
        thoughts = tab_link(AnalysisTab::Thoughts, "Thought process"),
        content = tab_link(AnalysisTab::Content, "Supporting content"),
    )
}

fn thoughts_body(context: &AnswerContext) -> String {
    match &context.thoughts {
        Some(thoughts) => format!(
            r#"<div class="analysis-thoughts">{}</div>"#,
            escape::text(thoughts)
        ),
        None => r#"<p class="analysis-empty">No thought process recorded.</p>"#.to_string(),
    }
}

fn content_body(context: &AnswerContext) -> String {
    if context.data_points.is_empty() {
        return r#"<p class="analysis-empty">No supporting content.</p>"#.to_string();
    }

    let mut html = r#"<ul class="analysis-data-points">"#.to_string();
    for point in &context.data_points {
        html.push_str(&format!("<li>{}</li>", escape::text(point)));
    }
    html.push_str("</ul>");
    html
}
