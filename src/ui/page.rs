//! Document shell.

use crate::config::UiConfig;
use crate::ui::components::icons;
use crate::ui::escape;

/// Generate the HTML document wrapping a page body.
#[must_use]
pub fn html_shell(config: &UiConfig, content: &str) -> String {
    let title = escape::text(&config.title);
    let brand_icon = icons::sparkle("h-5 w-5 text-primary");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <meta name="description" content="Chat with your machine manuals">
    <title>{title}</title>

    <!-- HTMX and extensions (local) -->
    <script src="/static/vendor/htmx-2.0.8.min.js"></script>
    <script src="/static/vendor/htmx-sse.js"></script>

    <!-- Application bundle -->
    <script type="module" src="/static/main.js"></script>
    <link rel="stylesheet" href="/static/app.css">
</head>
<body class="app-body">
    <div id="app-shell" class="app-shell">
        <header class="app-header">
            <a href="/" class="app-brand">
                {brand_icon}
                <span>{title}</span>
            </a>
        </header>

        <main id="app" class="app-main">
            {content}
        </main>

        <footer class="app-footer">
            <p>AI-generated answers - always verify against the printed manual.</p>
        </footer>
    </div>
</body>
</html>"#,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_wraps_content() {
        let config = UiConfig::default();
        let html = html_shell(&config, "<p>hello</p>");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<p>hello</p>"));
        assert!(html.contains("Manual Assistant"));
        assert!(html.contains("htmx-sse.js"));
    }

    #[test]
    fn test_title_escaped() {
        let config = UiConfig {
            title: "A<B>".to_string(),
            ..UiConfig::default()
        };
        let html = html_shell(&config, "");
        assert!(html.contains("A&lt;B&gt;"));
        assert!(!html.contains("<title>A<B></title>"));
    }
}
