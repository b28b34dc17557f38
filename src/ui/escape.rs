//! Minimal HTML escaping for fragment builders.
//!
//! Every dynamic value a builder interpolates goes through one of these.
//! Answer bodies are the exception: they carry parser-generated markup and
//! are scrubbed by the sanitizer collaborator instead.

/// Escape text for an HTML text node.
#[must_use]
pub fn text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape text for a double-quoted HTML attribute value.
#[must_use]
pub fn attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_escapes_markup() {
        assert_eq!(text("a <b> & c"), "a &lt;b&gt; &amp; c");
    }

    #[test]
    fn test_attr_escapes_quotes() {
        assert_eq!(attr(r#"x" onmouseover="y"#), "x&quot; onmouseover=&quot;y");
        assert_eq!(attr("it's"), "it&#39;s");
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(text("tighten to 12 Nm"), "tighten to 12 Nm");
    }
}
