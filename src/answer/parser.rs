//! Citation-aware answer parsing.
//!
//! Answer text arrives from the backend with bracketed citation markers
//! embedded in the prose, e.g. `"Tighten the bolt [manual.pdf#12]."`. This
//! module rewrites that text into HTML where every marker becomes a numbered
//! superscript link, and reports the cited sources in order of first
//! appearance.
//!
//! The parser is pure and cheap, so callers re-run it on every streamed
//! update of the same answer; the most recent input wins.
//!
//! # Example
//!
//! ```rust
//! use manualchat::answer::parse_answer_to_html;
//!
//! let resolver = |id: &str| format!("/content/{id}");
//! let parsed = parse_answer_to_html("See [doc1] and [doc2].", false, &resolver);
//! assert_eq!(parsed.citations, vec!["doc1", "doc2"]);
//! assert!(parsed.html.contains("<sup>1</sup>"));
//! ```

use crate::answer::paths::PathResolver;
use crate::ui::escape;

/// Result of rewriting one answer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedAnswer {
    /// HTML fragment. Literal answer text is passed through untouched, so the
    /// caller must sanitize before injecting into a page.
    pub html: String,
    /// Unique citation tokens in order of first appearance. The superscript
    /// index `i` in the markup refers to `citations[i - 1]`.
    pub citations: Vec<String>,
}

/// Rewrite raw answer text into citation-linked HTML.
///
/// Markers have the shape `[identifier]` or `[identifier|label]`. Repeats of
/// the same token (exact string match) share one index. With `streaming` set,
/// a trailing marker that has not been closed yet is cut off rather than
/// rendered half-typed.
///
/// Malformed brackets never fail; they degrade to literal text or to the
/// streaming cutoff.
pub fn parse_answer_to_html(
    text: &str,
    streaming: bool,
    resolver: &dyn PathResolver,
) -> ParsedAnswer {
    let mut citations: Vec<String> = Vec::new();
    let mut answer = text.trim();

    if streaming {
        answer = trim_incomplete_citation(answer);
    }

    let mut html = String::with_capacity(answer.len());
    let mut rest = answer;

    while let Some(marker) = next_marker(rest) {
        html.push_str(&rest[..marker.start]);
        html.push_str(&render_citation(marker.token, &mut citations, resolver));
        rest = &rest[marker.end..];
    }
    html.push_str(rest);

    ParsedAnswer { html, citations }
}

/// Cut off a citation that is still being typed.
///
/// Scanning backward from the end: a `]` before any `[` means the text ends
/// with a complete bracket, an unmatched `[` means the marker is mid-stream
/// and everything from it on is dropped. Plain text is left alone. Brackets
/// are ASCII, so the byte scan is UTF-8 safe.
fn trim_incomplete_citation(text: &str) -> &str {
    for (i, byte) in text.bytes().enumerate().rev() {
        match byte {
            b']' => break,
            b'[' => return &text[..i],
            _ => {}
        }
    }
    text
}

struct Marker<'a> {
    /// Byte offset of the opening `[`.
    start: usize,
    /// Byte offset just past the closing `]`.
    end: usize,
    /// Text between the brackets, at least one character, no `]` inside.
    token: &'a str,
}

/// Find the next `[token]` marker. An empty pair `[]` is not a marker; the
/// scan resumes after its `[` so later markers are still found.
fn next_marker(text: &str) -> Option<Marker<'_>> {
    let mut from = 0;
    while let Some(open) = text[from..].find('[').map(|p| from + p) {
        match text[open + 1..].find(']') {
            Some(0) => from = open + 1,
            Some(len) => {
                return Some(Marker {
                    start: open,
                    end: open + 1 + len + 1,
                    token: &text[open + 1..open + 1 + len],
                });
            }
            None => return None,
        }
    }
    None
}

fn render_citation(token: &str, citations: &mut Vec<String>, resolver: &dyn PathResolver) -> String {
    let index = match citations.iter().position(|c| c == token) {
        Some(pos) => pos + 1,
        None => {
            citations.push(token.to_string());
            citations.len()
        }
    };

    // `identifier|label` - only the identifier part resolves to a path.
    let identifier = token.split('|').next().unwrap_or(token).trim();
    let path = resolver.resolve(identifier);

    format!(
        r#"<a class="sup-citation" title="{title}" href="{href}" data-citation-index="{index}"><sup>{index}</sup></a>"#,
        title = escape::attr(token),
        href = escape::attr(&path),
    )
}
