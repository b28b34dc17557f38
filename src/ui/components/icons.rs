//! Inline SVG icons.
//!
//! Icons are emitted inline so fragments stay self-contained; stroke and
//! size follow the surrounding text via `currentColor` and a class hook.

const ICON_ATTRS: &str = r#"xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round""#;

fn icon(class: &str, body: &str) -> String {
    format!(r#"<svg {ICON_ATTRS} class="icon {class}" aria-hidden="true">{body}</svg>"#)
}

/// Sparkle, the answer marker.
#[must_use]
pub fn sparkle(class: &str) -> String {
    icon(
        class,
        r#"<path d="m12 3-1.912 5.813a2 2 0 0 1-1.275 1.275L3 12l5.813 1.912a2 2 0 0 1 1.275 1.275L12 21l1.912-5.813a2 2 0 0 1 1.275-1.275L21 12l-5.813-1.912a2 2 0 0 1-1.275-1.275L12 3Z"/>"#,
    )
}

/// Lightbulb, the thought-process toggle.
#[must_use]
pub fn lightbulb(class: &str) -> String {
    icon(
        class,
        r#"<path d="M15 14c.2-1 .7-1.7 1.5-2.5 1-.9 1.5-2.2 1.5-3.5A6 6 0 0 0 6 8c0 1 .2 2.2 1.5 3.5.7.7 1.3 1.5 1.5 2.5"/><path d="M9 18h6"/><path d="M10 22h4"/>"#,
    )
}

/// Clipboard list, the supporting-content toggle.
#[must_use]
pub fn clipboard_list(class: &str) -> String {
    icon(
        class,
        r#"<rect width="8" height="4" x="8" y="2" rx="1" ry="1"/><path d="M16 4h2a2 2 0 0 1 2 2v14a2 2 0 0 1-2 2H6a2 2 0 0 1-2-2V6a2 2 0 0 1 2-2h2"/><path d="M12 11h4"/><path d="M12 16h4"/><path d="M8 11h.01"/><path d="M8 16h.01"/>"#,
    )
}

/// Thumbs up, the approve rating.
#[must_use]
pub fn thumbs_up(class: &str) -> String {
    icon(
        class,
        r#"<path d="M7 10v12"/><path d="M15 5.88 14 10h5.83a2 2 0 0 1 1.92 2.56l-2.33 8A2 2 0 0 1 17.5 22H4a2 2 0 0 1-2-2v-8a2 2 0 0 1 2-2h2.76a2 2 0 0 0 1.79-1.11L12 2a3.13 3.13 0 0 1 3 3.88Z"/>"#,
    )
}

/// Thumbs down, the reject rating.
#[must_use]
pub fn thumbs_down(class: &str) -> String {
    icon(
        class,
        r#"<path d="M17 14V2"/><path d="M9 18.12 10 14H4.17a2 2 0 0 1-1.92-2.56l2.33-8A2 2 0 0 1 6.5 2H20a2 2 0 0 1 2 2v8a2 2 0 0 1-2 2h-2.76a2 2 0 0 0-1.79 1.11L12 22a3.13 3.13 0 0 1-3-3.88Z"/>"#,
    )
}

/// Send arrow for the message and feedback forms.
#[must_use]
pub fn send(class: &str) -> String {
    icon(
        class,
        r#"<line x1="22" y1="2" x2="11" y2="13"/><polygon points="22 2 15 22 11 13 2 9 22 2"/>"#,
    )
}

/// Trash can for the clear-chat control.
#[must_use]
pub fn trash(class: &str) -> String {
    icon(
        class,
        r#"<path d="M3 6h18"/><path d="M19 6v14c0 1-1 2-2 2H7c-1 0-2-1-2-2V6"/><path d="M8 6V4c0-1 1-2 2-2h4c1 0 2 1 2 2v2"/>"#,
    )
}

/// Spinner for pending answers and the loading overlay.
#[must_use]
pub fn spinner(class: &str) -> String {
    icon(
        &format!("{class} animate-spin"),
        r#"<path d="M21 12a9 9 0 1 1-6.219-8.56"/>"#,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icons_are_inline_svg() {
        for svg in [
            sparkle(""),
            lightbulb(""),
            clipboard_list(""),
            thumbs_up(""),
            thumbs_down(""),
            send(""),
            trash(""),
            spinner(""),
        ] {
            assert!(svg.starts_with("<svg "));
            assert!(svg.ends_with("</svg>"));
            assert!(svg.contains(r#"aria-hidden="true""#));
        }
    }

    #[test]
    fn test_spinner_spins() {
        assert!(spinner("h-4 w-4").contains("animate-spin"));
    }
}
