//! Manual-loading overlay.
//!
//! Shown while a manual or analysis panel is being prepared. The overlay
//! dismisses itself: the client runtime reads `data-hide-after-ms` and
//! removes the element once the delay elapses (or immediately when the
//! owning fragment is replaced, so no stale timer survives a swap).

use crate::ui::components::icons;
use crate::ui::escape;

/// How long the overlay stays up before auto-hiding.
pub const AUTO_HIDE_MS: u64 = 2500;

/// Render the loading overlay.
#[must_use]
pub fn loading_overlay(label: &str) -> String {
    format!(
        r#"<div class="loading-overlay" data-hide-after-ms="{AUTO_HIDE_MS}"><div class="loading-spinner">{spinner}<span>{label}</span></div></div>"#,
        spinner = icons::spinner("h-6 w-6"),
        label = escape::text(label),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_carries_auto_hide_delay() {
        let html = loading_overlay("Loading manual");
        assert!(html.contains(r#"data-hide-after-ms="2500""#));
        assert!(html.contains("Loading manual"));
        assert!(html.contains("animate-spin"));
    }
}
