//! HTML sanitation.
//!
//! The parser passes literal answer text through untouched, so whatever the
//! model produced - markdown leftovers, stray tags, hostile citation labels -
//! ends up in the fragment. Before the fragment is embedded it goes through
//! the [`HtmlSanitizer`] seam. The production implementation rides on
//! `ammonia`'s allowlist cleaner, configured so the citation markup the
//! parser generates survives and scripts do not.

use ammonia::Builder;

/// Strips unsafe markup before DOM injection.
pub trait HtmlSanitizer: Send + Sync {
    /// Return a safe version of `html`.
    fn sanitize(&self, html: &str) -> String;
}

/// Allowlist sanitizer built on `ammonia`.
///
/// Keeps basic text markup plus the parser's citation links:
/// `<a class="sup-citation" title href data-citation-index><sup>n</sup></a>`.
/// Event-handler attributes, `<script>` elements and script-scheme URLs are
/// removed.
pub struct AmmoniaSanitizer {
    builder: Builder<'static>,
}

impl std::fmt::Debug for AmmoniaSanitizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AmmoniaSanitizer").finish()
    }
}

impl AmmoniaSanitizer {
    #[must_use]
    pub fn new() -> Self {
        let mut builder = Builder::default();
        builder
            .add_tag_attributes("a", ["title", "data-citation-index"])
            .add_generic_attributes(["class"])
            .link_rel(None);
        Self { builder }
    }
}

impl Default for AmmoniaSanitizer {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlSanitizer for AmmoniaSanitizer {
    fn sanitize(&self, html: &str) -> String {
        self.builder.clean(html).to_string()
    }
}
