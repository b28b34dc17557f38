//! Citation path resolution.
//!
//! A citation identifier like `manual.pdf#12` is not a URL; something has to
//! decide where the cited file can be fetched from. The parser only knows the
//! [`PathResolver`] seam; the application plugs in [`ContentPathResolver`],
//! which points at this server's own `/content/{id}` proxy route.

/// Maps a citation identifier to a fetchable/display file path.
pub trait PathResolver: Send + Sync {
    /// Resolve an identifier (the part of a citation token before any `|`)
    /// to the path a citation link should open.
    fn resolve(&self, identifier: &str) -> String;
}

/// Closures double as resolvers, which keeps tests and one-off callers light.
impl<F> PathResolver for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn resolve(&self, identifier: &str) -> String {
        self(identifier)
    }
}

/// Resolver pointing citations at the server's content proxy route.
#[derive(Debug, Clone)]
pub struct ContentPathResolver {
    base: String,
}

impl ContentPathResolver {
    /// Create a resolver rooted at `base` (e.g. `/content`). Trailing slashes
    /// are dropped so joining never produces `//`.
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for ContentPathResolver {
    fn default() -> Self {
        Self::new("/content")
    }
}

impl PathResolver for ContentPathResolver {
    fn resolve(&self, identifier: &str) -> String {
        format!("{}/{}", self.base, encode_path_segment(identifier))
    }
}

/// Percent-encode a string for use as a single path segment.
///
/// Unreserved characters (RFC 3986) pass through; everything else, including
/// `/` and `#` which are common in manual-page identifiers, is encoded.
fn encode_path_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char);
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_under_base() {
        let resolver = ContentPathResolver::new("/content");
        assert_eq!(resolver.resolve("manual.pdf"), "/content/manual.pdf");
    }

    #[test]
    fn test_trailing_slash_normalized() {
        let resolver = ContentPathResolver::new("/content/");
        assert_eq!(resolver.resolve("doc1"), "/content/doc1");
    }

    #[test]
    fn test_special_characters_encoded() {
        let resolver = ContentPathResolver::default();
        assert_eq!(
            resolver.resolve("csu frame/page#3"),
            "/content/csu%20frame%2Fpage%233"
        );
    }

    #[test]
    fn test_closure_resolver() {
        let resolver = |id: &str| format!("/files/{id}");
        assert_eq!(PathResolver::resolve(&resolver, "x"), "/files/x");
    }
}
