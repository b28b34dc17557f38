//! Answer text processing.
//!
//! The one non-trivial piece of the frontend: rewriting raw answer text with
//! inline `[citation]` markers into numbered superscript links, tolerant of
//! text that is still streaming in. Everything the parser cannot decide on
//! its own sits behind a collaborator trait: [`paths::PathResolver`] turns a
//! citation identifier into a fetchable path, [`sanitize::HtmlSanitizer`]
//! scrubs the final markup before it is embedded.

pub mod parser;
pub mod paths;
pub mod sanitize;

pub use parser::{ParsedAnswer, parse_answer_to_html};
pub use paths::{ContentPathResolver, PathResolver};
pub use sanitize::{AmmoniaSanitizer, HtmlSanitizer};
