//! Reusable UI building blocks.
//!
//! Small, generic pieces the chat fragments are assembled from.
//!
//! - [`button`]: button builder with variant/size class maps
//! - [`icons`]: inline SVG icon builders

mod button;
pub mod icons;

pub use button::{ButtonSize, ButtonVariant, button};
