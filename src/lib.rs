//! Manualchat
//!
//! A server-rendered chat frontend for a retrieval-augmented machine-manual
//! backend. Answers stream in over SSE, inline `[citation]` markers are
//! rewritten into numbered superscript links, and every interactive element
//! (feedback, examples, machine selection) is an HTML fragment swapped in
//! by HTMX.
//!
//! # Architecture
//!
//! - **Server**: Axum-based HTTP server with SSE streaming
//! - **Answer core**: pure citation parsing plus sanitize/resolve collaborators
//! - **Backend client**: thin HTTP contract with the retrieval-augmented chat API
//! - **UI**: HTML fragment builders composed server-side
//!
//! # Modules
//!
//! - [`answer`]: citation parser and its collaborator seams
//! - [`backend`]: chat backend collaborator trait and HTTP implementation
//! - [`events`]: streamed answer event model
//! - [`session`]: conversation turns and per-answer feedback state
//! - [`ui`]: HTML fragment builders
//! - [`server`]: routes and handlers

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::default_trait_access)]
#![allow(clippy::unused_async)]

pub mod answer;
pub mod backend;
pub mod config;
pub mod events;
pub mod server;
pub mod session;
pub mod ui;

use std::sync::Arc;

use crate::answer::paths::PathResolver;
use crate::answer::sanitize::HtmlSanitizer;
use crate::backend::ChatBackend;
use crate::config::AppConfig;
use crate::session::SessionStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Chat backend the UI proxies questions to.
    pub backend: Arc<dyn ChatBackend>,
    /// Session store for conversation management.
    pub sessions: SessionStore,
    /// Sanitizer applied to parsed answer markup before it is embedded.
    pub sanitizer: Arc<dyn HtmlSanitizer>,
    /// Resolver mapping citation identifiers to fetchable paths.
    pub resolver: Arc<dyn PathResolver>,
    /// Global configuration.
    pub config: Arc<AppConfig>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("sessions", &self.sessions)
            .field("config", &self.config)
            .finish()
    }
}
