//! Session and conversation state.
//!
//! In-memory storage for the transient UI state the frontend owns:
//! conversation turns, the selected machine and per-answer feedback. Nothing
//! here persists; sessions are identified by UUID and expire on inactivity.
//!
//! # Example
//!
//! ```rust
//! use manualchat::session::SessionStore;
//!
//! let store = SessionStore::new();
//! let session = store.create();
//! let turn = session.push_question("How do I check the photocell?");
//! assert_eq!(turn, 0);
//! ```

mod feedback;
mod thread;

pub use feedback::{Feedback, FeedbackPhase, Rating};
pub use thread::{ChatTurn, Session, SessionStore};
