//! Conversation turns and session storage.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::backend::types::{ChatAppResponse, ChatMessage};
use crate::session::feedback::{Feedback, Rating};

/// Default session timeout (30 minutes).
const DEFAULT_SESSION_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// One question/answer exchange.
///
/// The turn index doubles as the answer's identity: feedback state is keyed
/// to it and starts over whenever the answer it belongs to is replaced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatTurn {
    /// What the user asked.
    pub question: String,
    /// The backend's answer, absent while it is still being generated.
    pub answer: Option<ChatAppResponse>,
    /// Feedback state for this answer.
    pub feedback: Feedback,
}

/// A single conversation session.
///
/// Sessions hold the turn history, the selected machine and per-answer
/// feedback state, and hand out clones cheaply (shared inner state).
#[derive(Debug)]
pub struct Session {
    inner: Arc<SessionInner>,
}

#[derive(Debug)]
struct SessionInner {
    /// Unique session identifier.
    id: String,
    /// Conversation turns.
    turns: RwLock<Vec<ChatTurn>>,
    /// Machine the questions are about.
    machine: RwLock<Option<String>>,
    /// Session creation time.
    #[allow(dead_code)]
    created_at: DateTime<Utc>,
    /// Last activity time.
    last_activity: RwLock<DateTime<Utc>>,
}

impl Clone for Session {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Session {
    /// Create a new session with the given ID.
    fn new(id: String) -> Self {
        let now = Utc::now();
        Self {
            inner: Arc::new(SessionInner {
                id,
                turns: RwLock::new(Vec::new()),
                machine: RwLock::new(None),
                created_at: now,
                last_activity: RwLock::new(now),
            }),
        }
    }

    /// Get the session ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.inner.id
    }

    /// Record a new question and return the index of its turn.
    pub fn push_question(&self, question: impl Into<String>) -> usize {
        let mut guard = self.inner.turns.write().unwrap();
        guard.push(ChatTurn {
            question: question.into(),
            ..ChatTurn::default()
        });
        let index = guard.len() - 1;
        drop(guard);
        self.touch();
        index
    }

    /// Store the finished answer for a turn.
    ///
    /// Replacing an existing answer resets that turn's feedback: the state
    /// belongs to the answer identity, not the slot.
    pub fn complete_answer(&self, index: usize, response: ChatAppResponse) {
        let mut guard = self.inner.turns.write().unwrap();
        if let Some(turn) = guard.get_mut(index) {
            if turn.answer.is_some() {
                turn.feedback = Feedback::default();
            }
            turn.answer = Some(response);
        }
        drop(guard);
        self.touch();
    }

    /// Get a snapshot of one turn.
    #[must_use]
    pub fn turn(&self, index: usize) -> Option<ChatTurn> {
        self.inner.turns.read().unwrap().get(index).cloned()
    }

    /// Get a snapshot of all turns.
    #[must_use]
    pub fn turns(&self) -> Vec<ChatTurn> {
        self.inner.turns.read().unwrap().clone()
    }

    /// Number of turns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.turns.read().unwrap().len()
    }

    /// Whether the conversation has no turns yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Apply a rating click to a turn. Returns the updated snapshot, or
    /// `None` for an unknown turn.
    pub fn toggle_rating(&self, index: usize, rating: Rating) -> Option<ChatTurn> {
        let mut guard = self.inner.turns.write().unwrap();
        let turn = guard.get_mut(index)?;
        turn.feedback.toggle_rating(rating);
        let snapshot = turn.clone();
        drop(guard);
        self.touch();
        Some(snapshot)
    }

    /// Record the feedback comment for a turn.
    pub fn set_comment(&self, index: usize, comment: impl Into<String>) {
        let mut guard = self.inner.turns.write().unwrap();
        if let Some(turn) = guard.get_mut(index) {
            turn.feedback.set_comment(comment);
        }
    }

    /// Try to submit feedback for a turn. On the idle phase this is a silent
    /// no-op; on success the chosen rating and the final comment come back.
    pub fn submit_feedback(&self, index: usize) -> Option<(Rating, String)> {
        let mut guard = self.inner.turns.write().unwrap();
        let turn = guard.get_mut(index)?;
        let rating = turn.feedback.submit()?;
        let comment = turn.feedback.comment.clone();
        drop(guard);
        self.touch();
        Some((rating, comment))
    }

    /// Set the machine the conversation is about.
    pub fn set_machine(&self, machine: impl Into<String>) {
        let mut guard = self.inner.machine.write().unwrap();
        *guard = Some(machine.into());
        drop(guard);
        self.touch();
    }

    /// The selected machine, if any.
    #[must_use]
    pub fn machine(&self) -> Option<String> {
        self.inner.machine.read().unwrap().clone()
    }

    /// Clear all turns from the session.
    pub fn clear(&self) {
        let mut guard = self.inner.turns.write().unwrap();
        guard.clear();
        drop(guard);
        self.touch();
    }

    /// Flatten the conversation into backend messages, ending with the
    /// latest question when its answer is still pending.
    #[must_use]
    pub fn backend_messages(&self) -> Vec<ChatMessage> {
        let guard = self.inner.turns.read().unwrap();
        let mut messages = Vec::with_capacity(guard.len() * 2);
        for turn in guard.iter() {
            messages.push(ChatMessage::user(turn.question.clone()));
            if let Some(answer) = &turn.answer {
                messages.push(ChatMessage::assistant(answer.content.clone()));
            }
        }
        messages
    }

    /// Update the last activity timestamp.
    fn touch(&self) {
        let mut guard = self.inner.last_activity.write().unwrap();
        *guard = Utc::now();
    }

    /// Check if the session has been inactive longer than the timeout.
    #[must_use]
    pub fn is_expired_with_timeout(&self, timeout: Duration) -> bool {
        let last = *self.inner.last_activity.read().unwrap();
        let now = Utc::now();
        if let Ok(duration) = (now - last).to_std() {
            duration > timeout
        } else {
            // Negative duration means clock skew or "last" is in the future.
            false
        }
    }
}

/// Thread-safe store for sessions.
///
/// Provides methods for creating, retrieving, and cleaning up sessions.
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<SessionStoreInner>,
}

#[derive(Debug)]
struct SessionStoreInner {
    sessions: RwLock<HashMap<String, Session>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    /// Create a new session store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(SessionStoreInner {
                sessions: RwLock::new(HashMap::new()),
            }),
        }
    }

    /// Create a new session and return it.
    #[must_use]
    pub fn create(&self) -> Session {
        let id = Uuid::new_v4().to_string();
        self.create_with_id(id)
    }

    /// Create a new session with a specific ID.
    #[must_use]
    pub fn create_with_id(&self, id: impl Into<String>) -> Session {
        let id = id.into();
        let session = Session::new(id.clone());
        let mut guard = self.inner.sessions.write().unwrap();
        guard.insert(id, session.clone());
        session
    }

    /// Get a session by ID.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Session> {
        let guard = self.inner.sessions.read().unwrap();
        guard.get(id).cloned()
    }

    /// Get a session by ID, creating it if it doesn't exist.
    #[must_use]
    pub fn get_or_create(&self, id: &str) -> Session {
        {
            let guard = self.inner.sessions.read().unwrap();
            if let Some(session) = guard.get(id) {
                return session.clone();
            }
        }

        self.create_with_id(id)
    }

    /// Remove a session by ID.
    pub fn remove(&self, id: &str) -> Option<Session> {
        let mut guard = self.inner.sessions.write().unwrap();
        guard.remove(id)
    }

    /// Get the number of active sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.sessions.read().unwrap().len()
    }

    /// Check if there are no sessions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove all sessions inactive longer than the default timeout.
    pub fn cleanup_expired(&self) -> usize {
        self.cleanup_expired_with_timeout(DEFAULT_SESSION_TIMEOUT)
    }

    /// Remove sessions that have been inactive longer than the timeout.
    ///
    /// Returns the number of sessions removed.
    pub fn cleanup_expired_with_timeout(&self, timeout: Duration) -> usize {
        let mut guard = self.inner.sessions.write().unwrap();
        let before = guard.len();
        guard.retain(|_, session| !session.is_expired_with_timeout(timeout));
        before - guard.len()
    }
}
