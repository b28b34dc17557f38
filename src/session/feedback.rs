//! Per-answer feedback state.
//!
//! Every rendered answer carries its own small state machine:
//! idle -> rated -> submitted. Rating is a toggle (clicking the active
//! rating clears it), submission requires a rating and is terminal. The
//! state belongs to one answer; a replacement answer starts over at idle.

use serde::{Deserialize, Serialize};

/// User verdict on an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Good,
    Bad,
}

impl Rating {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Bad => "bad",
        }
    }
}

/// Where an answer sits in the feedback flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedbackPhase {
    /// No rating chosen.
    #[default]
    Idle,
    /// A rating is chosen; the comment form is open.
    Rated(Rating),
    /// Feedback has been handed off. Terminal.
    Submitted(Rating),
}

/// Feedback state for one answer: the phase plus the free-text comment.
///
/// The comment survives rating toggles so a half-written note is not lost
/// when the user flips their verdict.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub phase: FeedbackPhase,
    pub comment: String,
}

impl Feedback {
    /// Apply a rating click. Clicking the active rating clears it; any click
    /// after submission is ignored.
    pub fn toggle_rating(&mut self, clicked: Rating) {
        self.phase = match self.phase {
            FeedbackPhase::Idle => FeedbackPhase::Rated(clicked),
            FeedbackPhase::Rated(current) if current == clicked => FeedbackPhase::Idle,
            FeedbackPhase::Rated(_) => FeedbackPhase::Rated(clicked),
            FeedbackPhase::Submitted(r) => FeedbackPhase::Submitted(r),
        };
    }

    /// Record the comment text. Ignored once submitted.
    pub fn set_comment(&mut self, comment: impl Into<String>) {
        if !matches!(self.phase, FeedbackPhase::Submitted(_)) {
            self.comment = comment.into();
        }
    }

    /// Try to submit. Returns the rating when the transition happens;
    /// without a rating this is a silent no-op, and re-submitting is too.
    pub fn submit(&mut self) -> Option<Rating> {
        match self.phase {
            FeedbackPhase::Rated(rating) => {
                self.phase = FeedbackPhase::Submitted(rating);
                Some(rating)
            }
            FeedbackPhase::Idle | FeedbackPhase::Submitted(_) => None,
        }
    }

    /// The currently chosen rating, if any.
    #[must_use]
    pub fn rating(&self) -> Option<Rating> {
        match self.phase {
            FeedbackPhase::Idle => None,
            FeedbackPhase::Rated(r) | FeedbackPhase::Submitted(r) => Some(r),
        }
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        matches!(self.phase, FeedbackPhase::Submitted(_))
    }
}
