//! Conversation State: turn history plus the waiting/answering cycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Interviewer,
    Candidate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Waiting,
    Answering,
}

/// History is append-only; the only way to shrink it is `reset`.
#[derive(Debug, Clone, Default)]
pub struct ConversationState {
    history: Vec<Turn>,
    phase: Phase,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// `Waiting → Answering`.
    pub fn begin_answer(&mut self) {
        self.phase = Phase::Answering;
    }

    /// Records the question/answer pair and returns to `Waiting`.
    pub fn complete_answer(&mut self, question: &str, answer: &str) {
        let at = Utc::now();
        self.history.push(Turn {
            role: Role::Interviewer,
            content: question.to_string(),
            at,
        });
        self.history.push(Turn {
            role: Role::Candidate,
            content: answer.to_string(),
            at,
        });
        self.phase = Phase::Waiting;
    }

    /// Returns to `Waiting` without recording anything.
    pub fn abandon_answer(&mut self) {
        self.phase = Phase::Waiting;
    }

    pub fn reset(&mut self) {
        self.history.clear();
        self.phase = Phase::Waiting;
    }
}
