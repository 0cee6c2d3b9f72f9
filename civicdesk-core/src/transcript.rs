use crate::types::{Role, Turn};
use serde::{Deserialize, Serialize};

/// Ordered, append-only record of a session's turns.
///
/// Turns are never edited or reordered; a reset replaces the whole log.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TranscriptLog {
    turns: Vec<Turn>,
}

impl TranscriptLog {
    /// A log holding only the assistant's opening message.
    pub fn with_greeting(greeting: impl Into<String>) -> Self {
        Self {
            turns: vec![Turn::assistant(greeting)],
        }
    }

    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// True when the newest turn is an assistant completion reply.
    /// Older turns are deliberately ignored.
    pub fn ends_in_completion(&self) -> bool {
        self.last().is_some_and(Turn::is_completion)
    }

    pub fn count(&self, role: Role) -> usize {
        self.turns.iter().filter(|t| t.role == role).count()
    }
}
