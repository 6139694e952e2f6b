//! Bounded conversation transcript
//!
//! The system prompt sits at index 0 for the life of the transcript. Once the
//! transcript reaches its limit, the next user input clears everything after
//! the system prompt in one go; there is no sliding window.

use crate::types::Turn;

/// Transcript length at which history is cleared
pub const DEFAULT_HISTORY_LIMIT: usize = 11;

/// Ordered turns sent to the model on every request
#[derive(Debug, Clone)]
pub struct Transcript {
    turns: Vec<Turn>,
    limit: usize,
}

impl Transcript {
    /// Start a transcript holding only the system prompt
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self::with_limit(system_prompt, DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_limit(system_prompt: impl Into<String>, limit: usize) -> Self {
        Self {
            turns: vec![Turn::system(system_prompt)],
            limit,
        }
    }

    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Clear history down to the system prompt if the limit is reached.
    ///
    /// Called once per user input, before the user turn is appended.
    /// Returns `true` if history was cleared.
    pub fn prune_if_needed(&mut self) -> bool {
        if self.turns.len() >= self.limit {
            self.turns.truncate(1);
            true
        } else {
            false
        }
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Always false; the system prompt is never removed
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn system_prompt(&self) -> &str {
        self.turns[0].text().unwrap_or_default()
    }
}
