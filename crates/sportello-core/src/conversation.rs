//! Bounded per-session conversation history.

use crate::message::TurnRecord;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Rolling history of completed turns for a single session.
///
/// The history is capped: appending past the cap drops the oldest entry.
/// Nothing is persisted; the state dies with the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationState {
    cap: usize,
    turns: VecDeque<TurnRecord>,
}

impl ConversationState {
    /// Creates an empty history holding at most `cap` turns.
    ///
    /// A zero cap is clamped to 1 so that `append` always retains the most
    /// recent turn.
    pub fn new(cap: usize) -> Self {
        Self {
            cap: cap.max(1),
            turns: VecDeque::new(),
        }
    }

    /// Appends a completed turn, evicting the oldest entry once full.
    pub fn append(&mut self, record: TurnRecord) {
        self.turns.push_back(record);
        while self.turns.len() > self.cap {
            self.turns.pop_front();
        }
    }

    /// Returns the last `n` turns, oldest first. Never blocks, never fails;
    /// asking for more than is stored returns everything.
    pub fn recent_context(&self, n: usize) -> Vec<&TurnRecord> {
        let skip = self.turns.len().saturating_sub(n);
        self.turns.iter().skip(skip).collect()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }
}
