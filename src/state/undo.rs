use std::collections::VecDeque;

use crate::state::match_state::{MatchState, Team};

/// Maximum number of actions kept for undo. Older entries are dropped from the head.
pub const UNDO_CAPACITY: usize = 200;

/// A mutation that was applied to [`MatchState`] and can be reversed exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoAction {
    /// `points` were added to `team`.
    Score {
        /// Team that scored.
        team: Team,
        /// Points that were added.
        points: u32,
    },
    /// `team` was charged a foul.
    Foul {
        /// Team charged with the foul.
        team: Team,
    },
    /// `team` spent a timeout.
    Timeout {
        /// Team that called the timeout.
        team: Team,
    },
}

impl UndoAction {
    /// Team the action belongs to.
    pub fn team(&self) -> Team {
        match *self {
            UndoAction::Score { team, .. }
            | UndoAction::Foul { team }
            | UndoAction::Timeout { team } => team,
        }
    }

    /// Apply the inverse of this action in a single call.
    pub fn revert(&self, state: &mut MatchState) {
        match *self {
            UndoAction::Score { team, points } => state.undo_score(team, points),
            UndoAction::Foul { team } => state.undo_foul(team),
            UndoAction::Timeout { team } => state.undo_timeout(team),
        }
    }
}

/// Bounded LIFO history of applied actions.
#[derive(Debug, Clone, Default)]
pub struct UndoLog {
    entries: VecDeque<UndoAction>,
}

/// Returned by [`UndoLog::pop`] when there is nothing to reverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyUndo;

impl UndoLog {
    /// Create an empty history.
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(UNDO_CAPACITY),
        }
    }

    /// Record an applied action, evicting the oldest one when the log is full.
    pub fn push(&mut self, action: UndoAction) {
        if self.entries.len() == UNDO_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(action);
    }

    /// Remove and return the most recently pushed action.
    pub fn pop(&mut self) -> Result<UndoAction, EmptyUndo> {
        self.entries.pop_back().ok_or(EmptyUndo)
    }

    /// Number of actions that can be undone.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there is nothing to undo.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget every recorded action.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
