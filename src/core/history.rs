//! The move log: committed history, redo cursor, and the open logical move.
//!
//! ## Phases
//!
//! The log records atomic moves only while the game is dealing, filling or
//! playing. Undo, redo and restore run in their own phases so that replaying
//! history never records new history. Phases are ordered; `enter_phase`
//! only ever lowers the current phase, so a deal nested inside play stays a
//! deal until the outer caller leaves it.
//!
//! ## Cursor
//!
//! `0 <= index <= history.len()` always holds. `history[index..]` is the
//! redo tail. Committing a move that does not match `history[index]`
//! truncates the tail; committing one that matches overwrites in place and
//! keeps the tail.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::{AtomicMove, LogicalMove};
use crate::error::{EngineError, EngineResult};

/// Engine phase, ordered from least to most restrictive for recording.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Building the layout and the opening deal. Nothing is recorded.
    Init,
    /// Dealing from the talon.
    Deal,
    /// Refilling stacks as a side effect of another move.
    Fill,
    /// Normal play.
    Play,
    Undo,
    Redo,
    /// Adopting a loaded save.
    Restore,
}

impl Phase {
    /// Whether atomic moves are appended to the open logical move.
    #[must_use]
    pub fn is_recording(self) -> bool {
        matches!(self, Phase::Deal | Phase::Fill | Phase::Play)
    }
}

/// Per-game move counters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveStats {
    pub player_moves: u32,
    pub demo_moves: u32,
    pub total_moves: u32,
    pub undo_moves: u32,
    pub redo_moves: u32,
    pub hints: u32,
    pub goto_bookmark_moves: u32,
    pub shuffle_moves: u32,
    pub autoplay_moves: u32,
}

impl MoveStats {
    /// No undo, bookmark jump or reshuffle was used.
    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.undo_moves == 0 && self.goto_bookmark_moves == 0 && self.shuffle_moves == 0
    }
}

/// What `finish` did with the open logical move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Commit {
    /// Matched the next redo entry and replaced it; the tail survives.
    Redetected,
    /// Appended after truncating any redo tail.
    Appended,
}

/// Logical move history with a redo cursor.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MoveLog {
    phase: Phase,
    history: Vector<LogicalMove>,
    index: usize,
    current: LogicalMove,
}

impl Default for MoveLog {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveLog {
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: Phase::Init,
            history: Vector::new(),
            index: 0,
            current: LogicalMove::new(),
        }
    }

    /// Rebuild a log from saved parts, checking the cursor.
    pub fn from_parts(history: Vector<LogicalMove>, index: usize) -> EngineResult<Self> {
        if index > history.len() {
            return Err(EngineError::invariant(format!(
                "history index {index} beyond {} entries",
                history.len()
            )));
        }
        Ok(Self {
            phase: Phase::Play,
            history,
            index,
            current: LogicalMove::new(),
        })
    }

    // === Phase ===

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    /// Lower the phase to `phase` if it is below the current one. Returns
    /// the previous phase for `leave_phase`.
    pub fn enter_phase(&mut self, phase: Phase) -> Phase {
        let old = self.phase;
        if phase < self.phase {
            self.phase = phase;
        }
        old
    }

    pub fn leave_phase(&mut self, old: Phase) {
        self.phase = old;
    }

    // === Recording ===

    /// Append to the open logical move if the phase records. Returns whether
    /// the move was recorded.
    pub fn record(&mut self, atom: AtomicMove) -> bool {
        if self.phase.is_recording() {
            self.current.push(atom);
            true
        } else {
            false
        }
    }

    /// The open, uncommitted logical move.
    #[must_use]
    pub fn current(&self) -> &LogicalMove {
        &self.current
    }

    /// Commit the open logical move. `None` if it was empty.
    pub fn finish(&mut self, stats: &mut MoveStats, demo: bool) -> Option<Commit> {
        if self.current.is_empty() {
            return None;
        }
        if demo {
            stats.demo_moves += 1;
            if self.index == 0 {
                stats.player_moves = 0;
            }
        } else {
            stats.player_moves += 1;
            if self.index == 0 {
                stats.demo_moves = 0;
            }
        }
        stats.total_moves += 1;

        let current = std::mem::take(&mut self.current);
        let redetected = self.index < self.history.len()
            && self.history[self.index].same_for_redo(&current);
        if redetected {
            self.history.set(self.index, current);
            self.index += 1;
            Some(Commit::Redetected)
        } else {
            self.history.truncate(self.index);
            self.history.push_back(current);
            self.index = self.history.len();
            Some(Commit::Appended)
        }
    }

    /// Drop the open logical move without committing it.
    pub fn discard_current(&mut self) -> LogicalMove {
        std::mem::take(&mut self.current)
    }

    // === Undo / redo bookkeeping ===

    fn check_replay(&self, what: &str) -> EngineResult<()> {
        if !self.current.is_empty() {
            return Err(EngineError::invariant(format!(
                "{what} with {} uncommitted atomic move(s)",
                self.current.len()
            )));
        }
        if self.phase != Phase::Play {
            return Err(EngineError::invariant(format!("{what} in phase {:?}", self.phase)));
        }
        Ok(())
    }

    /// Step the cursor back and enter the undo phase. Returns the logical
    /// move to revert, in recorded order.
    pub fn begin_undo(&mut self) -> EngineResult<LogicalMove> {
        if self.index == 0 {
            return Err(EngineError::invariant("undo with empty history"));
        }
        self.check_replay("undo")?;
        self.index -= 1;
        self.phase = Phase::Undo;
        Ok(self.history[self.index].clone())
    }

    /// Enter the redo phase and return the logical move to replay. The
    /// cursor advances in `end_replay`.
    pub fn begin_redo(&mut self) -> EngineResult<LogicalMove> {
        if self.index >= self.history.len() {
            return Err(EngineError::invariant("redo with empty redo tail"));
        }
        self.check_replay("redo")?;
        self.phase = Phase::Redo;
        Ok(self.history[self.index].clone())
    }

    /// Leave the undo/redo phase.
    pub fn end_replay(&mut self) {
        if self.phase == Phase::Redo {
            self.index += 1;
        }
        self.phase = Phase::Play;
    }

    /// Leave the undo/redo phase after a failed replay, putting the cursor
    /// back where it was before `begin_undo`/`begin_redo`.
    pub fn abort_replay(&mut self) {
        if self.phase == Phase::Undo {
            self.index += 1;
        }
        self.phase = Phase::Play;
    }

    /// Reset to an empty history in the play phase.
    pub fn start(&mut self) {
        self.history = Vector::new();
        self.index = 0;
        self.current = LogicalMove::new();
        self.phase = Phase::Play;
    }

    // === Queries ===

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    #[must_use]
    pub fn history(&self) -> &Vector<LogicalMove> {
        &self.history
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.index > 0 && self.current.is_empty() && self.phase == Phase::Play
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.index < self.history.len() && self.current.is_empty() && self.phase == Phase::Play
    }
}
