//! Fire-and-forget notifications for front ends.
//!
//! Observers are told about committed changes after the fact. The engine
//! never waits on them and never reads anything back.

use crate::core::entity::StackId;
use crate::core::history::Commit;

/// Something the front end may want to redraw for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    /// A new deal is on the table.
    GameStarted { game_number: String },
    /// A logical move was committed at history position `index`.
    MoveCommitted { index: usize, commit: Commit },
    Undone { index: usize },
    Redone { index: usize },
    /// The talon dealt `ncards` cards.
    Dealt { talon: StackId, ncards: usize },
    GameWon { perfect: bool },
    /// A save or bookmark was adopted.
    Restored,
}

/// Receives `GameEvent`s.
pub trait GameObserver: Send {
    fn notify(&mut self, event: &GameEvent);
}

/// Observer that records every event. Handy for tests and replays.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    pub events: Vec<GameEvent>,
}

impl GameObserver for EventLog {
    fn notify(&mut self, event: &GameEvent) {
        self.events.push(event.clone());
    }
}

/// Forward events to a shared log.
impl<T: GameObserver> GameObserver for std::sync::Arc<std::sync::Mutex<T>> {
    fn notify(&mut self, event: &GameEvent) {
        match self.lock() {
            Ok(mut inner) => inner.notify(event),
            Err(_) => tracing::warn!(?event, "observer lock poisoned, event dropped"),
        }
    }
}
