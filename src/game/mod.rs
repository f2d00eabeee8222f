//! The game: board, move log, autoplay, and persistence.
//!
//! ## Key Types
//!
//! - `Game`: one running game and its only write path
//! - `Board`: the undoable state (table, generator, variant blob)
//! - `GameObserver`: fire-and-forget change notifications
//! - `BookmarkKind` / `FormatVersion`: save stream framing

pub mod board;
pub mod observer;
pub mod save;
mod autoplay;
mod state;

pub use autoplay::CandidateMove;
pub use board::{Board, BoardSnapshot};
pub use observer::{EventLog, GameEvent, GameObserver};
pub use save::{BookmarkKind, FormatVersion};
pub use state::{Game, WinStatus};
