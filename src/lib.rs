//! # solitaire-engine
//!
//! A deterministic, reversible game-state engine for patience card games.
//!
//! ## Design Principles
//!
//! 1. **Every change is a move**: after the opening deal the table only
//!    changes through atomic moves recorded in the move log, so any
//!    position can be undone and redone exactly.
//!
//! 2. **Rules are data**: stacks declare capabilities (suit, rank, base,
//!    direction, count limits) and a generic matcher answers "may these
//!    cards go there". Per-game exceptions are small predicate objects.
//!
//! 3. **Replayable deals**: a game number names one deal forever. The same
//!    number on any machine gives the same cards.
//!
//! ## Architecture
//!
//! - **Variants configure, the engine plays**: a `Variant` declares the
//!   layout and the opening deal; dealing, autoplay, undo/redo, hints and
//!   saving are shared.
//!
//! - **Persistent history**: the move log is an `im::Vector`, so cloning a
//!   game for look-ahead is cheap.
//!
//! - **Staged loading**: a save is validated in full before it replaces the
//!   running game.
//!
//! ## Modules
//!
//! - `core`: ids, atomic/logical moves, the move log, RNG, game numbers
//! - `cards`: card identity and deck composition
//! - `stacks`: capabilities, stack configuration, the rule matcher
//! - `game`: the game state machine, autoplay, save/load, bookmarks
//! - `rules`: the `Variant` trait
//! - `hint`: hint search and demo play
//! - `games`: built-in variants
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use solitaire_engine::{EngineOptions, Game, GameRandom, Klondike};
//!
//! let mut game = Game::new(Arc::new(Klondike::default()), EngineOptions::manual());
//! game.new_game(Some(GameRandom::from_seed(12345))).unwrap();
//! let before = game.snapshot();
//!
//! assert_eq!(game.deal_cards().unwrap(), 1);
//! game.undo().unwrap();
//! assert_eq!(game.snapshot(), before);
//! ```

pub mod core;
pub mod cards;
pub mod stacks;
pub mod game;
pub mod rules;
pub mod hint;
pub mod games;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    AtomicMove, CardId, Commit, EngineOptions, GameNumberFormat, GameRandom, LogicalMove, MoveLog, MoveStats,
    Phase, RandomKind, SeedOrigin, StackId, VariantInfo,
};

pub use crate::cards::Card;

pub use crate::stacks::{
    BaseRank, Capability, DealMode, Direction, DropPolicy, Layout, SequencePredicate, Stack, StackConfig,
    StackKind, StackRule, Table, TalonConfig,
};

pub use crate::game::{BookmarkKind, FormatVersion, Game, GameEvent, GameObserver, WinStatus};

pub use crate::rules::Variant;

pub use crate::hint::{DefaultHint, Hint, HintAction, HintLevel, HintProvider};

pub use crate::games::{BakersDozen, Canfield, FreeCell, Klondike, Spider};

pub use crate::error::{EngineError, EngineResult, GameNumberError, SaveError};
