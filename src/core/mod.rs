//! Core engine types: identifiers, moves, the move log, random generators,
//! game numbers and configuration.
//!
//! Nothing here knows about stacks or rules; the table and the game build on
//! these pieces.

pub mod entity;
pub mod rng;
pub mod game_number;
pub mod config;
pub mod action;
pub mod history;

pub use entity::{CardId, StackId};
pub use rng::{GameRandom, LcRandom31, MtRandom, RandomKind, RandomState, SeedOrigin, SeedPicker};
pub use game_number::{format_game_number, parse_game_number, GameNumberFormat};
pub use config::{EngineOptions, VariantInfo};
pub use action::{AtomicMove, LogicalMove, SAVE_STATE_ON_REDO, SAVE_STATE_ON_UNDO};
pub use history::{Commit, MoveLog, MoveStats, Phase};
