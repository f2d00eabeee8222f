//! Hint search.
//!
//! ## Key Types
//!
//! - `Hint`: a ranked suggestion (deal, flip, or move) with an optional
//!   forced follow-up
//! - `HintList`: accumulator that numbers and flattens hints
//! - `HintProvider`: per-variant hint intelligence
//! - `DefaultHint`: the general-purpose search
//!
//! Hints are computed against a read-only `Game`. Playing one goes through
//! `Game::play_hint`, which re-validates it first; a stale hint is simply
//! not played.

pub mod list;
pub mod provider;
pub mod default;

pub use default::DefaultHint;
pub use list::{Hint, HintAction, HintColor, HintLevel, HintList};
pub use provider::{get_hints, HintProvider, SCORE_DEAL, SCORE_FLIP};
