//! Error types for the engine.
//!
//! ## Taxonomy
//!
//! - `EngineError`: invariant violations and integration errors. These mean
//!   the caller drove the engine outside its preconditions (undo with an
//!   empty history, a move that bypasses the acceptance rules, an atomic
//!   move that no longer matches the table). They are returned, never
//!   silently corrected.
//! - `SaveError`: corrupt or incompatible save data. Recoverable; a failed
//!   load never touches the running game.
//! - `GameNumberError`: unparsable user input for a game number.
//!
//! Rule rejection (a move that is simply illegal) is not an error: the
//! matcher answers `false` / `None` and the driving API answers `Ok(false)`.

use thiserror::Error;

use crate::core::entity::{CardId, StackId};

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Invariant violations raised by the move log and the atomic moves.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A precondition of the move log or an atomic move did not hold.
    #[error("invariant violated: {0}")]
    Invariant(String),

    /// A play-phase transfer was attempted that the target refuses.
    #[error("{ncards} card(s) from {from} rejected by {to}")]
    RuleViolation {
        ncards: usize,
        from: StackId,
        to: StackId,
    },

    #[error("unknown stack {0}")]
    UnknownStack(StackId),

    #[error("unknown card {0}")]
    UnknownCard(CardId),

    #[error(transparent)]
    GameNumber(#[from] GameNumberError),
}

impl EngineError {
    /// Build an invariant violation, logging it at error level.
    pub fn invariant(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        tracing::error!(%msg, "engine invariant violated");
        Self::Invariant(msg)
    }
}

/// Failures while writing or reading a save stream.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("encoding error: {0}")]
    Encode(#[from] bincode::Error),

    /// Structurally invalid data: wrong card count, bad sentinel, truncation.
    #[error("corrupt save: {0}")]
    Corrupt(String),

    /// Well-formed data for a different product, variant or version.
    #[error("incompatible save: {0}")]
    Incompatible(String),

    /// The variant refuses to be saved in its current state.
    #[error("game cannot be saved: {0}")]
    CannotSave(String),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Invalid game number input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameNumberError {
    #[error("empty game number")]
    Empty,

    #[error("invalid game number {0:?}")]
    Invalid(String),

    #[error("game number {0:?} is out of range")]
    OutOfRange(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_violation_display() {
        let err = EngineError::RuleViolation {
            ncards: 3,
            from: StackId::new(1),
            to: StackId::new(4),
        };
        assert_eq!(err.to_string(), "3 card(s) from Stack(1) rejected by Stack(4)");
    }

    #[test]
    fn test_game_number_error_converts() {
        let err: EngineError = GameNumberError::Empty.into();
        assert_eq!(err, EngineError::GameNumber(GameNumberError::Empty));
    }

    #[test]
    fn test_corrupt_is_distinct() {
        let err = SaveError::Corrupt("bad sentinel".into());
        assert!(matches!(err, SaveError::Corrupt(_)));
        assert_eq!(err.to_string(), "corrupt save: bad sentinel");
    }
}
