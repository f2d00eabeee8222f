//! Atomic and logical moves.
//!
//! An `AtomicMove` carries exactly what is needed to both apply and revert
//! one primitive transition. A `LogicalMove` is the ordered list of atomic
//! moves produced between two `finish_move` calls; it is the unit of undo
//! and redo.
//!
//! ## Redo keys
//!
//! When a new logical move is committed while redo entries exist, it is
//! compared with the next redo entry element by element. Two atomic moves
//! match when they are the same kind and `same_for_redo` holds. The
//! comparison covers every field that affects the table and ignores the
//! presentation-only ones:
//!
//! | kind          | compared                        | ignored            |
//! |---------------|---------------------------------|--------------------|
//! | `Move`        | `ncards`, `from`, `to`          | `frames`, `shadow` |
//! | `Flip`        | `stack`                         | `animated`         |
//! | `FlipAndMove` | `from`, `to`                    | `frames`           |
//! | `TurnStack`   | `from`, `to`                    |                    |
//! | `NextRound`   | `stack`                         |                    |
//! | `SaveSeed`    | `state`                         |                    |
//! | `ShuffleStack`| `stack`, `card_ids`, `state`    |                    |
//! | `UpdateFlags` | `stack`, `key`, `new`           | `old`              |
//! | `FlipAll`     | `stack`                         |                    |
//! | `SaveState`   | `state`, `flags`                |                    |
//! | `CloseStack`  | `stack`                         | `was_closed`       |
//! | `SingleCard`  | `from`, `to`, `from_pos`        | `frames`           |

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::entity::{CardId, StackId};
use super::rng::RandomState;

/// `SaveState` flag: restore the blob when replaying forward.
pub const SAVE_STATE_ON_REDO: u8 = 1;
/// `SaveState` flag: restore the blob when reverting.
pub const SAVE_STATE_ON_UNDO: u8 = 2;

/// One reversible primitive transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AtomicMove {
    /// Transfer the top `ncards` of `from` onto `to`, keeping their order.
    Move {
        ncards: usize,
        from: StackId,
        to: StackId,
        frames: i32,
        shadow: i32,
    },

    /// Toggle the face of the top card.
    Flip { stack: StackId, animated: bool },

    /// Flip the top card of `from` and transfer it to `to`.
    FlipAndMove { from: StackId, to: StackId, frames: i32 },

    /// Move every card of `from` onto the empty `to`, reversed and face down.
    TurnStack { from: StackId, to: StackId },

    /// Advance the talon round counter.
    NextRound { stack: StackId },

    /// Restore the generator to `state` in both directions.
    SaveSeed { state: RandomState },

    /// Shuffle `stack` starting from generator `state`. `card_ids` is the
    /// order before the shuffle.
    ShuffleStack {
        stack: StackId,
        card_ids: Vec<CardId>,
        state: RandomState,
    },

    /// Set (`Some`) or clear (`None`) an integer flag on a stack.
    UpdateFlags {
        stack: StackId,
        key: String,
        old: Option<i64>,
        new: Option<i64>,
    },

    /// Toggle the face of every card in the stack.
    FlipAll { stack: StackId },

    /// Restore the opaque variant blob, gated by `SAVE_STATE_ON_*` flags.
    SaveState { state: Vec<u8>, flags: u8 },

    /// Close a stack so it neither accepts nor releases cards.
    CloseStack { stack: StackId, was_closed: bool },

    /// Move the card at `from_pos` of `from` onto the top of `to`.
    SingleCard {
        from: StackId,
        to: StackId,
        from_pos: usize,
        frames: i32,
    },
}

impl AtomicMove {
    /// Plain card transfer with default presentation fields.
    #[must_use]
    pub fn transfer(ncards: usize, from: StackId, to: StackId) -> Self {
        AtomicMove::Move {
            ncards,
            from,
            to,
            frames: -1,
            shadow: -1,
        }
    }

    /// Short kind name, used in logs.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            AtomicMove::Move { .. } => "move",
            AtomicMove::Flip { .. } => "flip",
            AtomicMove::FlipAndMove { .. } => "flip_and_move",
            AtomicMove::TurnStack { .. } => "turn_stack",
            AtomicMove::NextRound { .. } => "next_round",
            AtomicMove::SaveSeed { .. } => "save_seed",
            AtomicMove::ShuffleStack { .. } => "shuffle_stack",
            AtomicMove::UpdateFlags { .. } => "update_flags",
            AtomicMove::FlipAll { .. } => "flip_all",
            AtomicMove::SaveState { .. } => "save_state",
            AtomicMove::CloseStack { .. } => "close_stack",
            AtomicMove::SingleCard { .. } => "single_card",
        }
    }

    /// Whether two moves are the same kind with equal redo keys.
    #[must_use]
    pub fn same_for_redo(&self, other: &AtomicMove) -> bool {
        use AtomicMove::*;
        match (self, other) {
            (
                Move { ncards: n1, from: f1, to: t1, .. },
                Move { ncards: n2, from: f2, to: t2, .. },
            ) => n1 == n2 && f1 == f2 && t1 == t2,
            (Flip { stack: s1, .. }, Flip { stack: s2, .. }) => s1 == s2,
            (FlipAndMove { from: f1, to: t1, .. }, FlipAndMove { from: f2, to: t2, .. }) => {
                f1 == f2 && t1 == t2
            }
            (TurnStack { from: f1, to: t1 }, TurnStack { from: f2, to: t2 }) => f1 == f2 && t1 == t2,
            (NextRound { stack: s1 }, NextRound { stack: s2 }) => s1 == s2,
            (SaveSeed { state: s1 }, SaveSeed { state: s2 }) => s1 == s2,
            (
                ShuffleStack { stack: s1, card_ids: c1, state: r1 },
                ShuffleStack { stack: s2, card_ids: c2, state: r2 },
            ) => s1 == s2 && c1 == c2 && r1 == r2,
            (
                UpdateFlags { stack: s1, key: k1, new: n1, .. },
                UpdateFlags { stack: s2, key: k2, new: n2, .. },
            ) => s1 == s2 && k1 == k2 && n1 == n2,
            (FlipAll { stack: s1 }, FlipAll { stack: s2 }) => s1 == s2,
            (SaveState { state: b1, flags: f1 }, SaveState { state: b2, flags: f2 }) => {
                b1 == b2 && f1 == f2
            }
            (CloseStack { stack: s1, .. }, CloseStack { stack: s2, .. }) => s1 == s2,
            (
                SingleCard { from: f1, to: t1, from_pos: p1, .. },
                SingleCard { from: f2, to: t2, from_pos: p2, .. },
            ) => f1 == f2 && t1 == t2 && p1 == p2,
            _ => false,
        }
    }

    /// Every stack this move references.
    pub fn stacks(&self) -> SmallVec<[StackId; 2]> {
        use AtomicMove::*;
        match self {
            Move { from, to, .. }
            | FlipAndMove { from, to, .. }
            | TurnStack { from, to }
            | SingleCard { from, to, .. } => SmallVec::from_slice(&[*from, *to]),
            Flip { stack, .. }
            | NextRound { stack }
            | ShuffleStack { stack, .. }
            | UpdateFlags { stack, .. }
            | FlipAll { stack }
            | CloseStack { stack, .. } => SmallVec::from_slice(&[*stack]),
            SaveSeed { .. } | SaveState { .. } => SmallVec::new(),
        }
    }
}

/// One undo/redo unit.
///
/// Most logical moves hold one to four atomic moves (a transfer plus an
/// automatic flip), so they are stored inline.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicalMove {
    pub atoms: SmallVec<[AtomicMove; 4]>,
}

impl LogicalMove {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, atom: AtomicMove) {
        self.atoms.push(atom);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &AtomicMove> {
        self.atoms.iter()
    }

    /// Element-wise redo comparison.
    #[must_use]
    pub fn same_for_redo(&self, other: &LogicalMove) -> bool {
        self.len() == other.len()
            && self
                .atoms
                .iter()
                .zip(other.atoms.iter())
                .all(|(a, b)| a.same_for_redo(b))
    }
}
