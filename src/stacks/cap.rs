//! Capability descriptors and the generic sequence matcher.
//!
//! A stack's acceptance rule is data, not a subclass: a `Capability` holds
//! the per-card constraints and count limits, and a `SequencePredicate`
//! crossed with a `Direction` and a wrap `modulus` decides what counts as a
//! run. `is_sequence` is the single matcher every stack kind goes through.
//!
//! ## Rank arithmetic
//!
//! `upper` follows `lower` when `(lower + step) mod modulus == upper`, using
//! a non-negative modulo. The default modulus is large enough that nothing
//! wraps; `modulus = 13` lets a King follow an Ace going up (and an Ace
//! follow a King going down).
//!
//! ```
//! use solitaire_engine::stacks::{rank_follows};
//!
//! assert!(rank_follows(0, 1, 1, 8192));   // A -> 2
//! assert!(!rank_follows(12, 0, 1, 8192)); // K -> A, no wrap
//! assert!(rank_follows(12, 0, 1, 13));    // K -> A, wrapping
//! ```

use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// Marker for "no practical limit" in move/accept/card counts.
pub const UNLIMITED: usize = 999_999;

/// Default modulus: ranks never wrap.
pub const NO_WRAP: u16 = 8192;

/// Constraint on the first card placed on an empty stack.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BaseRank {
    /// Any rank may start the stack.
    #[default]
    Any,
    /// Only this rank may start the stack.
    Rank(u8),
    /// The stack can never be refilled once empty.
    NoRank,
}

impl BaseRank {
    #[must_use]
    pub fn allows(self, rank: u8) -> bool {
        match self {
            BaseRank::Any => true,
            BaseRank::Rank(r) => r == rank,
            BaseRank::NoRank => false,
        }
    }
}

/// Building direction for runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    #[default]
    Down,
    /// Up or down, but a single run must keep one direction.
    Either,
    /// Equal ranks.
    Same,
}

impl Direction {
    fn steps(self) -> &'static [i32] {
        match self {
            Direction::Up => &[1],
            Direction::Down => &[-1],
            Direction::Either => &[1, -1],
            Direction::Same => &[0],
        }
    }
}

/// Suit/colour relation between neighbouring cards of a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SequencePredicate {
    SameSuit,
    #[default]
    AlternateColor,
    SameColor,
    /// Rank only; suits are ignored.
    RankOnly,
    /// Any suit except the suit of the card below.
    AnySuitButOwn,
    /// No relation at all, not even rank.
    Any,
}

impl SequencePredicate {
    fn suits_ok(self, lower: &Card, upper: &Card) -> bool {
        match self {
            SequencePredicate::SameSuit => lower.suit == upper.suit,
            SequencePredicate::AlternateColor => lower.color() != upper.color(),
            SequencePredicate::SameColor => lower.color() == upper.color(),
            SequencePredicate::AnySuitButOwn => lower.suit != upper.suit,
            SequencePredicate::RankOnly | SequencePredicate::Any => true,
        }
    }
}

/// Whether `upper` follows `lower` by `step` under `modulus`.
#[must_use]
pub fn rank_follows(lower: u8, upper: u8, step: i32, modulus: u16) -> bool {
    (i32::from(lower) + step).rem_euclid(i32::from(modulus)) == i32::from(upper)
}

/// Whether `cards` (bottom to top) form a face-up run.
#[must_use]
pub fn is_sequence(cards: &[&Card], pred: SequencePredicate, dir: Direction, modulus: u16) -> bool {
    if cards.iter().any(|c| !c.face_up) {
        return false;
    }
    if cards.len() < 2 || pred == SequencePredicate::Any {
        return true;
    }
    dir.steps().iter().any(|&step| {
        cards.windows(2).all(|w| {
            pred.suits_ok(w[0], w[1]) && rank_follows(w[0].rank, w[1].rank, step, modulus)
        })
    })
}

/// Declarative limits and per-card constraints of a stack.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capability {
    /// Every incoming card must have this suit.
    pub suit: Option<u8>,
    /// Every incoming card must have this colour.
    pub color: Option<u8>,
    /// Every incoming card must have this rank.
    pub rank: Option<u8>,
    pub base_suit: Option<u8>,
    pub base_color: Option<u8>,
    pub base_rank: BaseRank,
    pub dir: Direction,
    pub modulus: u16,
    pub min_move: usize,
    pub max_move: usize,
    pub min_accept: usize,
    pub max_accept: usize,
    pub min_cards: usize,
    pub max_cards: usize,
}

impl Default for Capability {
    fn default() -> Self {
        Self {
            suit: None,
            color: None,
            rank: None,
            base_suit: None,
            base_color: None,
            base_rank: BaseRank::Any,
            dir: Direction::Down,
            modulus: NO_WRAP,
            min_move: 1,
            max_move: 0,
            min_accept: 1,
            max_accept: 0,
            min_cards: 0,
            max_cards: UNLIMITED,
        }
    }
}

impl Capability {
    /// Card-level acceptance checks shared by every stack kind: counts,
    /// face orientation, fixed suit/colour/rank, and either the top card's
    /// face or the base constraints when the stack is empty.
    #[must_use]
    pub fn basic_accepts(&self, len: usize, top: Option<&Card>, incoming: &[&Card]) -> bool {
        let n = incoming.len();
        if n < self.min_accept || n > self.max_accept || len + n > self.max_cards {
            return false;
        }
        let fits = |c: &&Card| {
            c.face_up
                && self.suit.map_or(true, |s| c.suit == s)
                && self.color.map_or(true, |col| c.color() == col)
                && self.rank.map_or(true, |r| c.rank == r)
        };
        if !incoming.iter().all(fits) {
            return false;
        }
        match top {
            Some(top) => top.face_up,
            None => {
                let first = incoming[0];
                self.base_suit.map_or(true, |s| first.suit == s)
                    && self.base_color.map_or(true, |col| first.color() == col)
                    && self.base_rank.allows(first.rank)
            }
        }
    }

    /// Card-level release checks: counts, remaining minimum, face orientation.
    #[must_use]
    pub fn basic_can_move(&self, len: usize, moving: &[&Card]) -> bool {
        let n = moving.len();
        n >= self.min_move
            && n <= self.max_move
            && n <= len
            && len - n >= self.min_cards
            && moving.iter().all(|c| c.face_up)
    }
}
