//! Hint values and the hint accumulator.

use serde::{Deserialize, Serialize};

use crate::core::entity::StackId;

/// How much effort the search spends and how scores are reported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HintLevel {
    /// Player-facing hint. Scores are flattened to multiples of 10000 so
    /// that close candidates look equal.
    #[default]
    Show = 0,
    /// Exact scores, extra search steps.
    Score = 1,
    /// Demo play: also proposes flips and deals.
    Demo = 2,
}

/// Display colour of a hint's score.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HintColor {
    #[default]
    Black,
    Red,
    Blue,
}

/// What playing a hint does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HintAction {
    Deal,
    Flip(StackId),
    Move {
        ncards: usize,
        from: StackId,
        to: StackId,
    },
}

/// One ranked suggestion.
///
/// `ncards == 0` is a deal, `to == Some(from)` is a flip, anything else a
/// move. `forced` is a follow-up that must be played next.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    pub score: i64,
    /// Insertion order, negated; keeps equal scores in discovery order.
    pub pos: i64,
    pub ncards: usize,
    pub from: StackId,
    pub to: Option<StackId>,
    pub color: HintColor,
    pub forced: Option<Box<Hint>>,
}

impl Hint {
    /// A forced follow-up move. Scores above every regular hint.
    #[must_use]
    pub fn forced_move(ncards: usize, from: StackId, to: StackId) -> Self {
        Self {
            score: 999_999,
            pos: 0,
            ncards,
            from,
            to: Some(to),
            color: HintColor::Blue,
            forced: None,
        }
    }

    #[must_use]
    pub fn action(&self) -> HintAction {
        match self.to {
            _ if self.ncards == 0 => HintAction::Deal,
            None => HintAction::Deal,
            Some(to) if to == self.from => HintAction::Flip(to),
            Some(to) => HintAction::Move {
                ncards: self.ncards,
                from: self.from,
                to,
            },
        }
    }
}

/// Collects hints during one search.
#[derive(Clone, Debug)]
pub struct HintList {
    level: HintLevel,
    hints: Vec<Hint>,
}

impl HintList {
    #[must_use]
    pub fn new(level: HintLevel) -> Self {
        Self {
            level,
            hints: Vec::new(),
        }
    }

    #[must_use]
    pub fn level(&self) -> HintLevel {
        self.level
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hints.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.hints.len()
    }

    /// Add a hint. Negative scores are dropped.
    pub fn add(
        &mut self,
        score: i64,
        ncards: usize,
        from: StackId,
        to: Option<StackId>,
        color: HintColor,
        forced: Option<Hint>,
    ) {
        if score < 0 {
            return;
        }
        let score = if self.level == HintLevel::Show {
            score / 10_000 * 10_000
        } else {
            score
        };
        let pos = -(self.hints.len() as i64);
        self.hints.push(Hint {
            score,
            pos,
            ncards,
            from,
            to,
            color,
            forced: forced.map(Box::new),
        });
    }

    /// Hints ordered by `(score, pos)`, best first.
    #[must_use]
    pub fn into_sorted(mut self) -> Vec<Hint> {
        self.hints.sort_by(|a, b| (b.score, b.pos).cmp(&(a.score, a.pos)));
        self.hints
    }
}
