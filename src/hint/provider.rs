//! The hint provider seam and the shared hint driver.

use super::list::{Hint, HintColor, HintLevel, HintList};
use crate::game::Game;

/// Score of a flip proposed in demo play. At or above 90000 a flip wins
/// outright and the search stops.
pub const SCORE_FLIP: i64 = 100_000;
/// Score of a deal proposed in demo play.
pub const SCORE_DEAL: i64 = 0;

/// Per-variant hint intelligence.
pub trait HintProvider: Send + Sync {
    /// Add move hints for the current position.
    fn compute_hints(&self, game: &Game, hints: &mut HintList);

    fn flip_score(&self) -> i64 {
        SCORE_FLIP
    }

    fn deal_score(&self) -> i64 {
        SCORE_DEAL
    }
}

/// Ranked hints for the current position, best first.
///
/// A forced follow-up of `taken` is returned alone. In demo play flips come
/// first and a deal is offered last.
#[must_use]
pub fn get_hints(game: &Game, level: HintLevel, taken: Option<&Hint>) -> Vec<Hint> {
    if let Some(forced) = taken.and_then(|h| h.forced.as_deref()) {
        return vec![forced.clone()];
    }
    let provider = game.variant().hint_provider();
    let mut hints = HintList::new(level);
    let table = game.table();

    if level >= HintLevel::Demo {
        let flip_score = provider.flip_score();
        for stack in table.stacks() {
            if table.can_flip_card(stack.id()) {
                hints.add(flip_score, 1, stack.id(), Some(stack.id()), HintColor::Black, None);
                if flip_score >= 90_000 {
                    return hints.into_sorted();
                }
            }
        }
    }

    provider.compute_hints(game, &mut hints);

    if level >= HintLevel::Demo && game.can_deal_cards() {
        if let Some(talon) = table.groups().talon {
            hints.add(provider.deal_score(), 0, talon, None, HintColor::Black, None);
        }
    }
    let hints = hints.into_sorted();
    tracing::trace!(?level, count = hints.len(), "computed hints");
    hints
}
