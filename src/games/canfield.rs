//! Canfield: foundations start at a dealt base rank and wrap King to Ace.
//!
//! The first talon card goes to a foundation and fixes the base rank for
//! all four; its rank is kept in the variant state so it survives saves.
//! Thirteen cards form the reserve, which refills emptied rows. The talon
//! deals three at a time with unlimited redeals.

use std::sync::Arc;

use crate::cards::{CLUBS, DIAMONDS, HEARTS, SPADES};
use crate::core::config::VariantInfo;
use crate::core::entity::{CardId, StackId};
use crate::error::EngineResult;
use crate::game::Game;
use crate::hint::{DefaultHint, HintProvider};
use crate::rules::Variant;
use crate::stacks::{
    BaseRank, DealMode, Direction, Layout, MatchFoundationBase, RuleContext, StackConfig, StackRule,
    TalonConfig, UNLIMITED,
};

const RESERVE_CARDS: usize = 13;

/// Row-to-row moves take one card or a whole row.
#[derive(Clone, Copy, Debug, Default)]
pub struct WholeRowMoves;

impl StackRule for WholeRowMoves {
    fn name(&self) -> &'static str {
        "whole_row_moves"
    }

    fn accepts(&self, ctx: &RuleContext<'_>, cards: &[CardId]) -> bool {
        match ctx.from {
            Some(from) if ctx.table.groups().rows.contains(&from) => {
                cards.len() == 1 || cards.len() == ctx.table.stack(from).len()
            }
            _ => true,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Canfield;

impl Canfield {
    /// Rank of the card that opened the foundations.
    #[must_use]
    pub fn base_rank(game: &Game) -> Option<u8> {
        game.variant_state().first().copied()
    }
}

impl Variant for Canfield {
    fn info(&self) -> VariantInfo {
        VariantInfo::new(105, "Canfield").with_redeals(-1)
    }

    fn create_layout(&self, layout: &mut Layout) {
        layout.add(
            StackConfig::talon(TalonConfig {
                max_rounds: -1,
                num_deal: 3,
                mode: DealMode::Waste { shuffle_on_redeal: false },
            })
            .named("talon"),
        );
        layout.add(StackConfig::waste().named("waste").at(1, 0));
        for (i, suit) in [CLUBS, SPADES, HEARTS, DIAMONDS].into_iter().enumerate() {
            layout.add(
                StackConfig::foundation(suit)
                    .with_base_rank(BaseRank::Any)
                    .with_dir(Direction::Up)
                    .wrapping(13)
                    .with_max_move(0)
                    .with_rule(Arc::new(MatchFoundationBase))
                    .named(format!("foundation {i}"))
                    .at(3 + i as i32, 0),
            );
        }
        layout.add(
            StackConfig::reserve()
                .with_max_accept(0)
                .with_max_cards(UNLIMITED)
                .named("reserve")
                .at(0, 1)
                .with_offset(0, 1),
        );
        for i in 0..4 {
            layout.add(
                StackConfig::row()
                    .wrapping(13)
                    .with_rule(Arc::new(WholeRowMoves))
                    .named(format!("row {i}"))
                    .at(2 + i, 1)
                    .with_offset(0, 1),
            );
        }
    }

    fn start_game(&self, game: &mut Game) -> EngineResult<()> {
        let groups = game.table().groups().clone();
        let talon = game.talon()?;
        let reserve = groups.reserves[0];

        let base = game.deal_base_card(&groups.foundations)?;
        let rank = game
            .table()
            .stack(base)
            .top()
            .map(|c| game.table().card(c).rank)
            .unwrap_or_default();
        game.set_variant_state(vec![rank])?;

        for _ in 0..RESERVE_CARDS {
            game.move_move(1, talon, reserve)?;
        }
        game.flip_move(reserve)?;
        game.deal_row(&groups.rows, true)?;
        game.deal_cards()?;
        tracing::debug!(base_rank = rank, "canfield base card dealt");
        Ok(())
    }

    /// An emptied row takes the top reserve card.
    fn fill_stack(&self, game: &mut Game, stack: StackId) -> EngineResult<()> {
        let groups = game.table().groups();
        if !groups.rows.contains(&stack) || !game.table().stack(stack).is_empty() {
            return Ok(());
        }
        let reserve = groups.reserves[0];
        let Some(top) = game.table().stack(reserve).top() else {
            return Ok(());
        };
        if !game.table().card(top).face_up {
            game.flip_move(reserve)?;
        }
        game.move_move(1, reserve, stack)
    }

    fn hint_provider(&self) -> Box<dyn HintProvider> {
        Box::new(DefaultHint::cautious())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::core::config::EngineOptions;
    use crate::core::rng::GameRandom;
    use crate::game::BookmarkKind;

    fn game(seed: u128) -> Game {
        let mut game = Game::new(Arc::new(Canfield), EngineOptions::manual());
        game.new_game(Some(GameRandom::from_seed(seed))).unwrap();
        game
    }

    #[test]
    fn test_opening_position() {
        let game = game(1905);
        let table = game.table();
        let groups = table.groups();
        let reserve = table.stack(groups.reserves[0]);
        assert_eq!(reserve.len(), RESERVE_CARDS);
        assert!(table.card(reserve.top().unwrap()).face_up);
        assert!(groups.rows.iter().all(|&r| table.stack(r).len() == 1));
        assert_eq!(table.stack(groups.waste.unwrap()).len(), 3);
        assert_eq!(table.stack(groups.talon.unwrap()).len(), 52 - 1 - 13 - 4 - 3);
        assert_eq!(table.foundation_cards(), 1);

        let base = groups.foundations.iter().find_map(|&f| table.stack(f).top()).unwrap();
        assert_eq!(Canfield::base_rank(&game), Some(table.card(base).rank));
        assert!(game.moves().is_empty());
    }

    #[test]
    fn test_empty_foundation_needs_base_rank() {
        let game = game(77);
        let table = game.table();
        let rank = Canfield::base_rank(&game).unwrap();
        let empty = table
            .groups()
            .foundations
            .iter()
            .copied()
            .find(|&f| table.stack(f).is_empty())
            .unwrap();
        let suit = table.stack(empty).cap().suit.unwrap();
        let other = table
            .cards()
            .iter()
            .find(|c| c.suit == suit && c.rank != rank)
            .unwrap();
        let matching = table
            .cards()
            .iter()
            .find(|c| c.suit == suit && c.rank == rank)
            .unwrap();
        let mut probe = table.clone();
        probe.set_face(other.id, true).unwrap();
        probe.set_face(matching.id, true).unwrap();
        assert!(!probe.accepts_cards_with(empty, None, &[other.id], &[]));
        assert!(probe.accepts_cards_with(empty, None, &[matching.id], &[]));
    }

    #[test]
    fn test_base_rank_survives_save() {
        let game = game(31);
        let mut buf = Vec::new();
        game.save(&mut buf, BookmarkKind::Save).unwrap();
        let loaded = Game::load(Arc::new(Canfield), EngineOptions::manual(), buf.as_slice()).unwrap();
        assert_eq!(Canfield::base_rank(&loaded), Canfield::base_rank(&game));
        assert_eq!(loaded.snapshot(), game.snapshot());
    }
}
