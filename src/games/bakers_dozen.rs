//! Baker's Dozen: thirteen rows of four, kings sunk to the bottom.
//!
//! Rows build down regardless of suit, one card at a time, and an emptied
//! row stays empty.

use crate::cards::{CLUBS, DIAMONDS, HEARTS, KING, SPADES};
use crate::core::config::VariantInfo;
use crate::core::entity::CardId;
use crate::error::EngineResult;
use crate::game::Game;
use crate::hint::{DefaultHint, HintProvider};
use crate::rules::Variant;
use crate::stacks::{BaseRank, DealMode, Layout, SequencePredicate, StackConfig, Table, TalonConfig};

const ROWS: usize = 13;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BakersDozen;

impl Variant for BakersDozen {
    fn info(&self) -> VariantInfo {
        VariantInfo::new(31, "Baker's Dozen")
    }

    fn create_layout(&self, layout: &mut Layout) {
        layout.add(
            StackConfig::talon(TalonConfig {
                max_rounds: 1,
                num_deal: 0,
                mode: DealMode::Custom,
            })
            .named("talon"),
        );
        for (i, suit) in [CLUBS, SPADES, HEARTS, DIAMONDS].into_iter().enumerate() {
            layout.add(StackConfig::foundation(suit).named(format!("foundation {i}")).at(9, i as i32));
        }
        for i in 0..ROWS as i32 {
            layout.add(
                StackConfig::row()
                    .with_sequence(SequencePredicate::RankOnly)
                    .with_base_rank(BaseRank::NoRank)
                    .with_max_move(1)
                    .with_max_accept(1)
                    .named(format!("row {i}"))
                    .at(i % 7, i / 7)
                    .with_offset(1, 0),
            );
        }
    }

    /// Within each column of the deal, swap every king below the first
    /// non-king dealt before it.
    fn shuffle_hook(&self, table: &Table, mut cards: Vec<CardId>) -> Vec<CardId> {
        // The talon deals from the end of the list.
        cards.reverse();
        let is_king = |c: CardId| table.card(c).rank == KING;
        for i in 0..cards.len() {
            if !is_king(cards[i]) {
                continue;
            }
            let mut j = i % ROWS;
            while j < i {
                if !is_king(cards[j]) {
                    cards.swap(i, j);
                    break;
                }
                j += ROWS;
            }
        }
        cards.reverse();
        cards
    }

    fn start_game(&self, game: &mut Game) -> EngineResult<()> {
        let rows = game.table().groups().rows.clone();
        for _ in 0..4 {
            game.deal_row(&rows, true)?;
        }
        Ok(())
    }

    fn hint_provider(&self) -> Box<dyn HintProvider> {
        Box::new(DefaultHint::cautious())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::core::config::EngineOptions;
    use crate::core::rng::GameRandom;

    #[test]
    fn test_kings_sit_below_other_cards() {
        for seed in [1u128, 99, 4096, 123_456_789] {
            let mut game = Game::new(Arc::new(BakersDozen), EngineOptions::manual());
            game.new_game(Some(GameRandom::from_seed(seed))).unwrap();
            let table = game.table();
            for &row in &table.groups().rows {
                let ranks: Vec<u8> = table.stack(row).cards().iter().map(|&c| table.card(c).rank).collect();
                assert_eq!(ranks.len(), 4);
                let first_other = ranks.iter().position(|&r| r != KING).unwrap_or(ranks.len());
                assert!(ranks[first_other..].iter().all(|&r| r != KING), "seed {seed}: {ranks:?}");
            }
        }
    }

    #[test]
    fn test_empty_row_stays_empty() {
        let mut game = Game::new(Arc::new(BakersDozen), EngineOptions::manual());
        game.new_game(Some(GameRandom::from_seed(5))).unwrap();
        let table = game.table();
        let row = table.groups().rows[0];
        let top = table.stack(row).top().unwrap();
        assert!(!table.accepts_cards_with(row, None, &[top], &[]));
    }
}
