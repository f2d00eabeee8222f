//! FreeCell: four cells, eight rows, everything dealt face up.
//!
//! Game numbers below 32000 reproduce the Microsoft deals. Rows build down
//! in alternate colours; a pile may move as a whole if enough cells and
//! empty rows are free to shuttle it card by card.

use std::sync::Arc;

use crate::cards::{CLUBS, DIAMONDS, HEARTS, SPADES};
use crate::core::config::VariantInfo;
use crate::error::EngineResult;
use crate::game::Game;
use crate::hint::{DefaultHint, HintProvider};
use crate::rules::Variant;
use crate::stacks::{DealMode, Layout, StackConfig, SuperMoveLimit, TalonConfig};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FreeCell {
    /// Drop the super-move limit: whole piles always move.
    pub relaxed: bool,
}

impl FreeCell {
    #[must_use]
    pub fn relaxed() -> Self {
        Self { relaxed: true }
    }
}

impl Variant for FreeCell {
    fn info(&self) -> VariantInfo {
        if self.relaxed {
            VariantInfo::new(5, "Relaxed FreeCell")
        } else {
            VariantInfo::new(8, "FreeCell")
        }
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
            layout.add(StackConfig::foundation(suit).named(format!("foundation {i}")).at(4 + i as i32, 0));
        }
        for i in 0..8 {
            let mut row = StackConfig::row().named(format!("row {i}")).at(i, 1).with_offset(0, 1);
            if !self.relaxed {
                row = row.with_rule(Arc::new(SuperMoveLimit));
            }
            layout.add(row);
        }
        for i in 0..4 {
            layout.add(StackConfig::reserve().named(format!("cell {i}")).at(i, 0));
        }
    }

    /// Seven cards on the first four rows, six on the rest.
    fn start_game(&self, game: &mut Game) -> EngineResult<()> {
        let rows = game.table().groups().rows.clone();
        for _ in 0..6 {
            game.deal_row(&rows, true)?;
        }
        game.deal_row(&rows[..4], true)?;
        Ok(())
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

    fn game(variant: FreeCell) -> Game {
        let mut game = Game::new(Arc::new(variant), EngineOptions::manual());
        game.new_game(Some(GameRandom::ms(1).unwrap())).unwrap();
        game
    }

    #[test]
    fn test_deal_shape() {
        let game = game(FreeCell::default());
        let table = game.table();
        let lens: Vec<usize> = table.groups().rows.iter().map(|&r| table.stack(r).len()).collect();
        assert_eq!(lens, vec![7, 7, 7, 7, 6, 6, 6, 6]);
        assert!(table.cards().iter().all(|c| c.face_up));
        assert!(!game.can_deal_cards());
        assert_eq!(game.game_number(crate::core::game_number::GameNumberFormat::Plain), "ms1");
    }

    #[test]
    fn test_cells_hold_one_card() {
        let mut game = game(FreeCell::default());
        let rows = game.table().groups().rows.clone();
        let cell = game.table().groups().reserves[0];
        assert!(game.play_move(1, rows[0], cell).unwrap());
        assert!(!game.play_move(1, rows[1], cell).unwrap());
        assert_eq!(game.table().free_reserves(), 3);
    }
}
