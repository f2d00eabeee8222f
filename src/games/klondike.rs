//! Klondike: one deck, seven rows, draw one, unlimited redeals.

use crate::cards::{CLUBS, DIAMONDS, HEARTS, KING, SPADES};
use crate::core::config::VariantInfo;
use crate::error::EngineResult;
use crate::game::Game;
use crate::rules::Variant;
use crate::stacks::{BaseRank, DealMode, Layout, StackConfig, TalonConfig};

/// Classic Klondike.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Klondike {
    /// Cards turned onto the waste per deal.
    pub num_deal: usize,
    /// `-1` for unlimited.
    pub redeals: i32,
}

impl Default for Klondike {
    fn default() -> Self {
        Self {
            num_deal: 1,
            redeals: -1,
        }
    }
}

impl Klondike {
    /// Draw three, unlimited redeals.
    #[must_use]
    pub fn draw_three() -> Self {
        Self {
            num_deal: 3,
            ..Self::default()
        }
    }
}

impl Variant for Klondike {
    fn info(&self) -> VariantInfo {
        let (id, name) = match self.num_deal {
            1 => (2, "Klondike"),
            _ => (18, "Klondike (Draw 3)"),
        };
        VariantInfo::new(id, name).with_redeals(self.redeals)
    }

    fn create_layout(&self, layout: &mut Layout) {
        let info = self.info();
        layout.add(
            StackConfig::talon(TalonConfig {
                max_rounds: info.max_rounds(),
                num_deal: self.num_deal,
                mode: DealMode::Waste { shuffle_on_redeal: false },
            })
            .named("talon")
            .at(0, 0),
        );
        layout.add(StackConfig::waste().named("waste").at(1, 0));
        for (i, suit) in [CLUBS, SPADES, HEARTS, DIAMONDS].into_iter().enumerate() {
            layout.add(
                StackConfig::foundation(suit)
                    .named(format!("foundation {i}"))
                    .at(3 + i as i32, 0),
            );
        }
        for i in 0..7 {
            layout.add(
                StackConfig::row()
                    .with_base_rank(BaseRank::Rank(KING))
                    .named(format!("row {i}"))
                    .at(i, 1)
                    .with_offset(0, 1),
            );
        }
    }

    /// Row `i` gets `i` face-down cards and one face-up card.
    fn start_game(&self, game: &mut Game) -> EngineResult<()> {
        let rows = game.table().groups().rows.clone();
        for i in 1..rows.len() {
            game.deal_row(&rows[i..], false)?;
        }
        game.deal_row(&rows, true)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::core::config::EngineOptions;
    use crate::core::rng::GameRandom;

    #[test]
    fn test_draw_three_deals_three() {
        let mut game = Game::new(Arc::new(Klondike::draw_three()), EngineOptions::manual());
        game.new_game(Some(GameRandom::from_seed(600))).unwrap();
        let waste = game.table().groups().waste.unwrap();
        assert_eq!(game.deal_cards().unwrap(), 3);
        assert_eq!(game.table().stack(waste).len(), 3);
        assert_eq!(game.info().id, 18);
    }

    #[test]
    fn test_empty_row_takes_only_kings() {
        let game = {
            let mut g = Game::new(Arc::new(Klondike::default()), EngineOptions::manual());
            g.new_game(Some(GameRandom::from_seed(17))).unwrap();
            g
        };
        let table = game.table();
        let row = table.groups().rows[0];
        let cap = table.stack(row).cap();
        assert_eq!(cap.base_rank, BaseRank::Rank(KING));
        assert!(!cap.base_rank.allows(KING - 1));
    }
}
