//! Spider: two decks, ten rows, full suits go home as one run.
//!
//! Rows build down regardless of suit but only same-suit runs move. The
//! talon deals one face-up card onto every row; strict Spider refuses to
//! deal while a row is empty.

use crate::core::config::VariantInfo;
use crate::error::EngineResult;
use crate::game::Game;
use crate::hint::{DefaultHint, HintProvider};
use crate::rules::Variant;
use crate::stacks::{DealMode, DropPolicy, Layout, SequencePredicate, StackConfig, TalonConfig};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Spider {
    /// Allow dealing onto empty rows.
    pub relaxed: bool,
}

impl Spider {
    #[must_use]
    pub fn relaxed() -> Self {
        Self { relaxed: true }
    }
}

impl Variant for Spider {
    fn info(&self) -> VariantInfo {
        let info = if self.relaxed {
            VariantInfo::new(10, "Relaxed Spider")
        } else {
            VariantInfo::new(11, "Spider")
        };
        info.with_decks(2)
    }

    fn create_layout(&self, layout: &mut Layout) {
        layout.add(
            StackConfig::talon(TalonConfig {
                max_rounds: 1,
                num_deal: 10,
                mode: DealMode::Rows {
                    require_no_empty_rows: !self.relaxed,
                },
            })
            .named("talon"),
        );
        for i in 0..8 {
            layout.add(StackConfig::spider_foundation().named(format!("foundation {i}")).at(2 + i, 0));
        }
        for i in 0..10 {
            layout.add(
                StackConfig::row()
                    .with_accept(SequencePredicate::RankOnly)
                    .with_moveable(SequencePredicate::SameSuit)
                    .with_drop(DropPolicy::LongestRun)
                    .named(format!("row {i}"))
                    .at(i, 1)
                    .with_offset(0, 1),
            );
        }
    }

    /// Six cards on rows 0, 3, 6 and 9, five on the rest, tops face up.
    fn start_game(&self, game: &mut Game) -> EngineResult<()> {
        let rows = game.table().groups().rows.clone();
        for _ in 0..4 {
            game.deal_row(&rows, false)?;
        }
        game.deal_row(&[rows[0], rows[3], rows[6], rows[9]], false)?;
        game.deal_row(&rows, true)?;
        Ok(())
    }

    fn hint_provider(&self) -> Box<dyn HintProvider> {
        Box::new(DefaultHint::cautious())
    }
}
