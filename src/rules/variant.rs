//! The per-game configurator.
//!
//! A `Variant` declares the layout once, deals the opening position, and
//! optionally overrides talon behaviour, refills, the win condition and hint
//! scoring. Everything else is shared engine code.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use solitaire_engine::core::{EngineOptions, VariantInfo};
//! use solitaire_engine::error::EngineResult;
//! use solitaire_engine::game::Game;
//! use solitaire_engine::rules::Variant;
//! use solitaire_engine::stacks::{Layout, StackConfig, TalonConfig};
//!
//! #[derive(Debug)]
//! struct OneRow;
//!
//! impl Variant for OneRow {
//!     fn info(&self) -> VariantInfo {
//!         VariantInfo::new(9000, "One Row")
//!     }
//!
//!     fn create_layout(&self, layout: &mut Layout) {
//!         layout.add(StackConfig::talon(TalonConfig::default()));
//!         layout.add(StackConfig::row());
//!     }
//!
//!     fn start_game(&self, game: &mut Game) -> EngineResult<()> {
//!         let rows = game.table().groups().rows.clone();
//!         game.deal_row(&rows, true)?;
//!         Ok(())
//!     }
//! }
//!
//! let mut game = Game::new(Arc::new(OneRow), EngineOptions::manual());
//! game.new_game(None).unwrap();
//! assert_eq!(game.table().stack(game.table().groups().rows[0]).len(), 1);
//! ```

use std::fmt;

use crate::core::config::VariantInfo;
use crate::core::entity::{CardId, StackId};
use crate::error::EngineResult;
use crate::game::Game;
use crate::hint::{DefaultHint, HintProvider};
use crate::stacks::{Layout, Table};

/// Layout configurator and rule overrides for one game.
pub trait Variant: fmt::Debug + Send + Sync {
    /// Static description: id, name, deck composition, save version.
    fn info(&self) -> VariantInfo;

    /// Declare stacks and group order. Called once per `Game`.
    fn create_layout(&self, layout: &mut Layout);

    /// Deal the opening position from the talon. Runs before history starts,
    /// so nothing dealt here is undoable.
    fn start_game(&self, game: &mut Game) -> EngineResult<()>;

    /// Reorder the shuffled deck before it is placed on the talon (last card
    /// ends up on top).
    fn shuffle_hook(&self, _table: &Table, cards: Vec<CardId>) -> Vec<CardId> {
        cards
    }

    /// Refill `stack` after cards were taken from it. Runs in the fill phase
    /// inside the same logical move.
    fn fill_stack(&self, _game: &mut Game, _stack: StackId) -> EngineResult<()> {
        Ok(())
    }

    /// `None` uses the talon's `DealMode`.
    fn can_deal_cards(&self, _game: &Game) -> Option<bool> {
        None
    }

    /// Deal from the talon; `None` uses the talon's `DealMode`. Returns the
    /// number of cards dealt.
    fn deal_cards(&self, _game: &mut Game) -> Option<EngineResult<usize>> {
        None
    }

    /// Default: every card is on a foundation.
    fn is_game_won(&self, game: &Game) -> bool {
        game.table().foundation_cards() == game.table().cards().len()
    }

    fn can_undo(&self, _game: &Game) -> bool {
        true
    }

    fn can_save_game(&self, _game: &Game) -> bool {
        true
    }

    /// Whether a save written at variant `version` can be loaded.
    fn can_load_game(&self, version: u32) -> bool {
        version == self.info().game_version
    }

    fn hint_provider(&self) -> Box<dyn HintProvider> {
        Box::new(DefaultHint::default())
    }
}
