//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use solitaire_engine::core::{EngineOptions, GameRandom, StackId, VariantInfo};
use solitaire_engine::error::{EngineError, EngineResult};
use solitaire_engine::game::Game;
use solitaire_engine::rules::Variant;
use solitaire_engine::stacks::{DealMode, Layout, SequencePredicate, StackConfig, Table, TalonConfig};
use solitaire_engine::CardId;

pub const TALON: StackId = StackId::new(0);
pub const FOUNDATION: StackId = StackId::new(1);
pub const ROW_A: StackId = StackId::new(2);
pub const ROW_B: StackId = StackId::new(3);

/// Opening instructions for a `Bench` game.
#[derive(Clone, Copy, Debug)]
pub enum Step {
    /// Move the card with this suit and rank from the talon onto a stack.
    Place { suit: u8, rank: u8, to: StackId },
    /// Turn the top card of a stack over.
    Flip(StackId),
}

/// A test table: a talon turned face up, one foundation, two rows.
#[derive(Clone, Debug)]
pub struct Bench {
    pub foundation: StackConfig,
    pub row: StackConfig,
    pub steps: Vec<Step>,
    /// Refilling this stack fails.
    pub broken_fill: Option<StackId>,
}

impl Bench {
    pub fn new(foundation: StackConfig, row: StackConfig) -> Self {
        Self {
            foundation,
            row,
            steps: Vec::new(),
            broken_fill: None,
        }
    }

    pub fn place(mut self, suit: u8, rank: u8, to: StackId) -> Self {
        self.steps.push(Step::Place { suit, rank, to });
        self
    }

    pub fn flip(mut self, stack: StackId) -> Self {
        self.steps.push(Step::Flip(stack));
        self
    }

    pub fn broken_fill(mut self, stack: StackId) -> Self {
        self.broken_fill = Some(stack);
        self
    }

    /// Deal a game of this bench from `seed`.
    pub fn start(self, seed: u128) -> Game {
        let mut game = Game::new(Arc::new(self), EngineOptions::manual());
        game.new_game(Some(GameRandom::from_seed(seed))).unwrap();
        game
    }
}

impl Variant for Bench {
    fn info(&self) -> VariantInfo {
        VariantInfo::new(9001, "Bench")
    }

    fn create_layout(&self, layout: &mut Layout) {
        layout.add(StackConfig::talon(TalonConfig {
            max_rounds: 1,
            num_deal: 1,
            mode: DealMode::Custom,
        }));
        layout.add(self.foundation.clone());
        layout.add(self.row.clone());
        layout.add(self.row.clone());
    }

    fn start_game(&self, game: &mut Game) -> EngineResult<()> {
        game.flip_all_move(TALON)?;
        for step in &self.steps {
            match *step {
                Step::Place { suit, rank, to } => {
                    let id = find(game.table(), suit, rank);
                    let pos = game
                        .table()
                        .stack(TALON)
                        .cards()
                        .iter()
                        .position(|&c| c == id)
                        .unwrap();
                    game.single_card_move(TALON, to, pos)?;
                }
                Step::Flip(stack) => game.flip_move(stack)?,
            }
        }
        Ok(())
    }

    fn fill_stack(&self, game: &mut Game, stack: StackId) -> EngineResult<()> {
        if self.broken_fill == Some(stack) {
            // Leave an atom behind before failing.
            game.flip_move(stack)?;
            return Err(EngineError::invariant(format!("cannot refill {stack}")));
        }
        Ok(())
    }
}

/// A row that accepts anything.
pub fn open_row() -> StackConfig {
    StackConfig::row().with_sequence(SequencePredicate::Any)
}

/// The first card with this suit and rank.
pub fn find(table: &Table, suit: u8, rank: u8) -> CardId {
    table
        .cards()
        .iter()
        .find(|c| c.suit == suit && c.rank == rank)
        .map(|c| c.id)
        .unwrap()
}

/// Faces of a stack, bottom to top.
pub fn faces(game: &Game, stack: StackId) -> Vec<bool> {
    let table = game.table();
    table.stack(stack).cards().iter().map(|&c| table.card(c).face_up).collect()
}
