//! Hint ranking, forced follow-ups and demo play.

mod common;

use std::sync::Arc;

use common::{open_row, Bench, FOUNDATION, ROW_A, ROW_B, TALON};
use solitaire_engine::cards::{ACE, CLUBS, HEARTS};
use solitaire_engine::hint::get_hints;
use solitaire_engine::stacks::StackConfig;
use solitaire_engine::{EngineOptions, Game, GameRandom, Hint, HintAction, HintLevel, Klondike};

fn klondike(seed: u128) -> Game {
    let mut game = Game::new(Arc::new(Klondike::default()), EngineOptions::manual());
    game.new_game(Some(GameRandom::from_seed(seed))).unwrap();
    game
}

// =============================================================================
// Ranking
// =============================================================================

/// A face-down row top is the first thing the demo turns over.
#[test]
fn test_demo_flips_first() {
    let game = Bench::new(StackConfig::foundation(CLUBS), open_row())
        .place(HEARTS, 5, ROW_A)
        .flip(ROW_A)
        .place(CLUBS, ACE, ROW_B)
        .start(3);
    let hints = game.hints(HintLevel::Demo);
    assert_eq!(hints.len(), 1);
    assert_eq!(hints[0].action(), HintAction::Flip(ROW_A));
}

/// An ace on a row drops at the top of the drop band.
#[test]
fn test_ace_drop_score() {
    let mut game = Bench::new(StackConfig::foundation(CLUBS), open_row())
        .place(CLUBS, ACE, ROW_A)
        .start(3);
    let hints = game.hints(HintLevel::Score);
    assert_eq!(
        hints[0].action(),
        HintAction::Move {
            ncards: 1,
            from: ROW_A,
            to: FOUNDATION
        }
    );
    assert_eq!(hints[0].score, 92_012);

    let shown = game.show_hint().unwrap();
    assert_eq!(shown.score, 90_000);
    assert_eq!(game.stats().hints, 1);
}

/// Hints come best first, and equal scores keep discovery order.
#[test]
fn test_hints_are_sorted() {
    for seed in [1u128, 77, 4242, 123_456_789_012] {
        let game = klondike(seed);
        for level in [HintLevel::Show, HintLevel::Score, HintLevel::Demo] {
            let hints = game.hints(level);
            for pair in hints.windows(2) {
                assert!((pair[0].score, pair[0].pos) >= (pair[1].score, pair[1].pos), "{level:?} {pair:?}");
            }
        }
    }
}

/// Every proposed move is one the table would accept.
#[test]
fn test_move_hints_are_legal() {
    for seed in [2u128, 31, 9000, 55_555_555_555] {
        let game = klondike(seed);
        let table = game.table();
        for hint in game.hints(HintLevel::Demo) {
            if let HintAction::Move { ncards, from, to } = hint.action() {
                assert!(table.can_move_top(from, ncards), "{hint:?}");
                assert!(table.accepts_cards(to, Some(from), table.top_cards(from, ncards)), "{hint:?}");
            }
        }
    }
}

/// A hint with a forced follow-up dictates the next hint.
#[test]
fn test_forced_follow_up_is_returned_alone() {
    let game = Bench::new(StackConfig::foundation(CLUBS), open_row())
        .place(CLUBS, ACE, ROW_A)
        .start(3);
    let taken = Hint {
        forced: Some(Box::new(Hint::forced_move(1, ROW_B, FOUNDATION))),
        ..Hint::forced_move(1, ROW_A, ROW_B)
    };
    let hints = get_hints(&game, HintLevel::Demo, Some(&taken));
    assert_eq!(hints, vec![Hint::forced_move(1, ROW_B, FOUNDATION)]);
}

// =============================================================================
// Demo play
// =============================================================================

/// The demo drops both clubs and then runs out of ideas.
#[test]
fn test_demo_plays_until_stuck() {
    let mut game = Bench::new(StackConfig::foundation(CLUBS), open_row())
        .place(CLUBS, ACE, ROW_A)
        .place(CLUBS, 1, ROW_B)
        .start(3);
    let mut played = 0;
    while game.play_demo_move().unwrap() {
        played += 1;
        assert!(played <= 2);
    }
    assert_eq!(played, 2);
    assert_eq!(game.table().stack(FOUNDATION).len(), 2);
    assert_eq!(game.stats().demo_moves, 2);
    assert_eq!(game.stats().player_moves, 0);
    assert!(game.stats().is_perfect());
    assert!(!game.table().stack(TALON).is_empty());

    game.undo().unwrap();
    assert_eq!(game.table().stack(ROW_B).len(), 1);
}
