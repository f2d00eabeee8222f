//! Undo/redo behaviour of whole games.

mod common;

use std::sync::Arc;

use common::{faces, open_row, Bench, ROW_A, ROW_B};
use proptest::prelude::*;
use solitaire_engine::cards::{CLUBS, DIAMONDS, HEARTS, SPADES};
use solitaire_engine::core::Commit;
use solitaire_engine::stacks::StackConfig;
use solitaire_engine::{BookmarkKind, EngineError, EngineOptions, Game, GameRandom, Klondike, Spider, Variant};

fn bench() -> Game {
    Bench::new(StackConfig::foundation(CLUBS), open_row())
        .place(HEARTS, 10, ROW_A)
        .flip(ROW_A)
        .place(SPADES, 9, ROW_A)
        .place(DIAMONDS, 8, ROW_A)
        .place(CLUBS, 7, ROW_A)
        .place(HEARTS, 2, ROW_B)
        .start(2718)
}

/// One step of a random walk through a game.
#[derive(Clone, Copy, Debug)]
enum Action {
    Candidate(usize),
    Deal,
    Flip(usize),
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        3 => (0usize..64).prop_map(Action::Candidate),
        1 => Just(Action::Deal),
        1 => (0usize..16).prop_map(Action::Flip),
    ]
}

/// Play `action` if it applies; most random picks are no-ops.
fn play(game: &mut Game, action: Action) {
    match action {
        Action::Candidate(i) => {
            let moves = game.candidate_moves();
            if !moves.is_empty() {
                let m = moves[i % moves.len()];
                assert!(game.play_move(m.ncards, m.from, m.to).unwrap());
            }
        }
        Action::Deal => {
            game.deal_cards().unwrap();
        }
        Action::Flip(i) => {
            let n = game.table().stacks().len();
            let stack = game.table().stacks()[i % n].id();
            game.play_flip(stack).unwrap();
        }
    }
}

fn new_game(variant: Arc<dyn Variant>, options: EngineOptions, seed: u128) -> Game {
    let mut game = Game::new(variant, options);
    game.new_game(Some(GameRandom::from_seed(seed))).unwrap();
    game
}

// =============================================================================
// Scenarios
// =============================================================================

/// Moving three cards between rows and undoing restores both rows exactly.
#[test]
fn test_three_card_move_undo() {
    let mut game = bench();
    let a_before = game.table().stack(ROW_A).cards().to_vec();
    let b_before = game.table().stack(ROW_B).cards().to_vec();
    let a_faces = faces(&game, ROW_A);
    let b_faces = faces(&game, ROW_B);
    assert_eq!(a_faces, vec![false, true, true, true]);
    let before = game.snapshot();

    game.move_move(3, ROW_A, ROW_B).unwrap();
    assert!(game.finish_move());
    assert_eq!(game.table().stack(ROW_A).len(), 1);
    assert_eq!(game.table().stack(ROW_B).len(), 4);

    game.undo().unwrap();
    assert_eq!(game.table().stack(ROW_A).cards(), a_before.as_slice());
    assert_eq!(game.table().stack(ROW_B).cards(), b_before.as_slice());
    assert_eq!(faces(&game, ROW_A), a_faces);
    assert_eq!(faces(&game, ROW_B), b_faces);
    assert_eq!(game.snapshot(), before);
}

/// Replaying the move that was undone keeps the redo tail.
#[test]
fn test_same_move_keeps_redo_tail() {
    let mut game = bench();
    game.move_move(1, ROW_A, ROW_B).unwrap();
    game.finish_move();
    game.move_move(1, ROW_A, ROW_B).unwrap();
    game.finish_move();
    game.undo().unwrap();
    game.undo().unwrap();

    game.move_move(1, ROW_A, ROW_B).unwrap();
    game.finish_move();
    assert_eq!(game.moves().len(), 2);
    assert_eq!(game.moves().index(), 1);
    assert!(game.can_redo());
}

/// A different move drops the redo tail.
#[test]
fn test_divergent_move_truncates() {
    let mut game = bench();
    game.move_move(1, ROW_A, ROW_B).unwrap();
    game.finish_move();
    game.move_move(1, ROW_A, ROW_B).unwrap();
    game.finish_move();
    game.undo().unwrap();
    game.undo().unwrap();

    game.move_move(2, ROW_A, ROW_B).unwrap();
    game.finish_move();
    assert_eq!(game.moves().len(), 1);
    assert_eq!(game.moves().index(), 1);
    assert!(!game.can_redo());
}

/// Undo needs history, an empty buffer and the play phase.
#[test]
fn test_undo_preconditions() {
    let mut game = bench();
    assert!(!game.can_undo());
    assert!(matches!(game.undo(), Err(EngineError::Invariant(_))));
    assert!(matches!(game.redo(), Err(EngineError::Invariant(_))));

    game.move_move(1, ROW_A, ROW_B).unwrap();
    let before_commit = game.snapshot();
    assert!(matches!(game.undo(), Err(EngineError::Invariant(_))));
    assert_eq!(game.snapshot(), before_commit);
}

/// Shuffling a stack is undone together with the generator state.
#[test]
fn test_shuffle_restores_random_state() {
    let mut game = bench();
    let before = game.snapshot();
    game.shuffle_stack_move(ROW_A).unwrap();
    game.finish_move();
    assert_ne!(game.random().state(), before.random);
    game.undo().unwrap();
    assert_eq!(game.snapshot(), before);
    game.redo().unwrap();
    game.undo().unwrap();
    assert_eq!(game.snapshot(), before);
}

/// Redoing the opening deal and a few moves reproduces them.
#[test]
fn test_redo_walks_forward() {
    let mut game = new_game(Arc::new(Klondike::default()), EngineOptions::manual(), 1001);
    for _ in 0..3 {
        game.deal_cards().unwrap();
    }
    let end = game.snapshot();
    while game.can_undo() {
        game.undo().unwrap();
    }
    assert_eq!(game.moves().index(), 0);
    while game.can_redo() {
        game.redo().unwrap();
    }
    assert_eq!(game.snapshot(), end);
    assert_eq!(game.stats().undo_moves, 3);
    assert_eq!(game.stats().redo_moves, 3);
}

/// Observers see a replayed move as redetected.
#[test]
fn test_redetected_commit_event() {
    use std::sync::Mutex;
    use solitaire_engine::game::EventLog;
    use solitaire_engine::GameEvent;

    let log = Arc::new(Mutex::new(EventLog::default()));
    let mut game = Game::new(Arc::new(Klondike::default()), EngineOptions::manual());
    game.add_observer(Box::new(Arc::clone(&log)));
    game.new_game(Some(GameRandom::from_seed(4))).unwrap();
    game.deal_cards().unwrap();
    game.undo().unwrap();
    game.deal_cards().unwrap();

    let events = log.lock().unwrap().events.clone();
    assert!(events.contains(&GameEvent::MoveCommitted { index: 1, commit: Commit::Redetected }));
}

/// A refill that fails takes its half-played move with it; undo, redo
/// and saving carry on.
#[test]
fn test_failed_refill_is_rolled_back() {
    let mut game = Bench::new(StackConfig::foundation(CLUBS), open_row())
        .place(HEARTS, 4, ROW_A)
        .place(SPADES, 3, ROW_B)
        .broken_fill(ROW_A)
        .start(11);
    let opening = game.snapshot();

    assert!(game.play_move(1, ROW_B, ROW_A).unwrap());
    let played = game.snapshot();
    assert_eq!(game.moves().len(), 1);

    let err = game.play_move(1, ROW_A, ROW_B).unwrap_err();
    assert!(matches!(err, EngineError::Invariant(_)), "{err}");
    assert_eq!(game.snapshot(), played);
    assert!(game.moves().current().is_empty());
    assert_eq!((game.moves().len(), game.moves().index()), (1, 1));

    let mut buf = Vec::new();
    game.save(&mut buf, BookmarkKind::Save).unwrap();
    game.undo().unwrap();
    assert_eq!(game.snapshot(), opening);
    game.redo().unwrap();
    assert_eq!(game.snapshot(), played);
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Undoing every logical move restores the dealt position bit for bit,
    /// and redoing them all restores the end position.
    #[test]
    fn test_undo_inverse_law(seed in 0u128..1_000_000, actions in prop::collection::vec(action(), 1..40)) {
        let mut game = new_game(Arc::new(Klondike::default()), EngineOptions::manual(), seed);
        let start = game.snapshot();
        for a in &actions {
            play(&mut game, *a);
        }
        let end = game.snapshot();
        let committed = game.moves().index();

        while game.can_undo() {
            game.undo().unwrap();
        }
        prop_assert_eq!(game.snapshot(), start);
        for _ in 0..committed {
            game.redo().unwrap();
        }
        prop_assert_eq!(game.snapshot(), end);
    }

    /// The same seed and the same actions give the same game, with autoplay on.
    #[test]
    fn test_replay_is_deterministic(seed in 0u128..1_000_000, actions in prop::collection::vec(action(), 1..30)) {
        let run = || {
            let mut game = new_game(Arc::new(Klondike::default()), EngineOptions::default(), seed);
            for a in &actions {
                play(&mut game, *a);
            }
            game
        };
        let a = run();
        let b = run();
        prop_assert_eq!(a.snapshot(), b.snapshot());
        prop_assert_eq!(a.moves().history(), b.moves().history());
        prop_assert_eq!(a.stats(), b.stats());
    }

    /// Spider survives the same walk, including whole-suit drops.
    #[test]
    fn test_spider_inverse_law(seed in 0u128..1_000_000, actions in prop::collection::vec(action(), 1..25)) {
        let options = EngineOptions {
            autoplay_on_start: false,
            ..EngineOptions::default()
        };
        let mut game = new_game(Arc::new(Spider::relaxed()), options, seed);
        let start = game.snapshot();
        for a in &actions {
            play(&mut game, *a);
        }
        while game.can_undo() {
            game.undo().unwrap();
        }
        prop_assert_eq!(game.snapshot(), start);
    }
}
