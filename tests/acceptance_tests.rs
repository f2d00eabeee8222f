//! Acceptance and release rules, driven through whole games.

mod common;

use common::{faces, find, open_row, Bench, FOUNDATION, ROW_A, ROW_B, TALON};
use proptest::prelude::*;
use solitaire_engine::cards::{ACE, CLUBS, HEARTS, KING, SPADES};
use solitaire_engine::stacks::{SequencePredicate, StackConfig};
use solitaire_engine::{CardId, EngineError, Game};

// =============================================================================
// Foundations
// =============================================================================

/// An ascending spade foundation holding the ace takes the two, never the three.
#[test]
fn test_spade_foundation_takes_next_rank_only() {
    let mut game = Bench::new(StackConfig::foundation(SPADES), open_row())
        .place(SPADES, ACE, FOUNDATION)
        .start(1_234_567_890_123_456);
    let two = find(game.table(), SPADES, 1);
    let three = find(game.table(), SPADES, 2);

    assert!(!game.table().accepts_cards(FOUNDATION, Some(TALON), &[three]));
    assert!(game.table().accepts_cards(FOUNDATION, Some(TALON), &[two]));

    let pos = |game: &Game, id: CardId| {
        game.table().stack(TALON).cards().iter().position(|&c| c == id).unwrap()
    };
    let p3 = pos(&game, three);
    assert!(matches!(
        game.single_card_move(TALON, FOUNDATION, p3),
        Err(EngineError::RuleViolation { ncards: 1, .. })
    ));
    let p2 = pos(&game, two);
    game.single_card_move(TALON, FOUNDATION, p2).unwrap();
    assert!(game.finish_move());
    assert_eq!(game.table().stack(FOUNDATION).len(), 2);
    assert!(game.table().accepts_cards(FOUNDATION, Some(TALON), &[three]));
}

/// `max_move = 0` blocks every move out but still takes the next card in.
#[test]
fn test_max_move_zero_foundation() {
    let mut game = Bench::new(StackConfig::foundation(SPADES).with_max_move(0), open_row())
        .place(SPADES, ACE, FOUNDATION)
        .place(HEARTS, 5, ROW_A)
        .start(42);
    let ace = game.table().stack(FOUNDATION).top().unwrap();
    let two = find(game.table(), SPADES, 1);

    assert!(!game.table().can_move_cards(FOUNDATION, &[ace]));
    assert_eq!(game.table().movable_pile(FOUNDATION), None);
    assert!(!game.play_move(1, FOUNDATION, ROW_B).unwrap());
    assert_eq!(game.table().stack(FOUNDATION).len(), 1);
    assert!(game.moves().is_empty());
    assert!(game.table().accepts_cards(FOUNDATION, Some(TALON), &[two]));
}

// =============================================================================
// Rows
// =============================================================================

/// Spider rows build by rank but only release same-suit runs.
#[test]
fn test_rank_built_rows_release_same_suit_runs() {
    let row = StackConfig::row()
        .with_accept(SequencePredicate::RankOnly)
        .with_moveable(SequencePredicate::SameSuit);
    let game = Bench::new(StackConfig::foundation(CLUBS), row)
        .place(HEARTS, 5, ROW_A)
        .place(SPADES, 4, ROW_A)
        .place(SPADES, 6, ROW_B)
        .place(SPADES, 5, ROW_B)
        .start(7);
    let table = game.table();
    assert!(!table.can_move_top(ROW_A, 2));
    assert!(table.can_move_top(ROW_A, 1));
    assert!(table.can_move_top(ROW_B, 2));

    // ROW_B shows the six of spades: any five goes on it, nothing else.
    let five_clubs = find(table, CLUBS, 4);
    assert!(table.accepts_cards(ROW_B, Some(TALON), &[five_clubs]));
    let five_hearts = find(table, HEARTS, 4);
    assert!(table.accepts_cards(ROW_B, Some(TALON), &[five_hearts]));
    let four_clubs = find(table, CLUBS, 3);
    assert!(!table.accepts_cards(ROW_B, Some(TALON), &[four_clubs]));
}

/// With wrapping, a king goes on an ace.
#[test]
fn test_wrapping_row_puts_king_on_ace() {
    let game = Bench::new(StackConfig::foundation(CLUBS), StackConfig::row().wrapping(13))
        .place(HEARTS, ACE, ROW_A)
        .start(99);
    let table = game.table();
    let king = find(table, SPADES, KING);
    assert!(table.accepts_cards(ROW_A, Some(TALON), &[king]));
    let red_king = find(table, HEARTS, KING);
    assert!(!table.accepts_cards(ROW_A, Some(TALON), &[red_king]));
}

/// A face-down top card refuses everything.
#[test]
fn test_face_down_top_refuses_cards() {
    let game = Bench::new(StackConfig::foundation(CLUBS), open_row())
        .place(HEARTS, 9, ROW_A)
        .flip(ROW_A)
        .start(3);
    assert_eq!(faces(&game, ROW_A), vec![false]);
    let any = find(game.table(), SPADES, 8);
    assert!(!game.table().accepts_cards(ROW_A, Some(TALON), &[any]));
    assert!(game.table().can_flip_card(ROW_A));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// An alternate-colour row takes exactly the next lower rank of the
    /// other colour, whichever colour is on top.
    #[test]
    fn test_alternate_color_acceptance(
        top_suit in 0u8..4,
        top_rank in 1u8..13,
        suit in 0u8..4,
        rank in 0u8..13,
    ) {
        let game = Bench::new(StackConfig::foundation(CLUBS), StackConfig::row())
            .place(top_suit, top_rank, ROW_A)
            .start(11);
        let table = game.table();
        let card = find(table, suit, rank);
        prop_assume!(table.stack(ROW_A).top() != Some(card));

        let expected = rank + 1 == top_rank && suit / 2 != top_suit / 2;
        prop_assert_eq!(table.accepts_cards(ROW_A, Some(TALON), &[card]), expected);
    }
}
