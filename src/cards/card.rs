//! Card instances.
//!
//! A `Card` has an immutable identity (`id`, `deck`, `suit`, `rank`) and a
//! small amount of mutable state owned by the table: face orientation, the
//! stack it currently sits in, and its display position.

use serde::{Deserialize, Serialize};

use crate::core::entity::{CardId, StackId};

pub const CLUBS: u8 = 0;
pub const SPADES: u8 = 1;
pub const HEARTS: u8 = 2;
pub const DIAMONDS: u8 = 3;
/// Suit of trump cards.
pub const TRUMP_SUIT: u8 = 4;

pub const ACE: u8 = 0;
pub const JACK: u8 = 10;
pub const QUEEN: u8 = 11;
pub const KING: u8 = 12;

pub const BLACK: u8 = 0;
pub const RED: u8 = 1;

const SUIT_CHARS: [char; 5] = ['C', 'S', 'H', 'D', 'T'];
const RANK_CHARS: [char; 13] = ['A', '2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K'];

/// One playing card.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    /// Deck index for multi-deck games.
    pub deck: u8,
    pub suit: u8,
    /// 0-based rank (`ACE = 0` .. `KING = 12`).
    pub rank: u8,
    pub face_up: bool,
    /// Owning stack, if the card has been placed.
    pub stack: Option<StackId>,
    /// Display position. Not used by any rule.
    pub pos: (i32, i32),
}

impl Card {
    #[must_use]
    pub fn new(id: CardId, deck: u8, suit: u8, rank: u8) -> Self {
        Self {
            id,
            deck,
            suit,
            rank,
            face_up: false,
            stack: None,
            pos: (0, 0),
        }
    }

    /// `BLACK` for clubs and spades, `RED` for hearts and diamonds, 2 for trumps.
    #[must_use]
    pub fn color(&self) -> u8 {
        self.suit / 2
    }

    #[must_use]
    pub fn is_trump(&self) -> bool {
        self.suit == TRUMP_SUIT
    }

    /// Two-character code such as `AS` or `TD`.
    #[must_use]
    pub fn code(&self) -> String {
        let suit = SUIT_CHARS.get(usize::from(self.suit)).copied().unwrap_or('?');
        if self.is_trump() {
            return format!("{}{}", suit, self.rank);
        }
        let rank = RANK_CHARS.get(usize::from(self.rank)).copied().unwrap_or('?');
        format!("{rank}{suit}")
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.face_up {
            write!(f, "{}", self.code())
        } else {
            write!(f, "[{}]", self.code())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color() {
        assert_eq!(Card::new(CardId(0), 0, CLUBS, ACE).color(), BLACK);
        assert_eq!(Card::new(CardId(1), 0, SPADES, ACE).color(), BLACK);
        assert_eq!(Card::new(CardId(2), 0, HEARTS, ACE).color(), RED);
        assert_eq!(Card::new(CardId(3), 0, DIAMONDS, ACE).color(), RED);
    }

    #[test]
    fn test_display() {
        let mut card = Card::new(CardId(0), 0, SPADES, KING);
        assert_eq!(card.to_string(), "[KS]");
        card.face_up = true;
        assert_eq!(card.to_string(), "KS");
        assert_eq!(Card::new(CardId(9), 0, DIAMONDS, 9).code(), "TD");
    }
}
