//! Deck construction and pre-shuffle ordering.
//!
//! Cards are created once per game, deck by deck, suit-major then rank, with
//! trumps after the suited cards of each deck. Ids follow creation order.

use super::card::{Card, TRUMP_SUIT};
use crate::core::config::VariantInfo;
use crate::core::entity::CardId;

/// Create every card of a variant, face down and unplaced.
#[must_use]
pub fn create_cards(info: &VariantInfo) -> Vec<Card> {
    let mut cards = Vec::with_capacity(info.ncards());
    let mut next = 0u16;
    for deck in 0..info.decks {
        for &suit in &info.suits {
            for rank in 0..info.ranks {
                cards.push(Card::new(CardId::new(next), deck, suit, rank));
                next += 1;
            }
        }
        for rank in 0..info.trumps {
            cards.push(Card::new(CardId::new(next), deck, TRUMP_SUIT, rank));
            next += 1;
        }
    }
    cards
}

/// Reorder a 52-card creation-order list into the order Microsoft FreeCell
/// deals shuffle from: rank-major, suits clubs, diamonds, hearts, spades.
#[must_use]
pub fn ms_deal_order<T: Copy>(cards: &[T]) -> Vec<T> {
    debug_assert_eq!(cards.len(), 52);
    let mut out = Vec::with_capacity(52);
    for rank in 0..13 {
        for offset in [0, 39, 26, 13] {
            out.push(cards[rank + offset]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::card::{ACE, CLUBS, DIAMONDS, HEARTS, KING, SPADES};

    #[test]
    fn test_creation_order() {
        let cards = create_cards(&VariantInfo::new(1, "Klondike"));
        assert_eq!(cards.len(), 52);
        assert_eq!((cards[0].suit, cards[0].rank), (CLUBS, ACE));
        assert_eq!((cards[13].suit, cards[13].rank), (SPADES, ACE));
        assert_eq!((cards[51].suit, cards[51].rank), (DIAMONDS, KING));
        assert!(cards.iter().enumerate().all(|(i, c)| c.id.index() == i));
        assert!(cards.iter().all(|c| !c.face_up && c.stack.is_none()));
    }

    #[test]
    fn test_two_decks() {
        let cards = create_cards(&VariantInfo::new(2, "Spider").with_decks(2));
        assert_eq!(cards.len(), 104);
        assert_eq!(cards[52].deck, 1);
        assert_eq!(cards[52].suit, CLUBS);
    }

    #[test]
    fn test_ms_order() {
        let ids: Vec<usize> = (0..52).collect();
        let order = ms_deal_order(&ids);
        // Ace of clubs, diamonds, hearts, spades, then the twos.
        assert_eq!(&order[..5], &[0, 39, 26, 13, 1]);
        let suit_of = |i: usize| (i / 13) as u8;
        assert_eq!(suit_of(order[1]), DIAMONDS);
        assert_eq!(suit_of(order[2]), HEARTS);
    }
}
