//! Cards and deck composition.
//!
//! ## Key Types
//!
//! - `Card`: identity (deck, suit, rank) plus face, owner stack and position
//! - `create_cards`: builds the full card set for a variant
//! - `ms_deal_order`: pre-shuffle order for Microsoft-compatible deals

pub mod card;
pub mod deck;

pub use card::{Card, ACE, BLACK, CLUBS, DIAMONDS, HEARTS, JACK, KING, QUEEN, RED, SPADES, TRUMP_SUIT};
pub use deck::{create_cards, ms_deal_order};
