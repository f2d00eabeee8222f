//! Built-in variants.
//!
//! Each variant is a small configurator over the shared engine: a layout,
//! an opening deal, and the occasional rule override.
//!
//! ## Catalogue
//!
//! | id  | variant              | notes                                  |
//! |-----|----------------------|----------------------------------------|
//! | 2   | Klondike             | draw one, unlimited redeals            |
//! | 18  | Klondike (Draw 3)    |                                        |
//! | 5   | Relaxed FreeCell     | no super-move limit                    |
//! | 8   | FreeCell             | Microsoft-compatible deals             |
//! | 10  | Relaxed Spider       | deals onto empty rows                  |
//! | 11  | Spider               | two decks                              |
//! | 31  | Baker's Dozen        | kings sunk at deal time                |
//! | 105 | Canfield             | dealt base rank, wrapping foundations  |

use std::sync::Arc;

use crate::rules::Variant;

mod bakers_dozen;
mod canfield;
mod freecell;
mod klondike;
mod spider;

pub use bakers_dozen::BakersDozen;
pub use canfield::{Canfield, WholeRowMoves};
pub use freecell::FreeCell;
pub use klondike::Klondike;
pub use spider::Spider;

/// Every built-in variant, in id order.
#[must_use]
pub fn all() -> Vec<Arc<dyn Variant>> {
    vec![
        Arc::new(Klondike::default()),
        Arc::new(FreeCell::relaxed()),
        Arc::new(FreeCell::default()),
        Arc::new(Spider::relaxed()),
        Arc::new(Spider::default()),
        Arc::new(Klondike::draw_three()),
        Arc::new(BakersDozen),
        Arc::new(Canfield),
    ]
}

/// Find a built-in variant by its save id.
#[must_use]
pub fn lookup(id: u32) -> Option<Arc<dyn Variant>> {
    all().into_iter().find(|v| v.info().id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_ids_are_unique() {
        let ids: FxHashSet<u32> = all().iter().map(|v| v.info().id).collect();
        assert_eq!(ids.len(), all().len());
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup(105).unwrap().info().name, "Canfield");
        assert_eq!(lookup(18).unwrap().info().name, "Klondike (Draw 3)");
        assert!(lookup(4).is_none());
    }
}
