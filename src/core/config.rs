//! Engine configuration types.
//!
//! - `EngineOptions`: per-session switches for autoplay and seed picking.
//! - `VariantInfo`: the static description a variant hands to the engine
//!   (deck composition, redeals, save-compatibility version).
//!
//! Both are plain serde values so a front end can persist them alongside its
//! own settings.

use serde::{Deserialize, Serialize};

/// Session-level switches.
///
/// ```
/// use solitaire_engine::core::EngineOptions;
///
/// let opts = EngineOptions::default().without_autodrop().with_seed_picker_seed(7);
/// assert!(opts.autofaceup);
/// assert!(!opts.autodrop);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineOptions {
    /// Flip face-down top cards automatically after each move.
    pub autofaceup: bool,
    /// Drop cards onto foundations automatically after each move.
    pub autodrop: bool,
    /// Deal from the talon automatically when the waste runs empty.
    pub autodeal: bool,
    /// Run autoplay once the opening deal is complete.
    pub autoplay_on_start: bool,
    /// Fixed seed for the seed picker; `None` uses OS entropy.
    pub seed_picker_seed: Option<u64>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            autofaceup: true,
            autodrop: true,
            autodeal: true,
            autoplay_on_start: true,
            seed_picker_seed: None,
        }
    }
}

impl EngineOptions {
    /// All automatic play disabled. Useful for tests and solvers.
    #[must_use]
    pub fn manual() -> Self {
        Self {
            autofaceup: false,
            autodrop: false,
            autodeal: false,
            autoplay_on_start: false,
            seed_picker_seed: None,
        }
    }

    #[must_use]
    pub fn without_autofaceup(mut self) -> Self {
        self.autofaceup = false;
        self
    }

    #[must_use]
    pub fn without_autodrop(mut self) -> Self {
        self.autodrop = false;
        self
    }

    #[must_use]
    pub fn without_autodeal(mut self) -> Self {
        self.autodeal = false;
        self
    }

    /// Fix the seed picker for reproducible "random" games.
    #[must_use]
    pub fn with_seed_picker_seed(mut self, seed: u64) -> Self {
        self.seed_picker_seed = Some(seed);
        self
    }
}

/// Static description of a variant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantInfo {
    /// Stable identifier written into saves.
    pub id: u32,

    /// Human-readable name.
    pub name: String,

    /// Number of decks.
    pub decks: u8,

    /// Suits present in each deck.
    pub suits: Vec<u8>,

    /// Ranks per suit (`0..ranks`).
    pub ranks: u8,

    /// Extra trump cards per deck.
    pub trumps: u8,

    /// Number of redeals; `-1` for unlimited, `0` for none.
    pub redeals: i32,

    /// Bumped whenever the layout changes in a save-incompatible way.
    pub game_version: u32,
}

impl VariantInfo {
    /// A single standard 52-card deck.
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            decks: 1,
            suits: vec![0, 1, 2, 3],
            ranks: 13,
            trumps: 0,
            redeals: 0,
            game_version: 1,
        }
    }

    #[must_use]
    pub fn with_decks(mut self, decks: u8) -> Self {
        self.decks = decks;
        self
    }

    #[must_use]
    pub fn with_suits(mut self, suits: &[u8]) -> Self {
        self.suits = suits.to_vec();
        self
    }

    #[must_use]
    pub fn with_redeals(mut self, redeals: i32) -> Self {
        self.redeals = redeals;
        self
    }

    #[must_use]
    pub fn with_game_version(mut self, version: u32) -> Self {
        self.game_version = version;
        self
    }

    /// Total number of cards.
    #[must_use]
    pub fn ncards(&self) -> usize {
        usize::from(self.decks) * (self.suits.len() * usize::from(self.ranks) + usize::from(self.trumps))
    }

    /// Talon round limit derived from `redeals` (`-1` means unlimited).
    #[must_use]
    pub fn max_rounds(&self) -> i32 {
        if self.redeals < 0 {
            -1
        } else {
            self.redeals + 1
        }
    }
}
