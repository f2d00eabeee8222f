//! Stacks and their configuration.
//!
//! ## Kinds
//!
//! | kind         | defaults                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | `Talon`      | never moves or accepts; deals                                   |
//! | `Waste`      | moves the top card; accepts nothing                             |
//! | `Foundation` | same suit up from Ace, one card in, one card out, 13 cards max  |
//! | `Row`        | alternate colour down, any base rank, unlimited move/accept     |
//! | `Reserve`    | holds one card                                                  |
//! | `Internal`   | invisible scratch stack; never moves or accepts                 |
//!
//! Variants start from `StackConfig::new(kind)` and override what differs.
//!
//! ```
//! use solitaire_engine::stacks::{StackConfig, StackKind, SequencePredicate, BaseRank};
//! use solitaire_engine::cards::KING;
//!
//! let row = StackConfig::new(StackKind::Row)
//!     .with_accept(SequencePredicate::AlternateColor)
//!     .with_base_rank(BaseRank::Rank(KING));
//! assert_eq!(row.cap.base_rank, BaseRank::Rank(KING));
//! ```

use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::cap::{BaseRank, Capability, Direction, SequencePredicate, UNLIMITED};
use super::rules::StackRule;
use crate::cards::{ACE, KING};
use crate::core::entity::{CardId, StackId};

/// Role of a stack in the layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StackKind {
    Talon,
    Waste,
    Foundation,
    Row,
    Reserve,
    Internal,
}

/// How the top card of a stack links to an incoming run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkMode {
    /// The incoming cards must be a run, and `[top] + cards` must be a run.
    #[default]
    WholeRun,
    /// Only the top card and the first incoming card are checked.
    FirstCardOnly,
}

/// Run predicates for accepting and for releasing cards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuildRule {
    pub accept: SequencePredicate,
    pub moveable: SequencePredicate,
    pub link: LinkMode,
}

/// How autoplay picks cards to drop from a stack.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DropPolicy {
    /// Only the top card.
    #[default]
    TopCard,
    /// The longest movable run some target accepts.
    LongestRun,
    Never,
}

/// What a talon does when dealt from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DealMode {
    /// The variant deals itself.
    Custom,
    /// Flip `num_deal` cards onto the waste; turn the waste over to redeal.
    Waste { shuffle_on_redeal: bool },
    /// One face-up card onto each row.
    Rows { require_no_empty_rows: bool },
}

/// Talon behaviour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TalonConfig {
    /// Round limit; `-1` for unlimited.
    pub max_rounds: i32,
    pub num_deal: usize,
    pub mode: DealMode,
}

impl Default for TalonConfig {
    fn default() -> Self {
        Self {
            max_rounds: 1,
            num_deal: 1,
            mode: DealMode::Waste { shuffle_on_redeal: false },
        }
    }
}

/// Everything a layout declares about one stack.
#[derive(Clone, Debug)]
pub struct StackConfig {
    pub kind: StackKind,
    pub name: String,
    pub cap: Capability,
    pub rule: BuildRule,
    pub drop: DropPolicy,
    /// Extra predicate objects consulted after the generic matcher.
    pub rules: Vec<Arc<dyn StackRule>>,
    pub talon: Option<TalonConfig>,
    /// Whether a face-down top card may be turned over.
    pub flippable: bool,
    /// Display origin of the bottom card.
    pub origin: (i32, i32),
    /// Display offset between consecutive cards.
    pub offset: (i32, i32),
}

impl StackConfig {
    /// Defaults for a kind.
    pub fn new(kind: StackKind) -> Self {
        let mut cap = Capability::default();
        let mut rule = BuildRule::default();
        let mut drop = DropPolicy::TopCard;
        let mut talon = None;
        let mut flippable = false;
        match kind {
            StackKind::Talon => {
                drop = DropPolicy::Never;
                talon = Some(TalonConfig::default());
            }
            StackKind::Waste => {
                cap.max_move = 1;
                flippable = true;
            }
            StackKind::Foundation => {
                cap.base_rank = BaseRank::Rank(ACE);
                cap.dir = Direction::Up;
                cap.max_accept = 1;
                cap.max_move = 1;
                cap.max_cards = 13;
                rule.accept = SequencePredicate::SameSuit;
                rule.moveable = SequencePredicate::SameSuit;
                drop = DropPolicy::Never;
            }
            StackKind::Row => {
                cap.max_move = UNLIMITED;
                cap.max_accept = UNLIMITED;
                flippable = true;
            }
            StackKind::Reserve => {
                cap.max_move = 1;
                cap.max_accept = 1;
                cap.max_cards = 1;
                flippable = true;
            }
            StackKind::Internal => {
                drop = DropPolicy::Never;
            }
        }
        Self {
            kind,
            name: String::new(),
            cap,
            rule,
            drop,
            rules: Vec::new(),
            talon,
            flippable,
            origin: (0, 0),
            offset: (0, 0),
        }
    }

    /// A foundation restricted to one suit.
    pub fn foundation(suit: u8) -> Self {
        Self::new(StackKind::Foundation).with_suit(suit)
    }

    /// A spider-style foundation: a full King-to-Ace same-suit run at once.
    pub fn spider_foundation() -> Self {
        let mut cfg = Self::new(StackKind::Foundation)
            .with_base_rank(BaseRank::Rank(KING))
            .with_dir(Direction::Down)
            .with_max_move(0);
        cfg.cap.min_accept = 13;
        cfg.cap.max_accept = 13;
        cfg
    }

    pub fn row() -> Self {
        Self::new(StackKind::Row)
    }

    pub fn reserve() -> Self {
        Self::new(StackKind::Reserve)
    }

    pub fn waste() -> Self {
        Self::new(StackKind::Waste)
    }

    pub fn talon(talon: TalonConfig) -> Self {
        let mut cfg = Self::new(StackKind::Talon);
        cfg.talon = Some(talon);
        cfg
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Fix the suit of every card (and of the base card).
    #[must_use]
    pub fn with_suit(mut self, suit: u8) -> Self {
        self.cap.suit = Some(suit);
        self.cap.base_suit = Some(suit);
        self
    }

    #[must_use]
    pub fn with_base_rank(mut self, base: BaseRank) -> Self {
        self.cap.base_rank = base;
        self
    }

    #[must_use]
    pub fn with_dir(mut self, dir: Direction) -> Self {
        self.cap.dir = dir;
        self
    }

    /// Let ranks wrap around at `modulus` (13 for King-Ace wrapping).
    #[must_use]
    pub fn wrapping(mut self, modulus: u16) -> Self {
        self.cap.modulus = modulus;
        self
    }

    #[must_use]
    pub fn with_max_move(mut self, n: usize) -> Self {
        self.cap.max_move = n;
        self
    }

    #[must_use]
    pub fn with_max_accept(mut self, n: usize) -> Self {
        self.cap.max_accept = n;
        self
    }

    #[must_use]
    pub fn with_max_cards(mut self, n: usize) -> Self {
        self.cap.max_cards = n;
        self
    }

    /// Use `pred` both for accepting and for releasing runs.
    #[must_use]
    pub fn with_sequence(mut self, pred: SequencePredicate) -> Self {
        self.rule.accept = pred;
        self.rule.moveable = pred;
        self
    }

    #[must_use]
    pub fn with_accept(mut self, pred: SequencePredicate) -> Self {
        self.rule.accept = pred;
        self
    }

    #[must_use]
    pub fn with_moveable(mut self, pred: SequencePredicate) -> Self {
        self.rule.moveable = pred;
        self
    }

    #[must_use]
    pub fn with_link(mut self, link: LinkMode) -> Self {
        self.rule.link = link;
        self
    }

    #[must_use]
    pub fn with_drop(mut self, drop: DropPolicy) -> Self {
        self.drop = drop;
        self
    }

    /// Attach an extra predicate object.
    #[must_use]
    pub fn with_rule(mut self, rule: Arc<dyn StackRule>) -> Self {
        self.rules.push(rule);
        self
    }

    #[must_use]
    pub fn flippable(mut self, flippable: bool) -> Self {
        self.flippable = flippable;
        self
    }

    #[must_use]
    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.origin = (x, y);
        self
    }

    #[must_use]
    pub fn with_offset(mut self, dx: i32, dy: i32) -> Self {
        self.offset = (dx, dy);
        self
    }
}

/// A stack on the table: configuration plus mutable pile state.
#[derive(Clone, Debug)]
pub struct Stack {
    pub(crate) id: StackId,
    pub(crate) config: StackConfig,
    pub(crate) cards: Vec<CardId>,
    pub(crate) round: i32,
    pub(crate) closed: bool,
    pub(crate) flags: FxHashMap<String, i64>,
}

impl Stack {
    pub(crate) fn new(id: StackId, config: StackConfig) -> Self {
        Self {
            id,
            config,
            cards: Vec::new(),
            round: 1,
            closed: false,
            flags: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn id(&self) -> StackId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> StackKind {
        self.config.kind
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.config.name
    }

    #[must_use]
    pub fn config(&self) -> &StackConfig {
        &self.config
    }

    #[must_use]
    pub fn cap(&self) -> &Capability {
        &self.config.cap
    }

    /// Card ids, bottom first.
    #[must_use]
    pub fn cards(&self) -> &[CardId] {
        &self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn top(&self) -> Option<CardId> {
        self.cards.last().copied()
    }

    /// Talon round counter, starting at 1.
    #[must_use]
    pub fn round(&self) -> i32 {
        self.round
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// A blocked stack neither accepts nor releases cards.
    #[must_use]
    pub fn is_blocked(&self) -> bool {
        self.closed
    }

    #[must_use]
    pub fn flag(&self, key: &str) -> Option<i64> {
        self.flags.get(key).copied()
    }

    #[must_use]
    pub fn flags(&self) -> &FxHashMap<String, i64> {
        &self.flags
    }

    #[must_use]
    pub fn talon(&self) -> Option<&TalonConfig> {
        self.config.talon.as_ref()
    }

    /// Whether another round may start (`max_rounds < 0` is unlimited).
    #[must_use]
    pub fn can_redeal(&self) -> bool {
        self.config
            .talon
            .map_or(false, |t| t.max_rounds < 0 || self.round < t.max_rounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_defaults() {
        let f = StackConfig::new(StackKind::Foundation);
        assert_eq!(f.cap.base_rank, BaseRank::Rank(ACE));
        assert_eq!(f.cap.max_accept, 1);
        assert_eq!(f.drop, DropPolicy::Never);

        let t = StackConfig::new(StackKind::Talon);
        assert_eq!(t.cap.max_move, 0);
        assert_eq!(t.cap.max_accept, 0);
        assert!(t.talon.is_some());

        let r = StackConfig::reserve();
        assert_eq!(r.cap.max_cards, 1);
        assert!(!StackConfig::new(StackKind::Internal).flippable);
    }

    #[test]
    fn test_spider_foundation() {
        let f = StackConfig::spider_foundation();
        assert_eq!(f.cap.min_accept, 13);
        assert_eq!(f.cap.max_move, 0);
        assert_eq!(f.cap.base_rank, BaseRank::Rank(KING));
    }

    #[test]
    fn test_can_redeal() {
        let mut talon = Stack::new(
            StackId::new(0),
            StackConfig::talon(TalonConfig { max_rounds: 2, ..TalonConfig::default() }),
        );
        assert!(talon.can_redeal());
        talon.round = 2;
        assert!(!talon.can_redeal());

        talon.config.talon = Some(TalonConfig { max_rounds: -1, ..TalonConfig::default() });
        assert!(talon.can_redeal());
    }
}
