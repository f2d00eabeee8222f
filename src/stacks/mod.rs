//! Stacks, capability descriptors and the acceptance rule matcher.
//!
//! ## Key Types
//!
//! - `Capability`: per-card constraints and count limits
//! - `SequencePredicate` / `Direction`: what counts as a run
//! - `StackConfig`: kind defaults plus builder overrides
//! - `StackRule`: predicate objects for table-dependent exceptions
//! - `Layout`: declares stacks and groups for a variant
//! - `Table`: owns cards and stacks; answers `accepts_cards`,
//!   `can_move_cards`, `can_flip_card` and `can_drop_cards`

pub mod cap;
pub mod stack;
pub mod rules;
pub mod table;

pub use cap::{is_sequence, rank_follows, BaseRank, Capability, Direction, SequencePredicate, NO_WRAP, UNLIMITED};
pub use stack::{BuildRule, DealMode, DropPolicy, LinkMode, Stack, StackConfig, StackKind, TalonConfig};
pub use rules::{FreeCellMoveLimit, MatchFoundationBase, RuleContext, StackRule, SuperMoveLimit};
pub use table::{Layout, StackGroups, Table};
