//! Predicate objects for per-game exceptions to the generic matcher.
//!
//! The generic matcher covers runs, bases and limits. Anything that depends
//! on the rest of the table (how many cells are free, what the other
//! foundations started with) is expressed as a `StackRule` attached to the
//! stack. Rules can only narrow what the matcher allows.

use std::fmt;

use crate::core::entity::{CardId, StackId};

use super::table::Table;

/// Read-only view handed to predicate objects.
pub struct RuleContext<'a> {
    pub table: &'a Table,
    /// The stack the rule is attached to.
    pub stack: StackId,
    /// Source stack for acceptance checks.
    pub from: Option<StackId>,
    /// Contents of `stack` to evaluate against. Usually the real pile; hint
    /// search passes hypothetical contents.
    pub contents: &'a [CardId],
}

/// An extra acceptance or release constraint.
pub trait StackRule: fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;

    /// May `cards` be placed on the stack?
    fn accepts(&self, _ctx: &RuleContext<'_>, _cards: &[CardId]) -> bool {
        true
    }

    /// May `cards` (the top of the stack) be taken away?
    fn can_move(&self, _ctx: &RuleContext<'_>, _cards: &[CardId]) -> bool {
        true
    }
}

/// Move at most one card per free reserve plus one.
#[derive(Clone, Copy, Debug, Default)]
pub struct FreeCellMoveLimit;

impl StackRule for FreeCellMoveLimit {
    fn name(&self) -> &'static str {
        "freecell_move_limit"
    }

    fn can_move(&self, ctx: &RuleContext<'_>, cards: &[CardId]) -> bool {
        cards.len() <= ctx.table.free_reserves() + 1
    }
}

/// FreeCell super-moves: `(free reserves + 1) * 2^(free rows)`, where an
/// empty target row does not count as free. Only applies to rows whose
/// base rank is unrestricted.
#[derive(Clone, Copy, Debug, Default)]
pub struct SuperMoveLimit;

impl SuperMoveLimit {
    fn max_move(ctx: &RuleContext<'_>, target_len: usize) -> usize {
        let base = ctx.table.free_reserves() + 1;
        if ctx.table.stack(ctx.stack).cap().base_rank != super::cap::BaseRank::Any {
            return base;
        }
        let mut free_rows = ctx.table.free_rows() as i64;
        if target_len == 0 {
            free_rows -= 1;
        }
        base << free_rows.clamp(0, 16)
    }
}

impl StackRule for SuperMoveLimit {
    fn name(&self) -> &'static str {
        "super_move_limit"
    }

    fn accepts(&self, ctx: &RuleContext<'_>, cards: &[CardId]) -> bool {
        cards.len() <= Self::max_move(ctx, ctx.contents.len())
    }

    fn can_move(&self, ctx: &RuleContext<'_>, cards: &[CardId]) -> bool {
        cards.len() <= Self::max_move(ctx, 1)
    }
}

/// An empty foundation only takes the rank its siblings started with.
///
/// Used where the foundation base is decided by the deal (Canfield).
#[derive(Clone, Copy, Debug, Default)]
pub struct MatchFoundationBase;

impl StackRule for MatchFoundationBase {
    fn name(&self) -> &'static str {
        "match_foundation_base"
    }

    fn accepts(&self, ctx: &RuleContext<'_>, cards: &[CardId]) -> bool {
        if !ctx.contents.is_empty() {
            return true;
        }
        let Some(&first) = cards.first() else {
            return false;
        };
        let table = ctx.table;
        let base = table
            .groups()
            .foundations
            .iter()
            .filter(|&&f| f != ctx.stack)
            .find_map(|&f| table.stack(f).cards().first().copied());
        match base {
            Some(base) => table.card(base).rank == table.card(first).rank,
            None => true,
        }
    }
}
