//! The table: every card, every stack, and the stack groups.
//!
//! The table owns all cards and stacks of one game. Stacks refer to cards by
//! id and cards point back at their stack by id; neither owns the other.
//!
//! ## Rule matcher
//!
//! `accepts_cards` runs three layers in order:
//! 1. card-level checks from the `Capability` (counts, face, suit, base)
//! 2. the run check from the stack's `BuildRule` (`[top] + cards` must be a
//!    run under the accept predicate, or only the first pair for
//!    `LinkMode::FirstCardOnly`)
//! 3. every attached `StackRule`
//!
//! `can_move_cards` mirrors this for releasing cards.
//!
//! ## Mutation
//!
//! Mutating methods are crate-private and are only called by atomic moves
//! and by the opening deal. Each validates before it changes anything.

use smallvec::SmallVec;

use super::cap::is_sequence;
use super::rules::RuleContext;
use super::stack::{DropPolicy, LinkMode, Stack, StackConfig, StackKind};
use crate::cards::{create_cards, Card};
use crate::core::config::VariantInfo;
use crate::core::entity::{CardId, StackId};
use crate::error::{EngineError, EngineResult};

type CardRefs<'a> = SmallVec<[&'a Card; 16]>;

/// Stack ids by role, in declaration order.
///
/// `open`, `drop` and `talon_stacks` drive autoplay and hint iteration; a
/// layout may reorder them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StackGroups {
    pub talon: Option<StackId>,
    pub waste: Option<StackId>,
    pub foundations: Vec<StackId>,
    pub rows: Vec<StackId>,
    pub reserves: Vec<StackId>,
    pub internals: Vec<StackId>,
    /// Stacks a player may drop onto: foundations, rows, reserves.
    pub open: Vec<StackId>,
    /// Stacks autoplay and hints take cards from: rows, reserves, waste.
    pub drop: Vec<StackId>,
    /// Talon then waste.
    pub talon_stacks: Vec<StackId>,
}

/// Builder handed to variants to declare their stacks.
#[derive(Debug)]
pub struct Layout {
    cards: Vec<Card>,
    stacks: Vec<Stack>,
    open_order: Option<Vec<StackId>>,
    drop_order: Option<Vec<StackId>>,
}

impl Layout {
    /// Start a layout holding every card of the variant.
    pub fn new(info: &VariantInfo) -> Self {
        Self {
            cards: create_cards(info),
            stacks: Vec::new(),
            open_order: None,
            drop_order: None,
        }
    }

    /// Declare a stack. Ids are assigned in declaration order.
    pub fn add(&mut self, config: StackConfig) -> StackId {
        let id = StackId::new(self.stacks.len() as u16);
        self.stacks.push(Stack::new(id, config));
        id
    }

    /// Declare `n` stacks from the same configuration.
    pub fn add_many(&mut self, n: usize, config: StackConfig) -> Vec<StackId> {
        (0..n).map(|_| self.add(config.clone())).collect()
    }

    /// Override the order of the open-stack group.
    pub fn set_open_order(&mut self, order: Vec<StackId>) {
        self.open_order = Some(order);
    }

    /// Override the order of the drop-stack group.
    pub fn set_drop_order(&mut self, order: Vec<StackId>) {
        self.drop_order = Some(order);
    }

    #[must_use]
    pub fn ncards(&self) -> usize {
        self.cards.len()
    }

    pub fn build(self) -> Table {
        let of_kind = |kind: StackKind| -> Vec<StackId> {
            self.stacks.iter().filter(|s| s.kind() == kind).map(Stack::id).collect()
        };
        let talon = of_kind(StackKind::Talon).first().copied();
        let waste = of_kind(StackKind::Waste).first().copied();
        let foundations = of_kind(StackKind::Foundation);
        let rows = of_kind(StackKind::Row);
        let reserves = of_kind(StackKind::Reserve);
        let internals = of_kind(StackKind::Internal);

        let open = self.open_order.unwrap_or_else(|| {
            foundations.iter().chain(&rows).chain(&reserves).copied().collect()
        });
        let drop = self.drop_order.unwrap_or_else(|| {
            rows.iter().chain(&reserves).chain(waste.iter()).copied().collect()
        });
        let talon_stacks = talon.iter().chain(waste.iter()).copied().collect();

        let mut table = Table {
            cards: self.cards,
            stacks: self.stacks,
            groups: StackGroups {
                talon,
                waste,
                foundations,
                rows,
                reserves,
                internals,
                open,
                drop,
                talon_stacks,
            },
        };
        table.clear();
        table
    }
}

/// All cards and stacks of one game.
#[derive(Clone, Debug)]
pub struct Table {
    cards: Vec<Card>,
    stacks: Vec<Stack>,
    groups: StackGroups,
}

impl Table {
    // === Queries ===

    /// Card by id.
    ///
    /// # Panics
    ///
    /// If `id` is not a card of this table. Use `get_card` for ids that did
    /// not come from this table.
    #[must_use]
    pub fn card(&self, id: CardId) -> &Card {
        &self.cards[id.index()]
    }

    #[must_use]
    pub fn get_card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.index())
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Stack by id.
    ///
    /// # Panics
    ///
    /// If `id` is not a stack of this table. Use `get_stack` for ids that
    /// did not come from this table's layout.
    #[must_use]
    pub fn stack(&self, id: StackId) -> &Stack {
        &self.stacks[id.index()]
    }

    #[must_use]
    pub fn get_stack(&self, id: StackId) -> Option<&Stack> {
        self.stacks.get(id.index())
    }

    #[must_use]
    pub fn stacks(&self) -> &[Stack] {
        &self.stacks
    }

    #[must_use]
    pub fn groups(&self) -> &StackGroups {
        &self.groups
    }

    /// The top `n` card ids of a stack (fewer if the stack is shorter).
    #[must_use]
    pub fn top_cards(&self, id: StackId, n: usize) -> &[CardId] {
        match self.get_stack(id) {
            Some(stack) => {
                let cards = stack.cards();
                &cards[cards.len().saturating_sub(n)..]
            }
            None => &[],
        }
    }

    fn refs(&self, ids: &[CardId]) -> CardRefs<'_> {
        ids.iter().map(|&c| self.card(c)).collect()
    }

    /// Empty reserves.
    #[must_use]
    pub fn free_reserves(&self) -> usize {
        self.groups.reserves.iter().filter(|&&r| self.stack(r).is_empty()).count()
    }

    /// Empty rows.
    #[must_use]
    pub fn free_rows(&self) -> usize {
        self.groups.rows.iter().filter(|&&r| self.stack(r).is_empty()).count()
    }

    /// Number of cards on foundations.
    #[must_use]
    pub fn foundation_cards(&self) -> usize {
        self.groups.foundations.iter().map(|&f| self.stack(f).len()).sum()
    }

    // === Rule matcher ===

    /// May `to` receive `cards` from `from`?
    #[must_use]
    pub fn accepts_cards(&self, to: StackId, from: Option<StackId>, cards: &[CardId]) -> bool {
        match self.get_stack(to) {
            Some(stack) => self.accepts_cards_with(to, from, cards, stack.cards()),
            None => false,
        }
    }

    /// Acceptance against hypothetical contents of `to`.
    #[must_use]
    pub fn accepts_cards_with(
        &self,
        to: StackId,
        from: Option<StackId>,
        cards: &[CardId],
        contents: &[CardId],
    ) -> bool {
        let Some(stack) = self.get_stack(to) else {
            return false;
        };
        if cards.is_empty() || from == Some(to) || stack.is_blocked() {
            return false;
        }
        if cards.iter().chain(contents.last()).any(|c| self.get_card(*c).is_none()) {
            return false;
        }
        let config = stack.config();
        let cap = &config.cap;
        let incoming = self.refs(cards);
        let top = contents.last().map(|&c| self.card(c));
        if !cap.basic_accepts(contents.len(), top, &incoming) {
            return false;
        }

        let pred = config.rule.accept;
        let linked = match (config.rule.link, top) {
            (LinkMode::WholeRun, Some(top)) => {
                let mut run: CardRefs<'_> = SmallVec::with_capacity(incoming.len() + 1);
                run.push(top);
                run.extend(incoming.iter().copied());
                is_sequence(&run, pred, cap.dir, cap.modulus)
            }
            (LinkMode::WholeRun, None) => is_sequence(&incoming, pred, cap.dir, cap.modulus),
            (LinkMode::FirstCardOnly, Some(top)) => {
                is_sequence(&[top, incoming[0]], pred, cap.dir, cap.modulus)
            }
            (LinkMode::FirstCardOnly, None) => true,
        };
        if !linked {
            return false;
        }

        let ctx = RuleContext {
            table: self,
            stack: to,
            from,
            contents,
        };
        config.rules.iter().all(|r| r.accepts(&ctx, cards))
    }

    /// May `cards`, which must be the top of `id`, be taken away?
    #[must_use]
    pub fn can_move_cards(&self, id: StackId, cards: &[CardId]) -> bool {
        match self.get_stack(id) {
            Some(stack) => self.can_move_cards_with(id, cards, stack.cards()),
            None => false,
        }
    }

    /// Release check against hypothetical contents of `id`; `cards` must be
    /// the top of `contents`.
    #[must_use]
    pub fn can_move_cards_with(&self, id: StackId, cards: &[CardId], contents: &[CardId]) -> bool {
        let Some(stack) = self.get_stack(id) else {
            return false;
        };
        if cards.is_empty() || stack.is_blocked() || !contents.ends_with(cards) {
            return false;
        }
        if cards.iter().any(|c| self.get_card(*c).is_none()) {
            return false;
        }
        let config = stack.config();
        let cap = &config.cap;
        let moving = self.refs(cards);
        if !cap.basic_can_move(contents.len(), &moving) {
            return false;
        }
        if config.rule.link == LinkMode::WholeRun
            && !is_sequence(&moving, config.rule.moveable, cap.dir, cap.modulus)
        {
            return false;
        }
        let ctx = RuleContext {
            table: self,
            stack: id,
            from: None,
            contents,
        };
        config.rules.iter().all(|r| r.can_move(&ctx, cards))
    }

    /// May the top `n` cards of `id` be taken away?
    #[must_use]
    pub fn can_move_top(&self, id: StackId, n: usize) -> bool {
        match self.get_stack(id) {
            Some(stack) if n > 0 && n <= stack.len() => self.can_move_cards(id, self.top_cards(id, n)),
            _ => false,
        }
    }

    /// Size of the largest movable pile on top of `id`, if any.
    #[must_use]
    pub fn movable_pile(&self, id: StackId) -> Option<usize> {
        let stack = self.get_stack(id)?;
        let max = stack.len().min(stack.cap().max_move);
        (1..=max).rev().find(|&n| self.can_move_top(id, n))
    }

    /// Can the face-down top card be turned over?
    #[must_use]
    pub fn can_flip_card(&self, id: StackId) -> bool {
        let Some(stack) = self.get_stack(id) else {
            return false;
        };
        stack.config().flippable
            && !stack.is_blocked()
            && stack.top().map_or(false, |c| !self.card(c).face_up)
    }

    /// First target (in `targets` order) that takes cards from `id`
    /// automatically, with the number of cards.
    #[must_use]
    pub fn can_drop_cards(&self, id: StackId, targets: &[StackId]) -> Option<(StackId, usize)> {
        let stack = self.get_stack(id)?;
        if stack.is_empty() || stack.is_blocked() {
            return None;
        }
        let sizes: SmallVec<[usize; 13]> = match stack.config().drop {
            DropPolicy::Never => return None,
            DropPolicy::TopCard => SmallVec::from_slice(&[1]),
            DropPolicy::LongestRun => (1..=stack.len().min(stack.cap().max_move)).rev().collect(),
        };
        for n in sizes {
            if !self.can_move_top(id, n) {
                continue;
            }
            let cards = self.top_cards(id, n);
            if let Some(&to) = targets.iter().find(|&&t| t != id && self.accepts_cards(t, Some(id), cards)) {
                return Some((to, n));
            }
        }
        None
    }

    // === Mutation ===

    pub(crate) fn check_stack(&self, id: StackId) -> EngineResult<()> {
        if id.index() < self.stacks.len() {
            Ok(())
        } else {
            Err(EngineError::UnknownStack(id))
        }
    }

    fn check_len(&self, id: StackId, n: usize, what: &str) -> EngineResult<()> {
        self.check_stack(id)?;
        let len = self.stack(id).len();
        if len < n {
            return Err(EngineError::invariant(format!(
                "{what}: {id} holds {len} card(s), needs {n}"
            )));
        }
        Ok(())
    }

    fn relayout(&mut self, id: StackId) {
        let stack = &self.stacks[id.index()];
        let (ox, oy) = stack.config.origin;
        let (dx, dy) = stack.config.offset;
        for (i, &c) in stack.cards.iter().enumerate() {
            let i = i as i32;
            let card = &mut self.cards[c.index()];
            card.stack = Some(id);
            card.pos = (ox + dx * i, oy + dy * i);
        }
    }

    /// Move the top `n` cards of `from` onto `to`, keeping their order.
    pub(crate) fn transfer(&mut self, from: StackId, to: StackId, n: usize) -> EngineResult<()> {
        self.check_len(from, n, "transfer")?;
        self.check_stack(to)?;
        if from == to {
            return Err(EngineError::invariant(format!("transfer from {from} onto itself")));
        }
        let src = &mut self.stacks[from.index()].cards;
        let moved = src.split_off(src.len() - n);
        self.stacks[to.index()].cards.extend(moved);
        self.relayout(from);
        self.relayout(to);
        Ok(())
    }

    /// Toggle the face of the top card.
    pub(crate) fn flip_top(&mut self, id: StackId) -> EngineResult<()> {
        self.check_len(id, 1, "flip")?;
        if let Some(top) = self.stack(id).top() {
            let card = &mut self.cards[top.index()];
            card.face_up = !card.face_up;
        }
        Ok(())
    }

    /// Toggle the face of every card.
    pub(crate) fn flip_all(&mut self, id: StackId) -> EngineResult<()> {
        self.check_stack(id)?;
        for &c in &self.stacks[id.index()].cards {
            let card = &mut self.cards[c.index()];
            card.face_up = !card.face_up;
        }
        Ok(())
    }

    /// Move every card of `from` onto the empty `to`, reversing the order
    /// and turning every card over. All cards of `from` must show the
    /// opposite of `face_up`.
    pub(crate) fn turn_over(&mut self, from: StackId, to: StackId, face_up: bool) -> EngineResult<()> {
        self.check_stack(from)?;
        self.check_stack(to)?;
        if from == to || !self.stack(to).is_empty() {
            return Err(EngineError::invariant(format!("turn over {from} onto non-empty {to}")));
        }
        if let Some(&c) = self.stack(from).cards().iter().find(|&&c| self.card(c).face_up == face_up) {
            return Err(EngineError::invariant(format!(
                "turn over {from}: {c} already has face_up = {face_up}"
            )));
        }
        let mut cards = std::mem::take(&mut self.stacks[from.index()].cards);
        cards.reverse();
        for &c in &cards {
            self.cards[c.index()].face_up = face_up;
        }
        self.stacks[to.index()].cards = cards;
        self.relayout(to);
        Ok(())
    }

    /// Replace the order of a stack with a permutation of its cards.
    pub(crate) fn reorder(&mut self, id: StackId, order: Vec<CardId>) -> EngineResult<()> {
        self.check_stack(id)?;
        let mut current = self.stack(id).cards().to_vec();
        let mut wanted = order.clone();
        current.sort_unstable();
        wanted.sort_unstable();
        if current != wanted {
            return Err(EngineError::invariant(format!(
                "reorder of {id} is not a permutation of its cards"
            )));
        }
        self.stacks[id.index()].cards = order;
        self.relayout(id);
        Ok(())
    }

    /// Take the card at `pos` out of `from` and put it on top of `to`.
    pub(crate) fn move_single(&mut self, from: StackId, pos: usize, to: StackId) -> EngineResult<()> {
        self.check_len(from, pos + 1, "single card move")?;
        self.check_stack(to)?;
        if from == to {
            return Err(EngineError::invariant(format!("single card move from {from} onto itself")));
        }
        let card = self.stacks[from.index()].cards.remove(pos);
        self.stacks[to.index()].cards.push(card);
        self.relayout(from);
        self.relayout(to);
        Ok(())
    }

    /// Take the top card of `from` and insert it at `pos` in `to`.
    pub(crate) fn unmove_single(&mut self, from: StackId, to: StackId, pos: usize) -> EngineResult<()> {
        self.check_len(from, 1, "single card undo")?;
        self.check_stack(to)?;
        if pos > self.stack(to).len() || from == to {
            return Err(EngineError::invariant(format!(
                "cannot reinsert into {to} at position {pos}"
            )));
        }
        if let Some(card) = self.stacks[from.index()].cards.pop() {
            self.stacks[to.index()].cards.insert(pos, card);
        }
        self.relayout(from);
        self.relayout(to);
        Ok(())
    }

    /// Put unplaced cards on top of a stack. Used by the opening deal and
    /// by save restore, never during play.
    pub(crate) fn place(&mut self, id: StackId, cards: &[CardId], face_up: bool) -> EngineResult<()> {
        self.check_stack(id)?;
        for &c in cards {
            match self.get_card(c) {
                None => return Err(EngineError::UnknownCard(c)),
                Some(card) if card.stack.is_some() => {
                    return Err(EngineError::invariant(format!("{c} placed twice")));
                }
                Some(_) => {}
            }
        }
        for &c in cards {
            self.cards[c.index()].face_up = face_up;
        }
        self.stacks[id.index()].cards.extend_from_slice(cards);
        self.relayout(id);
        Ok(())
    }

    pub(crate) fn set_face(&mut self, id: CardId, face_up: bool) -> EngineResult<()> {
        match self.cards.get_mut(id.index()) {
            Some(card) => {
                card.face_up = face_up;
                Ok(())
            }
            None => Err(EngineError::UnknownCard(id)),
        }
    }

    pub(crate) fn stack_mut(&mut self, id: StackId) -> EngineResult<&mut Stack> {
        self.stacks.get_mut(id.index()).ok_or(EngineError::UnknownStack(id))
    }

    /// Empty every stack and reset per-stack state.
    pub(crate) fn clear(&mut self) {
        for stack in &mut self.stacks {
            stack.cards.clear();
            stack.round = 1;
            stack.closed = false;
            stack.flags.clear();
        }
        for card in &mut self.cards {
            card.face_up = false;
            card.stack = None;
            card.pos = (0, 0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{ACE, CLUBS, HEARTS, KING, SPADES};
    use crate::stacks::{BaseRank, SequencePredicate};

    fn id_of(suit: u8, rank: u8) -> CardId {
        CardId::new(u16::from(suit) * 13 + u16::from(rank))
    }

    struct Fixture {
        table: Table,
        foundation: StackId,
        row_a: StackId,
        row_b: StackId,
        reserve: StackId,
    }

    fn fixture() -> Fixture {
        let mut layout = Layout::new(&VariantInfo::new(1, "test"));
        let foundation = layout.add(StackConfig::foundation(SPADES));
        let row_a = layout.add(StackConfig::row().with_base_rank(BaseRank::Rank(KING)));
        let row_b = layout.add(StackConfig::row().with_base_rank(BaseRank::Rank(KING)));
        let reserve = layout.add(StackConfig::reserve());
        Fixture { table: layout.build(), foundation, row_a, row_b, reserve }
    }

    #[test]
    fn test_groups_follow_declaration() {
        let f = fixture();
        let g = f.table.groups();
        assert_eq!(g.foundations, vec![f.foundation]);
        assert_eq!(g.rows, vec![f.row_a, f.row_b]);
        assert_eq!(g.open, vec![f.foundation, f.row_a, f.row_b, f.reserve]);
        assert_eq!(g.drop, vec![f.row_a, f.row_b, f.reserve]);
        assert_eq!(g.talon, None);
    }

    #[test]
    fn test_foundation_sequence() {
        let mut f = fixture();
        let ace = id_of(SPADES, ACE);
        assert!(!f.table.accepts_cards(f.foundation, None, &[ace]));
        f.table.set_face(ace, true).unwrap();
        assert!(f.table.accepts_cards(f.foundation, None, &[ace]));
        f.table.place(f.foundation, &[ace], true).unwrap();
        f.table.set_face(id_of(SPADES, 1), true).unwrap();
        f.table.set_face(id_of(SPADES, 2), true).unwrap();
        assert!(f.table.accepts_cards(f.foundation, None, &[id_of(SPADES, 1)]));
        assert!(!f.table.accepts_cards(f.foundation, None, &[id_of(SPADES, 2)]));
    }

    #[test]
    fn test_face_down_cards_rejected() {
        let f = fixture();
        assert!(!f.table.accepts_cards(f.foundation, None, &[id_of(SPADES, ACE)]));
    }

    #[test]
    fn test_row_run_acceptance() {
        let mut f = fixture();
        f.table.place(f.row_a, &[id_of(SPADES, KING)], true).unwrap();
        let run = [id_of(HEARTS, 11), id_of(CLUBS, 10)];
        for &c in &run {
            f.table.set_face(c, true).unwrap();
        }
        assert!(f.table.accepts_cards(f.row_a, Some(f.row_b), &run));
        assert!(!f.table.accepts_cards(f.row_a, Some(f.row_a), &run));

        // Empty row needs a king.
        assert!(!f.table.accepts_cards(f.row_b, None, &run));
    }

    #[test]
    fn test_move_and_drop() {
        let mut f = fixture();
        f.table.place(f.row_a, &[id_of(HEARTS, 5), id_of(SPADES, ACE)], true).unwrap();
        assert!(f.table.can_move_top(f.row_a, 1));
        assert!(!f.table.can_move_top(f.row_a, 2));
        assert_eq!(f.table.movable_pile(f.row_a), Some(1));

        let targets = f.table.groups().foundations.clone();
        assert_eq!(f.table.can_drop_cards(f.row_a, &targets), Some((f.foundation, 1)));
        assert_eq!(f.table.can_drop_cards(f.foundation, &targets), None);
    }

    #[test]
    fn test_foreign_ids_are_refused() {
        let mut f = fixture();
        let ghost = StackId::new(99);
        let king = id_of(SPADES, KING);
        f.table.place(f.row_a, &[king], true).unwrap();

        assert!(f.table.get_stack(ghost).is_none());
        assert!(f.table.get_card(CardId::new(500)).is_none());
        assert!(f.table.top_cards(ghost, 3).is_empty());
        assert!(!f.table.can_move_top(ghost, 1));
        assert_eq!(f.table.movable_pile(ghost), None);
        assert!(!f.table.can_flip_card(ghost));
        assert!(!f.table.accepts_cards(ghost, Some(f.row_a), &[king]));
        assert!(!f.table.accepts_cards(f.row_b, Some(ghost), &[CardId::new(500)]));
        assert!(!f.table.accepts_cards_with(f.row_b, None, &[king], &[CardId::new(500)]));
        assert_eq!(f.table.can_drop_cards(ghost, &[f.foundation]), None);
    }

    #[test]
    fn test_flip() {
        let mut f = fixture();
        f.table.place(f.row_a, &[id_of(HEARTS, 5)], false).unwrap();
        assert!(f.table.can_flip_card(f.row_a));
        f.table.flip_top(f.row_a).unwrap();
        assert!(!f.table.can_flip_card(f.row_a));
        assert!(f.table.card(id_of(HEARTS, 5)).face_up);
    }

    #[test]
    fn test_transfer_updates_back_references() {
        let mut f = fixture();
        let cards = [id_of(HEARTS, 5), id_of(CLUBS, 4), id_of(HEARTS, 3)];
        f.table.place(f.row_a, &cards, true).unwrap();
        f.table.transfer(f.row_a, f.row_b, 2).unwrap();
        assert_eq!(f.table.stack(f.row_a).cards(), &cards[..1]);
        assert_eq!(f.table.stack(f.row_b).cards(), &cards[1..]);
        assert_eq!(f.table.card(cards[2]).stack, Some(f.row_b));

        assert!(matches!(f.table.transfer(f.row_a, f.row_b, 2), Err(EngineError::Invariant(_))));
        assert_eq!(f.table.stack(f.row_a).len(), 1);
    }

    #[test]
    fn test_place_twice_rejected() {
        let mut f = fixture();
        let c = id_of(HEARTS, 5);
        f.table.place(f.row_a, &[c], true).unwrap();
        assert!(f.table.place(f.row_b, &[c], true).is_err());
    }

    #[test]
    fn test_any_predicate_row() {
        let mut layout = Layout::new(&VariantInfo::new(1, "test"));
        let row = layout.add(StackConfig::row().with_sequence(SequencePredicate::Any));
        let mut table = layout.build();
        table.place(row, &[id_of(HEARTS, 5)], true).unwrap();
        table.set_face(id_of(HEARTS, 9), true).unwrap();
        assert!(table.accepts_cards(row, None, &[id_of(HEARTS, 9)]));
    }
}
