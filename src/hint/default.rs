//! General-purpose hint search, tuned for Klondike-type games.
//!
//! ## Steps
//!
//! 1. drops to foundations and pile moves onto rows (always)
//! 2. split a row pile so a buried card can drop (`Score` and up, only if
//!    nothing was found yet)
//! 3. take a card back from a foundation to unlock a pile move (same)
//! 4. park a row card in a reserve (if nothing was found, or at `Show`)
//!
//! ## Score bands
//!
//! | band          | meaning                                  |
//! |---------------|------------------------------------------|
//! | 90000..=93012 | drop that should happen now              |
//! | 80000..       | pile move onto a non-empty row           |
//! | 60000..       | pile move onto an empty row              |
//! | 50000..       | eager drop                               |
//! | 40000..       | split a pile to free a drop              |
//! | 30000..31999  | move from the waste                      |
//! | 25000..       | drop from the talon stacks               |
//! | 20000..       | foundation card back onto a row          |
//! | 10000..       | row card into a reserve                  |
//!
//! Bonuses inside a band prefer emptying rows, uncovering face-down cards
//! and same-suit builds.

use super::list::{Hint, HintColor, HintLevel, HintList};
use super::provider::HintProvider;
use crate::cards::KING;
use crate::core::entity::{CardId, StackId};
use crate::game::Game;
use crate::stacks::{BaseRank, DropPolicy, StackGroups, Table};

const BONUS_DROP_CARD: i64 = 300;
const BONUS_SAME_SUIT_MOVE: i64 = 200;
const BONUS_NORMAL_MOVE: i64 = 100;
const BONUS_FLIP_CARD: i64 = 1500;
const BONUS_CREATE_EMPTY_ROW: i64 = 9000;
const BONUS_CAN_CREATE_EMPTY_ROW: i64 = 2000;

const K: i64 = KING as i64;

/// The default hint search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DefaultHint {
    /// Skip pile moves that could be moved straight back.
    pub cautious: bool,
    /// Prefer moving high-rank cards over emptying low-rank piles.
    pub prefer_high_rank: bool,
}

impl DefaultHint {
    /// Loop-avoiding variant for games where piles can shuttle between
    /// rows (Spider, FreeCell).
    #[must_use]
    pub fn cautious() -> Self {
        Self {
            cautious: true,
            prefer_high_rank: true,
        }
    }
}

impl HintProvider for DefaultHint {
    fn compute_hints(&self, game: &Game, hints: &mut HintList) {
        let table = game.table();
        let search = Search {
            table,
            groups: table.groups(),
            config: *self,
        };
        let level = hints.level();
        search.drops_and_pile_moves(hints);
        if hints.is_empty() && level >= HintLevel::Score {
            search.split_for_drop(hints);
        }
        if hints.is_empty() && level >= HintLevel::Score {
            search.foundation_to_row(hints);
        }
        if hints.is_empty() || level == HintLevel::Show {
            search.row_to_reserve(hints);
        }
    }
}

struct Search<'a> {
    table: &'a Table,
    groups: &'a StackGroups,
    config: DefaultHint,
}

impl Search<'_> {
    fn rank(&self, card: CardId) -> i64 {
        i64::from(self.table.card(card).rank)
    }

    fn movable(&self, id: StackId) -> &[CardId] {
        match self.table.movable_pile(id) {
            Some(n) => self.table.top_cards(id, n),
            None => &[],
        }
    }

    /// Would `r` holding `contents` drop its top card onto a foundation?
    fn can_drop_from(&self, r: StackId, contents: &[CardId]) -> bool {
        let Some(&top) = contents.last() else {
            return false;
        };
        if self.table.stack(r).config().drop == DropPolicy::Never
            || !self.table.can_move_cards_with(r, &[top], contents)
        {
            return false;
        }
        self.groups
            .foundations
            .iter()
            .any(|&f| f != r && self.table.accepts_cards(f, Some(r), &[top]))
    }

    fn shall_move_pile(&self, r: StackId, t: StackId, pile: &[CardId], rpile: &[CardId]) -> bool {
        if r == t || !self.table.accepts_cards(t, Some(r), pile) {
            return false;
        }
        if !self.config.cautious || rpile.is_empty() {
            return true;
        }
        !self.table.accepts_cards_with(r, Some(t), pile, rpile)
    }

    fn drop_score(&self, r: StackId, t: StackId, ncards: usize) -> i64 {
        if ncards > 1 {
            return 93_000;
        }
        let Some(top) = self.table.stack(r).top() else {
            return 0;
        };
        let target = self.table.stack(t);
        let cap = target.cap();
        let rank = self.rank(top);
        let d = match cap.base_rank {
            BaseRank::Rank(base) => {
                let modulus = i64::from(cap.modulus);
                let mut d = (rank - i64::from(base)).rem_euclid(modulus);
                if d > modulus / 2 {
                    d -= modulus;
                }
                d
            }
            BaseRank::Any | BaseRank::NoRank => target.len() as i64,
        };
        let score = if d.abs() <= 1 {
            92_000
        } else if self.groups.talon_stacks.contains(&r) {
            25_000
        } else if self.table.stack(r).len() == 1 {
            91_000
        } else {
            50_000
        };
        score + (K - rank)
    }

    fn card_bonus(&self, r: StackId, t: StackId, pile: &[CardId], rpile: &[CardId]) -> i64 {
        let mut bonus = 0;
        if self.can_drop_from(r, rpile) {
            bonus = BONUS_DROP_CARD;
        }
        let first = pile[0];
        let same_suit = self
            .table
            .stack(t)
            .top()
            .map_or(false, |top| self.table.card(top).suit == self.table.card(first).suit);
        bonus += if same_suit {
            BONUS_SAME_SUIT_MOVE + 1 + self.rank(first)
        } else if self.config.prefer_high_rank {
            BONUS_NORMAL_MOVE + 1 + self.rank(first)
        } else if let Some(&below) = rpile.last() {
            BONUS_NORMAL_MOVE + (K - self.rank(below))
        } else {
            BONUS_NORMAL_MOVE + 1 + self.rank(first)
        };
        bonus
    }

    fn special_bonus(&self, r: StackId, t: StackId, rpile: &[CardId]) -> (i64, HintColor) {
        let Some(&below) = rpile.last() else {
            return (BONUS_CREATE_EMPTY_ROW, HintColor::Black);
        };
        if !self.table.card(below).face_up {
            return ((BONUS_FLIP_CARD - rpile.len() as i64).max(0), HintColor::Black);
        }
        if self.table.can_move_cards_with(r, rpile, rpile) {
            let movable_elsewhere = self.groups.rows.iter().any(|&x| {
                x != t && !self.table.stack(x).is_empty() && self.table.accepts_cards(x, Some(r), rpile)
            });
            if movable_elsewhere {
                return (BONUS_CAN_CREATE_EMPTY_ROW, HintColor::Blue);
            }
        }
        (0, HintColor::Black)
    }

    fn pile_score(&self, base: i64, r: StackId, t: StackId, pile: &[CardId], rpile: &[CardId]) -> (i64, HintColor) {
        let (special, color) = self.special_bonus(r, t, rpile);
        (base + special + self.card_bonus(r, t, pile, rpile), color)
    }

    /// Step 1: drops to foundations, then pile moves onto rows.
    fn drops_and_pile_moves(&self, hints: &mut HintList) {
        for &r in &self.groups.drop {
            if let Some((t, ncards)) = self.table.can_drop_cards(r, &self.groups.foundations) {
                let score = self.drop_score(r, t, ncards);
                hints.add(score, ncards, r, Some(t), HintColor::Black, None);
                if score >= 90_000 && hints.level() >= HintLevel::Score {
                    break;
                }
            }
            let pile = self.movable(r);
            if !pile.is_empty() {
                self.move_pile(r, pile, hints);
            }
        }
    }

    fn move_pile(&self, r: StackId, pile: &[CardId], hints: &mut HintList) {
        let cards = self.table.stack(r).cards();
        let rpile = &cards[..cards.len() - pile.len()];
        let from_waste = self.groups.talon_stacks.contains(&r);
        let mut empty_row_seen = false;

        for &t in &self.groups.rows {
            if !self.shall_move_pile(r, t, pile, rpile) {
                continue;
            }
            let target_empty = self.table.stack(t).is_empty();
            let (score, color) = if from_waste {
                let base = if target_empty { 30_000 } else { 31_000 };
                (base + self.card_bonus(r, t, pile, rpile), HintColor::Black)
            } else if target_empty {
                // Never shift a whole pile between rows, and offer only one
                // empty row.
                if rpile.is_empty() || empty_row_seen {
                    continue;
                }
                empty_row_seen = true;
                self.pile_score(60_000, r, t, pile, rpile)
            } else {
                self.pile_score(80_000, r, t, pile, rpile)
            };
            hints.add(score, pile.len(), r, Some(t), color, None);
        }
    }

    /// Step 2: move the part of a row pile above a droppable card, and force
    /// the drop next.
    fn split_for_drop(&self, hints: &mut HintList) {
        for &r in &self.groups.rows {
            let pile = self.movable(r);
            if pile.len() < 2 {
                continue;
            }
            let Some(top) = self.table.stack(r).top() else {
                continue;
            };
            for (i, &card) in pile.iter().enumerate() {
                let Some(&target) = self
                    .groups
                    .foundations
                    .iter()
                    .find(|&&f| f != r && self.table.accepts_cards(f, Some(r), &[card]))
                else {
                    continue;
                };
                let sub_pile = &pile[i + 1..];
                if !self.table.can_move_cards(r, sub_pile) {
                    continue;
                }
                for &t in &self.groups.rows {
                    if t == r || !self.table.accepts_cards(t, Some(r), sub_pile) {
                        continue;
                    }
                    let score = 40_000 + 1000 + (K - self.rank(top));
                    let force = Hint::forced_move(1, r, target);
                    hints.add(score, sub_pile.len(), r, Some(t), HintColor::Red, Some(force));
                }
            }
        }
    }

    /// Step 3: take a foundation card back when it lets a pile follow it.
    fn foundation_to_row(&self, hints: &mut HintList) {
        for &s in &self.groups.foundations {
            let Some(card) = self.table.stack(s).top() else {
                continue;
            };
            if !self.table.can_move_cards(s, &[card]) {
                continue;
            }
            for &t in &self.groups.rows {
                if t == s || !self.table.accepts_cards(t, Some(s), &[card]) {
                    continue;
                }
                let mut extended = self.table.stack(t).cards().to_vec();
                extended.push(card);
                for &r in &self.groups.drop {
                    if r == t {
                        continue;
                    }
                    let pile = self.movable(r);
                    if pile.is_empty() || !self.table.accepts_cards_with(t, Some(r), pile, &extended) {
                        continue;
                    }
                    let cards = self.table.stack(r).cards();
                    let rpile = &cards[..cards.len() - pile.len()];
                    if self.table.accepts_cards_with(r, Some(t), pile, rpile) {
                        continue;
                    }
                    let score = 20_000 + self.rank(card);
                    let force = Hint::forced_move(pile.len(), r, t);
                    hints.add(score, 1, s, Some(t), HintColor::Blue, Some(force));
                }
            }
        }
    }

    /// Step 4: park a row's top card in the first reserve that takes it.
    fn row_to_reserve(&self, hints: &mut HintList) {
        if self.groups.reserves.is_empty() {
            return;
        }
        for &r in &self.groups.rows {
            let Some(card) = self.table.stack(r).top() else {
                continue;
            };
            if !self.table.can_move_cards(r, &[card]) {
                continue;
            }
            let pile = [card];
            let cards = self.table.stack(r).cards();
            let rpile = &cards[..cards.len() - 1];
            for &t in &self.groups.reserves {
                if t == r || !self.table.accepts_cards(t, Some(r), &pile) {
                    continue;
                }
                if self.table.accepts_cards_with(r, Some(t), &pile, rpile) {
                    continue;
                }
                let (score, color) = self.pile_score(10_000, r, t, &pile, rpile);
                hints.add(score, 1, r, Some(t), color, None);
                break;
            }
        }
    }
}
