//! The game state machine.
//!
//! `Game` owns the board, the move log and the statistics of one game and
//! is the only write path into them. Every change made after the opening
//! deal goes through one of the `*_move` primitives, which apply an atomic
//! move to the board and append it to the open logical move.
//! `finish_move` commits the logical move; `undo` and `redo` replay it.
//!
//! ## Flow
//!
//! ```text
//! new_game ─► shuffle into talon ─► Variant::start_game ─► history starts
//!     │
//!     ▼
//! play_move / play_flip / deal_cards ─► *_move primitives ─► finish_move
//!     │                                                         │
//!     └──────────────────── auto_play ◄─────────────────────────┘
//! ```
//!
//! In the play phase, transfers are checked against the acceptance rules
//! and a bypass is reported as `EngineError::RuleViolation`. Deals, fills
//! and the opening layout are trusted.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::board::{Board, BoardSnapshot};
use super::observer::{GameEvent, GameObserver};
use crate::cards::ms_deal_order;
use crate::core::action::{AtomicMove, SAVE_STATE_ON_REDO, SAVE_STATE_ON_UNDO};
use crate::core::config::{EngineOptions, VariantInfo};
use crate::core::entity::{CardId, StackId};
use crate::core::game_number::{format_game_number, parse_game_number, GameNumberFormat};
use crate::core::history::{MoveLog, MoveStats, Phase};
use crate::core::rng::{GameRandom, RandomKind, SeedPicker};
use crate::error::{EngineError, EngineResult};
use crate::hint::Hint;
use crate::rules::Variant;
use crate::stacks::{Layout, Stack, Table};

/// Outcome of a finished (or abandoned) game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WinStatus {
    /// Not won, or won with hints or demo help.
    Lost,
    Won,
    /// Won without undo, bookmark jumps or reshuffles.
    Perfect,
}

/// One game of one variant.
pub struct Game {
    pub(crate) variant: Arc<dyn Variant>,
    pub(crate) info: VariantInfo,
    pub(crate) options: EngineOptions,
    pub(crate) board: Board,
    pub(crate) moves: MoveLog,
    pub(crate) stats: MoveStats,
    picker: SeedPicker,
    observers: Vec<Box<dyn GameObserver>>,
    pub(crate) finished: bool,
    pub(crate) demo: bool,
    /// Hint the demo played last; its forced follow-up wins next time.
    pub(crate) last_demo_hint: Option<Hint>,
    pub(crate) bookmarks: FxHashMap<u8, Vec<u8>>,
    pub(crate) undo_bookmark: Option<Vec<u8>>,
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("variant", &self.info.name)
            .field("game_number", &self.game_number(GameNumberFormat::Plain))
            .field("phase", &self.moves.phase())
            .field("index", &self.moves.index())
            .field("history", &self.moves.len())
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

impl Game {
    /// Build the layout of `variant`. No cards are dealt until `new_game`.
    pub fn new(variant: Arc<dyn Variant>, options: EngineOptions) -> Self {
        let info = variant.info();
        let mut layout = Layout::new(&info);
        variant.create_layout(&mut layout);
        let table = layout.build();
        let mut picker = SeedPicker::new(options.seed_picker_seed);
        let random = picker.pick();
        tracing::debug!(
            variant = %info.name,
            stacks = table.stacks().len(),
            cards = table.cards().len(),
            "created game"
        );
        Self {
            variant,
            info,
            options,
            board: Board::new(table, random),
            moves: MoveLog::new(),
            stats: MoveStats::default(),
            picker,
            observers: Vec::new(),
            finished: false,
            demo: false,
            last_demo_hint: None,
            bookmarks: FxHashMap::default(),
            undo_bookmark: None,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn variant(&self) -> &Arc<dyn Variant> {
        &self.variant
    }

    #[must_use]
    pub fn info(&self) -> &VariantInfo {
        &self.info
    }

    #[must_use]
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: EngineOptions) {
        self.options = options;
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn table(&self) -> &Table {
        &self.board.table
    }

    #[must_use]
    pub fn random(&self) -> &GameRandom {
        &self.board.random
    }

    #[must_use]
    pub fn moves(&self) -> &MoveLog {
        &self.moves
    }

    #[must_use]
    pub fn stats(&self) -> &MoveStats {
        &self.stats
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.moves.phase()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    #[must_use]
    pub fn is_demo(&self) -> bool {
        self.demo
    }

    /// Count subsequent moves as demo moves.
    pub fn set_demo(&mut self, demo: bool) {
        self.demo = demo;
        if !demo {
            self.last_demo_hint = None;
        }
    }

    /// The variant's opaque state blob.
    #[must_use]
    pub fn variant_state(&self) -> &[u8] {
        &self.board.variant_state
    }

    /// Everything undo must restore, for equality checks.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        self.board.snapshot()
    }

    pub fn add_observer(&mut self, observer: Box<dyn GameObserver>) {
        self.observers.push(observer);
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        for observer in &mut self.observers {
            observer.notify(&event);
        }
    }

    pub(crate) fn talon(&self) -> EngineResult<StackId> {
        self.board
            .table
            .groups()
            .talon
            .ok_or_else(|| EngineError::invariant(format!("{} has no talon", self.info.name)))
    }

    fn stack_len(&self, id: StackId) -> EngineResult<usize> {
        self.board
            .table
            .get_stack(id)
            .map(Stack::len)
            .ok_or(EngineError::UnknownStack(id))
    }

    // === Starting a game ===

    /// Deal a new game. `None` picks a fresh random seed.
    pub fn new_game(&mut self, random: Option<GameRandom>) -> EngineResult<()> {
        let random = match random {
            Some(random) => random,
            None => self.picker.pick(),
        };
        self.reset();
        self.board.random = random;
        self.shuffle_into_talon()?;

        let variant = Arc::clone(&self.variant);
        variant.start_game(self)?;
        self.moves.start();

        let game_number = self.game_number(GameNumberFormat::Plain);
        tracing::debug!(variant = %self.info.name, %game_number, "new game");
        self.emit(GameEvent::GameStarted { game_number });

        if self.options.autoplay_on_start {
            self.auto_play()?;
        }
        Ok(())
    }

    /// Replay the deal named by a game number.
    pub fn restore_from_game_number(&mut self, input: &str) -> EngineResult<()> {
        let random = parse_game_number(input)?;
        self.new_game(Some(random))
    }

    #[must_use]
    pub fn game_number(&self, format: GameNumberFormat) -> String {
        format_game_number(&self.board.random, format)
    }

    fn reset(&mut self) {
        self.board.table.clear();
        self.board.variant_state.clear();
        self.moves = MoveLog::new();
        self.stats = MoveStats::default();
        self.finished = false;
        self.demo = false;
        self.last_demo_hint = None;
        self.bookmarks.clear();
        self.undo_bookmark = None;
    }

    /// Shuffle every card and stack them face down on the talon, last card
    /// on top. 52-card decks under the LC generator start from the
    /// Microsoft order so `ms` deals match.
    fn shuffle_into_talon(&mut self) -> EngineResult<()> {
        let talon = self.talon()?;
        let mut cards: Vec<CardId> = self.board.table.cards().iter().map(|c| c.id).collect();
        if self.board.random.kind() == RandomKind::Lc && cards.len() == 52 {
            cards = ms_deal_order(&cards);
        }
        self.board.random.reset();
        self.board.random.shuffle(&mut cards);
        let cards = self.variant.shuffle_hook(&self.board.table, cards);
        self.board.table.place(talon, &cards, false)
    }

    // === Dealing helpers for variants ===

    /// Deal one card from the talon onto each of `stacks`. The talon must
    /// hold enough cards.
    pub fn deal_row(&mut self, stacks: &[StackId], flip: bool) -> EngineResult<usize> {
        let talon = self.talon()?;
        let available = self.stack_len(talon)?;
        if available < stacks.len() {
            return Err(EngineError::invariant(format!(
                "talon holds {available} card(s), deal needs {}",
                stacks.len()
            )));
        }
        self.deal_to_stacks(talon, stacks, flip)
    }

    /// Like `deal_row`, stopping when the talon runs out.
    pub fn deal_row_avail(&mut self, stacks: &[StackId], flip: bool) -> EngineResult<usize> {
        let talon = self.talon()?;
        let n = stacks.len().min(self.stack_len(talon)?);
        self.deal_to_stacks(talon, &stacks[..n], flip)
    }

    fn deal_to_stacks(&mut self, talon: StackId, stacks: &[StackId], flip: bool) -> EngineResult<usize> {
        for &stack in stacks {
            let face_down = self
                .board
                .table
                .stack(talon)
                .top()
                .map_or(false, |c| !self.board.table.card(c).face_up);
            if flip && face_down {
                self.flip_move(talon)?;
            }
            self.move_move(1, talon, stack)?;
        }
        Ok(stacks.len())
    }

    /// Move the top talon card face up onto the first of `foundations`
    /// whose suit matches it. Returns the receiving foundation.
    pub fn deal_base_card(&mut self, foundations: &[StackId]) -> EngineResult<StackId> {
        let talon = self.talon()?;
        let top = self
            .board
            .table
            .stack(talon)
            .top()
            .ok_or_else(|| EngineError::invariant("base card from empty talon"))?;
        let suit = self.board.table.card(top).suit;
        let target = foundations
            .iter()
            .copied()
            .find(|&f| {
                self.board
                    .table
                    .get_stack(f)
                    .map_or(false, |s| s.cap().suit.map_or(true, |fs| fs == suit) && s.is_empty())
            })
            .ok_or_else(|| EngineError::invariant(format!("no empty foundation for suit {suit}")))?;
        if !self.board.table.card(top).face_up {
            self.flip_move(talon)?;
        }
        self.move_move(1, talon, target)?;
        Ok(target)
    }

    // === Atomic move primitives ===

    fn record(&mut self, atom: AtomicMove) -> EngineResult<()> {
        self.board.apply(&atom, true)?;
        self.moves.record(atom);
        Ok(())
    }

    fn check_transfer(&self, from: StackId, to: StackId, cards: &[CardId]) -> EngineResult<()> {
        if self.moves.phase() == Phase::Play && !self.board.table.accepts_cards(to, Some(from), cards) {
            tracing::debug!(%from, %to, ncards = cards.len(), "transfer rejected by acceptance rules");
            return Err(EngineError::RuleViolation {
                ncards: cards.len(),
                from,
                to,
            });
        }
        Ok(())
    }

    /// Transfer the top `ncards` of `from` onto `to`.
    pub fn move_move(&mut self, ncards: usize, from: StackId, to: StackId) -> EngineResult<()> {
        let len = self.stack_len(from)?;
        self.board.table.check_stack(to)?;
        if ncards == 0 || ncards > len {
            return Err(EngineError::invariant(format!(
                "move of {ncards} card(s) from {from} holding {len}"
            )));
        }
        self.check_transfer(from, to, self.board.table.top_cards(from, ncards))?;
        self.record(AtomicMove::transfer(ncards, from, to))
    }

    /// Turn the top card of `stack` over.
    pub fn flip_move(&mut self, stack: StackId) -> EngineResult<()> {
        self.record(AtomicMove::Flip {
            stack,
            animated: false,
        })
    }

    /// Flip the top card of `from` and move it onto `to`.
    pub fn flip_and_move_move(&mut self, from: StackId, to: StackId) -> EngineResult<()> {
        if self.stack_len(from)? == 0 {
            return Err(EngineError::invariant(format!("flip-and-move from empty {from}")));
        }
        self.board.table.check_stack(to)?;
        if self.moves.phase() == Phase::Play {
            let mut preview = self.board.table.clone();
            preview.flip_top(from)?;
            if !preview.accepts_cards(to, Some(from), preview.top_cards(from, 1)) {
                return Err(EngineError::RuleViolation { ncards: 1, from, to });
            }
        }
        self.record(AtomicMove::FlipAndMove { from, to, frames: -1 })
    }

    /// Move all of `from` onto the empty `to`, face down and reversed.
    /// Every card of `from` must be face up.
    pub fn turn_stack_move(&mut self, from: StackId, to: StackId) -> EngineResult<()> {
        self.record(AtomicMove::TurnStack { from, to })
    }

    /// Advance the talon round counter of `stack`.
    pub fn next_round_move(&mut self, stack: StackId) -> EngineResult<()> {
        self.record(AtomicMove::NextRound { stack })
    }

    /// Pin the current random state so undo restores it.
    pub fn save_seed_move(&mut self) -> EngineResult<()> {
        let state = self.board.random.state();
        self.record(AtomicMove::SaveSeed { state })
    }

    /// Shuffle `stack` with the game generator.
    pub fn shuffle_stack_move(&mut self, stack: StackId) -> EngineResult<()> {
        let card_ids = self
            .board
            .table
            .get_stack(stack)
            .ok_or(EngineError::UnknownStack(stack))?
            .cards()
            .to_vec();
        let state = self.board.random.state();
        self.record(AtomicMove::ShuffleStack {
            stack,
            card_ids,
            state,
        })
    }

    /// Set (`Some`) or clear (`None`) a per-stack flag.
    pub fn update_flags_move(&mut self, stack: StackId, key: &str, new: Option<i64>) -> EngineResult<()> {
        let old = self
            .board
            .table
            .get_stack(stack)
            .ok_or(EngineError::UnknownStack(stack))?
            .flag(key);
        self.record(AtomicMove::UpdateFlags {
            stack,
            key: key.to_string(),
            old,
            new,
        })
    }

    /// Turn every card of `stack` over.
    pub fn flip_all_move(&mut self, stack: StackId) -> EngineResult<()> {
        self.record(AtomicMove::FlipAll { stack })
    }

    /// Replace the variant blob. Undo restores the previous blob.
    pub fn set_variant_state(&mut self, state: Vec<u8>) -> EngineResult<()> {
        let old = self.board.variant_state.clone();
        self.record(AtomicMove::SaveState {
            state: old,
            flags: SAVE_STATE_ON_UNDO,
        })?;
        self.record(AtomicMove::SaveState {
            state,
            flags: SAVE_STATE_ON_REDO,
        })
    }

    /// Close `stack`: it neither accepts nor releases cards afterwards.
    pub fn close_stack_move(&mut self, stack: StackId) -> EngineResult<()> {
        let was_closed = self
            .board
            .table
            .get_stack(stack)
            .ok_or(EngineError::UnknownStack(stack))?
            .is_closed();
        self.record(AtomicMove::CloseStack { stack, was_closed })
    }

    /// Move the card at `from_pos` in `from` onto `to`.
    pub fn single_card_move(&mut self, from: StackId, to: StackId, from_pos: usize) -> EngineResult<()> {
        let len = self.stack_len(from)?;
        self.board.table.check_stack(to)?;
        if from_pos >= len {
            return Err(EngineError::invariant(format!(
                "single card at {from_pos} of {from} holding {len}"
            )));
        }
        let card = self.board.table.stack(from).cards()[from_pos];
        self.check_transfer(from, to, &[card])?;
        self.record(AtomicMove::SingleCard {
            from,
            to,
            from_pos,
            frames: -1,
        })
    }

    // === Player moves ===

    /// Play `ncards` from `from` onto `to` if the rules allow it, then
    /// refill, commit and autoplay. `Ok(false)` means the move is illegal.
    pub fn play_move(&mut self, ncards: usize, from: StackId, to: StackId) -> EngineResult<bool> {
        let table = &self.board.table;
        if !table.can_move_top(from, ncards)
            || !table.accepts_cards(to, Some(from), table.top_cards(from, ncards))
        {
            return Ok(false);
        }
        self.guarded(|game| {
            game.move_move(ncards, from, to)?;
            game.fill_stack(from)?;
            let won = game.check_for_win();
            game.finish_move();
            if !won {
                game.auto_play()?;
            }
            Ok(true)
        })
    }

    /// Turn over the face-down top card of `stack`.
    pub fn play_flip(&mut self, stack: StackId) -> EngineResult<bool> {
        if !self.board.table.can_flip_card(stack) {
            return Ok(false);
        }
        self.guarded(|game| {
            game.flip_move(stack)?;
            game.finish_move();
            game.auto_play()?;
            Ok(true)
        })
    }

    /// Let the variant refill `stack` inside the open logical move.
    pub(crate) fn fill_stack(&mut self, stack: StackId) -> EngineResult<()> {
        let old = self.moves.enter_phase(Phase::Fill);
        let variant = Arc::clone(&self.variant);
        let result = variant.fill_stack(self, stack);
        self.moves.leave_phase(old);
        result
    }

    /// Run `step` inside the open logical move. If it fails, the atoms it
    /// left uncommitted are reverted and dropped.
    pub(crate) fn guarded<T>(&mut self, step: impl FnOnce(&mut Self) -> EngineResult<T>) -> EngineResult<T> {
        let result = step(self);
        if result.is_err() {
            self.rollback_current();
        }
        result
    }

    fn rollback_current(&mut self) {
        let pending = self.moves.discard_current();
        if pending.is_empty() {
            return;
        }
        tracing::warn!(atoms = pending.len(), "reverting unfinished logical move");
        let mut board = self.board.clone();
        for atom in pending.iter().rev() {
            if let Err(err) = board.apply(atom, false) {
                tracing::error!(%err, "unfinished logical move could not be reverted");
                return;
            }
        }
        self.board = board;
    }

    /// Commit the open logical move. `false` if there was nothing to commit.
    pub fn finish_move(&mut self) -> bool {
        match self.moves.finish(&mut self.stats, self.demo) {
            Some(commit) => {
                let index = self.moves.index();
                tracing::trace!(index, ?commit, "logical move committed");
                self.emit(GameEvent::MoveCommitted { index, commit });
                true
            }
            None => false,
        }
    }

    // === Undo / redo ===

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.moves.can_undo() && self.variant.can_undo(self)
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.moves.can_redo() && self.variant.can_undo(self)
    }

    /// Revert the last committed logical move.
    pub fn undo(&mut self) -> EngineResult<()> {
        if !self.variant.can_undo(self) {
            return Err(EngineError::invariant(format!("{} does not allow undo", self.info.name)));
        }
        let logical = self.moves.begin_undo()?;
        let saved = self.board.clone();
        for atom in logical.iter().rev() {
            if let Err(err) = self.board.apply(atom, false) {
                self.board = saved;
                self.moves.abort_replay();
                return Err(err);
            }
        }
        self.moves.end_replay();
        self.stats.undo_moves += 1;
        self.stats.total_moves += 1;
        self.finished = self.finished && self.is_game_won();
        self.last_demo_hint = None;
        let index = self.moves.index();
        tracing::trace!(index, "undo");
        self.emit(GameEvent::Undone { index });
        Ok(())
    }

    /// Replay the next logical move of the redo tail.
    pub fn redo(&mut self) -> EngineResult<()> {
        if !self.variant.can_undo(self) {
            return Err(EngineError::invariant(format!("{} does not allow redo", self.info.name)));
        }
        let logical = self.moves.begin_redo()?;
        let saved = self.board.clone();
        for atom in logical.iter() {
            if let Err(err) = self.board.apply(atom, true) {
                self.board = saved;
                self.moves.abort_replay();
                return Err(err);
            }
        }
        self.moves.end_replay();
        self.stats.redo_moves += 1;
        self.stats.total_moves += 1;
        self.last_demo_hint = None;
        let index = self.moves.index();
        tracing::trace!(index, "redo");
        self.emit(GameEvent::Redone { index });
        self.check_for_win();
        Ok(())
    }

    // === Winning ===

    #[must_use]
    pub fn is_game_won(&self) -> bool {
        self.variant.is_game_won(self)
    }

    /// Mark the game finished if it is won. Returns whether it is finished.
    pub fn check_for_win(&mut self) -> bool {
        if self.finished {
            return true;
        }
        if !self.is_game_won() {
            return false;
        }
        self.finish_move();
        self.finished = true;
        let perfect = self.win_status() == WinStatus::Perfect;
        tracing::debug!(variant = %self.info.name, perfect, moves = self.stats.total_moves, "game won");
        self.emit(GameEvent::GameWon { perfect });
        true
    }

    #[must_use]
    pub fn win_status(&self) -> WinStatus {
        if !self.is_game_won() || self.stats.hints > 0 || self.stats.demo_moves > 0 {
            WinStatus::Lost
        } else if self.stats.is_perfect() {
            WinStatus::Perfect
        } else {
            WinStatus::Won
        }
    }
}
