//! Versioned binary save stream and in-memory bookmarks.
//!
//! A save is a sequence of bincode records:
//!
//! | # | record                                                       |
//! |---|--------------------------------------------------------------|
//! | 1 | product tag                                                  |
//! | 2 | version string, version tuple                                |
//! | 3 | bookmark kind                                                |
//! | 4 | format version                                               |
//! | 5 | variant id, variant game version                             |
//! | 6 | seed record (seed, kind in v2, ms flag, origin)              |
//! | 7 | generator state                                              |
//! | 8 | stack count, then `(card, face_up)` per stack                |
//! | 9 | talon round, finished flag                                   |
//! | 10| variant blob, per-stack extras                               |
//! | 11| move history, history index                                  |
//! | 12| statistics (save and transient kinds only)                   |
//! | 13| `"EOF"`                                                      |
//!
//! Loading reads everything into a staging copy, validates it, and only
//! then replaces the running game. A failed load leaves the game as it was.

use std::io::{Read, Write};
use std::sync::Arc;

use bincode::Options;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::board::Board;
use super::observer::GameEvent;
use super::state::Game;
use crate::core::action::{AtomicMove, LogicalMove};
use crate::core::config::EngineOptions;
use crate::core::entity::{CardId, StackId};
use crate::core::history::{MoveLog, MoveStats, Phase};
use crate::core::rng::{GameRandom, RandomKind, RandomState, SeedOrigin, LC_SEED_LIMIT};
use crate::error::SaveError;
use crate::rules::Variant;
use crate::stacks::Table;

/// Product tag opening every save.
pub const PRODUCT: &str = "solitaire-engine";

/// Stream layout version written by this build.
pub const VERSION_TUPLE: (u32, u32, u32) = (1, 0, 0);

const MIN_VERSION_TUPLE: (u32, u32, u32) = (1, 0, 0);
const SENTINEL: &str = "EOF";
const SAVE_LIMIT: u64 = 16 * 1024 * 1024;
const MAX_STACKS: usize = 1024;

/// What a save stream is for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BookmarkKind {
    /// A full save to disk.
    Save = 0,
    /// The position before a bookmark jump, for undoing the jump.
    Transient = 1,
    /// A player bookmark. Carries no statistics.
    Bookmark = 2,
}

impl BookmarkKind {
    fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::Save),
            1 => Some(Self::Transient),
            2 => Some(Self::Bookmark),
            _ => None,
        }
    }

    fn carries_stats(self) -> bool {
        matches!(self, Self::Save | Self::Transient)
    }
}

/// Seed record layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FormatVersion {
    /// Generator chosen from the seed magnitude.
    V1 = 1,
    /// Generator kind stored explicitly.
    #[default]
    V2 = 2,
}

impl FormatVersion {
    fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(Self::V1),
            2 => Some(Self::V2),
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct StackExtras {
    round: i32,
    closed: bool,
    flags: Vec<(String, i64)>,
}

fn codec() -> impl Options {
    bincode::DefaultOptions::new().with_limit(SAVE_LIMIT)
}

fn write<W: Write, T: Serialize + ?Sized>(writer: &mut W, value: &T) -> Result<(), SaveError> {
    codec().serialize_into(&mut *writer, value)?;
    Ok(())
}

fn read<R: Read, T: DeserializeOwned>(reader: &mut R, what: &str) -> Result<T, SaveError> {
    codec()
        .deserialize_from(&mut *reader)
        .map_err(|err| SaveError::Corrupt(format!("{what}: {err}")))
}

fn corrupt(msg: impl Into<String>) -> SaveError {
    let msg = msg.into();
    tracing::warn!(%msg, "rejected corrupt save");
    SaveError::Corrupt(msg)
}

fn incompatible(msg: impl Into<String>) -> SaveError {
    let msg = msg.into();
    tracing::warn!(%msg, "rejected incompatible save");
    SaveError::Incompatible(msg)
}

/// Everything a load adopts, validated.
struct Staged {
    board: Board,
    moves: MoveLog,
    stats: Option<MoveStats>,
    finished: bool,
}

impl Game {
    /// Write a save stream in the current format.
    pub fn save<W: Write>(&self, writer: W, kind: BookmarkKind) -> Result<(), SaveError> {
        self.save_versioned(writer, kind, FormatVersion::default())
    }

    /// Write a save stream in a chosen format version.
    pub fn save_versioned<W: Write>(
        &self,
        mut writer: W,
        kind: BookmarkKind,
        format: FormatVersion,
    ) -> Result<(), SaveError> {
        if !self.variant.can_save_game(self) {
            return Err(SaveError::CannotSave(format!("{} refuses to save now", self.info.name)));
        }
        if !self.moves.current().is_empty() || self.moves.phase() != Phase::Play {
            return Err(SaveError::CannotSave("a move is in progress".into()));
        }
        let w = &mut writer;
        let random = &self.board.random;
        let table = &self.board.table;

        write(w, PRODUCT)?;
        write(w, env!("CARGO_PKG_VERSION"))?;
        write(w, &VERSION_TUPLE)?;
        write(w, &(kind as u8))?;
        write(w, &(format as u8))?;
        write(w, &(self.info.id, self.info.game_version))?;
        match format {
            FormatVersion::V1 => {
                if v1_kind(random.initial_seed(), random.is_ms_deal()) != random.kind() {
                    return Err(SaveError::CannotSave(format!(
                        "{:?} seed {} needs format version 2",
                        random.kind(),
                        random.initial_seed()
                    )));
                }
                write(w, &(random.initial_seed(), random.is_ms_deal(), random.origin()))?;
            }
            FormatVersion::V2 => {
                write(w, &(random.initial_seed(), random.kind(), random.is_ms_deal(), random.origin()))?;
            }
        }
        write(w, &random.state())?;

        write(w, &(table.stacks().len() as u32))?;
        for stack in table.stacks() {
            let cards: Vec<(CardId, bool)> = stack.cards().iter().map(|&c| (c, table.card(c).face_up)).collect();
            write(w, &cards)?;
        }
        let talon_round = table.groups().talon.map_or(1, |t| table.stack(t).round());
        write(w, &(talon_round, self.finished))?;

        write(w, &self.board.variant_state)?;
        let extras: Vec<StackExtras> = table
            .stacks()
            .iter()
            .map(|s| {
                let mut flags: Vec<(String, i64)> = s.flags().iter().map(|(k, v)| (k.clone(), *v)).collect();
                flags.sort();
                StackExtras {
                    round: s.round(),
                    closed: s.is_closed(),
                    flags,
                }
            })
            .collect();
        write(w, &extras)?;

        let history: Vec<&LogicalMove> = self.moves.history().iter().collect();
        write(w, &history)?;
        write(w, &(self.moves.index() as u64))?;
        if kind.carries_stats() {
            write(w, &self.stats)?;
        }
        write(w, SENTINEL)?;
        writer.flush()?;
        tracing::debug!(variant = %self.info.name, ?kind, ?format, moves = self.moves.len(), "saved game");
        Ok(())
    }

    /// Build a game of `variant` from a save stream.
    pub fn load<R: Read>(
        variant: Arc<dyn Variant>,
        options: EngineOptions,
        reader: R,
    ) -> Result<Game, SaveError> {
        let mut game = Game::new(variant, options);
        game.restore(reader)?;
        Ok(game)
    }

    /// Replace the running game with a save stream of the same variant.
    pub fn restore<R: Read>(&mut self, mut reader: R) -> Result<(), SaveError> {
        let staged = self.stage(&mut reader)?;
        self.board = staged.board;
        self.moves = staged.moves;
        if let Some(stats) = staged.stats {
            self.stats = stats;
        }
        self.finished = staged.finished;
        self.last_demo_hint = None;
        tracing::debug!(variant = %self.info.name, moves = self.moves.len(), "restored game");
        self.emit(GameEvent::Restored);
        Ok(())
    }

    fn stage<R: Read>(&self, r: &mut R) -> Result<Staged, SaveError> {
        let product: String = read(r, "product tag")?;
        if product != PRODUCT {
            return Err(incompatible(format!("product {product:?}")));
        }
        let _version: String = read(r, "version string")?;
        let tuple: (u32, u32, u32) = read(r, "version tuple")?;
        if tuple < MIN_VERSION_TUPLE {
            return Err(incompatible(format!("version {tuple:?} is too old")));
        }
        let kind_tag: u8 = read(r, "bookmark kind")?;
        let kind = BookmarkKind::from_tag(kind_tag).ok_or_else(|| corrupt(format!("bookmark kind {kind_tag}")))?;
        let format_tag: u8 = read(r, "format version")?;
        let format =
            FormatVersion::from_tag(format_tag).ok_or_else(|| incompatible(format!("format version {format_tag}")))?;
        let (variant_id, game_version): (u32, u32) = read(r, "variant")?;
        if variant_id != self.info.id {
            return Err(incompatible(format!("save is for variant {variant_id}, not {}", self.info.id)));
        }
        if !self.variant.can_load_game(game_version) {
            return Err(incompatible(format!("variant version {game_version}")));
        }

        let mut random = match format {
            FormatVersion::V1 => {
                let (seed, ms, origin): (u128, bool, SeedOrigin) = read(r, "seed")?;
                build_random(seed, v1_kind(seed, ms), ms)?.with_origin(origin)
            }
            FormatVersion::V2 => {
                let (seed, kind, ms, origin): (u128, RandomKind, bool, SeedOrigin) = read(r, "seed")?;
                build_random(seed, kind, ms)?.with_origin(origin)
            }
        };
        if kind != BookmarkKind::Bookmark {
            random.set_origin(SeedOrigin::Restored);
        }
        let state: RandomState = read(r, "random state")?;
        random.set_state(&state).map_err(|e| corrupt(e.to_string()))?;

        let (table, variant_state, finished) = self.stage_table(r)?;
        let history: Vec<LogicalMove> = read(r, "history")?;
        let index: u64 = read(r, "history index")?;
        validate_history(&table, &history)?;
        let index = usize::try_from(index).map_err(|_| corrupt("history index overflow"))?;
        let moves = MoveLog::from_parts(history.into_iter().collect(), index).map_err(|e| corrupt(e.to_string()))?;

        let stats = if kind.carries_stats() {
            Some(read::<_, MoveStats>(r, "statistics")?)
        } else {
            None
        };
        let sentinel: String = read(r, "sentinel")?;
        if sentinel != SENTINEL {
            return Err(corrupt(format!("bad sentinel {sentinel:?}")));
        }

        Ok(Staged {
            board: Board {
                table,
                random,
                variant_state,
            },
            moves,
            stats,
            finished,
        })
    }

    fn stage_table<R: Read>(&self, r: &mut R) -> Result<(Table, Vec<u8>, bool), SaveError> {
        let mut table = self.board.table.clone();
        table.clear();
        let nstacks: u32 = read(r, "stack count")?;
        let nstacks = nstacks as usize;
        if nstacks > MAX_STACKS || nstacks != table.stacks().len() {
            return Err(corrupt(format!("{nstacks} stacks, layout has {}", table.stacks().len())));
        }
        let mut placed = 0;
        for i in 0..nstacks {
            let cards: Vec<(CardId, bool)> = read(r, "stack cards")?;
            let id = StackId::new(i as u16);
            for (card, face_up) in cards {
                table.place(id, &[card], face_up).map_err(|e| corrupt(e.to_string()))?;
                placed += 1;
            }
        }
        if placed != table.cards().len() {
            return Err(corrupt(format!("{placed} cards placed, deck has {}", table.cards().len())));
        }

        let (talon_round, finished): (i32, bool) = read(r, "talon round")?;
        let variant_state: Vec<u8> = read(r, "variant state")?;
        let extras: Vec<StackExtras> = read(r, "stack extras")?;
        if extras.len() != nstacks {
            return Err(corrupt(format!("{} stack extras for {nstacks} stacks", extras.len())));
        }
        for (i, extra) in extras.into_iter().enumerate() {
            if extra.round < 1 {
                return Err(corrupt(format!("round {} on stack {i}", extra.round)));
            }
            let stack = table
                .stack_mut(StackId::new(i as u16))
                .map_err(|e| corrupt(e.to_string()))?;
            stack.round = extra.round;
            stack.closed = extra.closed;
            stack.flags = extra.flags.into_iter().collect();
        }
        if let Some(talon) = table.groups().talon {
            if table.stack(talon).round() != talon_round {
                return Err(corrupt(format!("talon round {talon_round} disagrees with stack extras")));
            }
        }
        Ok((table, variant_state, finished))
    }

    // === Bookmarks ===

    fn save_to_vec(&self, kind: BookmarkKind) -> Result<Vec<u8>, SaveError> {
        let mut buf = Vec::new();
        self.save(&mut buf, kind)?;
        Ok(buf)
    }

    /// Remember the current position in `slot`.
    pub fn set_bookmark(&mut self, slot: u8) -> Result<(), SaveError> {
        let bytes = self.save_to_vec(BookmarkKind::Bookmark)?;
        self.bookmarks.insert(slot, bytes);
        Ok(())
    }

    #[must_use]
    pub fn has_bookmark(&self, slot: u8) -> bool {
        self.bookmarks.contains_key(&slot)
    }

    /// Jump to the position in `slot`. `Ok(false)` if the slot is empty.
    pub fn goto_bookmark(&mut self, slot: u8) -> Result<bool, SaveError> {
        let Some(bytes) = self.bookmarks.get(&slot).cloned() else {
            return Ok(false);
        };
        let undo = self.save_to_vec(BookmarkKind::Transient)?;
        self.restore(bytes.as_slice())?;
        self.undo_bookmark = Some(undo);
        self.stats.goto_bookmark_moves += 1;
        Ok(true)
    }

    /// Return to where the last bookmark jump started.
    pub fn undo_goto_bookmark(&mut self) -> Result<bool, SaveError> {
        let Some(bytes) = self.undo_bookmark.take() else {
            return Ok(false);
        };
        let jumps = self.stats.goto_bookmark_moves;
        if let Err(err) = self.restore(bytes.as_slice()) {
            self.undo_bookmark = Some(bytes);
            return Err(err);
        }
        self.stats.goto_bookmark_moves = jumps;
        Ok(true)
    }
}

/// Version 1 streams imply the generator from the seed.
fn v1_kind(seed: u128, ms: bool) -> RandomKind {
    if ms || seed < LC_SEED_LIMIT {
        RandomKind::Lc
    } else {
        RandomKind::Mt
    }
}

fn build_random(seed: u128, kind: RandomKind, ms: bool) -> Result<GameRandom, SaveError> {
    let random = match kind {
        RandomKind::Lc => {
            let seed = u64::try_from(seed).map_err(|_| corrupt(format!("LC seed {seed} out of range")))?;
            if ms {
                GameRandom::ms(seed)
            } else {
                GameRandom::lc(seed)
            }
            .map_err(|e| corrupt(e.to_string()))?
        }
        RandomKind::Mt => GameRandom::mt(seed),
    };
    Ok(random)
}

fn validate_history(table: &Table, history: &[LogicalMove]) -> Result<(), SaveError> {
    let nstacks = table.stacks().len();
    let ncards = table.cards().len();
    for (i, logical) in history.iter().enumerate() {
        for atom in logical.iter() {
            if let Some(bad) = atom.stacks().into_iter().find(|s| s.index() >= nstacks) {
                return Err(corrupt(format!("history entry {i} names unknown {bad}")));
            }
            if let AtomicMove::ShuffleStack { card_ids, .. } = atom {
                if card_ids.iter().any(|c| c.index() >= ncards) {
                    return Err(corrupt(format!("history entry {i} names an unknown card")));
                }
            }
        }
    }
    Ok(())
}
