//! Mutable game state and the application of atomic moves.
//!
//! `Board` is everything an atomic move may touch: the table, the random
//! generator and the opaque variant blob. Applying a move forward or
//! backward checks the move's preconditions before changing anything, so a
//! rejected move leaves the board as it was.

use crate::core::action::{AtomicMove, SAVE_STATE_ON_REDO, SAVE_STATE_ON_UNDO};
use crate::core::entity::{CardId, StackId};
use crate::core::rng::{GameRandom, RandomState};
use crate::error::{EngineError, EngineResult};
use crate::stacks::Table;

/// Table, generator and variant blob of one game.
#[derive(Clone, Debug)]
pub struct Board {
    pub(crate) table: Table,
    pub(crate) random: GameRandom,
    pub(crate) variant_state: Vec<u8>,
}

/// Comparable snapshot of everything undo must restore.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardSnapshot {
    /// Per stack: `(card, face_up, pos)` bottom first.
    pub piles: Vec<Vec<(CardId, bool, (i32, i32))>>,
    pub rounds: Vec<i32>,
    pub closed: Vec<bool>,
    pub flags: Vec<Vec<(String, i64)>>,
    pub random: RandomState,
    pub variant_state: Vec<u8>,
}

impl Board {
    pub(crate) fn new(table: Table, random: GameRandom) -> Self {
        Self {
            table,
            random,
            variant_state: Vec::new(),
        }
    }

    #[must_use]
    pub fn table(&self) -> &Table {
        &self.table
    }

    #[must_use]
    pub fn random(&self) -> &GameRandom {
        &self.random
    }

    #[must_use]
    pub fn variant_state(&self) -> &[u8] {
        &self.variant_state
    }

    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        let stacks = self.table.stacks();
        BoardSnapshot {
            piles: stacks
                .iter()
                .map(|s| {
                    s.cards()
                        .iter()
                        .map(|&c| {
                            let card = self.table.card(c);
                            (c, card.face_up, card.pos)
                        })
                        .collect()
                })
                .collect(),
            rounds: stacks.iter().map(|s| s.round()).collect(),
            closed: stacks.iter().map(|s| s.is_closed()).collect(),
            flags: stacks
                .iter()
                .map(|s| {
                    let mut flags: Vec<_> = s.flags().iter().map(|(k, v)| (k.clone(), *v)).collect();
                    flags.sort();
                    flags
                })
                .collect(),
            random: self.random.state(),
            variant_state: self.variant_state.clone(),
        }
    }

    /// Apply `atom` forward (`do`/`redo`) or backward (`undo`).
    pub(crate) fn apply(&mut self, atom: &AtomicMove, forward: bool) -> EngineResult<()> {
        tracing::trace!(kind = atom.kind_name(), forward, "apply atomic move");
        for stack in atom.stacks() {
            self.table.check_stack(stack)?;
        }
        match atom {
            AtomicMove::Move { ncards, from, to, .. } => {
                if forward {
                    self.table.transfer(*from, *to, *ncards)
                } else {
                    self.table.transfer(*to, *from, *ncards)
                }
            }
            AtomicMove::Flip { stack, .. } => self.table.flip_top(*stack),
            AtomicMove::FlipAndMove { from, to, .. } => {
                let (src, dst) = if forward { (*from, *to) } else { (*to, *from) };
                if from == to || self.table.stack(src).is_empty() {
                    return Err(EngineError::invariant(format!(
                        "flip-and-move from empty {src} to {dst}"
                    )));
                }
                if forward {
                    self.table.flip_top(*from)?;
                    self.table.transfer(*from, *to, 1)
                } else {
                    self.table.transfer(*to, *from, 1)?;
                    self.table.flip_top(*from)
                }
            }
            AtomicMove::TurnStack { from, to } => {
                if forward {
                    self.table.turn_over(*from, *to, false)
                } else {
                    self.table.turn_over(*to, *from, true)
                }
            }
            AtomicMove::NextRound { stack } => self.next_round(*stack, forward),
            AtomicMove::SaveSeed { state } => self.random.set_state(state),
            AtomicMove::ShuffleStack { stack, card_ids, state } => {
                self.shuffle_stack(*stack, card_ids, state, forward)
            }
            AtomicMove::UpdateFlags { stack, key, old, new } => {
                let value = if forward { new } else { old };
                let flags = &mut self.table.stack_mut(*stack)?.flags;
                match value {
                    Some(v) => {
                        flags.insert(key.clone(), *v);
                    }
                    None => {
                        flags.remove(key);
                    }
                }
                Ok(())
            }
            AtomicMove::FlipAll { stack } => self.table.flip_all(*stack),
            AtomicMove::SaveState { state, flags } => {
                let gate = if forward { SAVE_STATE_ON_REDO } else { SAVE_STATE_ON_UNDO };
                if flags & gate != 0 {
                    self.variant_state = state.clone();
                }
                Ok(())
            }
            AtomicMove::CloseStack { stack, was_closed } => {
                self.table.stack_mut(*stack)?.closed = if forward { true } else { *was_closed };
                Ok(())
            }
            AtomicMove::SingleCard { from, to, from_pos, .. } => {
                if forward {
                    self.table.move_single(*from, *from_pos, *to)
                } else {
                    self.table.unmove_single(*to, *from, *from_pos)
                }
            }
        }
    }

    fn next_round(&mut self, id: StackId, forward: bool) -> EngineResult<()> {
        let stack = self.table.stack_mut(id)?;
        let max_rounds = stack.config.talon.map_or(-1, |t| t.max_rounds);
        if forward {
            if max_rounds >= 0 && stack.round >= max_rounds {
                return Err(EngineError::invariant(format!(
                    "{id} already in last round {}",
                    stack.round
                )));
            }
            stack.round += 1;
        } else {
            if stack.round <= 1 {
                return Err(EngineError::invariant(format!("{id} round underflow")));
            }
            stack.round -= 1;
        }
        Ok(())
    }

    fn shuffle_stack(
        &mut self,
        id: StackId,
        card_ids: &[CardId],
        state: &RandomState,
        forward: bool,
    ) -> EngineResult<()> {
        let mut random = self.random.clone();
        random.set_state(state)?;
        if forward {
            if self.table.stack(id).cards() != card_ids {
                return Err(EngineError::invariant(format!(
                    "shuffle of {id} does not match the recorded order"
                )));
            }
            let mut order = card_ids.to_vec();
            random.shuffle(&mut order);
            self.table.reorder(id, order)?;
        } else {
            self.table.reorder(id, card_ids.to_vec())?;
        }
        self.random = random;
        Ok(())
    }
}
