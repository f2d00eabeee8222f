//! Dealing, autoplay, and playing hints.
//!
//! Autoplay runs after every player move and repeats until nothing changes:
//!
//! 1. flip face-down tops of the drop stacks (`autofaceup`)
//! 2. drop one card or run onto a foundation (`autodrop`)
//! 3. deal when the waste has run empty (`autodeal`)
//!
//! Each flip, drop and deal is its own logical move so the player can undo
//! them one by one. Autoplay is off while the demo plays.

use std::sync::Arc;

use super::observer::GameEvent;
use super::state::Game;
use crate::core::entity::StackId;
use crate::core::history::Phase;
use crate::error::EngineResult;
use crate::hint::{get_hints, Hint, HintAction, HintLevel};
use crate::stacks::DealMode;

/// A legal transfer found by `Game::candidate_moves`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CandidateMove {
    pub from: StackId,
    pub to: StackId,
    pub ncards: usize,
}

impl Game {
    // === Dealing ===

    /// Whether the talon can deal (or redeal) right now.
    #[must_use]
    pub fn can_deal_cards(&self) -> bool {
        if let Some(answer) = self.variant.can_deal_cards(self) {
            return answer;
        }
        let table = &self.board.table;
        let groups = table.groups();
        let Some(talon) = groups.talon.and_then(|t| table.get_stack(t)) else {
            return false;
        };
        let Some(config) = talon.talon() else {
            return false;
        };
        match config.mode {
            DealMode::Custom => false,
            DealMode::Waste { .. } => match groups.waste {
                Some(waste) => {
                    !talon.is_empty() || (!table.stack(waste).is_empty() && talon.can_redeal())
                }
                None => false,
            },
            DealMode::Rows { require_no_empty_rows } => {
                !talon.is_empty()
                    && !groups.rows.is_empty()
                    && (!require_no_empty_rows || groups.rows.iter().all(|&r| !table.stack(r).is_empty()))
            }
        }
    }

    /// Deal from the talon as one logical move, then autoplay. Returns the
    /// number of cards dealt; 0 if the talon cannot deal.
    pub fn deal_cards(&mut self) -> EngineResult<usize> {
        if self.moves.phase() == Phase::Init {
            return self.deal_talon();
        }
        if !self.can_deal_cards() {
            return Ok(0);
        }
        self.finish_move();
        self.guarded(|game| {
            let n = game.deal_talon()?;
            game.finish_move();
            if n > 0 {
                if let Some(talon) = game.board.table.groups().talon {
                    game.emit(GameEvent::Dealt { talon, ncards: n });
                }
            }
            if !game.check_for_win() {
                game.auto_play()?;
            }
            Ok(n)
        })
    }

    /// Deal inside the open logical move without committing or autoplay.
    pub(crate) fn deal_talon(&mut self) -> EngineResult<usize> {
        let old = self.moves.enter_phase(Phase::Deal);
        let variant = Arc::clone(&self.variant);
        let result = match variant.deal_cards(self) {
            Some(result) => result,
            None => self.default_deal(),
        };
        self.moves.leave_phase(old);
        result
    }

    fn default_deal(&mut self) -> EngineResult<usize> {
        if !self.can_deal_cards() {
            return Ok(0);
        }
        let talon = self.talon()?;
        let Some(config) = self.board.table.stack(talon).talon().copied() else {
            return Ok(0);
        };
        match config.mode {
            DealMode::Custom => Ok(0),
            DealMode::Waste { shuffle_on_redeal } => {
                let Some(waste) = self.board.table.groups().waste else {
                    return Ok(0);
                };
                let available = self.board.table.stack(talon).len();
                if available > 0 {
                    let n = config.num_deal.min(available);
                    for _ in 0..n {
                        self.flip_and_move_move(talon, waste)?;
                    }
                    Ok(n)
                } else {
                    let n = self.board.table.stack(waste).len();
                    self.turn_stack_move(waste, talon)?;
                    if shuffle_on_redeal {
                        self.shuffle_stack_move(talon)?;
                    }
                    self.next_round_move(talon)?;
                    tracing::debug!(round = self.board.table.stack(talon).round(), "redeal");
                    Ok(n)
                }
            }
            DealMode::Rows { .. } => {
                let rows = self.board.table.groups().rows.clone();
                self.deal_row_avail(&rows, true)
            }
        }
    }

    // === Autoplay ===

    /// Run the flip / drop / deal loop. Returns the number of logical moves
    /// it committed.
    pub fn auto_play(&mut self) -> EngineResult<usize> {
        if self.demo {
            return Ok(0);
        }
        let before = self.stats.total_moves;
        let won = self.guarded(Self::auto_play_loop)?;
        self.finish_move();
        if !won {
            self.check_for_win();
        }
        let done = self.stats.total_moves - before;
        self.stats.autoplay_moves += done;
        Ok(done as usize)
    }

    fn auto_play_loop(&mut self) -> EngineResult<bool> {
        let drop_stacks = self.board.table.groups().drop.clone();
        let foundations = self.board.table.groups().foundations.clone();
        loop {
            let mut done_something = false;

            if self.options.autofaceup {
                for &s in &drop_stacks {
                    if self.board.table.can_flip_card(s) {
                        self.flip_move(s)?;
                        done_something = true;
                        self.finish_move();
                        if self.check_for_win() {
                            return Ok(true);
                        }
                    }
                }
            }

            if self.options.autodrop {
                for &s in &drop_stacks {
                    if let Some((to, ncards)) = self.board.table.can_drop_cards(s, &foundations) {
                        self.finish_move();
                        self.move_move(ncards, s, to)?;
                        self.fill_stack(s)?;
                        done_something = true;
                        break;
                    }
                }
            }

            if self.options.autodeal && self.auto_deal()? {
                done_something = true;
                self.finish_move();
                if self.check_for_win() {
                    return Ok(true);
                }
            }

            if !done_something {
                return Ok(false);
            }
        }
    }

    /// Deal when the waste has run empty.
    fn auto_deal(&mut self) -> EngineResult<bool> {
        let Some(waste) = self.board.table.groups().waste else {
            return Ok(false);
        };
        if !self.board.table.stack(waste).is_empty() || !self.can_deal_cards() {
            return Ok(false);
        }
        Ok(self.deal_talon()? > 0)
    }

    // === Hints ===

    /// Every legal transfer from a drop stack to an open stack, with the
    /// largest pile each target accepts.
    #[must_use]
    pub fn candidate_moves(&self) -> Vec<CandidateMove> {
        let table = &self.board.table;
        let groups = table.groups();
        let mut moves = Vec::new();
        for &from in &groups.drop {
            let Some(max) = table.movable_pile(from) else {
                continue;
            };
            for &to in &groups.open {
                if to == from {
                    continue;
                }
                let fits = (1..=max)
                    .rev()
                    .find(|&n| table.can_move_top(from, n) && table.accepts_cards(to, Some(from), table.top_cards(from, n)));
                if let Some(ncards) = fits {
                    moves.push(CandidateMove { from, to, ncards });
                }
            }
        }
        moves
    }

    /// Ranked hints for the current position.
    #[must_use]
    pub fn hints(&self, level: HintLevel) -> Vec<Hint> {
        get_hints(self, level, None)
    }

    /// The best player-facing hint. Counts against a perfect game.
    pub fn show_hint(&mut self) -> Option<Hint> {
        let best = self.hints(HintLevel::Show).into_iter().next()?;
        self.stats.hints += 1;
        Some(best)
    }

    /// Play `hint` if it still applies. `Ok(false)` if it went stale.
    pub fn play_hint(&mut self, hint: &Hint) -> EngineResult<bool> {
        match hint.action() {
            HintAction::Deal => {
                if !self.can_deal_cards() {
                    return Ok(false);
                }
                Ok(self.deal_cards()? > 0)
            }
            HintAction::Flip(stack) => self.play_flip(stack),
            HintAction::Move { ncards, from, to } => self.play_move(ncards, from, to),
        }
    }

    /// Play the best demo hint as a demo move. `Ok(false)` when the demo
    /// has nothing left to do.
    pub fn play_demo_move(&mut self) -> EngineResult<bool> {
        if self.finished {
            return Ok(false);
        }
        let taken = self.last_demo_hint.take();
        let Some(best) = get_hints(self, HintLevel::Demo, taken.as_ref()).into_iter().next() else {
            return Ok(false);
        };
        let was_demo = self.demo;
        self.demo = true;
        let played = self.play_hint(&best);
        self.demo = was_demo;
        if played? {
            self.last_demo_hint = Some(best);
            return Ok(true);
        }
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::EngineOptions;
    use crate::core::rng::GameRandom;
    use crate::games::Klondike;

    fn game(options: EngineOptions, seed: u128) -> Game {
        let mut game = Game::new(Arc::new(Klondike::default()), options);
        game.new_game(Some(GameRandom::from_seed(seed))).unwrap();
        game
    }

    #[test]
    fn test_waste_deal_and_redeal() {
        let mut g = game(EngineOptions::manual(), 2024);
        let talon = g.table().groups().talon.unwrap();
        let waste = g.table().groups().waste.unwrap();
        let in_talon = g.table().stack(talon).len();
        for _ in 0..in_talon {
            assert_eq!(g.deal_cards().unwrap(), 1);
        }
        assert!(g.table().stack(talon).is_empty());
        assert_eq!(g.table().stack(waste).len(), in_talon);

        assert!(g.can_deal_cards());
        assert_eq!(g.deal_cards().unwrap(), in_talon);
        assert_eq!(g.table().stack(talon).len(), in_talon);
        assert_eq!(g.table().stack(talon).round(), 2);
        assert!(g.table().stack(talon).cards().iter().all(|&c| !g.table().card(c).face_up));

        g.undo().unwrap();
        assert_eq!(g.table().stack(talon).round(), 1);
        assert!(g.table().stack(talon).is_empty());
    }

    #[test]
    fn test_autoplay_flips_and_drops() {
        let g = game(EngineOptions::default(), 11);
        // Nothing face down may remain on top of a row after autoplay.
        for &row in &g.table().groups().rows.clone() {
            assert!(!g.table().can_flip_card(row));
        }
        // No row top is an ace: those were dropped.
        let foundations = g.table().groups().foundations.clone();
        for &row in &g.table().groups().rows.clone() {
            assert_eq!(g.table().can_drop_cards(row, &foundations), None);
        }
        assert_eq!(g.stats().autoplay_moves, g.stats().total_moves);
    }

    #[test]
    fn test_candidate_moves_are_legal() {
        let g = game(EngineOptions::manual(), 555);
        for m in g.candidate_moves() {
            let cards = g.table().top_cards(m.from, m.ncards);
            assert!(g.table().can_move_cards(m.from, cards));
            assert!(g.table().accepts_cards(m.to, Some(m.from), cards));
        }
    }

    #[test]
    fn test_stale_hint_is_not_played() {
        let mut g = game(EngineOptions::manual(), 555);
        let rows = g.table().groups().rows.clone();
        let stale = Hint::forced_move(5, rows[0], rows[1]);
        let before = g.snapshot();
        assert!(!g.play_hint(&stale).unwrap());
        assert_eq!(g.snapshot(), before);
    }

    #[test]
    fn test_demo_moves_are_counted() {
        let mut g = game(EngineOptions::default(), 8080);
        let mut played = 0;
        while played < 20 && g.play_demo_move().unwrap() {
            played += 1;
        }
        assert!(played > 0);
        assert!(g.stats().demo_moves > 0);
        assert!(!g.is_demo());
        assert!(g.moves().index() <= g.moves().len());
    }

    #[test]
    fn test_show_hint_counts() {
        let mut g = game(EngineOptions::manual(), 31);
        let before = g.stats().hints;
        if g.show_hint().is_some() {
            assert_eq!(g.stats().hints, before + 1);
        } else {
            assert_eq!(g.stats().hints, before);
        }
    }
}
