//! Duel module - two engines in one process
//!
//! Each lock's garbage is handed to the other engine in the same step. Once
//! either player tops out, both engines freeze and the result is fixed.

use crate::game_state::GameEngine;
use crate::types::{GameAction, PlayerSlot};

/// Final result of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchOutcome {
    Winner(PlayerSlot),
    Draw,
}

/// What the outcome rule needs to know about one player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Standing {
    pub game_over: bool,
    pub score: u32,
}

/// Decide a match from both standings, `None` while both are still playing.
///
/// A single player over loses. Both over: the higher score wins, equal
/// scores draw.
pub fn decide_outcome(one: Standing, two: Standing) -> Option<MatchOutcome> {
    match (one.game_over, two.game_over) {
        (false, false) => None,
        (true, false) => Some(MatchOutcome::Winner(PlayerSlot::Two)),
        (false, true) => Some(MatchOutcome::Winner(PlayerSlot::One)),
        (true, true) => Some(match one.score.cmp(&two.score) {
            std::cmp::Ordering::Greater => MatchOutcome::Winner(PlayerSlot::One),
            std::cmp::Ordering::Less => MatchOutcome::Winner(PlayerSlot::Two),
            std::cmp::Ordering::Equal => MatchOutcome::Draw,
        }),
    }
}

impl GameEngine {
    pub fn standing(&self) -> Standing {
        Standing {
            game_over: self.state().game_over,
            score: self.state().score,
        }
    }
}

/// Local two-player match
#[derive(Debug, Clone)]
pub struct Duel {
    engines: [GameEngine; 2],
    live: bool,
    outcome: Option<MatchOutcome>,
}

impl Duel {
    pub fn new(seed: u64) -> Self {
        Self {
            engines: [GameEngine::new(seed), GameEngine::new(seed.wrapping_add(1))],
            live: false,
            outcome: None,
        }
    }

    /// Take over two prepared engines and go live without resetting them
    pub fn from_engines(mut one: GameEngine, mut two: GameEngine) -> Self {
        one.set_live(true);
        two.set_live(true);
        Self {
            engines: [one, two],
            live: true,
            outcome: None,
        }
    }

    /// Reinitialize both players and go live
    pub fn start(&mut self) {
        for engine in &mut self.engines {
            engine.start();
        }
        self.live = true;
        self.outcome = None;
    }

    /// Freeze both players
    pub fn stop(&mut self) {
        self.live = false;
        for engine in &mut self.engines {
            engine.set_live(false);
        }
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    pub fn outcome(&self) -> Option<MatchOutcome> {
        self.outcome
    }

    pub fn engine(&self, slot: PlayerSlot) -> &GameEngine {
        &self.engines[Self::index(slot)]
    }

    /// Apply one player's control, then exchange garbage
    pub fn apply(&mut self, slot: PlayerSlot, action: GameAction) -> bool {
        if !self.live {
            return false;
        }
        let changed = self.engines[Self::index(slot)].apply(action);
        self.settle();
        changed
    }

    /// Advance both players, then exchange garbage
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.live {
            return false;
        }
        let mut changed = false;
        for engine in &mut self.engines {
            changed |= engine.tick(elapsed_ms);
        }
        self.settle();
        changed
    }

    fn settle(&mut self) {
        let [one, two] = &mut self.engines;
        let from_one = one.take_outgoing_garbage();
        let from_two = two.take_outgoing_garbage();
        two.receive_garbage(from_one);
        one.receive_garbage(from_two);

        if let Some(outcome) = decide_outcome(one.standing(), two.standing()) {
            self.outcome = Some(outcome);
            self.stop();
        }
    }

    fn index(slot: PlayerSlot) -> usize {
        match slot {
            PlayerSlot::One => 0,
            PlayerSlot::Two => 1,
        }
    }
}
