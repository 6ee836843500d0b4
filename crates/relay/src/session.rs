//! Remote match session
//!
//! Runs the local player's engine against an opponent reached through a
//! [`MatchTransport`]. The opponent's engine is never simulated here: its
//! snapshots are kept for display and to decide the outcome, and its garbage
//! counts are fed into the local engine.

use arrayvec::ArrayVec;

use crate::transport::{Inbound, MatchTransport, Outbound};
use tetris_clash_core::{decide_outcome, GameEngine, MatchOutcome, PlayerState, Standing};
use tetris_clash_types::{GameAction, PlayerSlot};

/// Most inbound messages handled per pump
pub const MAX_INBOUND_PER_PUMP: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    AwaitingOpponent,
    ReadyToStart,
    Playing,
    Finished,
}

pub struct RemoteMatch<T: MatchTransport> {
    transport: T,
    slot: PlayerSlot,
    engine: GameEngine,
    stage: Stage,
    opponent_name: Option<String>,
    opponent: Option<PlayerState>,
    outcome: Option<MatchOutcome>,
    last_sent_revision: Option<u64>,
}

impl<T: MatchTransport> RemoteMatch<T> {
    /// Join the lobby as `player_name` in `slot`
    pub fn new(transport: T, slot: PlayerSlot, player_name: &str, seed: u64) -> Self {
        transport.send(Outbound::Join {
            player_name: player_name.to_string(),
        });
        Self {
            transport,
            slot,
            engine: GameEngine::new(seed),
            stage: Stage::AwaitingOpponent,
            opponent_name: None,
            opponent: None,
            outcome: None,
            last_sent_revision: None,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn slot(&self) -> PlayerSlot {
        self.slot
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn opponent(&self) -> Option<&PlayerState> {
        self.opponent.as_ref()
    }

    pub fn opponent_name(&self) -> Option<&str> {
        self.opponent_name.as_deref()
    }

    pub fn outcome(&self) -> Option<MatchOutcome> {
        self.outcome
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Tell the opponent we are ready without starting.
    ///
    /// Moves to `ReadyToStart`; play begins when the opponent starts and
    /// their ready arrives. Returns false unless waiting for an opponent or
    /// after a finished game.
    pub fn announce_ready(&mut self) -> bool {
        match self.stage {
            Stage::AwaitingOpponent | Stage::Finished => {
                self.transport.send(Outbound::Ready);
                self.stage = Stage::ReadyToStart;
                true
            }
            Stage::ReadyToStart | Stage::Playing => false,
        }
    }

    /// Begin play and tell the opponent, whose ready starts their side.
    ///
    /// Only valid from `ReadyToStart`.
    pub fn start(&mut self) -> bool {
        if self.stage != Stage::ReadyToStart {
            return false;
        }
        self.transport.send(Outbound::Ready);
        self.begin();
        true
    }

    /// Apply a local control
    pub fn apply(&mut self, action: GameAction) -> bool {
        self.stage == Stage::Playing && self.engine.apply(action)
    }

    /// One game-loop step: handle inbound messages, advance the engine, send
    /// garbage and state, and check for the end of the match.
    pub fn pump(&mut self, elapsed_ms: u32) -> bool {
        let mut inbox = ArrayVec::<Inbound, MAX_INBOUND_PER_PUMP>::new();
        while !inbox.is_full() {
            match self.transport.try_recv() {
                Some(msg) => inbox.push(msg),
                None => break,
            }
        }

        let mut changed = false;
        for msg in inbox {
            changed |= self.handle(msg);
        }

        if self.stage != Stage::Playing {
            return changed;
        }

        changed |= self.engine.tick(elapsed_ms);

        let garbage = self.engine.take_outgoing_garbage();
        if garbage > 0 {
            self.transport.send(Outbound::Garbage(garbage));
        }
        self.publish_state();

        let local = self.engine.standing();
        let remote = self
            .opponent
            .as_ref()
            .map(|s| Standing {
                game_over: s.game_over,
                score: s.score,
            })
            .unwrap_or_default();
        let (one, two) = match self.slot {
            PlayerSlot::One => (local, remote),
            PlayerSlot::Two => (remote, local),
        };
        if let Some(outcome) = decide_outcome(one, two) {
            self.outcome = Some(outcome);
            self.stage = Stage::Finished;
            self.engine.set_live(false);
            changed = true;
        }

        changed
    }

    fn handle(&mut self, msg: Inbound) -> bool {
        match msg {
            Inbound::OpponentJoined { player_name, .. } => {
                self.opponent_name = Some(player_name);
                true
            }
            Inbound::OpponentReady => match self.stage {
                Stage::AwaitingOpponent | Stage::Finished => {
                    self.stage = Stage::ReadyToStart;
                    true
                }
                Stage::ReadyToStart => {
                    self.begin();
                    true
                }
                Stage::Playing => false,
            },
            Inbound::OpponentState(state) => {
                self.opponent = Some(*state);
                true
            }
            Inbound::Garbage(lines) => {
                self.stage == Stage::Playing && self.engine.receive_garbage(lines)
            }
        }
    }

    fn begin(&mut self) {
        self.engine.start();
        self.stage = Stage::Playing;
        self.opponent = None;
        self.outcome = None;
        self.last_sent_revision = None;
        self.publish_state();
    }

    fn publish_state(&mut self) {
        let revision = self.engine.revision();
        if self.last_sent_revision != Some(revision) {
            self.transport
                .send(Outbound::State(Box::new(self.engine.state().clone())));
            self.last_sent_revision = Some(revision);
        }
    }
}
