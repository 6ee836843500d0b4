//! Game state module - one player's engine
//!
//! [`GameEngine`] owns a [`PlayerState`] and drives the spawn → fall → lock →
//! clear cycle. Every operation builds a fresh copy of the state and commits
//! it, bumping [`PlayerState::revision`]; observers compare revisions instead
//! of diffing boards.
//!
//! Time only moves through [`GameEngine::tick`]. The engine never reads a
//! clock and never logs.

use crate::board::Board;
use crate::collision::{collides, drop_distance};
use crate::gravity::GravityTimer;
use crate::pieces::ActivePiece;
use crate::rng::Randomizer;
use crate::scoring::{drop_interval_ms, garbage_for_lines, level_for_lines, line_clear_score};
use crate::types::{GameAction, PieceKind, HARD_DROP_PER_ROW, ROTATION_KICKS, SOFT_DROP_PER_ROW};

/// Complete state of one player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerState {
    pub board: Board,
    pub active: Option<ActivePiece>,
    pub next_kind: PieceKind,
    pub score: u32,
    pub lines: u32,
    /// Starts at 1
    pub level: u32,
    pub game_over: bool,
    /// Garbage lines queued for the next spawn
    pub incoming_garbage: u32,
    /// Bumped on every committed change
    pub revision: u64,
}

impl PlayerState {
    pub fn new(next_kind: PieceKind) -> Self {
        Self {
            board: Board::new(),
            active: None,
            next_kind,
            score: 0,
            lines: 0,
            level: 1,
            game_over: false,
            incoming_garbage: 0,
            revision: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::Over
        } else if self.active.is_some() {
            Phase::Active
        } else {
            Phase::Empty
        }
    }
}

/// Lifecycle of an engine.
///
/// `Empty` waits for the next spawn; `Over` only leaves through a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Empty,
    Active,
    Over,
}

/// Outcome of a single lock, consumed by observers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockEvent {
    pub lines_cleared: u32,
    pub points: u32,
    pub garbage_sent: u32,
}

/// Rules engine for one player
#[derive(Debug, Clone)]
pub struct GameEngine {
    state: PlayerState,
    rng: Randomizer,
    gravity: GravityTimer,
    live: bool,
    /// Garbage produced by locks and not yet collected
    outgoing_garbage: u32,
    last_event: Option<LockEvent>,
}

impl GameEngine {
    /// Create an idle engine with the given RNG seed
    pub fn new(seed: u64) -> Self {
        let mut rng = Randomizer::new(seed);
        let next = rng.random_kind();
        Self {
            state: PlayerState::new(next),
            rng,
            gravity: GravityTimer::new(),
            live: false,
            outgoing_garbage: 0,
            last_event: None,
        }
    }

    /// Create an idle engine around an existing state.
    ///
    /// If the state has an active piece, setting the engine live arms gravity
    /// for it.
    pub fn from_state(state: PlayerState, seed: u64) -> Self {
        Self {
            state,
            rng: Randomizer::new(seed),
            gravity: GravityTimer::new(),
            live: false,
            outgoing_garbage: 0,
            last_event: None,
        }
    }

    /// Reset to a fresh state, go live and spawn the first piece
    pub fn start(&mut self) {
        self.reset();
        self.set_live(true);
        self.spawn();
    }

    /// Replace the state with a fresh one, keeping liveness.
    ///
    /// Gravity stays disarmed until the next spawn.
    pub fn reset(&mut self) {
        let mut fresh = PlayerState::new(self.rng.random_kind());
        fresh.revision = self.state.revision;
        self.gravity.disarm();
        self.outgoing_garbage = 0;
        self.last_event = None;
        self.commit(fresh);
    }

    pub fn set_live(&mut self, live: bool) {
        self.live = live;
        if live && self.state.phase() == Phase::Active {
            self.arm_gravity();
        } else if !live {
            self.gravity.disarm();
        }
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn revision(&self) -> u64 {
        self.state.revision
    }

    /// Current gravity interval based on level
    pub fn drop_interval_ms(&self) -> u32 {
        drop_interval_ms(self.state.level)
    }

    pub fn gravity_armed(&self) -> bool {
        self.gravity.is_armed()
    }

    /// Advance time.
    ///
    /// Spawns if the engine is waiting for a piece; a fresh piece starts its
    /// gravity countdown from this tick and does not move yet. Otherwise lets
    /// gravity fire as many times as `elapsed_ms` covers. Stops early at a
    /// lock, so the next piece appears on the following tick. Returns true if
    /// the state changed.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.live {
            return false;
        }

        if self.state.phase() == Phase::Empty {
            return self.spawn();
        }

        let mut changed = false;
        let mut budget = elapsed_ms;
        while self.state.phase() == Phase::Active && self.gravity.advance(&mut budget) {
            changed |= self.move_piece(0, 1, false);
            if self.state.phase() != Phase::Active {
                break;
            }
        }

        changed
    }

    /// Move the active piece by `(dx, dy)`.
    ///
    /// A blocked purely downward move locks the piece. A blocked sideways move
    /// is rejected with no effect. `is_drop` marks a manual soft drop, which
    /// scores per row. Returns true if the state changed.
    pub fn move_piece(&mut self, dx: i8, dy: i8, is_drop: bool) -> bool {
        if !self.live {
            return false;
        }
        let Some(piece) = self.state.active else {
            return false;
        };

        if !collides(&piece, &self.state.board, dx, dy, None) {
            let mut next = self.state.clone();
            next.active = Some(piece.shifted(dx, dy));
            if is_drop && dy > 0 {
                next.score += SOFT_DROP_PER_ROW * dy as u32;
            }
            self.commit(next);
            self.arm_gravity();
            return true;
        }

        if dx == 0 && dy > 0 {
            let next = self.state.clone();
            self.lock(next, piece);
            return true;
        }

        false
    }

    pub fn move_left(&mut self) -> bool {
        self.move_piece(-1, 0, false)
    }

    pub fn move_right(&mut self) -> bool {
        self.move_piece(1, 0, false)
    }

    pub fn soft_drop(&mut self) -> bool {
        self.move_piece(0, 1, true)
    }

    /// Step to the next rotation state, trying horizontal kicks in order
    pub fn rotate(&mut self) -> bool {
        if !self.live {
            return false;
        }
        let Some(piece) = self.state.active else {
            return false;
        };

        let (rotation, shape) = piece.next_rotation();
        for &kick in ROTATION_KICKS.iter() {
            if collides(&piece, &self.state.board, kick, 0, Some(&shape)) {
                continue;
            }
            let mut next = self.state.clone();
            next.active = Some(ActivePiece {
                shape,
                rotation,
                x: piece.x + kick,
                ..piece
            });
            self.commit(next);
            return true;
        }

        false
    }

    /// Drop straight to the floor and lock. Returns rows dropped.
    pub fn hard_drop(&mut self) -> Option<u32> {
        if !self.live {
            return None;
        }
        let piece = self.state.active?;

        let distance = drop_distance(&piece, &self.state.board);
        let landed = piece.shifted(0, distance as i8);
        let mut next = self.state.clone();
        next.score += HARD_DROP_PER_ROW * distance;
        self.lock(next, landed);
        Some(distance)
    }

    /// Apply a player control
    pub fn apply(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::Rotate => self.rotate(),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => self.hard_drop().is_some(),
        }
    }

    /// Queue garbage lines for the next spawn
    pub fn receive_garbage(&mut self, lines: u32) -> bool {
        if !self.live || lines == 0 {
            return false;
        }
        let mut next = self.state.clone();
        next.incoming_garbage = next.incoming_garbage.saturating_add(lines);
        self.commit(next);
        true
    }

    /// Take and clear garbage produced since the last call
    pub fn take_outgoing_garbage(&mut self) -> u32 {
        std::mem::take(&mut self.outgoing_garbage)
    }

    /// Take and clear the last lock event
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Bring in the queued garbage and the next piece.
    ///
    /// If the new piece does not fit, the game is over; the garbage stays on
    /// the board and no piece is active.
    fn spawn(&mut self) -> bool {
        if self.state.phase() != Phase::Empty {
            return false;
        }

        let mut next = self.state.clone();
        next.board
            .inject_garbage(next.incoming_garbage, self.rng.rng_mut());
        next.incoming_garbage = 0;

        let piece = ActivePiece::spawn(next.next_kind);
        if collides(&piece, &next.board, 0, 0, None) {
            next.game_over = true;
            self.commit(next);
            self.gravity.disarm();
            return true;
        }

        next.active = Some(piece);
        next.next_kind = self.rng.random_kind();
        self.commit(next);
        self.arm_gravity();
        true
    }

    /// Stamp `piece` into `next`, clear rows and settle score, lines and level
    fn lock(&mut self, mut next: PlayerState, piece: ActivePiece) {
        next.board.stamp(&piece.shape, piece.x, piece.y, piece.kind);
        let cleared = next.board.clear_full_rows() as u32;

        // Bonus uses the level before this lock
        let points = line_clear_score(cleared, next.level);
        next.score += points;
        next.lines += cleared;
        next.level = level_for_lines(next.lines);
        next.active = None;

        let garbage = garbage_for_lines(cleared);
        self.outgoing_garbage += garbage;
        self.last_event = Some(LockEvent {
            lines_cleared: cleared,
            points,
            garbage_sent: garbage,
        });

        self.commit(next);
        self.arm_gravity();
    }

    fn commit(&mut self, mut next: PlayerState) {
        next.revision = self.state.revision.wrapping_add(1);
        self.state = next;
    }

    fn arm_gravity(&mut self) {
        if self.live && !self.state.game_over {
            self.gravity.arm(self.drop_interval_ms());
        }
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(1)
    }
}
