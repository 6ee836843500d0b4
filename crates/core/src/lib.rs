//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the rules of a head-to-head falling-block game: the
//! board, the piece catalog, collision, scoring, gravity and garbage. It has
//! **no dependencies** on rendering, networking or I/O.
//!
//! - **Deterministic**: the same seed and inputs produce the same game
//! - **Caller-driven time**: engines advance only through `tick(elapsed_ms)`
//! - **Value states**: every operation commits a fresh [`PlayerState`]
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid, row clearing and garbage injection
//! - [`pieces`]: the seven-piece catalog and the falling piece
//! - [`collision`]: placement legality and drop distance
//! - [`game_state`]: the per-player engine
//! - [`gravity`]: the engine's fall timer
//! - [`scoring`]: points, garbage attacks and the speed curve
//! - [`duel`]: two engines wired together, plus the outcome rule
//! - [`snapshot`]: render overlay
//!
//! # Rules
//!
//! - Pieces are drawn uniformly at random (no bag) and rotate through a fixed
//!   list of states; a blocked rotation tries the kicks `0, +1, -1, +2, -2`.
//! - No lock delay: a blocked downward move locks at once.
//! - Clearing 2, 3 or 4 lines sends 1, 2 or 4 garbage lines to the opponent.
//!   Received garbage waits for the next spawn.
//!
//! # Example
//!
//! ```
//! use tetris_clash_core::{GameEngine, Phase};
//!
//! let mut game = GameEngine::new(12345);
//! game.start();
//!
//! game.move_right();
//! game.rotate();
//! let rows = game.hard_drop().unwrap();
//!
//! assert_eq!(game.state().score, rows * 2);
//! assert_eq!(game.phase(), Phase::Empty);
//!
//! // The next piece arrives on the next tick
//! game.tick(16);
//! assert_eq!(game.phase(), Phase::Active);
//! ```

pub mod board;
pub mod collision;
pub mod duel;
pub mod game_state;
pub mod gravity;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use tetris_clash_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use collision::{collides, drop_distance};
pub use duel::{decide_outcome, Duel, MatchOutcome, Standing};
pub use game_state::{GameEngine, LockEvent, Phase, PlayerState};
pub use gravity::GravityTimer;
pub use pieces::{shapes, shapes_of, ActivePiece, PieceDef, Shape, CATALOG};
pub use rng::Randomizer;
pub use scoring::{drop_interval_ms, garbage_for_lines, level_for_lines, line_clear_score};
pub use snapshot::overlay;
