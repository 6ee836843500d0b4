//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data with no external dependencies, so they can be used
//! by the rules engine, the input layer, and the relay protocol alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//!
//! # Cell Values
//!
//! | Value | Meaning |
//! |-------|---------|
//! | 0 | empty |
//! | 1-7 | locked piece, by [`PieceKind::id`] |
//! | 8 | garbage |
//!
//! # Speed Progression
//!
//! Gravity interval per level is `max(100, 1000 * 0.8^(level - 1))` milliseconds:
//!
//! | Level | Interval |
//! |-------|----------|
//! | 1 | 1000ms |
//! | 2 | 800ms |
//! | 3 | 640ms |
//! | 5 | 409ms |
//! | 11 | 107ms |
//! | 12+ | 100ms (floor) |
//!
//! # Examples
//!
//! ```
//! use tetris_clash_types::{PieceKind, GameAction, BOARD_WIDTH, BOARD_HEIGHT};
//!
//! let piece = PieceKind::from_id(6).unwrap();
//! assert_eq!(piece, PieceKind::T);
//! assert_eq!(piece.name(), "T");
//!
//! assert!(PieceKind::from_id(9).is_err());
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use std::fmt;

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// A single board cell value.
pub type Cell = u8;

/// Empty cell value
pub const EMPTY_CELL: Cell = 0;

/// Cell value of an injected garbage block
pub const GARBAGE_CELL: Cell = 8;

/// Gravity interval at level 1
pub const INITIAL_DROP_INTERVAL_MS: u32 = 1000;

/// Multiplier applied to the gravity interval per level gained
pub const SPEED_FACTOR: f64 = 0.8;

/// Gravity never gets faster than this
pub const DROP_INTERVAL_MIN_MS: u32 = 100;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Points for clearing 1, 2, 3 and 4 lines in one lock
pub const SCORE_SINGLE: u32 = 100;
pub const SCORE_DOUBLE: u32 = 300;
pub const SCORE_TRIPLE: u32 = 500;
pub const SCORE_TETRIS: u32 = 800;

/// Per-line bonus scaled by `level - 1`
pub const LEVEL_BONUS_PER_LINE: u32 = 10;

/// Points per row of manual soft drop
pub const SOFT_DROP_PER_ROW: u32 = 1;

/// Points per row of hard drop
pub const HARD_DROP_PER_ROW: u32 = 2;

/// Garbage sent to the opponent, indexed by lines cleared in one lock
pub const GARBAGE_FOR_LINES: [u32; 5] = [0, 0, 1, 2, 4];

/// Horizontal offsets tried in order when a rotation collides
pub const ROTATION_KICKS: [i8; 5] = [0, 1, -1, 2, -2];

/// The seven tetromino piece kinds
///
/// Discriminants are the identifiers stored in board cells and sent over the
/// wire, so they double as color ids:
/// - **I** (1): bright blue bar
/// - **J** (2): dark blue
/// - **L** (3): orange
/// - **O** (4): yellow square
/// - **S** (5): green
/// - **T** (6): purple
/// - **Z** (7): red
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    I = 1,
    J = 2,
    L = 3,
    O = 4,
    S = 5,
    T = 6,
    Z = 7,
}

impl PieceKind {
    /// Every kind, in identifier order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Look up a kind by its numeric identifier
    pub fn from_id(id: u8) -> Result<Self, UnknownKindError> {
        match id {
            1 => Ok(PieceKind::I),
            2 => Ok(PieceKind::J),
            3 => Ok(PieceKind::L),
            4 => Ok(PieceKind::O),
            5 => Ok(PieceKind::S),
            6 => Ok(PieceKind::T),
            7 => Ok(PieceKind::Z),
            _ => Err(UnknownKindError { id }),
        }
    }

    /// Numeric identifier (1-7), also the board cell value
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }
}

/// Lookup of a piece kind identifier that is not in the catalog.
///
/// Identifiers produced by the engine's own generator are always valid, so
/// seeing this means a raw id came from outside (e.g. a peer's snapshot).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownKindError {
    pub id: u8,
}

impl fmt::Display for UnknownKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown piece kind id {} (expected 1-7)", self.id)
    }
}

impl std::error::Error for UnknownKindError {}

/// Player controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    Rotate,
    SoftDrop,
    HardDrop,
}

impl GameAction {
    /// Parse action from its camelCase name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "rotate" => Some(GameAction::Rotate),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::Rotate => "rotate",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
        }
    }

    /// Whether holding the key may trigger the action repeatedly
    pub fn repeats_when_held(&self) -> bool {
        matches!(
            self,
            GameAction::MoveLeft | GameAction::MoveRight | GameAction::SoftDrop
        )
    }
}

/// Which side of a match a player is on.
///
/// `One` is the lobby host, `Two` the guest; [`PlayerSlot::number`] is the
/// value carried as `playerNumber` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerSlot {
    One,
    Two,
}

impl PlayerSlot {
    pub fn number(self) -> u8 {
        match self {
            PlayerSlot::One => 1,
            PlayerSlot::Two => 2,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(PlayerSlot::One),
            2 => Some(PlayerSlot::Two),
            _ => None,
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            PlayerSlot::One => PlayerSlot::Two,
            PlayerSlot::Two => PlayerSlot::One,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_constants() {
        assert_eq!(GARBAGE_FOR_LINES[1], 0);
        assert_eq!(GARBAGE_FOR_LINES[2], 1);
        assert_eq!(GARBAGE_FOR_LINES[3], 2);
        assert_eq!(GARBAGE_FOR_LINES[4], 4);
        assert_eq!(ROTATION_KICKS, [0, 1, -1, 2, -2]);
        assert_eq!(
            [SCORE_SINGLE, SCORE_DOUBLE, SCORE_TRIPLE, SCORE_TETRIS],
            [100, 300, 500, 800]
        );
    }

    #[test]
    fn piece_ids_round_trip() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_id(kind.id()), Ok(kind));
        }
        assert_eq!(PieceKind::from_id(0), Err(UnknownKindError { id: 0 }));
        assert_eq!(PieceKind::from_id(8), Err(UnknownKindError { id: 8 }));
    }

    #[test]
    fn unknown_kind_error_message() {
        let err = PieceKind::from_id(42).unwrap_err();
        assert_eq!(err.to_string(), "unknown piece kind id 42 (expected 1-7)");
    }
}
