//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events onto the two fixed player keymaps. There is no
//! DAS/ARR layer: terminal auto-repeat drives held moves, and repeat events
//! for rotate and hard drop are dropped.

pub mod map;

pub use tetris_clash_types as types;

pub use map::{route_key, route_keys, should_quit, Keymap, PLAYER_ONE, PLAYER_TWO};
