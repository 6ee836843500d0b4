//! Tetris Clash (workspace facade crate).
//!
//! Re-exports the member crates under short paths:
//! `tetris_clash::{core, input, relay, types}`.

pub use tetris_clash_core as core;
pub use tetris_clash_input as input;
pub use tetris_clash_relay as relay;
pub use tetris_clash_types as types;
