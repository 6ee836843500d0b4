//! Key mapping from terminal events to player actions.
//!
//! Both players share one keyboard. Player one uses `a`/`d`/`w`/`s` and
//! space; player two uses the arrow keys and Enter.

use arrayvec::ArrayVec;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::types::{GameAction, PlayerSlot};

/// Most actions routed from a single batch of events
pub const MAX_ROUTED: usize = 32;

/// Fixed bindings for one player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keymap {
    pub slot: PlayerSlot,
    pub move_left: KeyCode,
    pub move_right: KeyCode,
    pub rotate: KeyCode,
    pub soft_drop: KeyCode,
    pub hard_drop: KeyCode,
}

pub const PLAYER_ONE: Keymap = Keymap {
    slot: PlayerSlot::One,
    move_left: KeyCode::Char('a'),
    move_right: KeyCode::Char('d'),
    rotate: KeyCode::Char('w'),
    soft_drop: KeyCode::Char('s'),
    hard_drop: KeyCode::Char(' '),
};

pub const PLAYER_TWO: Keymap = Keymap {
    slot: PlayerSlot::Two,
    move_left: KeyCode::Left,
    move_right: KeyCode::Right,
    rotate: KeyCode::Up,
    soft_drop: KeyCode::Down,
    hard_drop: KeyCode::Enter,
};

impl Keymap {
    /// Action bound to `code`, ignoring event kind
    pub fn action_for(&self, code: KeyCode) -> Option<GameAction> {
        let code = normalize(code);
        [
            (self.move_left, GameAction::MoveLeft),
            (self.move_right, GameAction::MoveRight),
            (self.rotate, GameAction::Rotate),
            (self.soft_drop, GameAction::SoftDrop),
            (self.hard_drop, GameAction::HardDrop),
        ]
        .into_iter()
        .find(|&(bound, _)| bound == code)
        .map(|(_, action)| action)
    }

    /// Resolve a key event for this player.
    ///
    /// Releases are ignored. Auto-repeat only passes for actions that repeat
    /// when held (moves and soft drop).
    pub fn resolve(&self, key: &KeyEvent) -> Option<GameAction> {
        let action = self.action_for(key.code)?;
        match key.kind {
            KeyEventKind::Press => Some(action),
            KeyEventKind::Repeat if action.repeats_when_held() => Some(action),
            _ => None,
        }
    }
}

/// Letters match case-insensitively
fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

/// Find which player a key belongs to and what it does
pub fn route_key(key: &KeyEvent) -> Option<(PlayerSlot, GameAction)> {
    [PLAYER_ONE, PLAYER_TWO]
        .iter()
        .find_map(|map| map.resolve(key).map(|action| (map.slot, action)))
}

/// Route a batch of events (typically everything read during one frame)
pub fn route_keys<'a>(
    keys: impl IntoIterator<Item = &'a KeyEvent>,
) -> ArrayVec<(PlayerSlot, GameAction), MAX_ROUTED> {
    let mut routed = ArrayVec::new();
    for key in keys {
        if let Some(hit) = route_key(key) {
            if routed.try_push(hit).is_err() {
                break;
            }
        }
    }
    routed
}

/// Check if key should quit the game.
pub fn should_quit(key: &KeyEvent) -> bool {
    key.kind != KeyEventKind::Release
        && (matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)))
}
