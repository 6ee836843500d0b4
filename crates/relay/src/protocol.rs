//! Protocol module - line-delimited JSON messages exchanged through the relay
//!
//! Every message is one JSON object per line:
//!
//! ```text
//! {"type":"game_state_update","data":{"gameState":{...},"lobbyId":"abc","playerNumber":1,"timestamp":1700000000000}}
//! ```
//!
//! The relay forwards lines untouched, so every receiver filters on its own:
//! messages for another lobby or carrying the receiver's own player number are
//! dropped, as are snapshots that could not have come from a real engine.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::transport::{Inbound, Outbound};
use tetris_clash_core::pieces::{shapes, ActivePiece};
use tetris_clash_core::{Board, PlayerState};
use tetris_clash_types::{
    PieceKind, PlayerSlot, UnknownKindError, BOARD_HEIGHT, BOARD_WIDTH, GARBAGE_CELL,
};

/// Routing fields carried by every message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub lobby_id: String,
    pub player_number: u8,
    /// Sender wall clock in milliseconds
    pub timestamp: u64,
}

impl Header {
    pub fn new(lobby_id: &str, slot: PlayerSlot) -> Self {
        Self {
            lobby_id: lobby_id.to_string(),
            player_number: slot.number(),
            timestamp: current_timestamp_ms(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinLobby {
    pub player_name: String,
    #[serde(flatten)]
    pub header: Header,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerReady {
    #[serde(flatten)]
    pub header: Header,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStateUpdate {
    pub game_state: StateSnapshot,
    #[serde(flatten)]
    pub header: Header,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GarbageAttack {
    /// Signed so that bogus counts parse and can be rejected explicitly
    pub lines: i64,
    #[serde(flatten)]
    pub header: Header,
}

/// Envelope of every line on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Message {
    JoinLobby(JoinLobby),
    PlayerReady(PlayerReady),
    GameStateUpdate(GameStateUpdate),
    Garbage(GarbageAttack),
}

impl Message {
    pub fn header(&self) -> &Header {
        match self {
            Message::JoinLobby(m) => &m.header,
            Message::PlayerReady(m) => &m.header,
            Message::GameStateUpdate(m) => &m.header,
            Message::Garbage(m) => &m.header,
        }
    }
}

/// Falling piece as shown to the opponent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieceSnapshot {
    pub tetromino_id: u8,
    pub shape: Vec<Vec<u8>>,
    pub x: i8,
    pub y: i8,
    pub rotation_index: usize,
}

/// Player state in the wire layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSnapshot {
    pub board: Vec<Vec<u8>>,
    pub current_piece: Option<PieceSnapshot>,
    pub next_piece_id: u8,
    pub score: u32,
    pub lines_cleared: u32,
    pub level: u32,
    pub is_game_over: bool,
    pub incoming_garbage: u32,
}

impl StateSnapshot {
    pub fn from_state(state: &PlayerState) -> Self {
        Self {
            board: state.board.to_rows(),
            current_piece: state.active.map(|piece| PieceSnapshot {
                tetromino_id: piece.kind.id(),
                shape: piece.shape.to_rows(),
                x: piece.x,
                y: piece.y,
                rotation_index: piece.rotation,
            }),
            next_piece_id: state.next_kind.id(),
            score: state.score,
            lines_cleared: state.lines,
            level: state.level,
            is_game_over: state.game_over,
            incoming_garbage: state.incoming_garbage,
        }
    }

    /// Rebuild a core state, rejecting anything a real engine cannot produce.
    ///
    /// The piece shape is taken from the catalog by rotation index and must
    /// match what was sent. The revision starts at 0.
    pub fn to_player_state(&self) -> Result<PlayerState, SnapshotError> {
        let board = Board::from_rows(&self.board).ok_or(SnapshotError::BoardDimensions {
            rows: self.board.len(),
        })?;
        if let Some(&cell) = board.cells().iter().find(|&&c| c > GARBAGE_CELL) {
            return Err(SnapshotError::CellValue(cell));
        }

        let active = match &self.current_piece {
            Some(piece) => Some(piece.to_active()?),
            None => None,
        };

        Ok(PlayerState {
            board,
            active,
            next_kind: PieceKind::from_id(self.next_piece_id)?,
            score: self.score,
            lines: self.lines_cleared,
            level: self.level.max(1),
            game_over: self.is_game_over,
            incoming_garbage: self.incoming_garbage,
            revision: 0,
        })
    }
}

impl PieceSnapshot {
    fn to_active(&self) -> Result<ActivePiece, SnapshotError> {
        let kind = PieceKind::from_id(self.tetromino_id)?;
        let shape = *shapes(kind)
            .get(self.rotation_index)
            .ok_or(SnapshotError::RotationIndex(self.rotation_index))?;
        if shape.to_rows() != self.shape {
            return Err(SnapshotError::ShapeMismatch);
        }
        Ok(ActivePiece {
            kind,
            shape,
            x: self.x,
            y: self.y,
            rotation: self.rotation_index,
        })
    }
}

/// A snapshot that no engine could have produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotError {
    BoardDimensions { rows: usize },
    CellValue(u8),
    UnknownKind(UnknownKindError),
    RotationIndex(usize),
    ShapeMismatch,
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::BoardDimensions { rows } => write!(
                f,
                "board must be {}x{} (got {} rows or a ragged row)",
                BOARD_HEIGHT, BOARD_WIDTH, rows
            ),
            SnapshotError::CellValue(v) => write!(f, "invalid cell value {}", v),
            SnapshotError::UnknownKind(e) => write!(f, "{}", e),
            SnapshotError::RotationIndex(i) => write!(f, "rotation index {} out of range", i),
            SnapshotError::ShapeMismatch => write!(f, "piece shape does not match its rotation"),
        }
    }
}

impl std::error::Error for SnapshotError {}

impl From<UnknownKindError> for SnapshotError {
    fn from(e: UnknownKindError) -> Self {
        SnapshotError::UnknownKind(e)
    }
}

/// Why an inbound line was not delivered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropReason {
    Malformed(String),
    OtherLobby,
    OwnEcho,
    UnknownPlayer(u8),
    InvalidSnapshot(SnapshotError),
    InvalidGarbage(i64),
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::Malformed(e) => write!(f, "malformed message: {}", e),
            DropReason::OtherLobby => write!(f, "message for another lobby"),
            DropReason::OwnEcho => write!(f, "message from this player"),
            DropReason::UnknownPlayer(n) => write!(f, "unknown player number {}", n),
            DropReason::InvalidSnapshot(e) => write!(f, "invalid snapshot: {}", e),
            DropReason::InvalidGarbage(n) => write!(f, "invalid garbage count {}", n),
        }
    }
}

impl std::error::Error for DropReason {}

/// Wrap an outbound message for the wire
pub fn to_message(msg: &Outbound, header: Header) -> Message {
    match msg {
        Outbound::Join { player_name } => Message::JoinLobby(JoinLobby {
            player_name: player_name.clone(),
            header,
        }),
        Outbound::Ready => Message::PlayerReady(PlayerReady { header }),
        Outbound::State(state) => Message::GameStateUpdate(GameStateUpdate {
            game_state: StateSnapshot::from_state(state),
            header,
        }),
        Outbound::Garbage(lines) => Message::Garbage(GarbageAttack {
            lines: *lines as i64,
            header,
        }),
    }
}

/// Serialize an outbound message as one JSON line (without the newline)
pub fn encode(msg: &Outbound, lobby_id: &str, slot: PlayerSlot) -> serde_json::Result<String> {
    serde_json::to_string(&to_message(msg, Header::new(lobby_id, slot)))
}

/// Parse and filter one inbound line for the player in `local_slot` of
/// `lobby_id`.
pub fn decode_inbound(
    line: &str,
    lobby_id: &str,
    local_slot: PlayerSlot,
) -> Result<Inbound, DropReason> {
    let msg: Message =
        serde_json::from_str(line.trim()).map_err(|e| DropReason::Malformed(e.to_string()))?;

    let header = msg.header();
    if header.lobby_id != lobby_id {
        return Err(DropReason::OtherLobby);
    }
    if header.player_number == local_slot.number() {
        return Err(DropReason::OwnEcho);
    }
    let sender = PlayerSlot::from_number(header.player_number)
        .ok_or(DropReason::UnknownPlayer(header.player_number))?;

    match msg {
        Message::JoinLobby(m) => Ok(Inbound::OpponentJoined {
            player_name: m.player_name,
            slot: sender,
        }),
        Message::PlayerReady(_) => Ok(Inbound::OpponentReady),
        Message::GameStateUpdate(m) => m
            .game_state
            .to_player_state()
            .map(|state| Inbound::OpponentState(Box::new(state)))
            .map_err(DropReason::InvalidSnapshot),
        Message::Garbage(m) => {
            // A single attack can never exceed a full board
            if m.lines <= 0 || m.lines > BOARD_HEIGHT as i64 {
                return Err(DropReason::InvalidGarbage(m.lines));
            }
            Ok(Inbound::Garbage(m.lines as u32))
        }
    }
}

/// Get current timestamp in milliseconds
fn current_timestamp_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
