//! Transport contract between a match and its opponent.
//!
//! A transport is polled from the game loop: `send` never blocks and
//! `try_recv` returns immediately.

use tokio::sync::mpsc;

use tetris_clash_core::PlayerState;
use tetris_clash_types::PlayerSlot;

/// Message for the opponent
#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    Join { player_name: String },
    Ready,
    State(Box<PlayerState>),
    Garbage(u32),
}

/// Message from the opponent, already filtered and validated
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound {
    OpponentJoined { player_name: String, slot: PlayerSlot },
    OpponentReady,
    OpponentState(Box<PlayerState>),
    Garbage(u32),
}

pub trait MatchTransport {
    fn send(&self, msg: Outbound);

    fn try_recv(&mut self) -> Option<Inbound>;
}

/// In-process transport: one end per player, no serialization.
pub struct LocalTransport {
    slot: PlayerSlot,
    tx: mpsc::UnboundedSender<(PlayerSlot, Outbound)>,
    rx: mpsc::UnboundedReceiver<(PlayerSlot, Outbound)>,
}

impl LocalTransport {
    /// Connected ends for player one and player two
    pub fn pair() -> (Self, Self) {
        let (one_tx, two_rx) = mpsc::unbounded_channel();
        let (two_tx, one_rx) = mpsc::unbounded_channel();
        (
            Self {
                slot: PlayerSlot::One,
                tx: one_tx,
                rx: one_rx,
            },
            Self {
                slot: PlayerSlot::Two,
                tx: two_tx,
                rx: two_rx,
            },
        )
    }

    pub fn slot(&self) -> PlayerSlot {
        self.slot
    }
}

impl MatchTransport for LocalTransport {
    fn send(&self, msg: Outbound) {
        let _ = self.tx.send((self.slot, msg));
    }

    fn try_recv(&mut self) -> Option<Inbound> {
        let (from, msg) = self.rx.try_recv().ok()?;
        Some(match msg {
            Outbound::Join { player_name } => Inbound::OpponentJoined {
                player_name,
                slot: from,
            },
            Outbound::Ready => Inbound::OpponentReady,
            Outbound::State(state) => Inbound::OpponentState(state),
            Outbound::Garbage(lines) => Inbound::Garbage(lines),
        })
    }
}
