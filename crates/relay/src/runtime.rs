//! Relay link runtime integration.
//!
//! Bridges the sync game loop with an async TCP connection to the relay hub.
//! The link owns its tokio runtime; a reader task decodes and filters inbound
//! lines, a writer task encodes outbound messages.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;

use crate::protocol::{decode_inbound, encode};
use crate::transport::{Inbound, MatchTransport, Outbound};
use tetris_clash_types::PlayerSlot;

/// Where to connect and who we are
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkConfig {
    pub addr: SocketAddr,
    pub lobby_id: String,
    pub slot: PlayerSlot,
}

/// Connection to the relay hub, usable as a [`MatchTransport`].
pub struct RelayLink {
    _rt: Runtime,
    slot: PlayerSlot,
    in_rx: mpsc::UnboundedReceiver<Inbound>,
    out_tx: mpsc::UnboundedSender<Outbound>,
    dropped: Arc<AtomicU64>,
}

impl RelayLink {
    /// Connect to the hub.
    ///
    /// Must be called from outside any tokio runtime.
    pub fn connect(config: LinkConfig) -> anyhow::Result<Self> {
        let rt = Runtime::new().context("failed to create tokio runtime")?;
        let stream = rt
            .block_on(TcpStream::connect(config.addr))
            .with_context(|| format!("failed to connect to relay at {}", config.addr))?;
        println!(
            "[Relay] Connected to {} as player {} in lobby {}",
            config.addr,
            config.slot.number(),
            config.lobby_id
        );

        let (in_tx, in_rx) = mpsc::unbounded_channel::<Inbound>();
        let (out_tx, out_rx) = mpsc::unbounded_channel::<Outbound>();
        let dropped = Arc::new(AtomicU64::new(0));

        let (reader, writer) = stream.into_split();
        rt.spawn(read_loop(
            BufReader::new(reader),
            config.lobby_id.clone(),
            config.slot,
            in_tx,
            Arc::clone(&dropped),
        ));
        rt.spawn(write_loop(writer, config.lobby_id, config.slot, out_rx));

        Ok(Self {
            _rt: rt,
            slot: config.slot,
            in_rx,
            out_tx,
            dropped,
        })
    }

    pub fn slot(&self) -> PlayerSlot {
        self.slot
    }

    /// Inbound lines rejected by filtering or validation so far
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl MatchTransport for RelayLink {
    fn send(&self, msg: Outbound) {
        let _ = self.out_tx.send(msg);
    }

    fn try_recv(&mut self) -> Option<Inbound> {
        self.in_rx.try_recv().ok()
    }
}

async fn read_loop(
    mut reader: BufReader<tokio::net::tcp::OwnedReadHalf>,
    lobby_id: String,
    slot: PlayerSlot,
    in_tx: mpsc::UnboundedSender<Inbound>,
    dropped: Arc<AtomicU64>,
) {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("[Relay] Read error: {}", e);
                break;
            }
        }

        // Undecodable bytes are dropped like any other bad payload
        let Ok(line) = std::str::from_utf8(&buf) else {
            dropped.fetch_add(1, Ordering::Relaxed);
            continue;
        };
        if line.trim().is_empty() {
            continue;
        }

        match decode_inbound(line, &lobby_id, slot) {
            Ok(msg) => {
                if in_tx.send(msg).is_err() {
                    break;
                }
            }
            Err(_) => {
                dropped.fetch_add(1, Ordering::Relaxed);
            }
        }
    }
    println!("[Relay] Connection closed");
}

async fn write_loop(
    mut writer: tokio::net::tcp::OwnedWriteHalf,
    lobby_id: String,
    slot: PlayerSlot,
    mut out_rx: mpsc::UnboundedReceiver<Outbound>,
) {
    while let Some(msg) = out_rx.recv().await {
        let mut line = match encode(&msg, &lobby_id, slot) {
            Ok(line) => line,
            Err(e) => {
                eprintln!("[Relay] Encode error: {}", e);
                continue;
            }
        };
        line.push('\n');
        if let Err(e) = writer.write_all(line.as_bytes()).await {
            eprintln!("[Relay] Write error: {}", e);
            break;
        }
        if writer.flush().await.is_err() {
            break;
        }
    }
}
