//! TCP relay hub
//!
//! A minimal publish/subscribe relay: every line a client sends is forwarded
//! verbatim to every other connected client. The hub never parses messages;
//! lobby and player filtering happens in each receiver.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, oneshot, RwLock};

/// Relay configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub host: String,
    pub port: u16,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7878,
        }
    }
}

impl RelayConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();
        let host = env::var("CLASH_RELAY_HOST")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.host);
        let port = env::var("CLASH_RELAY_PORT")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.port);

        Self { host, port }
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid relay address {}:{}", self.host, self.port))
    }
}

/// Handle to a connected client
struct ClientHandle {
    id: usize,
    tx: mpsc::UnboundedSender<Vec<u8>>,
}

/// Shared hub state
pub struct RelayState {
    clients: RwLock<Vec<ClientHandle>>,
}

impl RelayState {
    pub fn new() -> Self {
        Self {
            clients: RwLock::new(Vec::new()),
        }
    }

    /// Check if the relay is disabled via environment
    pub fn is_disabled() -> bool {
        std::env::var("CLASH_RELAY_DISABLED")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false)
    }

    pub async fn client_count(&self) -> usize {
        self.clients.read().await.len()
    }

    /// Forward a line to every client except the sender. Bytes are passed
    /// through untouched; clients do their own decoding.
    async fn publish(&self, from: usize, line: &[u8]) {
        let clients = self.clients.read().await;
        for client in clients.iter().filter(|c| c.id != from) {
            let _ = client.tx.send(line.to_vec());
        }
    }
}

impl Default for RelayState {
    fn default() -> Self {
        Self::new()
    }
}

/// Start the relay hub.
///
/// Sends the bound address on `ready_tx` once listening (useful with port 0).
pub async fn run_relay(
    config: RelayConfig,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> anyhow::Result<()> {
    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind relay on {}", addr))?;
    let bound = listener.local_addr()?;
    println!("[Relay] Listening on {}", bound);
    if let Some(tx) = ready_tx {
        let _ = tx.send(bound);
    }

    let state = Arc::new(RelayState::new());
    let mut client_id_counter = 0usize;

    // Accept incoming connections
    loop {
        let (socket, addr) = listener.accept().await?;
        client_id_counter += 1;
        let client_id = client_id_counter;

        println!("[Relay] Client {} connected from {}", client_id, addr);

        let state = Arc::clone(&state);
        tokio::spawn(async move {
            if let Err(e) = handle_client(socket, client_id, Arc::clone(&state)).await {
                eprintln!("[Relay] Client {} error: {}", client_id, e);
            }
            state.clients.write().await.retain(|c| c.id != client_id);
            println!("[Relay] Client {} disconnected", client_id);
        });
    }
}

/// Handle a single client connection
async fn handle_client(
    socket: TcpStream,
    client_id: usize,
    state: Arc<RelayState>,
) -> anyhow::Result<()> {
    let (reader, mut writer) = socket.into_split();
    let mut reader = BufReader::new(reader);

    // Channel to send lines to this client
    let (tx, mut rx) = mpsc::unbounded_channel::<Vec<u8>>();
    state
        .clients
        .write()
        .await
        .push(ClientHandle { id: client_id, tx });

    // Spawn task to write lines to client
    let write_task = tokio::spawn(async move {
        while let Some(line) = rx.recv().await {
            if writer.write_all(&line).await.is_err() {
                break;
            }
            if writer.write_all(b"\n").await.is_err() {
                break;
            }
            if writer.flush().await.is_err() {
                break;
            }
        }
    });

    let mut line = Vec::new();
    let result = loop {
        line.clear();
        let bytes_read = match reader.read_until(b'\n', &mut line).await {
            Ok(n) => n,
            Err(e) => break Err(e.into()),
        };
        if bytes_read == 0 {
            break Ok(());
        }

        let trimmed = line.trim_ascii_end();
        if trimmed.trim_ascii().is_empty() {
            continue;
        }
        state.publish(client_id, trimmed).await;
    };

    write_task.abort();
    result
}
