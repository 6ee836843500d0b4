//! Match relay hub (default binary).
//!
//! Listens on `CLASH_RELAY_HOST:CLASH_RELAY_PORT` and forwards every line a
//! client sends to all other clients.

use anyhow::Result;

use tetris_clash::relay::{run_relay, RelayConfig, RelayState};

#[tokio::main]
async fn main() -> Result<()> {
    if RelayState::is_disabled() {
        println!("[Relay] Disabled via CLASH_RELAY_DISABLED");
        return Ok(());
    }

    let config = RelayConfig::from_env();
    tokio::select! {
        result = run_relay(config, None) => result,
        _ = tokio::signal::ctrl_c() => {
            println!("[Relay] Shutting down");
            Ok(())
        }
    }
}
