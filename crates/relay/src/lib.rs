//! Match relay module
//!
//! Everything needed to play one engine against a remote opponent:
//!
//! - [`protocol`]: the line-delimited JSON wire format and inbound filtering
//! - [`transport`]: the [`MatchTransport`] contract and an in-process pair
//! - [`runtime`]: [`RelayLink`], a TCP transport with its own tokio runtime
//! - [`server`]: the pub/sub relay hub
//! - [`session`]: [`RemoteMatch`], the ready handshake and match flow
//!
//! The core engine never sees JSON; conversion to and from the wire layout
//! happens in [`protocol`].

pub mod protocol;
pub mod runtime;
pub mod server;
pub mod session;
pub mod transport;

pub use protocol::{decode_inbound, encode, DropReason, Message, SnapshotError, StateSnapshot};
pub use runtime::{LinkConfig, RelayLink};
pub use server::{run_relay, RelayConfig, RelayState};
pub use session::{RemoteMatch, Stage};
pub use transport::{Inbound, LocalTransport, MatchTransport, Outbound};
