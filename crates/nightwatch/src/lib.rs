//! Nightwatch keeps a monitor backlight in lockstep with one Home
//! Assistant entity over the WebSocket API.
//!
//! A session authenticates with a long-lived access token, subscribes to
//! `state_changed` events, fetches a full state snapshot to seed itself,
//! and then drives the LED from every matching event. A supervisor
//! restarts the session whenever the link drops.
//!
//! # Core Invariants
//!
//! 1. **One Session, One Connection**: a [`session::Session`] owns exactly
//!    one WebSocket connection; reconnecting means building a new session
//!    with fresh request ids and a fresh output baseline.
//! 2. **Monotonic Ids**: command ids start at 1 per connection and only
//!    grow; a reply resolves its pending entry exactly once.
//! 3. **Narrow State Match**: only the configured entity is inspected, and
//!    only the literal states `off`, `on`, and `unavailable` act; anything
//!    else is ignored without logging noise.
//! 4. **Crash Loudly**: replies and events that match our requests but
//!    carry malformed payloads abort the session as non-recoverable; only
//!    transport failures feed the reconnect loop.
//!
//! # Architecture
//!
//! ```text
//!   Home Assistant ==ws==> Session --events/snapshot--> Reconciler
//!                            |                              |
//!                            | auth, subscribe, get_states  v
//!                            |                     NightmodeController
//!   Supervisor --restart on recoverable failure--> Session'
//! ```

pub mod config;
pub mod correlator;
pub mod error;
pub mod reconciler;
pub mod session;
pub mod supervisor;
pub mod transport;

#[cfg(test)]
mod tests;

pub use config::{Config, DEFAULT_URL};
pub use error::{NightwatchError, NightwatchResult};
pub use session::Session;
pub use supervisor::Supervisor;
