//! Integration tests for the nightwatch session and supervisor.
//!
//! Test organization:
//!
//! - `harness.rs`     - Scripted WebSocket server and recording LED driver
//! - `handshake.rs`   - Auth flow and subscription bootstrap ordering
//! - `events.rs`      - state_changed handling and entity filtering
//! - `bootstrap.rs`   - get_states snapshot handling
//! - `decode.rs`      - Frame decode taxonomy at the session boundary
//! - `supervision.rs` - Reconnect policy and fatal error propagation

mod decode;
mod handshake;
