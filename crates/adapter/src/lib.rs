//! Control adapter - drive the memory game over a TCP socket with JSON
//!
//! External agents (bots, test harnesses) connect to a line-delimited JSON
//! endpoint and play through the same commands the keyboard issues.
//!
//! # Protocol Overview
//!
//! 1. **Connection**: Client connects (default `127.0.0.1:7878`)
//! 2. **Handshake**: Client sends `hello`, server answers `welcome` with the
//!    assigned role
//! 3. **Controller Assignment**: The first client asking for `auto` or
//!    `controller` controls the game; everyone else observes. The role is
//!    released when the controller disconnects
//! 4. **Commanding**: The controller sends `command` messages; each one is
//!    answered with `ack` (or `error`) after the game loop applied it
//! 5. **Observation Streaming**: Clients that asked for observations receive
//!    one whenever the session changes. Face-down cards never expose content
//!
//! # Example Protocol Flow
//!
//! ```text
//! Client -> Server: {"type":"hello","seq":1,"client":{"name":"bot","version":"0.1"},"protocol_version":"1.0.0","stream_observations":true}
//! Server -> Client: {"type":"welcome","seq":1,"ts":1700000000000,"protocol_version":"1.0.0","client_id":1,"role":"controller","controller_id":1,"game_id":"tui-memory"}
//! Server -> Client: {"type":"observation","seq":1,...,"cards":[{"id":0,"face_up":false,"matched":false},...]}
//! Client -> Server: {"type":"command","seq":2,"action":"select","card":0}
//! Server -> Client: {"type":"ack","seq":2,"ts":1700000000016,"applied":true}
//! ```
//!
//! # Environment Variables
//!
//! - `MEMORY_AI_ENABLED`: Set to "1" or "true" to start the adapter
//! - `MEMORY_AI_DISABLED`: Set to "1" or "true" to force it off
//! - `MEMORY_AI_HOST`: Bind address (default: "127.0.0.1")
//! - `MEMORY_AI_PORT`: Port number (default: 7878)
//! - `MEMORY_AI_MAX_PENDING`: Command queue depth before `backpressure` (default: 16)

pub mod protocol;
pub mod runtime;
pub mod server;

pub use tui_memory_core as core;
pub use tui_memory_types as types;

pub use protocol::*;
pub use runtime::{process_command, Adapter, InboundCommand, InboundPayload, OutboundMessage};
pub use server::{run_server, AdapterError, AdapterStatus, ServerConfig};
