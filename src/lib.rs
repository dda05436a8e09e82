//! TUI Memory (workspace facade crate).
//!
//! Re-exports the workspace crates under one name and hosts the binary's
//! configuration, logging setup and frame clock. The implementation lives in `crates/`.

pub mod clock;
pub mod config;
pub mod logging;

pub use tui_memory_adapter as adapter;
pub use tui_memory_core as core;
pub use tui_memory_input as input;
pub use tui_memory_term as term;
pub use tui_memory_types as types;

pub use clock::FrameClock;
pub use config::AppConfig;
