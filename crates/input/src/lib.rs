//! Terminal input module (engine-facing).
//!
//! Independent of any UI framework beyond `crossterm` key events. Maps keys to
//! [`InputAction`]s and tracks which card the player is pointing at.

pub mod cursor;
pub mod map;

pub use tui_memory_types as types;

pub use cursor::{BoardCursor, Direction};
pub use map::{handle_key_event, should_quit, InputAction};
