//! Terminal presentation for the memory game.
//!
//! Rendering goes through a plain framebuffer instead of a widget toolkit:
//! `GameView` paints a `GameSnapshot` into a `FrameBuffer`, and
//! `TerminalRenderer` flushes only the cells that changed since the last frame.
//!
//! Nothing here mutates the engine; the view only reads snapshots.

pub mod fb;
pub mod game_view;
pub mod i18n;
pub mod renderer;

pub use tui_memory_core as core;
pub use tui_memory_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AdapterStatusView, GameView, Viewport};
pub use i18n::{strings, UiStrings};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
