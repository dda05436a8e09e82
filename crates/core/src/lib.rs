//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the memory game engine: the rules, the session state
//! machine and its timers. It has **no dependencies** on UI, networking, or
//! terminal I/O, which makes it:
//!
//! - **Deterministic**: Same seed deals identical boards
//! - **Testable**: Time is virtual and only advances through `tick`
//! - **Portable**: Drives the terminal view and the JSON adapter alike
//!
//! # Module Structure
//!
//! - [`catalog`]: Board shape, pair count and flip-back delay per difficulty
//! - [`content`]: Hobby and technology pools plus the localization resolver
//! - [`rng`]: Seeded LCG with Fisher-Yates shuffle and sampling
//! - [`deck`]: Deals a shuffled, paired board
//! - [`timer`]: Generation-tagged deferred tasks (flip-back, elapsed refresh)
//! - [`game_state`]: The session controller
//! - [`snapshot`]: Read-only view for presentation layers
//!
//! # Game Rules
//!
//! - **Pairs**: Half the pairs (rounded up) are hobbies, the rest technologies
//! - **Turns**: Flip two cards; every second flip counts as one move
//! - **Match**: Same content and category; both cards stay face up for good
//! - **Mismatch**: Both cards flip back after the difficulty's delay; no third
//!   card can be flipped meanwhile
//! - **Clock**: Starts on the first flip, refreshed once per second, stops on win
//!
//! # Example
//!
//! ```
//! use tui_memory_core::MemoryGame;
//! use tui_memory_types::{DifficultyLevel, GamePhase, Language};
//!
//! let mut game = MemoryGame::new(DifficultyLevel::Easy, Language::En, 12345).unwrap();
//!
//! let first = game.cards()[0].id;
//! let partner = game.pair_of(first).unwrap();
//! assert!(game.select_card(first));
//! assert!(game.select_card(partner));
//!
//! assert_eq!(game.moves(), 1);
//! assert_eq!(game.matched().len(), 2);
//! assert_eq!(game.phase(), GamePhase::Playing);
//! ```
//!
//! # Timing
//!
//! Call [`MemoryGame::tick`](game_state::MemoryGame::tick) from the host loop
//! with the elapsed milliseconds. Deferred tasks fire inside `tick`.

pub mod catalog;
pub mod content;
pub mod deck;
pub mod game_state;
pub mod rng;
pub mod snapshot;
pub mod timer;

pub use tui_memory_types as types;

// Re-export commonly used types for convenience
pub use catalog::{config, validate_catalog, CatalogError, DifficultyConfig, Theme};
pub use content::{resolve, ContentPools, Hobby, LocalizedText, TechCategory, Technology};
pub use deck::{build_deck, Card, DeckError};
pub use game_state::{GameEvent, MemoryGame};
pub use rng::SimpleRng;
pub use snapshot::{format_elapsed, CardView, GameSnapshot};
pub use timer::{TaskKind, TimerQueue};
