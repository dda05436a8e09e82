//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data with no external dependencies, so they can be used
//! by the engine, the terminal view and the JSON control adapter alike.
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Host loop fixed timestep (~60 FPS) |
//! | `ELAPSED_REFRESH_MS` | 1000 | Interval between elapsed-time recomputations |
//!
//! Per-difficulty timing (the flip-back delay) lives in the core difficulty catalog.
//!
//! # Examples
//!
//! ```
//! use tui_memory_types::{DifficultyLevel, GameAction, Language};
//!
//! // Parse from string (case-insensitive)
//! let level = DifficultyLevel::from_str("Hard").unwrap();
//! assert_eq!(level, DifficultyLevel::Hard);
//! assert_eq!(level.as_str(), "hard");
//!
//! // Languages toggle between English and French
//! assert_eq!(Language::En.toggle(), Language::Fr);
//!
//! // Parse a protocol action name
//! assert_eq!(GameAction::from_str("newGame"), Some(GameAction::NewGame));
//! ```

use std::fmt;

/// Host loop fixed timestep in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Elapsed time is recomputed once per second while a session is being played.
pub const ELAPSED_REFRESH_MS: u64 = 1000;

/// Difficulty levels, in display order.
///
/// A level drives the board shape, the number of pairs and the flip-back delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DifficultyLevel {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl DifficultyLevel {
    /// All levels, in selector order.
    pub const ALL: [DifficultyLevel; 3] = [
        DifficultyLevel::Easy,
        DifficultyLevel::Medium,
        DifficultyLevel::Hard,
    ];

    /// Parse difficulty from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_memory_types::DifficultyLevel;
    ///
    /// assert_eq!(DifficultyLevel::from_str("easy"), Some(DifficultyLevel::Easy));
    /// assert_eq!(DifficultyLevel::from_str("MEDIUM"), Some(DifficultyLevel::Medium));
    /// assert_eq!(DifficultyLevel::from_str("nightmare"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(DifficultyLevel::Easy),
            "medium" => Some(DifficultyLevel::Medium),
            "hard" => Some(DifficultyLevel::Hard),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyLevel::Easy => "easy",
            DifficultyLevel::Medium => "medium",
            DifficultyLevel::Hard => "hard",
        }
    }
}

/// Display language for localized content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    En,
    Fr,
}

impl Language {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "en" => Some(Language::En),
            "fr" => Some(Language::Fr),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Fr => "fr",
        }
    }

    /// The other language (the UI only offers two).
    pub fn toggle(&self) -> Self {
        match self {
            Language::En => Language::Fr,
            Language::Fr => Language::En,
        }
    }
}

/// Content pool a card was drawn from.
///
/// Two cards match only when both their content and their category are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Hobby,
    Technology,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Hobby => "hobby",
            Category::Technology => "technology",
        }
    }
}

/// Phase of a game session.
///
/// `Won` is terminal for the session; only a new game leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GamePhase {
    #[default]
    Playing,
    Won,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Playing => "playing",
            GamePhase::Won => "won",
        }
    }
}

/// Instance id of a card on the board.
///
/// Ids are unique within a session and never reused by it. Two cards of a pair
/// have different ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CardId(pub u32);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Commands that can be applied to the game engine
///
/// These actions are used by both human input and the control adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Flip a card
    SelectCard(CardId),
    /// Throw away the session and deal a new board
    NewGame,
    /// Acknowledge the win message (same as a new game with the current settings)
    PlayAgain,
    /// Change the difficulty, which starts a new game
    SetDifficulty(DifficultyLevel),
    /// Change the display language, which starts a new game
    SetLanguage(Language),
}

impl GameAction {
    /// Parse a parameterless action from string (for the control protocol)
    ///
    /// Parameterized actions (`select`, `setDifficulty`, `setLanguage`) carry
    /// extra fields and are decoded by the adapter.
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_memory_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("playAgain"), Some(GameAction::PlayAgain));
    /// assert_eq!(GameAction::from_str("select"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "newgame" => Some(GameAction::NewGame),
            "playagain" => Some(GameAction::PlayAgain),
            _ => None,
        }
    }

    /// Convert to camelCase string for the control protocol
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::SelectCard(_) => "select",
            GameAction::NewGame => "newGame",
            GameAction::PlayAgain => "playAgain",
            GameAction::SetDifficulty(_) => "setDifficulty",
            GameAction::SetLanguage(_) => "setLanguage",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        assert_eq!(TICK_MS, 16);
        assert_eq!(ELAPSED_REFRESH_MS, 1000);
    }

    #[test]
    fn difficulty_levels_parse_and_print() {
        for level in DifficultyLevel::ALL {
            assert_eq!(DifficultyLevel::from_str(level.as_str()), Some(level));
        }
        assert_eq!(DifficultyLevel::from_str("EASY"), Some(DifficultyLevel::Easy));
        assert_eq!(DifficultyLevel::from_str("expert"), None);
        assert_eq!(DifficultyLevel::default(), DifficultyLevel::Medium);
    }

    #[test]
    fn language_parse_and_toggle() {
        assert_eq!(Language::from_str("FR"), Some(Language::Fr));
        assert_eq!(Language::from_str("de"), None);
        assert_eq!(Language::Fr.toggle(), Language::En);
        assert_eq!(Language::default(), Language::En);
    }

    #[test]
    fn card_id_display() {
        assert_eq!(CardId(7).to_string(), "#7");
    }
}
