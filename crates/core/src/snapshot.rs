//! Read-only session view handed to presentation layers.

use crate::types::{CardId, Category, DifficultyLevel, GamePhase, Language};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub id: CardId,
    pub content: String,
    pub icon: Option<String>,
    pub category: Category,
    /// Flipped or matched.
    pub face_up: bool,
    pub matched: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameSnapshot {
    pub generation: u32,
    pub difficulty: DifficultyLevel,
    pub language: Language,
    pub phase: GamePhase,
    pub grid_cols: u8,
    pub grid_rows: u8,
    /// Board order.
    pub cards: Vec<CardView>,
    pub flipped_count: u8,
    pub matched_count: u16,
    pub moves: u32,
    pub elapsed_ms: u64,
    /// Whether the first card has been flipped.
    pub started: bool,
}

impl GameSnapshot {
    pub fn won(&self) -> bool {
        self.phase == GamePhase::Won
    }

    pub fn elapsed_label(&self) -> String {
        format_elapsed(self.elapsed_ms)
    }

    pub fn card_at(&self, index: usize) -> Option<&CardView> {
        self.cards.get(index)
    }
}

/// Format milliseconds as `minutes:seconds`.
///
/// Seconds are zero-padded; minutes are not bounded.
///
/// ```
/// use tui_memory_core::format_elapsed;
///
/// assert_eq!(format_elapsed(7_400), "0:07");
/// assert_eq!(format_elapsed(725_000), "12:05");
/// ```
pub fn format_elapsed(ms: u64) -> String {
    let seconds = ms / 1000;
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
