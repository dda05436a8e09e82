//! Difficulty catalog - board shape and timing per difficulty level
//!
//! Read-only, process-wide configuration. Every level must describe a board
//! whose cells exactly hold all card instances (`cols * rows == pairs * 2`).

use thiserror::Error;

use crate::types::DifficultyLevel;

/// Visual theme tag of a difficulty (drives card and selector colors).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Theme {
    Green,
    Blue,
    Red,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Green => "green",
            Theme::Blue => "blue",
            Theme::Red => "red",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyConfig {
    pub name: &'static str,
    pub description: &'static str,
    pub grid_cols: u8,
    pub grid_rows: u8,
    /// Number of distinct content pairs on the board.
    pub pair_count: u8,
    /// How long a mismatched pair stays face up.
    pub flip_back_delay_ms: u32,
    pub theme: Theme,
    pub icon: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("{level:?}: grid {cols}x{rows} holds {cells} cells but {pairs} pairs need {needed}")]
    GridMismatch {
        level: DifficultyLevel,
        cols: u8,
        rows: u8,
        cells: u32,
        pairs: u8,
        needed: u32,
    },
    #[error("{0:?}: pair count must be positive")]
    NoPairs(DifficultyLevel),
    #[error("{0:?}: flip-back delay must be positive")]
    NoFlipBackDelay(DifficultyLevel),
}

pub static EASY: DifficultyConfig = DifficultyConfig {
    name: "Beginner",
    description: "Perfect for getting started",
    grid_cols: 3,
    grid_rows: 4,
    pair_count: 6,
    flip_back_delay_ms: 1200,
    theme: Theme::Green,
    icon: "🌱",
};

pub static MEDIUM: DifficultyConfig = DifficultyConfig {
    name: "Explorer",
    description: "Balanced challenge",
    grid_cols: 4,
    grid_rows: 4,
    pair_count: 8,
    flip_back_delay_ms: 1000,
    theme: Theme::Blue,
    icon: "🧭",
};

pub static HARD: DifficultyConfig = DifficultyConfig {
    name: "Master",
    description: "Ultimate challenge",
    grid_cols: 4,
    grid_rows: 5,
    pair_count: 10,
    flip_back_delay_ms: 800,
    theme: Theme::Red,
    icon: "🔥",
};

/// Look up the configuration of a difficulty level.
pub fn config(level: DifficultyLevel) -> &'static DifficultyConfig {
    match level {
        DifficultyLevel::Easy => &EASY,
        DifficultyLevel::Medium => &MEDIUM,
        DifficultyLevel::Hard => &HARD,
    }
}

impl DifficultyConfig {
    /// Number of cards on the board.
    pub fn card_count(&self) -> usize {
        self.pair_count as usize * 2
    }

    /// Hobby pairs round up, technologies absorb the remainder.
    pub fn hobby_pairs(&self) -> usize {
        (self.pair_count as usize).div_ceil(2)
    }

    pub fn technology_pairs(&self) -> usize {
        self.pair_count as usize - self.hobby_pairs()
    }

    pub fn validate(&self, level: DifficultyLevel) -> Result<(), CatalogError> {
        if self.pair_count == 0 {
            return Err(CatalogError::NoPairs(level));
        }
        if self.flip_back_delay_ms == 0 {
            return Err(CatalogError::NoFlipBackDelay(level));
        }
        let cells = self.grid_cols as u32 * self.grid_rows as u32;
        let needed = self.pair_count as u32 * 2;
        if cells != needed {
            return Err(CatalogError::GridMismatch {
                level,
                cols: self.grid_cols,
                rows: self.grid_rows,
                cells,
                pairs: self.pair_count,
                needed,
            });
        }
        Ok(())
    }
}

/// Validate every configured level.
pub fn validate_catalog() -> Result<(), CatalogError> {
    for level in DifficultyLevel::ALL {
        config(level).validate(level)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_level_fills_its_grid_exactly() {
        for level in DifficultyLevel::ALL {
            let c = config(level);
            assert_eq!(
                c.grid_cols as usize * c.grid_rows as usize,
                c.card_count(),
                "{:?}",
                level
            );
        }
        assert_eq!(validate_catalog(), Ok(()));
    }

    #[test]
    fn catalog_values() {
        assert_eq!((EASY.grid_cols, EASY.grid_rows, EASY.pair_count), (3, 4, 6));
        assert_eq!(EASY.flip_back_delay_ms, 1200);
        assert_eq!((MEDIUM.grid_cols, MEDIUM.grid_rows, MEDIUM.pair_count), (4, 4, 8));
        assert_eq!(MEDIUM.flip_back_delay_ms, 1000);
        assert_eq!((HARD.grid_cols, HARD.grid_rows, HARD.pair_count), (4, 5, 10));
        assert_eq!(HARD.flip_back_delay_ms, 800);
    }

    #[test]
    fn pair_split_rounds_hobbies_up() {
        assert_eq!((EASY.hobby_pairs(), EASY.technology_pairs()), (3, 3));
        assert_eq!((MEDIUM.hobby_pairs(), MEDIUM.technology_pairs()), (4, 4));
        assert_eq!((HARD.hobby_pairs(), HARD.technology_pairs()), (5, 5));

        let odd = DifficultyConfig {
            pair_count: 7,
            grid_cols: 2,
            grid_rows: 7,
            ..EASY
        };
        assert_eq!((odd.hobby_pairs(), odd.technology_pairs()), (4, 3));
    }

    #[test]
    fn validate_rejects_bad_grid() {
        let bad = DifficultyConfig {
            grid_cols: 5,
            ..EASY
        };
        assert!(matches!(
            bad.validate(DifficultyLevel::Easy),
            Err(CatalogError::GridMismatch { cells: 20, needed: 12, .. })
        ));
    }

    #[test]
    fn validate_rejects_zero_values() {
        let no_delay = DifficultyConfig {
            flip_back_delay_ms: 0,
            ..MEDIUM
        };
        assert_eq!(
            no_delay.validate(DifficultyLevel::Medium),
            Err(CatalogError::NoFlipBackDelay(DifficultyLevel::Medium))
        );

        let no_pairs = DifficultyConfig {
            pair_count: 0,
            ..MEDIUM
        };
        assert_eq!(
            no_pairs.validate(DifficultyLevel::Medium),
            Err(CatalogError::NoPairs(DifficultyLevel::Medium))
        );
    }
}
