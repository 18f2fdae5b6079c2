//! Game configuration shared by the library and the terminal front end.

use crate::highscores::default_save_dir;
use crate::timing::DEFAULT_GRAVITY_EVERY;
use std::path::PathBuf;
use thiserror::Error;

/// Smallest board edge that still fits every catalog shape in both orientations.
pub const MIN_BOARD_EDGE: usize = 4;
/// Largest board edge; keeps every terminal coordinate the renderer computes inside `u16`.
pub const MAX_BOARD_EDGE: usize = 200;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board needs at least 4 rows, got {0}")]
    TooFewRows(usize),
    #[error("board needs at least 4 columns, got {0}")]
    TooFewCols(usize),
    #[error("board allows at most 200 rows, got {0}")]
    TooManyRows(usize),
    #[error("board allows at most 200 columns, got {0}")]
    TooManyCols(usize),
    #[error("gravity cadence must be at least 1 frame")]
    ZeroGravity,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    /// Frames between gravity ticks.
    pub gravity_every: u32,
    pub player: String,
    pub save_dir: PathBuf,
    /// Fixed piece seed; `None` seeds from the clock.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: 20,
            cols: 20,
            gravity_every: DEFAULT_GRAVITY_EVERY,
            player: default_player(),
            save_dir: default_save_dir(),
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows < MIN_BOARD_EDGE {
            return Err(ConfigError::TooFewRows(self.rows));
        }
        if self.cols < MIN_BOARD_EDGE {
            return Err(ConfigError::TooFewCols(self.cols));
        }
        if self.rows > MAX_BOARD_EDGE {
            return Err(ConfigError::TooManyRows(self.rows));
        }
        if self.cols > MAX_BOARD_EDGE {
            return Err(ConfigError::TooManyCols(self.cols));
        }
        if self.gravity_every == 0 {
            return Err(ConfigError::ZeroGravity);
        }
        Ok(())
    }
}

/// `$USER` (or `$USERNAME`), else "player".
pub fn default_player() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "player".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_game() {
        let config = GameConfig::default();
        assert_eq!((config.rows, config.cols), (20, 20));
        assert_eq!(config.gravity_every, 11);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_tiny_boards_and_zero_cadence() {
        let base = GameConfig::default();
        let rows = GameConfig { rows: 3, ..base.clone() };
        assert_eq!(rows.validate(), Err(ConfigError::TooFewRows(3)));
        let cols = GameConfig { cols: 2, ..base.clone() };
        assert_eq!(cols.validate(), Err(ConfigError::TooFewCols(2)));
        let gravity = GameConfig { gravity_every: 0, ..base };
        assert_eq!(gravity.validate(), Err(ConfigError::ZeroGravity));
    }

    #[test]
    fn rejects_boards_too_large_to_draw() {
        let base = GameConfig::default();
        let edge = GameConfig { rows: MAX_BOARD_EDGE, cols: MAX_BOARD_EDGE, ..base.clone() };
        assert!(edge.validate().is_ok());
        let cols = GameConfig { cols: 40_000, ..base.clone() };
        assert_eq!(cols.validate(), Err(ConfigError::TooManyCols(40_000)));
        let rows = GameConfig { rows: MAX_BOARD_EDGE + 1, ..base };
        assert_eq!(rows.validate(), Err(ConfigError::TooManyRows(MAX_BOARD_EDGE + 1)));
    }
}
