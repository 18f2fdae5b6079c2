//! Persist the high score and the score log to disk (XDG config or ~/.config/opentris).

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use thiserror::Error;

const APP_DIR: &str = "opentris";
const HIGH_SCORE_FILE: &str = "high_score.txt";
const SCORE_LOG_FILE: &str = "scores.txt";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("cannot create {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Best score so far and who set it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HighScore {
    pub score: u32,
    pub player: String,
}

impl HighScore {
    /// Parse `"{score}\t\t{player}"`. The player part is optional.
    pub fn parse(content: &str) -> Option<Self> {
        let content = content.trim();
        let (score, player) = match content.split_once(char::is_whitespace) {
            Some((score, rest)) => (score, rest.trim()),
            None => (content, ""),
        };
        let score = score.parse::<u32>().ok()?;
        Some(Self {
            score,
            player: player.to_string(),
        })
    }
}

/// Score storage owned by the front end; the engine never touches it directly.
pub trait ScoreStore {
    /// Current high score; a missing or unreadable source is a zero score.
    fn read_high_score(&self) -> HighScore;
    /// Overwrite the high score.
    fn write_high_score(&mut self, score: u32, player: &str) -> Result<(), PersistenceError>;
    /// Append a finished game that did not beat the high score.
    fn append_score(&mut self, score: u32, player: &str) -> Result<(), PersistenceError>;
}

/// `$XDG_CONFIG_HOME/opentris`, else `$HOME/.config/opentris`, else `./opentris`.
pub fn default_save_dir() -> PathBuf {
    let base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => std::env::var("HOME")
            .map(|h| PathBuf::from(h).join(".config"))
            .unwrap_or_else(|_| PathBuf::from(".")),
    };
    base.join(APP_DIR)
}

/// Two plain-text files in one directory: `high_score.txt` and the append-only `scores.txt`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn high_score_path(&self) -> PathBuf {
        self.dir.join(HIGH_SCORE_FILE)
    }

    pub fn score_log_path(&self) -> PathBuf {
        self.dir.join(SCORE_LOG_FILE)
    }

    fn ensure_dir(&self) -> Result<(), PersistenceError> {
        fs::create_dir_all(&self.dir).map_err(|source| PersistenceError::CreateDir {
            path: self.dir.clone(),
            source,
        })
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new(default_save_dir())
    }
}

impl ScoreStore for FileStore {
    fn read_high_score(&self) -> HighScore {
        let path = self.high_score_path();
        match fs::read_to_string(&path) {
            Ok(content) => HighScore::parse(&content).unwrap_or_else(|| {
                log::warn!("ignoring unreadable high score in {}", path.display());
                HighScore::default()
            }),
            Err(_) => HighScore::default(),
        }
    }

    fn write_high_score(&mut self, score: u32, player: &str) -> Result<(), PersistenceError> {
        self.ensure_dir()?;
        let path = self.high_score_path();
        fs::write(&path, format!("{score}\t\t{player}"))
            .map_err(|source| PersistenceError::Write { path, source })
    }

    fn append_score(&mut self, score: u32, player: &str) -> Result<(), PersistenceError> {
        self.ensure_dir()?;
        let path = self.score_log_path();
        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .and_then(|mut f| writeln!(f, "{score}\t\t{player}"));
        result.map_err(|source| PersistenceError::Write { path, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_score_and_player() {
        let hs = HighScore::parse("120\t\tada").unwrap();
        assert_eq!(hs.score, 120);
        assert_eq!(hs.player, "ada");
    }

    #[test]
    fn parse_bare_score() {
        assert_eq!(
            HighScore::parse("40\n"),
            Some(HighScore {
                score: 40,
                player: String::new()
            })
        );
    }

    #[test]
    fn parse_player_with_spaces() {
        let hs = HighScore::parse("30\t\tgrace hopper").unwrap();
        assert_eq!(hs.player, "grace hopper");
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(HighScore::parse("lots"), None);
        assert_eq!(HighScore::parse(""), None);
        assert_eq!(HighScore::parse("-5\t\tx"), None);
    }
}
