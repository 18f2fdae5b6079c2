//! Opentris: game-state engine for a classic falling-block puzzle.
//!
//! The engine owns the board, the falling piece, the score and the phase. Rendering,
//! audio, persistence and input are collaborators that talk to it through
//! [`Command`], [`Event`] and the traits in [`audio`] and [`highscores`].

pub mod audio;
pub mod board;
pub mod config;
pub mod engine;
pub mod highscores;
pub mod rng;
pub mod session;
pub mod shapes;
pub mod timing;

pub use board::{Board, Cell};
pub use config::{ConfigError, GameConfig};
pub use engine::{ActivePiece, Command, Engine, Event, Flow, Phase, ROW_CLEAR_POINTS};
pub use highscores::{FileStore, HighScore, PersistenceError, ScoreStore};
pub use rng::{PieceSource, RandomPieces};
pub use session::Session;
pub use shapes::{ColorId, Shape, ShapeCatalog, ShapeKind};
pub use timing::GravityClock;
