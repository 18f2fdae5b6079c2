//! Opentris: classic falling-block puzzle game in the terminal.

mod app;
mod input;
mod theme;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::{Parser, ValueEnum};
use opentris::GameConfig;
use opentris::audio::{AudioSink, LogSink};
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(path) = args.log_file.as_deref() {
        init_logging(path)?;
    }
    let theme = theme::Theme::load(args.theme.as_deref(), args.palette).unwrap_or_default();
    let config = args.game_config();
    let audio = audio_sink(args.music_dir.as_deref());
    let mut app = App::new(&config, audio, theme, args.frame_rate, args.no_animation)?;
    app.run()?;
    Ok(())
}

/// Log to a file so output never lands on the alternate screen. `RUST_LOG` filters.
fn init_logging(path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

#[cfg(feature = "audio")]
fn audio_sink(music_dir: Option<&Path>) -> Box<dyn AudioSink> {
    let Some(dir) = music_dir else {
        return Box::new(LogSink);
    };
    match opentris::audio::MusicPlayer::new(dir) {
        Ok(player) => Box::new(player),
        Err(err) => {
            log::warn!("audio disabled: {err}");
            Box::new(LogSink)
        }
    }
}

#[cfg(not(feature = "audio"))]
fn audio_sink(music_dir: Option<&Path>) -> Box<dyn AudioSink> {
    if music_dir.is_some() {
        log::warn!("built without the `audio` feature; --music-dir ignored");
    }
    Box::new(LogSink)
}

/// Classic falling-block puzzle in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "opentris",
    version,
    about = "Classic falling-block puzzle in the terminal. Fill rows to clear them; 10 points per row.",
    long_about = "Opentris is a terminal take on the classic falling-block puzzle.\n\n\
        Pieces fall from the top of the board. Move and rotate them so they fill whole \
        rows; every full row disappears and scores 10 points. The game ends when a new \
        piece has no room to appear.\n\n\
        CONTROLS:\n  Left/Right h/l  Move    Up k   Rotate    Down j  Soft drop\n  \
        P  Pause    R  Restart after game over    Q / Esc  Quit\n\n\
        High scores are kept in --save-dir (default: $XDG_CONFIG_HOME/opentris)."
)]
pub struct Args {
    /// Playable rows.
    #[arg(long, default_value = "20", value_name = "ROWS")]
    pub rows: usize,

    /// Playable columns.
    #[arg(long, default_value = "20", value_name = "COLS")]
    pub cols: usize,

    /// Frames between gravity steps (lower is faster).
    #[arg(long, default_value = "11", value_name = "FRAMES")]
    pub gravity_every: u32,

    /// Render frames per second; gravity is counted in these frames.
    #[arg(long, default_value = "60.0", value_name = "RATE")]
    pub frame_rate: f64,

    /// Player name shown in the HUD and stored with scores. Defaults to $USER.
    #[arg(short, long, value_name = "NAME")]
    pub player: Option<String>,

    /// Directory for high_score.txt and scores.txt.
    #[arg(long, value_name = "DIR")]
    pub save_dir: Option<PathBuf>,

    /// Fixed seed for piece selection.
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Path to theme file (btop-style theme[key]="value", keys piece1..piece7, main_bg, title).
    #[arg(short, long, value_name = "FILE")]
    pub theme: Option<PathBuf>,

    /// Colour palette: normal (theme), high-contrast, or colorblind.
    #[arg(long, default_value = "normal")]
    pub palette: Palette,

    /// Directory with level_music.mp3, high_score.mp3 and game_over.mp3 (needs the `audio` feature).
    #[arg(long, value_name = "DIR")]
    pub music_dir: Option<PathBuf>,

    /// Write logs to this file (filter with RUST_LOG).
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Disable the row-clear flash.
    #[arg(long)]
    pub no_animation: bool,
}

impl Args {
    fn game_config(&self) -> GameConfig {
        let defaults = GameConfig::default();
        GameConfig {
            rows: self.rows,
            cols: self.cols,
            gravity_every: self.gravity_every,
            player: self.player.clone().unwrap_or(defaults.player),
            save_dir: self.save_dir.clone().unwrap_or(defaults.save_dir),
            seed: self.seed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Palette {
    #[default]
    Normal,

    #[value(alias = "highcontrast", alias = "contrast")]
    HighContrast,

    #[value(alias = "colourblind")]
    Colorblind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_defaults_build_valid_config() {
        let args = Args::parse_from(["opentris", "--player", "ada", "--seed", "9"]);
        let config = args.game_config();
        assert_eq!((config.rows, config.cols, config.gravity_every), (20, 20, 11));
        assert_eq!(config.player, "ada");
        assert_eq!(config.seed, Some(9));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn palette_aliases() {
        let args = Args::parse_from(["opentris", "--palette", "colourblind"]);
        assert_eq!(args.palette, Palette::Colorblind);
    }
}
