//! Theme: piece colours per colour id plus board and text colours.
//! Optional btop-style `theme[key]="value"` file overrides.

use opentris::ColorId;
use ratatui::style::Color;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Theme {
    /// Piece colours for colour ids 1..=7 (index 0 is id 1).
    pub pieces: [Color; 7],
    /// Empty board cell.
    pub bg: Color,
    /// Border.
    pub div_line: Color,
    /// Score, player and help text.
    pub main_fg: Color,
    /// Titles and highlights.
    pub title: Color,
}

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}

impl Theme {
    /// The original arcade colours on black.
    pub fn classic() -> Self {
        Self {
            pieces: [
                Color::Rgb(0, 255, 0),
                Color::Rgb(255, 0, 0),
                Color::Rgb(0, 255, 255),
                Color::Rgb(255, 255, 0),
                Color::Rgb(255, 165, 0),
                Color::Rgb(0, 0, 255),
                Color::Rgb(255, 0, 255),
            ],
            bg: Color::Rgb(0, 0, 0),
            div_line: Color::Rgb(0x3F, 0x44, 0x4F),
            main_fg: Color::Rgb(255, 255, 255),
            title: Color::Rgb(0, 255, 255),
        }
    }

    /// Load overrides from a theme file. Missing path falls back to the classic theme.
    pub fn load(path: Option<&Path>, palette: crate::Palette) -> Result<Self, ThemeError> {
        let mut theme = match path {
            Some(p) if p.exists() => {
                let s = std::fs::read_to_string(p)?;
                Self::from_map(&parse_theme_file(&s))
            }
            _ => Self::classic(),
        };
        theme.apply_palette(palette);
        Ok(theme)
    }

    /// Override piece colours for high-contrast or colorblind palettes.
    pub fn apply_palette(&mut self, palette: crate::Palette) {
        match palette {
            crate::Palette::Normal => {}
            crate::Palette::HighContrast => {
                self.pieces = [
                    Color::Rgb(0x00, 0xFF, 0x00),
                    Color::Rgb(0xFF, 0x00, 0x00),
                    Color::Rgb(0x00, 0xFF, 0xFF),
                    Color::Rgb(0xFF, 0xFF, 0x00),
                    Color::Rgb(0xFF, 0x88, 0x00),
                    Color::Rgb(0x00, 0x88, 0xFF),
                    Color::Rgb(0xFF, 0x00, 0xFF),
                ];
                self.main_fg = Color::White;
            }
            crate::Palette::Colorblind => {
                // Okabe-Ito style: avoids red/green pairs.
                self.pieces = [
                    Color::Rgb(0x00, 0x77, 0xBB),
                    Color::Rgb(0xEE, 0x77, 0x33),
                    Color::Rgb(0x00, 0x99, 0x88),
                    Color::Rgb(0xBB, 0xBB, 0x00),
                    Color::Rgb(0xCC, 0x33, 0x11),
                    Color::Rgb(0x33, 0xBB, 0xEE),
                    Color::Rgb(0xEE, 0x33, 0x77),
                ];
            }
        }
    }

    fn from_map(map: &HashMap<String, String>) -> Self {
        let base = Self::classic();
        let get = |key: &str| map.get(key).and_then(|v| parse_hex(v).ok());
        let mut pieces = base.pieces;
        for (i, slot) in pieces.iter_mut().enumerate() {
            if let Some(c) = get(&format!("piece{}", i + 1)) {
                *slot = c;
            }
        }
        Self {
            pieces,
            bg: get("main_bg").unwrap_or(base.bg),
            div_line: get("div_line").unwrap_or(base.div_line),
            main_fg: get("main_fg").unwrap_or(base.main_fg),
            title: get("title").unwrap_or(base.title),
        }
    }

    #[inline]
    pub fn piece_color(&self, id: ColorId) -> Color {
        self.pieces[(id.get() as usize - 1) % self.pieces.len()]
    }
}

/// Parse btop-style theme file into key -> value map.
fn parse_theme_file(s: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in s.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some(stripped) = line.strip_prefix("theme[") else {
            continue;
        };
        let Some(end) = stripped.find(']') else {
            continue;
        };
        let key = stripped[..end].trim();
        let rest = stripped[end + 1..].trim();
        if let Some(value) = rest.strip_prefix('=') {
            let value = value.trim().trim_matches('"').trim_matches('\'');
            if !value.is_empty() {
                map.insert(key.to_string(), value.to_string());
            }
        }
    }
    map
}

/// Parse hex colour "#RRGGBB" or "#RGB" into ratatui Color.
pub fn parse_hex(s: &str) -> Result<Color, ThemeError> {
    let s = s.trim().trim_start_matches('#');
    let invalid = || ThemeError::InvalidHex(s.to_string());
    let channel = |range: std::ops::Range<usize>| {
        s.get(range)
            .and_then(|h| u8::from_str_radix(h, 16).ok())
            .ok_or_else(invalid)
    };
    match s.len() {
        6 => Ok(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        3 => Ok(Color::Rgb(
            channel(0..1)? * 17,
            channel(1..2)? * 17,
            channel(2..3)? * 17,
        )),
        _ => Err(invalid()),
    }
}
