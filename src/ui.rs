//! Layout and drawing: board, falling piece, sidebar, and title/pause/game-over overlays.
//! Reads engine state only; never mutates it.

use crate::theme::Theme;
use opentris::{Engine, HighScore, Phase, PieceSource};
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget};
use std::time::Instant;
use tachyonfx::{Duration as TfxDuration, Effect, EffectRenderer, Interpolation, fx};

/// Each grid cell is two terminal columns wide so cells look square.
const CELL_WIDTH: u16 = 2;
const SIDEBAR_WIDTH: u16 = 26;
/// Row-clear flash (TachyonFX fade from white back to the board).
const ROW_FLASH_MS: u32 = 250;

/// HUD values that live outside the engine.
pub struct Hud<'a> {
    pub player: &'a str,
    pub best: &'a HighScore,
    pub new_high_score: bool,
}

/// Board size in terminal cells, border included.
/// Saturates instead of wrapping for boards wider than the terminal can address.
fn board_outer_size(rows: usize, cols: usize) -> (u16, u16) {
    let edge = |n: usize| u16::try_from(n).unwrap_or(u16::MAX);
    (
        edge(cols).saturating_mul(CELL_WIDTH).saturating_add(2),
        edge(rows).saturating_add(2),
    )
}

/// Board (outer, with border) and sidebar rects, centred in `area`.
fn layout(area: Rect, rows: usize, cols: usize) -> (Rect, Rect) {
    let (bw, bh) = board_outer_size(rows, cols);
    let total_w = bw.saturating_add(SIDEBAR_WIDTH);
    let horiz = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(total_w),
            Constraint::Fill(1),
        ])
        .split(area);
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(bh),
            Constraint::Fill(1),
        ])
        .split(horiz[1]);
    let inner = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(bw), Constraint::Length(SIDEBAR_WIDTH)])
        .split(vert[1]);
    (inner[0], inner[1])
}

/// New flash effect for a row clear; the caller owns it until `done()`.
pub fn row_clear_flash() -> Effect {
    fx::fade_from(Color::White, Color::White, (ROW_FLASH_MS, Interpolation::Linear))
}

/// Draw one frame. `flash` is advanced by the time since `flash_time`.
pub fn draw<P: PieceSource>(
    frame: &mut Frame,
    engine: &Engine<P>,
    hud: &Hud<'_>,
    theme: &Theme,
    flash: &mut Option<Effect>,
    flash_time: &mut Option<Instant>,
    now: Instant,
) {
    let area = frame.area();
    let board = engine.board();
    let (board_area, sidebar_area) = layout(area, board.rows(), board.cols());

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.div_line).bg(theme.bg))
        .title(Span::styled(" Open Tetris ", Style::default().fg(theme.title)));
    let inner = block.inner(board_area);
    block.render(board_area, frame.buffer_mut());
    draw_cells(frame.buffer_mut(), inner, engine, theme);

    if let Some(effect) = flash.as_mut() {
        let delta = flash_time
            .map(|t| now.saturating_duration_since(t))
            .unwrap_or_default();
        let delta_ms = delta.as_millis().min(u32::MAX as u128) as u32;
        *flash_time = Some(now);
        let effect_area = inner;
        frame.render_effect(effect, effect_area, TfxDuration::from_millis(delta_ms));
    }

    draw_sidebar(frame, sidebar_area, engine.score(), hud, theme);

    match engine.phase() {
        Phase::NotStarted => draw_title_overlay(frame, board_area, theme),
        Phase::Paused => draw_pause_overlay(frame, board_area, theme),
        Phase::GameOver => draw_game_over(frame, board_area, engine.score(), hud, theme),
        Phase::Playing => {}
    }
}

fn draw_cells<P: PieceSource>(buf: &mut Buffer, inner: Rect, engine: &Engine<P>, theme: &Theme) {
    let board = engine.board();
    let empty = Style::default().bg(theme.bg);
    // Grid cells that fit inside `inner`; anything beyond is clipped.
    let fit_cols = usize::from(inner.width / CELL_WIDTH);
    let fit_rows = usize::from(inner.height);
    let origin = |x: usize, y: usize| (inner.x + x as u16 * CELL_WIDTH, inner.y + y as u16);
    for (y, row) in board.playable_rows().enumerate().take(fit_rows) {
        for (x, cell) in row.iter().enumerate().take(fit_cols) {
            let (rx, ry) = origin(x, y);
            match cell.color() {
                Some(c) => paint(buf, rx, ry, theme.piece_color(c), theme.bg),
                None => {
                    buf.set_string(rx, ry, " .", empty.fg(theme.div_line));
                }
            }
        }
    }
    if let Some(piece) = engine.piece() {
        for (x, y, color) in piece.cells() {
            let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
                continue;
            };
            if x < fit_cols && y < fit_rows {
                let (rx, ry) = origin(x, y);
                paint(buf, rx, ry, theme.piece_color(color), theme.bg);
            }
        }
    }
}

fn paint(buf: &mut Buffer, x: u16, y: u16, color: Color, bg: Color) {
    buf.set_string(x, y, "██", Style::default().fg(color).bg(bg));
}

fn draw_sidebar(frame: &mut Frame, area: Rect, score: u32, hud: &Hud<'_>, theme: &Theme) {
    let label = Style::default().fg(theme.title);
    let text = Style::default().fg(theme.main_fg);
    let best_by = if hud.best.player.is_empty() {
        String::new()
    } else {
        format!(" ({})", hud.best.player)
    };
    let lines = vec![
        Line::from(Span::styled(" Player", label)),
        Line::from(Span::styled(format!(" {}", hud.player), text)),
        Line::from(""),
        Line::from(Span::styled(" Score", label)),
        Line::from(Span::styled(format!(" {score}"), text)),
        Line::from(""),
        Line::from(Span::styled(" Best", label)),
        Line::from(Span::styled(format!(" {}{best_by}", hud.best.score), text)),
        Line::from(""),
        Line::from(Span::styled(" ←/→ h/l  Move", text)),
        Line::from(Span::styled(" ↑ k      Rotate", text)),
        Line::from(Span::styled(" ↓ j      Drop", text)),
        Line::from(Span::styled(" P        Pause", text)),
        Line::from(Span::styled(" R        Restart", text)),
        Line::from(Span::styled(" Q / Esc  Quit", text)),
    ];
    let p = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.div_line).bg(theme.bg)),
    );
    p.render(area, frame.buffer_mut());
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

fn draw_popup(frame: &mut Frame, area: Rect, lines: Vec<Line<'_>>, theme: &Theme) {
    let height = lines.len() as u16 + 2;
    let popup = centered(area, area.width.saturating_sub(2).min(30), height);
    Clear.render(popup, frame.buffer_mut());
    let p = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.div_line).bg(theme.bg)),
    );
    p.render(popup, frame.buffer_mut());
}

fn draw_title_overlay(frame: &mut Frame, area: Rect, theme: &Theme) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            " OPEN TETRIS ",
            Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to play",
            Style::default().fg(theme.main_fg),
        )),
        Line::from(""),
    ];
    draw_popup(frame, area, lines, theme);
}

fn draw_pause_overlay(frame: &mut Frame, area: Rect, theme: &Theme) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            " Paused ",
            Style::default().fg(Color::Black).bg(Color::Yellow),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "P resume   Q quit",
            Style::default().fg(theme.main_fg),
        )),
    ];
    draw_popup(frame, area, lines, theme);
}

fn draw_game_over(frame: &mut Frame, area: Rect, score: u32, hud: &Hud<'_>, theme: &Theme) {
    let text = Style::default().fg(theme.main_fg);
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            " Game Over! ",
            Style::default()
                .fg(theme.title)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(format!("{}'s score: {score}", hud.player), text)),
        Line::from(Span::styled(format!("Best: {}", hud.best.score), text)),
    ];
    if hud.new_high_score {
        lines.push(Line::from(Span::styled(
            "New high score!",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("R restart   Esc exit", text)));
    draw_popup(frame, area, lines, theme);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_size_includes_border() {
        assert_eq!(board_outer_size(20, 10), (22, 22));
    }

    #[test]
    fn oversized_board_saturates_instead_of_overflowing() {
        assert_eq!(board_outer_size(20, 40_000), (u16::MAX, 22));
        assert_eq!(board_outer_size(70_000, 10), (22, u16::MAX));
        let (board, _) = layout(Rect::new(0, 0, 80, 24), 20, 40_000);
        assert!(board.width <= 80);
    }

    #[test]
    fn layout_centres_board_and_sidebar() {
        let area = Rect::new(0, 0, 100, 40);
        let (board, sidebar) = layout(area, 20, 10);
        assert_eq!((board.width, board.height), (22, 22));
        assert_eq!(sidebar.x, board.x + board.width);
        assert_eq!(board.x, (100 - 22 - SIDEBAR_WIDTH) / 2);
    }

    #[test]
    fn centered_clamps_to_area() {
        let r = centered(Rect::new(5, 5, 10, 4), 20, 8);
        assert_eq!(r, Rect::new(5, 5, 10, 4));
    }
}
