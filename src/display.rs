//! Rendering layer — all terminal output lives here.
//!
//! The simulation works on a logical `screen_width × screen_height` pixel
//! surface.  Each frame is scaled onto whatever cell grid the terminal has:
//! row 0 holds the HUD, every row below it is play field.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use alien_invasion::entities::{GameState, Rect, Sprite};
use alien_invasion::settings::Rgb;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_SHIP: Color = Color::Rgb { r: 30, g: 60, b: 160 };
const C_ALIEN: Color = Color::Rgb { r: 20, g: 140, b: 40 };
const C_HUD_SHIPS: Color = Color::Red;
const C_HUD_WAVE: Color = Color::Yellow;
const C_HUD_ALIENS: Color = Color::Green;
const C_HINT: Color = Color::DarkGrey;

const BLOCK: char = '█';

// ── Scaling ───────────────────────────────────────────────────────────────────

/// Maps logical pixels onto the terminal play field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Viewport {
    cols: u16,
    /// Play-field rows, not counting the HUD row.
    rows: u16,
    screen_width: i32,
    screen_height: i32,
}

/// A rectangle of terminal cells: column, row (inside the play field), width, height.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct CellRect {
    col: u16,
    row: u16,
    width: u16,
    height: u16,
}

impl Viewport {
    fn new(state: &GameState, term_cols: u16, term_rows: u16) -> Self {
        Viewport {
            cols: term_cols.max(1),
            rows: term_rows.saturating_sub(1).max(1),
            screen_width: state.settings.screen_width.max(1),
            screen_height: state.settings.screen_height.max(1),
        }
    }

    /// The cells covered by `rect`, or `None` if it is entirely off-screen.
    /// Anything on screen covers at least one cell, so thin bullets stay visible.
    fn cells(&self, rect: Rect) -> Option<CellRect> {
        if rect.right() <= 0
            || rect.bottom() <= 0
            || rect.left() >= self.screen_width
            || rect.top() >= self.screen_height
        {
            return None;
        }
        let (col, width) = scale_span(rect.left(), rect.right(), self.screen_width, self.cols);
        let (row, height) = scale_span(rect.top(), rect.bottom(), self.screen_height, self.rows);
        Some(CellRect { col, row, width, height })
    }
}

/// Scale the pixel span `[start, end)` of a `logical`-wide axis onto `cells`.
fn scale_span(start: i32, end: i32, logical: i32, cells: u16) -> (u16, u16) {
    let logical = logical as i64;
    let cells_i = cells as i64;
    let first = (start.max(0) as i64 * cells_i / logical).min(cells_i - 1);
    // Round the far edge up so partial cells are drawn.
    let last = ((end as i64).min(logical) * cells_i + logical - 1) / logical;
    let last = last.clamp(first + 1, cells_i);
    (first as u16, (last - first) as u16)
}

fn rgb(color: Rgb) -> Color {
    Color::Rgb {
        r: color[0],
        g: color[1],
        b: color[2],
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let view = Viewport::new(state, cols, rows);
    let bg = rgb(state.settings.bg_color);

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_hud(out, state, &view)?;
    draw_background(out, &view, bg)?;

    for alien in &state.aliens {
        fill_rect(out, &view, alien.rect(), C_ALIEN, bg)?;
    }
    let bullet_color = rgb(state.settings.bullet_color);
    for bullet in &state.bullets {
        fill_rect(out, &view, bullet.rect(), bullet_color, bg)?;
    }
    fill_rect(out, &view, state.ship.rect(), C_SHIP, bg)?;

    if !state.stats.game_active {
        draw_game_over(out, state, &view, bg)?;
    } else if state.stunned_frames > 0 {
        draw_banner(out, &view, bg, &[("SHIP HIT!", Color::Red)])?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, 0))?;
    out.flush()?;
    Ok(())
}

// ── Background & entities ─────────────────────────────────────────────────────

fn draw_background<W: Write>(out: &mut W, view: &Viewport, bg: Color) -> std::io::Result<()> {
    let blank = " ".repeat(view.cols as usize);
    out.queue(style::SetBackgroundColor(bg))?;
    for row in 0..view.rows {
        out.queue(cursor::MoveTo(0, row + 1))?;
        out.queue(Print(&blank))?;
    }
    Ok(())
}

fn fill_rect<W: Write>(
    out: &mut W,
    view: &Viewport,
    rect: Rect,
    color: Color,
    bg: Color,
) -> std::io::Result<()> {
    let Some(cells) = view.cells(rect) else {
        return Ok(());
    };
    let line: String = std::iter::repeat(BLOCK).take(cells.width as usize).collect();
    out.queue(style::SetBackgroundColor(bg))?;
    out.queue(style::SetForegroundColor(color))?;
    for dy in 0..cells.height {
        out.queue(cursor::MoveTo(cells.col, cells.row + dy + 1))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    // Ships left — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SHIPS))?;
    out.queue(Print(format!(
        "Ships: {}",
        "♥".repeat(state.stats.ships_left as usize)
    )))?;

    // Wave — centre
    let wave = format!("[ WAVE {} ]", state.wave);
    let wx = (view.cols / 2).saturating_sub(wave.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(wx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_WAVE))?;
    out.queue(Print(&wave))?;

    // Aliens remaining + controls — right
    let aliens = format!("Aliens: {:>3}", state.aliens.len());
    let hint = "← → : Move  SPACE : Fire  Q : Quit";
    let right_len = (aliens.chars().count() + 2 + hint.chars().count()) as u16;
    out.queue(cursor::MoveTo(view.cols.saturating_sub(right_len + 1), 0))?;
    out.queue(style::SetForegroundColor(C_HUD_ALIENS))?;
    out.queue(Print(&aliens))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(format!("  {}", hint)))?;

    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

/// Centred lines over the play field.
fn draw_banner<W: Write>(
    out: &mut W,
    view: &Viewport,
    bg: Color,
    lines: &[(&str, Color)],
) -> std::io::Result<()> {
    let cx = view.cols / 2;
    let start_row = (view.rows / 2 + 1).saturating_sub(lines.len() as u16 / 2);

    out.queue(style::SetBackgroundColor(bg))?;
    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }
    Ok(())
}

fn draw_game_over<W: Write>(
    out: &mut W,
    state: &GameState,
    view: &Viewport,
    bg: Color,
) -> std::io::Result<()> {
    let wave_line = format!("Reached wave {}", state.wave);
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", Color::Red),
        ("║    GAME  OVER    ║", Color::Red),
        ("╚══════════════════╝", Color::Red),
        (&wave_line, Color::DarkYellow),
        ("R - Play Again  Q - Quit", Color::Black),
    ];
    draw_banner(out, view, bg, lines)
}
