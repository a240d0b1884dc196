/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// state into terminal commands, scaling world pixels onto whatever
/// terminal size is current.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use plane_collection::entities::{FallingEntity, FallingKind, GameState, Phase, Rect};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_FLAGS: Color = Color::Red;
const C_PLANE: Color = Color::White;
const C_TOWER: Color = Color::Grey;
const C_FLAG: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

const PLANE_CELL: &str = "█";
const TOWER_CELL: &str = "▓";
const FLAG_CELL: &str = "▒";

/// Terminal cells reserved around the play area: HUD row and top border
/// above, bottom border and hint row below, one wall column each side.
const ROWS_ABOVE: u16 = 2;
const ROWS_BELOW: u16 = 2;

// ── Coordinate mapping ────────────────────────────────────────────────────────

/// Maps world pixels onto the terminal cells inside the border.
struct Viewport {
    world_w: i64,
    world_h: i64,
    left: i64,
    top: i64,
    cols: i64,
    rows: i64,
}

impl Viewport {
    fn new(state: &GameState, term_w: u16, term_h: u16) -> Self {
        Viewport {
            world_w: state.config.screen_width as i64,
            world_h: state.config.screen_height as i64,
            left: 1,
            top: ROWS_ABOVE as i64,
            cols: term_w.saturating_sub(2) as i64,
            rows: term_h.saturating_sub(ROWS_ABOVE + ROWS_BELOW) as i64,
        }
    }

    /// Cell span `[start, end)` covered by the world span `[from, to)`,
    /// clipped to the play area.  `None` if nothing is visible.
    fn span(from: i32, to: i32, world: i64, cells: i64, offset: i64) -> Option<(u16, u16)> {
        let start = (from as i64 * cells).div_euclid(world).max(0);
        let end = (to as i64 * cells + world - 1).div_euclid(world).min(cells);
        if start >= end {
            return None;
        }
        Some(((offset + start) as u16, (offset + end) as u16))
    }

    fn cells(&self, rect: &Rect) -> Option<((u16, u16), (u16, u16))> {
        let cols = Self::span(rect.x, rect.x + rect.width, self.world_w, self.cols, self.left)?;
        let rows = Self::span(rect.y, rect.y + rect.height, self.world_h, self.rows, self.top)?;
        Some((cols, rows))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame onto a `term_w` x `term_h` terminal.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    term_w: u16,
    term_h: u16,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let view = Viewport::new(state, term_w, term_h);

    draw_border(out, term_w, term_h)?;
    draw_hud(out, state, term_w)?;

    for tower in &state.towers {
        draw_falling(out, &view, tower)?;
    }
    for flag in &state.flags {
        draw_falling(out, &view, flag)?;
    }
    fill_rect(out, &view, &state.player.rect, C_PLANE, PLANE_CELL)?;

    draw_controls_hint(out, state, term_h)?;

    match state.phase {
        Phase::Playing => {}
        Phase::Won => {
            draw_overlay(out, state, term_w, term_h, "  CONGRATULATIONS!  ", Color::Green)?
        }
        Phase::Lost => {
            draw_overlay(out, state, term_w, term_h, "     GAME  OVER     ", Color::Red)?
        }
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, term_h.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, w: u16, h: u16) -> std::io::Result<()> {
    let inner = "─".repeat(w.saturating_sub(2) as usize);

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1 — top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", inner)))?;

    // Row h-2 — bottom bar
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", inner)))?;

    // Side walls
    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(w.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, w: u16) -> std::io::Result<()> {
    // Score — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!(
        "Score:{:>4} / {}",
        state.score, state.config.win_score
    )))?;

    // Flags collected — right
    let flags_str = format!(
        "Flags:{} / {}",
        state.flags_collected, state.config.lose_flags
    );
    let fx = w.saturating_sub(flags_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(fx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_FLAGS))?;
    out.queue(Print(&flags_str))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_falling<W: Write>(
    out: &mut W,
    view: &Viewport,
    entity: &FallingEntity,
) -> std::io::Result<()> {
    match entity.kind {
        FallingKind::Tower => fill_rect(out, view, &entity.rect, C_TOWER, TOWER_CELL),
        FallingKind::Flag => fill_rect(out, view, &entity.rect, C_FLAG, FLAG_CELL),
    }
}

/// Paint the visible part of a world rectangle with `cell`.
fn fill_rect<W: Write>(
    out: &mut W,
    view: &Viewport,
    rect: &Rect,
    color: Color,
    cell: &str,
) -> std::io::Result<()> {
    let Some(((c0, c1), (r0, r1))) = view.cells(rect) else {
        return Ok(());
    };
    let line = cell.repeat((c1 - c0) as usize);
    out.queue(style::SetForegroundColor(color))?;
    for row in r0..r1 {
        out.queue(cursor::MoveTo(c0, row))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, state: &GameState, h: u16) -> std::io::Result<()> {
    let hint = match state.phase {
        Phase::Playing => "← → / A D : Move   Q : Quit",
        Phase::Won | Phase::Lost => "R : Play Again   Q : Quit",
    };
    out.queue(cursor::MoveTo(1, h.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}

// ── Win / lose overlay ────────────────────────────────────────────────────────

fn draw_overlay<W: Write>(
    out: &mut W,
    state: &GameState,
    w: u16,
    h: u16,
    title: &str,
    color: Color,
) -> std::io::Result<()> {
    let bar = "═".repeat(title.chars().count());
    let top = format!("╔{}╗", bar);
    let middle = format!("║{}║", title);
    let bottom = format!("╚{}╝", bar);
    let score_line = format!("Final Score: {:>4}", state.score);
    let hint = "R - Play Again  Q - Quit";

    let lines: [(&str, Color); 5] = [
        (&top, color),
        (&middle, color),
        (&bottom, color),
        (&score_line, Color::Yellow),
        (hint, Color::White),
    ];

    let cx = w / 2;
    let start_row = (h / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
