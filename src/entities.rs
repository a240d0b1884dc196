/// All game entity types — pure data, no logic.

use crate::config::GameConfig;

/// Axis-aligned rectangle covering `[x, x+width) × [y, y+height)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FallingKind {
    /// Collecting one scores a point.
    Tower,
    /// Collecting one costs a point and counts towards losing.
    Flag,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Playing,
    Won,
    Lost,
}

/// Direction keys held during the current tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Input {
    pub left: bool,
    pub right: bool,
}

// ── Player & falling entities ─────────────────────────────────────────────────

/// The plane.  Only `rect.x` changes after construction.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub rect: Rect,
}

/// A tower or flag descending from the top of the screen.  Only `rect.y`
/// changes after construction.
#[derive(Clone, Debug, PartialEq)]
pub struct FallingEntity {
    pub kind: FallingKind,
    pub rect: Rect,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub config: GameConfig,
    pub player: Player,
    pub towers: Vec<FallingEntity>,
    pub flags: Vec<FallingEntity>,
    /// Towers collected minus flags collected; may go negative.
    pub score: i32,
    pub flags_collected: u32,
    pub phase: Phase,
    /// Number of ticks simulated since the last reset.
    pub frame: u64,
}
