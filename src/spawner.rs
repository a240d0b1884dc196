/// Random spawning of towers and flags above the top edge of the screen.
///
/// Each function makes one probability draw per call.  The horizontal
/// position is only drawn when a spawn actually happens, so a seeded RNG
/// reproduces the same sequence of spawns.

use log::debug;
use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{FallingEntity, FallingKind, Rect};

/// Place a new entity at a random column, just above the visible area.
fn spawn(
    kind: FallingKind,
    size: (i32, i32),
    config: &GameConfig,
    rng: &mut impl Rng,
) -> FallingEntity {
    let (width, height) = size;
    let x = rng.gen_range(0..=config.screen_width - width);
    debug!("spawned {:?} at x={}", kind, x);
    FallingEntity {
        kind,
        rect: Rect { x, y: -height, width, height },
    }
}

/// Roll for a tower.  A successful roll is ignored while `tower_cap`
/// towers are already falling.
pub fn maybe_spawn_tower(
    towers: &[FallingEntity],
    config: &GameConfig,
    rng: &mut impl Rng,
) -> Option<FallingEntity> {
    let roll: f64 = rng.gen();
    if roll >= config.tower_spawn_probability || towers.len() >= config.tower_cap {
        return None;
    }
    Some(spawn(FallingKind::Tower, config.tower_size, config, rng))
}

/// Roll for a flag.  Flags have no population cap.
pub fn maybe_spawn_flag(config: &GameConfig, rng: &mut impl Rng) -> Option<FallingEntity> {
    let roll: f64 = rng.gen();
    if roll >= config.flag_spawn_probability {
        return None;
    }
    Some(spawn(FallingKind::Flag, config.flag_size, config, rng))
}
