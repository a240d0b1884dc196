/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState`.  Side effects are limited to the injected RNG.

use log::{debug, info};
use rand::Rng;

use crate::collision::{detect, remove_collected};
use crate::config::{ConfigError, GameConfig};
use crate::entities::{FallingEntity, GameState, Input, Phase, Player, Rect};
use crate::spawner::{maybe_spawn_flag, maybe_spawn_tower};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state: plane centred at the bottom, nothing
/// falling, score and flag count at zero.  Rejects a configuration the
/// simulation cannot run with.
pub fn init_state(config: GameConfig) -> Result<GameState, ConfigError> {
    config.validate()?;
    Ok(fresh_state(config))
}

fn fresh_state(config: GameConfig) -> GameState {
    let (x, y) = config.plane_start();
    let (width, height) = config.plane_size;
    GameState {
        config,
        player: Player {
            rect: Rect { x, y, width, height },
        },
        towers: Vec::new(),
        flags: Vec::new(),
        score: 0,
        flags_collected: 0,
        phase: Phase::Playing,
        frame: 0,
    }
}

/// Start a fresh round with the same configuration.  Valid from any phase.
pub fn reset(state: &GameState) -> GameState {
    info!(
        "reset after {} ticks (score {}, flags {}, {:?})",
        state.frame, state.score, state.flags_collected, state.phase
    );
    fresh_state(state.config)
}

// ── Motion ───────────────────────────────────────────────────────────────────

/// Shift the plane by `move_speed` for each held direction, keeping it
/// fully on screen.
pub fn move_player(player: &Player, input: Input, config: &GameConfig) -> Player {
    let mut dx = 0;
    if input.left {
        dx -= config.move_speed;
    }
    if input.right {
        dx += config.move_speed;
    }
    let max_x = config.screen_width - player.rect.width;
    Player {
        rect: Rect {
            x: player.rect.x.saturating_add(dx).clamp(0, max_x),
            ..player.rect
        },
    }
}

/// Move every entity down by `speed`.
pub fn fall(entities: &[FallingEntity], speed: i32) -> Vec<FallingEntity> {
    entities
        .iter()
        .map(|e| FallingEntity {
            kind: e.kind,
            rect: Rect { y: e.rect.y.saturating_add(speed), ..e.rect },
        })
        .collect()
}

/// Keep only entities whose top edge is still above the bottom of the screen.
pub fn cull_off_screen(entities: Vec<FallingEntity>, screen_height: i32) -> Vec<FallingEntity> {
    let before = entities.len();
    let kept: Vec<FallingEntity> = entities
        .into_iter()
        .filter(|e| e.rect.y < screen_height)
        .collect();
    if kept.len() < before {
        debug!("culled {} off-screen entities", before - kept.len());
    }
    kept
}

// ── Phase ────────────────────────────────────────────────────────────────────

/// Win is checked first, so it takes priority when both thresholds are
/// reached on the same tick.
pub fn evaluate_phase(score: i32, flags_collected: u32, config: &GameConfig) -> Phase {
    if score >= config.win_score {
        Phase::Won
    } else if flags_collected >= config.lose_flags {
        Phase::Lost
    } else {
        Phase::Playing
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one frame.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
///
/// Outside `Phase::Playing` the state is returned unchanged.
pub fn tick(state: &GameState, input: Input, rng: &mut impl Rng) -> GameState {
    if state.phase != Phase::Playing {
        return state.clone();
    }
    let config = &state.config;

    // ── 1. Move the plane, then everything that falls ────────────────────────
    let player = move_player(&state.player, input, config);
    let towers = fall(&state.towers, config.fall_speed);
    let flags = fall(&state.flags, config.fall_speed);

    // ── 2. Collection at the new positions ───────────────────────────────────
    let tower_hits = detect(&player, &towers);
    let flag_hits = detect(&player, &flags);
    let towers = remove_collected(&towers, &tower_hits);
    let flags = remove_collected(&flags, &flag_hits);

    let score = state.score + tower_hits.score_delta + flag_hits.score_delta;
    let flags_collected = state.flags_collected + tower_hits.flag_delta + flag_hits.flag_delta;

    // ── 3. Drop whatever fell past the bottom edge ───────────────────────────
    let mut towers = cull_off_screen(towers, config.screen_height);
    let mut flags = cull_off_screen(flags, config.screen_height);

    // ── 4. Spawn ─────────────────────────────────────────────────────────────
    if let Some(tower) = maybe_spawn_tower(&towers, config, rng) {
        towers.push(tower);
    }
    if let Some(flag) = maybe_spawn_flag(config, rng) {
        flags.push(flag);
    }

    // ── 5. Win / lose ────────────────────────────────────────────────────────
    let phase = evaluate_phase(score, flags_collected, config);
    let frame = state.frame + 1;
    if phase != Phase::Playing {
        info!(
            "{:?} on tick {} (score {}, flags {})",
            phase, frame, score, flags_collected
        );
    }

    GameState {
        player,
        towers,
        flags,
        score,
        flags_collected,
        phase,
        frame,
        config: state.config,
    }
}
