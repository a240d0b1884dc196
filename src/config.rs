/// Game configuration — built once at startup and handed to the core.
///
/// All geometry is in world pixels.  Entity sizes are derived from the
/// screen size so the game scales with the chosen resolution.

use thiserror::Error;

// ── Reference values ──────────────────────────────────────────────────────────

pub const DEFAULT_SCREEN_WIDTH: i32 = 800;
pub const DEFAULT_SCREEN_HEIGHT: i32 = 600;

/// Entity sizes as (width, height) fractions of the screen.
pub const PLANE_FRACTION: (f64, f64) = (0.13, 0.10);
pub const TOWER_FRACTION: (f64, f64) = (0.20, 0.15);
pub const FLAG_FRACTION: (f64, f64) = (0.08, 0.11);

/// Gap between the plane's bottom edge and the bottom of the screen.
pub const PLANE_BOTTOM_MARGIN: i32 = 10;

pub const FALL_SPEED: i32 = 5;
pub const MOVE_SPEED: i32 = 5;

pub const TOWER_SPAWN_PROBABILITY: f64 = 0.02;
pub const FLAG_SPAWN_PROBABILITY: f64 = 0.005;
pub const TOWER_CAP: usize = 3;

pub const WIN_SCORE: i32 = 25;
pub const LOSE_FLAGS: u32 = 3;

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("screen must be at least 1x1, got {width}x{height}")]
    EmptyScreen { width: i32, height: i32 },
    #[error("{entity} size must be positive, got {width}x{height}")]
    EmptyEntity {
        entity: &'static str,
        width: i32,
        height: i32,
    },
    #[error(
        "{entity} ({width}x{height}) does not fit on a {screen_width}x{screen_height} screen"
    )]
    EntityTooLarge {
        entity: &'static str,
        width: i32,
        height: i32,
        screen_width: i32,
        screen_height: i32,
    },
    #[error("{name} probability must be within [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },
    #[error("{name} speed must be positive, got {value}")]
    InvalidSpeed { name: &'static str, value: i32 },
    #[error("{name} speed {value} must be below the screen size ({limit})")]
    SpeedTooLarge {
        name: &'static str,
        value: i32,
        limit: i32,
    },
    #[error("{name} must be at least 1")]
    ZeroLimit { name: &'static str },
}

// ── Configuration ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GameConfig {
    pub screen_width: i32,
    pub screen_height: i32,
    pub plane_size: (i32, i32),
    pub tower_size: (i32, i32),
    pub flag_size: (i32, i32),
    /// Pixels every falling entity descends per tick.
    pub fall_speed: i32,
    /// Pixels the plane moves per tick while a direction is held.
    pub move_speed: i32,
    pub tower_spawn_probability: f64,
    pub flag_spawn_probability: f64,
    /// Towers are not spawned while this many are already falling.
    pub tower_cap: usize,
    pub win_score: i32,
    pub lose_flags: u32,
}

fn scaled(screen: (i32, i32), fraction: (f64, f64)) -> (i32, i32) {
    (
        (screen.0 as f64 * fraction.0) as i32,
        (screen.1 as f64 * fraction.1) as i32,
    )
}

impl GameConfig {
    /// Build a validated configuration for the given screen size, using the
    /// reference speeds, probabilities and thresholds.
    pub fn from_screen(screen_width: i32, screen_height: i32) -> Result<Self, ConfigError> {
        let config = Self::reference(screen_width, screen_height);
        config.validate()?;
        Ok(config)
    }

    fn reference(screen_width: i32, screen_height: i32) -> Self {
        let screen = (screen_width, screen_height);
        GameConfig {
            screen_width,
            screen_height,
            plane_size: scaled(screen, PLANE_FRACTION),
            tower_size: scaled(screen, TOWER_FRACTION),
            flag_size: scaled(screen, FLAG_FRACTION),
            fall_speed: FALL_SPEED,
            move_speed: MOVE_SPEED,
            tower_spawn_probability: TOWER_SPAWN_PROBABILITY,
            flag_spawn_probability: FLAG_SPAWN_PROBABILITY,
            tower_cap: TOWER_CAP,
            win_score: WIN_SCORE,
            lose_flags: LOSE_FLAGS,
        }
    }

    /// Check every invariant the simulation relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.screen_width < 1 || self.screen_height < 1 {
            return Err(ConfigError::EmptyScreen {
                width: self.screen_width,
                height: self.screen_height,
            });
        }

        for (entity, (width, height)) in [
            ("plane", self.plane_size),
            ("tower", self.tower_size),
            ("flag", self.flag_size),
        ] {
            if width < 1 || height < 1 {
                return Err(ConfigError::EmptyEntity { entity, width, height });
            }
            if width >= self.screen_width || height >= self.screen_height {
                return Err(ConfigError::EntityTooLarge {
                    entity,
                    width,
                    height,
                    screen_width: self.screen_width,
                    screen_height: self.screen_height,
                });
            }
        }

        // The plane sits PLANE_BOTTOM_MARGIN above the bottom edge.
        if self.plane_size.1 + PLANE_BOTTOM_MARGIN > self.screen_height {
            return Err(ConfigError::EntityTooLarge {
                entity: "plane",
                width: self.plane_size.0,
                height: self.plane_size.1,
                screen_width: self.screen_width,
                screen_height: self.screen_height,
            });
        }

        for (name, value) in [
            ("tower spawn", self.tower_spawn_probability),
            ("flag spawn", self.flag_spawn_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidProbability { name, value });
            }
        }

        // One tick may not carry anything across the whole screen.
        for (name, value, limit) in [
            ("fall", self.fall_speed, self.screen_height),
            ("move", self.move_speed, self.screen_width),
        ] {
            if value < 1 {
                return Err(ConfigError::InvalidSpeed { name, value });
            }
            if value >= limit {
                return Err(ConfigError::SpeedTooLarge { name, value, limit });
            }
        }

        if self.tower_cap == 0 {
            return Err(ConfigError::ZeroLimit { name: "tower cap" });
        }
        if self.win_score < 1 {
            return Err(ConfigError::ZeroLimit { name: "win score" });
        }
        if self.lose_flags == 0 {
            return Err(ConfigError::ZeroLimit { name: "lose flag count" });
        }

        Ok(())
    }

    /// Top-left corner of the plane at the start of a round: horizontally
    /// centred, resting just above the bottom edge.
    pub fn plane_start(&self) -> (i32, i32) {
        (
            self.screen_width / 2 - self.plane_size.0 / 2,
            self.screen_height - self.plane_size.1 - PLANE_BOTTOM_MARGIN,
        )
    }
}

impl Default for GameConfig {
    /// The 800x600 reference setup.
    fn default() -> Self {
        Self::reference(DEFAULT_SCREEN_WIDTH, DEFAULT_SCREEN_HEIGHT)
    }
}
