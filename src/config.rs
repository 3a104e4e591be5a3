//! Tunable game constants.
//!
//! Defaults reproduce the 128×64 OLED build.  Any subset can be overridden
//! from a JSON file; missing fields fall back to their defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entities::Point;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ── Sections ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub width: i32,
    pub height: i32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: 128,
            height: 64,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub size: i32,
    /// Vertical pixels per tick while a move button is held.
    pub speed: i32,
    /// Start position; `None` means the right edge, vertically centred.
    pub start: Option<(i32, i32)>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            size: 8,
            speed: 2,
            start: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    /// Session-start lower bound of the per-tick spawn threshold draw.
    pub spawn_threshold_min: u32,
    /// Session-start upper bound (exclusive) of the threshold draw.
    pub spawn_threshold_max: u32,
    pub size_min: i32,
    /// Exclusive upper bound of the size draw.  Also the reference for the
    /// shrink-instead-of-destroy rule.
    pub size_max: i32,
    pub speed: i32,
    pub spawn_x: i32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            spawn_threshold_min: 40,
            spawn_threshold_max: 90,
            size_min: 2,
            size_max: 5,
            speed: 1,
            spawn_x: -4,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    pub spawn_threshold: u32,
    pub size: i32,
    pub speed: i32,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            spawn_threshold: 20,
            size: 0,
            speed: 2,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyConfig {
    pub interval_ms: u64,
    pub step: u32,
    pub min_threshold_floor: u32,
    pub max_threshold_floor: u32,
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Self {
            interval_ms: 5000,
            step: 5,
            min_threshold_floor: 10,
            max_threshold_floor: 25,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub points_per_hit: u32,
    /// Extra pixels added to the projectile/enemy contact radius.
    /// The player/enemy test has none.
    pub projectile_hit_padding: i32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            points_per_hit: 10,
            projectile_hit_padding: 1,
        }
    }
}

// ── Root ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub field: FieldConfig,
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
    pub projectile: ProjectileConfig,
    pub difficulty: DifficultyConfig,
    pub scoring: ScoringConfig,
    pub game_over_wait_secs: u64,
    /// Pause between ticks in the driver loop.
    pub tick_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field: FieldConfig::default(),
            player: PlayerConfig::default(),
            enemy: EnemyConfig::default(),
            projectile: ProjectileConfig::default(),
            difficulty: DifficultyConfig::default(),
            scoring: ScoringConfig::default(),
            game_over_wait_secs: 5,
            tick_delay_ms: 10,
        }
    }
}

impl GameConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn player_start(&self) -> Point {
        match self.player.start {
            Some((x, y)) => Point::new(x, y),
            None => Point::new(
                self.field.width - self.player.size - 1,
                self.field.height / 2,
            ),
        }
    }

    pub fn game_over_wait_ms(&self) -> u64 {
        self.game_over_wait_secs.saturating_mul(1000)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        if self.field.width <= 0 || self.field.height <= 0 {
            return invalid(format!(
                "field must be non-empty, got {}x{}",
                self.field.width, self.field.height
            ));
        }
        if self.player.size < 0 || self.enemy.size_min < 0 || self.projectile.size < 0 {
            return invalid("sizes must not be negative".into());
        }
        if self.enemy.size_min >= self.enemy.size_max {
            return invalid(format!(
                "enemy size range [{}, {}) is empty",
                self.enemy.size_min, self.enemy.size_max
            ));
        }
        if self.enemy.spawn_threshold_min > self.enemy.spawn_threshold_max {
            return invalid(format!(
                "enemy spawn threshold min {} exceeds max {}",
                self.enemy.spawn_threshold_min, self.enemy.spawn_threshold_max
            ));
        }
        let d = &self.difficulty;
        if d.interval_ms == 0 {
            return invalid("difficulty interval must be positive".into());
        }
        if d.min_threshold_floor > d.max_threshold_floor {
            return invalid(format!(
                "difficulty floor for min ({}) exceeds floor for max ({})",
                d.min_threshold_floor, d.max_threshold_floor
            ));
        }
        let start = self.player_start();
        let r = self.player.size;
        if start.y - r < 0 || start.y + r > self.field.height {
            return invalid(format!(
                "player start y {} puts radius {} off-field",
                start.y, r
            ));
        }
        Ok(())
    }
}
