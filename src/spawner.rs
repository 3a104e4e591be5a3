//! Accumulator-driven spawning.
//!
//! Each spawner counts ticks until its counter reaches a threshold, then
//! spawns one entity and starts over.  The counter is the only state that
//! carries across a tick with no spawn.

use rand::Rng;

use crate::config::{EnemyConfig, FieldConfig, ProjectileConfig};
use crate::entities::{EntityId, EntityKind, Point, World};

/// Uniform draw from `[low, high)`, collapsing to `low` when the range is empty.
pub fn random_in(rng: &mut impl Rng, low: i32, high: i32) -> i32 {
    if low < high {
        rng.gen_range(low..high)
    } else {
        low
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnemySpawner {
    accumulator: u32,
    threshold_min: u32,
    threshold_max: u32,
}

impl EnemySpawner {
    pub fn new(config: &EnemyConfig) -> Self {
        Self {
            accumulator: 0,
            threshold_min: config.spawn_threshold_min,
            threshold_max: config.spawn_threshold_max,
        }
    }

    pub fn accumulator(&self) -> u32 {
        self.accumulator
    }

    pub fn thresholds(&self) -> (u32, u32) {
        (self.threshold_min, self.threshold_max)
    }

    pub fn set_thresholds(&mut self, min: u32, max: u32) {
        self.threshold_min = min;
        self.threshold_max = max;
    }

    /// Back to the session-start thresholds.  The accumulator is kept.
    pub fn reset_thresholds(&mut self, config: &EnemyConfig) {
        self.set_thresholds(config.spawn_threshold_min, config.spawn_threshold_max);
    }

    /// Redraws the threshold every call, so the wait between spawns is
    /// resampled rather than fixed once.
    pub fn step(
        &mut self,
        world: &mut World,
        field: &FieldConfig,
        config: &EnemyConfig,
        rng: &mut impl Rng,
    ) -> Option<EntityId> {
        let threshold = if self.threshold_min < self.threshold_max {
            rng.gen_range(self.threshold_min..self.threshold_max)
        } else {
            self.threshold_min
        };

        if self.accumulator < threshold {
            self.accumulator += 1;
            return None;
        }

        let size = random_in(rng, config.size_min, config.size_max);
        let y = random_in(rng, size, field.height - size);
        let id = world.spawn(config.spawn_x, y, config.speed, 0, size, EntityKind::Enemy);
        log::trace!("spawned enemy {} at y={} size={}", id, y, size);
        self.accumulator = 0;
        Some(id)
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProjectileSpawner {
    accumulator: u32,
}

impl ProjectileSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accumulator(&self) -> u32 {
        self.accumulator
    }

    /// Fires from `origin` toward negative x once the fixed threshold is met.
    /// With no origin (no player) the counter holds at the threshold.
    pub fn step(
        &mut self,
        world: &mut World,
        origin: Option<Point>,
        config: &ProjectileConfig,
    ) -> Option<EntityId> {
        if self.accumulator < config.spawn_threshold {
            self.accumulator += 1;
            return None;
        }

        let origin = origin?;
        let id = world.spawn(
            origin.x,
            origin.y,
            -config.speed,
            0,
            config.size,
            EntityKind::Projectile,
        );
        log::trace!("fired projectile {} from ({}, {})", id, origin.x, origin.y);
        self.accumulator = 0;
        Some(id)
    }
}
