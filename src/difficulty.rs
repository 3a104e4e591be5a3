//! Time-gated difficulty ramp.
//!
//! Every `interval_ms` the enemy spawn thresholds drop by `step`, each
//! clamped at its own floor.  Nothing raises them again until a new game.

use crate::config::DifficultyConfig;
use crate::spawner::EnemySpawner;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Difficulty {
    last_update_ms: u64,
}

impl Difficulty {
    pub fn new(now_ms: u64) -> Self {
        Self {
            last_update_ms: now_ms,
        }
    }

    pub fn last_update_ms(&self) -> u64 {
        self.last_update_ms
    }

    pub fn reset(&mut self, now_ms: u64) {
        self.last_update_ms = now_ms;
    }

    /// Returns `true` if the interval elapsed and the gate fired, even when
    /// both thresholds were already at their floors.
    pub fn step(
        &mut self,
        now_ms: u64,
        config: &DifficultyConfig,
        spawner: &mut EnemySpawner,
    ) -> bool {
        if now_ms.saturating_sub(self.last_update_ms) < config.interval_ms {
            return false;
        }
        self.last_update_ms = now_ms;

        let (min, max) = spawner.thresholds();
        let new_min = decay(min, config.step, config.min_threshold_floor);
        let new_max = decay(max, config.step, config.max_threshold_floor);
        if (new_min, new_max) != (min, max) {
            log::debug!("spawn thresholds {}..{} -> {}..{}", min, max, new_min, new_max);
            spawner.set_thresholds(new_min, new_max);
        }
        true
    }
}

/// Move `value` down by `step` without crossing `floor`.  A value already
/// below the floor is left alone.
fn decay(value: u32, step: u32, floor: u32) -> u32 {
    if value <= floor {
        value
    } else {
        value.saturating_sub(step).max(floor)
    }
}
