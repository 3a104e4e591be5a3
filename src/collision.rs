//! Circle overlap and hit resolution.
//!
//! Both passes read positions as they stand before this tick's kinematic
//! step.  A destroyed flag set earlier in the same tick does not take an
//! entity out of the world until the next reap.

use crate::entities::{Circle, EntityKind, World};

/// What a projectile hit does to an enemy and to the score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamagePolicy {
    pub points_per_hit: u32,
    pub padding: i32,
    pub enemy_size_min: i32,
    pub enemy_size_max: i32,
}

/// Outcome of one projectile/enemy contact.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hit {
    Shrunk { to: i32 },
    Destroyed,
}

/// `dx² + dy² ≤ (ra + rb + padding)²`, computed in i128 so no
/// i32 position or radius can overflow it.
pub fn circles_overlap(a: Circle, b: Circle, padding: i32) -> bool {
    let dx = i128::from(a.center.x) - i128::from(b.center.x);
    let dy = i128::from(a.center.y) - i128::from(b.center.y);
    let r = i128::from(a.radius) + i128::from(b.radius) + i128::from(padding);
    dx * dx + dy * dy <= r * r
}

impl DamagePolicy {
    /// Large enemies are halved (never below the minimum size) instead of
    /// being destroyed.
    pub fn apply(&self, enemy_size: i32) -> Hit {
        if i64::from(enemy_size) * 2 > i64::from(self.enemy_size_max) {
            Hit::Shrunk {
                to: (enemy_size / 2).max(self.enemy_size_min),
            }
        } else {
            Hit::Destroyed
        }
    }
}

/// Test every projectile against the enemies not yet destroyed.  Each
/// projectile resolves at most one hit, against the earliest enemy in world
/// order, even if it crossed the near border this tick.  Returns the points
/// earned.
pub fn resolve_projectile_hits(world: &mut World, policy: &DamagePolicy) -> u32 {
    let entities = world.as_mut_slice();
    let mut points = 0;

    for pi in 0..entities.len() {
        let projectile = &entities[pi];
        if projectile.kind() != EntityKind::Projectile {
            continue;
        }
        let shot = projectile.circle();

        let target = entities.iter().position(|e| {
            e.kind() == EntityKind::Enemy
                && !e.is_destroyed()
                && circles_overlap(shot, e.circle(), policy.padding)
        });
        let Some(ei) = target else {
            continue;
        };

        match policy.apply(entities[ei].size) {
            Hit::Shrunk { to } => {
                log::trace!("{} shrunk to {}", entities[ei].id(), to);
                entities[ei].size = to;
            }
            Hit::Destroyed => {
                entities[ei].destroy();
                entities[pi].destroy();
            }
        }
        points += policy.points_per_hit;
    }

    points
}

/// Player/enemy contact wipes the whole world.  Every enemy counts, including
/// one flagged destroyed this tick.  Returns `true` when the player was hit;
/// a missing player is a no-op.
pub fn resolve_player_hit(world: &mut World) -> bool {
    let Some(player) = world.player().map(|p| p.circle()) else {
        return false;
    };

    let hit = world
        .iter()
        .any(|e| e.kind() == EntityKind::Enemy && circles_overlap(player, e.circle(), 0));
    if hit {
        world.destroy_all();
    }
    hit
}
