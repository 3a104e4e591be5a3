//! Game objects and the world that owns them.
//!
//! Entities are plain data.  The only way to create one is through
//! [`World::spawn`], so every entity is tracked from the moment it exists
//! until a reap pass drops it.

use std::fmt;

// ── Geometry ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A filled circle: centre plus radius.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Circle {
    pub center: Point,
    pub radius: i32,
}

/// A filled triangle given as apex and the two base corners.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Triangle {
    pub apex: Point,
    pub base_top: Point,
    pub base_bottom: Point,
}

/// tan(30°): half the base width of an equilateral triangle per unit of size.
const TRIANGLE_HALF_WIDTH: f32 = 0.577_35;

// ── Entity ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Player,
    Enemy,
    Projectile,
}

/// Stable identity of an entity.  Never reused within one `World`, even
/// across `clear()`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug)]
pub struct Entity {
    pub x: i32,
    pub y: i32,
    pub dx: i32,
    pub dy: i32,
    /// Radius in pixels.  Zero makes the entity a point.
    pub size: i32,
    id: EntityId,
    kind: EntityKind,
    destroyed: bool,
}

impl Entity {
    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn set_position(&mut self, p: Point) {
        self.x = p.x;
        self.y = p.y;
    }

    /// Flag for removal on the next reap.  Idempotent; there is no way back.
    pub fn destroy(&mut self) {
        self.destroyed = true;
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// One Euler step: position += velocity.
    pub fn update(&mut self) {
        self.x += self.dx;
        self.y += self.dy;
    }

    pub fn circle(&self) -> Circle {
        Circle {
            center: self.position(),
            radius: self.size,
        }
    }

    /// Outline used for the player ship, pointing toward negative x.
    pub fn triangle(&self) -> Triangle {
        let s = self.size;
        let half_w = (s as f32 * TRIANGLE_HALF_WIDTH) as i32;
        Triangle {
            apex: Point::new(self.x - s / 2, self.y),
            base_top: Point::new(self.x + s / 2, self.y - half_w),
            base_bottom: Point::new(self.x + s / 2, self.y + half_w),
        }
    }
}

// ── World ─────────────────────────────────────────────────────────────────────

/// Ordered, owning collection of every entity in play.
///
/// Order is insertion order and carries no priority.  Removal only happens
/// in [`World::reap`] and [`World::clear`], both called between ticks, so
/// indices are stable for the duration of a tick.
#[derive(Clone, Debug, Default)]
pub struct World {
    entities: Vec<Entity>,
    next_id: u32,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create and register an entity in one step.
    pub fn spawn(
        &mut self,
        x: i32,
        y: i32,
        dx: i32,
        dy: i32,
        size: i32,
        kind: EntityKind,
    ) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.entities.push(Entity {
            x,
            y,
            dx,
            dy,
            size: size.max(0),
            id,
            kind,
            destroyed: false,
        });
        id
    }

    /// Drop every destroyed entity, keeping survivors in their original order.
    /// Returns how many were removed.
    pub fn reap(&mut self) -> usize {
        let before = self.entities.len();
        self.entities.retain(|e| !e.destroyed);
        before - self.entities.len()
    }

    /// Drop everything.  Ids keep counting up.
    pub fn clear(&mut self) {
        self.entities.clear();
    }

    /// Mark every entity destroyed, whatever its kind.
    pub fn destroy_all(&mut self) {
        for e in &mut self.entities {
            e.destroy();
        }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Number of entities not yet flagged destroyed.
    pub fn live_count(&self) -> usize {
        self.entities.iter().filter(|e| !e.destroyed).count()
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Entity> {
        self.entities.iter_mut()
    }

    /// Index-based view for pairwise scans.
    pub fn as_mut_slice(&mut self) -> &mut [Entity] {
        &mut self.entities
    }

    /// The first live player, if any.
    pub fn player(&self) -> Option<&Entity> {
        self.entities
            .iter()
            .find(|e| e.kind == EntityKind::Player && !e.destroyed)
    }

    pub fn player_mut(&mut self) -> Option<&mut Entity> {
        self.entities
            .iter_mut()
            .find(|e| e.kind == EntityKind::Player && !e.destroyed)
    }

    pub fn count_kind(&self, kind: EntityKind) -> usize {
        self.entities
            .iter()
            .filter(|e| e.kind == kind && !e.destroyed)
            .count()
    }
}
