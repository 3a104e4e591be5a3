//! Side-scrolling shooter core.
//!
//! - `entities`: game objects and the world that owns them
//! - `collision`: circle overlap and hit resolution
//! - `spawner`: accumulator-driven enemy and projectile spawning
//! - `difficulty`: time-gated spawn threshold decay
//! - `compute`: the two-state game machine and its per-tick step
//! - `platform`: clock, input and renderer seams
//! - `config`: tunable constants, loadable from JSON

pub mod collision;
pub mod compute;
pub mod config;
pub mod difficulty;
pub mod entities;
pub mod platform;
pub mod spawner;

pub use compute::{Game, GameOverSummary, GameStatus, Session};
pub use config::{ConfigError, GameConfig};
pub use entities::{Entity, EntityId, EntityKind, World};
