//! The game state machine.
//!
//! [`Game::tick`] is the whole per-frame step.  It never blocks: the
//! game-over countdown compares a latched timestamp against the clock on
//! every call.  All randomness comes through the injected RNG, so a seeded
//! RNG and a manual clock make a run reproducible.

use rand::Rng;

use crate::collision::{resolve_player_hit, resolve_projectile_hits, DamagePolicy};
use crate::config::GameConfig;
use crate::difficulty::Difficulty;
use crate::entities::{EntityKind, Point, World};
use crate::platform::{Clock, InputSource, Renderer};
use crate::spawner::{EnemySpawner, ProjectileSpawner};

pub const GAME_OVER_TITLE: &str = "Game Over";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// What the game-over screen shows on one tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameOverSummary {
    pub title: &'static str,
    pub score: u32,
    pub best_score: u32,
    /// Whole seconds left before the restart, never negative.
    pub remaining_secs: u64,
}

/// Per-session bookkeeping owned by the state machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub score: u32,
    /// Best score seen by this process.  Survives restarts, not power cycles.
    pub best_score: u32,
    pub game_over: bool,
    /// Clock reading on the first game-over tick.
    pub game_over_since: Option<u64>,
    /// Where input has steered the player; applied during dispatch.
    pub player_target: Point,
}

impl Session {
    fn new(player_target: Point) -> Self {
        Self {
            score: 0,
            best_score: 0,
            game_over: false,
            game_over_since: None,
            player_target,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Game {
    config: GameConfig,
    world: World,
    session: Session,
    enemy_spawner: EnemySpawner,
    projectile_spawner: ProjectileSpawner,
    difficulty: Difficulty,
    policy: DamagePolicy,
}

impl Game {
    /// Fresh game with a single player at the start position.
    pub fn new(config: GameConfig, now_ms: u64) -> Self {
        let start = config.player_start();
        let policy = DamagePolicy {
            points_per_hit: config.scoring.points_per_hit,
            padding: config.scoring.projectile_hit_padding,
            enemy_size_min: config.enemy.size_min,
            enemy_size_max: config.enemy.size_max,
        };
        let mut game = Self {
            world: World::new(),
            session: Session::new(start),
            enemy_spawner: EnemySpawner::new(&config.enemy),
            projectile_spawner: ProjectileSpawner::new(),
            difficulty: Difficulty::new(now_ms),
            policy,
            config,
        };
        game.spawn_player();
        game
    }

    pub fn status(&self) -> GameStatus {
        if self.session.game_over {
            GameStatus::GameOver
        } else {
            GameStatus::Playing
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn score(&self) -> u32 {
        self.session.score
    }

    pub fn enemy_spawner(&self) -> &EnemySpawner {
        &self.enemy_spawner
    }

    pub fn projectile_spawner(&self) -> &ProjectileSpawner {
        &self.projectile_spawner
    }

    pub fn difficulty(&self) -> &Difficulty {
        &self.difficulty
    }

    /// Advance one frame.  Destroyed entities from the previous tick are
    /// reaped first in either state.
    pub fn tick<R: Renderer>(
        &mut self,
        clock: &impl Clock,
        input: &mut impl InputSource,
        renderer: &mut R,
        rng: &mut impl Rng,
    ) -> Result<GameStatus, R::Error> {
        let now = clock.now_millis();
        renderer.clear_frame()?;
        self.world.reap();

        if self.session.game_over {
            self.tick_game_over(now, renderer)?;
        } else {
            self.tick_playing(now, input, renderer, rng)?;
        }

        renderer.present_frame()?;
        Ok(self.status())
    }

    // ── Playing ───────────────────────────────────────────────────────────────

    fn tick_playing<R: Renderer>(
        &mut self,
        now: u64,
        input: &mut impl InputSource,
        renderer: &mut R,
        rng: &mut impl Rng,
    ) -> Result<(), R::Error> {
        let width = self.config.field.width;
        let target = self.session.player_target;

        for e in self.world.iter_mut() {
            match e.kind() {
                EntityKind::Player => {
                    renderer.draw_triangle(e.triangle())?;
                    e.set_position(target);
                }
                EntityKind::Enemy => {
                    renderer.draw_circle(e.circle())?;
                    if e.x > width + e.size {
                        e.destroy();
                    }
                }
                EntityKind::Projectile => {
                    renderer.draw_circle(e.circle())?;
                    if e.x < e.size {
                        e.destroy();
                    }
                }
            }
        }

        if resolve_player_hit(&mut self.world) {
            self.enter_game_over();
            return Ok(());
        }

        let points = resolve_projectile_hits(&mut self.world, &self.policy);
        self.session.score = self.session.score.saturating_add(points);

        for e in self.world.iter_mut().filter(|e| !e.is_destroyed()) {
            e.update();
        }

        self.steer_player(input);

        self.difficulty
            .step(now, &self.config.difficulty, &mut self.enemy_spawner);
        self.enemy_spawner
            .step(&mut self.world, &self.config.field, &self.config.enemy, rng);
        let origin = self.world.player().map(|p| p.position());
        self.projectile_spawner
            .step(&mut self.world, origin, &self.config.projectile);

        Ok(())
    }

    /// Keeps the player's full radius inside the field vertically.
    fn steer_player(&mut self, input: &mut impl InputSource) {
        let speed = self.config.player.speed;
        let r = self.config.player.size;
        let bottom = self.config.field.height - r;
        let target = &mut self.session.player_target;

        if input.move_up() {
            target.y = (target.y - speed).max(r);
        }
        if input.move_down() {
            target.y = (target.y + speed).min(bottom);
        }
    }

    fn enter_game_over(&mut self) {
        let s = &mut self.session;
        s.game_over = true;
        s.best_score = s.best_score.max(s.score);
        log::info!("Player hit - final score {}, best {}", s.score, s.best_score);
    }

    // ── Game over ─────────────────────────────────────────────────────────────

    fn tick_game_over<R: Renderer>(&mut self, now: u64, renderer: &mut R) -> Result<(), R::Error> {
        let since = *self.session.game_over_since.get_or_insert(now);
        let elapsed_ms = now.saturating_sub(since);

        let summary = GameOverSummary {
            title: GAME_OVER_TITLE,
            score: self.session.score,
            best_score: self.session.best_score,
            remaining_secs: self
                .config
                .game_over_wait_secs
                .saturating_sub(elapsed_ms / 1000),
        };
        renderer.draw_game_over(&summary)?;

        if elapsed_ms < self.config.game_over_wait_ms() {
            return Ok(());
        }
        self.restart(now);
        Ok(())
    }

    fn restart(&mut self, now: u64) {
        self.session.score = 0;
        self.session.game_over = false;
        self.session.game_over_since = None;
        self.session.player_target = self.config.player_start();
        self.enemy_spawner.reset_thresholds(&self.config.enemy);
        self.difficulty.reset(now);
        self.world.clear();
        self.spawn_player();
        log::info!("Restarting");
    }

    fn spawn_player(&mut self) {
        let p = self.session.player_target;
        self.world
            .spawn(p.x, p.y, 0, 0, self.config.player.size, EntityKind::Player);
    }
}
