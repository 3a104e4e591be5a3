use side_shooter::config::*;
use side_shooter::entities::*;
use side_shooter::spawner::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// Ticks the enemy spawner until it spawns, returning how many ticks it took.
fn ticks_until_enemy(
    spawner: &mut EnemySpawner,
    world: &mut World,
    config: &GameConfig,
    rng: &mut StdRng,
) -> (u32, EntityId) {
    for t in 1..=10_000 {
        if let Some(id) = spawner.step(world, &config.field, &config.enemy, rng) {
            return (t, id);
        }
    }
    panic!("enemy spawner never fired");
}

// ── random_in ─────────────────────────────────────────────────────────────────

#[test]
fn random_in_stays_in_half_open_range() {
    let mut rng = seeded_rng();
    for _ in 0..1000 {
        let v = random_in(&mut rng, 2, 5);
        assert!((2..5).contains(&v));
    }
}

#[test]
fn random_in_empty_range_returns_low() {
    let mut rng = seeded_rng();
    assert_eq!(random_in(&mut rng, 7, 7), 7);
    assert_eq!(random_in(&mut rng, 9, 3), 9);
}

// ── Enemy spawner ─────────────────────────────────────────────────────────────

#[test]
fn enemy_spawner_waits_at_least_min_threshold() {
    let config = GameConfig::default();
    let mut spawner = EnemySpawner::new(&config.enemy);
    let mut world = World::new();
    let mut rng = seeded_rng();

    let (ticks, _) = ticks_until_enemy(&mut spawner, &mut world, &config, &mut rng);
    // Counter must climb to a threshold in [40, 90) before the spawning call.
    assert!(ticks > 40 && ticks <= 90, "spawned after {ticks} ticks");
    assert_eq!(spawner.accumulator(), 0);
    assert_eq!(world.len(), 1);
}

#[test]
fn enemy_spawns_on_far_side_inside_field() {
    let config = GameConfig::default();
    let mut spawner = EnemySpawner::new(&config.enemy);
    let mut world = World::new();
    let mut rng = seeded_rng();

    for _ in 0..20 {
        let (_, id) = ticks_until_enemy(&mut spawner, &mut world, &config, &mut rng);
        let e = world.get(id).unwrap();
        assert_eq!(e.kind(), EntityKind::Enemy);
        assert_eq!(e.x, -4);
        assert_eq!((e.dx, e.dy), (1, 0));
        assert!((2..5).contains(&e.size));
        assert!(e.y >= e.size && e.y < config.field.height - e.size);
    }
}

#[test]
fn enemy_spawner_miss_only_bumps_accumulator() {
    let config = GameConfig::default();
    let mut spawner = EnemySpawner::new(&config.enemy);
    let mut world = World::new();
    let mut rng = seeded_rng();

    assert!(spawner
        .step(&mut world, &config.field, &config.enemy, &mut rng)
        .is_none());
    assert_eq!(spawner.accumulator(), 1);
    assert!(world.is_empty());
}

#[test]
fn enemy_spawner_with_collapsed_thresholds_is_fixed_rate() {
    let config = GameConfig::default();
    let mut spawner = EnemySpawner::new(&config.enemy);
    spawner.set_thresholds(3, 3);
    let mut world = World::new();
    let mut rng = seeded_rng();

    let (ticks, _) = ticks_until_enemy(&mut spawner, &mut world, &config, &mut rng);
    assert_eq!(ticks, 4);
    let (ticks, _) = ticks_until_enemy(&mut spawner, &mut world, &config, &mut rng);
    assert_eq!(ticks, 4);
}

#[test]
fn reset_thresholds_restores_config_keeps_accumulator() {
    let config = GameConfig::default();
    let mut spawner = EnemySpawner::new(&config.enemy);
    let mut world = World::new();
    let mut rng = seeded_rng();
    spawner.step(&mut world, &config.field, &config.enemy, &mut rng);
    spawner.set_thresholds(10, 25);

    spawner.reset_thresholds(&config.enemy);
    assert_eq!(spawner.thresholds(), (40, 90));
    assert_eq!(spawner.accumulator(), 1);
}

// ── Projectile spawner ────────────────────────────────────────────────────────

#[test]
fn projectile_fires_on_fixed_threshold() {
    let config = ProjectileConfig::default(); // threshold 20
    let mut spawner = ProjectileSpawner::new();
    let mut world = World::new();
    let origin = Some(Point::new(119, 32));

    for _ in 0..20 {
        assert!(spawner.step(&mut world, origin, &config).is_none());
    }
    let id = spawner.step(&mut world, origin, &config).unwrap();
    assert_eq!(spawner.accumulator(), 0);

    let p = world.get(id).unwrap();
    assert_eq!(p.kind(), EntityKind::Projectile);
    assert_eq!(p.position(), Point::new(119, 32));
    assert_eq!((p.dx, p.dy, p.size), (-2, 0, 0));
}

#[test]
fn projectile_holds_without_origin() {
    let config = ProjectileConfig {
        spawn_threshold: 0,
        ..ProjectileConfig::default()
    };
    let mut spawner = ProjectileSpawner::new();
    let mut world = World::new();

    assert!(spawner.step(&mut world, None, &config).is_none());
    assert!(world.is_empty());
    assert!(spawner
        .step(&mut world, Some(Point::new(1, 1)), &config)
        .is_some());
}
