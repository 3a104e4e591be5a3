use proptest::prelude::*;

use side_shooter::collision::circles_overlap;
use side_shooter::config::GameConfig;
use side_shooter::difficulty::Difficulty;
use side_shooter::entities::*;
use side_shooter::spawner::EnemySpawner;

fn any_circle() -> impl Strategy<Value = Circle> {
    (any::<i32>(), any::<i32>(), 0..i32::MAX).prop_map(|(x, y, radius)| Circle {
        center: Point::new(x, y),
        radius,
    })
}

fn any_kind() -> impl Strategy<Value = EntityKind> {
    prop_oneof![
        Just(EntityKind::Player),
        Just(EntityKind::Enemy),
        Just(EntityKind::Projectile),
    ]
}

proptest! {
    #[test]
    fn overlap_is_symmetric(a in any_circle(), b in any_circle(), padding in -4i32..4) {
        prop_assert_eq!(circles_overlap(a, b, padding), circles_overlap(b, a, padding));
    }

    #[test]
    fn reap_keeps_exactly_the_survivors_in_order(
        entities in prop::collection::vec((any_kind(), any::<bool>()), 0..40)
    ) {
        let mut world = World::new();
        let mut expected = Vec::new();
        for (kind, doomed) in &entities {
            let id = world.spawn(0, 0, 0, 0, 1, *kind);
            if *doomed {
                world.get_mut(id).unwrap().destroy();
            } else {
                expected.push(id);
            }
        }

        world.reap();
        let left: Vec<_> = world.iter().map(|e| e.id()).collect();
        prop_assert_eq!(&left, &expected);
        prop_assert_eq!(world.reap(), 0);
    }

    #[test]
    fn destroyed_flag_never_clears(steps in 0usize..20, dx in -5i32..5, dy in -5i32..5) {
        let mut world = World::new();
        let id = world.spawn(0, 0, dx, dy, 2, EntityKind::Enemy);
        let e = world.get_mut(id).unwrap();
        e.destroy();
        for _ in 0..steps {
            e.update();
            e.destroy();
            prop_assert!(e.is_destroyed());
        }
    }

    #[test]
    fn thresholds_never_cross_floors(
        step in 0u32..50,
        gaps in prop::collection::vec(0u64..12_000, 0..60),
    ) {
        let mut config = GameConfig::default();
        config.difficulty.step = step;
        let d = config.difficulty.clone();
        let mut spawner = EnemySpawner::new(&config.enemy);
        let mut difficulty = Difficulty::new(0);
        let mut now = 0;
        let mut last = spawner.thresholds();

        for gap in gaps {
            now += gap;
            let fired = difficulty.step(now, &d, &mut spawner);
            let (min, max) = spawner.thresholds();
            prop_assert!(min >= d.min_threshold_floor);
            prop_assert!(max >= d.max_threshold_floor);
            prop_assert!(min <= last.0 && max <= last.1);
            if !fired {
                prop_assert_eq!((min, max), last);
            }
            last = (min, max);
        }
    }
}
