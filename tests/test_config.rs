use side_shooter::config::*;
use side_shooter::entities::Point;

#[test]
fn defaults_match_device_build() {
    let c = GameConfig::default();
    assert_eq!((c.field.width, c.field.height), (128, 64));
    assert_eq!(c.player_start(), Point::new(119, 32));
    assert_eq!(c.enemy.spawn_threshold_min, 40);
    assert_eq!(c.enemy.spawn_threshold_max, 90);
    assert_eq!(c.projectile.spawn_threshold, 20);
    assert_eq!(c.game_over_wait_ms(), 5_000);
    assert!(c.validate().is_ok());
}

#[test]
fn partial_json_falls_back_to_defaults() {
    let c = GameConfig::from_json_str(r#"{ "enemy": { "speed": 2 }, "game_over_wait_secs": 3 }"#)
        .unwrap();
    assert_eq!(c.enemy.speed, 2);
    assert_eq!(c.enemy.size_max, 5);
    assert_eq!(c.game_over_wait_secs, 3);
    assert_eq!(c.field, FieldConfig::default());
}

#[test]
fn explicit_player_start_is_used() {
    let c = GameConfig::from_json_str(r#"{ "player": { "start": [100, 20] } }"#).unwrap();
    assert_eq!(c.player_start(), Point::new(100, 20));
}

#[test]
fn json_round_trips_through_serde() {
    let c = GameConfig::default();
    let json = serde_json::to_string(&c).unwrap();
    assert_eq!(GameConfig::from_json_str(&json).unwrap(), c);
}

#[test]
fn malformed_json_is_parse_error() {
    let err = GameConfig::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn rejects_empty_enemy_size_range() {
    let err = GameConfig::from_json_str(r#"{ "enemy": { "size_min": 5, "size_max": 5 } }"#)
        .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn rejects_inverted_thresholds_and_floors() {
    let mut c = GameConfig::default();
    c.enemy.spawn_threshold_min = 100;
    assert!(c.validate().is_err());

    let mut c = GameConfig::default();
    c.difficulty.min_threshold_floor = 30;
    assert!(c.validate().is_err());

    let mut c = GameConfig::default();
    c.difficulty.interval_ms = 0;
    assert!(c.validate().is_err());
}

#[test]
fn rejects_player_start_off_field() {
    let mut c = GameConfig::default();
    c.player.start = Some((100, 4));
    assert!(c.validate().is_err());
}

#[test]
fn missing_file_is_io_error() {
    let err = GameConfig::load("/nonexistent/side_shooter.json").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("side_shooter.json"));
}
