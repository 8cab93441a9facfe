// JSON config loading and world snapshots (feature `serde_json`).
#![cfg(feature = "serde_json")]

use bus_runner::{GameConfig, World, parse_config};

#[test]
fn partial_json_falls_back_to_defaults() {
    let config = parse_config(r#"{ "weather_period": 120, "obstacle_chance": 0.1 }"#).unwrap();
    assert_eq!(config.weather_period, 120);
    assert_eq!(config.obstacle_chance, 0.1);
    assert_eq!(config.biome_period, GameConfig::default().biome_period);
    assert_eq!(config.canvas_width, 800.0);
}

#[test]
fn invalid_values_are_rejected_with_field_name() {
    let err = parse_config(r#"{ "tree_chance": 2.0 }"#).unwrap_err();
    assert!(err.contains("tree_chance"), "{err}");

    let err = parse_config(r#"{ "biome_period": "soon" }"#).unwrap_err();
    assert!(!err.is_empty());
}

#[test]
fn world_snapshot_serializes_public_state() {
    let mut world = World::new(GameConfig::default(), 9);
    world.update();
    let json: serde_json::Value = serde_json::to_value(&world).unwrap();
    assert_eq!(json["phase"], "Running");
    assert_eq!(json["weather"], "Sunny");
    assert_eq!(json["score"], 0);
    assert_eq!(json["vehicle"]["y"], 185.0);
    assert!(json.get("rng").is_none());
}
