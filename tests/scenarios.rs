//! End-to-end scenarios through the public API

use glam::Vec2;

use rtype_physics::sim::{
    Collidable, PhysicsSystem, Player, Position, Registry, Sprite, Stage, Velocity,
};
use rtype_physics::{Scene, Settings};

fn position_of(registry: &Registry, id: rtype_physics::sim::EntityId) -> Vec2 {
    registry.get::<Position>(id).unwrap().as_vec2()
}

#[test]
fn test_player_stuck_in_corner_stays_put() {
    let mut registry = Registry::new();
    let player = registry
        .spawn()
        .with(Position::new(-1.0, -1.0))
        .with(Sprite::new(2.0, 2.0))
        .with(Velocity::new(-10.0, -10.0))
        .with(Player)
        .id();
    let mut physics = PhysicsSystem::new(&registry);

    let changes = physics.tick(&mut registry, 1.0);
    assert_eq!(position_of(&registry, player), Vec2::new(-1.0, -1.0));
    assert!(changes.deleted.is_empty());
}

#[test]
fn test_push_and_yield_pair() {
    let mut registry = Registry::new();
    let pusher = registry
        .spawn()
        .with(Position::new(0.0, 0.0))
        .with(Sprite::new(10.0, 10.0))
        .with(Velocity::new(5.0, 0.0))
        .with(Collidable::new(2))
        .id();
    let crate_box = registry
        .spawn()
        .with(Position::new(12.0, 0.0))
        .with(Sprite::new(10.0, 10.0))
        .with(Collidable::new(1))
        .id();
    let mut physics = PhysicsSystem::new(&registry);
    physics.tick(&mut registry, 1.0);
    assert_eq!(position_of(&registry, pusher), Vec2::new(5.0, 0.0));
    assert_eq!(position_of(&registry, crate_box), Vec2::new(17.0, 0.0));

    // Raise the box above the pusher: now the pusher yields
    registry.insert(crate_box, Collidable::new(3));
    physics.sync(&mut registry);
    physics.tick(&mut registry, 1.0);
    assert_eq!(position_of(&registry, pusher), Vec2::new(5.0, 0.0));
    assert_eq!(position_of(&registry, crate_box), Vec2::new(17.0, 0.0));
}

#[test]
fn test_player_sliding_along_wall() {
    let mut registry = Registry::new();
    // Player moves diagonally into a wall on its right; only dx is cancelled
    let player = registry
        .spawn()
        .with(Position::new(0.0, 20.0))
        .with(Sprite::new(10.0, 10.0))
        .with(Velocity::new(4.0, 3.0))
        .with(Collidable::new(10))
        .with(Player)
        .id();
    let _wall = registry
        .spawn()
        .with(Position::new(12.0, 0.0))
        .with(Sprite::new(10.0, 100.0))
        .with(Collidable::new(100))
        .id();
    let mut physics = PhysicsSystem::new(&registry);

    for _ in 0..3 {
        physics.tick(&mut registry, 1.0);
    }
    assert_eq!(position_of(&registry, player), Vec2::new(0.0, 29.0));
}

#[test]
fn test_generated_scene_runs_deterministically() {
    let settings = Settings {
        frames: 240,
        ..Default::default()
    };
    let run = || {
        let mut stage = Stage::new(Scene::generate(&settings).to_registry(), settings.clone());
        for _ in 0..settings.frames {
            stage.advance(settings.fixed_dt);
        }
        Scene::capture(stage.registry())
    };
    assert_eq!(run(), run());
}

#[test]
fn test_generated_scene_sheds_departed_enemies() {
    let settings = Settings {
        frames: 600,
        ..Default::default()
    };
    let mut stage = Stage::new(Scene::generate(&settings).to_registry(), settings.clone());
    let initial = stage.registry().len();

    let mut deleted = 0;
    for _ in 0..settings.frames {
        deleted += stage.advance(settings.fixed_dt).deleted.len();
    }
    assert!(deleted > 0);
    assert_eq!(stage.registry().len(), initial - deleted);
    // Walls and the player never carry the despawn flag
    assert_eq!(stage.registry().storage::<Player>().count(), 1);
}

#[test]
fn test_enemies_flying_left_are_despawned() {
    let mut registry = Registry::new();
    let enemy = registry
        .spawn()
        .with(Position::new(20.0, 50.0).with_despawn())
        .with(Sprite::centered(10.0, 10.0))
        .with(Velocity::new(-600.0, 0.0))
        .with(Collidable::new(1))
        .id();
    let settings = Settings {
        fixed_dt: 0.05,
        max_substeps: 8,
        max_frame_dt: 1.0,
        ..Default::default()
    };
    let mut stage = Stage::new(registry, settings);
    // 20 + 5 half-width = 25 px to clear the edge at 30 px per tick
    let changes = stage.advance(0.05);
    assert!(changes.deleted.contains(&enemy));
    assert!(!stage.registry().is_alive(enemy));
}
