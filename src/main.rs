//! Headless physics runner
//!
//! Usage: `rtype-physics [scene.json] [settings.json]`
//!
//! Without a scene, one is generated from the settings seed. Runs the
//! configured number of frames at the fixed timestep and logs what
//! happened. Set `RUST_LOG=debug` for per-tick detail.

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("R-Type physics (headless) starting...");

    if let Err(e) = run(std::env::args().skip(1).collect()) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: Vec<String>) -> rtype_physics::Result<()> {
    use rtype_physics::sim::{Player, Position, Stage};
    use rtype_physics::{Scene, Settings};

    let settings = match args.get(1) {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let scene = match args.first() {
        Some(path) => Scene::load(path)?,
        None => {
            log::info!("No scene given, generating one with seed {}", settings.seed);
            Scene::generate(&settings)
        }
    };

    let mut stage = Stage::new(scene.to_registry(), settings.clone());
    let mut deleted = 0usize;
    let mut moved_max = 0usize;
    for _ in 0..settings.frames {
        let changes = stage.advance(settings.fixed_dt);
        deleted += changes.deleted.len();
        moved_max = moved_max.max(changes.moved.len());
    }

    let registry = stage.registry();
    log::info!(
        "Ran {} ticks: {} entities despawned, {} left, at most {} moved per frame",
        stage.ticks(),
        deleted,
        registry.len(),
        moved_max
    );
    for (entity, _) in registry.storage::<Player>().iter() {
        if let Some(position) = registry.get::<Position>(entity) {
            log::info!("Player {entity} ended at ({:.1}, {:.1})", position.x, position.y);
        }
    }
    Ok(())
}
