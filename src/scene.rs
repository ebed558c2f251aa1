//! Scene descriptions
//!
//! A scene is a flat list of entity descriptions that can be stored as JSON,
//! spawned into a [`Registry`], or generated from a seed for demos and
//! stress runs.

use std::fs;
use std::path::Path;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{STAGE_HEIGHT, STAGE_WIDTH};
use crate::error::{Error, Result};
use crate::settings::Settings;
use crate::sim::{Block, Collidable, EntityId, Player, Position, Registry, Sprite, Velocity};

/// Priority of the player ship: pushes enemies, yields to walls
pub const PLAYER_PRIORITY: i32 = 10;
/// Priority of wall blocks: nothing pushes them
pub const WALL_PRIORITY: i32 = 100;

/// Components of one entity. Absent fields mean the component is absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityDesc {
    pub position: Option<Position>,
    pub velocity: Option<Velocity>,
    pub sprite: Option<Sprite>,
    pub collidable: Option<Collidable>,
    pub block: bool,
    pub player: bool,
}

impl EntityDesc {
    fn validate(&self, index: usize) -> Result<()> {
        let invalid = |reason: &str| Error::InvalidEntity {
            index,
            reason: reason.to_string(),
        };
        if let Some(position) = &self.position {
            if !(position.x.is_finite() && position.y.is_finite()) {
                return Err(invalid("position is not finite"));
            }
        }
        if let Some(velocity) = &self.velocity {
            if !velocity.0.is_finite() {
                return Err(invalid("velocity is not finite"));
            }
        }
        if let Some(sprite) = &self.sprite {
            if !sprite.size.is_finite() || sprite.size.min_element() < 0.0 {
                return Err(invalid("sprite size must be finite and non-negative"));
            }
        }
        Ok(())
    }

    fn spawn(&self, registry: &mut Registry) -> EntityId {
        registry
            .spawn()
            .maybe(self.position)
            .maybe(self.velocity)
            .maybe(self.sprite)
            .maybe(self.collidable)
            .maybe(self.block.then_some(Block))
            .maybe(self.player.then_some(Player))
            .id()
    }

    fn capture(registry: &Registry, entity: EntityId) -> Self {
        Self {
            position: registry.get::<Position>(entity).copied(),
            velocity: registry.get::<Velocity>(entity).copied(),
            sprite: registry.get::<Sprite>(entity).copied(),
            collidable: registry.get::<Collidable>(entity).copied(),
            block: registry.has::<Block>(entity),
            player: registry.has::<Player>(entity),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub entities: Vec<EntityDesc>,
}

impl Scene {
    /// Parse and validate a JSON scene
    pub fn from_json(json: &str) -> Result<Self> {
        let scene: Scene = serde_json::from_str(json)?;
        for (index, desc) in scene.entities.iter().enumerate() {
            desc.validate(index)?;
        }
        Ok(scene)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let scene = Self::from_json(&fs::read_to_string(path)?)?;
        log::info!("Loaded scene {} ({} entities)", path.display(), scene.entities.len());
        Ok(scene)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path.as_ref(), self.to_json()?)?;
        Ok(())
    }

    /// Build a fresh registry holding this scene, spawned in order
    pub fn to_registry(&self) -> Registry {
        let mut registry = Registry::new();
        for desc in &self.entities {
            desc.spawn(&mut registry);
        }
        registry
    }

    /// Snapshot every live entity, in id order
    pub fn capture(registry: &Registry) -> Self {
        Self {
            entities: registry
                .entities()
                .map(|entity| EntityDesc::capture(registry, entity))
                .collect(),
        }
    }

    /// Side-scrolling test field: one player, static walls, scrolling
    /// blocks, and enemies flying left that despawn past the left edge.
    ///
    /// The same seed always produces the same scene.
    pub fn generate(settings: &Settings) -> Self {
        let mut rng = Pcg32::seed_from_u64(settings.seed);
        let mut entities = Vec::new();

        entities.push(EntityDesc {
            position: Some(Position::new(STAGE_WIDTH * 0.1, STAGE_HEIGHT * 0.5)),
            velocity: Some(Velocity::new(120.0, 0.0)),
            sprite: Some(Sprite::centered(32.0, 16.0)),
            collidable: Some(Collidable::new(PLAYER_PRIORITY)),
            player: true,
            ..Default::default()
        });

        for i in 0..settings.blocks {
            let scrolling = i % 3 == 0;
            entities.push(EntityDesc {
                position: Some(Position::new(
                    rng.random_range(STAGE_WIDTH * 0.3..STAGE_WIDTH),
                    rng.random_range(0.0..STAGE_HEIGHT),
                )),
                velocity: scrolling.then(|| Velocity::new(-40.0, 0.0)),
                sprite: Some(Sprite::new(
                    rng.random_range(16.0..96.0),
                    rng.random_range(16.0..96.0),
                )),
                collidable: Some(Collidable::new(WALL_PRIORITY)),
                block: true,
                ..Default::default()
            });
        }

        for _ in 0..settings.enemies {
            entities.push(EntityDesc {
                position: Some(
                    Position::new(
                        rng.random_range(STAGE_WIDTH * 0.5..STAGE_WIDTH * 1.5),
                        rng.random_range(0.0..STAGE_HEIGHT),
                    )
                    .with_despawn(),
                ),
                velocity: Some(Velocity::new(
                    rng.random_range(-240.0..-60.0),
                    rng.random_range(-30.0..30.0),
                )),
                sprite: Some(Sprite::centered(24.0, 24.0)),
                collidable: Some(Collidable::new(rng.random_range(1..PLAYER_PRIORITY))),
                ..Default::default()
            });
        }

        log::debug!(
            "generated scene seed={} with {} entities",
            settings.seed,
            entities.len()
        );
        Self { entities }
    }
}
