//! Fixed-timestep stage driver
//!
//! Owns the registry and the physics system, turns variable frame times
//! into fixed ticks, and carries out the deletions each tick reports.

use super::registry::Registry;
use super::tick::{EntityChanges, PhysicsSystem};
use crate::settings::Settings;

pub struct Stage {
    registry: Registry,
    physics: PhysicsSystem,
    settings: Settings,
    accumulator: f32,
    /// Ticks run since creation
    ticks: u64,
}

impl Stage {
    pub fn new(mut registry: Registry, settings: Settings) -> Self {
        let settings = settings.sanitized();
        // The snapshot already covers everything spawned so far
        registry.drain_events();
        let physics = PhysicsSystem::new(&registry);
        log::info!(
            "Stage ready: {} entities, dt={}s, max {} substeps",
            registry.len(),
            settings.fixed_dt,
            settings.max_substeps
        );
        Self {
            registry,
            physics,
            settings,
            accumulator: 0.0,
            ticks: 0,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Mutable access for spawning and editing between frames.
    /// Changes are picked up at the start of the next tick.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn physics(&self) -> &PhysicsSystem {
        &self.physics
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Run one fixed tick and destroy what it reported
    pub fn step(&mut self) -> EntityChanges {
        self.physics.sync(&mut self.registry);
        let changes = self.physics.tick(&mut self.registry, self.settings.fixed_dt);
        for &entity in &changes.deleted {
            self.registry.despawn(entity);
        }
        self.physics.sync(&mut self.registry);
        self.ticks += 1;
        changes
    }

    /// Advance by a frame's worth of wall time.
    ///
    /// Runs as many fixed ticks as fit, capped at `max_substeps`; leftover
    /// time carries over to the next frame.
    pub fn advance(&mut self, frame_dt: f32) -> EntityChanges {
        let frame_dt = if frame_dt.is_finite() { frame_dt.max(0.0) } else { 0.0 };
        self.accumulator += frame_dt.min(self.settings.max_frame_dt);

        let mut changes = EntityChanges::default();
        let mut substeps = 0;
        while self.accumulator >= self.settings.fixed_dt && substeps < self.settings.max_substeps {
            changes.merge(self.step());
            self.accumulator -= self.settings.fixed_dt;
            substeps += 1;
        }

        if substeps == self.settings.max_substeps && self.accumulator >= self.settings.fixed_dt {
            log::warn!(
                "dropping {:.4}s of simulation after {} substeps",
                self.accumulator,
                substeps
            );
            self.accumulator = 0.0;
        }
        changes
    }
}
