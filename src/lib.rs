//! R-Type physics - per-frame movement and collision resolution
//!
//! Core modules:
//! - `sim`: Deterministic simulation (registry, membership, integration, collisions)
//! - `scene`: Serializable entity descriptions and seeded scene generation
//! - `settings`: Runtime timing and demo parameters
//! - `error`: Errors for the I/O surfaces

pub mod error;
pub mod scene;
pub mod settings;
pub mod sim;

pub use error::{Error, Result};
pub use scene::Scene;
pub use settings::Settings;

/// Simulation constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame time fed into the accumulator
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Screen edges checked for leaving the screen. Only top and left exist:
    /// the stage scrolls right, and bodies spawn below/right of the view.
    pub const SCREEN_LEFT: f32 = 0.0;
    pub const SCREEN_TOP: f32 = 0.0;

    /// Visible area used when generating scenes
    pub const STAGE_WIDTH: f32 = 1280.0;
    pub const STAGE_HEIGHT: f32 = 720.0;
}
