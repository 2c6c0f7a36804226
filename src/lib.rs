//! Neon Catch - a falling-block catching arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (paddle, falling objects, progression)
//! - `background`: Ambient starfield and scrolling grid
//! - `game`: Lifecycle state machine driving the simulation and its effects
//! - `hud`: Score/time/level text
//! - `renderer`: CPU tessellation and the WebGPU pipeline
//! - `platform`: Input mapping and the headless driver
//! - `tuning`: Data-driven game balance

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod background;
pub mod game;
pub mod hud;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::{Action, Cue, Effect, Game, Phase};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, motion constants are per step)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Largest frame delta fed to the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
}

/// Size of a drawable surface in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}
