//! Star Dodger - A vertical arcade shooter
//!
//! Core modules:
//! - `sim`: Game simulation (entities, spawning, collisions, game state)
//! - `renderer`: Sprite batching and the WebGPU pipeline
//! - `platform`: Browser plumbing (input, frame clock, asset loading)
//! - `tuning`: Data-driven game balance
//! - `settings`: Audio preferences
//! - `audio`: Music and sound effects
//! - `demo`: Headless autopilot run for the native binary

pub mod audio;
pub mod demo;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{AssetError, RenderError, StartupError, TuningError};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Canvas dimensions (logical pixels)
    pub const CANVAS_WIDTH: f32 = 460.0;
    pub const CANVAS_HEIGHT: f32 = 580.0;

    /// Speeds in pixels per second
    pub const PLAYER_SPEED: f32 = 200.0;
    pub const BULLET_SPEED: f32 = 500.0;
    pub const ENEMY_SPEED: f32 = 100.0;
    pub const ASTEROID_SPEED: f32 = 100.0;

    /// Minimum wall-clock time between volleys (ms)
    pub const FIRE_COOLDOWN_MS: f64 = 100.0;

    /// Spawn probability per tick is `1 - base^game_time`
    pub const ENEMY_SPAWN_BASE: f32 = 0.996;
    pub const ASTEROID_SPAWN_BASE: f32 = 0.9995;

    /// Points for shooting down an enemy
    pub const ENEMY_KILL_SCORE: u64 = 100;

    /// Where the player ship starts after a reset
    pub const PLAYER_START_X: f32 = 190.0;
    pub const PLAYER_START_Y: f32 = 500.0;

    /// Largest frame delta fed to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Delta used for the very first frame after start
    pub const NOMINAL_FRAME_DT: f32 = 1.0 / 60.0;
}
