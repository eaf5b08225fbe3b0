//! Platform abstraction layer
//!
//! Handles the browser-facing pieces the simulation never sees:
//! - Held-key tracking
//! - Frame timing
//! - Sprite sheet loading

pub mod assets;
pub mod input;
pub mod time;

pub use assets::{AssetStore, ImageData};
pub use input::{InputState, Key};
pub use time::FrameClock;
