//! Game simulation module
//!
//! All gameplay logic lives here. No rendering, audio or DOM access:
//! - Variable timestep, clamped by the caller-supplied tuning
//! - Seeded RNG only
//! - Side effects reported as `GameEvent`s

pub mod collision;
pub mod spawn;
pub mod sprite;
pub mod state;
pub mod tick;

pub use collision::{box_collides, check_collisions, collides};
pub use spawn::{spawn_entities, spawn_probability};
pub use sprite::{Animator, FrameRect, SheetId, Sprite};
pub use state::{Bullet, Direction, Entity, GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
