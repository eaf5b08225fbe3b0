//! Rendering module
//!
//! `batch` records the scene in draw order; `pipeline` turns it into
//! textured quads on a WebGPU surface.

pub mod batch;
pub mod pipeline;
pub mod vertex;

pub use batch::{DrawCommand, SpriteBatch, build_scene};
pub use pipeline::SpriteRenderState;
pub use vertex::{DrawRun, SpriteVertex, Tessellation, tessellate};
