//! Presentation layer
//!
//! `views` maps simulation state to a `Scene` without touching it;
//! `shapes` tessellates the scene and `pipeline` draws it with WebGPU.

pub mod font;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod sprites;
pub mod vertex;
pub mod views;

pub use pipeline::RenderState;
pub use scene::{DrawCommand, PostFx, Scene, TextEffect};
pub use views::{breakout_scene, bubbles_scene};
