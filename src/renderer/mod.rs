//! WebGPU rendering module
//!
//! Flat-colored triangle lists: the scene builder emits world-space
//! vertices and the pipeline maps them to the canvas.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::build_scene;
