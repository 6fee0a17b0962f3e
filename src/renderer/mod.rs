//! WebGPU rendering module
//!
//! The scene is built on the CPU as flat-colored triangles in playfield
//! pixels; the pipeline letterboxes them into the canvas.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::SceneStyle;
pub use vertex::Vertex;
