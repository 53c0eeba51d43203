//! WebGPU rendering module
//!
//! `scene` builds a vertex list from the game state on the CPU; `pipeline`
//! uploads it and draws it as flat-colored triangles.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::build_scene;
pub use vertex::Vertex;
