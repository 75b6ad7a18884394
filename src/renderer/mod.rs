//! WebGPU rendering module
//!
//! The camera looks straight down at the playfield, so every box is drawn as
//! its x/z footprint.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::{box_top_down, scene_vertices};
pub use vertex::Vertex;
