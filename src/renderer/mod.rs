//! WebGPU rendering module
//!
//! Shapes are tessellated on the CPU in pixel space; each canvas layer has its
//! own surface and pipeline over a shared device.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{GpuContext, RenderState, pixel_to_ndc};
pub use scene::{draw_background, draw_falling_objects, draw_foreground, draw_paddle};
pub use vertex::{Vertex, colors};
