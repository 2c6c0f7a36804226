//! Vertex format shared by every layer
//!
//! Scene code emits vertices in pixel space (origin top left, y down) with
//! straight (non-premultiplied) RGBA. `RenderState::render` maps positions to
//! NDC on upload and the shader premultiplies the color.

use bytemuck::{Pod, Zeroable};

/// One corner of a flat-colored triangle
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    /// Buffer layout: `position` at location 0, `color` at location 1
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Neon palette, straight alpha
pub mod colors {
    /// #ff44cc
    pub const NEON_PINK: [f32; 4] = [1.0, 0.267, 0.8, 1.0];
    /// rgba(255, 68, 204, 0.8)
    pub const PADDLE_GLOW: [f32; 4] = [1.0, 0.267, 0.8, 0.8];
    /// rgb(255, 100, 255), alpha set per frame from the glow pulse
    pub const OBJECT_GLOW: [f32; 4] = [1.0, 0.392, 1.0, 1.0];
    /// Clear color of the background layer
    pub const BACKGROUND: [f32; 4] = [0.02, 0.0, 0.05, 1.0];
    /// Clear color of the gameplay layer, so the background shows through
    pub const TRANSPARENT: [f32; 4] = [0.0, 0.0, 0.0, 0.0];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_matches_struct() {
        let layout = Vertex::desc();
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.attributes.len(), 2);
        assert_eq!(layout.attributes[0].offset, 0);
        assert_eq!(layout.attributes[1].offset, 8);
        assert_eq!(layout.attributes[1].shader_location, 1);
    }
}
