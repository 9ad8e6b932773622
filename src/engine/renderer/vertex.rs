// Vertex structure for flat-colored 2D shapes

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec4};

/// Vertex for shape rendering
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Position in world space
    pub position: [f32; 2],
    /// Vertex color (RGBA)
    pub color: [f32; 4],
}

impl Vertex {
    /// Create a new vertex
    pub fn new(position: Vec2, color: Vec4) -> Self {
        Self {
            position: position.to_array(),
            color: color.to_array(),
        }
    }

    /// Get the vertex buffer layout descriptor
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // Position
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                // Color
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout_matches_struct() {
        let layout = Vertex::desc();
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.attributes[1].offset, 8);
    }
}
