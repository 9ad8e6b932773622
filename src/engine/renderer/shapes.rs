// Flat-colored shape rendering for physics bodies

use glam::{Vec2, Vec4};
use wgpu::util::DeviceExt;

use super::{CameraUniform, Vertex};
use crate::engine::physics::{BodyLabel, BodyShape, Shape};

/// Segments used to approximate a circle
const CIRCLE_SEGMENTS: u32 = 24;

const PIPE_COLOR: Vec4 = Vec4::new(0.36, 0.75, 0.25, 1.0);
const DYNAMIC_COLOR: Vec4 = Vec4::new(0.98, 0.80, 0.20, 1.0);
const STATIC_COLOR: Vec4 = Vec4::new(0.55, 0.45, 0.35, 1.0);

/// Fill color for a body
pub fn color_for(body: &BodyShape) -> Vec4 {
    match body.label {
        Some(BodyLabel::Pipe) => PIPE_COLOR,
        None if body.is_static => STATIC_COLOR,
        None => DYNAMIC_COLOR,
    }
}

/// Triangle list for one frame
#[derive(Debug, Default)]
pub struct ShapeMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl ShapeMesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the mesh from a world snapshot
    pub fn rebuild(&mut self, scene: &[BodyShape]) {
        self.vertices.clear();
        self.indices.clear();

        for body in scene {
            let color = color_for(body);
            match body.shape {
                Shape::Circle { radius } => self.push_circle(body.position, radius, color),
                Shape::Rect { width, height } => {
                    self.push_rect(body.position, body.rotation, width, height, color)
                }
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    fn push_circle(&mut self, center: Vec2, radius: f32, color: Vec4) {
        if radius <= 0.0 {
            return;
        }

        let center_idx = self.vertices.len() as u32;
        self.vertices.push(Vertex::new(center, color));

        for i in 0..CIRCLE_SEGMENTS {
            let angle = (i as f32 / CIRCLE_SEGMENTS as f32) * std::f32::consts::TAU;
            let offset = Vec2::new(angle.cos(), angle.sin()) * radius;
            self.vertices.push(Vertex::new(center + offset, color));

            let next = (i + 1) % CIRCLE_SEGMENTS;
            self.indices.push(center_idx);
            self.indices.push(center_idx + 1 + i);
            self.indices.push(center_idx + 1 + next);
        }
    }

    fn push_rect(&mut self, center: Vec2, rotation: f32, width: f32, height: f32, color: Vec4) {
        // Zero-height pipes have nothing to fill
        if width <= 0.0 || height <= 0.0 {
            return;
        }

        let start_idx = self.vertices.len() as u32;
        let half = Vec2::new(width, height) / 2.0;
        let rot = Vec2::from_angle(rotation);

        let corners = [
            Vec2::new(-half.x, -half.y),
            Vec2::new(half.x, -half.y),
            Vec2::new(half.x, half.y),
            Vec2::new(-half.x, half.y),
        ];
        for corner in corners {
            self.vertices.push(Vertex::new(center + rot.rotate(corner), color));
        }

        self.indices
            .extend([0, 1, 2, 0, 2, 3].iter().map(|i| start_idx + i));
    }
}

/// GPU pipeline drawing a `ShapeMesh`
pub struct ShapeRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    mesh: ShapeMesh,
}

impl ShapeRenderer {
    /// Create a new shape renderer
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat, camera: CameraUniform) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Shape Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/shape.wgsl").into()),
        });

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Shape Uniform Buffer"),
            contents: bytemuck::cast_slice(&[camera]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Shape Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Shape Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Shape Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Shape Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[Vertex::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // The y-down projection flips winding
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        // Create initial buffers (will be resized as needed)
        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Shape Vertex Buffer"),
            size: 4096,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let index_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Shape Index Buffer"),
            size: 4096,
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            pipeline,
            vertex_buffer,
            index_buffer,
            uniform_buffer,
            bind_group,
            mesh: ShapeMesh::new(),
        }
    }

    /// Update the view-projection matrix
    pub fn update_camera(&self, queue: &wgpu::Queue, camera: CameraUniform) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[camera]));
    }

    /// Tessellate the scene and upload it
    pub fn prepare(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, scene: &[BodyShape]) {
        self.mesh.rebuild(scene);
        if self.mesh.is_empty() {
            return;
        }

        let vertex_size = (self.mesh.vertices.len() * std::mem::size_of::<Vertex>()) as u64;
        let index_size = (self.mesh.indices.len() * std::mem::size_of::<u32>()) as u64;

        // Resize buffers if needed
        if vertex_size > self.vertex_buffer.size() {
            self.vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Shape Vertex Buffer"),
                contents: bytemuck::cast_slice(&self.mesh.vertices),
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            });
        } else {
            queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&self.mesh.vertices));
        }

        if index_size > self.index_buffer.size() {
            self.index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Shape Index Buffer"),
                contents: bytemuck::cast_slice(&self.mesh.indices),
                usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            });
        } else {
            queue.write_buffer(&self.index_buffer, 0, bytemuck::cast_slice(&self.mesh.indices));
        }
    }

    /// Draw the prepared geometry
    pub fn render<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        if self.mesh.is_empty() {
            return;
        }

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..self.mesh.indices.len() as u32, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(shape: Shape, is_static: bool, label: Option<BodyLabel>) -> BodyShape {
        BodyShape {
            position: Vec2::new(100.0, 100.0),
            rotation: 0.0,
            shape,
            is_static,
            label,
        }
    }

    #[test]
    fn test_colors_by_kind() {
        let pipe = body(Shape::Rect { width: 50.0, height: 10.0 }, true, Some(BodyLabel::Pipe));
        let wall = body(Shape::Rect { width: 810.0, height: 60.0 }, true, None);
        let bird = body(Shape::Circle { radius: 20.0 }, false, None);

        assert_eq!(color_for(&pipe), PIPE_COLOR);
        assert_eq!(color_for(&wall), STATIC_COLOR);
        assert_eq!(color_for(&bird), DYNAMIC_COLOR);
    }

    #[test]
    fn test_rect_is_two_triangles() {
        let mut mesh = ShapeMesh::new();
        mesh.rebuild(&[body(Shape::Rect { width: 50.0, height: 20.0 }, true, None)]);

        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(mesh.vertices[0].position, [75.0, 90.0]);
        assert_eq!(mesh.vertices[2].position, [125.0, 110.0]);
    }

    #[test]
    fn test_circle_is_a_fan() {
        let mut mesh = ShapeMesh::new();
        mesh.rebuild(&[body(Shape::Circle { radius: 20.0 }, false, None)]);

        assert_eq!(mesh.vertices.len(), 1 + CIRCLE_SEGMENTS as usize);
        assert_eq!(mesh.indices.len(), 3 * CIRCLE_SEGMENTS as usize);
        assert!(mesh.indices.chunks(3).all(|tri| tri[0] == 0));
    }

    #[test]
    fn test_zero_height_rect_is_skipped() {
        let mut mesh = ShapeMesh::new();
        let flat = Shape::Rect {
            width: 50.0,
            height: 0.0,
        };
        mesh.rebuild(&[body(flat, true, Some(BodyLabel::Pipe))]);
        assert!(mesh.is_empty());
    }

    #[test]
    fn test_indices_offset_per_shape() {
        let mut mesh = ShapeMesh::new();
        let rect = body(Shape::Rect { width: 10.0, height: 10.0 }, true, None);
        mesh.rebuild(&[rect, rect]);

        assert_eq!(&mesh.indices[6..], &[4, 5, 6, 4, 6, 7]);

        // Rebuilding starts from scratch
        mesh.rebuild(&[rect]);
        assert_eq!(mesh.vertices.len(), 4);
    }
}
