// Rendering system using wgpu

mod camera;
mod shapes;
mod vertex;

pub use camera::{Camera, CameraUniform};
pub use shapes::ShapeRenderer;
pub use vertex::Vertex;

use anyhow::{Context, Result};
use log::{info, warn};
use std::sync::Arc;
use winit::window::Window;

use crate::engine::physics::BodyShape;

/// Drawing surface the game view renders into
pub trait Canvas {
    /// Draw one frame of the world
    fn draw(&mut self, scene: &[BodyShape]) -> Result<()>;

    /// Take the surface off screen; no frame is drawn afterwards
    fn remove(&mut self);

    /// The window backing the surface changed size
    fn resize(&mut self, _width: u32, _height: u32) {}
}

/// Main renderer responsible for initializing wgpu and coordinating rendering
pub struct Renderer {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    camera: Camera,
    shape_renderer: ShapeRenderer,
    removed: bool,
}

impl Renderer {
    /// Create a renderer for `window` showing a `width` x `height` world region
    pub async fn new(window: Arc<Window>, width: f32, height: f32) -> Result<Self> {
        let size = window.inner_size();

        // Create wgpu instance
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // Create surface
        let surface = instance
            .create_surface(window.clone())
            .context("Failed to create window surface")?;

        // Request adapter
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("Failed to find suitable GPU adapter"))?;

        info!("Using GPU: {}", adapter.get_info().name);

        // Request device and queue
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Main Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await
            .context("Failed to open GPU device")?;

        // Configure surface
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("Surface reports no texture formats"))?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &config);

        let camera = Camera::new(width, height);
        let shape_renderer =
            ShapeRenderer::new(&device, surface_format, CameraUniform::new(&camera));

        info!(
            "Renderer initialized with {}x{} resolution showing a {} world region",
            size.width,
            size.height,
            camera.region()
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            camera,
            shape_renderer,
            removed: false,
        })
    }

    /// Reconfigure the surface for a new window size
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            info!("Renderer resized to {}x{}", width, height);
        }
    }

    /// Render a frame
    pub fn render(&mut self, scene: &[BodyShape]) -> Result<()> {
        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("Surface lost, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                warn!("Surface timed out, skipping frame");
                return Ok(());
            }
            Err(e) => return Err(e).context("Failed to acquire surface texture"),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.shape_renderer
            .update_camera(&self.queue, CameraUniform::new(&self.camera));
        self.shape_renderer.prepare(&self.device, &self.queue, scene);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.08,
                            g: 0.08,
                            b: 0.12,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.shape_renderer.render(&mut render_pass);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

impl Canvas for Renderer {
    fn draw(&mut self, scene: &[BodyShape]) -> Result<()> {
        if self.removed {
            return Ok(());
        }
        self.render(scene)
    }

    fn remove(&mut self) {
        if !self.removed {
            self.removed = true;
            self.window.set_visible(false);
            info!("Drawing surface removed");
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        Renderer::resize(self, width, height);
    }
}
