// Camera for the fixed 2D play region

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2};

/// Orthographic camera showing a fixed world region
///
/// The region's top-left corner is world (0, 0) and y grows downward, so
/// world units map straight onto logical window pixels.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Size of the visible world region
    region: Vec2,
    /// View-projection matrix
    view_proj: Mat4,
}

impl Camera {
    /// Create a camera showing `width` x `height` world units
    pub fn new(width: f32, height: f32) -> Self {
        let mut camera = Self {
            region: Vec2::new(width, height),
            view_proj: Mat4::IDENTITY,
        };
        camera.update_view_proj();
        camera
    }

    fn update_view_proj(&mut self) {
        // bottom = height, top = 0 flips y so it points down
        self.view_proj = Mat4::orthographic_rh(
            0.0,
            self.region.x,
            self.region.y,
            0.0,
            -1.0, // Near plane
            1.0,  // Far plane
        );
    }

    /// Size of the visible world region
    pub fn region(&self) -> Vec2 {
        self.region
    }

    /// Get the view-projection matrix
    pub fn view_proj_matrix(&self) -> Mat4 {
        self.view_proj
    }
}

/// Camera uniform for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    /// Create a new camera uniform from a camera
    pub fn new(camera: &Camera) -> Self {
        Self {
            view_proj: camera.view_proj_matrix().to_cols_array_2d(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn to_clip(camera: &Camera, world_pos: Vec2) -> Vec2 {
        let clip = CameraUniform::new(camera).view_proj;
        let clip = Mat4::from_cols_array_2d(&clip) * world_pos.extend(0.0).extend(1.0);
        Vec2::new(clip.x, clip.y)
    }

    #[test]
    fn test_corners_map_to_clip_space() {
        let camera = Camera::new(1200.0, 700.0);

        let top_left = to_clip(&camera, Vec2::ZERO);
        assert_relative_eq!(top_left.x, -1.0, epsilon = 1e-5);
        assert_relative_eq!(top_left.y, 1.0, epsilon = 1e-5);

        let bottom_right = to_clip(&camera, Vec2::new(1200.0, 700.0));
        assert_relative_eq!(bottom_right.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(bottom_right.y, -1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_centre_maps_to_origin() {
        let camera = Camera::new(1200.0, 700.0);
        let centre = to_clip(&camera, Vec2::new(600.0, 350.0));
        assert_relative_eq!(centre.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(centre.y, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_region() {
        let camera = Camera::new(1200.0, 700.0);
        assert_eq!(camera.region(), Vec2::new(1200.0, 700.0));
    }
}
