use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use crate::api::game::CameraConfig;

/// Perspective camera looking at a target point, Y-up.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
    projection: Mat4,
}

/// GPU-side uniform data for the camera.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    /// Eye position, w = 1.
    pub position: [f32; 4],
}

impl CameraUniform {
    pub const FLOATS: usize = 36;
}

impl PerspectiveCamera {
    pub fn new(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut cam = Self {
            fov_y_degrees,
            aspect,
            near,
            far,
            position: Vec3::new(0.0, 0.0, 1.0),
            target: Vec3::ZERO,
            projection: Mat4::IDENTITY,
        };
        cam.update_projection_matrix();
        cam
    }

    pub fn from_config(config: &CameraConfig, width: f32, height: f32) -> Self {
        let aspect = if height > 0.0 { width / height } else { 1.0 };
        let mut cam = Self::new(config.fov_y_degrees, aspect, config.near, config.far);
        cam.position = config.position;
        cam.target = config.target;
        cam
    }

    /// Recompute the cached projection after changing fov, aspect or clip planes.
    pub fn update_projection_matrix(&mut self) {
        self.projection = Mat4::perspective_rh(
            self.fov_y_degrees.to_radians(),
            self.aspect,
            self.near,
            self.far,
        );
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    /// Match a new viewport. Returns false (and changes nothing) for a zero height.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        if height <= 0.0 || width <= 0.0 {
            return false;
        }
        self.aspect = width / height;
        self.update_projection_matrix();
        true
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view: self.view_matrix().to_cols_array_2d(),
            projection: self.projection.to_cols_array_2d(),
            position: self.position.extend(1.0).to_array(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_camera() {
        let cam = PerspectiveCamera::from_config(&CameraConfig::default(), 1600.0, 800.0);
        assert!((cam.aspect - 2.0).abs() < 1e-6);
        assert_eq!(cam.position, Vec3::new(0.0, 2.5, 4.0));
        assert_eq!(cam.fov_y_degrees, 75.0);
    }

    #[test]
    fn resize_updates_aspect_and_projection() {
        let mut cam = PerspectiveCamera::new(75.0, 1.0, 0.1, 1000.0);
        let before = cam.projection_matrix();
        assert!(cam.resize(1920.0, 1080.0));
        assert!((cam.aspect - 1920.0 / 1080.0).abs() < 1e-6);
        assert_ne!(before, cam.projection_matrix());
        // x scale = y scale / aspect
        let p = cam.projection_matrix().to_cols_array_2d();
        assert!((p[0][0] - p[1][1] / cam.aspect).abs() < 1e-5);
    }

    #[test]
    fn zero_height_resize_is_ignored() {
        let mut cam = PerspectiveCamera::new(75.0, 1.5, 0.1, 1000.0);
        assert!(!cam.resize(800.0, 0.0));
        assert_eq!(cam.aspect, 1.5);
    }

    #[test]
    fn view_maps_target_onto_negative_z() {
        let mut cam = PerspectiveCamera::new(75.0, 1.0, 0.1, 1000.0);
        cam.position = Vec3::new(0.0, 0.0, 5.0);
        let p = cam.view_matrix().transform_point3(Vec3::ZERO);
        assert!((p.z + 5.0).abs() < 1e-5);
    }

    #[test]
    fn uniform_is_36_floats() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), CameraUniform::FLOATS * 4);
    }
}
