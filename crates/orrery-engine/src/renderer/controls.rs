//! Orbit controls: drag to revolve the camera around its target, wheel to
//! zoom. Rotation is damped; each `update` applies a fraction of the pending
//! motion and decays the rest.

use std::f32::consts::{PI, TAU};
use glam::{Vec2, Vec3};
use crate::input::queue::InputEvent;
use crate::renderer::camera::PerspectiveCamera;

pub struct OrbitControls {
    pub target: Vec3,
    /// Fraction of pending rotation applied per update.
    pub damping: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    radius: f32,
    /// Azimuth around +Y, measured from +Z.
    theta: f32,
    /// Polar angle from +Y.
    phi: f32,
    pending_theta: f32,
    pending_phi: f32,
    pending_scale: f32,
    drag_from: Option<Vec2>,
    viewport_height: f32,
}

impl OrbitControls {
    /// Keeps the polar angle off the poles.
    const POLE_EPSILON: f32 = 1e-3;
    /// Remaining rotation below this is dropped.
    const SETTLE: f32 = 1e-6;

    /// Start from the camera's current placement.
    pub fn new(camera: &PerspectiveCamera, damping: f32, viewport_height: f32) -> Self {
        let offset = camera.position - camera.target;
        let radius = offset.length().max(f32::EPSILON);
        Self {
            target: camera.target,
            damping: damping.clamp(0.0, 1.0),
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            min_distance: 0.5,
            max_distance: 200.0,
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            pending_theta: 0.0,
            pending_phi: 0.0,
            pending_scale: 1.0,
            drag_from: None,
            viewport_height: viewport_height.max(1.0),
        }
    }

    pub fn set_viewport_height(&mut self, height: f32) {
        if height > 0.0 {
            self.viewport_height = height;
        }
    }

    pub fn distance(&self) -> f32 {
        self.radius
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_from.is_some()
    }

    /// Feed one input event (screen-space pixels).
    pub fn handle(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerDown { x, y } => self.drag_from = Some(Vec2::new(x, y)),
            InputEvent::PointerUp { .. } => self.drag_from = None,
            InputEvent::PointerMove { x, y } => {
                let Some(from) = self.drag_from else { return };
                let to = Vec2::new(x, y);
                let delta = to - from;
                // A full-height drag is one full turn.
                self.pending_theta -= TAU * delta.x / self.viewport_height * self.rotate_speed;
                self.pending_phi -= TAU * delta.y / self.viewport_height * self.rotate_speed;
                self.drag_from = Some(to);
            }
            InputEvent::Wheel { delta_y } => {
                let step = 0.95f32.powf(self.zoom_speed);
                if delta_y < 0.0 {
                    self.pending_scale *= step;
                } else if delta_y > 0.0 {
                    self.pending_scale /= step;
                }
            }
        }
    }

    /// Apply damped motion and move the camera. Returns true if the camera moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let before = camera.position;

        self.theta += self.pending_theta * self.damping;
        self.phi += self.pending_phi * self.damping;
        self.phi = self.phi.clamp(Self::POLE_EPSILON, PI - Self::POLE_EPSILON);
        self.pending_theta *= 1.0 - self.damping;
        self.pending_phi *= 1.0 - self.damping;
        if self.pending_theta.abs() < Self::SETTLE {
            self.pending_theta = 0.0;
        }
        if self.pending_phi.abs() < Self::SETTLE {
            self.pending_phi = 0.0;
        }

        self.radius = (self.radius * self.pending_scale).clamp(self.min_distance, self.max_distance);
        self.pending_scale = 1.0;

        let sin_phi = self.phi.sin();
        let offset = Vec3::new(
            self.radius * sin_phi * self.theta.sin(),
            self.radius * self.phi.cos(),
            self.radius * sin_phi * self.theta.cos(),
        );
        camera.position = self.target + offset;
        camera.target = self.target;

        camera.position.distance_squared(before) > f32::EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::game::CameraConfig;

    fn setup() -> (PerspectiveCamera, OrbitControls) {
        let cam = PerspectiveCamera::from_config(&CameraConfig::default(), 800.0, 600.0);
        let controls = OrbitControls::new(&cam, 0.03, 600.0);
        (cam, controls)
    }

    #[test]
    fn idle_update_keeps_camera_in_place() {
        let (mut cam, mut controls) = setup();
        let start = cam.position;
        controls.update(&mut cam);
        assert!(cam.position.distance(start) < 1e-4);
    }

    #[test]
    fn drag_rotates_gradually_with_damping() {
        let (mut cam, mut controls) = setup();
        let radius = controls.distance();
        controls.handle(&InputEvent::PointerDown { x: 100.0, y: 100.0 });
        controls.handle(&InputEvent::PointerMove { x: 160.0, y: 100.0 });
        controls.handle(&InputEvent::PointerUp { x: 160.0, y: 100.0 });

        let start = cam.position;
        controls.update(&mut cam);
        let first_step = cam.position.distance(start);
        assert!(first_step > 0.0);

        let mid = cam.position;
        controls.update(&mut cam);
        // Second step is smaller than the first.
        assert!(cam.position.distance(mid) < first_step);
        // Rotation never changes the orbit radius.
        assert!((cam.position.length() - radius).abs() < 1e-4);
    }

    #[test]
    fn move_without_press_is_ignored() {
        let (mut cam, mut controls) = setup();
        let start = cam.position;
        controls.handle(&InputEvent::PointerMove { x: 500.0, y: 10.0 });
        assert!(!controls.update(&mut cam));
        assert!(cam.position.distance(start) < 1e-4);
    }

    #[test]
    fn wheel_zooms_and_clamps() {
        let (mut cam, mut controls) = setup();
        let start = controls.distance();
        controls.handle(&InputEvent::Wheel { delta_y: -100.0 });
        controls.update(&mut cam);
        assert!(controls.distance() < start);

        for _ in 0..500 {
            controls.handle(&InputEvent::Wheel { delta_y: 100.0 });
        }
        controls.update(&mut cam);
        assert!((controls.distance() - controls.max_distance).abs() < 1e-3);
    }

    #[test]
    fn polar_angle_stays_off_the_pole() {
        let (mut cam, mut controls) = setup();
        controls.damping = 1.0;
        controls.handle(&InputEvent::PointerDown { x: 0.0, y: 0.0 });
        controls.handle(&InputEvent::PointerMove { x: 0.0, y: 5000.0 });
        controls.update(&mut cam);
        let dir = (cam.position - cam.target).normalize();
        assert!(dir.y > 0.99);
        assert!(dir.is_finite());
        assert!(cam.view_matrix().is_finite());
    }
}
