//! Scene lights published to the renderer each frame.
//!
//! Lights are persistent. A light may follow a scene node, in which case its
//! position is read from that node's world transform when packed.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use crate::api::types::NodeId;
use crate::components::mesh::Color;
use crate::core::scene::Scene;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightKind {
    /// Parallel light shining from `position` toward the origin.
    Directional,
    /// Omnidirectional light at `position`.
    Point,
}

impl LightKind {
    pub fn as_f32(self) -> f32 {
        match self {
            LightKind::Directional => 0.0,
            LightKind::Point => 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub color: Color,
    pub intensity: f32,
    pub position: Vec3,
    /// Node whose world position overrides `position`.
    pub follow: Option<NodeId>,
}

impl Light {
    pub fn directional(color: Color, intensity: f32, position: Vec3) -> Self {
        Self { kind: LightKind::Directional, color, intensity, position, follow: None }
    }

    pub fn point(color: Color, intensity: f32, position: Vec3) -> Self {
        Self { kind: LightKind::Point, color, intensity, position, follow: None }
    }

    pub fn following(mut self, node: NodeId) -> Self {
        self.follow = Some(node);
        self
    }
}

/// Wire format (8 floats / 32 bytes):
/// `[kind, x, y, z, r, g, b, intensity]`
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct LightUniform {
    pub kind: f32,
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub intensity: f32,
}

impl LightUniform {
    pub const FLOATS: usize = 8;
}

pub struct LightState {
    lights: Vec<Light>,
    ambient: [f32; 3],
}

impl LightState {
    pub fn new() -> Self {
        Self {
            lights: Vec::new(),
            ambient: [0.1, 0.1, 0.1],
        }
    }

    pub fn add(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn clear(&mut self) {
        self.lights.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Light> {
        self.lights.iter()
    }

    pub fn count(&self) -> usize {
        self.lights.len()
    }

    pub fn ambient(&self) -> [f32; 3] {
        self.ambient
    }

    /// Resolve followed nodes and write wire-format lights into `out`.
    pub fn pack(&self, scene: &Scene, out: &mut Vec<LightUniform>) {
        out.clear();
        for light in &self.lights {
            let position = light
                .follow
                .and_then(|id| scene.get(id))
                .map(|node| node.world_position())
                .unwrap_or(light.position);
            out.push(LightUniform {
                kind: light.kind.as_f32(),
                position: position.to_array(),
                color: [light.color.r, light.color.g, light.color.b],
                intensity: light.intensity,
            });
        }
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self::new()
    }
}
