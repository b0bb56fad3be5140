use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use crate::components::mesh::MeshComponent;

/// Per-node render data read by the host renderer.
/// Must match the host protocol: 24 floats = 96 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct NodeInstance {
    /// World (model) matrix, column-major.
    pub model: [[f32; 4]; 4],
    /// Base color and opacity.
    pub color: [f32; 4],
    /// Self-illumination (0 = lit only by lights, 1 = fully emissive).
    pub emissive: f32,
    /// Geometry handle into the resource table.
    pub geometry: f32,
    /// Texture handle, or -1 for untextured.
    pub texture: f32,
    /// 0 = opaque, 1 = alpha, 2 = additive.
    pub blend: f32,
}

impl NodeInstance {
    pub const FLOATS: usize = 24;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn from_mesh(world: Mat4, mesh: &MeshComponent) -> Self {
        let m = &mesh.material;
        Self {
            model: world.to_cols_array_2d(),
            color: [m.color.r, m.color.g, m.color.b, m.color.a],
            emissive: m.emissive,
            geometry: mesh.geometry.0 as f32,
            texture: m.texture.map_or(-1.0, |t| t.0 as f32),
            blend: m.blend.as_f32(),
        }
    }
}

/// Render buffer containing all node instances, ordered by blend mode:
/// opaque first, then alpha-blended from `alpha_start`, then additive from
/// `additive_start`.
pub struct RenderBuffer {
    pub instances: Vec<NodeInstance>,
    pub alpha_start: u32,
    pub additive_start: u32,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(512)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            alpha_start: 0,
            additive_start: 0,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.alpha_start = 0;
        self.additive_start = 0;
    }

    pub fn push(&mut self, instance: NodeInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for host-side reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::mesh::{BlendMode, Color, GeometryId, Material, TextureId};

    #[test]
    fn node_instance_is_24_floats() {
        assert_eq!(std::mem::size_of::<NodeInstance>(), 96);
        assert_eq!(NodeInstance::FLOATS, 24);
    }

    #[test]
    fn from_mesh_encodes_handles() {
        let textured = MeshComponent::new(GeometryId(4), Material::textured(TextureId(2)));
        let inst = NodeInstance::from_mesh(Mat4::IDENTITY, &textured);
        assert_eq!(inst.geometry, 4.0);
        assert_eq!(inst.texture, 2.0);
        assert_eq!(inst.blend, 0.0);
        assert_eq!(inst.model, Mat4::IDENTITY.to_cols_array_2d());

        let glow = MeshComponent::new(
            GeometryId(1),
            Material::colored(Color::hex(0xff0000)).with_blend(BlendMode::Additive),
        );
        let inst = NodeInstance::from_mesh(Mat4::IDENTITY, &glow);
        assert_eq!(inst.texture, -1.0);
        assert_eq!(inst.blend, 2.0);
        assert_eq!(inst.color, [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn render_buffer_push_and_clear() {
        let mut buf = RenderBuffer::new();
        buf.push(NodeInstance::default());
        buf.push(NodeInstance::default());
        buf.alpha_start = 1;
        assert_eq!(buf.instance_count(), 2);
        buf.clear();
        assert_eq!(buf.instance_count(), 0);
        assert_eq!(buf.alpha_start, 0);
    }
}
