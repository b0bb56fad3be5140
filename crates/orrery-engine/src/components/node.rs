use glam::{Mat4, Vec3};
use crate::api::types::NodeId;
use crate::components::mesh::MeshComponent;

/// Scene node: a flat record with an optional mesh.
/// Hierarchy and local transforms live in `TransformGraph`, keyed by `NodeId`;
/// `world` is written back by `TransformGraph::propagate`.
#[derive(Debug, Clone)]
pub struct SceneNode {
    /// Unique identifier.
    pub id: NodeId,
    /// Identifying name (planet name, "sun", "asteroid", ...).
    pub tag: String,
    /// Inactive nodes are skipped by the render pass.
    pub active: bool,
    /// World transform computed from the hierarchy.
    pub world: Mat4,
    /// Renderable mesh (group nodes have none).
    pub mesh: Option<MeshComponent>,
}

impl SceneNode {
    /// Create a new node with the given ID at the origin.
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            world: Mat4::IDENTITY,
            mesh: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_mesh(mut self, mesh: MeshComponent) -> Self {
        self.mesh = Some(mesh);
        self
    }

    /// World-space position (translation column of the world matrix).
    pub fn world_position(&self) -> Vec3 {
        self.world.w_axis.truncate()
    }
}
