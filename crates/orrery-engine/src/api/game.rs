use glam::Vec3;
use crate::api::types::NodeId;
use crate::assets::obj::MeshData;
use crate::assets::resources::ResourceTable;
use crate::components::mesh::MeshComponent;
use crate::components::node::SceneNode;
use crate::core::rng::Rng;
use crate::core::scene::Scene;
use crate::extensions::transform::{LocalTransform, TransformGraph};
use crate::systems::lighting::LightState;

/// Camera and orbit-control parameters.
#[derive(Debug, Clone)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Initial eye position.
    pub position: Vec3,
    /// Point the orbit controls revolve around.
    pub target: Vec3,
    /// Orbit-control damping factor (fraction of pending motion applied per frame).
    pub damping: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            position: Vec3::new(0.0, 2.5, 4.0),
            target: Vec3::ZERO,
            damping: 0.03,
        }
    }
}

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Host milliseconds → simulation time factor (default: 0.0005).
    pub time_scale: f64,
    /// Maximum number of render instances published per frame (default: 2048).
    pub max_instances: usize,
    /// Maximum number of lights published per frame (default: 8).
    pub max_lights: usize,
    /// Initial viewport size, replaced by the first resize notification.
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Seed for scene randomness (initial orbit angles, belt layout, stars).
    pub rng_seed: u64,
    pub camera: CameraConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            time_scale: 0.0005,
            max_instances: 2048,
            max_lights: 8,
            viewport_width: 1280.0,
            viewport_height: 720.0,
            rng_seed: 0x5eed,
            camera: CameraConfig::default(),
        }
    }
}

/// The core contract every scene must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Build the scene. Called exactly once, after every mesh asset has resolved.
    fn init(&mut self, ctx: &mut EngineContext, meshes: Vec<MeshData>);

    /// Per-frame update with the current simulation time.
    fn update(&mut self, ctx: &mut EngineContext, t: f32);
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub graph: TransformGraph,
    pub lights: LightState,
    pub resources: ResourceTable,
    pub rng: Rng,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::with_seed(GameConfig::default().rng_seed)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            scene: Scene::new(),
            graph: TransformGraph::new(),
            lights: LightState::new(),
            resources: ResourceTable::new(),
            rng: Rng::new(seed),
            next_id: 1,
        }
    }

    /// Generate the next unique node ID.
    pub fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Spawn a node, register its local transform, and attach it to `parent`.
    pub fn spawn(
        &mut self,
        node: SceneNode,
        local: LocalTransform,
        parent: Option<NodeId>,
    ) -> NodeId {
        let id = node.id;
        self.scene.spawn(node);
        self.graph.register_with(id, local);
        if parent.is_some() {
            self.graph.set_parent(id, parent);
        }
        id
    }

    /// Spawn an empty group node (no mesh) under `parent`.
    pub fn spawn_group(&mut self, tag: &str, local: LocalTransform, parent: Option<NodeId>) -> NodeId {
        let id = self.next_id();
        self.spawn(SceneNode::new(id).with_tag(tag), local, parent)
    }

    /// Spawn a node carrying `mesh` under `parent`.
    pub fn spawn_mesh(
        &mut self,
        tag: &str,
        mesh: MeshComponent,
        local: LocalTransform,
        parent: Option<NodeId>,
    ) -> NodeId {
        let id = self.next_id();
        self.spawn(SceneNode::new(id).with_tag(tag).with_mesh(mesh), local, parent)
    }

    /// Despawn a node and every descendant. Returns the number of nodes removed.
    pub fn despawn_recursive(&mut self, id: NodeId) -> usize {
        let removed = self.graph.remove_subtree(id);
        for gone in &removed {
            self.scene.despawn(*gone);
        }
        removed.len()
    }

    /// Recompute world matrices after local transforms changed.
    pub fn propagate(&mut self) {
        self.graph.propagate(&mut self.scene);
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}
