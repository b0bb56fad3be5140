pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod assets;
pub mod extensions;
pub mod error;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext, CameraConfig};
pub use api::types::NodeId;
pub use components::node::SceneNode;
pub use components::mesh::{MeshComponent, Material, BlendMode, Color, GeometryId, TextureId};
pub use core::scene::Scene;
pub use core::time::SimClock;
pub use core::rng::Rng;
pub use renderer::instance::{NodeInstance, RenderBuffer};
pub use renderer::camera::{PerspectiveCamera, CameraUniform};
pub use renderer::controls::OrbitControls;
pub use renderer::traits::{Renderer, FrameData};
pub use renderer::frame_buffer::FrameBufferRenderer;
pub use input::queue::{InputEvent, InputQueue};
pub use assets::manifest::AssetManifest;
pub use assets::resources::{ResourceTable, GeometryDesc};
pub use assets::obj::{ObjAsset, AssetNode, MeshData, parse_obj};
pub use assets::loader::LoadBatch;
pub use bridge::protocol::ProtocolLayout;
pub use systems::lighting::{Light, LightKind, LightState, LightUniform};
pub use systems::render::build_render_buffer;
pub use error::AssetError;

#[cfg(feature = "vectors")]
pub use systems::vector::{LineTessellator, LineVertex};

pub use extensions::{TransformGraph, LocalTransform};
