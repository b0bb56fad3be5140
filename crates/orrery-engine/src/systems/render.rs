use crate::components::mesh::BlendMode;
use crate::core::scene::Scene;
use crate::renderer::instance::{NodeInstance, RenderBuffer};

/// Build the render buffer from the scene's active mesh nodes.
/// Groups instances by blend mode: opaque, then alpha, then additive, and
/// records where each blended run starts.
pub fn build_render_buffer(scene: &Scene, buffer: &mut RenderBuffer) {
    buffer.clear();

    let mut alpha = Vec::new();
    let mut additive = Vec::new();

    for node in scene.iter() {
        if !node.active {
            continue;
        }
        let Some(mesh) = &node.mesh else { continue };
        let instance = NodeInstance::from_mesh(node.world, mesh);
        match mesh.material.blend {
            BlendMode::Opaque => buffer.push(instance),
            BlendMode::Alpha => alpha.push(instance),
            BlendMode::Additive => additive.push(instance),
        }
    }

    buffer.alpha_start = buffer.instance_count();
    buffer.instances.extend(alpha);
    buffer.additive_start = buffer.instance_count();
    buffer.instances.extend(additive);
}
