//! Asteroid belt built from the loaded rock meshes.

use glam::{Quat, Vec3};
use orrery_engine::{
    Color, EngineContext, GeometryId, LocalTransform, Material, MeshComponent, MeshData, NodeId,
};
use crate::motion::{Animator, Motion};

pub const ASTEROID_COUNT: usize = 250;
pub const INNER_RADIUS: f32 = 2.4;
pub const OUTER_RADIUS: f32 = 2.6;
const VERTICAL_JITTER: f32 = 0.05;
const MIN_SIZE: f32 = 0.01;
const MAX_SIZE: f32 = 0.03;
const ROCK_COLOR: u32 = 0x8a817c;
const BELT_SPIN: f32 = 0.1;

/// Group of rocks cloned round-robin from `meshes`, slowly spinning.
/// An empty mesh list yields an empty group.
pub fn spawn_belt(
    ctx: &mut EngineContext,
    animator: &mut Animator,
    meshes: &[MeshData],
    parent: Option<NodeId>,
) -> NodeId {
    let belt = ctx.spawn_group("asteroid-belt", LocalTransform::new(), parent);
    animator.attach(belt, Motion::Spin { rate: BELT_SPIN });
    if meshes.is_empty() {
        log::warn!("No rock meshes loaded; asteroid belt is empty");
        return belt;
    }

    let rocks: Vec<(GeometryId, f32)> = meshes
        .iter()
        .map(|m| {
            let id = ctx.resources.add_geometry(m.to_geometry());
            (id, m.bounding_radius().max(f32::EPSILON))
        })
        .collect();
    let material = Material::colored(Color::hex(ROCK_COLOR));

    for i in 0..ASTEROID_COUNT {
        let (geometry, extent) = rocks[i % rocks.len()];
        let angle = ctx.rng.angle();
        let radius = ctx.rng.range(INNER_RADIUS, OUTER_RADIUS);
        let y = ctx.rng.range(-VERTICAL_JITTER, VERTICAL_JITTER);
        let size = ctx.rng.range(MIN_SIZE, MAX_SIZE);
        let orientation = Quat::from_euler(
            glam::EulerRot::XYZ,
            ctx.rng.angle(),
            ctx.rng.angle(),
            ctx.rng.angle(),
        );
        ctx.spawn_mesh(
            "asteroid",
            MeshComponent::new(geometry, material),
            LocalTransform::new()
                .with_translation(Vec3::new(angle.cos() * radius, y, angle.sin() * radius))
                .with_rotation(orientation)
                .with_scale(Vec3::splat(size / extent)),
            Some(belt),
        );
    }
    belt
}
