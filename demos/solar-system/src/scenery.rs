//! Non-planet scene pieces: sun, rings, starfield, nebulae, guide lines.

use std::f32::consts::{FRAC_PI_2, TAU};
use glam::{Quat, Vec3};
use orrery_engine::{
    BlendMode, Color, EngineContext, GeometryDesc, GeometryId, Light, LocalTransform, Material,
    MeshComponent, NodeId,
};
use crate::motion::{Animator, Motion};

// ── Sun ──────────────────────────────────────────────────────────────

const SUN_COLOR: u32 = 0xffff99;
const SUN_RADIUS: f32 = 1.0;
const SUN_SPIN: f32 = 1.0;
const SUN_LIGHT_INTENSITY: f32 = 10.0;
const GLOW_SCALE: f32 = 1.01;
const GLOW_OPACITY: f32 = 0.6;

/// Emissive sun with an additive glow shell and a point light that follows it.
pub fn spawn_sun(
    ctx: &mut EngineContext,
    animator: &mut Animator,
    sphere: GeometryId,
    parent: Option<NodeId>,
) -> NodeId {
    let color = Color::hex(SUN_COLOR);
    let sun = ctx.spawn_mesh(
        "sun",
        MeshComponent::new(sphere, Material::colored(color).with_emissive(1.0)),
        LocalTransform::new().with_scale(Vec3::splat(SUN_RADIUS)),
        parent,
    );
    ctx.spawn_mesh(
        "sun-glow",
        MeshComponent::new(
            sphere,
            Material::colored(color)
                .with_emissive(1.0)
                .with_blend(BlendMode::Additive)
                .with_opacity(GLOW_OPACITY),
        ),
        LocalTransform::new().with_scale(Vec3::splat(GLOW_SCALE)),
        Some(sun),
    );
    ctx.lights.add(Light::point(color, SUN_LIGHT_INTENSITY, Vec3::ZERO).following(sun));
    animator.attach(sun, Motion::Spin { rate: SUN_SPIN });
    sun
}

// ── Rings ────────────────────────────────────────────────────────────

/// Torus ring description.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingSpec {
    pub radius: f32,
    pub tube: f32,
    pub radial_segments: u32,
    pub tubular_segments: u32,
    /// Rotation about X applied after flattening.
    pub tilt: f32,
    pub color: u32,
    pub opacity: f32,
}

const RING_FLATTEN: f32 = 0.1;

pub const SATURN_RING: RingSpec = RingSpec {
    radius: 0.6,
    tube: 0.15,
    radial_segments: 8,
    tubular_segments: 64,
    tilt: FRAC_PI_2,
    color: 0xc9b38a,
    opacity: 0.8,
};

/// Uranus' ring stays upright.
pub const URANUS_RING: RingSpec = RingSpec {
    radius: 0.5,
    tube: 0.05,
    radial_segments: 8,
    tubular_segments: 64,
    tilt: 0.0,
    color: 0x9fc6d6,
    opacity: 0.6,
};

/// Flattened torus, unparented until a body adopts it.
pub fn spawn_ring(ctx: &mut EngineContext, tag: &str, spec: RingSpec) -> NodeId {
    let geometry = ctx.resources.add_geometry(GeometryDesc::Torus {
        radius: spec.radius,
        tube: spec.tube,
        radial_segments: spec.radial_segments,
        tubular_segments: spec.tubular_segments,
    });
    ctx.spawn_mesh(
        tag,
        MeshComponent::new(
            geometry,
            Material::colored(Color::hex(spec.color))
                .with_blend(BlendMode::Alpha)
                .with_opacity(spec.opacity),
        ),
        LocalTransform::new()
            .with_rotation(Quat::from_rotation_x(spec.tilt))
            .with_scale(Vec3::new(1.0, 1.0, RING_FLATTEN)),
        None,
    )
}

// ── Starfield ────────────────────────────────────────────────────────

const STAR_HUE: f32 = 0.6;
const STAR_SATURATION: f32 = 0.2;
const STAR_MIN_RADIUS: f32 = 25.0;
const STAR_MAX_RADIUS: f32 = 50.0;

/// Point cloud on a spherical shell around the origin.
pub fn spawn_starfield(
    ctx: &mut EngineContext,
    num_stars: usize,
    size: f32,
    parent: Option<NodeId>,
) -> NodeId {
    let mut positions = Vec::with_capacity(num_stars * 3);
    let mut colors = Vec::with_capacity(num_stars * 3);
    for _ in 0..num_stars {
        let radius = ctx.rng.range(STAR_MIN_RADIUS, STAR_MAX_RADIUS);
        let u = ctx.rng.next_f32();
        let v = ctx.rng.next_f32();
        let theta = TAU * u;
        let phi = (2.0 * v - 1.0).clamp(-1.0, 1.0).acos();
        positions.extend_from_slice(&[
            radius * phi.sin() * theta.cos(),
            radius * phi.sin() * theta.sin(),
            radius * phi.cos(),
        ]);
        let lightness = ctx.rng.next_f32();
        let c = Color::hsl(STAR_HUE, STAR_SATURATION, lightness);
        colors.extend_from_slice(&[c.r, c.g, c.b]);
    }

    let geometry = ctx.resources.add_geometry(GeometryDesc::Points { positions, colors, size });
    let texture = ctx.resources.texture("circle.png");
    ctx.spawn_mesh(
        "starfield",
        MeshComponent::new(geometry, Material::textured(texture).with_emissive(1.0)),
        LocalTransform::new(),
        parent,
    )
}

// ── Nebula ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NebulaSpec {
    pub hue: f32,
    pub num_sprites: usize,
    pub opacity: f32,
    pub radius: f32,
    pub size: f32,
    pub z: f32,
}

/// Group of additive sprites scattered over a disc at depth `z`.
pub fn spawn_nebula(ctx: &mut EngineContext, spec: NebulaSpec, parent: Option<NodeId>) -> NodeId {
    let group = ctx.spawn_group("nebula", LocalTransform::new(), parent);
    let sprite = ctx.resources.add_geometry(GeometryDesc::Sprite { size: spec.size });
    let texture = ctx.resources.texture("rad-grad.png");
    let material = Material {
        color: Color::hsl(spec.hue, 1.0, 0.5),
        ..Material::textured(texture)
    }
    .with_emissive(1.0)
    .with_blend(BlendMode::Additive)
    .with_opacity(spec.opacity);

    for _ in 0..spec.num_sprites {
        let angle = ctx.rng.angle();
        let r = spec.radius * ctx.rng.next_f32().sqrt();
        let pos = Vec3::new(angle.cos() * r, angle.sin() * r, spec.z);
        ctx.spawn_mesh(
            "nebula-sprite",
            MeshComponent::new(sprite, material),
            LocalTransform::new().with_translation(pos),
            Some(group),
        );
    }
    group
}

// ── Ecliptic guide lines ─────────────────────────────────────────────

#[cfg(feature = "vectors")]
const ECLIPTIC_WIDTH: f32 = 0.01;
#[cfg(feature = "vectors")]
const ECLIPTIC_COLOR: u32 = 0x446688;
#[cfg(feature = "vectors")]
const ECLIPTIC_OPACITY: f32 = 0.25;

/// Concentric circles in the XZ plane, one per radius, as a single mesh.
#[cfg(feature = "vectors")]
pub fn spawn_ecliptic(ctx: &mut EngineContext, radii: &[f32], parent: Option<NodeId>) -> NodeId {
    use glam::Vec2;
    use orrery_engine::LineTessellator;

    let mut lines = LineTessellator::new();
    for &r in radii {
        lines.stroke_circle(Vec2::ZERO, r, ECLIPTIC_WIDTH);
    }
    let geometry = ctx.resources.add_geometry(GeometryDesc::Triangles {
        positions: lines.take_positions(),
    });
    ctx.spawn_mesh(
        "ecliptic",
        MeshComponent::new(
            geometry,
            Material::colored(Color::hex(ECLIPTIC_COLOR))
                .with_emissive(1.0)
                .with_blend(BlendMode::Alpha)
                .with_opacity(ECLIPTIC_OPACITY),
        ),
        LocalTransform::new(),
        parent,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::BodyFactory;
    use orrery_engine::LightKind;

    #[test]
    fn sun_has_glow_light_and_spin() {
        let mut ctx = EngineContext::new();
        let mut anim = Animator::new();
        let sphere = BodyFactory::new(&mut ctx).sphere();
        let sun = spawn_sun(&mut ctx, &mut anim, sphere, None);

        let node = ctx.scene.get(sun).unwrap();
        assert_eq!(node.mesh.map(|m| m.material.emissive), Some(1.0));
        assert_eq!(ctx.graph.get_children(sun).map(|c| c.len()), Some(1));
        let light = ctx.lights.iter().next().unwrap();
        assert_eq!(light.kind, LightKind::Point);
        assert_eq!(light.follow, Some(sun));
        assert_eq!(anim.get(sun), Some(&Motion::Spin { rate: SUN_SPIN }));
    }

    #[test]
    fn saturn_ring_lies_flat() {
        let mut ctx = EngineContext::new();
        let ring = spawn_ring(&mut ctx, "saturn-ring", SATURN_RING);
        ctx.propagate();
        let world = ctx.scene.get(ring).unwrap().world;
        // Ring plane normal (local Z) ends up along world Y, flattened.
        let normal = world.transform_vector3(Vec3::Z);
        assert!((normal - Vec3::new(0.0, -RING_FLATTEN, 0.0)).length() < 1e-5
            || (normal - Vec3::new(0.0, RING_FLATTEN, 0.0)).length() < 1e-5);
        match ctx.resources.geometry(ctx.scene.get(ring).unwrap().mesh.unwrap().geometry) {
            Some(GeometryDesc::Torus { radius, tube, .. }) => {
                assert_eq!((*radius, *tube), (0.6, 0.15));
            }
            other => panic!("unexpected geometry {other:?}"),
        }
    }

    #[test]
    fn starfield_stays_in_shell() {
        let mut ctx = EngineContext::new();
        let id = spawn_starfield(&mut ctx, 500, 0.35, None);
        let geometry = ctx.scene.get(id).unwrap().mesh.unwrap().geometry;
        match ctx.resources.geometry(geometry) {
            Some(GeometryDesc::Points { positions, colors, size }) => {
                assert_eq!(positions.len(), 1500);
                assert_eq!(colors.len(), 1500);
                assert_eq!(*size, 0.35);
                for p in positions.chunks(3) {
                    let r = Vec3::from_slice(p).length();
                    assert!((STAR_MIN_RADIUS - 1e-3..=STAR_MAX_RADIUS + 1e-3).contains(&r));
                }
            }
            other => panic!("unexpected geometry {other:?}"),
        }
    }

    #[test]
    fn nebula_sprites_are_additive_at_depth() {
        let mut ctx = EngineContext::new();
        let spec = NebulaSpec { hue: 0.6, num_sprites: 10, opacity: 0.2, radius: 40.0, size: 80.0, z: -50.5 };
        let group = spawn_nebula(&mut ctx, spec, None);
        ctx.propagate();

        let sprites = ctx.graph.get_children(group).unwrap_or_default().to_vec();
        assert_eq!(sprites.len(), 10);
        for id in sprites {
            let node = ctx.scene.get(id).unwrap();
            let pos = node.world_position();
            assert_eq!(pos.z, -50.5);
            assert!(pos.truncate().length() <= 40.0 + 1e-3);
            let m = node.mesh.unwrap().material;
            assert_eq!(m.blend, BlendMode::Additive);
            assert_eq!(m.color.a, 0.2);
        }
    }

    #[cfg(feature = "vectors")]
    #[test]
    fn ecliptic_is_one_triangle_mesh() {
        let mut ctx = EngineContext::new();
        let id = spawn_ecliptic(&mut ctx, &[1.25, 2.0], None);
        let geometry = ctx.scene.get(id).unwrap().mesh.unwrap().geometry;
        match ctx.resources.geometry(geometry) {
            Some(GeometryDesc::Triangles { positions }) => {
                assert!(!positions.is_empty());
                assert_eq!(positions.len() % 9, 0);
            }
            other => panic!("unexpected geometry {other:?}"),
        }
    }
}
