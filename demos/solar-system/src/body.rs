//! Celestial body construction.
//!
//! A body is an orbit group holding a textured sphere and any attached
//! children. With a revolve rate the group rotates in place and the sphere sits
//! at `distance` along local X, so rotation carries it around the parent.
//! Without one the sphere sits at the group origin and the speed-scaled
//! fallback orbit moves the group itself.

use glam::Vec3;
use orrery_engine::{
    EngineContext, GeometryDesc, GeometryId, LocalTransform, Material, MeshComponent, NodeId,
};
use crate::motion::{Animator, CircularOrbit, Motion};
use crate::planets::{BodySpec, Planet};

/// Immutable once handed to [`BodyFactory`].
#[derive(Debug, Clone, PartialEq)]
pub struct BodyConfig {
    pub size: f32,
    pub distance: f32,
    pub texture: String,
    /// Re-parented under the orbit group, in order.
    pub children: Vec<NodeId>,
    /// Base revolve motion; `None` leaves the body on the fallback orbit.
    pub orbit_rate: Option<f32>,
}

impl BodyConfig {
    pub fn new(size: f32, distance: f32, texture: impl Into<String>) -> Self {
        Self {
            size,
            distance,
            texture: texture.into(),
            children: Vec::new(),
            orbit_rate: None,
        }
    }

    pub fn from_spec(spec: BodySpec) -> Self {
        Self::new(spec.size, spec.distance, spec.texture)
    }

    pub fn with_child(mut self, child: NodeId) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_orbit_rate(mut self, rate: f32) -> Self {
        self.orbit_rate = Some(rate);
        self
    }
}

/// Builds bodies sharing one unit-sphere geometry.
pub struct BodyFactory {
    sphere: GeometryId,
}

impl BodyFactory {
    const SPHERE_DETAIL: u32 = 12;

    pub fn new(ctx: &mut EngineContext) -> Self {
        let sphere = ctx.resources.add_geometry(GeometryDesc::Sphere {
            radius: 1.0,
            detail: Self::SPHERE_DETAIL,
        });
        Self { sphere }
    }

    pub fn sphere(&self) -> GeometryId {
        self.sphere
    }

    /// Orbit group with sphere and children, plus the revolve motion if the
    /// config has one. Returns the group.
    pub fn build(
        &self,
        ctx: &mut EngineContext,
        animator: &mut Animator,
        config: &BodyConfig,
        tag: &str,
    ) -> NodeId {
        let offset = match config.orbit_rate {
            Some(_) => Vec3::new(config.distance, 0.0, 0.0),
            None => Vec3::ZERO,
        };

        let group = ctx.spawn_group(tag, LocalTransform::new(), None);
        let texture = ctx.resources.texture(&config.texture);
        ctx.spawn_mesh(
            &format!("{tag}-surface"),
            MeshComponent::new(self.sphere, Material::textured(texture)),
            LocalTransform::new()
                .with_translation(offset)
                .with_scale(Vec3::splat(config.size)),
            Some(group),
        );

        for &child in &config.children {
            ctx.graph.set_parent(child, Some(group));
            if let Some(local) = ctx.graph.get_local_mut(child) {
                local.translation = offset;
            }
        }

        if let Some(rate) = config.orbit_rate {
            animator.attach(group, Motion::Revolve { rate });
        }
        group
    }

    /// Build a planet and wrap its motion so it follows the planet's speed
    /// multiplier.
    pub fn create_body(
        &self,
        ctx: &mut EngineContext,
        animator: &mut Animator,
        config: &BodyConfig,
        planet: Planet,
    ) -> NodeId {
        let group = self.build(ctx, animator, config, planet.name());
        let base = animator.detach(group).map(Box::new);
        animator.attach(group, Motion::SpeedScaled {
            planet,
            base,
            orbit: CircularOrbit::new(config.distance),
        });
        group
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speed::SpeedRegistry;

    fn surface_of(ctx: &EngineContext, group: NodeId) -> NodeId {
        ctx.graph.get_children(group).map(|c| c[0]).unwrap_or(group)
    }

    #[test]
    fn build_places_sphere_and_children_at_distance() {
        let mut ctx = EngineContext::new();
        let mut anim = Animator::new();
        let factory = BodyFactory::new(&mut ctx);
        let moon = ctx.spawn_group("moon", LocalTransform::new(), None);
        let config = BodyConfig::new(0.225, 2.0, "earth.png")
            .with_child(moon)
            .with_orbit_rate(-0.5);

        let group = factory.build(&mut ctx, &mut anim, &config, "earth");
        ctx.propagate();

        assert_eq!(ctx.scene.get(group).map(|n| n.tag.as_str()), Some("earth"));
        let children = ctx.graph.get_children(group).unwrap_or_default().to_vec();
        assert_eq!(children.len(), 2);
        assert_eq!(children[1], moon);
        assert_eq!(ctx.graph.get_parent(moon), Some(group));

        let surface = ctx.scene.get(children[0]).unwrap();
        assert_eq!(surface.world_position(), Vec3::new(2.0, 0.0, 0.0));
        assert!(surface.mesh.is_some_and(|m| m.material.texture.is_some()));
        assert_eq!(ctx.scene.get(moon).unwrap().world_position(), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(anim.get(group), Some(&Motion::Revolve { rate: -0.5 }));
    }

    #[test]
    fn create_body_wraps_base_motion() {
        let mut ctx = EngineContext::new();
        let mut anim = Animator::new();
        let factory = BodyFactory::new(&mut ctx);
        let config = BodyConfig::from_spec(Planet::Mars.spec()).with_orbit_rate(-0.3);
        let group = factory.create_body(&mut ctx, &mut anim, &config, Planet::Mars);

        match anim.get(group) {
            Some(Motion::SpeedScaled { planet, base: Some(base), .. }) => {
                assert_eq!(*planet, Planet::Mars);
                assert_eq!(**base, Motion::Revolve { rate: -0.3 });
            }
            other => panic!("unexpected motion: {other:?}"),
        }
    }

    #[test]
    fn body_without_rate_orbits_on_fallback() {
        let mut ctx = EngineContext::new();
        let mut anim = Animator::new();
        let factory = BodyFactory::new(&mut ctx);
        let config = BodyConfig::from_spec(Planet::Mercury.spec());
        let group = factory.create_body(&mut ctx, &mut anim, &config, Planet::Mercury);
        assert!(matches!(anim.get(group), Some(Motion::SpeedScaled { base: None, .. })));

        let speeds = SpeedRegistry::new();
        anim.update(group, 0.01, &mut ctx, &speeds);
        ctx.propagate();
        let surface = ctx.scene.get(surface_of(&ctx, group)).unwrap();
        assert!((surface.world_position().length() - 1.25).abs() < 1e-4);
    }

    #[test]
    fn textures_are_shared_by_name() {
        let mut ctx = EngineContext::new();
        let mut anim = Animator::new();
        let factory = BodyFactory::new(&mut ctx);
        factory.build(&mut ctx, &mut anim, &BodyConfig::new(0.1, 1.0, "rock.png"), "a");
        factory.build(&mut ctx, &mut anim, &BodyConfig::new(0.1, 2.0, "rock.png"), "b");
        assert_eq!(ctx.resources.texture_count(), 1);
        assert_eq!(ctx.resources.geometry_count(), 1);
    }
}
