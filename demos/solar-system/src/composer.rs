//! One-time assembly of the full scene once the rock meshes are in.

use glam::Vec3;
use orrery_engine::{Color, EngineContext, Light, LocalTransform, MeshData, NodeId};
use crate::belt::spawn_belt;
use crate::body::{BodyConfig, BodyFactory};
use crate::motion::{Animator, Motion};
use crate::planets::{Planet, MOON};
use crate::scenery::{self, NebulaSpec, SATURN_RING, URANUS_RING};

const STAR_COUNT: usize = 500;
const STAR_SIZE: f32 = 0.35;
const DIR_LIGHT_COLOR: u32 = 0x0099ff;
const DIR_LIGHT_INTENSITY: f32 = 1.0;

const NEBULAE: [NebulaSpec; 2] = [
    NebulaSpec { hue: 0.6, num_sprites: 10, opacity: 0.2, radius: 40.0, size: 80.0, z: -50.5 },
    NebulaSpec { hue: 0.0, num_sprites: 10, opacity: 0.2, radius: 40.0, size: 80.0, z: 50.5 },
];

/// Handles to the composed scene's key nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedScene {
    /// Top-level group; updating it animates everything.
    pub root: NodeId,
    pub sun: NodeId,
    pub planets: Vec<(Planet, NodeId)>,
    pub moon: NodeId,
    pub belt: NodeId,
}

impl ComposedScene {
    pub fn planet(&self, planet: Planet) -> Option<NodeId> {
        self.planets.iter().find(|(p, _)| *p == planet).map(|(_, id)| *id)
    }
}

/// Random revolve rate, negative so bodies move counter-clockwise seen from above.
fn orbit_rate(ctx: &mut EngineContext) -> f32 {
    ctx.rng.range(-1.0, 0.0)
}

pub fn compose(ctx: &mut EngineContext, animator: &mut Animator, meshes: &[MeshData]) -> ComposedScene {
    let root = ctx.spawn_group("solar-system", LocalTransform::new(), None);
    let factory = BodyFactory::new(ctx);

    let sun = scenery::spawn_sun(ctx, animator, factory.sphere(), Some(root));

    // Moon orbits Earth with its own revolve but no speed control.
    let rate = orbit_rate(ctx);
    let moon = factory.build(ctx, animator, &BodyConfig::from_spec(MOON).with_orbit_rate(rate), "moon");

    let mut planets = Vec::with_capacity(Planet::COUNT);
    for planet in Planet::ALL {
        let rate = orbit_rate(ctx);
        let mut config = BodyConfig::from_spec(planet.spec()).with_orbit_rate(rate);
        match planet {
            Planet::Earth => config = config.with_child(moon),
            Planet::Saturn => {
                config = config.with_child(scenery::spawn_ring(ctx, "saturn-ring", SATURN_RING));
            }
            Planet::Uranus => {
                config = config.with_child(scenery::spawn_ring(ctx, "uranus-ring", URANUS_RING));
            }
            _ => {}
        }
        let body = factory.create_body(ctx, animator, &config, planet);
        ctx.graph.set_parent(body, Some(root));
        planets.push((planet, body));
    }

    let belt = spawn_belt(ctx, animator, meshes, Some(root));

    #[cfg(feature = "vectors")]
    {
        let radii = Planet::ALL.map(|p| p.spec().distance);
        scenery::spawn_ecliptic(ctx, &radii, Some(root));
    }

    scenery::spawn_starfield(ctx, STAR_COUNT, STAR_SIZE, None);

    ctx.lights.add(Light::directional(
        Color::hex(DIR_LIGHT_COLOR),
        DIR_LIGHT_INTENSITY,
        Vec3::new(0.0, 1.0, 0.0),
    ));

    for spec in NEBULAE {
        scenery::spawn_nebula(ctx, spec, None);
    }

    animator.attach(root, Motion::Group);
    ctx.propagate();

    log::info!(
        "Composed solar system: {} planets, {} rock meshes, {} lights",
        planets.len(),
        meshes.len(),
        ctx.lights.count()
    );

    ComposedScene { root, sun, planets, moon, belt }
}
