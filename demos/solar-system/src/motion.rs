//! Per-frame motion of scene nodes.
//!
//! Each animated node has one `Motion` in the [`Animator`] side table. Group
//! motions forward the frame time to their children, so updating the root
//! walks the whole animated hierarchy.

use std::collections::HashMap;
use glam::{Quat, Vec3};
use orrery_engine::{EngineContext, NodeId, Rng};
use crate::planets::Planet;
use crate::speed::SpeedRegistry;

#[derive(Debug, Clone, PartialEq)]
pub enum Motion {
    /// Forward `t` to every child.
    Group,
    /// Rotate about Y by `t * rate`, then forward `t` to every child.
    Revolve { rate: f32 },
    /// Rotate about Y by `t * rate`.
    Spin { rate: f32 },
    /// Planet motion scaled by the planet's current speed multiplier.
    /// Runs `base` with dilated time, or falls back to `orbit`.
    SpeedScaled {
        planet: Planet,
        base: Option<Box<Motion>>,
        orbit: CircularOrbit,
    },
}

/// Fallback circular orbit in the XZ plane.
#[derive(Debug, Clone, PartialEq)]
pub struct CircularOrbit {
    pub distance: f32,
    /// Drawn at random on first use.
    pub angle: Option<f32>,
}

impl CircularOrbit {
    pub fn new(distance: f32) -> Self {
        Self { distance, angle: None }
    }

    /// Step the angle by `(t * 0.5 / distance) * multiplier` and return the
    /// new position. A zero distance yields a non-finite position.
    pub fn advance(&mut self, t: f32, multiplier: f32, rng: &mut Rng) -> Vec3 {
        let angle = self.angle.get_or_insert_with(|| rng.angle());
        *angle += (t * 0.5 / self.distance) * multiplier;
        Vec3::new(angle.cos() * self.distance, 0.0, angle.sin() * self.distance)
    }
}

#[derive(Debug, Default)]
pub struct Animator {
    motions: HashMap<NodeId, Motion>,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `motion` to `id`, returning any motion it replaces.
    pub fn attach(&mut self, id: NodeId, motion: Motion) -> Option<Motion> {
        self.motions.insert(id, motion)
    }

    pub fn detach(&mut self, id: NodeId) -> Option<Motion> {
        self.motions.remove(&id)
    }

    pub fn get(&self, id: NodeId) -> Option<&Motion> {
        self.motions.get(&id)
    }

    pub fn len(&self) -> usize {
        self.motions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.motions.is_empty()
    }

    /// Run the motion of `id` (if any) for simulation time `t`.
    pub fn update(&mut self, id: NodeId, t: f32, ctx: &mut EngineContext, speeds: &SpeedRegistry) {
        let Some(mut motion) = self.motions.remove(&id) else { return };
        self.apply(&mut motion, id, t, ctx, speeds);
        self.motions.insert(id, motion);
    }

    fn apply(
        &mut self,
        motion: &mut Motion,
        id: NodeId,
        t: f32,
        ctx: &mut EngineContext,
        speeds: &SpeedRegistry,
    ) {
        match motion {
            Motion::Group => self.forward(id, t, ctx, speeds),
            Motion::Revolve { rate } => {
                set_yaw(ctx, id, t * *rate);
                self.forward(id, t, ctx, speeds);
            }
            Motion::Spin { rate } => set_yaw(ctx, id, t * *rate),
            Motion::SpeedScaled { planet, base, orbit } => {
                let multiplier = speeds.get(*planet);
                match base {
                    Some(base) => self.apply(base, id, t * multiplier, ctx, speeds),
                    None => {
                        let pos = orbit.advance(t, multiplier, &mut ctx.rng);
                        if let Some(local) = ctx.graph.get_local_mut(id) {
                            local.translation = pos;
                        }
                    }
                }
            }
        }
    }

    fn forward(&mut self, id: NodeId, t: f32, ctx: &mut EngineContext, speeds: &SpeedRegistry) {
        let children = ctx.graph.get_children(id).map(<[NodeId]>::to_vec).unwrap_or_default();
        for child in children {
            self.update(child, t, ctx, speeds);
        }
    }
}

fn set_yaw(ctx: &mut EngineContext, id: NodeId, angle: f32) {
    if let Some(local) = ctx.graph.get_local_mut(id) {
        local.rotation = Quat::from_rotation_y(angle);
    }
}
