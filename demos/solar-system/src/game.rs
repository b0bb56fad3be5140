//! Solar system scene: composes the bodies once the rocks are loaded, then
//! animates them every frame under the per-planet speed multipliers.

use orrery_engine::{EngineContext, Game, GameConfig, MeshData};
use crate::composer::{compose, ComposedScene};
use crate::motion::Animator;
use crate::speed::SpeedRegistry;

pub struct SolarSystem {
    speeds: SpeedRegistry,
    animator: Animator,
    scene: Option<ComposedScene>,
}

impl SolarSystem {
    pub fn new() -> Self {
        Self {
            speeds: SpeedRegistry::new(),
            animator: Animator::new(),
            scene: None,
        }
    }

    pub fn speeds(&self) -> &SpeedRegistry {
        &self.speeds
    }

    pub fn speeds_mut(&mut self) -> &mut SpeedRegistry {
        &mut self.speeds
    }

    pub fn scene(&self) -> Option<&ComposedScene> {
        self.scene.as_ref()
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for SolarSystem {
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    fn init(&mut self, ctx: &mut EngineContext, meshes: Vec<MeshData>) {
        self.scene = Some(compose(ctx, &mut self.animator, &meshes));
    }

    fn update(&mut self, ctx: &mut EngineContext, t: f32) {
        if let Some(scene) = &self.scene {
            self.animator.update(scene.root, t, ctx, &self.speeds);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use orrery_engine::{AssetManifest, LoadBatch};
    use orrery_web::GameRunner;
    use crate::belt::ASTEROID_COUNT;
    use crate::planets::Planet;

    const ROCK: &str = "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 0 0 1\no Body\nf 1 2 3\nf 1 3 4\n";

    type Runner = GameRunner<SolarSystem>;

    fn wired_batch(runner: &Rc<RefCell<Runner>>) -> LoadBatch {
        let manifest = AssetManifest::default();
        let mut batch = LoadBatch::new(manifest.meshes.clone());
        let target = runner.clone();
        batch.on_complete(move |meshes| target.borrow_mut().init(meshes));
        batch
    }

    #[test]
    fn scene_waits_for_every_rock() {
        for order in [["Rock1", "Rock2", "Rock3"], ["Rock3", "Rock2", "Rock1"], ["Rock2", "Rock1", "Rock3"]] {
            let runner = Rc::new(RefCell::new(Runner::with_frame_buffer(SolarSystem::new())));
            let mut batch = wired_batch(&runner);

            for name in &order[..2] {
                batch.resolve_text(name, Ok(ROCK.to_string()));
                assert!(runner.borrow().game().scene().is_none());
            }
            batch.resolve_text(order[2], Ok(ROCK.to_string()));

            let runner = runner.borrow();
            let scene = runner.game().scene().expect("scene composed");
            assert_eq!(
                runner.ctx().graph.get_children(scene.belt).map(|c| c.len()),
                Some(ASTEROID_COUNT)
            );
            // One mesh per rock file became a belt geometry.
            let rock_geometries = runner
                .ctx()
                .graph
                .get_children(scene.belt)
                .unwrap_or_default()
                .iter()
                .filter_map(|id| runner.ctx().scene.get(*id).and_then(|n| n.mesh))
                .map(|m| m.geometry)
                .collect::<std::collections::HashSet<_>>();
            assert_eq!(rock_geometries.len(), 3);
        }
    }

    #[test]
    fn failed_rock_still_composes() {
        let runner = Rc::new(RefCell::new(Runner::with_frame_buffer(SolarSystem::new())));
        let mut batch = wired_batch(&runner);
        batch.resolve_text("Rock1", Ok(ROCK.to_string()));
        batch.resolve_text(
            "Rock2",
            Err(orrery_engine::AssetError::Fetch { url: "./rocks/Rock2.obj".into(), reason: "404".into() }),
        );
        batch.resolve_text("Rock3", Ok(ROCK.to_string()));
        assert!(runner.borrow().game().scene().is_some());
    }

    #[test]
    fn frames_publish_instances_and_follow_speeds() {
        let mut runner = Runner::with_frame_buffer(SolarSystem::new());
        runner.init(Vec::new());
        runner.game_mut().speeds_mut().pause("all").unwrap();
        runner.frame(1000.0);
        assert!(runner.instance_count() > 0);

        let earth = runner.game().scene().and_then(|s| s.planet(Planet::Earth)).unwrap();
        let before = runner.ctx().scene.get(earth).unwrap().world;
        runner.frame(5000.0);
        assert_eq!(runner.ctx().scene.get(earth).unwrap().world, before);

        runner.game_mut().speeds_mut().reset("earth").unwrap();
        runner.frame(9000.0);
        assert_ne!(runner.ctx().scene.get(earth).unwrap().world, before);
    }
}
