pub mod animation;
pub mod loader;
pub mod runner;

pub use orrery_engine;
pub use runner::GameRunner;

/// Generate all `#[wasm_bindgen]` lifecycle exports for a scene.
///
/// Generates:
/// - `thread_local!` storage for the GameRunner
/// - `with_runner()` helper returning `None` before `orrery_init`
/// - `orrery_init` (call-once; later calls are ignored), which loads the manifest's meshes and, once all of them
///   resolve, composes the scene and starts the frame loop
/// - resize, pointer and wheel input, buffer and resource accessors
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod game;
/// use game::MyScene;
///
/// orrery_web::export_orrery!(MyScene, "my-scene");
/// ```
///
/// The game type must provide `new()`.
#[macro_export]
macro_rules! export_orrery {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> Option<R> {
            RUNNER.with(|cell| cell.borrow_mut().as_mut().map(f))
        }

        #[wasm_bindgen]
        pub fn orrery_init(manifest_json: Option<String>) -> Result<(), JsValue> {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let manifest = match manifest_json {
                Some(json) => $crate::orrery_engine::AssetManifest::from_json(&json)
                    .map_err(|e| JsValue::from_str(&e.to_string()))?,
                None => $crate::orrery_engine::AssetManifest::default(),
            };

            let fresh = RUNNER.with(|cell| {
                $crate::runner::install(cell, || {
                    let mut runner = $crate::GameRunner::with_frame_buffer(<$game_type>::new());
                    let seed = $crate::runner::session_seed(runner.config().rng_seed);
                    runner.reseed(seed);
                    runner.ctx_mut().resources.set_texture_dir(manifest.texture_dir.clone());
                    runner
                })
            });
            if !fresh {
                log::warn!("{}: orrery_init called again; keeping the running scene", $game_name);
                return Ok(());
            }
            log::info!("{}: loading {} mesh asset(s)", $game_name, manifest.meshes.len());

            $crate::loader::load_meshes(&manifest, |meshes| {
                with_runner(|r| r.init(meshes));
                let started = $crate::animation::listen_resize(|w, h| {
                    with_runner(|r| r.resize(w, h));
                })
                .and_then(|()| {
                    $crate::animation::start_loop(|t| {
                        with_runner(|r| r.frame(t));
                    })
                });
                match started {
                    Ok(()) => log::info!("{}: running", $game_name),
                    Err(e) => log::error!("{}: failed to start frame loop: {:?}", $game_name, e),
                }
            });
            Ok(())
        }

        #[wasm_bindgen]
        pub fn orrery_resize(width: f32, height: f32) {
            with_runner(|r| r.resize(width, height));
        }

        #[wasm_bindgen]
        pub fn orrery_pointer_down(x: f32, y: f32) {
            with_runner(|r| r.push_input($crate::orrery_engine::InputEvent::PointerDown { x, y }));
        }

        #[wasm_bindgen]
        pub fn orrery_pointer_up(x: f32, y: f32) {
            with_runner(|r| r.push_input($crate::orrery_engine::InputEvent::PointerUp { x, y }));
        }

        #[wasm_bindgen]
        pub fn orrery_pointer_move(x: f32, y: f32) {
            with_runner(|r| r.push_input($crate::orrery_engine::InputEvent::PointerMove { x, y }));
        }

        #[wasm_bindgen]
        pub fn orrery_wheel(delta_y: f32) {
            with_runner(|r| r.push_input($crate::orrery_engine::InputEvent::Wheel { delta_y }));
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn orrery_is_ready() -> bool {
            with_runner(|r| r.is_initialized()).unwrap_or(false)
        }

        #[wasm_bindgen]
        pub fn get_buffer_ptr() -> *const f32 {
            with_runner(|r| r.buffer_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(|r| r.buffer_len()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_instance_count() -> u32 {
            with_runner(|r| r.instance_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_max_instances() -> u32 {
            with_runner(|r| r.layout().max_instances as u32).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_max_lights() -> u32 {
            with_runner(|r| r.layout().max_lights as u32).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_resources_json() -> Result<String, JsValue> {
            with_runner(|r| r.resources_json())
                .ok_or_else(|| JsValue::from_str("orrery_init has not been called"))?
                .map_err(|e| JsValue::from_str(&e))
        }
    };
}
