use std::cell::RefCell;
use orrery_engine::{
    build_render_buffer, EngineContext, FrameBufferRenderer, FrameData, Game, GameConfig,
    InputEvent, InputQueue, LightUniform, MeshData, OrbitControls, PerspectiveCamera,
    ProtocolLayout, RenderBuffer, Renderer, Rng, SimClock,
};

/// Generic runner that wires a game to the engine's frame loop.
///
/// Each concrete game keeps one runner in a `thread_local!` and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export generic
/// structs directly. Nothing here touches the browser, so the whole loop can
/// be driven from native tests.
pub struct GameRunner<G: Game, R: Renderer = FrameBufferRenderer> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    render_buffer: RenderBuffer,
    lights: Vec<LightUniform>,
    clock: SimClock,
    camera: PerspectiveCamera,
    controls: OrbitControls,
    renderer: R,
    config: GameConfig,
    viewport: (f32, f32),
    initialized: bool,
}

impl<G: Game> GameRunner<G, FrameBufferRenderer> {
    /// Runner publishing frames into a flat buffer sized from the game config.
    pub fn with_frame_buffer(game: G) -> Self {
        let layout = ProtocolLayout::from_config(&game.config());
        Self::new(game, FrameBufferRenderer::new(layout))
    }

    pub fn buffer_ptr(&self) -> *const f32 {
        self.renderer.buffer_ptr()
    }

    pub fn buffer_len(&self) -> u32 {
        self.renderer.buffer_len() as u32
    }

    pub fn layout(&self) -> &ProtocolLayout {
        self.renderer.layout()
    }
}

impl<G: Game, R: Renderer> GameRunner<G, R> {
    pub fn new(game: G, mut renderer: R) -> Self {
        let config = game.config();
        let (w, h) = (config.viewport_width, config.viewport_height);
        let camera = PerspectiveCamera::from_config(&config.camera, w, h);
        let controls = OrbitControls::new(&camera, config.camera.damping, h);
        renderer.resize(w as u32, h as u32);

        Self {
            game,
            ctx: EngineContext::with_seed(config.rng_seed),
            input: InputQueue::new(),
            render_buffer: RenderBuffer::with_capacity(config.max_instances),
            lights: Vec::with_capacity(config.max_lights),
            clock: SimClock::new(config.time_scale),
            camera,
            controls,
            renderer,
            config,
            viewport: (w, h),
            initialized: false,
        }
    }

    /// Build the scene from the loaded meshes. Only the first call has effect.
    pub fn init(&mut self, meshes: Vec<MeshData>) {
        if self.initialized {
            log::warn!("Scene already composed; ignoring repeated init");
            return;
        }
        let mesh_count = meshes.len();
        self.game.init(&mut self.ctx, meshes);
        self.ctx.propagate();
        self.initialized = true;
        log::info!(
            "Scene composed: {} nodes, {} loaded meshes, {} geometries",
            self.ctx.scene.len(),
            mesh_count,
            self.ctx.resources.geometry_count()
        );
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Replace the scene seed. Only meaningful before `init`.
    pub fn reseed(&mut self, seed: u64) {
        if self.initialized {
            log::warn!("Reseeding after the scene was composed has no effect on it");
        }
        self.ctx.rng = Rng::new(seed);
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame for a host timestamp in milliseconds.
    pub fn frame(&mut self, timestamp_ms: f64) {
        if !self.initialized {
            return;
        }

        for event in self.input.drain() {
            self.controls.handle(&event);
        }

        let t = self.clock.advance(timestamp_ms);
        self.game.update(&mut self.ctx, t);
        self.ctx.propagate();

        build_render_buffer(&self.ctx.scene, &mut self.render_buffer);
        self.ctx.lights.pack(&self.ctx.scene, &mut self.lights);

        self.renderer.draw(&FrameData {
            frame: self.clock.frames(),
            time: t,
            viewport: self.viewport,
            camera: self.camera.uniform(),
            ambient: self.ctx.lights.ambient(),
            lights: &self.lights,
            instances: &self.render_buffer.instances,
            alpha_start: self.render_buffer.alpha_start,
            additive_start: self.render_buffer.additive_start,
        });

        self.controls.update(&mut self.camera);
    }

    /// Keep camera and surface in sync with the viewport. Zero sizes are ignored.
    pub fn resize(&mut self, width: f32, height: f32) {
        if !self.camera.resize(width, height) {
            log::debug!("Ignoring resize to {width}x{height}");
            return;
        }
        self.controls.set_viewport_height(height);
        self.renderer.resize(width as u32, height as u32);
        self.viewport = (width, height);
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    pub fn ctx(&self) -> &EngineContext {
        &self.ctx
    }

    /// Mutable context, for configuring resources before the scene is composed.
    pub fn ctx_mut(&mut self) -> &mut EngineContext {
        &mut self.ctx
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn sim_time(&self) -> f32 {
        self.clock.now()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn resources_json(&self) -> Result<String, String> {
        self.ctx.resources.to_json().map_err(|e| e.to_string())
    }
}

/// Put a freshly built runner into `slot` unless one is already there.
/// Returns false, leaving the existing runner untouched, on a second call.
pub fn install<G: Game, R: Renderer>(
    slot: &RefCell<Option<GameRunner<G, R>>>,
    make: impl FnOnce() -> GameRunner<G, R>,
) -> bool {
    let mut slot = slot.borrow_mut();
    if slot.is_some() {
        return false;
    }
    *slot = Some(make());
    true
}

/// Seed for one page session, from the platform's entropy source.
pub fn session_seed(fallback: u64) -> u64 {
    getrandom::u64().unwrap_or_else(|e| {
        log::warn!("No entropy available ({e}); using the configured seed");
        fallback
    })
}
