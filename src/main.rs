//! Neon Catch entry point
//!
//! wasm: wires the DOM, timers, audio and WebGPU layers to the game state
//! machine. Native: runs headless sessions for balance checks.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use anyhow::{Context, anyhow};
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use neon_catch::audio::AudioManager;
    use neon_catch::hud::HudText;
    use neon_catch::platform::{Control, InputSource, key_action};
    use neon_catch::renderer::{
        GpuContext, RenderState, Vertex, colors, draw_background, draw_foreground,
    };
    use neon_catch::{Action, Effect, Game, Settings, Tuning, Viewport};

    type Shared = Rc<RefCell<App>>;

    /// Everything the page owns
    struct App {
        game: Game,
        background_canvas: HtmlCanvasElement,
        game_canvas: HtmlCanvasElement,
        background_layer: RenderState,
        game_layer: RenderState,
        audio: AudioManager,
        /// Frames requested until `StopFrameLoop`
        frame_loop: bool,
        frame_handle: Option<i32>,
        spawn_handle: Option<i32>,
        /// Last text written to the DOM
        hud: HudText,
        vertices: Vec<Vertex>,
    }

    impl App {
        fn render(&mut self) {
            let viewport = self.game.viewport();

            self.vertices.clear();
            if self.game.settings().show_background {
                draw_background(self.game.background(), &mut self.vertices);
            }
            render_layer(&mut self.background_layer, &self.vertices, viewport);

            self.vertices.clear();
            draw_foreground(self.game.session(), &mut self.vertices);
            render_layer(&mut self.game_layer, &self.vertices, viewport);
        }

        /// Write HUD strings that changed since the last frame
        fn update_hud(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let hud = self.game.hud();
            let fields = [
                ("hud-score", &hud.score, &self.hud.score),
                ("hud-time", &hud.time, &self.hud.time),
                ("hud-level", &hud.level, &self.hud.level),
            ];
            for (id, new, old) in fields {
                if new != old {
                    if let Some(el) = document.get_element_by_id(id) {
                        el.set_text_content(Some(new.as_str()));
                    }
                }
            }
            self.hud = hud;
        }

        fn resize_surfaces(&mut self, viewport: Viewport) {
            let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
            let (width, height) = device_size(viewport, dpr);
            for canvas in [&self.background_canvas, &self.game_canvas] {
                canvas.set_width(width);
                canvas.set_height(height);
            }
            self.background_layer.resize(width, height);
            self.game_layer.resize(width, height);
        }
    }

    fn render_layer(layer: &mut RenderState, vertices: &[Vertex], viewport: Viewport) {
        match layer.render(vertices, viewport) {
            Ok(_) => {}
            Err(wgpu::SurfaceError::Lost) => {
                layer.resize(layer.size.0, layer.size.1);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory!");
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }

    fn device_size(viewport: Viewport, dpr: f64) -> (u32, u32) {
        (
            (viewport.width as f64 * dpr).round().max(1.0) as u32,
            (viewport.height as f64 * dpr).round().max(1.0) as u32,
        )
    }

    fn window_viewport(window: &web_sys::Window) -> Viewport {
        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0);
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(600.0);
        Viewport::new(width as f32, height as f32)
    }

    fn canvas_by_id(document: &web_sys::Document, id: &str) -> anyhow::Result<HtmlCanvasElement> {
        document
            .get_element_by_id(id)
            .with_context(|| format!("no #{id} element"))?
            .dyn_into()
            .map_err(|_| anyhow!("#{id} is not a canvas"))
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Logger init failed: {e}").into());
        }

        log::info!("Neon Catch starting...");

        match setup().await {
            Ok(()) => log::info!("Neon Catch running!"),
            Err(e) => log::error!("Setup failed: {e:#}"),
        }
    }

    async fn setup() -> anyhow::Result<()> {
        let window = web_sys::window().context("no window")?;
        let document = window.document().context("no document")?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let background_canvas = canvas_by_id(&document, "background-canvas")?;
        let game_canvas = canvas_by_id(&document, "game-canvas")?;

        let viewport = window_viewport(&window);
        let (width, height) = device_size(viewport, window.device_pixel_ratio());
        for canvas in [&background_canvas, &game_canvas] {
            canvas.set_width(width);
            canvas.set_height(height);
        }

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let game = Game::new(viewport, Tuning::default(), settings.clone(), seed);
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let background_surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(background_canvas.clone()))
            .map_err(|e| anyhow!("failed to create background surface: {e}"))?;
        let game_surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(game_canvas.clone()))
            .map_err(|e| anyhow!("failed to create game surface: {e}"))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&game_surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| anyhow!("failed to get adapter: {e}"))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let gpu = GpuContext::new(&adapter)
            .await
            .map_err(|e| anyhow!("failed to create device: {e}"))?;
        let background_layer = RenderState::new(
            &gpu,
            background_surface,
            &adapter,
            width,
            height,
            colors::BACKGROUND,
        );
        let game_layer = RenderState::new(
            &gpu,
            game_surface,
            &adapter,
            width,
            height,
            colors::TRANSPARENT,
        );

        let app = Rc::new(RefCell::new(App {
            game,
            background_canvas,
            game_canvas,
            background_layer,
            game_layer,
            audio: AudioManager::new(&settings),
            frame_loop: false,
            frame_handle: None,
            spawn_handle: None,
            hud: HudText::default(),
            vertices: Vec::new(),
        }));

        setup_keyboard(&window, app.clone());
        setup_touch_controls(&document, app.clone());
        setup_restart_button(&document, app.clone());
        setup_window_events(&window, app.clone());

        dispatch(&app, Action::Start);
        Ok(())
    }

    /// Feed an action to the game, then execute whatever it requested
    fn dispatch(app: &Shared, action: Action) {
        app.borrow_mut().game.dispatch(action);
        run_effects(app);
    }

    fn run_effects(app: &Shared) {
        let effects = app.borrow_mut().game.take_effects();
        let Some(window) = web_sys::window() else {
            return;
        };

        for effect in effects {
            match effect {
                Effect::StartFrameLoop => {
                    app.borrow_mut().frame_loop = true;
                    request_animation_frame(app.clone());
                }
                Effect::StopFrameLoop => {
                    let mut a = app.borrow_mut();
                    a.frame_loop = false;
                    if let Some(handle) = a.frame_handle.take() {
                        let _ = window.cancel_animation_frame(handle);
                    }
                }
                Effect::ScheduleSpawn(delay) => schedule_spawn(app.clone(), delay),
                Effect::CancelSpawn => {
                    if let Some(handle) = app.borrow_mut().spawn_handle.take() {
                        window.clear_timeout_with_handle(handle);
                    }
                }
                Effect::Play(cue) => app.borrow().audio.play(cue),
                Effect::StartMusic => app.borrow_mut().audio.start_music(),
                Effect::StopMusic => app.borrow_mut().audio.stop_music(),
                Effect::ShowSummary { score } => set_summary(Some(score)),
                Effect::HideSummary => set_summary(None),
                Effect::ResizeSurfaces(viewport) => {
                    let mut a = app.borrow_mut();
                    a.resize_surfaces(viewport);
                    a.render();
                }
                Effect::SettingsChanged(settings) => {
                    settings.save();
                    let mut a = app.borrow_mut();
                    a.audio.apply_settings(&settings);
                    a.render();
                }
            }
        }
    }

    /// Show the game-over overlay with the final score, or hide it
    fn set_summary(score: Option<u64>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(score) = score {
            if let Some(el) = document.get_element_by_id("final-score") {
                el.set_text_content(Some(&score.to_string()));
            }
        }
        if let Some(el) = document.get_element_by_id("game-over") {
            let class = if score.is_some() { "" } else { "hidden" };
            let _ = el.set_attribute("class", class);
        }
    }

    fn request_animation_frame(app: Shared) {
        if app.borrow().frame_handle.is_some() {
            return;
        }
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once({
            let app = app.clone();
            move |time: f64| game_loop(app, time)
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(handle) => app.borrow_mut().frame_handle = Some(handle),
            Err(e) => log::error!("requestAnimationFrame failed: {e:?}"),
        }
        closure.forget();
    }

    fn game_loop(app: Shared, time: f64) {
        {
            let mut a = app.borrow_mut();
            a.frame_handle = None;
            a.game.frame(time);
            a.render();
            a.update_hud();
        }

        run_effects(&app);

        if app.borrow().frame_loop {
            request_animation_frame(app);
        }
    }

    fn schedule_spawn(app: Shared, delay: std::time::Duration) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once({
            let app = app.clone();
            move || {
                app.borrow_mut().spawn_handle = None;
                app.borrow_mut().game.spawn_due();
                run_effects(&app);
            }
        });
        let result = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            delay.as_millis() as i32,
        );
        match result {
            Ok(handle) => {
                let previous = app.borrow_mut().spawn_handle.replace(handle);
                if let Some(previous) = previous {
                    window.clear_timeout_with_handle(previous);
                }
            }
            Err(e) => log::error!("setTimeout failed: {e:?}"),
        }
        closure.forget();
    }

    fn setup_keyboard(window: &web_sys::Window, app: Shared) {
        for (event_name, pressed) in [("keydown", true), ("keyup", false)] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                if let Some(action) = key_action(&key, pressed) {
                    if key.starts_with("Arrow") {
                        event.prevent_default();
                    }
                    dispatch(&app, action);
                }
            });
            let _ = window
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// On-screen left/right buttons, mouse and touch
    fn setup_touch_controls(document: &web_sys::Document, app: Shared) {
        for (id, control) in [("left-btn", Control::Left), ("right-btn", Control::Right)] {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("No #{id} button");
                continue;
            };

            let press = Action::Press(control, InputSource::Pointer);
            let release = Action::Release(control, InputSource::Pointer);

            for (event_name, action) in [
                ("mousedown", press),
                ("mouseup", release),
                ("mouseleave", release),
            ] {
                let app = app.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                    event.prevent_default();
                    dispatch(&app, action);
                });
                let _ = btn
                    .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
                closure.forget();
            }

            for (event_name, action) in [
                ("touchstart", press),
                ("touchend", release),
                ("touchcancel", release),
            ] {
                let app = app.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                    event.prevent_default();
                    dispatch(&app, action);
                });
                let _ = btn
                    .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_restart_button(document: &web_sys::Document, app: Shared) {
        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                dispatch(&app, Action::Restart);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_window_events(window: &web_sys::Window, app: Shared) {
        // Resize restarts a running game at the new size
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let Some(window) = web_sys::window() else {
                    return;
                };
                dispatch(&app, Action::Resize(window_viewport(&window)));
            });
            let _ =
                window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur (click outside) drops held directions
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                dispatch(&app, Action::Blur);
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::time::Duration;

    use anyhow::Context;
    use clap::Parser;

    use neon_catch::platform::HeadlessRunner;
    use neon_catch::{Action, Game, Settings, Tuning, Viewport};

    /// Run a headless demo-mode session and print the outcome
    #[derive(Parser, Debug)]
    #[command(name = "neon-catch", version, about)]
    pub struct Args {
        /// Simulated seconds to run
        #[arg(long, default_value_t = 60)]
        pub seconds: u64,
        /// RNG seed
        #[arg(long, default_value_t = 1)]
        pub seed: u64,
        /// Viewport width in pixels
        #[arg(long, default_value_t = 800.0)]
        pub width: f32,
        /// Viewport height in pixels
        #[arg(long, default_value_t = 600.0)]
        pub height: f32,
        /// JSON file overriding gameplay tuning
        #[arg(long)]
        pub tuning: Option<PathBuf>,
        /// Simulated display refresh rate
        #[arg(long, default_value_t = 60.0)]
        pub refresh_hz: f64,
        /// Leave the paddle idle instead of using the autopilot
        #[arg(long)]
        pub idle: bool,
    }

    pub fn run(args: Args) -> anyhow::Result<()> {
        let tuning = match &args.tuning {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading tuning file {}", path.display()))?;
                Tuning::from_json(&json)?
            }
            None => Tuning::default(),
        };
        anyhow::ensure!(
            args.width > 0.0 && args.height > 0.0,
            "viewport must be non-empty"
        );
        anyhow::ensure!(args.refresh_hz > 0.0, "refresh rate must be positive");

        let viewport = Viewport::new(args.width, args.height);
        let mut game = Game::new(viewport, tuning, Settings::default(), args.seed);
        if !args.idle {
            game.dispatch(Action::ToggleDemo);
        }

        let mut runner = HeadlessRunner::new(game, args.refresh_hz);
        let report = runner.run(Duration::from_secs(args.seconds));

        println!("score:     {}", report.score);
        println!("level:     {}", report.level);
        println!("time:      {:.1}s", report.elapsed_secs);
        println!("frames:    {}", report.frames);
        println!("spawned:   {}", report.spawned);
        println!("catches:   {}", report.catches);
        println!("game over: {}", report.game_over);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::init();
    log::info!("Neon Catch (native, headless) starting...");
    native::run(native::Args::parse())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
