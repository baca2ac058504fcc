//! Hand Catcher entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::mpsc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use hand_catcher::consts::*;
    use hand_catcher::platform::HudSync;
    use hand_catcher::platform::web::{CaptureSession, DomHud};
    use hand_catcher::renderer::{RenderState, build_scene};
    use hand_catcher::sim::GameEvent;
    use hand_catcher::{Session, Settings};

    /// Game instance holding all state
    struct Game {
        session: Session,
        settings: Settings,
        render_state: Option<RenderState>,
        hud: DomHud,
        hud_sync: HudSync,
        capture: Option<CaptureSession>,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        /// Set on teardown; the frame loop stops rescheduling itself
        stopped: bool,
    }

    impl Game {
        /// Run one simulation frame
        fn update(&mut self, time: f64) {
            for event in self.session.frame(time) {
                match event {
                    GameEvent::Resumed => log::info!("Running"),
                    GameEvent::Paused => log::info!("Paused (no hand)"),
                    GameEvent::Caught { score, .. } => log::debug!("Catch! score {}", score),
                    _ => {}
                }
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            // Calculate FPS from oldest to newest frame
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = build_scene(&self.session.state, &self.settings);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self) {
            let update = self.hud_sync.update(&self.session.hud());
            if !update.is_empty() {
                self.hud.apply(&update);
            }
            if self.settings.show_fps {
                self.hud.set_fps(self.fps);
            }
        }

        /// Stop the frame loop and release the camera
        fn shutdown(&mut self) {
            if self.stopped {
                return;
            }
            self.stopped = true;
            if let Some(mut capture) = self.capture.take() {
                capture.stop();
            }
            log::info!("Hand Catcher stopped (score {})", self.session.state.score);
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&format!("logger: {}", e)))?;

        log::info!("Hand Catcher starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;

        // Fixed-size canvas, backed at device resolution
        let dpr = window.device_pixel_ratio();
        let width = (CANVAS_WIDTH as f64 * dpr) as u32;
        let height = (CANVAS_HEIGHT as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        let style = canvas.style();
        style.set_property("width", &format!("{}px", CANVAS_WIDTH))?;
        style.set_property("height", &format!("{}px", CANVAS_HEIGHT))?;

        let settings = Settings::load();

        // Landmarks flow from the inference callback to the frame loop
        let (landmark_tx, landmark_rx) = mpsc::channel();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            session: Session::new(seed, &settings, landmark_rx),
            settings: settings.clone(),
            render_state: None,
            hud: DomHud::find(&document),
            hud_sync: HudSync::default(),
            capture: None,
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
            stopped: false,
        }));

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&format!("surface: {}", e)))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("adapter: {}", e)))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state =
            RenderState::new(surface, &adapter, width, height, (CANVAS_WIDTH, CANVAS_HEIGHT))
                .await
                .map_err(|e| JsValue::from_str(&format!("device: {}", e)))?;
        game.borrow_mut().render_state = Some(render_state);

        // Tear down on navigation away
        setup_teardown(game.clone());

        // Start game loop (paused until a hand shows up)
        request_animation_frame(game.clone());

        // Camera + inference start in the background
        start_capture(game, settings, landmark_tx);

        log::info!("Hand Catcher running!");
        Ok(())
    }

    fn start_capture(
        game: Rc<RefCell<Game>>,
        settings: Settings,
        tx: mpsc::Sender<hand_catcher::LandmarkEvent>,
    ) {
        wasm_bindgen_futures::spawn_local(async move {
            match CaptureSession::start("video", &settings, tx).await {
                Ok(capture) => {
                    let mut g = game.borrow_mut();
                    if g.stopped {
                        // Torn down while starting; dropping stops it
                        drop(capture);
                    } else {
                        g.capture = Some(capture);
                    }
                }
                Err(e) => log::error!("Camera/inference failed to start: {:?}", e),
            }
        });
    }

    fn setup_teardown(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().shutdown();
        });
        let _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            if g.stopped {
                return;
            }

            g.update(time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Hand Catcher (native) starting...");
    log::info!("Native mode runs a scripted hand headless - run with `trunk serve` for the camera version");

    native_demo::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless run with a scripted hand on its own thread, in real time
#[cfg(not(target_arch = "wasm32"))]
mod native_demo {
    use std::thread;
    use std::time::{Duration, Instant};

    use anyhow::Context;

    use hand_catcher::sim::GameEvent;
    use hand_catcher::{ScriptedHand, Session, Settings, spawn_landmark_source};

    const FRAME: Duration = Duration::from_micros(16_667);
    const CAMERA_FRAME_MS: f64 = 33.0;
    const RUN_MS: f64 = 8000.0;

    pub fn run() -> anyhow::Result<()> {
        let settings = match std::env::var("HAND_CATCHER_SETTINGS") {
            Ok(json) => Settings::from_json(&json).context("HAND_CATCHER_SETTINGS")?,
            Err(_) => Settings::load(),
        };

        // Hand in view, out of view long enough to pause, then back
        let script = ScriptedHand::new(CAMERA_FRAME_MS)
            .present(0.0, 1500.0, 0.5)
            .absent(1500.0, 2600.0)
            .present(2600.0, 5000.0, 0.3)
            .present(5000.0, 7000.0, 0.7)
            .realtime();

        let start = Instant::now();
        let landmarks = spawn_landmark_source(script);
        let mut session = Session::new(0x5eed, &settings, landmarks);

        let mut caught = 0u32;
        let mut missed = 0u32;
        loop {
            let now_ms = start.elapsed().as_secs_f64() * 1000.0;
            if now_ms > RUN_MS {
                break;
            }

            for event in session.frame(now_ms) {
                match event {
                    GameEvent::Resumed => log::info!("[{:>5.0}ms] hand in view, running", now_ms),
                    GameEvent::Paused => log::info!("[{:>5.0}ms] hand lost, paused", now_ms),
                    GameEvent::BallSpawned { id, x } => {
                        log::info!("[{:>5.0}ms] ball {} spawned at x={:.0}", now_ms, id, x)
                    }
                    GameEvent::Caught { id, score } => {
                        caught += 1;
                        log::info!("[{:>5.0}ms] ball {} caught, score {}", now_ms, id, score);
                    }
                    GameEvent::Missed { id } => {
                        missed += 1;
                        log::info!("[{:>5.0}ms] ball {} missed", now_ms, id);
                    }
                }
            }

            thread::sleep(FRAME);
        }

        let hud = session.hud();
        println!(
            "{} | caught {} missed {} | {} balls in play{}",
            hud.score_text(),
            caught,
            missed,
            session.state.balls.len(),
            if hud.paused { " | paused" } else { "" }
        );
        Ok(())
    }
}
