//! Browser capture and HUD
//!
//! Camera and hand inference live in JS (MediaPipe Hands + Camera utils,
//! loaded by the page as globals). Results come back as a flat `Float32Array`
//! and are turned into [`LandmarkEvent`]s on the Rust side.

use std::sync::mpsc::Sender;

use js_sys::{Float32Array, Promise};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, HtmlElement};

use super::HudUpdate;
use crate::landmarks::{LandmarkEvent, event_from_flat};
use crate::session::HudState;
use crate::settings::Settings;

#[wasm_bindgen(inline_js = "
    let camera = null;
    let hands = null;
    let video = null;

    export function start_hand_tracking(video_id, width, height, options_json, on_results) {
        const Hands = globalThis.Hands;
        const Camera = globalThis.Camera;
        if (!Hands || !Camera) {
            throw new Error('MediaPipe Hands / Camera scripts not loaded');
        }
        video = document.getElementById(video_id);
        if (!video) {
            throw new Error('missing video element #' + video_id);
        }
        video.style.display = 'none';

        hands = new Hands({
            locateFile: (file) => `https://cdn.jsdelivr.net/npm/@mediapipe/hands/${file}`,
        });
        hands.setOptions(JSON.parse(options_json));
        hands.onResults((results) => {
            const all = results.multiHandLandmarks || [];
            const flat = new Float32Array(all.length * 63);
            let i = 0;
            for (const hand of all) {
                for (const p of hand) {
                    flat[i++] = p.x;
                    flat[i++] = p.y;
                    flat[i++] = p.z || 0;
                }
            }
            on_results(flat, performance.now());
        });

        camera = new Camera(video, {
            onFrame: async () => {
                if (hands) {
                    await hands.send({ image: video });
                }
            },
            width: width,
            height: height,
        });
        return camera.start();
    }

    export function stop_hand_tracking() {
        if (camera) {
            camera.stop();
            camera = null;
        }
        if (hands) {
            hands.close();
            hands = null;
        }
        if (video && video.srcObject) {
            video.srcObject.getTracks().forEach((t) => t.stop());
            video.srcObject = null;
        }
        video = null;
    }
")]
extern "C" {
    #[wasm_bindgen(catch)]
    fn start_hand_tracking(
        video_id: &str,
        width: u32,
        height: u32,
        options_json: &str,
        on_results: &Closure<dyn FnMut(Float32Array, f64)>,
    ) -> Result<Promise, JsValue>;

    fn stop_hand_tracking();
}

/// Running camera + inference. Stops both when dropped, however far startup got.
pub struct CaptureSession {
    on_results: Closure<dyn FnMut(Float32Array, f64)>,
    active: bool,
}

impl CaptureSession {
    /// Start the camera and hand inference, forwarding fingertip events to `tx`
    pub async fn start(
        video_id: &str,
        settings: &Settings,
        tx: Sender<LandmarkEvent>,
    ) -> Result<Self, JsValue> {
        let options = serde_json::to_string(&settings.inference)
            .map_err(|e| JsValue::from_str(&format!("inference options: {}", e)))?;

        let on_results = Closure::<dyn FnMut(Float32Array, f64)>::new(
            move |flat: Float32Array, timestamp_ms: f64| {
                if let Some(event) = event_from_flat(&flat.to_vec(), timestamp_ms) {
                    // Receiver gone means the game was torn down
                    let _ = tx.send(event);
                }
            },
        );

        // Marked active up front so a failed start still gets cleaned up
        let session = Self {
            on_results,
            active: true,
        };
        let promise = start_hand_tracking(
            video_id,
            settings.video_width,
            settings.video_height,
            &options,
            &session.on_results,
        )?;
        JsFuture::from(promise).await?;

        log::info!(
            "Camera started ({}x{})",
            settings.video_width,
            settings.video_height
        );
        Ok(session)
    }

    /// Release camera and inference. Safe to call more than once.
    pub fn stop(&mut self) {
        if self.active {
            stop_hand_tracking();
            self.active = false;
            log::info!("Camera stopped");
        }
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Score label, pause overlay and optional FPS counter
pub struct DomHud {
    score: Option<Element>,
    paused: Option<HtmlElement>,
    fps: Option<Element>,
}

impl DomHud {
    pub fn find(document: &Document) -> Self {
        let paused = document
            .get_element_by_id("paused")
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        if let Some(el) = &paused {
            el.set_text_content(Some(HudState::PAUSE_TEXT));
        }
        let hud = Self {
            score: document.get_element_by_id("score"),
            paused,
            fps: document.get_element_by_id("fps"),
        };
        if hud.score.is_none() {
            log::warn!("No #score element, score label disabled");
        }
        hud
    }

    pub fn apply(&self, update: &HudUpdate) {
        if let (Some(el), Some(text)) = (&self.score, &update.score_text) {
            el.set_text_content(Some(text));
        }
        if let (Some(el), Some(visible)) = (&self.paused, update.pause_visible) {
            let display = if visible { "block" } else { "none" };
            let _ = el.style().set_property("display", display);
        }
    }

    pub fn set_fps(&self, fps: u32) {
        if let Some(el) = &self.fps {
            el.set_text_content(Some(&fps.to_string()));
        }
    }
}
