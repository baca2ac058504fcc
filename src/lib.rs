//! Hand Catcher - A hand-tracked ball catching game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (presence, spawning, falling balls, particles)
//! - `landmarks`: Hand landmark adapter and event channel
//! - `session`: Frame driver that feeds landmark events into the simulation
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser camera/inference and DOM glue

pub mod landmarks;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use landmarks::{LandmarkEvent, LandmarkSource, ScriptedHand, spawn_landmark_source};
pub use session::{HudState, Session};
pub use settings::{InferenceOptions, QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Render surface dimensions (pixels)
    pub const CANVAS_WIDTH: f32 = 500.0;
    pub const CANVAS_HEIGHT: f32 = 400.0;

    /// Camera capture resolution fed to inference
    pub const VIDEO_WIDTH: u32 = 640;
    pub const VIDEO_HEIGHT: u32 = 480;

    /// Catcher starting center x
    pub const CATCHER_START_X: f32 = 200.0;
    /// Catcher paddle size; collision window is half the width on each side
    pub const CATCHER_WIDTH: f32 = 100.0;
    pub const CATCHER_HEIGHT: f32 = 20.0;
    pub const CATCHER_CORNER_RADIUS: f32 = 10.0;
    /// Distance from canvas bottom to the catcher's top edge
    pub const CATCHER_BOTTOM_OFFSET: f32 = 30.0;
    /// Balls below `CANVAS_HEIGHT - CATCH_BAND_OFFSET` can be caught
    pub const CATCH_BAND_OFFSET: f32 = 40.0;
    /// Exponential smoothing factor toward the fingertip target
    pub const SENSITIVITY: f32 = 0.4;

    /// Ball defaults
    pub const BALL_DIAMETER: f32 = 25.0;
    /// Downward speed (pixels per frame)
    pub const BALL_SPEED: f32 = 4.0;
    /// Horizontal spawn range [min, max)
    pub const BALL_SPAWN_MIN_X: f32 = 20.0;
    pub const BALL_SPAWN_MAX_X: f32 = 480.0;

    /// Particle burst on catch
    pub const BURST_SIZE: usize = 8;
    pub const PARTICLE_DIAMETER: f32 = 6.0;
    /// Fade on a 0-255 scale
    pub const PARTICLE_START_ALPHA: f32 = 255.0;
    pub const PARTICLE_FADE_STEP: f32 = 8.0;

    /// Presence window: no landmark for longer than this pauses the game
    pub const PRESENCE_TIMEOUT_MS: f64 = 1000.0;
    /// Periodic ball spawn interval while running
    pub const SPAWN_INTERVAL_MS: f64 = 1500.0;

    /// Hand landmark index of the index fingertip
    pub const INDEX_FINGER_TIP: usize = 8;
}

/// Map a normalized [0, 1] horizontal coordinate onto the canvas
#[inline]
pub fn normalized_to_canvas_x(x: f32) -> f32 {
    x * consts::CANVAS_WIDTH
}
