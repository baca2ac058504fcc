//! Game settings and preferences
//!
//! Read from LocalStorage in the browser. Gameplay numbers are fixed in
//! `consts`; these cover presentation, capture and inference options.

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::consts::{VIDEO_HEIGHT, VIDEO_WIDTH};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    /// Number of halo layers drawn around glowing shapes
    pub fn glow_layers(&self) -> u32 {
        match self {
            QualityPreset::Low => 0,
            QualityPreset::Medium => 3,
            QualityPreset::High => 6,
        }
    }

    /// Circle tessellation
    pub fn circle_segments(&self) -> u32 {
        match self {
            QualityPreset::Low => 12,
            QualityPreset::Medium => 24,
            QualityPreset::High => 48,
        }
    }
}

/// Hand inference options handed to the landmark model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InferenceOptions {
    pub max_num_hands: u32,
    pub model_complexity: u32,
    pub min_detection_confidence: f32,
    pub min_tracking_confidence: f32,
}

impl Default for InferenceOptions {
    fn default() -> Self {
        Self {
            max_num_hands: 1,
            model_complexity: 1,
            min_detection_confidence: 0.7,
            min_tracking_confidence: 0.7,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Splash particles on catch
    pub particles: bool,
    /// Glow halos around the catcher and balls
    pub glow: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Capture ===
    pub video_width: u32,
    pub video_height: u32,
    pub inference: InferenceOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            particles: true,
            glow: true,

            show_fps: false,

            video_width: VIDEO_WIDTH,
            video_height: VIDEO_HEIGHT,
            inference: InferenceOptions::default(),
        }
    }
}

impl Settings {
    /// Effective halo layer count
    pub fn glow_layers(&self) -> u32 {
        if !self.glow {
            0
        } else {
            self.quality.glow_layers()
        }
    }

    /// Parse settings JSON; missing fields take defaults
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("invalid settings JSON")
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "hand_catcher_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {:#}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native: defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
