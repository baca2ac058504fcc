//! Platform abstraction layer
//!
//! Handles browser specifics for:
//! - Camera capture and hand inference (MediaPipe, driven from JS)
//! - HUD elements in the DOM
//!
//! [`HudSync`] is shared by both targets and only reports what changed.

#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::session::HudState;

/// Changes to push to the HUD this frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HudUpdate {
    /// New score label text
    pub score_text: Option<String>,
    /// New pause overlay visibility
    pub pause_visible: Option<bool>,
}

impl HudUpdate {
    pub fn is_empty(&self) -> bool {
        self.score_text.is_none() && self.pause_visible.is_none()
    }
}

/// Remembers the last HUD state that was applied
#[derive(Debug, Default)]
pub struct HudSync {
    applied: Option<HudState>,
}

impl HudSync {
    pub fn update(&mut self, next: &HudState) -> HudUpdate {
        let mut update = HudUpdate::default();
        match &self.applied {
            Some(prev) => {
                if prev.score != next.score {
                    update.score_text = Some(next.score_text());
                }
                if prev.paused != next.paused {
                    update.pause_visible = Some(next.paused);
                }
            }
            None => {
                update.score_text = Some(next.score_text());
                update.pause_visible = Some(next.paused);
            }
        }
        self.applied = Some(next.clone());
        update
    }
}
