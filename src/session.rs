//! Frame driver
//!
//! A [`Session`] owns the game state and the receiving end of the landmark
//! channel. Each animation frame it drains whatever landmarks arrived since
//! the last frame, runs one simulation tick, and folds the resulting events
//! into the HUD state.

use std::sync::mpsc::{Receiver, TryRecvError};

use crate::landmarks::LandmarkEvent;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, TickInput, tick};

/// What the DOM overlay should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudState {
    pub score: u32,
    pub paused: bool,
}

impl HudState {
    pub fn score_text(&self) -> String {
        format!("Score: {}", self.score)
    }

    pub const PAUSE_TEXT: &'static str = "⏸ Game Paused (Show your hand to start)";
}

pub struct Session {
    pub state: GameState,
    landmarks: Receiver<LandmarkEvent>,
    /// Set once the landmark sender is gone; treated as "no hand"
    disconnected: bool,
}

impl Session {
    pub fn new(seed: u64, settings: &Settings, landmarks: Receiver<LandmarkEvent>) -> Self {
        Self {
            state: GameState::new(seed).with_particles(settings.particles),
            landmarks,
            disconnected: false,
        }
    }

    /// Landmarks that arrived since the last call, oldest first
    fn drain_landmarks(&mut self) -> Vec<LandmarkEvent> {
        let mut events = Vec::new();
        if self.disconnected {
            return events;
        }
        loop {
            match self.landmarks.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    log::warn!("Landmark source disconnected");
                    self.disconnected = true;
                    break;
                }
            }
        }
        events
    }

    /// Run one frame at `now_ms`
    pub fn frame(&mut self, now_ms: f64) -> Vec<GameEvent> {
        let input = TickInput {
            now_ms,
            landmarks: self.drain_landmarks(),
        };
        tick(&mut self.state, &input)
    }

    pub fn hud(&self) -> HudState {
        HudState {
            score: self.state.score,
            paused: self.state.is_paused(),
        }
    }

    pub fn is_disconnected(&self) -> bool {
        self.disconnected
    }
}
