//! Per-frame simulation step
//!
//! Core game loop that advances the simulation one rendered frame.

use super::collision::{CatchResult, catch_test};
use super::presence::PresenceEdge;
use super::state::{GameEvent, GameState};
use crate::consts::*;
use crate::landmarks::LandmarkEvent;
use crate::normalized_to_canvas_x;

/// Input for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Frame time (ms, same clock as landmark timestamps)
    pub now_ms: f64,
    /// Landmarks that arrived since the previous frame, oldest first.
    /// Presence uses their own timestamps; one already older than the
    /// presence window still steers but cannot resume the game.
    pub landmarks: Vec<LandmarkEvent>,
}

impl TickInput {
    pub fn at(now_ms: f64) -> Self {
        Self {
            now_ms,
            landmarks: Vec::new(),
        }
    }

    pub fn with_landmark(mut self, x: f32, timestamp_ms: f64) -> Self {
        self.landmarks.push(LandmarkEvent { x, timestamp_ms });
        self
    }
}

/// Advance the game state by one frame
///
/// Drawing happens after this returns, so anything created here (bursts,
/// new balls) is drawn once in its initial state before it first moves.
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Steering and presence from landmarks
    for landmark in &input.landmarks {
        let target = normalized_to_canvas_x(landmark.x);
        state.catcher.move_toward(target, SENSITIVITY);

        if state.presence.is_stale(landmark.timestamp_ms, input.now_ms) {
            log::debug!(
                "Stale landmark from {:.0}ms ignored for presence",
                landmark.timestamp_ms
            );
            continue;
        }
        if state.presence.on_landmark(landmark.timestamp_ms) == Some(PresenceEdge::Resumed) {
            log::info!("Hand detected, resuming at {:.0}ms", landmark.timestamp_ms);
            state.spawner.on_enter_running(landmark.timestamp_ms);
            events.push(GameEvent::Resumed);
        }
    }

    // Presence timeout is checked every frame, hand or not
    if state.presence.tick(input.now_ms) == Some(PresenceEdge::Paused) {
        log::info!("Hand lost, pausing at {:.0}ms", input.now_ms);
        state.spawner.on_enter_paused();
        events.push(GameEvent::Paused);
    }

    // Particles keep fading even while paused. Runs before catches so a new
    // burst is drawn at full alpha.
    state.particles.retain_mut(|p| p.update());

    // Balls only move while running; paused balls stay frozen in place
    if state.presence.is_running() {
        for i in (0..state.balls.len()).rev() {
            state.balls[i].y += BALL_SPEED;

            match catch_test(&state.balls[i], &state.catcher) {
                CatchResult::Caught => {
                    let ball = state.balls.remove(i);
                    state.score += 1;
                    state.spawn_burst(ball.pos());
                    log::debug!("Ball {} caught, score {}", ball.id, state.score);
                    events.push(GameEvent::Caught {
                        id: ball.id,
                        score: state.score,
                    });
                }
                CatchResult::Missed => {
                    let ball = state.balls.remove(i);
                    events.push(GameEvent::Missed { id: ball.id });
                }
                CatchResult::Falling => {}
            }
        }
    }

    // New balls last, so they are drawn at the top edge before falling
    state.spawner.poll(input.now_ms);
    let requests: Vec<_> = state.spawner.drain().collect();
    for request in requests {
        let ball = state.spawn_ball();
        log::debug!(
            "Ball {} spawned at x={:.1} (due {:.0}ms)",
            ball.id,
            ball.x,
            request.at_ms
        );
        events.push(GameEvent::BallSpawned {
            id: ball.id,
            x: ball.x,
        });
    }

    events
}
