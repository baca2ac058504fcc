//! Scene assembly
//!
//! Turns a `GameState` into one triangle list in canvas pixel coordinates.
//! Draw order: catcher, balls, particles. Runs every frame whether or not the
//! game is paused.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors, rgb8};
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::GameState;

const CATCHER_GLOW_BLUR: f32 = 25.0;
const BALL_GLOW_BLUR: f32 = 20.0;
const PARTICLE_SEGMENTS: u32 = 8;

/// Build every vertex for the current frame
pub fn build_scene(state: &GameState, settings: &Settings) -> Vec<Vertex> {
    let glow_layers = settings.glow_layers();
    let segments = settings.quality.circle_segments();
    let mut vertices = Vec::new();

    // Catcher
    let min = Vec2::new(
        state.catcher.x - CATCHER_WIDTH / 2.0,
        CANVAS_HEIGHT - CATCHER_BOTTOM_OFFSET,
    );
    let size = Vec2::new(CATCHER_WIDTH, CATCHER_HEIGHT);
    vertices.extend(shapes::rounded_rect_glow(
        min,
        size,
        CATCHER_CORNER_RADIUS,
        CATCHER_GLOW_BLUR,
        colors::CATCHER_GLOW,
        glow_layers,
    ));
    vertices.extend(shapes::rounded_rect(
        min,
        size,
        CATCHER_CORNER_RADIUS,
        colors::CATCHER,
        6,
    ));

    // Balls
    let radius = BALL_DIAMETER / 2.0;
    for ball in state.balls.iter().rev() {
        vertices.extend(shapes::circle_glow(
            ball.pos(),
            radius,
            BALL_GLOW_BLUR,
            colors::BALL_GLOW,
            glow_layers,
            segments,
        ));
        vertices.extend(shapes::circle(ball.pos(), radius, rgb8(ball.color, 1.0), segments));
    }

    // Particles
    for particle in state.particles.iter().rev() {
        let [r, g, b] = colors::PARTICLE;
        let alpha = (particle.alpha / 255.0).clamp(0.0, 1.0);
        vertices.extend(shapes::circle(
            particle.pos,
            PARTICLE_DIAMETER / 2.0,
            [r, g, b, alpha],
            PARTICLE_SEGMENTS,
        ));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_settings() -> Settings {
        Settings {
            glow: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_state_draws_catcher_only() {
        let state = GameState::new(1);
        let verts = build_scene(&state, &plain_settings());
        assert!(!verts.is_empty());
        assert!(verts.iter().all(|v| v.color == colors::CATCHER));
    }

    #[test]
    fn test_catcher_follows_state() {
        let mut state = GameState::new(1);
        state.catcher.x = 400.0;
        let verts = build_scene(&state, &plain_settings());
        let min_x = verts.iter().map(|v| v.position[0]).fold(f32::MAX, f32::min);
        let max_x = verts.iter().map(|v| v.position[0]).fold(f32::MIN, f32::max);
        assert!((min_x - 350.0).abs() < 1e-3);
        assert!((max_x - 450.0).abs() < 1e-3);
    }

    #[test]
    fn test_balls_and_particles_add_geometry() {
        let settings = plain_settings();
        let mut state = GameState::new(1);
        let base = build_scene(&state, &settings).len();

        state.spawn_ball();
        let with_ball = build_scene(&state, &settings).len();
        assert_eq!(with_ball - base, (settings.quality.circle_segments() * 3) as usize);

        state.spawn_burst(Vec2::new(100.0, 100.0));
        let with_burst = build_scene(&state, &settings).len();
        assert_eq!(
            with_burst - with_ball,
            BURST_SIZE * (PARTICLE_SEGMENTS * 3) as usize
        );
    }

    #[test]
    fn test_particle_alpha_follows_fade() {
        let settings = plain_settings();
        let mut state = GameState::new(1);
        state.spawn_burst(Vec2::ZERO);
        for p in &mut state.particles {
            p.alpha = 127.5;
        }
        let verts = build_scene(&state, &settings);
        let last = verts.last().map(|v| v.color[3]);
        assert_eq!(last, Some(0.5));
    }
}
