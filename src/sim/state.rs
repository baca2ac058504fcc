//! Game state and core simulation types

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::presence::Presence;
use super::spawner::Spawner;
use crate::consts::*;

/// Catcher paddle, steered by the fingertip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Catcher {
    /// Paddle center (pixels). Not clamped to the canvas.
    pub x: f32,
}

impl Default for Catcher {
    fn default() -> Self {
        Self { x: CATCHER_START_X }
    }
}

impl Catcher {
    /// One exponential smoothing step toward `target_x`
    pub fn move_toward(&mut self, target_x: f32, sensitivity: f32) {
        self.x += (target_x - self.x) * sensitivity;
    }

    pub fn half_width(&self) -> f32 {
        CATCHER_WIDTH / 2.0
    }
}

/// A falling ball
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    /// RGB, fixed at spawn
    pub color: [u8; 3],
}

impl Ball {
    /// Random x in the spawn range, top of the canvas, random color
    pub fn random(id: u32, rng: &mut Pcg32) -> Self {
        Self {
            id,
            x: rng.random_range(BALL_SPAWN_MIN_X..BALL_SPAWN_MAX_X),
            y: 0.0,
            color: [rng.random(), rng.random(), rng.random()],
        }
    }

    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// A splash particle for catch effects
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 0-255, decreases every frame
    pub alpha: f32,
}

impl Particle {
    /// Small random sideways drift, biased upward
    pub fn splash(origin: Vec2, rng: &mut Pcg32) -> Self {
        Self {
            pos: origin,
            vel: Vec2::new(rng.random_range(-2.0..2.0), rng.random_range(-3.0..-1.0)),
            alpha: PARTICLE_START_ALPHA,
        }
    }

    /// Advance one frame; returns false once fully faded
    pub fn update(&mut self) -> bool {
        self.pos += self.vel;
        self.alpha -= PARTICLE_FADE_STEP;
        self.alpha > 0.0
    }
}

/// Things that happened during a tick, for HUD and logging
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A hand appeared while paused
    Resumed,
    /// No hand within the presence window
    Paused,
    BallSpawned { id: u32, x: f32 },
    /// Ball landed in the catcher; carries the new score
    Caught { id: u32, score: u32 },
    /// Ball fell past the bottom edge
    Missed { id: u32 },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    rng: Pcg32,
    pub score: u32,
    pub catcher: Catcher,
    /// Active balls (insertion order, ids increase)
    pub balls: Vec<Ball>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub presence: Presence,
    pub spawner: Spawner,
    /// Spawn catch bursts (off reproduces the plain variant)
    pub particles_enabled: bool,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new, paused game state with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            score: 0,
            catcher: Catcher::default(),
            balls: Vec::new(),
            particles: Vec::new(),
            presence: Presence::default(),
            spawner: Spawner::default(),
            particles_enabled: true,
            next_id: 1,
        }
    }

    pub fn with_particles(mut self, enabled: bool) -> Self {
        self.particles_enabled = enabled;
        self
    }

    pub fn is_paused(&self) -> bool {
        self.presence.paused
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn a ball at a random position along the top edge
    pub fn spawn_ball(&mut self) -> &Ball {
        let id = self.next_entity_id();
        let ball = Ball::random(id, &mut self.rng);
        self.balls.push(ball);
        &self.balls[self.balls.len() - 1]
    }

    /// Spawn one burst of splash particles at `origin`
    pub fn spawn_burst(&mut self, origin: Vec2) {
        if !self.particles_enabled {
            return;
        }
        for _ in 0..BURST_SIZE {
            let particle = Particle::splash(origin, &mut self.rng);
            self.particles.push(particle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_paused_and_empty() {
        let state = GameState::new(1);
        assert!(state.is_paused());
        assert!(state.balls.is_empty());
        assert!(state.particles.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.catcher.x, CATCHER_START_X);
    }

    #[test]
    fn test_spawned_ball_in_range() {
        let mut state = GameState::new(7);
        for _ in 0..500 {
            let ball = state.spawn_ball().clone();
            assert!(ball.x >= BALL_SPAWN_MIN_X && ball.x < BALL_SPAWN_MAX_X);
            assert_eq!(ball.y, 0.0);
        }
        // Ids are unique and increasing
        assert!(state.balls.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[test]
    fn test_burst_particles() {
        let mut state = GameState::new(3);
        state.spawn_burst(Vec2::new(100.0, 365.0));
        assert_eq!(state.particles.len(), BURST_SIZE);
        for p in &state.particles {
            assert_eq!(p.pos, Vec2::new(100.0, 365.0));
            assert_eq!(p.alpha, PARTICLE_START_ALPHA);
            assert!(p.vel.x >= -2.0 && p.vel.x < 2.0);
            assert!(p.vel.y >= -3.0 && p.vel.y < -1.0);
        }
    }

    #[test]
    fn test_burst_disabled() {
        let mut state = GameState::new(3).with_particles(false);
        state.spawn_burst(Vec2::ZERO);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_particle_lifetime_is_32_updates() {
        let mut rng = Pcg32::seed_from_u64(0);
        let mut particle = Particle::splash(Vec2::ZERO, &mut rng);
        let mut updates = 0;
        while particle.update() {
            updates += 1;
        }
        // The update that crosses zero is the 32nd
        assert_eq!(updates + 1, 32);
        assert_eq!(particle.alpha, -1.0);
    }

    #[test]
    fn test_catcher_smoothing_step() {
        let mut catcher = Catcher { x: 200.0 };
        catcher.move_toward(250.0, SENSITIVITY);
        assert!((catcher.x - 220.0).abs() < 1e-4);
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let mut a = GameState::new(42);
        let mut b = GameState::new(42);
        for _ in 0..10 {
            assert_eq!(a.spawn_ball(), b.spawn_ball());
        }
    }
}
