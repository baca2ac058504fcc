//! Property tests for the simulation step

use std::collections::HashSet;

use proptest::prelude::*;

use hand_catcher::consts::*;
use hand_catcher::sim::{Ball, Catcher, GameEvent, GameState, TickInput, tick};

const FRAME_MS: f64 = 16.0;

/// Running state with the catcher parked at `catcher_x` and no balls
fn running_with_catcher(seed: u64, catcher_x: f32) -> GameState {
    let mut state = GameState::new(seed);
    tick(&mut state, &TickInput::at(0.0).with_landmark(0.5, 0.0));
    state.balls.clear();
    state.catcher.x = catcher_x;
    state
}

proptest! {
    #[test]
    fn smoothing_is_geometric(
        x0 in -500.0f32..1000.0,
        target in 0.0f32..500.0,
        n in 0i32..40,
    ) {
        let mut catcher = Catcher { x: x0 };
        for _ in 0..n {
            catcher.move_toward(target, SENSITIVITY);
        }
        let expected = target - (target - x0) * 0.6f32.powi(n);
        prop_assert!((catcher.x - expected).abs() < 1e-2);
    }

    #[test]
    fn long_absence_pauses_and_disarms(
        seed in any::<u64>(),
        present_frames in 1usize..200,
        absent_ms in 1001.0f64..5000.0,
    ) {
        let mut state = GameState::new(seed);
        let mut t = 0.0;
        for _ in 0..present_frames {
            tick(&mut state, &TickInput::at(t).with_landmark(0.5, t));
            t += FRAME_MS;
        }
        let last_seen = t - FRAME_MS;
        while t - last_seen <= absent_ms {
            tick(&mut state, &TickInput::at(t));
            t += FRAME_MS;
        }
        // First frame past the absence window
        tick(&mut state, &TickInput::at(t));
        t += FRAME_MS;
        prop_assert!(state.is_paused());
        prop_assert!(!state.spawner.timer.is_armed());

        // No spawns while paused, however long it lasts
        let balls = state.balls.len();
        for _ in 0..200 {
            let events = tick(&mut state, &TickInput::at(t));
            let spawned = events.iter().any(|e| matches!(e, GameEvent::BallSpawned { .. }));
            prop_assert!(!spawned);
            t += FRAME_MS;
        }
        prop_assert_eq!(state.balls.len(), balls);
    }

    #[test]
    fn one_immediate_ball_per_resume(
        seed in any::<u64>(),
        pattern in prop::collection::vec((any::<bool>(), 1u32..120), 1..12),
    ) {
        let mut state = GameState::new(seed);
        let mut t = 0.0;
        let mut edges = 0;
        let mut resumes = 0;

        for (present, frames) in pattern {
            for _ in 0..frames {
                let was_paused = state.is_paused();
                let input = if present {
                    TickInput::at(t).with_landmark(0.5, t)
                } else {
                    TickInput::at(t)
                };
                let events = tick(&mut state, &input);

                if was_paused && present {
                    edges += 1;
                }
                let resumed = events.iter().filter(|e| **e == GameEvent::Resumed).count();
                resumes += resumed;
                if resumed > 0 {
                    let spawned = events
                        .iter()
                        .filter(|e| matches!(e, GameEvent::BallSpawned { .. }))
                        .count();
                    prop_assert_eq!(spawned, 1);
                }
                t += FRAME_MS;
            }
        }
        prop_assert_eq!(resumes, edges);
    }

    #[test]
    fn catch_window_decides_score(
        seed in any::<u64>(),
        catcher_x in 60.0f32..440.0,
        offset in -150.0f32..150.0,
        start_y in 0.0f32..350.0,
    ) {
        prop_assume!((offset.abs() - CATCHER_WIDTH / 2.0).abs() > 0.01);

        let mut state = running_with_catcher(seed, catcher_x);
        state.balls.push(Ball { id: 10_000, x: catcher_x + offset, y: start_y, color: [0, 0, 0] });

        let mut t = FRAME_MS;
        let mut outcome = None;
        while outcome.is_none() {
            for event in tick(&mut state, &TickInput::at(t).with_landmark(catcher_x / CANVAS_WIDTH, t)) {
                match event {
                    GameEvent::Caught { id: 10_000, .. } => outcome = Some(true),
                    GameEvent::Missed { id: 10_000 } => outcome = Some(false),
                    _ => {}
                }
            }
            t += FRAME_MS;
            prop_assert!(t < 10_000.0);
        }

        let inside = offset.abs() < CATCHER_WIDTH / 2.0;
        prop_assert_eq!(outcome, Some(inside));
        prop_assert!(!state.balls.iter().any(|b| b.id == 10_000));
        // Periodic balls spawned meanwhile are still high up
        prop_assert_eq!(state.score, inside as u32);
    }

    #[test]
    fn sustained_play_stays_bounded(
        seed in any::<u64>(),
        xs in prop::collection::vec(0.0f32..1.0, 50..400),
    ) {
        let mut state = GameState::new(seed);
        let mut removed: HashSet<u32> = HashSet::new();
        let mut t = 0.0;

        // Hand always in view, wandering around
        for _ in 0..5 {
            for &x in &xs {
                let events = tick(&mut state, &TickInput::at(t).with_landmark(x, t));
                for event in events {
                    match event {
                        GameEvent::Caught { id, .. } | GameEvent::Missed { id } => {
                            prop_assert!(removed.insert(id), "ball {} removed twice", id);
                        }
                        _ => {}
                    }
                }
                // Removed balls never come back
                prop_assert!(state.balls.iter().all(|b| !removed.contains(&b.id)));
                // A ball is on screen ~101 frames; spawns are 1500ms apart
                prop_assert!(state.balls.len() <= 3);
                prop_assert!(state.particles.len() <= BURST_SIZE * 2);
                prop_assert!(state.particles.iter().all(|p| p.alpha > 0.0));
                t += FRAME_MS;
            }
        }
    }

    #[test]
    fn stalled_frames_spawn_one_ball_at_most(
        seed in any::<u64>(),
        gaps in prop::collection::vec(1.0f64..6000.0, 1..60),
    ) {
        let mut state = GameState::new(seed);
        let mut t = 0.0;
        for gap in gaps {
            // Hand stays in view across the stall
            let events = tick(&mut state, &TickInput::at(t).with_landmark(0.5, t));
            let spawned = events
                .iter()
                .filter(|e| matches!(e, GameEvent::BallSpawned { .. }))
                .count();
            prop_assert!(spawned <= 1);
            prop_assert!(state.balls.iter().filter(|b| b.y == 0.0).count() <= 1);
            t += gap;
        }
    }
}
