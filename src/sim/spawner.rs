//! Ball spawning
//!
//! The periodic timer is polled with the frame clock instead of running on its
//! own, and fires at most once per poll. Everything it produces goes through a
//! single-consumer queue that the tick drains once per frame, so a spawn that
//! comes due between two frames shows up on the next one.

use std::collections::VecDeque;

use crate::consts::SPAWN_INTERVAL_MS;

/// Request for one new ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRequest {
    /// When the request was issued (ms)
    pub at_ms: f64,
}

/// Repeating timer. Disarmed timers never fire.
#[derive(Debug, Clone)]
pub struct SpawnTimer {
    interval_ms: f64,
    next_fire_ms: Option<f64>,
}

impl SpawnTimer {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            next_fire_ms: None,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.next_fire_ms.is_some()
    }

    /// Arm the timer with its first fire one interval after `now_ms`.
    /// Returns false (and leaves the schedule alone) if already armed.
    pub fn arm(&mut self, now_ms: f64) -> bool {
        if self.next_fire_ms.is_some() {
            return false;
        }
        self.next_fire_ms = Some(now_ms + self.interval_ms);
        true
    }

    pub fn disarm(&mut self) {
        self.next_fire_ms = None;
    }

    /// Fire at most once if due by `now_ms`. After a stall longer than one
    /// interval the schedule restarts from `now_ms` instead of bursting.
    pub fn poll(&mut self, now_ms: f64, mut fire: impl FnMut(f64)) {
        if self.interval_ms <= 0.0 {
            return;
        }
        let Some(due) = self.next_fire_ms else {
            return;
        };
        if due > now_ms {
            return;
        }
        fire(due);
        let mut next = due + self.interval_ms;
        if next <= now_ms {
            log::debug!("Spawn timer {:.0}ms behind, re-anchoring", now_ms - due);
            next = now_ms + self.interval_ms;
        }
        self.next_fire_ms = Some(next);
    }
}

/// Owns the periodic timer and the pending spawn queue
#[derive(Debug, Clone)]
pub struct Spawner {
    pub timer: SpawnTimer,
    queue: VecDeque<SpawnRequest>,
}

impl Default for Spawner {
    fn default() -> Self {
        Self::new(SPAWN_INTERVAL_MS)
    }
}

impl Spawner {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            timer: SpawnTimer::new(interval_ms),
            queue: VecDeque::new(),
        }
    }

    /// One ball right away, then one per interval
    pub fn on_enter_running(&mut self, now_ms: f64) {
        self.queue.push_back(SpawnRequest { at_ms: now_ms });
        if self.timer.arm(now_ms) {
            log::debug!("Spawn timer armed at {:.0}ms", now_ms);
        }
    }

    /// Stop periodic spawning. Balls already in the air are left alone.
    pub fn on_enter_paused(&mut self) {
        if self.timer.is_armed() {
            self.timer.disarm();
            log::debug!("Spawn timer disarmed");
        }
    }

    /// Move a due timer fire into the queue
    pub fn poll(&mut self, now_ms: f64) {
        let queue = &mut self.queue;
        self.timer
            .poll(now_ms, |at_ms| queue.push_back(SpawnRequest { at_ms }));
    }

    /// Take every pending request (oldest first)
    pub fn drain(&mut self) -> impl Iterator<Item = SpawnRequest> + '_ {
        self.queue.drain(..)
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}
