//! Hand presence tracking
//!
//! Turns landmark arrival times into a paused/running flag. The only input
//! signal is recency: a landmark resumes the game instantly, and going longer
//! than the timeout without one pauses it.

use crate::consts::PRESENCE_TIMEOUT_MS;

/// A pause/resume transition reported by [`Presence`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceEdge {
    /// Paused -> running (a hand appeared)
    Resumed,
    /// Running -> paused (the hand has been missing past the timeout)
    Paused,
}

#[derive(Debug, Clone)]
pub struct Presence {
    /// Timestamp (ms) of the most recent landmark
    pub last_seen_ms: f64,
    pub paused: bool,
    timeout_ms: f64,
}

impl Default for Presence {
    fn default() -> Self {
        Self::new(PRESENCE_TIMEOUT_MS)
    }
}

impl Presence {
    /// Starts paused; nothing has been seen yet.
    pub fn new(timeout_ms: f64) -> Self {
        Self {
            last_seen_ms: 0.0,
            paused: true,
            timeout_ms,
        }
    }

    /// Record a landmark arrival
    pub fn on_landmark(&mut self, timestamp_ms: f64) -> Option<PresenceEdge> {
        self.last_seen_ms = timestamp_ms;
        if self.paused {
            self.paused = false;
            Some(PresenceEdge::Resumed)
        } else {
            None
        }
    }

    /// Evaluate the timeout; called once per frame
    pub fn tick(&mut self, now_ms: f64) -> Option<PresenceEdge> {
        if !self.paused && now_ms - self.last_seen_ms > self.timeout_ms {
            self.paused = true;
            Some(PresenceEdge::Paused)
        } else {
            None
        }
    }

    /// A landmark stamped longer ago than the window no longer counts as
    /// the hand being in view
    pub fn is_stale(&self, timestamp_ms: f64, now_ms: f64) -> bool {
        now_ms - timestamp_ms > self.timeout_ms
    }

    pub fn is_running(&self) -> bool {
        !self.paused
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_paused() {
        let mut presence = Presence::default();
        assert!(presence.paused);
        // Still paused with nothing seen, and no spurious edge
        assert_eq!(presence.tick(5000.0), None);
        assert!(presence.paused);
    }

    #[test]
    fn test_landmark_resumes_once() {
        let mut presence = Presence::default();
        assert_eq!(presence.on_landmark(100.0), Some(PresenceEdge::Resumed));
        assert_eq!(presence.on_landmark(130.0), None);
        assert_eq!(presence.on_landmark(160.0), None);
        assert!(presence.is_running());
        assert_eq!(presence.last_seen_ms, 160.0);
    }

    #[test]
    fn test_timeout_is_strict() {
        let mut presence = Presence::default();
        presence.on_landmark(0.0);

        // Exactly at the window edge: still running
        assert_eq!(presence.tick(1000.0), None);
        assert!(presence.is_running());

        assert_eq!(presence.tick(1000.5), Some(PresenceEdge::Paused));
        // Only reported once
        assert_eq!(presence.tick(1100.0), None);
        assert!(presence.paused);
    }

    #[test]
    fn test_staleness_uses_same_window() {
        let presence = Presence::default();
        assert!(!presence.is_stale(0.0, 1000.0));
        assert!(presence.is_stale(0.0, 1000.5));
    }

    #[test]
    fn test_pause_then_resume() {
        let mut presence = Presence::default();
        presence.on_landmark(0.0);
        presence.tick(2000.0);
        assert!(presence.paused);

        assert_eq!(presence.on_landmark(2100.0), Some(PresenceEdge::Resumed));
        assert_eq!(presence.tick(2200.0), None);
    }
}
