//! Hand landmark adapter
//!
//! Inference output is reduced to a single number per camera frame: the
//! normalized x of the index fingertip of the first detected hand. The public
//! interface is [`LandmarkEvent`] delivered over an `mpsc` channel, so the
//! frame loop never needs to know whether events came from the browser's
//! inference callback or a scripted source.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};

use crate::consts::INDEX_FINGER_TIP;

/// Number of landmarks per detected hand
pub const HAND_LANDMARK_COUNT: usize = 21;
/// Floats per landmark in flattened inference output (x, y, z)
pub const LANDMARK_STRIDE: usize = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HandLandmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// The steering input for one camera frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandmarkEvent {
    /// Fingertip x, normalized to [0, 1] across the video frame
    pub x: f32,
    /// Arrival time (ms), on the same clock as the frame loop
    pub timestamp_ms: f64,
}

/// Pick the fingertip of the first hand. Extra hands are ignored and a frame
/// without hands yields no event.
pub fn fingertip_event(hands: &[Vec<HandLandmark>], timestamp_ms: f64) -> Option<LandmarkEvent> {
    let hand = hands.first()?;
    let tip = hand.get(INDEX_FINGER_TIP)?;
    if !tip.x.is_finite() {
        return None;
    }
    Some(LandmarkEvent {
        x: tip.x,
        timestamp_ms,
    })
}

/// Split flattened `[x, y, z] * 21` per-hand output into hands. A trailing
/// partial hand is dropped.
pub fn hands_from_flat(flat: &[f32]) -> Vec<Vec<HandLandmark>> {
    flat.chunks_exact(HAND_LANDMARK_COUNT * LANDMARK_STRIDE)
        .map(|hand| {
            hand.chunks_exact(LANDMARK_STRIDE)
                .map(|p| HandLandmark {
                    x: p[0],
                    y: p[1],
                    z: p[2],
                })
                .collect()
        })
        .collect()
}

/// Flattened inference output straight to an event
pub fn event_from_flat(flat: &[f32], timestamp_ms: f64) -> Option<LandmarkEvent> {
    fingertip_event(&hands_from_flat(flat), timestamp_ms)
}

// ════════════════════════════════════════════════════════════════════════════
// Sources
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can deliver [`LandmarkEvent`]s over a channel.
pub trait LandmarkSource: Send + 'static {
    fn run(self: Box<Self>, tx: Sender<LandmarkEvent>);
}

/// Spawn a landmark source on its own thread and return the receiving end.
pub fn spawn_landmark_source<S: LandmarkSource>(source: S) -> Receiver<LandmarkEvent> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || Box::new(source).run(tx));
    rx
}

/// A hand segment: present or absent over `[start_ms, end_ms)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandSegment {
    pub start_ms: f64,
    pub end_ms: f64,
    /// Fingertip x while present; `None` means the hand is out of frame
    pub x: Option<f32>,
}

/// Deterministic landmark stream for demos and tests.
///
/// Emits one event per camera frame while a segment has a hand in view.
#[derive(Debug, Clone)]
pub struct ScriptedHand {
    pub frame_interval_ms: f64,
    pub segments: Vec<HandSegment>,
    /// Hold each event until its timestamp has elapsed since `run` started
    pub realtime: bool,
}

impl ScriptedHand {
    pub fn new(frame_interval_ms: f64) -> Self {
        Self {
            frame_interval_ms,
            segments: Vec::new(),
            realtime: false,
        }
    }

    pub fn present(mut self, start_ms: f64, end_ms: f64, x: f32) -> Self {
        self.segments.push(HandSegment {
            start_ms,
            end_ms,
            x: Some(x),
        });
        self
    }

    pub fn absent(mut self, start_ms: f64, end_ms: f64) -> Self {
        self.segments.push(HandSegment {
            start_ms,
            end_ms,
            x: None,
        });
        self
    }

    pub fn realtime(mut self) -> Self {
        self.realtime = true;
        self
    }

    /// All events the script produces, in order
    pub fn events(&self) -> Vec<LandmarkEvent> {
        let mut events = Vec::new();
        if self.frame_interval_ms <= 0.0 {
            return events;
        }
        for segment in &self.segments {
            let Some(x) = segment.x else { continue };
            let mut t = segment.start_ms;
            while t < segment.end_ms {
                events.push(LandmarkEvent { x, timestamp_ms: t });
                t += self.frame_interval_ms;
            }
        }
        events
    }
}

impl LandmarkSource for ScriptedHand {
    fn run(self: Box<Self>, tx: Sender<LandmarkEvent>) {
        let start = Instant::now();
        for event in self.events() {
            if self.realtime {
                let due = Duration::from_secs_f64(event.timestamp_ms.max(0.0) / 1000.0);
                if let Some(wait) = due.checked_sub(start.elapsed()) {
                    thread::sleep(wait);
                }
            }
            if tx.send(event).is_err() {
                // Receiver dropped, frame loop is gone
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand_with_tip(x: f32) -> Vec<HandLandmark> {
        let mut hand = vec![HandLandmark::default(); HAND_LANDMARK_COUNT];
        hand[INDEX_FINGER_TIP].x = x;
        hand
    }

    #[test]
    fn test_no_hands_no_event() {
        assert_eq!(fingertip_event(&[], 10.0), None);
        assert_eq!(event_from_flat(&[], 10.0), None);
    }

    #[test]
    fn test_first_hand_wins() {
        let hands = vec![hand_with_tip(0.25), hand_with_tip(0.9)];
        let event = fingertip_event(&hands, 33.0);
        assert_eq!(
            event,
            Some(LandmarkEvent {
                x: 0.25,
                timestamp_ms: 33.0
            })
        );
    }

    #[test]
    fn test_short_hand_ignored() {
        let hands = vec![vec![HandLandmark::default(); 4]];
        assert_eq!(fingertip_event(&hands, 0.0), None);
    }

    #[test]
    fn test_flat_parsing() {
        let mut flat = vec![0.0; HAND_LANDMARK_COUNT * LANDMARK_STRIDE * 2];
        flat[INDEX_FINGER_TIP * LANDMARK_STRIDE] = 0.6;
        flat[INDEX_FINGER_TIP * LANDMARK_STRIDE + 1] = 0.1;
        // Second hand's tip
        flat[(HAND_LANDMARK_COUNT + INDEX_FINGER_TIP) * LANDMARK_STRIDE] = 0.2;

        let hands = hands_from_flat(&flat);
        assert_eq!(hands.len(), 2);
        assert_eq!(hands[0][INDEX_FINGER_TIP].y, 0.1);

        let event = event_from_flat(&flat, 5.0).map(|e| e.x);
        assert_eq!(event, Some(0.6));
    }

    #[test]
    fn test_partial_hand_dropped() {
        let flat = vec![0.5; HAND_LANDMARK_COUNT * LANDMARK_STRIDE - 1];
        assert!(hands_from_flat(&flat).is_empty());
    }

    #[test]
    fn test_nan_tip_ignored() {
        let hands = vec![hand_with_tip(f32::NAN)];
        assert_eq!(fingertip_event(&hands, 0.0), None);
    }

    #[test]
    fn test_scripted_events() {
        let script = ScriptedHand::new(100.0)
            .present(0.0, 300.0, 0.5)
            .absent(300.0, 600.0)
            .present(600.0, 700.0, 0.1);
        let times: Vec<f64> = script.events().iter().map(|e| e.timestamp_ms).collect();
        assert_eq!(times, vec![0.0, 100.0, 200.0, 600.0]);
    }

    #[test]
    fn test_spawned_source_delivers_all() {
        let script = ScriptedHand::new(50.0).present(0.0, 500.0, 0.3);
        let expected = script.events();
        let rx = spawn_landmark_source(script);
        let received: Vec<LandmarkEvent> = rx.iter().collect();
        assert_eq!(received, expected);
    }
}
