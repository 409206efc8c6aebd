//! Single-flight detection loop.
//!
//! One `tick` per rendered frame: drain the previous result if it arrived,
//! then — only when nothing is outstanding — submit the current camera
//! frame.  Never more than one request in flight, so results come back in
//! submission order and the detector's queue cannot build up behind a slow
//! model.

use std::time::Instant;

use crate::camera::SimCamera;
use crate::detector::{DetectionResult, DetectorHandle, ModelStatus};

/// Rolling detection statistics shown in the overlay.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DetectionStats {
    pub hands: usize,
    pub fps: f32,
}

/// Drives frames through the detector, one request in flight at a time.
///
/// Dropping the pump drops the detector handle; the worker exits on
/// channel disconnect, which is the whole teardown story — a cancelled
/// pump cannot deliver a late result to anyone.
pub struct FramePump {
    detector: DetectorHandle,
    in_flight: bool,
    stats: DetectionStats,
    last_hit: Option<Instant>,
}

impl FramePump {
    pub fn new(detector: DetectorHandle) -> Self {
        FramePump {
            detector,
            in_flight: false,
            stats: DetectionStats::default(),
            last_hit: None,
        }
    }

    pub fn model_status(&mut self) -> ModelStatus {
        self.detector.status()
    }

    pub fn stats(&self) -> DetectionStats {
        self.stats
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// One scheduling step.  Returns the detection that completed since the
    /// last tick, if any; `active` gates new submissions only — a result
    /// already in flight still drains after deactivation.
    pub fn tick(&mut self, camera: &mut SimCamera, active: bool) -> Option<DetectionResult> {
        let result = self.detector.try_result();
        if let Some(res) = &result {
            self.in_flight = false;
            self.observe(res);
        }

        if active
            && !self.in_flight
            && self.model_status() == ModelStatus::Ready
            && camera.is_streaming()
        {
            if let Some(frame) = camera.grab() {
                if self.detector.submit(frame) {
                    self.in_flight = true;
                }
            }
        }

        result
    }

    /// Hand count tracks every result; the fps clock only advances between
    /// results that actually contained a hand, so it freezes across
    /// no-hand stretches instead of decaying toward zero.
    fn observe(&mut self, res: &DetectionResult) {
        self.stats.hands = res.hands.len();
        if res.hands.is_empty() {
            return;
        }
        if let Some(prev) = self.last_hit {
            let dt = res.completed_at.duration_since(prev).as_secs_f32();
            if dt > 0.0 {
                self.stats.fps = 1.0 / dt;
            }
        }
        self.last_hit = Some(res.completed_at);
    }
}
