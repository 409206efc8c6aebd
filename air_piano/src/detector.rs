//! The hand-detector boundary.
//!
//! [`HandDetector`] is the black-box contract: configure once, then turn
//! frames into hand-landmark lists.  [`spawn_detector`] moves a detector
//! onto its own thread and returns a [`DetectorHandle`] — the same
//! channel-handle shape whether the implementation is a real inference
//! model or the shipped [`SimDetector`].
//!
//! Lifecycle: the worker reports [`ModelStatus::Ready`] or
//! [`ModelStatus::Error`] exactly once after configuring; an errored worker
//! exits immediately and is never retried within the session.  Dropping the
//! handle closes the frame channel and the worker exits on disconnect, so
//! no result can be delivered to a torn-down consumer.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};

use gesture_zones::{landmarks, HandLandmarks, Landmark, LANDMARKS_PER_HAND};
use thiserror::Error;

use crate::camera::Frame;

// ════════════════════════════════════════════════════════════════════════════
// Options / status / result
// ════════════════════════════════════════════════════════════════════════════

/// Detector tuning, mirrored from the usual hand-landmark model knobs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectorOptions {
    pub max_hands: usize,
    /// 0 = light model, 1 = full model.
    pub model_complexity: u8,
    pub min_detection_confidence: f32,
    pub min_tracking_confidence: f32,
}

impl Default for DetectorOptions {
    fn default() -> Self {
        DetectorOptions {
            max_hands: 2,
            model_complexity: 1,
            min_detection_confidence: 0.5,
            min_tracking_confidence: 0.5,
        }
    }
}

/// Model lifecycle: `Loading` until configuration finishes, then exactly
/// one transition to `Ready` or `Error`.  Never reverts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelStatus {
    Loading,
    Ready,
    Error,
}

/// One detection callback's payload.
#[derive(Clone, Debug)]
pub struct DetectionResult {
    pub hands: Vec<HandLandmarks>,
    pub frame_seq: u64,
    pub completed_at: Instant,
}

#[derive(Debug, Error)]
pub enum DetectorError {
    #[error("invalid detector options: {0}")]
    InvalidOptions(String),
    #[error("inference failed: {0}")]
    Inference(String),
}

// ════════════════════════════════════════════════════════════════════════════
// HandDetector trait
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can turn camera frames into hand landmarks.
pub trait HandDetector: Send + 'static {
    fn configure(&mut self, options: &DetectorOptions) -> Result<(), DetectorError>;
    fn detect(&mut self, frame: &Frame) -> Result<Vec<HandLandmarks>, DetectorError>;
}

// ════════════════════════════════════════════════════════════════════════════
// Spawn helper + handle
// ════════════════════════════════════════════════════════════════════════════

/// Handle to a detector running on its own thread.
pub struct DetectorHandle {
    frame_tx: Sender<Frame>,
    result_rx: Receiver<DetectionResult>,
    status_rx: Receiver<ModelStatus>,
    status: ModelStatus,
}

impl DetectorHandle {
    /// Latest model status (drains any pending transition).
    pub fn status(&mut self) -> ModelStatus {
        while let Ok(s) = self.status_rx.try_recv() {
            self.status = s;
        }
        self.status
    }

    /// Queue one frame for detection.  Returns false when the worker is
    /// gone (errored or torn down).
    pub fn submit(&self, frame: Frame) -> bool {
        self.frame_tx.send(frame).is_ok()
    }

    /// A finished detection, if one is waiting.  Non-blocking.
    pub fn try_result(&self) -> Option<DetectionResult> {
        self.result_rx.try_recv().ok()
    }
}

/// Spawn a detector on its own thread and return the channel handle.
///
/// The worker answers every accepted frame with exactly one result; a
/// per-frame inference failure degrades to an empty hand list rather than
/// a missing result, so a single-flight caller can never stall on it.
pub fn spawn_detector<D: HandDetector>(mut detector: D, options: DetectorOptions) -> DetectorHandle {
    let (frame_tx, frame_rx) = mpsc::channel::<Frame>();
    let (result_tx, result_rx) = mpsc::channel::<DetectionResult>();
    let (status_tx, status_rx) = mpsc::channel::<ModelStatus>();

    thread::spawn(move || {
        match detector.configure(&options) {
            Ok(()) => {
                tracing::info!("hand model ready");
                let _ = status_tx.send(ModelStatus::Ready);
            }
            Err(e) => {
                tracing::warn!("hand model initialization failed: {e}");
                let _ = status_tx.send(ModelStatus::Error);
                return;
            }
        }

        for frame in frame_rx {
            let hands = match detector.detect(&frame) {
                Ok(hands) => hands,
                Err(e) => {
                    tracing::debug!(seq = frame.seq, "dropping frame: {e}");
                    Vec::new()
                }
            };
            let result = DetectionResult {
                hands,
                frame_seq: frame.seq,
                completed_at: Instant::now(),
            };
            if result_tx.send(result).is_err() {
                return;
            }
        }
    });

    DetectorHandle {
        frame_tx,
        result_rx,
        status_rx,
        status: ModelStatus::Loading,
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SimDetector — fabricates a hand around the frame pointer
// ════════════════════════════════════════════════════════════════════════════

/// Simulation detector: one 21-landmark hand per frame whose index tip sits
/// exactly at the frame's pointer, or no hands when the pointer is absent.
pub struct SimDetector {
    max_hands: usize,
    latency: Duration,
}

impl SimDetector {
    pub fn new() -> Self {
        SimDetector { max_hands: 2, latency: Duration::ZERO }
    }
}

impl Default for SimDetector {
    fn default() -> Self {
        SimDetector::new()
    }
}

impl HandDetector for SimDetector {
    fn configure(&mut self, options: &DetectorOptions) -> Result<(), DetectorError> {
        if options.max_hands == 0 {
            return Err(DetectorError::InvalidOptions(
                "max_hands must be at least 1".into(),
            ));
        }
        if options.model_complexity > 1 {
            return Err(DetectorError::InvalidOptions(
                "model_complexity must be 0 or 1".into(),
            ));
        }
        for (name, v) in [
            ("min_detection_confidence", options.min_detection_confidence),
            ("min_tracking_confidence", options.min_tracking_confidence),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(DetectorError::InvalidOptions(format!(
                    "{name} must be within [0, 1], got {v}"
                )));
            }
        }
        self.max_hands = options.max_hands;
        // The full model costs a little more per frame.
        self.latency = Duration::from_millis(if options.model_complexity == 1 { 7 } else { 3 });
        Ok(())
    }

    fn detect(&mut self, frame: &Frame) -> Result<Vec<HandLandmarks>, DetectorError> {
        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }
        let mut hands = match frame.pointer {
            Some(tip) => vec![synthetic_hand(tip.x, tip.y)],
            None => Vec::new(),
        };
        hands.truncate(self.max_hands);
        Ok(hands)
    }
}

/// A plausible hand: wrist below the tip, the other points fanned nearby.
/// Only landmark 8 is consumed downstream; the rest exist so the overlay
/// has something hand-shaped to draw.
fn synthetic_hand(x: f32, y: f32) -> HandLandmarks {
    let mut points = Vec::with_capacity(LANDMARKS_PER_HAND);
    for i in 0..LANDMARKS_PER_HAND {
        let col = (i % 5) as f32 - 2.0;
        let row = (i / 5) as f32;
        points.push(Landmark {
            x: (x + col * 0.012).clamp(0.0, 1.0),
            y: (y + row * 0.025).clamp(0.0, 1.0),
            z: 0.0,
        });
    }
    points[landmarks::WRIST] = Landmark { x, y: (y + 0.22).min(1.0), z: 0.0 };
    points[landmarks::INDEX_FINGER_TIP] = Landmark { x, y, z: 0.0 };
    HandLandmarks::new(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gesture_zones::NormalizedPoint;

    fn frame_with(pointer: Option<NormalizedPoint>) -> Frame {
        Frame { seq: 1, captured_at: Instant::now(), pointer }
    }

    fn wait_for_status(handle: &mut DetectorHandle, want: ModelStatus) -> bool {
        for _ in 0..200 {
            if handle.status() == want {
                return true;
            }
            thread::sleep(Duration::from_millis(5));
        }
        false
    }

    fn wait_for_result(handle: &DetectorHandle) -> DetectionResult {
        for _ in 0..200 {
            if let Some(r) = handle.try_result() {
                return r;
            }
            thread::sleep(Duration::from_millis(5));
        }
        panic!("no detection result arrived");
    }

    #[test]
    fn worker_reports_ready_and_detects() {
        let mut handle = spawn_detector(SimDetector::new(), DetectorOptions::default());
        assert!(wait_for_status(&mut handle, ModelStatus::Ready));

        let tip = NormalizedPoint::new(0.5, 0.5);
        assert!(handle.submit(frame_with(Some(tip))));

        let result = wait_for_result(&handle);
        assert_eq!(result.frame_seq, 1);
        assert_eq!(result.hands.len(), 1);
        assert_eq!(result.hands[0].index_tip(), Some(tip));
    }

    #[test]
    fn pointerless_frame_detects_no_hands() {
        let mut handle = spawn_detector(SimDetector::new(), DetectorOptions::default());
        assert!(wait_for_status(&mut handle, ModelStatus::Ready));
        handle.submit(frame_with(None));
        assert!(wait_for_result(&handle).hands.is_empty());
    }

    #[test]
    fn invalid_options_error_the_model() {
        let options = DetectorOptions { max_hands: 0, ..DetectorOptions::default() };
        let mut handle = spawn_detector(SimDetector::new(), options);
        assert!(wait_for_status(&mut handle, ModelStatus::Error));
        // The worker is gone; submissions bounce.
        thread::sleep(Duration::from_millis(10));
        assert!(!handle.submit(frame_with(None)));
    }

    #[test]
    fn out_of_range_confidence_is_rejected() {
        let mut det = SimDetector::new();
        let options = DetectorOptions {
            min_detection_confidence: 1.5,
            ..DetectorOptions::default()
        };
        assert!(matches!(
            det.configure(&options),
            Err(DetectorError::InvalidOptions(_))
        ));
    }

    #[test]
    fn synthetic_hand_is_fully_formed() {
        let hand = synthetic_hand(0.3, 0.4);
        assert_eq!(hand.points.len(), LANDMARKS_PER_HAND);
        assert_eq!(hand.index_tip(), Some(NormalizedPoint::new(0.3, 0.4)));
        // Wrist sits below the fingertip.
        assert!(hand.points[landmarks::WRIST].y > 0.4);
    }
}
