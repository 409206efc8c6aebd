//! Camera acquisition wrapper.
//!
//! A real build would wrap a platform capture stream; here the simulation
//! backend fabricates frames whose "image" is just the current pointer
//! position, which the simulation detector turns back into a hand.  The
//! lifecycle is the part that matters: the stream exists only between an
//! explicit, deniable `start` and a deterministic `stop`, and nothing else
//! holds a reference to it after release.

use std::time::Instant;

use gesture_zones::NormalizedPoint;
use thiserror::Error;

/// Opaque image handle handed to the detector.
#[derive(Clone, Debug)]
pub struct Frame {
    pub seq: u64,
    pub captured_at: Instant,
    /// Simulated fingertip, if a hand is in view of the simulated camera.
    pub pointer: Option<NormalizedPoint>,
}

/// Acquisition failures.  Both are recoverable: the user re-attempts the
/// start, nothing crashes.
#[derive(Debug, Error)]
pub enum CameraError {
    #[error("camera permission denied")]
    PermissionDenied,
    #[error("camera is not started")]
    NotStarted,
}

/// Simulated camera with the explicit start/stop lifecycle of a real
/// capture stream.
#[derive(Debug)]
pub struct SimCamera {
    streaming: bool,
    denied: bool,
    pointer: Option<NormalizedPoint>,
    seq: u64,
}

impl SimCamera {
    pub fn new() -> Self {
        SimCamera {
            streaming: false,
            denied: false,
            pointer: None,
            seq: 0,
        }
    }

    /// A camera whose permission prompt the user always rejects.
    pub fn denied() -> Self {
        SimCamera { denied: true, ..SimCamera::new() }
    }

    /// Acquire the stream.  Idempotent while already streaming.
    pub fn start(&mut self) -> Result<(), CameraError> {
        if self.denied {
            tracing::warn!("camera permission denied");
            return Err(CameraError::PermissionDenied);
        }
        if !self.streaming {
            self.streaming = true;
            tracing::info!("camera stream started");
        }
        Ok(())
    }

    /// Release the stream.  Any pointer state dies with it.
    pub fn stop(&mut self) {
        if self.streaming {
            self.streaming = false;
            self.pointer = None;
            tracing::info!("camera stream stopped");
        }
    }

    pub fn is_streaming(&self) -> bool {
        self.streaming
    }

    /// Feed the simulated fingertip (`None` = no hand in view).
    pub fn set_pointer(&mut self, pointer: Option<NormalizedPoint>) {
        self.pointer = pointer;
    }

    /// The current frame, or `None` when the stream is down.
    pub fn grab(&mut self) -> Option<Frame> {
        if !self.streaming {
            return None;
        }
        self.seq += 1;
        Some(Frame {
            seq: self.seq,
            captured_at: Instant::now(),
            pointer: self.pointer,
        })
    }
}

impl Default for SimCamera {
    fn default() -> Self {
        SimCamera::new()
    }
}

impl Drop for SimCamera {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn denied_camera_refuses_to_start() {
        let mut cam = SimCamera::denied();
        assert!(matches!(cam.start(), Err(CameraError::PermissionDenied)));
        assert!(!cam.is_streaming());
        assert!(cam.grab().is_none());
    }

    #[test]
    fn frames_only_while_streaming() {
        let mut cam = SimCamera::new();
        assert!(cam.grab().is_none());

        cam.start().unwrap();
        cam.set_pointer(Some(NormalizedPoint::new(0.5, 0.5)));
        let frame = cam.grab().unwrap();
        assert_eq!(frame.seq, 1);
        assert!(frame.pointer.is_some());

        cam.stop();
        assert!(cam.grab().is_none());
    }

    #[test]
    fn stop_clears_the_pointer() {
        let mut cam = SimCamera::new();
        cam.start().unwrap();
        cam.set_pointer(Some(NormalizedPoint::new(0.2, 0.2)));
        cam.stop();
        cam.start().unwrap();
        assert_eq!(cam.grab().unwrap().pointer, None);
    }

    #[test]
    fn frame_sequence_is_monotonic() {
        let mut cam = SimCamera::new();
        cam.start().unwrap();
        let a = cam.grab().unwrap().seq;
        let b = cam.grab().unwrap().seq;
        assert!(b > a);
    }
}
