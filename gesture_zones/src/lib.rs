//! # gesture_zones
//!
//! The pure logic behind the air piano's gesture input: a fixed seven-note
//! vocabulary, a normalized zone map over the camera frame, a classifier
//! from hand landmarks to occupied zones, and a tracker that turns per-frame
//! classifications into clean enter/exit events.
//!
//! Nothing here does I/O or owns a thread; every function is deterministic
//! over its arguments, which is what makes the event guarantees testable.
//!
//! ## Pipeline
//!
//! | Stage | Input | Output |
//! |---|---|---|
//! | [`zone::column_zones`] | ordered note list | one vertical strip per note |
//! | [`classify::notes_under_tip`] | one hand + zones | notes whose zone holds the index tip |
//! | [`tracker::ZoneTracker::update`] | all hands of one frame | [`GestureEvent`]s, one per transition |
//!
//! ## Event guarantee
//!
//! For a fingertip that stays inside a zone across frames 1..k and then
//! leaves, the tracker emits exactly one [`GestureEvent::Enter`] at frame 1
//! and exactly one [`GestureEvent::Exit`] at frame k+1 — never duplicates
//! while continuously inside or outside, and an Exit for every active note
//! when the hands vanish entirely.

pub mod classify;
pub mod landmark;
pub mod note;
pub mod tracker;
pub mod zone;

pub use classify::notes_under_tip;
pub use landmark::{landmarks, HandLandmarks, Landmark, LANDMARKS_PER_HAND};
pub use note::{Note, NOTES};
pub use tracker::{GestureEvent, ZoneTracker};
pub use zone::{column_zones, Bounds, NormalizedPoint, Zone};
