//! Gesture state tracking — per-frame classifications become enter/exit
//! events.
//!
//! The tracker remembers which notes were gesture-active on the previous
//! frame and emits an event only on a transition.  Zone membership within a
//! frame is a boolean OR across every visible hand, computed before the
//! diff — two hands covering the same zone hold it as one, and the zone
//! releases only when the last of them leaves.

use crate::landmark::HandLandmarks;
use crate::note::{Note, NOTES};
use crate::zone::{NormalizedPoint, Zone};

/// A note-zone transition observed between two consecutive frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent {
    /// A fingertip entered the note's zone.  `at` is the tip position of
    /// the first hand that satisfied the zone this frame — diagnostic
    /// only, never an audio parameter.
    Enter { note: Note, at: NormalizedPoint },
    /// The last fingertip left the note's zone (or every hand vanished).
    Exit { note: Note },
}

impl GestureEvent {
    pub fn note(&self) -> Note {
        match *self {
            GestureEvent::Enter { note, .. } => note,
            GestureEvent::Exit { note } => note,
        }
    }
}

/// Tracks which notes are currently gesture-active.
#[derive(Debug, Default)]
pub struct ZoneTracker {
    active: [bool; Note::COUNT],
}

impl ZoneTracker {
    pub fn new() -> Self {
        ZoneTracker::default()
    }

    pub fn is_active(&self, note: Note) -> bool {
        self.active[note.index()]
    }

    /// Diff one frame's worth of hands against the previous state.
    ///
    /// Events come out in note order and at most one per note per call.
    /// Zero hands reads as "in zone" false everywhere, so anything still
    /// active exits on the next processed frame.
    pub fn update(&mut self, hands: &[HandLandmarks], zones: &[Zone]) -> Vec<GestureEvent> {
        let mut in_zone = [false; Note::COUNT];
        let mut first_tip: [Option<NormalizedPoint>; Note::COUNT] = [None; Note::COUNT];

        for hand in hands {
            let Some(tip) = hand.index_tip() else {
                continue;
            };
            for zone in zones {
                if zone.bounds.contains(tip) {
                    let i = zone.note.index();
                    in_zone[i] = true;
                    if first_tip[i].is_none() {
                        first_tip[i] = Some(tip);
                    }
                }
            }
        }

        let mut events = Vec::new();
        for note in NOTES {
            let i = note.index();
            match (in_zone[i], self.active[i]) {
                (true, false) => {
                    self.active[i] = true;
                    if let Some(at) = first_tip[i] {
                        events.push(GestureEvent::Enter { note, at });
                    }
                }
                (false, true) => {
                    self.active[i] = false;
                    events.push(GestureEvent::Exit { note });
                }
                _ => {}
            }
        }
        events
    }

    /// Force every active note out, as if the hands had vanished.  Used
    /// when gesture input is switched off so no note hangs.
    pub fn flush(&mut self) -> Vec<GestureEvent> {
        let mut events = Vec::new();
        for note in NOTES {
            let i = note.index();
            if self.active[i] {
                self.active[i] = false;
                events.push(GestureEvent::Exit { note });
            }
        }
        events
    }
}
