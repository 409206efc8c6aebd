//! The one shared "what is sounding" state.
//!
//! Gesture enter/exit and manual press/release both land here.  Each note
//! carries a hold count — one per active input source — so a gesture hold
//! and a click hold on the same note release independently and the voice
//! stops only when the last hold is gone.  Externally the state still
//! reads as a boolean per note.

use gesture_zones::{Note, NOTES};

#[derive(Debug)]
pub struct ActiveNotes {
    holds: [u8; Note::COUNT],
    enabled: bool,
}

impl ActiveNotes {
    pub fn new() -> Self {
        ActiveNotes { holds: [0; Note::COUNT], enabled: true }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_sounding(&self, note: Note) -> bool {
        self.holds[note.index()] > 0
    }

    /// Every note with at least one hold, in note order.
    pub fn sounding(&self) -> Vec<Note> {
        NOTES
            .iter()
            .copied()
            .filter(|&n| self.is_sounding(n))
            .collect()
    }

    /// Take one hold.  True when the note just became audible — the caller
    /// owes the synthesizer a note-on.  Ignored entirely while disabled.
    pub fn press(&mut self, note: Note) -> bool {
        if !self.enabled {
            return false;
        }
        let h = &mut self.holds[note.index()];
        *h = h.saturating_add(1);
        *h == 1
    }

    /// Drop one hold.  True when the last hold released and the caller owes
    /// the synthesizer a note-off.  Releasing a silent note is a no-op.
    pub fn release(&mut self, note: Note) -> bool {
        let h = &mut self.holds[note.index()];
        if *h == 0 {
            return false;
        }
        *h -= 1;
        *h == 0
    }

    /// Enable or disable sounding.  Disabling clears every hold in one step
    /// and returns the notes that were audible — each exactly once, so the
    /// caller can stop them without double-releasing anything.
    pub fn set_enabled(&mut self, enabled: bool) -> Vec<Note> {
        self.enabled = enabled;
        if enabled {
            return Vec::new();
        }
        let stopped = self.sounding();
        self.holds = [0; Note::COUNT];
        stopped
    }
}

impl Default for ActiveNotes {
    fn default() -> Self {
        ActiveNotes::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_press_sounds_last_release_silences() {
        let mut notes = ActiveNotes::new();
        assert!(notes.press(Note::C));
        assert!(notes.is_sounding(Note::C));
        assert!(notes.release(Note::C));
        assert!(!notes.is_sounding(Note::C));
    }

    #[test]
    fn two_sources_one_voice() {
        let mut notes = ActiveNotes::new();
        assert!(notes.press(Note::F), "first hold starts the voice");
        assert!(!notes.press(Note::F), "second hold joins silently");

        assert!(!notes.release(Note::F), "one hold remains, keep sounding");
        assert!(notes.is_sounding(Note::F));
        assert!(notes.release(Note::F), "last hold stops the voice");
    }

    #[test]
    fn releasing_a_silent_note_is_a_no_op() {
        let mut notes = ActiveNotes::new();
        assert!(!notes.release(Note::B));
        assert!(!notes.is_sounding(Note::B));
    }

    #[test]
    fn disabling_drains_everything_exactly_once() {
        let mut notes = ActiveNotes::new();
        notes.press(Note::C);
        notes.press(Note::E);
        notes.press(Note::E);

        let stopped = notes.set_enabled(false);
        assert_eq!(stopped, vec![Note::C, Note::E]);
        assert!(notes.sounding().is_empty());

        // Nothing left to stop on a second disable.
        assert!(notes.set_enabled(false).is_empty());
    }

    #[test]
    fn presses_are_ignored_while_disabled() {
        let mut notes = ActiveNotes::new();
        notes.set_enabled(false);
        assert!(!notes.press(Note::G));
        assert!(!notes.is_sounding(Note::G));

        notes.set_enabled(true);
        assert!(notes.press(Note::G));
    }

    #[test]
    fn stale_release_after_reenable_stays_silent() {
        let mut notes = ActiveNotes::new();
        notes.press(Note::D);
        notes.set_enabled(false);
        notes.set_enabled(true);
        // The source that held D before the disable releases late.
        assert!(!notes.release(Note::D));
    }

    #[test]
    fn sounding_lists_in_note_order() {
        let mut notes = ActiveNotes::new();
        notes.press(Note::B);
        notes.press(Note::C);
        assert_eq!(notes.sounding(), vec![Note::C, Note::B]);
    }
}
