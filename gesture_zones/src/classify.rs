//! Classification of one hand against the zone map.
//!
//! Pure: one hand in, the notes whose zones hold its index tip out.  A
//! malformed hand (no landmark 8) classifies as nothing — noisy detector
//! output is tolerated frame by frame, never escalated.

use crate::landmark::HandLandmarks;
use crate::note::Note;
use crate::zone::Zone;

/// The notes of every zone whose bounds contain the hand's index-finger
/// tip.  Zones may overlap, so the result can name several notes.
pub fn notes_under_tip(hand: &HandLandmarks, zones: &[Zone]) -> Vec<Note> {
    let Some(tip) = hand.index_tip() else {
        return Vec::new();
    };
    zones
        .iter()
        .filter(|zone| zone.bounds.contains(tip))
        .map(|zone| zone.note)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::{landmarks, Landmark, LANDMARKS_PER_HAND};
    use crate::zone::{column_zones, Bounds, NormalizedPoint};

    fn hand_at(x: f32, y: f32) -> HandLandmarks {
        let mut points = vec![Landmark::default(); LANDMARKS_PER_HAND];
        points[landmarks::INDEX_FINGER_TIP] = Landmark { x, y, z: 0.0 };
        HandLandmarks::new(points)
    }

    #[test]
    fn centre_point_plays_f() {
        let zones = column_zones();
        assert_eq!(notes_under_tip(&hand_at(0.5, 0.5), &zones), vec![Note::F]);
    }

    #[test]
    fn above_the_band_plays_nothing() {
        let zones = column_zones();
        assert!(notes_under_tip(&hand_at(0.0, 0.05), &zones).is_empty());
    }

    #[test]
    fn malformed_hand_classifies_as_nothing() {
        let zones = column_zones();
        let short = HandLandmarks::new(vec![Landmark { x: 0.5, y: 0.5, z: 0.0 }; 5]);
        assert!(notes_under_tip(&short, &zones).is_empty());
        assert!(notes_under_tip(&HandLandmarks::default(), &zones).is_empty());
    }

    #[test]
    fn overlapping_zones_all_match() {
        let wide = Bounds { x: 0.0, y: 0.0, width: 1.0, height: 1.0 };
        let zones = vec![
            Zone { note: Note::C, bounds: wide },
            Zone { note: Note::G, bounds: wide },
        ];
        assert_eq!(
            notes_under_tip(&hand_at(0.4, 0.4), &zones),
            vec![Note::C, Note::G]
        );
    }

    #[test]
    fn zone_seam_belongs_to_both_strips() {
        // x = 1/7 is the right edge of C's strip and the left edge of D's.
        let zones = column_zones();
        let seam = NormalizedPoint::new(1.0 / 7.0, 0.5);
        let hit = notes_under_tip(&hand_at(seam.x, seam.y), &zones);
        assert_eq!(hit, vec![Note::C, Note::D]);
    }
}
