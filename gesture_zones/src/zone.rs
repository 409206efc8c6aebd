//! Normalized frame geometry and the note-zone layout.
//!
//! Everything lives in the detector's coordinate space: `[0,1]×[0,1]`,
//! origin top-left, independent of the rendering resolution.

use crate::note::{Note, NOTES};

// ════════════════════════════════════════════════════════════════════════════
// Geometry
// ════════════════════════════════════════════════════════════════════════════

/// A point in normalized frame coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NormalizedPoint {
    pub x: f32,
    pub y: f32,
}

impl NormalizedPoint {
    pub fn new(x: f32, y: f32) -> Self {
        NormalizedPoint { x, y }
    }
}

/// An axis-aligned rectangle in normalized frame coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    /// Containment test, inclusive on all four edges: a fingertip exactly on
    /// a zone border counts as inside.
    pub fn contains(&self, p: NormalizedPoint) -> bool {
        p.x >= self.x
            && p.x <= self.x + self.width
            && p.y >= self.y
            && p.y <= self.y + self.height
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Zones
// ════════════════════════════════════════════════════════════════════════════

/// A fixed rectangle of the frame tied to one note.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Zone {
    pub note: Note,
    pub bounds: Bounds,
}

/// The default layout: one equal-width vertical strip per note, in note
/// order left to right, spanning `y ∈ [0.1, 0.9]` so a hand resting at the
/// very top or bottom of the frame plays nothing.
///
/// Alternative layouts (grid, circular, …) are just alternative constructors
/// returning a `Vec<Zone>`; nothing downstream assumes the strips are
/// disjoint.  At most one zone is produced per note.
pub fn column_zones() -> Vec<Zone> {
    let n = NOTES.len() as f32;
    NOTES
        .iter()
        .enumerate()
        .map(|(i, &note)| Zone {
            note,
            bounds: Bounds {
                x: i as f32 / n,
                y: 0.1,
                width: 1.0 / n,
                height: 0.8,
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_zone_per_note() {
        let zones = column_zones();
        assert_eq!(zones.len(), NOTES.len());
        for (i, zone) in zones.iter().enumerate() {
            assert_eq!(zone.note, NOTES[i]);
        }
    }

    #[test]
    fn strips_tile_the_frame_width() {
        let zones = column_zones();
        let mut right_edge = 0.0f32;
        for zone in &zones {
            assert!((zone.bounds.x - right_edge).abs() < 1e-6);
            right_edge = zone.bounds.x + zone.bounds.width;
        }
        assert!((right_edge - 1.0).abs() < 1e-6);
    }

    #[test]
    fn vertical_band_is_point_one_to_point_nine() {
        for zone in column_zones() {
            assert_eq!(zone.bounds.y, 0.1);
            assert_eq!(zone.bounds.height, 0.8);
        }
    }

    #[test]
    fn bounds_stay_normalized() {
        for zone in column_zones() {
            let b = zone.bounds;
            assert!(b.x >= 0.0 && b.x + b.width <= 1.0 + 1e-6);
            assert!(b.y >= 0.0 && b.y + b.height <= 1.0);
        }
    }

    #[test]
    fn contains_is_edge_inclusive() {
        let b = Bounds { x: 0.2, y: 0.1, width: 0.4, height: 0.8 };
        assert!(b.contains(NormalizedPoint::new(0.2, 0.5)));
        assert!(b.contains(NormalizedPoint::new(0.6, 0.5)));
        assert!(b.contains(NormalizedPoint::new(0.3, 0.1)));
        assert!(b.contains(NormalizedPoint::new(0.3, 0.9)));
        assert!(!b.contains(NormalizedPoint::new(0.19, 0.5)));
        assert!(!b.contains(NormalizedPoint::new(0.61, 0.5)));
    }

    #[test]
    fn centre_of_frame_is_the_fourth_strip() {
        // Seven strips of width 1/7: x = 0.5 falls in strip index 3.
        let zones = column_zones();
        let hit: Vec<Note> = zones
            .iter()
            .filter(|z| z.bounds.contains(NormalizedPoint::new(0.5, 0.5)))
            .map(|z| z.note)
            .collect();
        assert_eq!(hit, vec![Note::F]);
    }

    #[test]
    fn above_the_band_matches_nothing() {
        let zones = column_zones();
        assert!(!zones
            .iter()
            .any(|z| z.bounds.contains(NormalizedPoint::new(0.0, 0.05))));
    }
}
