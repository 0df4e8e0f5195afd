use super::SLOT_SPAN;
use crate::geometry::normalize_degrees;
use crate::settings::OverlapPolicy;

/// Fixed angular positions of the entries on the dial.
///
/// Entry `i` of `count` sits at `i * 180 / count` degrees regardless of the live rotation.
/// With no entries every query answers `None`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotLayout {
    count: usize,
    tolerance: f64,
    overlap: OverlapPolicy,
}

impl SlotLayout {
    pub fn new(count: usize, tolerance: f64, overlap: OverlapPolicy) -> Self {
        Self {
            count,
            tolerance,
            overlap,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn spacing(&self) -> Option<f64> {
        (self.count > 0).then(|| SLOT_SPAN / self.count as f64)
    }

    pub fn angle(&self, index: usize) -> Option<f64> {
        (index < self.count).then(|| index as f64 * self.spacing().unwrap_or_default())
    }

    /// Where entry `index` currently sits, in `[0, 360)`.
    pub fn effective_angle(&self, rotation: f64, index: usize) -> Option<f64> {
        self.angle(index).map(|slot| normalize_degrees(rotation + slot))
    }

    /// Rotation that brings entry `index` onto the reference position.
    pub fn target(&self, index: usize) -> Option<f64> {
        self.angle(index).map(|slot| -slot)
    }

    /// Whether two neighbouring entries can sit inside the window at once.
    pub fn windows_overlap(&self) -> bool {
        self.spacing().is_some_and(|spacing| self.tolerance > spacing)
    }

    /// Entry whose effective angle lies in `[0, tolerance)` for the given rotation.
    pub fn active(&self, rotation: f64) -> Option<usize> {
        let mut candidates = (0..self.count).filter(|&i| {
            self.effective_angle(rotation, i)
                .is_some_and(|angle| angle < self.tolerance)
        });

        match self.overlap {
            OverlapPolicy::First => candidates.next(),
            OverlapPolicy::Last => candidates.last(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(count: usize) -> SlotLayout {
        SlotLayout::new(count, 10.0, OverlapPolicy::First)
    }

    #[test]
    fn test_slot_angles() {
        let four = layout(4);

        assert_eq!(four.spacing(), Some(45.0));
        assert_eq!(four.angle(0), Some(0.0));
        assert_eq!(four.angle(3), Some(135.0));
        assert_eq!(four.angle(4), None);
        assert_eq!(four.target(2), Some(-90.0));
    }

    #[test]
    fn test_empty_layout_skips_slot_math() {
        let empty = layout(0);

        assert_eq!(empty.spacing(), None);
        assert_eq!(empty.angle(0), None);
        assert_eq!(empty.target(0), None);
        assert_eq!(empty.active(0.0), None);
        assert!(!empty.windows_overlap());
    }

    #[test]
    fn test_effective_angle_is_normalized() {
        let four = layout(4);

        assert_eq!(four.effective_angle(-90.0, 2), Some(0.0));
        assert_eq!(four.effective_angle(-100.0, 0), Some(260.0));
        assert_eq!(four.effective_angle(720.0 + 10.0, 1), Some(55.0));
    }

    #[test]
    fn test_active_entry_tracks_rotation() {
        let four = layout(4);

        assert_eq!(four.active(0.0), Some(0));
        assert_eq!(four.active(-45.0), Some(1));
        assert_eq!(four.active(-88.0), Some(2));
        assert_eq!(four.active(-135.0 + 360.0 * 3.0), Some(3));
        // halfway between two entries nothing qualifies
        assert_eq!(four.active(-22.5), None);
    }

    #[test]
    fn test_window_opens_at_the_reference_only() {
        let four = layout(4);

        // entry 2 at 355°, just short of the reference
        assert_eq!(four.effective_angle(-95.0, 2), Some(355.0));
        assert_eq!(four.active(-95.0), None);
        assert_eq!(four.active(-5.0), None);

        assert_eq!(four.active(-85.0), Some(2));
        assert_eq!(four.active(-90.0), Some(2));
        assert_eq!(four.active(-80.0), None);
    }

    #[test]
    fn test_twelve_entries_have_one_active_at_a_time() {
        let twelve = layout(12);
        assert!(!twelve.windows_overlap());

        for step in 0..720 {
            let rotation = -(step as f64) * 0.25;
            let inside = (0..12)
                .filter(|&i| twelve.effective_angle(rotation, i).unwrap() < 10.0)
                .count();
            assert!(inside <= 1, "rotation {rotation}");
        }
    }

    #[test]
    fn test_overlapping_windows_follow_policy() {
        let crowded = 20;
        let first = SlotLayout::new(crowded, 10.0, OverlapPolicy::First);
        let last = SlotLayout::new(crowded, 10.0, OverlapPolicy::Last);

        // 9° spacing: entry 2 sits at 0.5°, entry 3 at 9.5°
        let rotation = -17.5;
        assert!(first.windows_overlap());
        assert_eq!(first.active(rotation), Some(2));
        assert_eq!(last.active(rotation), Some(3));
    }

    #[test]
    fn test_overlap_threshold() {
        assert!(!layout(12).windows_overlap());
        // 10° spacing: neighbours abut but never share the window
        assert!(!layout(18).windows_overlap());
        assert!(layout(19).windows_overlap());
    }
}
