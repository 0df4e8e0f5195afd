use crate::gui::navigator::{
    DIAL_RADIUS, HIT_RADIUS, HUB_RADIUS, LABEL_RADIUS, MARKER_OFFSET, REFERENCE_ANGLE,
};
use orbit::Point;
use orbit::dial::SlotLayout;

/// Where an entry label is drawn for the current rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelGeometry {
    pub center: Point,
    pub angle: f64,
}

impl LabelGeometry {
    pub fn calculate(layout: &SlotLayout, rotation: f64, index: usize, hub: Point) -> Option<Self> {
        let angle = REFERENCE_ANGLE + rotation + layout.angle(index)?;
        Some(Self {
            center: hub.polar_offset(angle, LABEL_RADIUS),
            angle,
        })
    }
}

/// Screen placement of the dial inside its drawing area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialGeometry {
    pub hub: Point,
}

impl DialGeometry {
    pub fn for_area(width: f64, height: f64) -> Self {
        Self {
            hub: Point::new(width / 2.0, height / 2.0),
        }
    }

    pub fn ring_radius(&self) -> f64 {
        DIAL_RADIUS
    }

    pub fn hub_radius(&self) -> f64 {
        HUB_RADIUS
    }

    pub fn marker(&self) -> Point {
        Point::new(self.hub.x - MARKER_OFFSET, self.hub.y)
    }

    pub fn labels(&self, layout: &SlotLayout, rotation: f64) -> Vec<LabelGeometry> {
        (0..layout.count())
            .filter_map(|i| LabelGeometry::calculate(layout, rotation, i, self.hub))
            .collect()
    }

    /// Whether a press at `point` lands on the dial or its labels.
    pub fn within_reach(&self, point: Point) -> bool {
        point.distance(self.hub) <= LABEL_RADIUS + HIT_RADIUS
    }

    /// Entry whose label is closest to `point`, if any lies within reach.
    pub fn entry_at(&self, layout: &SlotLayout, rotation: f64, point: Point) -> Option<usize> {
        self.labels(layout, rotation)
            .iter()
            .enumerate()
            .map(|(i, label)| (i, label.center.distance(point)))
            .filter(|(_, distance)| *distance <= HIT_RADIUS)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbit::settings::OverlapPolicy;

    const EPS: f64 = 1e-9;

    fn four() -> SlotLayout {
        SlotLayout::new(4, 10.0, OverlapPolicy::First)
    }

    fn geometry() -> DialGeometry {
        DialGeometry::for_area(400.0, 300.0)
    }

    #[test]
    fn test_first_entry_sits_at_the_marker_side() {
        let label = LabelGeometry::calculate(&four(), 0.0, 0, geometry().hub).unwrap();

        assert!((label.center.x - (200.0 - LABEL_RADIUS)).abs() < EPS);
        assert!((label.center.y - 150.0).abs() < EPS);
        assert!(label.center.x < geometry().marker().x);
    }

    #[test]
    fn test_labels_follow_rotation() {
        let hub = geometry().hub;

        // entry 2 sits 90° clockwise of the reference, straight up on screen
        let resting = LabelGeometry::calculate(&four(), 0.0, 2, hub).unwrap();
        assert!((resting.center.x - 200.0).abs() < EPS);
        assert!((resting.center.y - (150.0 - LABEL_RADIUS)).abs() < EPS);

        let snapped = LabelGeometry::calculate(&four(), -90.0, 2, hub).unwrap();
        assert!((snapped.center.x - (200.0 - LABEL_RADIUS)).abs() < EPS);
        assert!((snapped.center.y - 150.0).abs() < EPS);
    }

    #[test]
    fn test_unknown_entry_has_no_label() {
        assert_eq!(LabelGeometry::calculate(&four(), 0.0, 4, geometry().hub), None);
        assert!(geometry().labels(&four(), 0.0).len() == 4);
    }

    #[test]
    fn test_hit_test_picks_nearest_label() {
        let dial = geometry();
        let layout = four();

        let on_second = dial.labels(&layout, 0.0)[1].center;
        let near = Point::new(on_second.x + 5.0, on_second.y - 3.0);

        assert_eq!(dial.entry_at(&layout, 0.0, near), Some(1));
        assert_eq!(dial.entry_at(&layout, 0.0, dial.hub), None);
    }

    #[test]
    fn test_presses_away_from_the_dial_are_out_of_reach() {
        let dial = geometry();

        assert!(dial.within_reach(dial.hub));
        assert!(dial.within_reach(dial.marker()));
        assert!(dial.within_reach(Point::new(dial.hub.x - LABEL_RADIUS - 10.0, dial.hub.y)));
        assert!(!dial.within_reach(Point::new(5.0, 5.0)));
        assert!(!dial.within_reach(Point::new(dial.hub.x, dial.hub.y + LABEL_RADIUS + HIT_RADIUS + 1.0)));
    }

    #[test]
    fn test_hit_test_after_rotation() {
        let dial = geometry();
        let layout = four();
        let far_left = Point::new(dial.hub.x - LABEL_RADIUS, dial.hub.y);

        assert_eq!(dial.entry_at(&layout, 0.0, far_left), Some(0));
        assert_eq!(dial.entry_at(&layout, -135.0, far_left), Some(3));
        assert_eq!(dial.entry_at(&layout, -20.0, far_left), None);
    }
}
