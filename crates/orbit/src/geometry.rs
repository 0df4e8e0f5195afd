use crate::settings::SeamPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Point at `radius` from `self` in direction `degrees` (y grows downward).
    pub fn polar_offset(self, degrees: f64, radius: f64) -> Point {
        let rad = degrees.to_radians();
        Point::new(self.x + radius * rad.cos(), self.y + radius * rad.sin())
    }
}

/// Angle of the vector from `center` to `pointer`, in degrees within `(-180, 180]`.
pub fn angle_of(pointer: Point, center: Point) -> f64 {
    let (dx, dy) = (pointer.x - center.x, pointer.y - center.y);
    let degrees = dy.atan2(dx).to_degrees();
    // atan2 reports -PI for (-x, -0.0)
    if degrees <= -180.0 {
        degrees + 360.0
    } else {
        degrees
    }
}

/// Folds any angle into `[0, 360)`.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let folded = degrees.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360
    if folded >= 360.0 { 0.0 } else { folded }
}

/// Folds an angular difference into `(-180, 180]`.
pub fn wrap_delta(delta: f64) -> f64 {
    let wrapped = (delta + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped <= -180.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

impl SeamPolicy {
    /// Rotation contributed by a pointer moving from angle `last` to `now`.
    pub fn delta(self, last: f64, now: f64) -> f64 {
        match self {
            Self::Unwrap => wrap_delta(now - last),
            Self::Raw => now - last,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_angle_of_cardinal_directions() {
        let center = Point::new(100.0, 100.0);
        let cases = [
            (Point::new(150.0, 100.0), 0.0),
            (Point::new(100.0, 150.0), 90.0),
            (Point::new(50.0, 100.0), 180.0),
            (Point::new(100.0, 50.0), -90.0),
            (Point::new(150.0, 150.0), 45.0),
        ];

        for (pointer, expected) in cases {
            assert!((angle_of(pointer, center) - expected).abs() < EPS);
        }
    }

    #[test]
    fn test_angle_of_stays_in_half_open_range() {
        let center = Point::default();
        assert!((angle_of(Point::new(-1.0, -0.0), center) - 180.0).abs() < EPS);
        assert!((angle_of(Point::new(-1.0, 0.0), center) - 180.0).abs() < EPS);
        assert_eq!(angle_of(center, center), 0.0);
    }

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(725.0), 5.0);
        assert_eq!(normalize_degrees(-1e-20), 0.0);
    }

    #[test]
    fn test_wrap_delta() {
        assert_eq!(wrap_delta(180.0), 180.0);
        assert_eq!(wrap_delta(-180.0), 180.0);
        assert_eq!(wrap_delta(350.0), -10.0);
        assert_eq!(wrap_delta(-350.0), 10.0);
        assert_eq!(wrap_delta(20.0), 20.0);
    }

    #[test]
    fn test_seam_crossing() {
        // pointer sweeps from just above the left horizon to just below it
        let (last, now) = (175.0, -175.0);

        assert_eq!(SeamPolicy::Raw.delta(last, now), -350.0);
        assert_eq!(SeamPolicy::Unwrap.delta(last, now), 10.0);
        assert_eq!(SeamPolicy::Unwrap.delta(30.0, 45.0), 15.0);
    }

    #[test]
    fn test_polar_offset() {
        let p = Point::new(10.0, 10.0).polar_offset(180.0, 5.0);
        assert!((p.x - 5.0).abs() < EPS);
        assert!((p.y - 10.0).abs() < EPS);
        assert!((Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)) - 5.0).abs() < EPS);
    }
}
