//! 2-D point in logical (pre-scale) stage coordinates

/// A point in stage coordinates
///
/// `Point` is `Copy`: every hand-off to a panel is a snapshot, so a panel's
/// stored anchor never changes when the scene's pointer is overwritten.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    #[inline]
    pub fn subtract(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    /// Multiply both coordinates by `factor`
    #[inline]
    pub fn scale(self, factor: f64) -> Point {
        Point::new(self.x * factor, self.y * factor)
    }

    pub fn distance_to(self, other: Point) -> f64 {
        let d = self.subtract(other);
        (d.x * d.x + d.y * d.y).sqrt()
    }

    /// Whether this point lies inside the axis-aligned box starting at `origin`
    /// (edges inclusive)
    pub fn collide(self, origin: Point, width: f64, height: f64) -> bool {
        self.x >= origin.x
            && self.x <= origin.x + width
            && self.y >= origin.y
            && self.y <= origin.y + height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_is_independent() {
        let mut pointer = Point::new(10.0, 20.0);
        let snapshot = pointer;
        pointer.x = 99.0;
        assert_eq!(snapshot, Point::new(10.0, 20.0));
    }

    #[test]
    fn test_collide_edges_inclusive() {
        let origin = Point::new(10.0, 10.0);
        assert!(Point::new(10.0, 10.0).collide(origin, 100.0, 50.0));
        assert!(Point::new(110.0, 60.0).collide(origin, 100.0, 50.0));
        assert!(!Point::new(110.1, 30.0).collide(origin, 100.0, 50.0));
        assert!(!Point::new(50.0, 9.9).collide(origin, 100.0, 50.0));
    }

    #[test]
    fn test_vector_helpers() {
        let a = Point::new(3.0, 4.0);
        assert_eq!(a.add(Point::new(1.0, 1.0)), Point::new(4.0, 5.0));
        assert_eq!(a.subtract(Point::new(1.0, 1.0)), Point::new(2.0, 3.0));
        assert_eq!(a.scale(0.5), Point::new(1.5, 2.0));
        assert_eq!(a.distance_to(Point::ZERO), 5.0);
    }
}
