use crate::Point;
use geo::{Area, Contains, Coord, LineString, Polygon as GeoPolygon};
use nalgebra::{Point2, Vector2};

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Direction from `self` towards `other`, in radians within [-PI, PI]
    pub fn angle_to(&self, other: &Point) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    fn to_nalgebra(self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }
}

/// Projection of a point onto a wall segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentProjection {
    /// Closest point on the segment
    pub point: Point,
    /// Position along the segment, clamped to [0, 1]
    pub t: f64,
}

/// Check if a point lies on a line segment within `tolerance`.
///
/// Returns `None` for zero-length segments or when the point is farther than
/// `tolerance` from its clamped projection.
pub fn point_on_segment(
    point: &Point,
    seg_start: &Point,
    seg_end: &Point,
    tolerance: f64,
) -> Option<SegmentProjection> {
    let direction = Vector2::new(seg_end.x - seg_start.x, seg_end.y - seg_start.y);
    let len2 = direction.norm_squared();

    if len2 == 0.0 {
        return None;
    }

    let relative = Vector2::new(point.x - seg_start.x, point.y - seg_start.y);
    let t = (relative.dot(&direction) / len2).clamp(0.0, 1.0);

    let projected = seg_start.to_nalgebra() + direction * t;
    let dist = nalgebra::distance(&point.to_nalgebra(), &projected);

    if dist <= tolerance {
        Some(SegmentProjection {
            point: Point::new(projected.x, projected.y),
            t,
        })
    } else {
        None
    }
}

fn to_geo_polygon(points: &[Point]) -> GeoPolygon<f64> {
    let coords: Vec<Coord> = points.iter().map(|p| Coord { x: p.x, y: p.y }).collect();
    GeoPolygon::new(LineString::from(coords), vec![])
}

/// Signed shoelace area (positive for counter-clockwise in a y-up frame)
pub fn signed_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    to_geo_polygon(points).signed_area()
}

/// Calculate the area of a polygon using the Shoelace formula
pub fn polygon_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    to_geo_polygon(points).unsigned_area()
}

/// Arithmetic mean of the polygon vertices (not an area-weighted centroid)
pub fn vertex_mean(points: &[Point]) -> Point {
    if points.is_empty() {
        return Point::new(0.0, 0.0);
    }

    let (sum_x, sum_y) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    let n = points.len() as f64;

    Point::new(sum_x / n, sum_y / n)
}

/// Strict containment: points on the boundary are not inside
pub fn polygon_contains(points: &[Point], point: &Point) -> bool {
    if points.len() < 3 {
        return false;
    }
    to_geo_polygon(points).contains(&Coord { x: point.x, y: point.y })
}

/// Map an angle into [0, 2*PI)
pub fn normalize_angle(angle: f64) -> f64 {
    angle.rem_euclid(std::f64::consts::TAU)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn square(size: f64) -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(size, 0.0),
            Point::new(size, size),
            Point::new(0.0, size),
        ]
    }

    #[test]
    fn test_polygon_area_calculation() {
        let area = polygon_area(&square(10.0));
        assert!((area - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_signed_area_follows_winding() {
        let ccw = square(10.0);
        let mut cw = ccw.clone();
        cw.reverse();

        assert!(signed_area(&ccw) > 0.0);
        assert!(signed_area(&cw) < 0.0);
        assert_eq!(polygon_area(&cw), polygon_area(&ccw));
    }

    #[test]
    fn test_degenerate_polygon_has_no_area() {
        let points = vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        assert_eq!(polygon_area(&points), 0.0);
        assert_eq!(signed_area(&points), 0.0);
    }

    #[test]
    fn test_vertex_mean() {
        let center = vertex_mean(&square(100.0));
        assert_eq!(center, Point::new(50.0, 50.0));
        assert_eq!(vertex_mean(&[]), Point::new(0.0, 0.0));
    }

    #[test]
    fn test_point_on_segment_interior() {
        let hit = point_on_segment(
            &Point::new(50.0, 3.0),
            &Point::new(0.0, 0.0),
            &Point::new(100.0, 0.0),
            5.0,
        )
        .expect("point is within tolerance");

        assert!((hit.t - 0.5).abs() < 1e-12);
        assert!((hit.point.x - 50.0).abs() < 1e-12);
        assert!(hit.point.y.abs() < 1e-12);
    }

    #[test]
    fn test_point_on_segment_clamps_to_endpoints() {
        let hit = point_on_segment(
            &Point::new(-2.0, 0.0),
            &Point::new(0.0, 0.0),
            &Point::new(100.0, 0.0),
            5.0,
        )
        .expect("point is near the start");
        assert_eq!(hit.t, 0.0);

        let miss = point_on_segment(
            &Point::new(50.0, 6.0),
            &Point::new(0.0, 0.0),
            &Point::new(100.0, 0.0),
            5.0,
        );
        assert!(miss.is_none());
    }

    #[test]
    fn test_point_on_zero_length_segment() {
        let p = Point::new(1.0, 1.0);
        assert!(point_on_segment(&p, &p, &p, 5.0).is_none());
    }

    #[test]
    fn test_normalize_angle() {
        assert!((normalize_angle(-PI / 2.0) - 1.5 * PI).abs() < 1e-12);
        assert!((normalize_angle(3.0 * PI) - PI).abs() < 1e-12);
        assert_eq!(normalize_angle(0.0), 0.0);
    }

    #[test]
    fn test_polygon_contains() {
        let poly = square(10.0);
        assert!(polygon_contains(&poly, &Point::new(5.0, 5.0)));
        assert!(!polygon_contains(&poly, &Point::new(15.0, 5.0)));
        assert!(!polygon_contains(&poly[..2], &Point::new(5.0, 0.0)));
    }
}
