//! Polygon math for district boundaries.
//!
//! Coordinates are plain `f64` pairs. Nothing here knows about the canonical
//! map space; callers pass both sizes explicitly to [`rescale`].

use serde::{Deserialize, Serialize};

/// Minimum number of points a closed boundary needs.
pub const MIN_POLYGON_POINTS: usize = 3;

/// Errors raised by geometric operations.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("polygon needs at least 3 points, got {points}")]
    InvalidPolygon { points: usize },

    #[error("degenerate coordinate space {width}x{height}")]
    DegenerateSize { width: f64, height: f64 },
}

/// A point in some 2D coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a point.
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point { x, y }
    }
}

/// Width and height of a rectangular coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Creates a size. Not validated; see [`Size::is_usable`].
    pub const fn new(width: f64, height: f64) -> Self {
        Size { width, height }
    }

    /// True when both dimensions are finite and strictly positive.
    pub fn is_usable(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Arithmetic mean of a non-empty point slice.
fn mean(points: &[Point]) -> Point {
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Point::new(sx / n, sy / n)
}

/// Returns the arithmetic mean of `points`.
///
/// Fails with [`GeometryError::InvalidPolygon`] on an empty slice, since there
/// is no sensible fallback value.
pub fn centroid(points: &[Point]) -> Result<Point, GeometryError> {
    if points.is_empty() {
        return Err(GeometryError::InvalidPolygon { points: 0 });
    }
    Ok(mean(points))
}

/// Maps `point` from a space of size `from` into a space of size `to` by
/// independent linear scaling of each axis.
pub fn rescale(point: Point, from: Size, to: Size) -> Result<Point, GeometryError> {
    if !from.is_usable() {
        return Err(GeometryError::DegenerateSize {
            width: from.width,
            height: from.height,
        });
    }
    Ok(Point::new(
        point.x * (to.width / from.width),
        point.y * (to.height / from.height),
    ))
}

/// Even-odd ray-casting containment test.
///
/// Casts a ray towards +x and toggles on every edge that straddles the
/// point's y (one endpoint strictly above, the other not) and whose
/// intersection lies strictly right of the point. Returns `false` for fewer
/// than three points.
pub fn point_in_polygon(point: Point, polygon: &[Point]) -> bool {
    if polygon.len() < MIN_POLYGON_POINTS {
        return false;
    }

    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (pi, pj) = (polygon[i], polygon[j]);
        if (pi.y > point.y) != (pj.y > point.y) {
            let intersect_x = (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x;
            if point.x < intersect_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// A closed boundary with at least [`MIN_POLYGON_POINTS`] points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct Polygon(Vec<Point>);

impl Polygon {
    /// Wraps `points`, failing with [`GeometryError::InvalidPolygon`] if
    /// there are fewer than three.
    pub fn new(points: Vec<Point>) -> Result<Self, GeometryError> {
        if points.len() < MIN_POLYGON_POINTS {
            return Err(GeometryError::InvalidPolygon {
                points: points.len(),
            });
        }
        Ok(Polygon(points))
    }

    /// Returns the boundary points in order.
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    /// Mean of the boundary points. Never fails: the constructor guarantees
    /// a non-empty boundary.
    pub fn centroid(&self) -> Point {
        mean(&self.0)
    }

    /// True if `point` is inside, by [`point_in_polygon`].
    pub fn contains(&self, point: Point) -> bool {
        point_in_polygon(point, &self.0)
    }
}

impl TryFrom<Vec<Point>> for Polygon {
    type Error = GeometryError;

    fn try_from(points: Vec<Point>) -> Result<Self, Self::Error> {
        Polygon::new(points)
    }
}

impl From<Polygon> for Vec<Point> {
    fn from(polygon: Polygon) -> Self {
        polygon.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn square(side: f64) -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(side, 0.0),
            Point::new(side, side),
            Point::new(0.0, side),
        ]
    }

    #[test]
    fn centroid_of_square() {
        let c = centroid(&square(100.0)).unwrap();
        assert_eq!(c, Point::new(50.0, 50.0));
    }

    #[test]
    fn centroid_rejects_empty() {
        assert_eq!(
            centroid(&[]),
            Err(GeometryError::InvalidPolygon { points: 0 })
        );
    }

    #[test]
    fn centroid_of_single_point_is_that_point() {
        assert_eq!(centroid(&[Point::new(3.0, 4.0)]).unwrap(), Point::new(3.0, 4.0));
    }

    #[test]
    fn rescale_scales_each_axis() {
        let p = rescale(
            Point::new(200.0, 100.0),
            Size::new(400.0, 600.0),
            Size::new(1024.0, 1536.0),
        )
        .unwrap();
        assert_eq!(p, Point::new(512.0, 256.0));
    }

    #[test]
    fn rescale_same_size_is_identity() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..200 {
            let size = Size::new(rng.gen_range(1.0..2000.0), rng.gen_range(1.0..2000.0));
            let p = Point::new(rng.gen_range(-500.0..500.0), rng.gen_range(-500.0..500.0));
            assert_eq!(rescale(p, size, size).unwrap(), p);
        }
    }

    #[test]
    fn rescale_rejects_zero_dimension() {
        let to = Size::new(100.0, 100.0);
        assert!(matches!(
            rescale(Point::new(1.0, 1.0), Size::new(0.0, 10.0), to),
            Err(GeometryError::DegenerateSize { .. })
        ));
        assert!(matches!(
            rescale(Point::new(1.0, 1.0), Size::new(10.0, 0.0), to),
            Err(GeometryError::DegenerateSize { .. })
        ));
    }

    #[test]
    fn rescale_rejects_negative_and_nan() {
        let to = Size::new(100.0, 100.0);
        assert!(rescale(Point::default(), Size::new(-1.0, 10.0), to).is_err());
        assert!(rescale(Point::default(), Size::new(f64::NAN, 10.0), to).is_err());
    }

    #[test]
    fn point_in_square() {
        let sq = square(100.0);
        assert!(point_in_polygon(Point::new(25.0, 25.0), &sq));
        assert!(!point_in_polygon(Point::new(250.0, 250.0), &sq));
        assert!(!point_in_polygon(Point::new(-1.0, 50.0), &sq));
        assert!(!point_in_polygon(Point::new(50.0, 101.0), &sq));
    }

    #[test]
    fn fewer_than_three_points_is_never_inside() {
        assert!(!point_in_polygon(Point::new(0.0, 0.0), &[]));
        let segment = [Point::new(-1.0, -1.0), Point::new(1.0, 1.0)];
        assert!(!point_in_polygon(Point::new(0.0, 0.0), &segment));
    }

    #[test]
    fn tie_rule_on_square_edges() {
        // Lower/left edges count as inside, upper/right as outside.
        let sq = square(10.0);
        assert!(point_in_polygon(Point::new(0.0, 5.0), &sq));
        assert!(point_in_polygon(Point::new(5.0, 0.0), &sq));
        assert!(!point_in_polygon(Point::new(10.0, 5.0), &sq));
        assert!(!point_in_polygon(Point::new(5.0, 10.0), &sq));
    }

    #[test]
    fn concave_notch_is_outside() {
        // U shape opening upwards.
        let u = [
            Point::new(0.0, 0.0),
            Point::new(30.0, 0.0),
            Point::new(30.0, 30.0),
            Point::new(20.0, 30.0),
            Point::new(20.0, 10.0),
            Point::new(10.0, 10.0),
            Point::new(10.0, 30.0),
            Point::new(0.0, 30.0),
        ];
        assert!(point_in_polygon(Point::new(5.0, 20.0), &u));
        assert!(point_in_polygon(Point::new(25.0, 20.0), &u));
        assert!(!point_in_polygon(Point::new(15.0, 20.0), &u));
        assert!(point_in_polygon(Point::new(15.0, 5.0), &u));
    }

    #[test]
    fn random_points_inside_and_outside_convex_hexagon() {
        // Regular hexagon of circumradius 100 centered on (200, 200). Its
        // inscribed circle has radius 100 * cos(30deg) ~= 86.6.
        let center = Point::new(200.0, 200.0);
        let hexagon: Vec<Point> = (0..6)
            .map(|k| {
                let a = std::f64::consts::PI / 3.0 * k as f64;
                Point::new(center.x + 100.0 * a.cos(), center.y + 100.0 * a.sin())
            })
            .collect();

        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..500 {
            let angle = rng.gen_range(0.0..std::f64::consts::TAU);
            let r_in = rng.gen_range(0.0..86.0);
            let r_out = rng.gen_range(101.0..400.0);
            let inside = Point::new(center.x + r_in * angle.cos(), center.y + r_in * angle.sin());
            let outside = Point::new(center.x + r_out * angle.cos(), center.y + r_out * angle.sin());
            assert!(point_in_polygon(inside, &hexagon), "{inside:?} should be inside");
            assert!(!point_in_polygon(outside, &hexagon), "{outside:?} should be outside");
        }
    }

    #[test]
    fn polygon_requires_three_points() {
        assert_eq!(
            Polygon::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]),
            Err(GeometryError::InvalidPolygon { points: 2 })
        );
        let poly = Polygon::new(square(4.0)).unwrap();
        assert_eq!(poly.points().len(), 4);
        assert_eq!(poly.centroid(), Point::new(2.0, 2.0));
        assert!(poly.contains(Point::new(1.0, 1.0)));
    }

    #[test]
    fn polygon_deserialization_enforces_minimum() {
        let short = r#"[{"x":0.0,"y":0.0},{"x":1.0,"y":0.0}]"#;
        assert!(serde_json::from_str::<Polygon>(short).is_err());

        let ok = r#"[{"x":0.0,"y":0.0},{"x":1.0,"y":0.0},{"x":0.0,"y":1.0}]"#;
        let poly: Polygon = serde_json::from_str(ok).unwrap();
        assert_eq!(poly.points().len(), 3);
    }
}
