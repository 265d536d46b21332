//! Closed polygon shape.

use super::{ShapeId, ShapeStyle, ShapeTrait, hit_test_outline};
use kurbo::{BezPath, Point, Rect, Vec2};
use uuid::Uuid;

/// Hexagon outline in a 100x100 box.
const HEXAGON_POINTS: [(f64, f64); 6] = [
    (0.0, 50.0),
    (25.0, 0.0),
    (75.0, 0.0),
    (100.0, 50.0),
    (75.0, 100.0),
    (25.0, 100.0),
];

/// A closed polygon given by its vertices in canvas coordinates.
#[derive(Debug, Clone)]
pub struct Polygon {
    pub(crate) id: ShapeId,
    pub points: Vec<Point>,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Polygon {
    /// Create a polygon from local vertices, shifted so that the
    /// bounding box starts at `position`.
    pub fn new(position: Point, local_points: &[Point]) -> Self {
        let min_x = local_points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let min_y = local_points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let offset = if local_points.is_empty() {
            Vec2::ZERO
        } else {
            Vec2::new(position.x - min_x, position.y - min_y)
        };
        Self {
            id: Uuid::new_v4(),
            points: local_points.iter().map(|p| *p + offset).collect(),
            style: ShapeStyle::default(),
        }
    }

    /// Regular-looking hexagon in a 100x100 box at `position`.
    pub fn hexagon(position: Point) -> Self {
        let local: Vec<Point> = HEXAGON_POINTS
            .iter()
            .map(|&(x, y)| Point::new(x, y))
            .collect();
        Self::new(position, &local)
    }

    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.style = style;
        self
    }
}

impl ShapeTrait for Polygon {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        let mut iter = self.points.iter();
        let Some(first) = iter.next() else {
            return Rect::ZERO;
        };
        iter.fold(Rect::from_points(*first, *first), |r, p| r.union_pt(*p))
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        hit_test_outline(&self.points, point, tolerance, &self.style)
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut iter = self.points.iter();
        if let Some(first) = iter.next() {
            path.move_to(*first);
            for p in iter {
                path.line_to(*p);
            }
            path.close_path();
        }
        path
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hexagon_bounds() {
        let hex = Polygon::hexagon(Point::new(100.0, 100.0));
        assert_eq!(hex.points.len(), 6);
        let bounds = hex.bounds();
        assert!((bounds.x0 - 100.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 100.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 200.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_polygon() {
        let poly = Polygon::new(Point::new(10.0, 10.0), &[]);
        assert_eq!(poly.bounds(), Rect::ZERO);
        assert!(poly.to_path().elements().is_empty());
        assert!(!poly.hit_test(Point::new(10.0, 10.0), 5.0));
    }

    #[test]
    fn test_hit_test_on_edge() {
        let hex = Polygon::hexagon(Point::new(0.0, 0.0));
        assert!(hex.hit_test(Point::new(50.0, 0.0), 1.0));
        assert!(!hex.hit_test(Point::new(50.0, 50.0), 1.0));
    }
}
