//! Isosceles triangle shape.

use super::{ShapeId, ShapeStyle, ShapeTrait, hit_test_outline};
use kurbo::{BezPath, Point, Rect};
use uuid::Uuid;

/// An upward-pointing isosceles triangle inscribed in a box.
#[derive(Debug, Clone)]
pub struct Triangle {
    pub(crate) id: ShapeId,
    /// Top-left corner of the bounding box.
    pub position: Point,
    pub width: f64,
    pub height: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Triangle {
    pub fn new(position: Point, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            width,
            height,
            style: ShapeStyle::default(),
        }
    }

    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.style = style;
        self
    }

    /// Apex, bottom-right and bottom-left corners.
    pub fn vertices(&self) -> [Point; 3] {
        let Point { x, y } = self.position;
        [
            Point::new(x + self.width / 2.0, y),
            Point::new(x + self.width, y + self.height),
            Point::new(x, y + self.height),
        ]
    }
}

impl ShapeTrait for Triangle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        hit_test_outline(&self.vertices(), point, tolerance, &self.style)
    }

    fn to_path(&self) -> BezPath {
        let [apex, right, left] = self.vertices();
        let mut path = BezPath::new();
        path.move_to(apex);
        path.line_to(right);
        path.line_to(left);
        path.close_path();
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
    fn test_vertices() {
        let tri = Triangle::new(Point::new(100.0, 100.0), 100.0, 100.0);
        let [apex, right, left] = tri.vertices();
        assert_eq!(apex, Point::new(150.0, 100.0));
        assert_eq!(right, Point::new(200.0, 200.0));
        assert_eq!(left, Point::new(100.0, 200.0));
    }

    #[test]
    fn test_hit_test_edge_only_when_unfilled() {
        let tri = Triangle::new(Point::new(0.0, 0.0), 100.0, 100.0);
        assert!(tri.hit_test(Point::new(50.0, 100.0), 1.0));
        assert!(!tri.hit_test(Point::new(50.0, 60.0), 1.0));
    }
}
