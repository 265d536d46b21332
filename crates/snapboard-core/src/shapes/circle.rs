//! Circle shape.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{BezPath, Circle as KurboCircle, Point, Rect, Shape as KurboShape};
use uuid::Uuid;

/// A circle.
#[derive(Debug, Clone)]
pub struct Circle {
    pub(crate) id: ShapeId,
    /// Center point.
    pub center: Point,
    /// Radius.
    pub radius: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Circle {
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            center,
            radius,
            style: ShapeStyle::default(),
        }
    }

    /// Create a circle whose bounding box starts at `top_left`.
    pub fn from_top_left(top_left: Point, radius: f64) -> Self {
        Self::new(Point::new(top_left.x + radius, top_left.y + radius), radius)
    }

    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.style = style;
        self
    }
}

impl ShapeTrait for Circle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::from_center_size(self.center, (self.radius * 2.0, self.radius * 2.0))
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let dist = self.center.distance(point);
        let reach = tolerance + self.style.stroke_width / 2.0;
        if self.style.has_visible_fill() {
            dist <= self.radius + reach
        } else {
            (dist - self.radius).abs() <= reach
        }
    }

    fn to_path(&self) -> BezPath {
        KurboCircle::new(self.center, self.radius).to_path(0.1)
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
    fn test_from_top_left() {
        let circle = Circle::from_top_left(Point::new(100.0, 100.0), 50.0);
        assert!((circle.center.x - 150.0).abs() < f64::EPSILON);
        assert!((circle.center.y - 150.0).abs() < f64::EPSILON);
        let bounds = circle.bounds();
        assert!((bounds.x0 - 100.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_test() {
        let circle = Circle::new(Point::new(0.0, 0.0), 10.0);
        assert!(circle.hit_test(Point::new(10.0, 0.0), 0.0));
        assert!(!circle.hit_test(Point::new(0.0, 0.0), 1.0));
        assert!(!circle.hit_test(Point::new(15.0, 0.0), 1.0));
    }
}
