//! Ellipse shape.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{BezPath, Ellipse as KurboEllipse, Point, Rect, Shape as KurboShape};
use uuid::Uuid;

/// An axis-aligned ellipse.
#[derive(Debug, Clone)]
pub struct Ellipse {
    pub(crate) id: ShapeId,
    /// Center point.
    pub center: Point,
    /// Horizontal radius.
    pub radius_x: f64,
    /// Vertical radius.
    pub radius_y: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Ellipse {
    /// Create a new ellipse.
    pub fn new(center: Point, radius_x: f64, radius_y: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            center,
            radius_x,
            radius_y,
            style: ShapeStyle::default(),
        }
    }

    /// Create an ellipse whose bounding box starts at `top_left`.
    pub fn from_top_left(top_left: Point, radius_x: f64, radius_y: f64) -> Self {
        Self::new(
            Point::new(top_left.x + radius_x, top_left.y + radius_y),
            radius_x,
            radius_y,
        )
    }

    /// Set the style.
    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.style = style;
        self
    }

    /// Get as a kurbo Ellipse.
    pub fn as_kurbo(&self) -> KurboEllipse {
        KurboEllipse::new(self.center, (self.radius_x, self.radius_y), 0.0)
    }
}

impl ShapeTrait for Ellipse {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::new(
            self.center.x - self.radius_x,
            self.center.y - self.radius_y,
            self.center.x + self.radius_x,
            self.center.y + self.radius_y,
        )
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let half_sw = self.style.stroke_width / 2.0;
        let dx_outer = (point.x - self.center.x) / (self.radius_x + tolerance + half_sw);
        let dy_outer = (point.y - self.center.y) / (self.radius_y + tolerance + half_sw);
        if dx_outer * dx_outer + dy_outer * dy_outer > 1.0 {
            return false;
        }
        if self.style.has_visible_fill() {
            return true;
        }
        // Outline only: reject if inside inner ellipse
        let inner_rx = (self.radius_x - tolerance - half_sw).max(0.0);
        let inner_ry = (self.radius_y - tolerance - half_sw).max(0.0);
        if inner_rx < f64::EPSILON || inner_ry < f64::EPSILON {
            return true;
        }
        let dx_inner = (point.x - self.center.x) / inner_rx;
        let dy_inner = (point.y - self.center.y) / inner_ry;
        dx_inner * dx_inner + dy_inner * dy_inner > 1.0
    }

    fn to_path(&self) -> BezPath {
        self.as_kurbo().to_path(0.1)
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
        let ellipse = Ellipse::from_top_left(Point::new(100.0, 100.0), 50.0, 30.0);
        assert!((ellipse.center.x - 150.0).abs() < f64::EPSILON);
        assert!((ellipse.center.y - 130.0).abs() < f64::EPSILON);
        let bounds = ellipse.bounds();
        assert!((bounds.x0 - 100.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_test_edge() {
        let ellipse = Ellipse::new(Point::new(0.0, 0.0), 30.0, 20.0);
        assert!(ellipse.hit_test(Point::new(30.0, 0.0), 1.0));
        assert!(!ellipse.hit_test(Point::new(0.0, 0.0), 1.0));
        assert!(!ellipse.hit_test(Point::new(45.0, 0.0), 1.0));
    }
}
