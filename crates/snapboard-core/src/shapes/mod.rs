//! Visual objects placed on the whiteboard.

mod circle;
mod ellipse;
mod freehand;
mod polygon;
mod rectangle;
mod text;
mod triangle;

pub use circle::Circle;
pub use ellipse::Ellipse;
pub use freehand::Freehand;
pub use polygon::Polygon;
pub use rectangle::Rectangle;
pub use text::{Text, TextAlign};
pub use triangle::Triangle;

use kurbo::{BezPath, Point, Rect};
use peniko::Color;
use uuid::Uuid;

/// Plain RGBA8 color, comparable and convertible to peniko `Color`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Check if the color is fully transparent.
    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Default stroke width for inserted shapes.
pub const DEFAULT_STROKE_WIDTH: f64 = 1.0;

/// Style properties for shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeStyle {
    /// Stroke color.
    pub stroke_color: SerializableColor,
    /// Stroke width.
    pub stroke_width: f64,
    /// Fill color (None = transparent).
    pub fill_color: Option<SerializableColor>,
}

impl ShapeStyle {
    /// Outline-only style in the given color.
    pub fn outline(color: Color) -> Self {
        Self {
            stroke_color: color.into(),
            ..Self::default()
        }
    }

    /// Get the stroke color as a peniko Color.
    pub fn stroke(&self) -> Color {
        self.stroke_color.into()
    }

    /// Get the fill color as a peniko Color.
    pub fn fill(&self) -> Option<Color> {
        self.fill_color.map(|c| c.into())
    }

    /// Set the fill color from a peniko Color.
    pub fn set_fill(&mut self, color: Option<Color>) {
        self.fill_color = color.map(|c| c.into());
    }

    /// Whether the fill paints anything.
    pub fn has_visible_fill(&self) -> bool {
        self.fill_color.is_some_and(|c| !c.is_transparent())
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            stroke_color: SerializableColor::black(),
            stroke_width: DEFAULT_STROKE_WIDTH,
            fill_color: None,
        }
    }
}

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = kurbo::Vec2::new(b.x - a.x, b.y - a.y);
    let pv = kurbo::Vec2::new(point.x - a.x, point.y - a.y);
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = Point::new(a.x + t * seg.x, a.y + t * seg.y);
    ((point.x - proj.x).powi(2) + (point.y - proj.y).powi(2)).sqrt()
}

/// Minimum distance from a point to a polyline (sequence of connected segments).
pub fn point_to_polyline_dist(point: Point, points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|w| point_to_segment_dist(point, w[0], w[1]))
        .fold(f64::INFINITY, f64::min)
}

/// Hit-test a closed outline given by its vertices.
///
/// Filled outlines hit anywhere inside; unfilled ones only near an edge.
pub(crate) fn hit_test_outline(
    vertices: &[Point],
    point: Point,
    tolerance: f64,
    style: &ShapeStyle,
) -> bool {
    let Some(&first) = vertices.first() else {
        return false;
    };
    let mut closed = vertices.to_vec();
    closed.push(first);

    if style.has_visible_fill() && point_in_polygon(point, vertices) {
        return true;
    }
    point_to_polyline_dist(point, &closed) <= tolerance + style.stroke_width / 2.0
}

/// Even-odd point in polygon test.
fn point_in_polygon(point: Point, vertices: &[Point]) -> bool {
    let mut inside = false;
    let mut j = vertices.len().wrapping_sub(1);
    for i in 0..vertices.len() {
        let (a, b) = (vertices[i], vertices[j]);
        if (a.y > point.y) != (b.y > point.y)
            && point.x < (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Common trait for all shapes.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// Get the bounding box in canvas coordinates.
    fn bounds(&self) -> Rect;

    /// Check if a point (in canvas coordinates) hits this shape.
    fn hit_test(&self, point: Point, tolerance: f64) -> bool;

    /// Get the path representation for rendering.
    fn to_path(&self) -> BezPath;

    /// Get the style.
    fn style(&self) -> &ShapeStyle;

    /// Get mutable style.
    fn style_mut(&mut self) -> &mut ShapeStyle;
}

/// Discriminant of a [`Shape`], used for type checks and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Rectangle,
    Circle,
    Triangle,
    Hexagon,
    Ellipse,
    Text,
    Freehand,
}

impl ShapeKind {
    /// Lower-case name of the kind.
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Circle => "circle",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Hexagon => "hexagon",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::Text => "textbox",
            ShapeKind::Freehand => "path",
        }
    }
}

/// Enum wrapper for all shape types.
#[derive(Debug, Clone)]
pub enum Shape {
    Rectangle(Rectangle),
    Circle(Circle),
    Triangle(Triangle),
    Polygon(Polygon),
    Ellipse(Ellipse),
    Text(Text),
    Freehand(Freehand),
}

impl Shape {
    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Rectangle(s) => s.id(),
            Shape::Circle(s) => s.id(),
            Shape::Triangle(s) => s.id(),
            Shape::Polygon(s) => s.id(),
            Shape::Ellipse(s) => s.id(),
            Shape::Text(s) => s.id(),
            Shape::Freehand(s) => s.id(),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Triangle(_) => ShapeKind::Triangle,
            Shape::Polygon(_) => ShapeKind::Hexagon,
            Shape::Ellipse(_) => ShapeKind::Ellipse,
            Shape::Text(_) => ShapeKind::Text,
            Shape::Freehand(_) => ShapeKind::Freehand,
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Rectangle(s) => s.bounds(),
            Shape::Circle(s) => s.bounds(),
            Shape::Triangle(s) => s.bounds(),
            Shape::Polygon(s) => s.bounds(),
            Shape::Ellipse(s) => s.bounds(),
            Shape::Text(s) => s.bounds(),
            Shape::Freehand(s) => s.bounds(),
        }
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        match self {
            Shape::Rectangle(s) => s.hit_test(point, tolerance),
            Shape::Circle(s) => s.hit_test(point, tolerance),
            Shape::Triangle(s) => s.hit_test(point, tolerance),
            Shape::Polygon(s) => s.hit_test(point, tolerance),
            Shape::Ellipse(s) => s.hit_test(point, tolerance),
            Shape::Text(s) => s.hit_test(point, tolerance),
            Shape::Freehand(s) => s.hit_test(point, tolerance),
        }
    }

    pub fn to_path(&self) -> BezPath {
        match self {
            Shape::Rectangle(s) => s.to_path(),
            Shape::Circle(s) => s.to_path(),
            Shape::Triangle(s) => s.to_path(),
            Shape::Polygon(s) => s.to_path(),
            Shape::Ellipse(s) => s.to_path(),
            Shape::Text(s) => s.to_path(),
            Shape::Freehand(s) => s.to_path(),
        }
    }

    pub fn style(&self) -> &ShapeStyle {
        match self {
            Shape::Rectangle(s) => s.style(),
            Shape::Circle(s) => s.style(),
            Shape::Triangle(s) => s.style(),
            Shape::Polygon(s) => s.style(),
            Shape::Ellipse(s) => s.style(),
            Shape::Text(s) => s.style(),
            Shape::Freehand(s) => s.style(),
        }
    }

    pub fn style_mut(&mut self) -> &mut ShapeStyle {
        match self {
            Shape::Rectangle(s) => s.style_mut(),
            Shape::Circle(s) => s.style_mut(),
            Shape::Triangle(s) => s.style_mut(),
            Shape::Polygon(s) => s.style_mut(),
            Shape::Ellipse(s) => s.style_mut(),
            Shape::Text(s) => s.style_mut(),
            Shape::Freehand(s) => s.style_mut(),
        }
    }

    /// Check if this shape is a text box.
    pub fn is_text(&self) -> bool {
        matches!(self, Shape::Text(_))
    }

    /// Get the text if this shape is a text box.
    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Shape::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Get the mutable text if this shape is a text box.
    pub fn as_text_mut(&mut self) -> Option<&mut Text> {
        match self {
            Shape::Text(t) => Some(t),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_roundtrip_through_peniko() {
        let color = SerializableColor::new(12, 34, 56, 255);
        let peniko: Color = color.into();
        assert_eq!(SerializableColor::from(peniko), color);
    }

    #[test]
    fn test_cloned_shape_is_independent() {
        let rect = Shape::Rectangle(Rectangle::new(Point::new(0.0, 0.0), 10.0, 10.0));
        let mut copy = rect.clone();
        copy.style_mut().fill_color = Some(SerializableColor::new(255, 0, 0, 255));
        assert_eq!(copy.id(), rect.id());
        assert!(rect.style().fill_color.is_none());
        assert_ne!(copy.style(), rect.style());
    }

    #[test]
    fn test_outline_style_is_unfilled() {
        let style = ShapeStyle::outline(Color::from_rgba8(255, 0, 0, 255));
        assert_eq!(style.stroke_color, SerializableColor::new(255, 0, 0, 255));
        assert!(style.fill_color.is_none());
        assert!(!style.has_visible_fill());
    }

    #[test]
    fn test_transparent_fill_is_not_visible() {
        let mut style = ShapeStyle::default();
        style.set_fill(Some(Color::from_rgba8(0, 0, 0, 0)));
        assert!(!style.has_visible_fill());
        style.set_fill(Some(Color::from_rgba8(0, 0, 0, 255)));
        assert!(style.has_visible_fill());
    }

    #[test]
    fn test_point_to_segment_dist() {
        let d = point_to_segment_dist(
            Point::new(5.0, 5.0),
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
        );
        assert!((d - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_point_in_polygon() {
        let square = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        assert!(point_in_polygon(Point::new(5.0, 5.0), &square));
        assert!(!point_in_polygon(Point::new(15.0, 5.0), &square));
    }

    #[test]
    fn test_shape_kind_names() {
        let text = Shape::Text(Text::new(Point::new(0.0, 0.0), String::new()));
        assert_eq!(text.kind().name(), "textbox");
        assert!(text.is_text());

        let rect = Shape::Rectangle(Rectangle::new(Point::new(0.0, 0.0), 10.0, 10.0));
        assert_eq!(rect.kind(), ShapeKind::Rectangle);
        assert!(rect.as_text().is_none());
    }
}
