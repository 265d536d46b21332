//! Text box shape.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{BezPath, Point, Rect, Shape as KurboShape};
use uuid::Uuid;

/// Horizontal text alignment inside the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// An editable, fixed-width text box.
///
/// The text color lives in `style.fill_color`, like any filled glyph run.
#[derive(Debug, Clone)]
pub struct Text {
    pub(crate) id: ShapeId,
    /// Top-left corner of the box.
    pub position: Point,
    /// The text content.
    pub content: String,
    /// Font size in pixels.
    pub font_size: f64,
    /// Font family name handed to the text renderer.
    pub font_family: String,
    /// Box width; lines wrap at this width.
    pub width: f64,
    pub text_align: TextAlign,
    /// Wrap between any two characters instead of at word boundaries.
    pub split_by_grapheme: bool,
    /// Whether the content can be edited in place.
    pub editable: bool,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Text {
    /// Default font size.
    pub const DEFAULT_FONT_SIZE: f64 = 20.0;
    /// Line height as a multiple of the font size.
    pub const LINE_HEIGHT: f64 = 1.16;
    /// Average glyph advance as a multiple of the font size.
    const CHAR_WIDTH_FACTOR: f64 = 0.55;

    /// Create a new text box.
    pub fn new(position: Point, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            content,
            font_size: Self::DEFAULT_FONT_SIZE,
            font_family: String::from("sans-serif"),
            width: 200.0,
            text_align: TextAlign::default(),
            split_by_grapheme: false,
            editable: true,
            style: ShapeStyle::default(),
        }
    }

    /// Set the font size.
    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = size;
        self
    }

    /// Set the font family.
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    /// Set the box width.
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.style = style;
        self
    }

    /// Get the text content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Append text at the end of the content.
    pub fn insert_str(&mut self, text: &str) {
        self.content.push_str(text);
    }

    /// Remove the last character. Returns false if the content was empty.
    pub fn delete_backward(&mut self) -> bool {
        self.content.pop().is_some()
    }

    /// Estimated advance of one character.
    pub fn char_width(&self) -> f64 {
        self.font_size * Self::CHAR_WIDTH_FACTOR
    }

    fn chars_per_line(&self) -> usize {
        (self.width / self.char_width()).floor().max(1.0) as usize
    }

    /// Estimated number of visual lines after wrapping.
    pub fn line_count(&self) -> usize {
        let per_line = self.chars_per_line();
        self.content
            .split('\n')
            .map(|line| line.chars().count().div_ceil(per_line).max(1))
            .sum()
    }

    /// `(line, column, char)` of every character after wrapping. Newlines are skipped.
    pub fn char_cells(&self) -> Vec<(usize, usize, char)> {
        let per_line = self.chars_per_line();
        let mut cells = Vec::with_capacity(self.content.len());
        let mut row = 0;
        for line in self.content.split('\n') {
            let mut count = 0;
            for (i, ch) in line.chars().enumerate() {
                cells.push((row + i / per_line, i % per_line, ch));
                count = i + 1;
            }
            row += count.div_ceil(per_line).max(1);
        }
        cells
    }

    /// `(line, column)` just after the last character.
    pub fn caret_cell(&self) -> (usize, usize) {
        let per_line = self.chars_per_line();
        let last = self.content.rsplit('\n').next().unwrap_or_default();
        let n = last.chars().count();
        let first_row = self.line_count() - n.div_ceil(per_line).max(1);
        if n == 0 {
            (first_row, 0)
        } else {
            (first_row + (n - 1) / per_line, (n - 1) % per_line + 1)
        }
    }

    /// Height of one line in pixels.
    pub fn line_height(&self) -> f64 {
        self.font_size * Self::LINE_HEIGHT
    }
}

impl ShapeTrait for Text {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.line_count() as f64 * self.line_height(),
        )
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.bounds().inflate(tolerance, tolerance).contains(point)
    }

    fn to_path(&self) -> BezPath {
        // Glyph outlines come from the text renderer; the box stands in for selection.
        self.bounds().to_path(0.1)
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }
}
