//! CPU rasterizer built on tiny-skia.
//!
//! Shapes are drawn back to front: fill first, then outline. Text has no
//! font backend here, so each visible character is drawn as a solid block
//! in the text color.

use crate::renderer::{RenderContext, RenderResult, Renderer, RendererError};
use kurbo::{BezPath, PathEl, Point, Rect};
use snapboard_core::canvas::Canvas;
use snapboard_core::shapes::{Freehand, SerializableColor, Shape, ShapeStyle, ShapeTrait, Text};
use snapboard_core::surface::DrawingSurface;
use tiny_skia::{
    FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, StrokeDash, Transform,
};

/// Gap between a shape and its selection outline.
const SELECTION_PADDING: f64 = 4.0;
const SELECTION_DASH: [f32; 2] = [6.0, 4.0];

/// Software renderer producing a [`Pixmap`] per frame.
#[derive(Debug, Default)]
pub struct SkiaRenderer {
    frames: u64,
}

impl SkiaRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames rendered so far.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}

impl Renderer for SkiaRenderer {
    fn render(&mut self, ctx: &RenderContext) -> RenderResult<Pixmap> {
        let (width, height) = ctx.pixel_size()?;
        let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
            RendererError::RenderFailed(format!("cannot allocate {}x{} pixmap", width, height))
        })?;

        if let Some(bg) = ctx.background {
            pixmap.fill(skia_color(bg.into()));
        }

        for shape in ctx.canvas.shapes() {
            draw_shape(&mut pixmap, shape);
        }
        if let Some(stroke) = ctx.canvas.stroke_in_progress() {
            draw_freehand(&mut pixmap, stroke);
        }
        if ctx.show_selection {
            draw_selection(&mut pixmap, ctx.canvas, ctx.selection_color.into());
        }

        self.frames += 1;
        log::trace!("Rendered frame {} ({}x{})", self.frames, width, height);
        Ok(pixmap)
    }
}

fn skia_color(c: SerializableColor) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn paint(color: SerializableColor) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(skia_color(color));
    paint.anti_alias = true;
    paint
}

/// Straight-alpha RGBA bytes of a pixmap, row by row.
pub fn to_rgba8(pixmap: &Pixmap) -> Vec<u8> {
    pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect()
}

/// Convert a kurbo path into a tiny-skia path. Returns `None` for empty paths.
pub fn to_skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(p1, p2) => {
                pb.quad_to(p1.x as f32, p1.y as f32, p2.x as f32, p2.y as f32)
            }
            PathEl::CurveTo(p1, p2, p3) => pb.cubic_to(
                p1.x as f32,
                p1.y as f32,
                p2.x as f32,
                p2.y as f32,
                p3.x as f32,
                p3.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

fn draw_shape(pixmap: &mut Pixmap, shape: &Shape) {
    match shape {
        Shape::Text(text) => draw_text(pixmap, text),
        Shape::Freehand(stroke) => draw_freehand(pixmap, stroke),
        _ => {
            let Some(path) = to_skia_path(&shape.to_path()) else {
                return;
            };
            let style = shape.style();
            if let Some(fill) = style.fill_color.filter(|c| !c.is_transparent()) {
                pixmap.fill_path(
                    &path,
                    &paint(fill),
                    FillRule::Winding,
                    Transform::identity(),
                    None,
                );
            }
            stroke_path(pixmap, &path, style, LineCap::Butt, LineJoin::Miter);
        }
    }
}

fn stroke_path(
    pixmap: &mut Pixmap,
    path: &tiny_skia::Path,
    style: &ShapeStyle,
    line_cap: LineCap,
    line_join: LineJoin,
) {
    if style.stroke_width <= 0.0 || style.stroke_color.is_transparent() {
        return;
    }
    let stroke = Stroke {
        width: style.stroke_width as f32,
        line_cap,
        line_join,
        ..Default::default()
    };
    pixmap.stroke_path(path, &paint(style.stroke_color), &stroke, Transform::identity(), None);
}

fn draw_freehand(pixmap: &mut Pixmap, stroke: &Freehand) {
    let style = &stroke.style;
    if let Some(fill) = style.fill_color.filter(|c| !c.is_transparent()) {
        if let Some(path) = to_skia_path(&stroke.to_path()) {
            pixmap.fill_path(&path, &paint(fill), FillRule::Winding, Transform::identity(), None);
        }
    }

    match stroke.points.as_slice() {
        [] => {}
        [dot] => {
            // A tap leaves a round dot the size of the brush.
            let radius = (style.stroke_width / 2.0).max(0.5) as f32;
            if let Some(path) = PathBuilder::from_circle(dot.x as f32, dot.y as f32, radius) {
                pixmap.fill_path(
                    &path,
                    &paint(style.stroke_color),
                    FillRule::Winding,
                    Transform::identity(),
                    None,
                );
            }
        }
        _ => {
            if let Some(path) = to_skia_path(&stroke.to_path()) {
                stroke_path(pixmap, &path, style, LineCap::Round, LineJoin::Round);
            }
        }
    }
}

fn draw_text(pixmap: &mut Pixmap, text: &Text) {
    let Some(color) = text.style.fill_color.filter(|c| !c.is_transparent()) else {
        return;
    };
    let paint = paint(color);
    let mut pb = PathBuilder::new();
    for (line, column, ch) in text.char_cells() {
        if ch.is_whitespace() {
            continue;
        }
        let cell = char_cell(text, line, column);
        // Leave a little air around each block so words stay readable.
        let block = Rect::new(
            cell.x0 + cell.width() * 0.1,
            cell.y0 + cell.height() * 0.25,
            cell.x1 - cell.width() * 0.1,
            cell.y1 - cell.height() * 0.1,
        );
        push_rect(&mut pb, block);
    }
    if let Some(path) = pb.finish() {
        pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }
}

/// Layout cell of a character in a text box.
fn char_cell(text: &Text, line: usize, column: usize) -> Rect {
    let x = text.position.x + column as f64 * text.char_width();
    let y = text.position.y + line as f64 * text.line_height();
    Rect::new(x, y, x + text.char_width(), y + text.line_height())
}

fn push_rect(pb: &mut PathBuilder, rect: Rect) {
    pb.move_to(rect.x0 as f32, rect.y0 as f32);
    pb.line_to(rect.x1 as f32, rect.y0 as f32);
    pb.line_to(rect.x1 as f32, rect.y1 as f32);
    pb.line_to(rect.x0 as f32, rect.y1 as f32);
    pb.close();
}

fn draw_selection(pixmap: &mut Pixmap, canvas: &Canvas, color: SerializableColor) {
    let Some(shape) = canvas.active_shape() else {
        return;
    };
    let paint = paint(color);

    let bounds = shape.bounds().inflate(SELECTION_PADDING, SELECTION_PADDING);
    let mut pb = PathBuilder::new();
    push_rect(&mut pb, bounds);
    if let Some(path) = pb.finish() {
        let stroke = Stroke {
            width: 1.0,
            dash: StrokeDash::new(SELECTION_DASH.to_vec(), 0.0),
            ..Default::default()
        };
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    let editing = canvas
        .editing_shape()
        .and_then(|id| canvas.object(id))
        .and_then(Shape::as_text);
    if let Some(text) = editing {
        let (line, column) = text.caret_cell();
        let cell = char_cell(text, line, column);
        let top = Point::new(cell.x0, cell.y0 + 2.0);
        let bottom = Point::new(cell.x0, cell.y1 - 2.0);
        let mut pb = PathBuilder::new();
        pb.move_to(top.x as f32, top.y as f32);
        pb.line_to(bottom.x as f32, bottom.y as f32);
        if let Some(path) = pb.finish() {
            let stroke = Stroke {
                width: 1.5,
                ..Default::default()
            };
            pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
    }
}
