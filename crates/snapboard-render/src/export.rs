//! Snapshot export: flatten the canvas onto its background and encode a JPEG.
//!
//! Export runs in two steps. [`begin_export`] rasterizes the objects into a
//! transparent layer; [`PendingExport::finish`] composites that layer onto an
//! opaque background and encodes the result. Shells that decode asynchronously
//! hand the pending export to a task and call [`PendingExport::on_complete`].

use crate::renderer::{RenderContext, RenderResult, Renderer, RendererError};
use image::RgbImage;
use image::codecs::jpeg::JpegEncoder;
use peniko::Color;
use snapboard_core::canvas::Canvas;
use snapboard_core::config::WhiteboardConfig;
use snapboard_core::shapes::SerializableColor;
use snapboard_core::surface::DrawingSurface;
use tiny_skia::{Pixmap, PixmapPaint, Transform};

/// MIME type of exported snapshots.
pub const JPEG_MIME: &str = "image/jpeg";

/// Export settings.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Name offered for the downloaded file.
    pub filename: String,
    /// JPEG quality, 1-100.
    pub quality: u8,
    /// Color behind the objects. Defaults to the canvas background.
    pub background: Option<Color>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            filename: "Snap.jpg".to_string(),
            quality: 92,
            background: None,
        }
    }
}

impl ExportOptions {
    pub fn from_config(config: &WhiteboardConfig) -> Self {
        Self {
            filename: config.export_filename.clone(),
            quality: config.jpeg_quality,
            background: None,
        }
    }
}

/// An encoded snapshot ready to be saved or downloaded.
#[derive(Debug, Clone)]
pub struct ExportedImage {
    pub filename: String,
    pub width: u32,
    pub height: u32,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

/// A rendered layer waiting to be composited and encoded.
#[derive(Debug)]
#[must_use = "a pending export does nothing until it is finished"]
pub struct PendingExport {
    layer: Pixmap,
    background: SerializableColor,
    filename: String,
    quality: u8,
}

/// Rasterize the canvas objects for export.
///
/// The selection outline and caret are left out.
pub fn begin_export<R: Renderer + ?Sized>(
    canvas: &Canvas,
    renderer: &mut R,
    options: &ExportOptions,
) -> RenderResult<PendingExport> {
    let ctx = RenderContext::new(canvas)
        .with_background(None)
        .with_selection(false);
    let layer = renderer.render(&ctx)?;
    let background = options.background.unwrap_or_else(|| canvas.background_color());
    log::debug!(
        "Export layer ready: {}x{} with {} objects",
        layer.width(),
        layer.height(),
        canvas.object_count()
    );
    Ok(PendingExport {
        layer,
        background: background.into(),
        filename: options.filename.clone(),
        quality: options.quality.clamp(1, 100),
    })
}

impl PendingExport {
    pub fn width(&self) -> u32 {
        self.layer.width()
    }

    pub fn height(&self) -> u32 {
        self.layer.height()
    }

    /// Composite onto the background and encode.
    pub fn finish(self) -> RenderResult<ExportedImage> {
        let (width, height) = (self.layer.width(), self.layer.height());
        let mut flat = Pixmap::new(width, height).ok_or(RendererError::InvalidSize {
            width: width as f64,
            height: height as f64,
        })?;
        let bg = self.background;
        flat.fill(tiny_skia::Color::from_rgba8(bg.r, bg.g, bg.b, 255));
        flat.draw_pixmap(
            0,
            0,
            self.layer.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );

        // The flattened pixmap is opaque, so premultiplied and straight RGB agree.
        let rgb: Vec<u8> = flat
            .pixels()
            .iter()
            .flat_map(|p| [p.red(), p.green(), p.blue()])
            .collect();
        let image = RgbImage::from_raw(width, height, rgb)
            .ok_or_else(|| RendererError::RenderFailed("pixel buffer size mismatch".to_string()))?;

        let mut bytes = Vec::new();
        JpegEncoder::new_with_quality(&mut bytes, self.quality).encode_image(&image)?;
        log::info!("Exported {} ({}x{}, {} bytes)", self.filename, width, height, bytes.len());

        Ok(ExportedImage {
            filename: self.filename,
            width,
            height,
            mime: JPEG_MIME,
            bytes,
        })
    }

    /// Finish and hand the result to `callback`. The callback runs exactly once.
    pub fn on_complete<F>(self, callback: F)
    where
        F: FnOnce(RenderResult<ExportedImage>),
    {
        callback(self.finish());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skia::SkiaRenderer;
    use kurbo::Point;
    use snapboard_core::shapes::{Rectangle, Shape, ShapeStyle};
    use std::cell::Cell;

    fn decode(image: &ExportedImage) -> image::RgbImage {
        image::load_from_memory_with_format(&image.bytes, image::ImageFormat::Jpeg)
            .unwrap()
            .to_rgb8()
    }

    fn near(actual: u8, expected: u8) -> bool {
        actual.abs_diff(expected) <= 8
    }

    #[test]
    fn test_export_matches_canvas_size() {
        let canvas = Canvas::new(64.0, 48.0);
        let pending =
            begin_export(&canvas, &mut SkiaRenderer::new(), &ExportOptions::default()).unwrap();
        assert_eq!((pending.width(), pending.height()), (64, 48));

        let image = pending.finish().unwrap();
        assert_eq!(image.filename, "Snap.jpg");
        assert_eq!(image.mime, "image/jpeg");
        assert_eq!((image.width, image.height), (64, 48));
        assert_eq!(&image.bytes[..2], &[0xFF, 0xD8]);
        assert_eq!(decode(&image).dimensions(), (64, 48));
    }

    #[test]
    fn test_empty_canvas_exports_background() {
        let canvas = Canvas::new(32.0, 32.0);
        let image = begin_export(&canvas, &mut SkiaRenderer::new(), &ExportOptions::default())
            .unwrap()
            .finish()
            .unwrap();
        let px = decode(&image).get_pixel(16, 16).0;
        assert!(px.iter().all(|&c| near(c, 0x33)), "got {:?}", px);
    }

    #[test]
    fn test_objects_drawn_over_background() {
        let mut canvas = Canvas::new(64.0, 64.0);
        let white = Color::from_rgba8(255, 255, 255, 255);
        let mut style = ShapeStyle::outline(white);
        style.set_fill(Some(white));
        let rect = Rectangle::new(Point::new(16.0, 16.0), 32.0, 32.0).with_style(style);
        let id = canvas.add_object(Shape::Rectangle(rect));
        canvas.set_active_object(id);

        let image = begin_export(&canvas, &mut SkiaRenderer::new(), &ExportOptions::default())
            .unwrap()
            .finish()
            .unwrap();
        let decoded = decode(&image);
        assert!(decoded.get_pixel(32, 32).0.iter().all(|&c| near(c, 255)));
        assert!(decoded.get_pixel(4, 4).0.iter().all(|&c| near(c, 0x33)));
    }

    #[test]
    fn test_background_override() {
        let canvas = Canvas::new(16.0, 16.0);
        let options = ExportOptions {
            background: Some(Color::from_rgba8(255, 255, 255, 255)),
            ..ExportOptions::default()
        };
        let image = begin_export(&canvas, &mut SkiaRenderer::new(), &options)
            .unwrap()
            .finish()
            .unwrap();
        assert!(decode(&image).get_pixel(8, 8).0.iter().all(|&c| near(c, 255)));
    }

    #[test]
    fn test_on_complete_runs_once() {
        let canvas = Canvas::new(8.0, 8.0);
        let calls = Cell::new(0);
        begin_export(&canvas, &mut SkiaRenderer::new(), &ExportOptions::default())
            .unwrap()
            .on_complete(|result| {
                assert!(result.is_ok());
                calls.set(calls.get() + 1);
            });
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_zero_size_canvas_fails() {
        let canvas = Canvas::new(0.0, 0.0);
        let err = begin_export(&canvas, &mut SkiaRenderer::new(), &ExportOptions::default())
            .unwrap_err();
        assert!(matches!(err, RendererError::InvalidSize { .. }));
    }

    #[test]
    fn test_pending_export_debug() {
        let canvas = Canvas::new(4.0, 4.0);
        let pending =
            begin_export(&canvas, &mut SkiaRenderer::new(), &ExportOptions::default()).unwrap();
        let text = format!("{:?}", pending);
        assert!(text.contains("Snap.jpg"));
        assert!(pending.finish().is_ok());
    }

    #[test]
    fn test_options_from_config() {
        let config = WhiteboardConfig {
            export_filename: "board.jpg".to_string(),
            jpeg_quality: 70,
            ..WhiteboardConfig::default()
        };
        let options = ExportOptions::from_config(&config);
        assert_eq!(options.filename, "board.jpg");
        assert_eq!(options.quality, 70);
    }
}
