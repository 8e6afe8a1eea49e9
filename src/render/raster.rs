//! Raster drawing backend built on resvg
//!
//! Used for live-view snapshots and for rasterizing exported documents.
//! Pixels are kept premultiplied while drawing and converted to straight
//! alpha only when handed to the `image` crate.

use image::{ImageBuffer, Rgba, RgbaImage};
use resvg::{tiny_skia, usvg};
use std::fmt;
use std::path::Path;

use crate::canvas::color::Rgb;
use crate::io::configuration::{LIVE_GRID_COLOR, LIVE_GRID_WIDTH};
use crate::io::error::{Result, TilepaintError};
use crate::render::cache::RenderedVariant;
use crate::render::compositor::{CellRect, DebugLabel, DrawTarget};

/// An RGBA pixel canvas that implements [`DrawTarget`]
pub struct RasterSurface {
    pixmap: tiny_skia::Pixmap,
    labels: Vec<(f32, f32, String)>,
}

impl RasterSurface {
    /// Create a surface filled with a background colour
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero.
    pub fn new(width: u32, height: u32, background: Rgb) -> Result<Self> {
        let mut pixmap =
            tiny_skia::Pixmap::new(width, height).ok_or(TilepaintError::InvalidDimensions {
                width: width as i64,
                height: height as i64,
            })?;
        pixmap.fill(tiny_skia::Color::from_rgba8(
            background.r,
            background.g,
            background.b,
            255,
        ));

        Ok(Self {
            pixmap,
            labels: Vec::new(),
        })
    }

    /// Rasterize a complete SVG document at its declared pixel size
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be parsed or has no area.
    pub fn from_document(document: &str) -> Result<Self> {
        let tree = usvg::Tree::from_str(document, &usvg::Options::default()).map_err(|e| {
            TilepaintError::Render {
                reason: format!("SVG parsing failed: {e}"),
            }
        })?;

        let size = tree.size();
        let mut pixmap = tiny_skia::Pixmap::new(
            size.width().ceil() as u32,
            size.height().ceil() as u32,
        )
        .ok_or_else(|| TilepaintError::Render {
            reason: "document has no drawable area".to_string(),
        })?;

        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

        Ok(Self {
            pixmap,
            labels: Vec::new(),
        })
    }

    /// Surface width in pixels
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    /// Surface height in pixels
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Straight-alpha colour of one pixel
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let color = self.pixmap.pixel(x, y)?.demultiply();
        Some([color.red(), color.green(), color.blue(), color.alpha()])
    }

    /// Debug labels drawn so far, as (centre x, centre y, text)
    pub fn labels(&self) -> &[(f32, f32, String)] {
        &self.labels
    }

    /// Convert to an `image` buffer with straight alpha
    pub fn to_image(&self) -> RgbaImage {
        let width = self.pixmap.width();
        ImageBuffer::from_fn(width, self.pixmap.height(), |x, y| {
            Rgba(self.pixel(x, y).unwrap_or([0, 0, 0, 0]))
        })
    }

    /// Save the surface as a PNG file, creating parent directories
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the image
    /// cannot be encoded or written.
    pub fn save_png(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| TilepaintError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        self.to_image()
            .save(path)
            .map_err(|e| TilepaintError::ImageExport {
                path: path.to_path_buf(),
                source: e,
            })
    }
}

impl fmt::Debug for RasterSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RasterSurface")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .field("labels", &self.labels.len())
            .finish()
    }
}

impl DrawTarget for RasterSurface {
    fn draw_variant(&mut self, image: &RenderedVariant, rect: CellRect) -> Result<()> {
        let native = image.tree().size();
        let transform = tiny_skia::Transform::from_row(
            rect.size / native.width(),
            0.0,
            0.0,
            rect.size / native.height(),
            rect.x,
            rect.y,
        );
        resvg::render(image.tree(), transform, &mut self.pixmap.as_mut());
        Ok(())
    }

    fn draw_grid_cell(&mut self, rect: CellRect) {
        let Some(bounds) = tiny_skia::Rect::from_xywh(rect.x, rect.y, rect.size, rect.size) else {
            return;
        };
        let path = tiny_skia::PathBuilder::from_rect(bounds);

        let mut paint = tiny_skia::Paint::default();
        paint.set_color_rgba8(LIVE_GRID_COLOR.r, LIVE_GRID_COLOR.g, LIVE_GRID_COLOR.b, 255);
        paint.anti_alias = true;

        let stroke = tiny_skia::Stroke {
            width: LIVE_GRID_WIDTH,
            ..tiny_skia::Stroke::default()
        };
        self.pixmap.stroke_path(
            &path,
            &paint,
            &stroke,
            tiny_skia::Transform::identity(),
            None,
        );
    }

    // Text needs a font stack; labels are recorded for the caller instead
    fn draw_label(&mut self, label: &DebugLabel, rect: CellRect) {
        let (cx, cy) = rect.center();
        self.labels.push((cx, cy, label.to_string()));
    }
}
