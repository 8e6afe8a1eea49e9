//! SVG and PNG export cropped to the painted region
//!
//! The exported document re-derives every variant from the grid with the
//! same resolver and recolours it through the same normalized group as the
//! live render cache, so it matches the live view path for path.

use chrono::{DateTime, TimeZone};
use std::fmt::{self, Display, Write};
use std::path::{Path, PathBuf};

use crate::assets::catalog::VariantCatalog;
use crate::assets::shape::{SVG_NAMESPACE, VectorShape, XLINK_NAMESPACE, parse_markup};
use crate::canvas::autotile::{VariantIndex, resolve};
use crate::canvas::glyph::GlyphId;
use crate::canvas::grid::{Grid, PlacedCell};
use crate::io::configuration::{
    BACKGROUND, EXPORT_GRID_COLOR, EXPORT_GRID_WIDTH, EXPORT_TIMESTAMP_FORMAT,
};
use crate::io::error::{Result, TilepaintError, malformed};
use crate::render::raster::RasterSurface;

/// Interior cell range covered by an export, inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportBounds {
    /// Leftmost column
    pub min_x: usize,
    /// Topmost row
    pub min_y: usize,
    /// Rightmost column
    pub max_x: usize,
    /// Bottom row
    pub max_y: usize,
}

impl ExportBounds {
    /// Number of columns covered
    pub const fn cols(&self) -> usize {
        self.max_x - self.min_x + 1
    }

    /// Number of rows covered
    pub const fn rows(&self) -> usize {
        self.max_y - self.min_y + 1
    }

    /// Check whether a cell lies inside the bounds
    pub const fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

/// Minimal rectangle around all painted cells, padded by one cell
///
/// Padding is clamped to the interior. Returns `None` when nothing is painted.
pub fn bounding_box(grid: &Grid) -> Option<ExportBounds> {
    let mut min_x = usize::MAX;
    let mut max_x = 0;
    let mut min_y = usize::MAX;
    let mut max_y = 0;
    let mut found_tiles = false;

    for placed in grid.occupied_cells() {
        found_tiles = true;
        min_x = min_x.min(placed.x);
        max_x = max_x.max(placed.x);
        min_y = min_y.min(placed.y);
        max_y = max_y.max(placed.y);
    }

    let interior_x = grid.interior_x();
    let interior_y = grid.interior_y();
    found_tiles.then(|| ExportBounds {
        min_x: (min_x - 1).max(*interior_x.start()),
        min_y: (min_y - 1).max(*interior_y.start()),
        max_x: (max_x + 1).min(*interior_x.end()),
        max_y: (max_y + 1).min(*interior_y.end()),
    })
}

/// One module group read back from an exported document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportedCell {
    /// Grid column of the module
    pub x: usize,
    /// Grid row of the module
    pub y: usize,
    /// Glyph of the module
    pub glyph: GlyphId,
    /// Variant the module was drawn with
    pub variant: VariantIndex,
}

/// Writes bounded SVG documents of the grid
#[derive(Debug, Clone, Copy)]
pub struct SvgExporter {
    pitch: u32,
}

impl SvgExporter {
    /// Create an exporter for a cell pitch in pixels
    pub const fn new(pitch: u32) -> Self {
        Self { pitch }
    }

    /// Render the painted region as a self-contained SVG document
    ///
    /// Returns `None` for an empty grid.
    ///
    /// # Errors
    ///
    /// Returns an error if a painted glyph has no geometry in the catalog.
    pub fn render(
        &self,
        grid: &Grid,
        catalog: &VariantCatalog,
        grid_lines: bool,
    ) -> Result<Option<String>> {
        let Some(bounds) = bounding_box(grid) else {
            return Ok(None);
        };

        let mut modules = Vec::with_capacity(grid.occupied_count());
        for placed in grid.occupied_cells() {
            let variant = resolve(grid, placed.x, placed.y)?;
            let shape = catalog.geometry(placed.glyph, variant)?;
            modules.push((placed, variant, shape));
        }

        let mut svg = String::with_capacity(4096);
        self.write_document(&mut svg, bounds, grid_lines, &modules)
            .map_err(|e| TilepaintError::Render {
                reason: format!("export formatting failed: {e}"),
            })?;
        tracing::debug!(
            cols = bounds.cols(),
            rows = bounds.rows(),
            cells = modules.len(),
            "rendered export"
        );
        Ok(Some(svg))
    }

    fn write_document(
        &self,
        svg: &mut String,
        bounds: ExportBounds,
        grid_lines: bool,
        modules: &[(PlacedCell, VariantIndex, &VectorShape)],
    ) -> fmt::Result {
        let pitch = self.pitch as usize;
        let width = bounds.cols() * pitch;
        let height = bounds.rows() * pitch;

        writeln!(svg, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
        writeln!(
            svg,
            "<svg xmlns=\"{SVG_NAMESPACE}\" xmlns:xlink=\"{XLINK_NAMESPACE}\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">"
        )?;
        writeln!(
            svg,
            "<rect x=\"0\" y=\"0\" width=\"{width}\" height=\"{height}\" fill=\"{}\"/>",
            BACKGROUND.css()
        )?;

        if grid_lines {
            writeln!(
                svg,
                "<g stroke=\"{EXPORT_GRID_COLOR}\" stroke-width=\"{EXPORT_GRID_WIDTH}\" fill=\"none\">"
            )?;
            for column in 0..=bounds.cols() {
                let x = column * pitch;
                writeln!(svg, "<line x1=\"{x}\" y1=\"0\" x2=\"{x}\" y2=\"{height}\"/>")?;
            }
            for row in 0..=bounds.rows() {
                let y = row * pitch;
                writeln!(svg, "<line x1=\"0\" y1=\"{y}\" x2=\"{width}\" y2=\"{y}\"/>")?;
            }
            writeln!(svg, "</g>")?;
        }

        for (placed, variant, shape) in modules {
            let left = ((placed.x - bounds.min_x) * pitch) as f32;
            let top = ((placed.y - bounds.min_y) * pitch) as f32;
            writeln!(
                svg,
                "<g transform=\"{}\" data-glyph=\"{}\" data-variant=\"{}\" data-cell=\"{},{}\">{}</g>",
                shape.view_box().placement(left, top, self.pitch as f32),
                placed.glyph,
                variant,
                placed.x,
                placed.y,
                shape.recolored_group(placed.color)
            )?;
        }

        writeln!(svg, "</svg>")
    }
}

/// Sortable `yyMMdd_HHmmss` file stem for an export time
pub fn timestamp_stem<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    now.format(EXPORT_TIMESTAMP_FORMAT).to_string()
}

/// Read the module groups of an exported document back
///
/// # Errors
///
/// Returns an error if the document is not an export written by
/// [`SvgExporter`].
pub fn read_layout(document: &str) -> Result<Vec<ExportedCell>> {
    let tree = parse_markup(document)?;
    let mut cells = Vec::new();

    for node in tree.root_element().children().filter(|n| n.is_element()) {
        let Some(cell) = node.attribute("data-cell") else {
            continue;
        };

        let (x, y) = cell
            .split_once(',')
            .and_then(|(x, y)| Some((x.parse().ok()?, y.parse().ok()?)))
            .ok_or_else(|| malformed(&format!("invalid data-cell '{cell}'")))?;
        let glyph = node
            .attribute("data-glyph")
            .and_then(|g| g.chars().next())
            .ok_or_else(|| malformed(&"module group without data-glyph"))
            .and_then(GlyphId::new)?;
        let variant = node
            .attribute("data-variant")
            .and_then(|v| v.parse::<u8>().ok())
            .ok_or_else(|| malformed(&"module group without data-variant"))
            .and_then(VariantIndex::new)?;

        cells.push(ExportedCell {
            x,
            y,
            glyph,
            variant,
        });
    }

    Ok(cells)
}

// Picks `{stem}.{ext}`, or `{stem}_{n}.{ext}` when exports share a second
fn unique_path(dir: &Path, stem: &str, extension: &str) -> PathBuf {
    let mut path = dir.join(format!("{stem}.{extension}"));
    let mut n = 1;
    while path.exists() {
        path = dir.join(format!("{stem}_{n}.{extension}"));
        n += 1;
    }
    path
}

/// Write an SVG document as `{stem}.svg` in a directory
///
/// An existing file with the same stem gets a numeric suffix instead of
/// being overwritten.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot be
/// written.
pub fn write_svg(dir: &Path, stem: &str, document: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| TilepaintError::FileSystem {
        path: dir.to_path_buf(),
        operation: "create directory",
        source: e,
    })?;

    let path = unique_path(dir, stem, "svg");
    std::fs::write(&path, document).map_err(|e| TilepaintError::FileSystem {
        path: path.clone(),
        operation: "write export",
        source: e,
    })?;
    tracing::info!(path = %path.display(), "exported SVG");
    Ok(path)
}

/// Rasterize an SVG document and write it as `{stem}.png` in a directory
///
/// # Errors
///
/// Returns an error if the document cannot be rasterized or the image cannot
/// be written.
pub fn write_png(dir: &Path, stem: &str, document: &str) -> Result<PathBuf> {
    write_raster(dir, stem, &RasterSurface::from_document(document)?)
}

/// Write a raster surface as `{stem}.png` in a directory
///
/// # Errors
///
/// Returns an error if the image cannot be encoded or written.
pub fn write_raster(dir: &Path, stem: &str, surface: &RasterSurface) -> Result<PathBuf> {
    let path = unique_path(dir, stem, "png");
    surface.save_png(&path)?;
    tracing::info!(path = %path.display(), "wrote PNG");
    Ok(path)
}
