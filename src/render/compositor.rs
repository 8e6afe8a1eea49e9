//! Per-frame composition of the grid onto a drawing backend
//!
//! One pass walks every interior cell in row-major order, resolves the
//! variant of each occupied cell, fetches its recoloured rendering from the
//! cache and hands it to a [`DrawTarget`]. A cell whose rendering fails is
//! skipped and reported; the pass itself never aborts.

use std::fmt;

use crate::assets::catalog::VariantCatalog;
use crate::canvas::autotile::{NeighborPattern, VariantIndex, resolve_with_pattern};
use crate::canvas::glyph::GlyphId;
use crate::canvas::grid::{Grid, cell_origin};
use crate::io::error::Result;
use crate::render::cache::{RenderCache, RenderedVariant};

/// Square pixel area a cell is drawn into
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellRect {
    /// Left edge in pixels
    pub x: f32,
    /// Top edge in pixels
    pub y: f32,
    /// Side length in pixels
    pub size: f32,
}

impl CellRect {
    /// Pixel centre of the rectangle
    pub const fn center(&self) -> (f32, f32) {
        let half = self.size / 2.0;
        (self.x + half, self.y + half)
    }
}

/// Diagnostic overlay text for one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebugLabel {
    /// Glyph of the cell
    pub glyph: GlyphId,
    /// Resolved variant
    pub variant: VariantIndex,
    /// Raw neighbourhood pattern
    pub pattern: NeighborPattern,
}

impl fmt::Display for DebugLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\n{}\n{}",
            self.glyph,
            self.variant.value(),
            self.pattern
        )
    }
}

/// A rendering backend the compositor draws through
pub trait DrawTarget {
    /// Draw one recoloured variant scaled into a cell rectangle
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot draw the rendering.
    fn draw_variant(&mut self, image: &RenderedVariant, rect: CellRect) -> Result<()>;

    /// Outline one grid cell for the grid overlay
    fn draw_grid_cell(&mut self, _rect: CellRect) {}

    /// Draw a debug label over a cell
    fn draw_label(&mut self, _label: &DebugLabel, _rect: CellRect) {}
}

/// Mode toggles that affect a composition pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ComposeOptions {
    /// Outline every cell before drawing modules
    pub grid_lines: bool,
    /// Overlay glyph, variant and pattern on every module
    pub debug: bool,
}

/// Outcome counts of one composition pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ComposeStats {
    /// Modules drawn
    pub drawn: usize,
    /// Occupied cells skipped because their rendering failed
    pub skipped: usize,
}

/// Draws the grid through the render cache
#[derive(Debug, Clone, Copy)]
pub struct Compositor {
    pitch: u32,
}

impl Compositor {
    /// Create a compositor for a cell pitch in pixels
    pub const fn new(pitch: u32) -> Self {
        Self { pitch }
    }

    /// Pixel rectangle of an interior cell
    pub const fn cell_rect(&self, x: usize, y: usize) -> CellRect {
        let (left, top) = cell_origin(x, y, self.pitch);
        CellRect {
            x: left,
            y: top,
            size: self.pitch as f32,
        }
    }

    /// Run one composition pass
    pub fn compose(
        &self,
        grid: &Grid,
        catalog: &VariantCatalog,
        cache: &mut RenderCache,
        target: &mut dyn DrawTarget,
        options: ComposeOptions,
    ) -> ComposeStats {
        let mut stats = ComposeStats::default();

        if options.grid_lines {
            self.draw_grid(grid, target);
        }

        for placed in grid.occupied_cells() {
            let rect = self.cell_rect(placed.x, placed.y);
            let outcome = resolve_with_pattern(grid, placed.x, placed.y).and_then(|(variant, pattern)| {
                let image = cache.get_image(catalog, placed.glyph, variant, placed.color)?;
                target.draw_variant(&image, rect)?;
                Ok((variant, pattern))
            });

            match outcome {
                Ok((variant, pattern)) => {
                    stats.drawn += 1;
                    if options.debug {
                        let label = DebugLabel {
                            glyph: placed.glyph,
                            variant,
                            pattern,
                        };
                        target.draw_label(&label, rect);
                    }
                }
                Err(error) => {
                    stats.skipped += 1;
                    tracing::warn!(x = placed.x, y = placed.y, %error, "skipping cell");
                }
            }
        }

        stats
    }

    // Every cell of the full array, border included, is outlined
    fn draw_grid(&self, grid: &Grid, target: &mut dyn DrawTarget) {
        let (cols, rows) = grid.dimensions();
        let size = self.pitch as f32;
        for y in 0..rows {
            for x in 0..cols {
                target.draw_grid_cell(CellRect {
                    x: (x as f32 - 1.0) * size,
                    y: (y as f32 - 1.0) * size,
                    size,
                });
            }
        }
    }
}
