//! Grid store with a permanently empty sentinel border
//!
//! Cells are stored in an `(W + 2) x (H + 2)` array indexed `[x, y]`. The
//! outer ring is never written by any public operation, so every interior
//! cell has four in-bounds neighbours and neighbourhood lookups need no
//! bounds special-casing.

use ndarray::Array2;
use std::ops::RangeInclusive;

use crate::canvas::autotile::NeighborPattern;
use crate::canvas::color::Rgb;
use crate::canvas::glyph::GlyphId;
use crate::io::configuration::MAX_GRID_CELLS;
use crate::io::error::{Result, TilepaintError};

/// State of one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    /// Nothing painted; carries no colour
    #[default]
    Empty,
    /// Painted with a glyph in a colour
    Occupied {
        /// Tileset of the painted module
        glyph: GlyphId,
        /// Fill colour of the painted module
        color: Rgb,
    },
}

impl Cell {
    /// Check whether the cell participates in neighbourhood patterns
    pub const fn is_occupied(&self) -> bool {
        matches!(self, Self::Occupied { .. })
    }
}

/// An occupied interior cell yielded by [`Grid::occupied_cells`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedCell {
    /// Column index
    pub x: usize,
    /// Row index
    pub y: usize,
    /// Painted glyph
    pub glyph: GlyphId,
    /// Painted colour
    pub color: Rgb,
}

/// Resizable cell grid with a one-cell empty border
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Array2<Cell>,
}

impl Grid {
    /// Create an all-empty grid with the given interior size
    ///
    /// # Errors
    ///
    /// Returns an error if either interior dimension is zero or the grid
    /// would exceed [`MAX_GRID_CELLS`].
    pub fn new(cols: usize, rows: usize) -> Result<Self> {
        let shape = bordered_shape(cols, rows)?;
        Ok(Self {
            cells: Array2::from_elem(shape, Cell::Empty),
        })
    }

    /// Create an all-empty grid covering a viewport
    ///
    /// The interior holds `round(viewport / pitch)` cells per axis.
    ///
    /// # Errors
    ///
    /// Returns an error if the viewport or pitch is not positive.
    pub fn for_viewport(width: i64, height: i64, pitch: u32) -> Result<Self> {
        let (cols, rows) = viewport_cells(width, height, pitch)?;
        Self::new(cols, rows)
    }

    /// Full dimensions including the border (cols, rows)
    pub fn dimensions(&self) -> (usize, usize) {
        self.cells.dim()
    }

    /// Interior dimensions (cols, rows)
    pub fn interior_size(&self) -> (usize, usize) {
        let (cols, rows) = self.dimensions();
        (cols - 2, rows - 2)
    }

    /// Valid interior column indices
    pub fn interior_x(&self) -> RangeInclusive<usize> {
        1..=self.dimensions().0 - 2
    }

    /// Valid interior row indices
    pub fn interior_y(&self) -> RangeInclusive<usize> {
        1..=self.dimensions().1 - 2
    }

    /// Check whether a coordinate is an interior cell
    pub fn is_interior(&self, x: usize, y: usize) -> bool {
        self.interior_x().contains(&x) && self.interior_y().contains(&y)
    }

    /// Clamp an arbitrary coordinate into the interior
    pub fn clamp(&self, x: i64, y: i64) -> (usize, usize) {
        let (cols, rows) = self.dimensions();
        (
            x.clamp(1, cols as i64 - 2) as usize,
            y.clamp(1, rows as i64 - 2) as usize,
        )
    }

    /// Paint a cell, clamping the coordinate into the interior
    ///
    /// Returns the coordinate that was actually written.
    pub fn place(&mut self, x: i64, y: i64, glyph: GlyphId, color: Rgb) -> (usize, usize) {
        let (cx, cy) = self.clamp(x, y);
        if let Some(cell) = self.cells.get_mut([cx, cy]) {
            *cell = Cell::Occupied { glyph, color };
        }
        (cx, cy)
    }

    /// Empty a cell, clamping the coordinate into the interior
    ///
    /// Returns the coordinate that was actually cleared.
    pub fn erase(&mut self, x: i64, y: i64) -> (usize, usize) {
        let (cx, cy) = self.clamp(x, y);
        if let Some(cell) = self.cells.get_mut([cx, cy]) {
            *cell = Cell::Empty;
        }
        (cx, cy)
    }

    /// Reallocate to a new interior size, keeping overlapping cells
    ///
    /// Cells present in both the old and new interior keep their value; new
    /// cells are empty. Old cells that would land on the new border ring are
    /// dropped so the border stays empty.
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or the grid would exceed
    /// [`MAX_GRID_CELLS`]; the grid is unchanged.
    pub fn resize(&mut self, cols: usize, rows: usize) -> Result<()> {
        let shape = bordered_shape(cols, rows)?;
        let old = &self.cells;
        let (old_cols, old_rows) = old.dim();
        let resized = Array2::from_shape_fn(shape, |(x, y)| {
            let inside_new = (1..=cols).contains(&x) && (1..=rows).contains(&y);
            let inside_old = (1..old_cols - 1).contains(&x) && (1..old_rows - 1).contains(&y);
            if inside_new && inside_old {
                old.get([x, y]).copied().unwrap_or_default()
            } else {
                Cell::Empty
            }
        });

        let before = self.occupied_count();
        self.cells = resized;
        let dropped = before - self.occupied_count();
        if dropped > 0 {
            tracing::debug!(dropped, cols, rows, "resize cut occupied cells");
        }

        Ok(())
    }

    /// Resize to cover a new viewport
    ///
    /// # Errors
    ///
    /// Returns an error if the viewport or pitch is not positive; the grid is
    /// unchanged.
    pub fn resize_viewport(&mut self, width: i64, height: i64, pitch: u32) -> Result<()> {
        let (cols, rows) = viewport_cells(width, height, pitch)?;
        self.resize(cols, rows)
    }

    /// Empty every cell, keeping the current dimensions
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Read a cell; coordinates outside the array read as empty
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.cells.get([x, y]).copied().unwrap_or_default()
    }

    /// Check whether a cell is painted
    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        self.cell(x, y).is_occupied()
    }

    /// Occupancy of the four direct neighbours of an interior cell
    ///
    /// # Errors
    ///
    /// Returns an error if the coordinate is not an interior cell.
    pub fn neighbor_occupancy(&self, x: usize, y: usize) -> Result<NeighborPattern> {
        if !self.is_interior(x, y) {
            return Err(TilepaintError::OutOfInterior {
                x,
                y,
                dimensions: self.dimensions(),
            });
        }

        Ok(NeighborPattern {
            north: self.is_occupied(x, y - 1),
            west: self.is_occupied(x - 1, y),
            south: self.is_occupied(x, y + 1),
            east: self.is_occupied(x + 1, y),
        })
    }

    /// Occupied interior cells in row-major order
    pub fn occupied_cells(&self) -> impl Iterator<Item = PlacedCell> + '_ {
        self.interior_y().flat_map(move |y| {
            self.interior_x()
                .filter_map(move |x| match self.cell(x, y) {
                    Cell::Occupied { glyph, color } => Some(PlacedCell { x, y, glyph, color }),
                    Cell::Empty => None,
                })
        })
    }

    /// Number of occupied interior cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_occupied()).count()
    }
}

// Array shape for an interior, border included, within the allocation limit
fn bordered_shape(cols: usize, rows: usize) -> Result<(usize, usize)> {
    let invalid = || TilepaintError::InvalidDimensions {
        width: i64::try_from(cols).unwrap_or(i64::MAX),
        height: i64::try_from(rows).unwrap_or(i64::MAX),
    };
    if cols == 0 || rows == 0 {
        return Err(invalid());
    }

    let full_cols = cols.checked_add(2).ok_or_else(invalid)?;
    let full_rows = rows.checked_add(2).ok_or_else(invalid)?;
    match full_cols.checked_mul(full_rows) {
        Some(total) if total <= MAX_GRID_CELLS => Ok((full_cols, full_rows)),
        _ => Err(invalid()),
    }
}

/// Interior cell counts for a viewport, `round(size / pitch)` per axis
///
/// Positive viewports smaller than half a cell still get one cell.
///
/// # Errors
///
/// Returns an error if the viewport or pitch is not positive.
pub fn viewport_cells(width: i64, height: i64, pitch: u32) -> Result<(usize, usize)> {
    if width <= 0 || height <= 0 || pitch == 0 {
        return Err(TilepaintError::InvalidDimensions { width, height });
    }

    let cells = |size: i64| ((size as f64 / f64::from(pitch)).round() as usize).max(1);
    Ok((cells(width), cells(height)))
}

/// Grid cell under a pointer position in viewport pixels
///
/// The result may lie outside the interior; [`Grid::place`] and
/// [`Grid::erase`] clamp it. Non-finite and huge positions saturate, and
/// `NaN` maps to the first column or row.
pub fn cell_at_pixel(px: f64, py: f64, pitch: u32) -> (i64, i64) {
    let pitch = f64::from(pitch);
    let cell = |p: f64| ((p / pitch).floor() as i64).saturating_add(1);
    (cell(px), cell(py))
}

/// Top-left pixel of a cell's rectangle in viewport space
pub const fn cell_origin(x: usize, y: usize, pitch: u32) -> (f32, f32) {
    (
        (pitch as usize * (x - 1)) as f32,
        (pitch as usize * (y - 1)) as f32,
    )
}
