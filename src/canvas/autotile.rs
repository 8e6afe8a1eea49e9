//! Neighbourhood-driven variant selection
//!
//! A painted cell's shape variant depends only on which of its four direct
//! neighbours are occupied. The pattern is read in fixed north, west, south,
//! east order as a 4-bit binary number with north as the most significant
//! bit, so a cell with neighbours only to the north and south always renders
//! variant `0b1010 = 10`. Glyph identity and colour of the neighbours never
//! influence the result.

use std::fmt;

use crate::canvas::grid::Grid;
use crate::io::configuration::VARIANT_COUNT;
use crate::io::error::{Result, TilepaintError};

/// Occupancy of the four direct neighbours of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
// One flag per compass direction is the natural shape of this data
#[allow(clippy::struct_excessive_bools)]
pub struct NeighborPattern {
    /// Cell above is occupied
    pub north: bool,
    /// Cell to the left is occupied
    pub west: bool,
    /// Cell below is occupied
    pub south: bool,
    /// Cell to the right is occupied
    pub east: bool,
}

impl NeighborPattern {
    /// Pattern bits with north as bit 3 down to east as bit 0
    pub const fn bits(self) -> u8 {
        ((self.north as u8) << 3)
            | ((self.west as u8) << 2)
            | ((self.south as u8) << 1)
            | (self.east as u8)
    }
}

impl fmt::Display for NeighborPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04b}", self.bits())
    }
}

/// Index of one of the 16 shape variants of a glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariantIndex(u8);

impl VariantIndex {
    /// Variant of a cell with no occupied neighbours
    pub const ISOLATED: Self = Self(0);
    /// Variant of a cell surrounded on all four sides
    pub const SURROUNDED: Self = Self(15);

    /// Validate a raw variant number
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not below the variant count.
    pub fn new(value: u8) -> Result<Self> {
        if usize::from(value) < VARIANT_COUNT {
            Ok(Self(value))
        } else {
            Err(TilepaintError::InvalidVariant { value })
        }
    }

    /// Every variant in ascending order
    pub fn all() -> impl Iterator<Item = Self> {
        (0..VARIANT_COUNT as u8).map(Self)
    }

    /// Raw variant number
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Position within a glyph's variant table
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl From<NeighborPattern> for VariantIndex {
    fn from(pattern: NeighborPattern) -> Self {
        Self(pattern.bits())
    }
}

impl fmt::Display for VariantIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// Variant index of an interior cell from its neighbourhood occupancy
///
/// # Errors
///
/// Returns an error if the coordinate lies on the sentinel border.
pub fn resolve(grid: &Grid, x: usize, y: usize) -> Result<VariantIndex> {
    grid.neighbor_occupancy(x, y).map(VariantIndex::from)
}

/// Variant index together with the raw pattern, for debug overlays
///
/// # Errors
///
/// Returns an error if the coordinate lies on the sentinel border.
pub fn resolve_with_pattern(
    grid: &Grid,
    x: usize,
    y: usize,
) -> Result<(VariantIndex, NeighborPattern)> {
    let pattern = grid.neighbor_occupancy(x, y)?;
    Ok((VariantIndex::from(pattern), pattern))
}
