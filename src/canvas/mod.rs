//! Canvas state: glyphs, colours, the cell grid and the autotile rule
//!
//! This module contains the painting model:
//! - Glyph identifiers and the configured glyph set
//! - Normalized paint colours
//! - The bordered cell grid
//! - Neighbourhood-to-variant resolution

/// Neighbourhood-driven variant selection
pub mod autotile;
/// Normalized RGB paint colours
pub mod color;
/// Glyph identifiers and the configured glyph set
pub mod glyph;
/// Bordered cell grid store
pub mod grid;

pub use autotile::{NeighborPattern, VariantIndex, resolve};
pub use color::Rgb;
pub use glyph::{GlyphId, GlyphSet};
pub use grid::{Cell, Grid};
