//! Autotiling canvas for module glyphs
//!
//! Glyphs are painted onto a bordered cell grid. Each occupied cell is drawn
//! with one of sixteen variants of its glyph, chosen from which of its four
//! orthogonal neighbours are occupied, so runs of cells join into continuous
//! strokes. Variants are recoloured on demand, cached, composed onto a
//! drawing backend, and exported as cropped SVG or PNG documents.

#![forbid(unsafe_code)]

/// Asset loading, shape normalization and the variant catalog
pub mod assets;
/// Glyphs, colours, the cell grid and the autotile rule
pub mod canvas;
/// Input/output operations, configuration and error handling
pub mod io;
/// Render cache, compositor and raster backend
pub mod render;
/// Owned editing state driven by script commands
pub mod session;

pub use io::error::{Result, TilepaintError};
