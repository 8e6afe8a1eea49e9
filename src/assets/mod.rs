//! Asset loading and shape normalization
//!
//! This module contains everything between raw asset documents and
//! recolourable geometry:
//! - Grouped/ungrouped shape normalization and fill substitution
//! - Render-tree validation of every loaded variant
//! - The concurrently loaded variant catalog

/// Variant catalog and its concurrent loader
pub mod catalog;
/// Recolourable vector shapes
pub mod shape;

pub use catalog::{AssetSource, DirectorySource, LoadState, MemorySource, VariantCatalog};
pub use shape::{ShapeStructure, VectorShape, ViewBox};
