/// Append-only cache of recoloured variant renderings
pub mod cache;
/// Per-pass composition of occupied cells onto a drawing backend
pub mod compositor;
/// Raster drawing backend built on resvg
pub mod raster;

pub use cache::{CacheKey, RenderCache, RenderedVariant};
pub use compositor::{ComposeOptions, ComposeStats, Compositor, DrawTarget};
pub use raster::RasterSurface;
