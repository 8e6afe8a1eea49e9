use resvg::usvg;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::assets::catalog::{VariantCatalog, asset_name};
use crate::assets::shape::render_tree;
use crate::canvas::autotile::VariantIndex;
use crate::canvas::color::Rgb;
use crate::canvas::glyph::GlyphId;
use crate::io::error::{Result, WithContext};

/// Key for caching recoloured variant renderings
///
/// Colours are stored as normalized [`Rgb`] values, so differently written
/// equal colours share one entry.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct CacheKey {
    /// Glyph of the rendering
    pub glyph: GlyphId,
    /// Variant of the rendering
    pub variant: VariantIndex,
    /// Fill colour of the rendering
    pub color: Rgb,
}

/// A recoloured variant ready for any drawing backend
///
/// Holds both the standalone SVG text and its parsed render tree.
pub struct RenderedVariant {
    key: CacheKey,
    document: String,
    tree: usvg::Tree,
}

impl RenderedVariant {
    /// Recolour a catalog shape and parse the result
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the catalog lacks the variant, or
    /// `MalformedAsset` if the recoloured document does not parse.
    pub fn render(catalog: &VariantCatalog, key: CacheKey) -> Result<Self> {
        let shape = catalog.geometry(key.glyph, key.variant)?;
        let document = shape.standalone_document(key.color);
        let tree = render_tree(&document).with_asset(&asset_name(key.glyph, key.variant))?;

        Ok(Self {
            key,
            document,
            tree,
        })
    }

    /// Identity of this rendering
    pub const fn key(&self) -> CacheKey {
        self.key
    }

    /// Standalone recoloured SVG document
    pub fn document(&self) -> &str {
        &self.document
    }

    /// Parsed render tree
    pub const fn tree(&self) -> &usvg::Tree {
        &self.tree
    }
}

impl fmt::Debug for RenderedVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderedVariant")
            .field("key", &self.key)
            .field("document_len", &self.document.len())
            .finish_non_exhaustive()
    }
}

/// Append-only memo of recoloured variant renderings
///
/// Entries are created on first use and never invalidated; a new colour adds
/// a new entry instead of touching existing ones.
#[derive(Debug, Default)]
pub struct RenderCache {
    /// Key to rendering mapping
    entries: HashMap<CacheKey, Rc<RenderedVariant>>,

    /// Cache performance statistics
    pub stats: CacheStats,
}

/// Performance metrics for cache effectiveness
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: usize,
    /// Number of cache misses
    pub misses: usize,
    /// Number of misses whose rendering failed
    pub failures: usize,
}

impl RenderCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieve a cached rendering or render and store a new one
    ///
    /// Repeated calls with the same key return the same handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the variant is missing from the catalog or its
    /// recoloured markup cannot be parsed; nothing is cached in that case.
    pub fn get_image(
        &mut self,
        catalog: &VariantCatalog,
        glyph: GlyphId,
        variant: VariantIndex,
        color: Rgb,
    ) -> Result<Rc<RenderedVariant>> {
        let key = CacheKey {
            glyph,
            variant,
            color,
        };

        if let Some(existing) = self.entries.get(&key) {
            self.stats.hits += 1;
            return Ok(Rc::clone(existing));
        }

        self.stats.misses += 1;
        let rendered = RenderedVariant::render(catalog, key).inspect_err(|_| {
            self.stats.failures += 1;
        })?;

        let handle = Rc::new(rendered);
        self.entries.insert(key, Rc::clone(&handle));
        Ok(handle)
    }

    /// Number of cached renderings
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether nothing has been rendered yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
