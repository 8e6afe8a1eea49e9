//! Variant catalog and its concurrent loader
//!
//! Every glyph owns 16 shape variants fetched by the `{glyph}_{index:02}`
//! naming convention. All fetches are issued at once and complete
//! independently; collecting them is the single barrier after which the
//! catalog either exists in full or not at all.

use bitvec::prelude::*;
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::assets::shape::{ShapeStructure, VectorShape};
use crate::canvas::autotile::VariantIndex;
use crate::canvas::glyph::{GlyphId, GlyphSet};
use crate::io::configuration::ASSET_EXTENSION;
use crate::io::error::{Result, TilepaintError, WithContext};

/// Asset name of one glyph variant, e.g. `E_05`
pub fn asset_name(glyph: GlyphId, variant: VariantIndex) -> String {
    format!("{glyph}_{variant}")
}

/// Provider of raw asset documents by name
pub trait AssetSource: Sync {
    /// Fetch the document text of one asset
    ///
    /// # Errors
    ///
    /// Returns an error if the asset is missing or unreadable.
    fn fetch(&self, name: &str) -> Result<String>;
}

/// Reads `{root}/{name}.svg` from the filesystem
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    /// Create a source rooted at an asset directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory the assets are read from
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetSource for DirectorySource {
    fn fetch(&self, name: &str) -> Result<String> {
        let path = self.root.join(format!("{name}.{ASSET_EXTENSION}"));
        std::fs::read_to_string(&path).map_err(|e| TilepaintError::AssetLoad {
            name: name.to_string(),
            reason: format!("{}: {e}", path.display()),
        })
    }
}

/// Serves asset documents from memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: HashMap<String, String>,
}

impl MemorySource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the document of one asset
    pub fn insert(&mut self, name: impl Into<String>, document: impl Into<String>) {
        self.documents.insert(name.into(), document.into());
    }

    /// Register a document for every variant of every glyph in a set
    pub fn fill_with<F>(&mut self, glyphs: &GlyphSet, mut document: F)
    where
        F: FnMut(GlyphId, VariantIndex) -> String,
    {
        for glyph in glyphs.iter() {
            for variant in VariantIndex::all() {
                self.insert(asset_name(glyph, variant), document(glyph, variant));
            }
        }
    }

    /// Drop one asset, e.g. to simulate a failed fetch
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.documents.remove(name)
    }
}

impl AssetSource for MemorySource {
    fn fetch(&self, name: &str) -> Result<String> {
        self.documents
            .get(name)
            .cloned()
            .ok_or_else(|| TilepaintError::AssetLoad {
                name: name.to_string(),
                reason: "not present in source".to_string(),
            })
    }
}

/// Progress of a catalog load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// Fetches still outstanding
    Loading {
        /// Assets completed so far, successful or not
        loaded: usize,
        /// Assets requested
        total: usize,
    },
    /// Every asset loaded; the catalog is usable
    Ready,
    /// At least one asset failed; painting stays unavailable
    Failed {
        /// Names of the failed assets
        failures: Vec<String>,
    },
}

/// Receives load progress; shared across loader threads
pub trait LoadObserver: Sync {
    /// Called whenever the load state changes
    fn update(&self, state: &LoadState);
}

/// Observer that ignores all progress
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentLoad;

impl LoadObserver for SilentLoad {
    fn update(&self, _state: &LoadState) {}
}

/// Read-only table of vector shapes for every glyph and variant
#[derive(Debug, Clone)]
pub struct VariantCatalog {
    glyphs: GlyphSet,
    shapes: HashMap<GlyphId, Vec<VectorShape>>,
}

impl VariantCatalog {
    /// Load every variant of every glyph from a source
    ///
    /// Fetches run concurrently; the observer sees a `Loading` update as each
    /// completes and one final `Ready` or `Failed` update.
    ///
    /// # Errors
    ///
    /// Returns `CatalogIncomplete` if any asset fails to fetch, normalize, or
    /// parse as a render tree.
    pub fn load(
        source: &dyn AssetSource,
        glyphs: &GlyphSet,
        observer: &dyn LoadObserver,
    ) -> Result<Self> {
        let requests: Vec<(GlyphId, VariantIndex)> = glyphs
            .iter()
            .flat_map(|glyph| VariantIndex::all().map(move |variant| (glyph, variant)))
            .collect();
        let total = requests.len();
        let completed = AtomicUsize::new(0);

        observer.update(&LoadState::Loading { loaded: 0, total });
        tracing::info!(total, "loading variant catalog");

        let results: Vec<(String, Result<VectorShape>)> = requests
            .par_iter()
            .map(|&(glyph, variant)| {
                let name = asset_name(glyph, variant);
                let shape = source
                    .fetch(&name)
                    .and_then(|document| VectorShape::parse(&document))
                    .and_then(|shape| shape.verify().map(|()| shape))
                    .with_asset(&name);

                let loaded = completed.fetch_add(1, Ordering::Relaxed) + 1;
                observer.update(&LoadState::Loading { loaded, total });
                (name, shape)
            })
            .collect();

        let mut present = bitvec![0; total];
        let mut failures = Vec::new();
        let mut shapes: HashMap<GlyphId, Vec<VectorShape>> = HashMap::new();

        for (slot, ((glyph, _), (name, shape))) in requests.iter().zip(results).enumerate() {
            match shape {
                Ok(shape) => {
                    present.set(slot, true);
                    shapes.entry(*glyph).or_default().push(shape);
                }
                Err(error) => {
                    tracing::error!(%error, "asset failed to load");
                    failures.push(name);
                }
            }
        }

        if !present.all() {
            observer.update(&LoadState::Failed {
                failures: failures.clone(),
            });
            return Err(TilepaintError::CatalogIncomplete {
                loaded: present.count_ones(),
                total,
                failures,
            });
        }

        let catalog = Self {
            glyphs: glyphs.clone(),
            shapes,
        };
        tracing::info!(
            glyphs = glyphs.len(),
            ungrouped = catalog.count_structure(ShapeStructure::Ungrouped),
            "variant catalog ready"
        );
        observer.update(&LoadState::Ready);
        Ok(catalog)
    }

    /// Geometry of one glyph variant
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the glyph is not in the catalog.
    pub fn geometry(&self, glyph: GlyphId, variant: VariantIndex) -> Result<&VectorShape> {
        self.shapes
            .get(&glyph)
            .and_then(|variants| variants.get(variant.as_usize()))
            .ok_or(TilepaintError::NotFound {
                glyph: glyph.key(),
                variant: variant.value(),
            })
    }

    /// Glyphs the catalog was loaded for
    pub const fn glyphs(&self) -> &GlyphSet {
        &self.glyphs
    }

    /// Number of stored shapes
    pub fn len(&self) -> usize {
        self.shapes.values().map(Vec::len).sum()
    }

    /// True only for a catalog loaded with no glyphs, which cannot happen
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of shapes whose asset used the given layout
    pub fn count_structure(&self, structure: ShapeStructure) -> usize {
        self.shapes
            .values()
            .flatten()
            .filter(|shape| shape.structure() == structure)
            .count()
    }
}
