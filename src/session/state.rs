//! Owned editing state and command application

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::assets::catalog::VariantCatalog;
use crate::canvas::color::Rgb;
use crate::canvas::glyph::GlyphId;
use crate::canvas::grid::{Grid, cell_at_pixel};
use crate::io::configuration::{BACKGROUND, BLACK, CanvasConfig};
use crate::io::error::{Result, TilepaintError};
use crate::io::export::SvgExporter;
use crate::render::cache::RenderCache;
use crate::render::compositor::{ComposeOptions, ComposeStats, Compositor, DrawTarget};
use crate::render::raster::RasterSurface;
use crate::session::command::Command;

/// Result of applying one command
#[derive(Debug)]
pub enum Outcome {
    /// A grid cell was painted or emptied
    Cell {
        /// Column the command landed on after clamping
        x: usize,
        /// Row the command landed on after clamping
        y: usize,
    },
    /// State changed without producing an artifact
    Updated,
    /// Rendered export document, `None` when nothing is painted
    Exported(Option<String>),
    /// Rasterized live view
    Snapshot(RasterSurface, ComposeStats),
}

/// A painting session over a loaded catalog
///
/// Everything the editor mutates lives here: the grid, the render cache,
/// the active glyph and colour, and the mode switches.
#[derive(Debug)]
pub struct Session {
    catalog: VariantCatalog,
    grid: Grid,
    cache: RenderCache,
    compositor: Compositor,
    exporter: SvgExporter,
    pitch: u32,
    viewport: (u32, u32),
    active_glyph: GlyphId,
    active_color: Rgb,
    random_mode: bool,
    grid_lines: bool,
    debug: bool,
    rng: StdRng,
}

impl Session {
    /// Start a session sized to the configured viewport
    ///
    /// # Errors
    ///
    /// Returns an error if the pitch is zero or the viewport has no area.
    pub fn new(catalog: VariantCatalog, config: &CanvasConfig) -> Result<Self> {
        if config.pitch == 0 {
            return Err(TilepaintError::InvalidDimensions {
                width: i64::from(config.pitch),
                height: i64::from(config.pitch),
            });
        }

        let grid = Grid::for_viewport(
            i64::from(config.viewport_width),
            i64::from(config.viewport_height),
            config.pitch,
        )?;
        let active_glyph = catalog.glyphs().first();
        let (cols, rows) = grid.interior_size();
        tracing::info!(cols, rows, pitch = config.pitch, "session started");

        Ok(Self {
            catalog,
            grid,
            cache: RenderCache::new(),
            compositor: Compositor::new(config.pitch),
            exporter: SvgExporter::new(config.pitch),
            pitch: config.pitch,
            viewport: (config.viewport_width, config.viewport_height),
            active_glyph,
            active_color: BLACK,
            random_mode: false,
            grid_lines: true,
            debug: false,
            rng: StdRng::seed_from_u64(config.seed),
        })
    }

    /// Apply one command
    ///
    /// # Errors
    ///
    /// Returns an error for a degenerate resize, a glyph outside the
    /// catalog, or an export or snapshot that cannot be rendered. The
    /// session is unchanged when an error is returned.
    pub fn apply(&mut self, command: Command) -> Result<Outcome> {
        match command {
            Command::Place { x, y } => Ok(self.place(x, y)),
            Command::Erase { x, y } => {
                let (x, y) = self.grid.erase(x, y);
                Ok(Outcome::Cell { x, y })
            }
            Command::Paint { px, py } => {
                let (x, y) = cell_at_pixel(px, py, self.pitch);
                Ok(self.place(x, y))
            }
            Command::Rub { px, py } => {
                let (x, y) = cell_at_pixel(px, py, self.pitch);
                let (x, y) = self.grid.erase(x, y);
                Ok(Outcome::Cell { x, y })
            }
            Command::Clear => {
                self.grid.clear();
                Ok(Outcome::Updated)
            }
            Command::Resize { width, height } => {
                self.resize(width, height)?;
                Ok(Outcome::Updated)
            }
            Command::SelectGlyph(glyph) => {
                if !self.catalog.glyphs().contains(glyph) {
                    return Err(TilepaintError::UnknownGlyph { glyph: glyph.key() });
                }
                self.active_glyph = glyph;
                Ok(Outcome::Updated)
            }
            Command::SelectColor(color) => {
                self.active_color = color;
                Ok(Outcome::Updated)
            }
            Command::SetRandom(on) => {
                self.random_mode = on;
                Ok(Outcome::Updated)
            }
            Command::SetGrid(on) => {
                self.grid_lines = on;
                Ok(Outcome::Updated)
            }
            Command::SetDebug(on) => {
                self.debug = on;
                Ok(Outcome::Updated)
            }
            Command::Export => Ok(Outcome::Exported(self.export_document()?)),
            Command::Snapshot => {
                let (surface, stats) = self.snapshot()?;
                Ok(Outcome::Snapshot(surface, stats))
            }
        }
    }

    fn place(&mut self, x: i64, y: i64) -> Outcome {
        let glyph = if self.random_mode {
            self.catalog.glyphs().choose(&mut self.rng)
        } else {
            self.active_glyph
        };
        let (x, y) = self.grid.place(x, y, glyph, self.active_color);
        Outcome::Cell { x, y }
    }

    fn resize(&mut self, width: i64, height: i64) -> Result<()> {
        let (Ok(new_width), Ok(new_height)) = (u32::try_from(width), u32::try_from(height)) else {
            return Err(TilepaintError::InvalidDimensions { width, height });
        };
        self.grid.resize_viewport(width, height, self.pitch)?;
        self.viewport = (new_width, new_height);
        Ok(())
    }

    /// Render the painted region as an SVG document
    ///
    /// # Errors
    ///
    /// Returns an error if a painted cell has no geometry in the catalog.
    pub fn export_document(&self) -> Result<Option<String>> {
        self.exporter.render(&self.grid, &self.catalog, self.grid_lines)
    }

    /// Run one composition pass onto any drawing backend
    pub fn compose(&mut self, target: &mut dyn DrawTarget) -> ComposeStats {
        let options = ComposeOptions {
            grid_lines: self.grid_lines,
            debug: self.debug,
        };
        self.compositor
            .compose(&self.grid, &self.catalog, &mut self.cache, target, options)
    }

    /// Compose the live view onto a fresh viewport-sized raster
    ///
    /// # Errors
    ///
    /// Returns an error if the raster surface cannot be allocated.
    pub fn snapshot(&mut self) -> Result<(RasterSurface, ComposeStats)> {
        let (width, height) = self.viewport;
        let mut surface = RasterSurface::new(width, height, BACKGROUND)?;
        let stats = self.compose(&mut surface);
        tracing::debug!(drawn = stats.drawn, skipped = stats.skipped, "snapshot composed");
        Ok((surface, stats))
    }

    /// The grid being painted
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The loaded variant catalog
    pub const fn catalog(&self) -> &VariantCatalog {
        &self.catalog
    }

    /// The render cache shared by every composition pass
    pub const fn cache(&self) -> &RenderCache {
        &self.cache
    }

    /// Current viewport size in pixels
    pub const fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Glyph placed when random mode is off
    pub const fn active_glyph(&self) -> GlyphId {
        self.active_glyph
    }

    /// Colour applied to newly placed cells
    pub const fn active_color(&self) -> Rgb {
        self.active_color
    }

    /// Whether placement picks a random glyph
    pub const fn random_mode(&self) -> bool {
        self.random_mode
    }

    /// Whether the grid overlay is drawn
    pub const fn grid_lines(&self) -> bool {
        self.grid_lines
    }

    /// Whether debug labels are drawn
    pub const fn debug(&self) -> bool {
        self.debug
    }
}
