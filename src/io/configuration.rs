//! Canvas constants and runtime configuration defaults

use crate::canvas::color::Rgb;

/// Side length of one grid cell in pixels
pub const CELL_PITCH: u32 = 50;

/// Number of shape variants per glyph (one per 4-bit neighbour pattern)
pub const VARIANT_COUNT: usize = 16;

/// Glyph keys of the default module catalog
pub const DEFAULT_GLYPHS: &str = "123456789EQTWYU";

/// Largest grid allocation, border included, in cells
pub const MAX_GRID_CELLS: usize = 1 << 24;

/// Side length of the coordinate space every asset is authored in
pub const ASSET_VIEWBOX_SIZE: f32 = 100.0;

/// File extension of asset documents
pub const ASSET_EXTENSION: &str = "svg";

// Viewport used when no size is given on the command line
/// Default viewport width in pixels
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 1280;
/// Default viewport height in pixels
pub const DEFAULT_VIEWPORT_HEIGHT: u32 = 720;

/// Fixed seed for reproducible random-glyph placement
pub const DEFAULT_SEED: u64 = 42;

// Palette shortcuts
/// Default paint colour
pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);
/// Teal paint colour
pub const TEAL: Rgb = Rgb::new(0x84, 0xDA, 0xDE);
/// Pink paint colour
pub const PINK: Rgb = Rgb::new(0xFF, 0x00, 0x6E);

/// Background of live view and exports
pub const BACKGROUND: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);

// Export grid overlay
/// Stroke colour of exported grid lines
pub const EXPORT_GRID_COLOR: &str = "#cccccc";
/// Stroke width of exported grid lines
pub const EXPORT_GRID_WIDTH: f32 = 0.5;

// Live view grid overlay
/// Stroke colour of live grid cells
pub const LIVE_GRID_COLOR: Rgb = Rgb::new(0x00, 0x00, 0x00);
/// Stroke width of live grid cells
pub const LIVE_GRID_WIDTH: f32 = 0.15;

/// `chrono` format of export file stems (sortable `yyMMdd_HHmmss`)
pub const EXPORT_TIMESTAMP_FORMAT: &str = "%y%m%d_%H%M%S";

/// Width of the asset loading progress bar in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

/// Runtime configuration assembled from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanvasConfig {
    /// Cell pitch in pixels
    pub pitch: u32,
    /// Viewport width in pixels
    pub viewport_width: u32,
    /// Viewport height in pixels
    pub viewport_height: u32,
    /// Glyph keys, in selection order
    pub glyphs: String,
    /// Seed for random-glyph placement
    pub seed: u64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            pitch: CELL_PITCH,
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            glyphs: DEFAULT_GLYPHS.to_string(),
            seed: DEFAULT_SEED,
        }
    }
}
