//! Error types and context management for canvas operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all canvas operations
#[derive(Debug)]
pub enum TilepaintError {
    /// A single asset could not be fetched from its source
    AssetLoad {
        /// Asset name (`{glyph}_{index:02}`)
        name: String,
        /// Description of the fetch failure
        reason: String,
    },

    /// Catalog load finished with at least one failed asset
    ///
    /// The catalog is never handed out in this state, so painting stays
    /// unavailable.
    CatalogIncomplete {
        /// Number of assets that loaded successfully
        loaded: usize,
        /// Number of assets requested
        total: usize,
        /// Names of the assets that failed
        failures: Vec<String>,
    },

    /// No geometry registered for a glyph/variant pair
    NotFound {
        /// Requested glyph
        glyph: char,
        /// Requested variant index
        variant: u8,
    },

    /// Asset markup could not be normalized or rendered
    MalformedAsset {
        /// Asset name, empty until context is attached
        name: String,
        /// Description of what's wrong with the markup
        reason: String,
    },

    /// Grid or viewport dimensions are zero or negative
    InvalidDimensions {
        /// Requested width
        width: i64,
        /// Requested height
        height: i64,
    },

    /// Coordinate lies on the sentinel border or outside the grid
    OutOfInterior {
        /// Column index
        x: usize,
        /// Row index
        y: usize,
        /// Full grid dimensions including the border (cols, rows)
        dimensions: (usize, usize),
    },

    /// Glyph id is not part of the configured glyph set
    UnknownGlyph {
        /// The rejected glyph id
        glyph: char,
    },

    /// Variant number outside the 16-entry variant table
    InvalidVariant {
        /// The rejected value
        value: u8,
    },

    /// Colour string could not be parsed
    InvalidColor {
        /// The rejected input
        value: String,
    },

    /// Command script line could not be parsed
    Script {
        /// One-based line number, zero when parsed outside a script
        line: usize,
        /// Description of the parse failure
        reason: String,
    },

    /// Failed to encode or save a raster image
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Rasterization backend failure
    Render {
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for TilepaintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AssetLoad { name, reason } => {
                write!(f, "Failed to load asset '{name}': {reason}")
            }
            Self::CatalogIncomplete {
                loaded,
                total,
                failures,
            } => {
                write!(
                    f,
                    "Catalog incomplete: {loaded}/{total} assets loaded, failed: {}",
                    failures.join(", ")
                )
            }
            Self::NotFound { glyph, variant } => {
                write!(f, "No geometry for glyph '{glyph}' variant {variant:02}")
            }
            Self::MalformedAsset { name, reason } => {
                if name.is_empty() {
                    write!(f, "Malformed asset: {reason}")
                } else {
                    write!(f, "Malformed asset '{name}': {reason}")
                }
            }
            Self::InvalidDimensions { width, height } => {
                write!(f, "Invalid dimensions {width}x{height}: both must be positive")
            }
            Self::OutOfInterior { x, y, dimensions } => {
                write!(
                    f,
                    "Cell ({x}, {y}) is outside the interior of a {}x{} grid",
                    dimensions.0, dimensions.1
                )
            }
            Self::UnknownGlyph { glyph } => {
                write!(f, "Glyph '{glyph}' is not in the configured glyph set")
            }
            Self::InvalidVariant { value } => {
                write!(f, "Variant index {value} is outside 0..16")
            }
            Self::InvalidColor { value } => {
                write!(f, "Invalid colour '{value}'")
            }
            Self::Script { line, reason } => {
                write!(f, "Script error on line {line}: {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Render { reason } => {
                write!(f, "Render error: {reason}")
            }
        }
    }
}

impl std::error::Error for TilepaintError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for canvas results
pub type Result<T> = std::result::Result<T, TilepaintError>;

/// Enriches error messages with the asset or script line being processed
pub trait WithContext<T> {
    /// Attach the asset name to asset errors that were raised without one
    ///
    /// # Errors
    ///
    /// Propagates the original error with the asset name applied
    fn with_asset(self, name: &str) -> Result<T>;

    /// Attach the script line number to script errors
    ///
    /// # Errors
    ///
    /// Propagates the original error with the line number applied
    fn with_line(self, line: usize) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<TilepaintError>,
{
    fn with_asset(self, asset: &str) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            // Only asset-level errors carry a name slot
            if let TilepaintError::MalformedAsset { name, .. }
            | TilepaintError::AssetLoad { name, .. } = &mut error
                && name.is_empty()
            {
                *name = asset.to_string();
            }
            error
        })
    }

    fn with_line(self, number: usize) -> Result<T> {
        self.map_err(|e| match e.into() {
            TilepaintError::Script { reason, .. } => TilepaintError::Script {
                line: number,
                reason,
            },
            // Argument errors raised while parsing a line read better as script errors
            error @ (TilepaintError::UnknownGlyph { .. }
            | TilepaintError::InvalidColor { .. }
            | TilepaintError::InvalidVariant { .. }) => {
                TilepaintError::Script {
                    line: number,
                    reason: error.to_string(),
                }
            }
            error => error,
        })
    }
}

impl From<image::ImageError> for TilepaintError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageExport {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for TilepaintError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create a malformed asset error without a name
pub fn malformed(reason: &impl ToString) -> TilepaintError {
    TilepaintError::MalformedAsset {
        name: String::new(),
        reason: reason.to_string(),
    }
}

/// Create a script error without a line number
pub fn script_error(reason: &impl ToString) -> TilepaintError {
    TilepaintError::Script {
        line: 0,
        reason: reason.to_string(),
    }
}
