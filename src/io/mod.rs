/// Command-line runner for painting scripts
pub mod cli;
/// Constants and runtime configuration
pub mod configuration;
/// Error type and context helpers
pub mod error;
/// SVG and PNG export of the painted region
pub mod export;
/// Tracing subscriber setup
pub mod logging;
/// Asset load progress display
pub mod progress;
