//! Command-line interface for running painting scripts against an asset directory

use crate::assets::catalog::{DirectorySource, VariantCatalog};
use crate::canvas::glyph::GlyphSet;
use crate::io::configuration::{
    CELL_PITCH, CanvasConfig, DEFAULT_GLYPHS, DEFAULT_SEED, DEFAULT_VIEWPORT_HEIGHT,
    DEFAULT_VIEWPORT_WIDTH,
};
use crate::io::error::{Result, TilepaintError, WithContext};
use crate::io::export::{timestamp_stem, write_png, write_raster, write_svg};
use crate::io::progress::LoadProgress;
use crate::session::command::{Command, parse_script};
use crate::session::state::{Outcome, Session};
use chrono::Local;
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug, Clone)]
#[command(name = "tilepaint")]
#[command(
    author,
    version,
    about = "Paint autotiled module glyphs from a command script"
)]
/// Command-line arguments for the painting tool
pub struct Cli {
    /// Script of painting commands, one per line
    #[arg(value_name = "SCRIPT")]
    pub script: PathBuf,

    /// Directory holding `{glyph}_{variant}.svg` assets
    #[arg(short, long, default_value = "assets")]
    pub assets: PathBuf,

    /// Directory receiving exports and snapshots
    #[arg(short, long, default_value = "exports")]
    pub out: PathBuf,

    /// Viewport width in pixels
    #[arg(short = 'W', long, default_value_t = DEFAULT_VIEWPORT_WIDTH)]
    pub width: u32,

    /// Viewport height in pixels
    #[arg(short = 'H', long, default_value_t = DEFAULT_VIEWPORT_HEIGHT)]
    pub height: u32,

    /// Cell pitch in pixels
    #[arg(short, long, default_value_t = CELL_PITCH)]
    pub pitch: u32,

    /// Glyph keys to load, in selection order
    #[arg(short, long, default_value = DEFAULT_GLYPHS)]
    pub glyphs: String,

    /// Random seed for random-glyph placement
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Also rasterize every export to PNG
    #[arg(long)]
    pub png: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Canvas configuration described by the arguments
    pub fn config(&self) -> CanvasConfig {
        CanvasConfig {
            pitch: self.pitch,
            viewport_width: self.width,
            viewport_height: self.height,
            glyphs: self.glyphs.clone(),
            seed: self.seed,
        }
    }
}

/// Files written and commands applied by one script run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of commands applied
    pub commands: usize,
    /// Exported SVG and PNG files, in write order
    pub exports: Vec<PathBuf>,
    /// Live-view snapshot files, in write order
    pub snapshots: Vec<PathBuf>,
}

/// Loads the catalog and plays a script against a fresh session
pub struct ScriptRunner {
    cli: Cli,
}

impl ScriptRunner {
    /// Create a runner for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Read the script, load the catalog, and apply every command
    ///
    /// The script is parsed before any asset is fetched so syntax errors
    /// surface without waiting on the load.
    ///
    /// # Errors
    ///
    /// Returns an error if the script cannot be read or parsed, the catalog
    /// fails to load, or a command fails.
    pub fn run(&self) -> Result<RunSummary> {
        let script =
            std::fs::read_to_string(&self.cli.script).map_err(|e| TilepaintError::FileSystem {
                path: self.cli.script.clone(),
                operation: "read script",
                source: e,
            })?;
        let commands = parse_script(&script)?;

        let config = self.cli.config();
        let glyphs = GlyphSet::parse(&config.glyphs)?;
        let source = DirectorySource::new(&self.cli.assets);
        let progress = if self.cli.should_show_progress() {
            LoadProgress::new()
        } else {
            LoadProgress::hidden()
        };

        let start_time = Instant::now();
        let catalog = VariantCatalog::load(&source, &glyphs, &progress)?;
        tracing::info!(
            variants = catalog.len(),
            elapsed_ms = start_time.elapsed().as_millis(),
            "catalog ready"
        );

        let mut session = Session::new(catalog, &config)?;
        self.execute(&mut session, &commands)
    }

    /// Apply parsed commands to a session and write its artifacts
    ///
    /// Exports of an empty grid are skipped without writing a file.
    ///
    /// # Errors
    ///
    /// Returns the first command failure, tagged with its script line, or a
    /// failure to write an artifact.
    pub fn execute(
        &self,
        session: &mut Session,
        commands: &[(usize, Command)],
    ) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        for &(line, command) in commands {
            let outcome = session.apply(command).with_line(line)?;
            summary.commands += 1;

            match outcome {
                Outcome::Exported(Some(document)) => {
                    let stem = timestamp_stem(&Local::now());
                    summary
                        .exports
                        .push(write_svg(&self.cli.out, &stem, &document)?);
                    if self.cli.png {
                        summary
                            .exports
                            .push(write_png(&self.cli.out, &stem, &document)?);
                    }
                }
                Outcome::Exported(None) => {
                    tracing::info!(line, "nothing painted, export skipped");
                }
                Outcome::Snapshot(surface, stats) => {
                    let stem = format!("{}_live", timestamp_stem(&Local::now()));
                    summary
                        .snapshots
                        .push(write_raster(&self.cli.out, &stem, &surface)?);
                    if stats.skipped > 0 {
                        tracing::warn!(line, skipped = stats.skipped, "snapshot skipped cells");
                    }
                }
                Outcome::Cell { .. } | Outcome::Updated => {}
            }
        }

        Ok(summary)
    }
}
