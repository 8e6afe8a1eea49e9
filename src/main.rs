//! CLI entry point for the autotiling canvas

use clap::Parser;
use tilepaint::io::cli::{Cli, ScriptRunner};
use tilepaint::io::logging;

fn main() -> tilepaint::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.quiet);
    let runner = ScriptRunner::new(cli);
    let summary = runner.run()?;
    tracing::info!(
        commands = summary.commands,
        exports = summary.exports.len(),
        snapshots = summary.snapshots.len(),
        "script finished"
    );
    Ok(())
}
