//! ntm CLI binary.
//!
//! This is the entry point for the `ntm` command-line tool. It parses
//! arguments with `clap`, loads the project configuration, initializes
//! logging via `tracing`, and dispatches to the appropriate command handler.

mod cli;
mod commands;

use miette::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = cli::parse();
    let project = commands::Project::load(args.cwd.as_deref(), args.verbose)?;
    init_tracing(args.verbose, project.debug());
    commands::dispatch(args.command, &project)
}

/// `RUST_LOG` wins. Otherwise `--verbose` shows everything at debug level,
/// and `debug = true` in ntm.toml shows ntm's own messages.
fn init_tracing(verbose: bool, debug: bool) {
    let default_filter = match (verbose, debug) {
        (true, _) => "debug",
        (false, true) => "warn,ntm=debug",
        (false, false) => "warn",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}
