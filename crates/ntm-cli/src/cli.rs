//! CLI argument definitions for ntm.
//!
//! Uses `clap` derive macros to define the command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "ntm",
    version,
    about = "Inspect which packages get transpiled by the bundler",
    long_about = "ntm resolves the packages listed in ntm.toml (or on the command line) to \
                  their root directories and shows which files the transpile rule would \
                  include. It never writes any configuration."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run as if started in DIR
    #[arg(long, global = true, value_name = "DIR", env = "NTM_CWD")]
    pub cwd: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the package root each module resolves to
    Resolve {
        /// Modules to resolve (default: `modules` from ntm.toml)
        modules: Vec<String>,
        /// Keep symlinked locations instead of following them
        #[arg(long)]
        no_symlinks: bool,
    },

    /// Show whether files would be transpiled
    Match {
        /// Files to check, relative to the working directory
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Module to transpile (repeatable; default: ntm.toml)
        #[arg(short, long = "module", value_name = "MODULE")]
        modules: Vec<String>,
        /// Keep symlinked locations instead of following them
        #[arg(long)]
        no_symlinks: bool,
    },

    /// Print the watch exclusion glob for the modules
    WatchGlob {
        /// Module to keep watched (repeatable; default: ntm.toml)
        #[arg(short, long = "module", value_name = "MODULE")]
        modules: Vec<String>,
    },
}

pub fn parse() -> Cli {
    Cli::parse()
}
