//! Command dispatch and handler modules.

mod match_;
mod resolve;
mod watch_glob;

use std::path::{Path, PathBuf};

use miette::Result;

use ntm_core::config::{ProjectConfig, TranspileOptions, CONFIG_FILE};
use ntm_util::errors::NtmError;
use ntm_util::fs::normalize;

use crate::cli::Command;

/// Route a parsed CLI command to the appropriate handler.
pub fn dispatch(command: Command, project: &Project) -> Result<()> {
    tracing::debug!("working directory {}", project.dir().display());
    match command {
        Command::Resolve {
            modules,
            no_symlinks,
        } => resolve::exec(project, modules, no_symlinks),
        Command::Match {
            paths,
            modules,
            no_symlinks,
        } => match_::exec(project, &paths, modules, no_symlinks),
        Command::WatchGlob { modules } => watch_glob::exec(project, modules),
    }
}

/// The working directory and the configuration found from it.
pub(crate) struct Project {
    dir: PathBuf,
    config: ProjectConfig,
    verbose: bool,
}

impl Project {
    pub(crate) fn load(cwd: Option<&Path>, verbose: bool) -> Result<Self> {
        let current = std::env::current_dir().map_err(NtmError::Io)?;
        let dir = match cwd {
            Some(dir) => normalize(&current.join(dir)),
            None => current,
        };
        let config = ProjectConfig::discover(&dir)?;
        Ok(Self {
            dir,
            config,
            verbose,
        })
    }

    pub(crate) fn dir(&self) -> &Path {
        &self.dir
    }

    /// Whether ntm's debug messages should be shown.
    pub(crate) fn debug(&self) -> bool {
        self.verbose || self.config.options.debug
    }

    /// Modules from the command line, or from `ntm.toml` when none were given.
    pub(crate) fn modules(&self, explicit: Vec<String>) -> Result<Vec<String>> {
        let modules = if explicit.is_empty() {
            self.config.modules.clone()
        } else {
            explicit
        };
        if modules.is_empty() {
            return Err(NtmError::Config {
                message: format!(
                    "no modules given; pass them on the command line or list them in {CONFIG_FILE}"
                ),
            }
            .into());
        }
        Ok(modules)
    }

    /// Configured options with command-line overrides applied.
    pub(crate) fn options(&self, no_symlinks: bool) -> TranspileOptions {
        let mut options = self.config.options;
        if no_symlinks {
            options.resolve_symlinks = false;
        }
        options.debug |= self.verbose;
        options
    }
}
