//! A typed model of the parts of the bundler configuration ntm touches.
//!
//! The configuration is owned by the build tool; ntm only appends a rule,
//! rewrites the issuer clause of the CSS-module rules, edits the watch
//! exclusions and flips a few resolve/snapshot switches.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use ntm_util::errors::NtmError;
use ntm_util::fs::is_within;

use crate::matcher::PathPredicate;
use crate::pattern::Pattern;

/// A condition a rule evaluates against a resource or issuer path.
#[derive(Clone)]
pub enum Condition {
    /// Regular expression tested against the path string.
    Pattern(Pattern),
    /// Matches the path itself and everything below it.
    Path(PathBuf),
    /// Arbitrary predicate, e.g. the inclusion matcher.
    Predicate(PathPredicate),
}

impl Condition {
    pub fn predicate(predicate: PathPredicate) -> Self {
        Self::Predicate(predicate)
    }

    pub fn matches(&self, path: &Path) -> bool {
        match self {
            Self::Pattern(p) => p.is_match(&path.to_string_lossy()),
            Self::Path(root) => is_within(path, root),
            Self::Predicate(f) => f(path),
        }
    }
}

impl From<Pattern> for Condition {
    fn from(pattern: Pattern) -> Self {
        Self::Pattern(pattern)
    }
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pattern(p) => write!(f, "{p}"),
            Self::Path(p) => write!(f, "{}", p.display()),
            Self::Predicate(_) => f.write_str("[predicate]"),
        }
    }
}

/// Restricts a rule to resources imported from matching locations.
///
/// Every clause that is present must hold: all of `and`, at least one of
/// `or`, none of `not`.
#[derive(Debug, Clone, Default)]
pub struct Issuer {
    pub and: Option<Vec<Condition>>,
    pub or: Option<Vec<Condition>>,
    pub not: Option<Vec<Condition>>,
}

impl Issuer {
    pub fn matches(&self, issuer: &Path) -> bool {
        let all = self
            .and
            .as_ref()
            .map_or(true, |c| c.iter().all(|c| c.matches(issuer)));
        let any = self
            .or
            .as_ref()
            .map_or(true, |c| c.iter().any(|c| c.matches(issuer)));
        let none = self
            .not
            .as_ref()
            .map_or(true, |c| !c.iter().any(|c| c.matches(issuer)));
        all && any && none
    }
}

/// Reference to a loader by name, with its options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loader {
    pub loader: String,
    #[serde(default)]
    pub options: serde_json::Value,
}

impl Loader {
    pub fn new(loader: impl Into<String>) -> Self {
        Self {
            loader: loader.into(),
            options: serde_json::Value::Null,
        }
    }

    pub fn with_options(mut self, options: serde_json::Value) -> Self {
        self.options = options;
        self
    }
}

/// A module-processing rule.
#[derive(Debug, Clone, Default)]
pub struct Rule {
    pub test: Option<Condition>,
    pub include: Option<Condition>,
    pub exclude: Option<Condition>,
    pub loader: Option<Loader>,
    /// Module type override (`type` in the bundler schema).
    pub module_type: Option<String>,
    pub side_effects: Option<bool>,
    pub issuer: Option<Issuer>,
    pub one_of: Option<Vec<Rule>>,
}

impl Rule {
    /// Does this rule apply to `resource`, imported from `issuer`?
    ///
    /// Only the rule's own conditions are checked; `one_of` children are not
    /// consulted.
    pub fn applies_to(&self, resource: &Path, issuer: Option<&Path>) -> bool {
        let test = self.test.as_ref().map_or(true, |c| c.matches(resource));
        let include = self.include.as_ref().map_or(true, |c| c.matches(resource));
        let exclude = self.exclude.as_ref().is_some_and(|c| c.matches(resource));
        let issuer_ok = match (&self.issuer, issuer) {
            (Some(clause), Some(path)) => clause.matches(path),
            (Some(_), None) => false,
            (None, _) => true,
        };
        test && include && !exclude && issuer_ok
    }
}

/// `module` section of the bundler configuration.
#[derive(Debug, Clone, Default)]
pub struct ModuleOptions {
    pub rules: Vec<Rule>,
}

/// `resolve` section of the bundler configuration.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub symlinks: Option<bool>,
}

/// `watchOptions` section of the bundler configuration.
#[derive(Debug, Clone, Default)]
pub struct WatchOptions {
    pub ignored: Vec<String>,
}

/// `snapshot` section of the bundler configuration.
#[derive(Debug, Clone, Default)]
pub struct SnapshotOptions {
    pub managed_paths: Vec<PathBuf>,
}

/// The bundler configuration handed to the webpack hook.
#[derive(Debug, Clone, Default)]
pub struct BundlerConfig {
    pub module: ModuleOptions,
    pub resolve: ResolveOptions,
    pub watch_options: WatchOptions,
    pub snapshot: Option<SnapshotOptions>,
}

/// Loaders the framework exposes to config hooks.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultLoaders {
    pub babel: Loader,
}

impl Default for DefaultLoaders {
    fn default() -> Self {
        Self {
            babel: Loader::new("next-babel-loader"),
        }
    }
}

/// Context passed alongside the configuration to the webpack hook.
#[derive(Debug, Clone, Default)]
pub struct BuildContext {
    pub default_loaders: DefaultLoaders,
    pub is_server: bool,
    pub dev: bool,
}

/// A user hook that receives the bundler configuration and returns it, possibly modified.
pub type WebpackHook =
    Arc<dyn Fn(BundlerConfig, &BuildContext) -> Result<BundlerConfig, NtmError> + Send + Sync>;

/// Opt-in framework features.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FutureFlags {
    #[serde(default)]
    pub webpack5: bool,
}

/// The framework configuration object ntm wraps.
#[derive(Clone, Default)]
pub struct NextConfig {
    pub future: FutureFlags,
    pub webpack: Option<WebpackHook>,
}

impl NextConfig {
    /// Run the configured webpack hook, or hand the configuration back untouched.
    pub fn run_webpack(
        &self,
        config: BundlerConfig,
        ctx: &BuildContext,
    ) -> Result<BundlerConfig, NtmError> {
        match &self.webpack {
            Some(hook) => hook(config, ctx),
            None => Ok(config),
        }
    }
}

impl fmt::Debug for NextConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NextConfig")
            .field("future", &self.future)
            .field("webpack", &self.webpack.as_ref().map(|_| "[hook]"))
            .finish()
    }
}
