//! The inclusion predicate handed to the bundler: does this file belong to
//! one of the packages we transpile?

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ntm_util::fs::normalize;
use ntm_util::logger::{self, Logger};

/// Directory name package managers install dependencies into.
pub const NODE_MODULES: &str = "node_modules";

/// A shareable predicate over file paths.
pub type PathPredicate = Arc<dyn Fn(&Path) -> bool + Send + Sync>;

/// Returns `true` for paths that mention [`NODE_MODULES`] more than once,
/// i.e. a package installed inside another package's own dependencies.
///
/// This counts raw substring occurrences, so a package whose name contains
/// `node_modules` is misclassified. Kept as a known approximation rather than
/// an exact ancestry check.
pub fn is_nested_dependency(path: &Path) -> bool {
    path.to_string_lossy().matches(NODE_MODULES).count() > 1
}

/// Matches files below any of a fixed set of package roots, rejecting nested
/// dependency copies.
#[derive(Clone)]
pub struct InclusionMatcher {
    roots: Vec<PathBuf>,
    logger: Arc<dyn Logger>,
}

impl InclusionMatcher {
    /// Create a matcher over `roots`. Roots are lexically normalized; the
    /// logger defaults to [`logger::noop`].
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self {
            roots: roots.into_iter().map(|r| normalize(r.as_ref())).collect(),
            logger: logger::noop(),
        }
    }

    /// Report positive matches through `logger`.
    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Decide whether `path` should be transpiled.
    pub fn matches(&self, path: &Path) -> bool {
        if is_nested_dependency(path) {
            return false;
        }

        let path = normalize(path);
        let transpiled = self.roots.iter().any(|root| path.starts_with(root));
        if transpiled {
            self.logger.info(&format!("transpiled: {}", path.display()));
        }
        transpiled
    }

    /// Turn the matcher into a closure usable as a rule condition.
    pub fn into_predicate(self) -> PathPredicate {
        Arc::new(move |path: &Path| self.matches(path))
    }
}

impl fmt::Debug for InclusionMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InclusionMatcher")
            .field("roots", &self.roots)
            .finish_non_exhaustive()
    }
}

/// Build the inclusion predicate for the given package roots.
pub fn build_matcher(roots: Vec<PathBuf>, logger: Arc<dyn Logger>) -> PathPredicate {
    InclusionMatcher::new(roots).with_logger(logger).into_predicate()
}
