//! Operations: report where modules resolve and which files would be
//! transpiled, without touching any bundler configuration.

use std::path::{Path, PathBuf};

use ntm_core::bundler::{BuildContext, BundlerConfig};
use ntm_core::config::TranspileOptions;
use ntm_resolver::PackageRootResolver;
use ntm_util::errors::{NtmError, NtmResult};
use ntm_util::fs::normalize;

use crate::ops_transpile::TranspileModules;

/// A module and the package root it resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModule {
    pub name: String,
    pub root: PathBuf,
}

/// Resolve each module from `base_dir`, failing on the first that doesn't resolve.
pub fn resolve_modules(
    base_dir: &Path,
    modules: &[String],
    resolve_symlinks: bool,
) -> NtmResult<Vec<ResolvedModule>> {
    let resolver = PackageRootResolver::new(base_dir).with_symlinks(resolve_symlinks);
    let mut resolved = Vec::with_capacity(modules.len());
    for name in modules {
        let root = resolver.resolve(name)?;
        resolved.push(ResolvedModule {
            name: name.clone(),
            root,
        });
    }
    Ok(resolved)
}

/// Whether a file would go through the transpile rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMatch {
    pub path: PathBuf,
    pub transpiled: bool,
}

/// Classify `paths` against the rule added for `modules`.
///
/// Relative paths are taken from `base_dir`. When symlinks are resolved the
/// roots are real locations, so `base_dir` is canonicalized once to match;
/// the paths themselves are only normalized, as the bundler hands them over.
pub fn match_paths(
    base_dir: &Path,
    modules: &[String],
    options: TranspileOptions,
    paths: &[PathBuf],
) -> NtmResult<Vec<PathMatch>> {
    let base_dir = if options.resolve_symlinks {
        dunce::canonicalize(base_dir).map_err(NtmError::Io)?
    } else {
        normalize(&std::path::absolute(base_dir).map_err(NtmError::Io)?)
    };

    let patch = TranspileModules::new(modules.iter().cloned(), options, &base_dir).patch(false)?;
    let config = patch.apply(BundlerConfig::default(), &BuildContext::default());
    let rule = config.module.rules.last();

    Ok(paths
        .iter()
        .map(|p| {
            let path = normalize(&base_dir.join(p));
            let transpiled = rule.is_some_and(|r| r.applies_to(&path, None));
            PathMatch { path, transpiled }
        })
        .collect())
}
