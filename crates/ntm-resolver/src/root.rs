//! Map module specifiers to the directory holding their `package.json`.

use std::fmt;
use std::io;
use std::path::PathBuf;

use oxc_resolver::{ResolveError, ResolveOptions, Resolver};

use ntm_util::errors::NtmError;
use ntm_util::fs::{find_ancestor_of_file, normalize};

/// Name of the package manifest marking a package root.
pub const MANIFEST_FILE: &str = "package.json";

/// Extensions tried on extensionless requests, main fields and directory
/// indexes. Style sheets are listed so style-only packages resolve.
const EXTENSIONS: [&str; 8] = [
    ".js", ".jsx", ".ts", ".tsx", ".mjs", ".css", ".scss", ".sass",
];

/// `package.json` fields naming a package entry point, in lookup order.
const MAIN_FIELDS: [&str; 3] = ["main", "module", "source"];

/// Conditions honoured in `exports` maps, besides `default`.
const CONDITION_NAMES: [&str; 1] = ["require"];

/// Resolver options for package entry points.
///
/// `exports` targets are taken as fully specified: no extension is appended
/// to them.
pub fn resolve_options(symlinks: bool) -> ResolveOptions {
    ResolveOptions {
        symlinks,
        extensions: EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        main_fields: MAIN_FIELDS.iter().map(|f| f.to_string()).collect(),
        condition_names: CONDITION_NAMES.iter().map(|c| c.to_string()).collect(),
        ..ResolveOptions::default()
    }
}

/// Anything that can turn a module specifier into a package root.
///
/// The orchestration layer accepts any implementor, so callers can swap in
/// their own lookup (Yarn PnP, a monorepo index, a test double).
pub trait RootResolve {
    fn resolve_root(&self, specifier: &str) -> Result<PathBuf, NtmError>;
}

impl<F> RootResolve for F
where
    F: Fn(&str) -> Result<PathBuf, NtmError>,
{
    fn resolve_root(&self, specifier: &str) -> Result<PathBuf, NtmError> {
        self(specifier)
    }
}

/// Resolves package roots relative to a fixed base directory.
pub struct PackageRootResolver {
    base_dir: PathBuf,
    symlinks: bool,
    resolver: Resolver,
}

impl PackageRootResolver {
    /// A resolver following symlinks. A relative `base_dir` is taken from the
    /// current directory.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        let base_dir = std::path::absolute(&base_dir)
            .map(|p| normalize(&p))
            .unwrap_or(base_dir);
        Self {
            base_dir,
            symlinks: true,
            resolver: Resolver::new(resolve_options(true)),
        }
    }

    /// Set the symlink policy: `true` returns real locations, `false` keeps
    /// the symlinked location a package was found at.
    pub fn with_symlinks(self, symlinks: bool) -> Self {
        if symlinks == self.symlinks {
            return self;
        }
        Self {
            base_dir: self.base_dir,
            symlinks,
            resolver: Resolver::new(resolve_options(symlinks)),
        }
    }

    pub fn resolves_symlinks(&self) -> bool {
        self.symlinks
    }

    /// Resolve `specifier` to the directory containing its `package.json`.
    ///
    /// # Errors
    ///
    /// - [`NtmError::Resolution`] when the specifier does not resolve, or the
    ///   resolver fails reading the filesystem or a manifest (the cause is
    ///   attached);
    /// - [`NtmError::ManifestNotFound`] when no ancestor of the resolved file
    ///   holds a `package.json`.
    pub fn resolve(&self, specifier: &str) -> Result<PathBuf, NtmError> {
        let entry = match self.resolver.resolve(&self.base_dir, specifier) {
            Ok(resolution) => resolution.into_path_buf(),
            Err(e) if is_unresolved(&e) => return Err(NtmError::unresolved(specifier)),
            Err(e) => {
                return Err(NtmError::Resolution {
                    specifier: specifier.to_string(),
                    source: Some(io::Error::other(e)),
                })
            }
        };

        let root = find_ancestor_of_file(&entry, MANIFEST_FILE).ok_or_else(|| {
            NtmError::ManifestNotFound {
                specifier: specifier.to_string(),
            }
        })?;

        tracing::debug!(
            "resolved {specifier} to {} (entry {})",
            root.display(),
            entry.display()
        );
        Ok(root)
    }
}

/// Errors meaning "nothing there", as opposed to a failure while looking.
fn is_unresolved(error: &ResolveError) -> bool {
    matches!(
        error,
        ResolveError::NotFound { .. } | ResolveError::PackagePathNotExported { .. }
    )
}

impl RootResolve for PackageRootResolver {
    fn resolve_root(&self, specifier: &str) -> Result<PathBuf, NtmError> {
        self.resolve(specifier)
    }
}

impl fmt::Debug for PackageRootResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PackageRootResolver")
            .field("base_dir", &self.base_dir)
            .field("symlinks", &self.symlinks)
            .finish()
    }
}
