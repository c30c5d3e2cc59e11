use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all ntm operations.
#[derive(Debug, Error, Diagnostic)]
pub enum NtmError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A module specifier could not be resolved to a file, or the filesystem
    /// failed underneath the resolver.
    #[error("could not resolve module \"{specifier}\"")]
    #[diagnostic(help(
        "Are you sure the name of the module you are trying to transpile is correct, and that it is installed?"
    ))]
    Resolution {
        specifier: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// The module resolved to a file but no ancestor directory holds a `package.json`.
    #[error("could not find the root directory of \"{specifier}\"")]
    #[diagnostic(help("Is the package missing a package.json?"))]
    ManifestNotFound { specifier: String },

    /// Invalid or malformed configuration (e.g. ntm.toml, a rule pattern).
    #[error("Configuration error: {message}")]
    #[diagnostic(help("Check your ntm.toml for syntax errors"))]
    Config { message: String },
}

impl NtmError {
    /// Build a [`NtmError::Resolution`] without an underlying cause.
    pub fn unresolved(specifier: impl Into<String>) -> Self {
        Self::Resolution {
            specifier: specifier.into(),
            source: None,
        }
    }

    /// The module specifier this error is about, if any.
    pub fn specifier(&self) -> Option<&str> {
        match self {
            Self::Resolution { specifier, .. } | Self::ManifestNotFound { specifier } => {
                Some(specifier)
            }
            _ => None,
        }
    }
}

/// Convenience alias for `miette::Result<T>`.
pub type NtmResult<T> = miette::Result<T>;
