//! Package root resolution.
//!
//! [`root::PackageRootResolver`] resolves a module specifier to a file with
//! `oxc_resolver`, then walks up from that file to the directory holding the
//! package's `package.json`.

pub mod root;

pub use root::{resolve_options, PackageRootResolver, RootResolve};
