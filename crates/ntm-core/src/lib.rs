//! Core data types for ntm.
//!
//! This crate defines the pieces the orchestration layer splices together:
//! JavaScript-style rule patterns and their equality helper, a typed model of
//! the bundler configuration (rules, issuer clauses, watch exclusions), the
//! inclusion matcher deciding which files get transpiled, and the `ntm.toml`
//! project configuration.
//!
//! This crate does not resolve modules; see `ntm-resolver` for that.

pub mod bundler;
pub mod config;
pub mod matcher;
pub mod pattern;
