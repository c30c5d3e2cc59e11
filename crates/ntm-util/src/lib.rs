//! Shared utilities for ntm.
//!
//! This crate provides cross-cutting concerns used by all other ntm crates:
//! the unified error type, filesystem helpers, the leveled [`logger::Logger`]
//! capability injected into the matcher and orchestration layer, and
//! terminal status lines.

pub mod errors;
pub mod fs;
pub mod logger;
pub mod progress;
