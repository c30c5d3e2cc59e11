pub mod ops_inspect;
pub mod ops_transpile;

pub use ops_transpile::{watch_glob, ConfigPatch, TranspileModules};
