//! tonewav CLI library
//!
//! Command implementations and parameter-file loading used by the `tonewav`
//! binary. Exposed as a library so integration tests and fuzz targets can
//! drive them directly.

pub mod analysis;
pub mod commands;
pub mod input;
pub mod logging;
