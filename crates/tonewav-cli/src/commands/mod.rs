//! CLI command implementations

pub mod generate;
pub mod inspect;
pub mod json_output;
pub mod play;
pub mod run;

/// Context attached to failures before any file is touched.
pub const STAGE_VALIDATION: &str = "parameter validation";
/// Context attached to failures while writing the WAV file.
pub const STAGE_ENCODING: &str = "encoding";
/// Context attached to failures while forwarding bytes to the sink.
pub const STAGE_PLAYBACK: &str = "playback";
/// Context attached to failures while reading an existing file.
pub const STAGE_INSPECTION: &str = "inspection";
