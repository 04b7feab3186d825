//! tonewav End-to-End Test Infrastructure
//!
//! This crate provides integration tests for the full tone pipeline:
//!
//! - Generation: parameters -> WAV file on disk
//! - Parameter files: text and JSON input -> job -> file -> playback sink
//! - **Determinism**: identical parameters give byte-identical files
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p tonewav-tests
//! ```

pub mod determinism;
pub mod fixtures;

// Re-export commonly used items
pub use determinism::{verify_determinism, DeterminismResult, DiffInfo};
pub use fixtures::ToneFixture;
