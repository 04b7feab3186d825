//! tonewav Tone Parameter Library
//!
//! This crate provides the types every other tonewav crate agrees on:
//! validated tone parameters, the period policy, a complete job description,
//! and stable error codes.
//!
//! # Example
//!
//! ```
//! use tonewav_spec::{AudioParameters, PeriodPolicy, ToneJob};
//!
//! let params = AudioParameters::new(5, 44100, 440).unwrap();
//! let job = ToneJob::new("tone.wav", params)
//!     .unwrap()
//!     .with_policy(PeriodPolicy::Legacy);
//!
//! assert_eq!(job.parameters().file_bytes(), 441_044);
//! ```
//!
//! # Modules
//!
//! - [`error`]: Error codes, parameter errors, and the backend error trait
//! - [`params`]: `AudioParameters`, `PeriodPolicy`, and validation helpers
//! - [`job`]: `ToneJob`, parameters plus an explicit output path

pub mod error;
pub mod job;
pub mod params;

// Re-export commonly used types at the crate root
pub use error::{BackendError, ErrorCode, ParamError, ParamField};
pub use job::ToneJob;
pub use params::{
    AudioParameters, PeriodPolicy, BYTES_PER_SAMPLE, MAX_DATA_BYTES, WAV_HEADER_BYTES,
};
