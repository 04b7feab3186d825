//! tonewav Audio Backend
//!
//! This crate turns validated tone parameters into canonical WAV bytes:
//!
//! - [`synthesis`] - Sine samples, lazily ([`SineTone`]) or materialized ([`SampleBuffer`])
//! - [`wav`] - 44-byte PCM header writer and reader, PCM hashing
//! - [`generate`] - Write a [`ToneJob`](tonewav_spec::ToneJob) to disk
//! - [`playback`] - Forward a written file to a byte sink in fixed-size transfers
//!
//! # Determinism
//!
//! Output depends only on the parameters and the period policy. The same job
//! written to two paths yields byte-identical files.
//!
//! # Example
//!
//! ```
//! use tonewav_backend_audio::{synthesize, wav};
//! use tonewav_spec::{AudioParameters, PeriodPolicy};
//!
//! let params = AudioParameters::new(1, 8000, 440).unwrap();
//! let samples = synthesize(&params, PeriodPolicy::Legacy);
//! let bytes = wav::encode_to_vec(&params, &samples).unwrap();
//!
//! assert_eq!(&bytes[0..4], b"RIFF");
//! assert_eq!(bytes.len(), 44 + 16000);
//! ```

pub mod error;
pub mod generate;
pub mod playback;
pub mod synthesis;
pub mod wav;

// Re-export main types at crate root
pub use error::{AudioError, AudioResult};
pub use generate::{generate_to_path, GenerateResult};
pub use playback::{forward, play_file, TRANSFER_CHUNK};
pub use synthesis::{synthesize, SampleBuffer, SineTone};
pub use wav::{encode, WavHeader};
