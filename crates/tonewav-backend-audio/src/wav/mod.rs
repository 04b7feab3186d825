//! Canonical WAV encoding and decoding.
//!
//! This module writes 16-bit mono PCM WAV files with the fixed 44-byte
//! header and no optional chunks, so the same parameters always produce the
//! same bytes. The hash of the PCM data identifies a tone independently of
//! its file name.

mod format;
mod header;
mod pcm;
mod writer;


// Re-export public API
pub use format::{WavFormat, FMT_CHUNK_SIZE, FORMAT_PCM};
pub use header::{WavHeader, HEADER_LEN};
pub use pcm::{compute_pcm_hash, decode_pcm16, extract_pcm_data, pcm_hash_samples};
pub use writer::{
    encode, encode_stream, encode_to_vec, samples_to_pcm16, write_header, write_samples,
};
