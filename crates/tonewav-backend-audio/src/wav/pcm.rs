//! PCM data extraction and hashing utilities.

use super::header::{WavHeader, HEADER_LEN};
use super::writer::samples_to_pcm16;

/// Extracts PCM data from a WAV file buffer.
///
/// Used for comparing WAV files by their audio content only.
///
/// # Returns
/// PCM data if the header is canonical and the payload complete, or None
pub fn extract_pcm_data(wav_data: &[u8]) -> Option<&[u8]> {
    let header = WavHeader::parse(wav_data).ok()?;
    let end = HEADER_LEN + header.data_size as usize;
    Some(&wav_data[HEADER_LEN..end])
}

/// Decodes little-endian 16-bit PCM bytes into samples.
///
/// A trailing odd byte is ignored.
pub fn decode_pcm16(pcm: &[u8]) -> Vec<i16> {
    pcm.chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect()
}

/// Computes the PCM hash of a WAV file.
///
/// # Returns
/// BLAKE3 hash of PCM data, or None if format is invalid
pub fn compute_pcm_hash(wav_data: &[u8]) -> Option<String> {
    extract_pcm_data(wav_data).map(|pcm| blake3::hash(pcm).to_hex().to_string())
}

/// Computes the PCM hash directly from samples, without building a WAV file.
///
/// Equal to [`compute_pcm_hash`] of the encoded file.
pub fn pcm_hash_samples(samples: &[i16]) -> String {
    let pcm = samples_to_pcm16(samples);
    blake3::hash(&pcm).to_hex().to_string()
}
