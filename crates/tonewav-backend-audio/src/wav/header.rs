//! Reading the canonical 44-byte header back.

use super::format::{FMT_CHUNK_SIZE, FORMAT_PCM};
use crate::error::{AudioError, AudioResult};

/// Size of the canonical PCM header.
pub const HEADER_LEN: usize = 44;

/// Parsed header of a canonical 16-bit mono PCM WAV file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    /// RIFF `ChunkSize` (file length minus 8).
    pub chunk_size: u32,
    /// Format tag (1 = PCM).
    pub audio_format: u16,
    /// Channel count.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bytes per second.
    pub byte_rate: u32,
    /// Bytes per sample frame.
    pub block_align: u16,
    /// Bits per sample.
    pub bits_per_sample: u16,
    /// `data` chunk payload size in bytes.
    pub data_size: u32,
}

impl WavHeader {
    /// Parses and checks the header at the start of `bytes`.
    ///
    /// Only the exact layout tonewav writes is accepted: `fmt ` at offset 12,
    /// `data` at offset 36, PCM, mono, 16-bit, internally consistent sizes,
    /// and a data payload that is fully present.
    pub fn parse(bytes: &[u8]) -> AudioResult<Self> {
        if bytes.len() < HEADER_LEN {
            return Err(AudioError::malformed(format!(
                "file is {} bytes, shorter than the {}-byte header",
                bytes.len(),
                HEADER_LEN
            )));
        }

        expect_tag(bytes, 0, b"RIFF")?;
        expect_tag(bytes, 8, b"WAVE")?;
        expect_tag(bytes, 12, b"fmt ")?;
        expect_tag(bytes, 36, b"data")?;

        let fmt_size = read_u32(bytes, 16);
        if fmt_size != FMT_CHUNK_SIZE {
            return Err(AudioError::malformed(format!(
                "fmt chunk size is {}, expected {}",
                fmt_size, FMT_CHUNK_SIZE
            )));
        }

        let header = Self {
            chunk_size: read_u32(bytes, 4),
            audio_format: read_u16(bytes, 20),
            channels: read_u16(bytes, 22),
            sample_rate: read_u32(bytes, 24),
            byte_rate: read_u32(bytes, 28),
            block_align: read_u16(bytes, 32),
            bits_per_sample: read_u16(bytes, 34),
            data_size: read_u32(bytes, 40),
        };
        header.check_consistency()?;

        let available = (bytes.len() - HEADER_LEN) as u64;
        if available < u64::from(header.data_size) {
            return Err(AudioError::malformed(format!(
                "data chunk declares {} bytes but only {} are present",
                header.data_size, available
            )));
        }

        Ok(header)
    }

    fn check_consistency(&self) -> AudioResult<()> {
        if self.audio_format != FORMAT_PCM {
            return Err(AudioError::malformed(format!(
                "format tag {} is not PCM",
                self.audio_format
            )));
        }
        if self.channels != 1 {
            return Err(AudioError::malformed(format!(
                "{} channels, expected mono",
                self.channels
            )));
        }
        if self.bits_per_sample != 16 {
            return Err(AudioError::malformed(format!(
                "{} bits per sample, expected 16",
                self.bits_per_sample
            )));
        }
        if self.block_align != 2 {
            return Err(AudioError::malformed(format!(
                "block align {}, expected 2",
                self.block_align
            )));
        }
        if u64::from(self.byte_rate) != u64::from(self.sample_rate) * 2 {
            return Err(AudioError::malformed(format!(
                "byte rate {} does not match sample rate {}",
                self.byte_rate, self.sample_rate
            )));
        }
        if u64::from(self.chunk_size) != 36 + u64::from(self.data_size) {
            return Err(AudioError::malformed(format!(
                "RIFF size {} does not match data size {}",
                self.chunk_size, self.data_size
            )));
        }
        if self.data_size % 2 != 0 {
            return Err(AudioError::malformed(format!(
                "data size {} is not a whole number of samples",
                self.data_size
            )));
        }
        Ok(())
    }

    /// Number of samples in the data chunk.
    pub fn num_samples(&self) -> u64 {
        u64::from(self.data_size) / u64::from(self.block_align)
    }

    /// Duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.num_samples() as f64 / f64::from(self.sample_rate)
    }

    /// Total file size the header describes.
    pub fn file_bytes(&self) -> u64 {
        u64::from(self.chunk_size) + 8
    }
}

fn expect_tag(bytes: &[u8], offset: usize, tag: &[u8; 4]) -> AudioResult<()> {
    let found = &bytes[offset..offset + 4];
    if found != tag {
        return Err(AudioError::malformed(format!(
            "expected '{}' at offset {}, found {:?}",
            String::from_utf8_lossy(tag),
            offset,
            String::from_utf8_lossy(found)
        )));
    }
    Ok(())
}

fn read_u16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}
