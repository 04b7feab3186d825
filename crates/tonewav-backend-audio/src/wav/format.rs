//! WAV file format parameters.

use tonewav_spec::AudioParameters;

/// PCM format tag.
pub const FORMAT_PCM: u16 = 1;

/// Size of the PCM `fmt ` chunk body.
pub const FMT_CHUNK_SIZE: u32 = 16;

/// WAV file format parameters.
///
/// tonewav only produces 16-bit mono PCM; the fields are kept explicit so the
/// header writer and reader share one source for derived values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavFormat {
    /// Number of channels (always 1).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bits per sample (always 16).
    pub bits_per_sample: u16,
}

impl WavFormat {
    /// Creates a 16-bit mono format.
    pub fn mono(sample_rate: u32) -> Self {
        Self {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
        }
    }

    /// Creates the format for a tone.
    pub fn for_params(params: &AudioParameters) -> Self {
        Self::mono(params.sample_rate_hz())
    }

    /// Calculates bytes per sample (per channel).
    pub(crate) fn bytes_per_sample(&self) -> u16 {
        self.bits_per_sample / 8
    }

    /// Calculates block align (bytes per sample frame).
    pub fn block_align(&self) -> u16 {
        self.channels * self.bytes_per_sample()
    }

    /// Calculates byte rate (bytes per second).
    pub fn byte_rate(&self) -> u32 {
        self.sample_rate * u32::from(self.block_align())
    }
}
