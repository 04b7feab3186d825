//! Core WAV encoding functions.

use std::io::{self, Write};

use tonewav_spec::AudioParameters;

use super::format::{WavFormat, FMT_CHUNK_SIZE, FORMAT_PCM};
use crate::error::{AudioError, AudioResult};
use crate::synthesis::SampleBuffer;

/// Samples converted per write call when streaming the data chunk.
const WRITE_BLOCK_SAMPLES: usize = 4096;

/// Writes the 44-byte canonical header.
///
/// Field order and widths are fixed: 4-byte sizes and rates, 2-byte format
/// tag, channel count, block align, and bit depth.
///
/// # Arguments
/// * `writer` - Output writer
/// * `format` - WAV format parameters
/// * `data_bytes` - Size of the `data` chunk payload
///
/// # Errors
/// Returns [`io::ErrorKind::InvalidInput`] when `data_bytes` leaves no room
/// for the header in the 32-bit RIFF size, before anything is written.
pub fn write_header<W: Write>(writer: &mut W, format: &WavFormat, data_bytes: u32) -> io::Result<()> {
    // Total file size minus 8 bytes for RIFF header
    let file_size = data_bytes.checked_add(36).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("data chunk of {} bytes overflows the RIFF size field", data_bytes),
        )
    })?;

    // RIFF header
    writer.write_all(b"RIFF")?;
    writer.write_all(&file_size.to_le_bytes())?;
    writer.write_all(b"WAVE")?;

    // fmt chunk
    writer.write_all(b"fmt ")?;
    writer.write_all(&FMT_CHUNK_SIZE.to_le_bytes())?;
    writer.write_all(&FORMAT_PCM.to_le_bytes())?;
    writer.write_all(&format.channels.to_le_bytes())?;
    writer.write_all(&format.sample_rate.to_le_bytes())?;
    writer.write_all(&format.byte_rate().to_le_bytes())?;
    writer.write_all(&format.block_align().to_le_bytes())?;
    writer.write_all(&format.bits_per_sample.to_le_bytes())?;

    // data chunk
    writer.write_all(b"data")?;
    writer.write_all(&data_bytes.to_le_bytes())?;

    Ok(())
}

/// Writes samples as little-endian 16-bit PCM, converting in fixed-size blocks.
pub fn write_samples<W, I>(writer: &mut W, samples: I) -> io::Result<u64>
where
    W: Write,
    I: IntoIterator<Item = i16>,
{
    let mut block = Vec::with_capacity(WRITE_BLOCK_SAMPLES * 2);
    let mut written = 0u64;

    for sample in samples {
        block.extend_from_slice(&sample.to_le_bytes());
        if block.len() >= WRITE_BLOCK_SAMPLES * 2 {
            writer.write_all(&block)?;
            written += block.len() as u64;
            block.clear();
        }
    }
    if !block.is_empty() {
        writer.write_all(&block)?;
        written += block.len() as u64;
    }

    Ok(written / 2)
}

/// Encodes a sample stream as a complete WAV file.
///
/// The stream must yield exactly `params.num_samples()` samples; the header
/// is written before the samples are consumed, so a short or long stream is
/// reported as [`AudioError::SampleCountMismatch`] after the fact.
pub fn encode_stream<W, I>(params: &AudioParameters, samples: I, mut sink: W) -> AudioResult<()>
where
    W: Write,
    I: ExactSizeIterator<Item = i16>,
{
    let expected = params.num_samples();
    let declared = samples.len() as u64;
    if declared != expected {
        return Err(AudioError::SampleCountMismatch {
            expected,
            actual: declared,
        });
    }

    let format = WavFormat::for_params(params);
    write_header(&mut sink, &format, params.data_bytes()).map_err(AudioError::Encode)?;
    let written = write_samples(&mut sink, samples).map_err(AudioError::Encode)?;
    sink.flush().map_err(AudioError::Encode)?;

    if written != expected {
        return Err(AudioError::SampleCountMismatch {
            expected,
            actual: written,
        });
    }
    Ok(())
}

/// Encodes a materialized tone as a complete WAV file.
///
/// # Arguments
/// * `params` - Tone parameters; supply the header fields
/// * `samples` - Exactly `params.num_samples()` samples
/// * `sink` - Byte sink receiving the file
///
/// # Returns
/// `Ok(())`, or an encode error if the sink rejects bytes
pub fn encode<W: Write>(params: &AudioParameters, samples: &SampleBuffer, sink: W) -> AudioResult<()> {
    encode_stream(params, samples.iter().copied(), sink)
}

/// Encodes a materialized tone into a byte vector.
pub fn encode_to_vec(params: &AudioParameters, samples: &SampleBuffer) -> AudioResult<Vec<u8>> {
    let mut buffer = Vec::with_capacity(params.file_bytes() as usize);
    encode(params, samples, &mut buffer)?;
    Ok(buffer)
}

/// Serializes samples to little-endian PCM bytes.
pub fn samples_to_pcm16(samples: &[i16]) -> Vec<u8> {
    let mut pcm = Vec::with_capacity(samples.len() * 2);
    for &sample in samples {
        pcm.extend_from_slice(&sample.to_le_bytes());
    }
    pcm
}
