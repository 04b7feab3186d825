//! Inspect command implementation
//!
//! Parses a WAV file written by tonewav and reports its header, PCM hash,
//! and signal metrics.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;
use std::process::ExitCode;
use tonewav_backend_audio::wav::{compute_pcm_hash, decode_pcm16, extract_pcm_data};
use tonewav_backend_audio::{AudioError, AudioResult, WavHeader};

use super::json_output::{
    audio_error_to_json, error_codes, HeaderReport, InspectOutput, InspectResult, JsonError,
};
use super::STAGE_INSPECTION;
use crate::analysis::analyze;

/// Run the inspect command
///
/// # Returns
/// Exit code: 0 success, 1 on any failure
pub fn run(wav_path: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(wav_path)
    } else {
        run_human(wav_path)
    }
}

/// Parses and analyzes an in-memory WAV file.
pub fn inspect_bytes(path: &str, bytes: &[u8]) -> AudioResult<InspectResult> {
    let header = WavHeader::parse(bytes)?;
    let pcm = extract_pcm_data(bytes).ok_or_else(|| AudioError::malformed("missing data chunk"))?;
    let pcm_hash =
        compute_pcm_hash(bytes).ok_or_else(|| AudioError::malformed("missing data chunk"))?;
    let samples = decode_pcm16(pcm);

    Ok(InspectResult {
        path: path.to_string(),
        header: HeaderReport::from(&header),
        num_samples: header.num_samples(),
        duration_seconds: header.duration_seconds(),
        pcm_hash,
        metrics: analyze(&samples, header.sample_rate),
    })
}

fn run_human(wav_path: &str) -> Result<ExitCode> {
    let bytes = fs::read(Path::new(wav_path))
        .with_context(|| format!("{}: failed to read {}", STAGE_INSPECTION, wav_path))?;
    let result = inspect_bytes(wav_path, &bytes).context(STAGE_INSPECTION)?;

    println!("{} {}", "Inspecting:".cyan().bold(), result.path);

    let h = &result.header;
    println!("\n{}", "Header:".cyan().bold());
    println!("  {} {}", "ChunkSize:".dimmed(), h.chunk_size);
    println!("  {} {}", "AudioFormat:".dimmed(), h.audio_format);
    println!("  {} {}", "Channels:".dimmed(), h.channels);
    println!("  {} {} Hz", "SampleRate:".dimmed(), h.sample_rate);
    println!("  {} {}", "ByteRate:".dimmed(), h.byte_rate);
    println!("  {} {}", "BlockAlign:".dimmed(), h.block_align);
    println!("  {} {}", "BitsPerSample:".dimmed(), h.bits_per_sample);
    println!("  {} {}", "DataSize:".dimmed(), h.data_size);

    println!("\n{}", "Signal:".cyan().bold());
    println!("  {} {}", "Samples:".dimmed(), result.num_samples);
    println!("  {} {:.3} s", "Duration:".dimmed(), result.duration_seconds);
    println!("  {} {}", "PCM hash:".dimmed(), result.pcm_hash);

    let m = &result.metrics;
    if m.silent {
        println!("  {} {}", "Level:".dimmed(), "silent".yellow());
    } else {
        println!(
            "  {} peak {:.2} dBFS, RMS {:.2} dBFS",
            "Level:".dimmed(),
            m.peak_db,
            m.rms_db
        );
    }
    if let Some(hz) = m.dominant_frequency_hz {
        println!("  {} {:.2} Hz", "Dominant:".dimmed(), hz);
    }

    Ok(ExitCode::SUCCESS)
}

fn run_json(wav_path: &str) -> Result<ExitCode> {
    let output = match fs::read(Path::new(wav_path)) {
        Err(e) => InspectOutput::failure(vec![JsonError::new(
            error_codes::FILE_READ,
            STAGE_INSPECTION,
            format!("failed to read {}: {}", wav_path, e),
        )]),
        Ok(bytes) => match inspect_bytes(wav_path, &bytes) {
            Ok(result) => InspectOutput::success(result),
            Err(e) => InspectOutput::failure(vec![audio_error_to_json(&e, STAGE_INSPECTION)]),
        },
    };

    let json = serde_json::to_string_pretty(&output).context("Failed to serialize output")?;
    println!("{}", json);

    Ok(if output.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tonewav_backend_audio::{synthesize, wav::encode_to_vec};
    use tonewav_spec::{AudioParameters, PeriodPolicy};

    fn tone_bytes(rate: u32, freq: u32) -> Vec<u8> {
        let params = AudioParameters::new(1, rate, freq).unwrap();
        encode_to_vec(&params, &synthesize(&params, PeriodPolicy::Legacy)).unwrap()
    }

    #[test]
    fn test_inspect_bytes_reports_header() {
        let bytes = tone_bytes(8000, 400);
        let result = inspect_bytes("tone.wav", &bytes).unwrap();

        assert_eq!(result.header.sample_rate, 8000);
        assert_eq!(result.header.data_size, 16_000);
        assert_eq!(result.num_samples, 8000);
        assert_eq!(result.duration_seconds, 1.0);
        assert_eq!(result.pcm_hash.len(), 64);

        let hz = result.metrics.dominant_frequency_hz.unwrap();
        assert!((hz - 400.0).abs() < 1.0, "dominant {hz}");
    }

    #[test]
    fn test_inspect_bytes_rejects_garbage() {
        let err = inspect_bytes("x.wav", b"not a wav file at all").unwrap_err();
        assert!(matches!(err, AudioError::MalformedWav { .. }));
    }

    #[test]
    fn test_run_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.wav");
        let err = run(path.to_str().unwrap(), false).unwrap_err();
        assert!(format!("{:#}", err).starts_with("inspection"));
    }

    #[test]
    fn test_run_json_on_garbage_exits_one() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.wav");
        fs::write(&path, [0u8; 60]).unwrap();
        assert_eq!(run(path.to_str().unwrap(), true).unwrap(), ExitCode::from(1));
    }
}
