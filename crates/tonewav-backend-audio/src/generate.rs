//! Main entry point for tone generation.
//!
//! This module takes a [`ToneJob`] and writes its WAV file. The file is
//! encoded into a temporary sibling and renamed into place only after every
//! byte was written, so a failed run never leaves a truncated file at the
//! requested path.

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tonewav_spec::{PeriodPolicy, ToneJob};
use tracing::{debug, info};

use crate::error::{AudioError, AudioResult};
use crate::synthesis::synthesize;
use crate::wav::{encode, pcm_hash_samples};

/// Result of tone generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateResult {
    /// Path the file was written to.
    pub path: PathBuf,
    /// Number of samples in the data chunk.
    pub num_samples: u64,
    /// Size of the written file in bytes.
    pub file_bytes: u64,
    /// BLAKE3 hash of the PCM data only.
    pub pcm_hash: String,
    /// Period policy used for synthesis.
    pub policy: PeriodPolicy,
    /// Period length in samples that the policy produced.
    pub period_samples: f64,
}

/// Generates a tone and writes it to the job's output path.
///
/// # Arguments
/// * `job` - Parameters, policy, and destination
///
/// # Returns
/// Metadata about the written file, or an encode error. On error nothing is
/// left at the destination path.
pub fn generate_to_path(job: &ToneJob) -> AudioResult<GenerateResult> {
    let params = job.parameters();
    let policy = job.policy();
    let path = job.output();

    info!(
        path = %path.display(),
        duration_seconds = params.duration_seconds(),
        sample_rate_hz = params.sample_rate_hz(),
        tone_frequency_hz = params.tone_frequency_hz(),
        policy = %policy,
        "generating tone"
    );

    let samples = synthesize(params, policy);
    debug!(samples = samples.len(), "synthesized samples");

    write_atomically(path, |writer| encode(params, &samples, writer))?;

    let result = GenerateResult {
        path: path.to_path_buf(),
        num_samples: params.num_samples(),
        file_bytes: params.file_bytes(),
        pcm_hash: pcm_hash_samples(&samples),
        policy,
        period_samples: policy.period_samples(params),
    };
    info!(path = %path.display(), bytes = result.file_bytes, "wrote WAV file");
    Ok(result)
}

/// Runs `write` against a temporary file next to `path`, then renames it into place.
fn write_atomically<F>(path: &Path, write: F) -> AudioResult<()>
where
    F: FnOnce(&mut dyn Write) -> AudioResult<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let temp = NamedTempFile::new_in(dir).map_err(AudioError::Encode)?;

    {
        let mut writer = BufWriter::new(temp.as_file());
        write(&mut writer)?;
        writer.flush().map_err(AudioError::Encode)?;
    }
    temp.as_file().sync_all().map_err(AudioError::Encode)?;

    temp.persist(path).map_err(|e| AudioError::Encode(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wav::{compute_pcm_hash, WavHeader};
    use tonewav_spec::AudioParameters;

    fn job(path: &Path, duration: u32, rate: u32, freq: u32) -> ToneJob {
        ToneJob::new(path, AudioParameters::new(duration, rate, freq).unwrap()).unwrap()
    }

    #[test]
    fn test_generate_writes_canonical_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");

        let result = generate_to_path(&job(&path, 1, 8000, 440)).unwrap();
        let bytes = std::fs::read(&path).unwrap();

        assert_eq!(result.path, path);
        assert_eq!(result.num_samples, 8000);
        assert_eq!(result.file_bytes, bytes.len() as u64);
        assert_eq!(bytes.len(), 44 + 16000);
        assert_eq!(WavHeader::parse(&bytes).unwrap().sample_rate, 8000);
        assert_eq!(compute_pcm_hash(&bytes).unwrap(), result.pcm_hash);
    }

    #[test]
    fn test_generate_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        std::fs::write(&path, b"stale").unwrap();

        generate_to_path(&job(&path, 1, 8000, 440)).unwrap();
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 16044);
    }

    #[test]
    fn test_generate_reports_policy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exact.wav");
        let job = job(&path, 1, 44100, 1000).with_policy(PeriodPolicy::Exact);

        let result = generate_to_path(&job).unwrap();
        assert_eq!(result.policy, PeriodPolicy::Exact);
        assert!((result.period_samples - 44.1).abs() < 1e-9);
    }

    #[test]
    fn test_generate_into_missing_directory_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no").join("such").join("dir").join("tone.wav");

        let err = generate_to_path(&job(&path, 1, 8000, 440)).unwrap_err();
        assert!(matches!(err, AudioError::Encode(_)));
        assert!(!path.exists());
    }

    #[test]
    fn test_generate_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        generate_to_path(&job(&path, 1, 8000, 440)).unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
