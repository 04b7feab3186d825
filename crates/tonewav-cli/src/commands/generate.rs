//! Generate command implementation
//!
//! Writes a single tone file from command-line parameters.

use anyhow::{Context, Result};
use colored::Colorize;
use std::process::ExitCode;
use std::time::Instant;
use tonewav_backend_audio::{generate_to_path, GenerateResult};
use tonewav_spec::{AudioParameters, ParamError, PeriodPolicy, ToneJob};

use super::json_output::{audio_error_to_json, param_error_to_json, GenerateOutput, GeneratedFile};
use super::{STAGE_ENCODING, STAGE_VALIDATION};

/// Arguments for `tonewav generate`.
///
/// Numeric fields are signed so that negative values reach validation and
/// are reported as invalid parameters rather than argument errors.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateArgs {
    /// Destination path.
    pub output: String,
    /// Duration in whole seconds.
    pub duration_seconds: i64,
    /// Samples per second.
    pub sample_rate_hz: i64,
    /// Tone frequency in Hz.
    pub tone_frequency_hz: i64,
    /// Period computation policy.
    pub policy: PeriodPolicy,
}

impl GenerateArgs {
    /// Validates the arguments into a job.
    pub fn to_job(&self) -> Result<ToneJob, ParamError> {
        let params = AudioParameters::from_signed(
            self.duration_seconds,
            self.sample_rate_hz,
            self.tone_frequency_hz,
        )?;
        Ok(ToneJob::new(self.output.as_str(), params)?.with_policy(self.policy))
    }
}

/// Run the generate command
///
/// # Returns
/// Exit code: 0 success, 1 on any failure
pub fn run(args: &GenerateArgs, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(args)
    } else {
        run_human(args)
    }
}

/// Run generate with human-readable (colored) output
fn run_human(args: &GenerateArgs) -> Result<ExitCode> {
    let start = Instant::now();
    let job = args.to_job().context(STAGE_VALIDATION)?;

    println!("{} {}", "Generating:".cyan().bold(), job.output().display());
    let result = generate_to_path(&job).context(STAGE_ENCODING)?;

    print_result(&result, job.parameters());
    println!(
        "\n{} in {:.1}ms",
        "Done".green().bold(),
        start.elapsed().as_secs_f64() * 1000.0
    );
    Ok(ExitCode::SUCCESS)
}

/// Run generate with machine-readable JSON output
fn run_json(args: &GenerateArgs) -> Result<ExitCode> {
    let output = match args.to_job() {
        Err(e) => GenerateOutput::failure(vec![param_error_to_json(&e)]),
        Ok(job) => match generate_to_path(&job) {
            Ok(result) => {
                GenerateOutput::success(GeneratedFile::from_result(&result, job.parameters()))
            }
            Err(e) => GenerateOutput::failure(vec![audio_error_to_json(&e, STAGE_ENCODING)]),
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

fn print_result(result: &GenerateResult, params: &AudioParameters) {
    println!(
        "  {} {} s @ {} Hz, {} Hz tone",
        "Tone:".dimmed(),
        params.duration_seconds(),
        params.sample_rate_hz(),
        params.tone_frequency_hz()
    );
    println!("  {} {}", "Policy:".dimmed(), result.policy);
    match result.policy.rendered_frequency_hz(params) {
        Some(hz) if (hz - f64::from(params.tone_frequency_hz())).abs() > 1e-9 => println!(
            "  {} {:.2} Hz ({} samples per period)",
            "Rendered:".yellow(),
            hz,
            result.period_samples
        ),
        Some(_) => {}
        None => println!("  {} period is zero, output is silence", "Rendered:".yellow()),
    }
    println!("  {} {}", "Samples:".dimmed(), result.num_samples);
    println!("  {} {} bytes", "Size:".dimmed(), result.file_bytes);
    println!("  {} {}", "PCM hash:".dimmed(), &result.pcm_hash[..16]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(output: &str, duration: i64, rate: i64, freq: i64) -> GenerateArgs {
        GenerateArgs {
            output: output.to_string(),
            duration_seconds: duration,
            sample_rate_hz: rate,
            tone_frequency_hz: freq,
            policy: PeriodPolicy::Legacy,
        }
    }

    #[test]
    fn test_to_job_validates() {
        let job = args("t.wav", 5, 44100, 440).to_job().unwrap();
        assert_eq!(job.parameters().file_bytes(), 441_044);

        assert!(matches!(
            args("t.wav", 0, 44100, 440).to_job(),
            Err(ParamError::NonPositive { .. })
        ));
        assert!(matches!(
            args("  ", 1, 44100, 440).to_job(),
            Err(ParamError::MissingOutputPath)
        ));
    }

    #[test]
    fn test_run_human_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        let code = run(&args(path.to_str().unwrap(), 1, 8000, 440), false).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 16_044);
    }

    #[test]
    fn test_run_human_invalid_names_stage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        let err = run(&args(path.to_str().unwrap(), 1, -8000, 440), false).unwrap_err();
        let chain = format!("{:#}", err);
        assert!(chain.starts_with("parameter validation"), "{chain}");
        assert!(chain.contains("sample_rate_hz"), "{chain}");
        assert!(!path.exists());
    }

    #[test]
    fn test_run_human_missing_directory_names_stage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("tone.wav");
        let err = run(&args(path.to_str().unwrap(), 1, 8000, 440), false).unwrap_err();
        assert!(format!("{:#}", err).starts_with("encoding"));
    }

    #[test]
    fn test_run_json_failure_exit_code() {
        let code = run(&args("t.wav", 1, 8000, 0), true).unwrap();
        assert_eq!(code, ExitCode::from(1));
    }
}
