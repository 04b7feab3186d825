//! Run command implementation
//!
//! Reads a parameter file, writes the tone, then streams the written file to
//! standard output. Because stdout carries audio, every human-readable line
//! goes to stderr. With `--json` nothing is streamed and stdout carries the
//! JSON report instead.

use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;
use tonewav_backend_audio::{generate_to_path, play_file, GenerateResult};
use tonewav_spec::PeriodPolicy;
use tracing::info;

use super::json_output::{
    audio_error_to_json, input_error_to_json, GeneratedFile, ParamSource, RunOutput,
};
use super::{STAGE_ENCODING, STAGE_PLAYBACK, STAGE_VALIDATION};
use crate::input::{load_job, PolicyOrigin, SourceKind};

/// What a run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// The written file.
    pub generated: GenerateResult,
    /// Format the parameter file was parsed as.
    pub source_kind: SourceKind,
    /// Where the period policy came from.
    pub policy_origin: PolicyOrigin,
    /// Bytes forwarded to the sink, if playback ran.
    pub bytes_played: Option<u64>,
}

/// Run the run command
///
/// # Arguments
/// * `params_file` - Path to the parameter file (text or JSON)
/// * `no_play` - Skip streaming to stdout
/// * `policy` - Overrides the policy named in the file, if any
/// * `json_output` - Print a JSON report instead of streaming
///
/// # Returns
/// Exit code: 0 success, 1 on any failure
pub fn run(
    params_file: &str,
    no_play: bool,
    policy: Option<PeriodPolicy>,
    json_output: bool,
) -> Result<ExitCode> {
    if json_output {
        return run_json(Path::new(params_file), policy);
    }

    let summary = if no_play {
        execute::<io::Stdout>(Path::new(params_file), policy, None)?
    } else {
        let stdout = io::stdout();
        let mut sink = stdout.lock();
        execute(Path::new(params_file), policy, Some(&mut sink))?
    };

    eprintln!(
        "{} {} ({} bytes)",
        "Wrote".green().bold(),
        summary.generated.path.display(),
        summary.generated.file_bytes
    );
    eprintln!(
        "  {} {} (from {}), {} parameter file",
        "Policy:".dimmed(),
        summary.generated.policy,
        summary.policy_origin,
        summary.source_kind
    );
    if let Some(bytes) = summary.bytes_played {
        eprintln!("{} {} bytes", "Streamed".green().bold(), bytes);
    }
    Ok(ExitCode::SUCCESS)
}

/// Run with machine-readable JSON output; the file is written but not streamed
fn run_json(params_file: &Path, policy: Option<PeriodPolicy>) -> Result<ExitCode> {
    let output = match load_job(params_file, policy) {
        Err(e) => RunOutput::failure(None, vec![input_error_to_json(&e)]),
        Ok(loaded) => {
            let source = ParamSource::from_param_file(params_file, &loaded);
            match generate_to_path(&loaded.job) {
                Ok(result) => RunOutput::success(
                    source,
                    GeneratedFile::from_result(&result, loaded.job.parameters()),
                ),
                Err(e) => {
                    RunOutput::failure(Some(source), vec![audio_error_to_json(&e, STAGE_ENCODING)])
                }
            }
        }
    };

    let json = serde_json::to_string_pretty(&output).context("Failed to serialize output")?;
    println!("{}", json);

    Ok(if output.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

/// Loads, generates, and optionally forwards the file to `sink`.
///
/// Each stage's failure carries that stage's name as context.
pub fn execute<W: Write>(
    params_file: &Path,
    policy: Option<PeriodPolicy>,
    sink: Option<&mut W>,
) -> Result<RunSummary> {
    let loaded = load_job(params_file, policy).context(STAGE_VALIDATION)?;
    let job = &loaded.job;
    let generated = generate_to_path(job).context(STAGE_ENCODING)?;

    let bytes_played = match sink {
        Some(sink) => {
            info!(path = %job.output().display(), "streaming file to playback sink");
            Some(play_file(job.output(), sink).context(STAGE_PLAYBACK)?)
        }
        None => None,
    };

    Ok(RunSummary {
        generated,
        source_kind: loaded.source_kind,
        policy_origin: loaded.policy_origin,
        bytes_played,
    })
}
