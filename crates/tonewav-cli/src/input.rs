//! Loading tone jobs from parameter files.
//!
//! Two formats are accepted, chosen by file extension:
//!
//! - **Text** (any extension other than `.json`): four lines holding the
//!   output path, sample rate, tone frequency, and duration, in that order.
//! - **JSON** (`.json`): an object with `output`, `sample_rate_hz`,
//!   `tone_frequency_hz`, `duration_seconds`, and an optional `policy`.

use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tonewav_spec::{AudioParameters, ParamError, PeriodPolicy, ToneJob};
use tracing::debug;

/// Recognized JSON extensions.
pub const JSON_EXTENSIONS: &[&str] = &["json"];

/// Identifies the format of a parameter file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Line-oriented text file.
    Text,
    /// JSON object.
    Json,
}

impl SourceKind {
    /// Picks the format from a file extension.
    pub fn from_path(path: &Path) -> Self {
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| JSON_EXTENSIONS.iter().any(|j| e.eq_ignore_ascii_case(j)))
            .unwrap_or(false);
        if is_json {
            SourceKind::Json
        } else {
            SourceKind::Text
        }
    }

    /// Returns the string representation for reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Text => "text",
            SourceKind::Json => "json",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors from reading a parameter file.
#[derive(Debug, Error)]
pub enum InputError {
    /// The file could not be read.
    #[error("failed to read parameter file '{}': {source}", path.display())]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A line is missing or does not hold an integer where one is expected.
    #[error("malformed parameter file: line {line} ({field}): {message}")]
    Malformed {
        /// 1-based line number.
        line: usize,
        /// Name of the value expected on that line.
        field: &'static str,
        /// What was wrong.
        message: String,
    },

    /// The JSON document does not have the expected shape.
    #[error("malformed JSON parameter file: {0}")]
    Json(#[from] serde_json::Error),

    /// The values parsed but are not acceptable tone parameters.
    #[error("invalid parameter: {0}")]
    InvalidParameter(#[from] ParamError),
}

impl InputError {
    /// Returns true for errors in the file's shape rather than its values.
    pub fn is_malformed(&self) -> bool {
        matches!(self, InputError::Malformed { .. } | InputError::Json(_))
    }
}

/// Where a job's period policy came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyOrigin {
    /// Neither the file nor the command line named one.
    Default,
    /// The parameter file named it.
    File,
    /// A command-line flag overrode the file.
    CommandLine,
}

impl PolicyOrigin {
    /// Returns the string representation for reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyOrigin::Default => "default",
            PolicyOrigin::File => "file",
            PolicyOrigin::CommandLine => "command line",
        }
    }
}

impl std::fmt::Display for PolicyOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A parsed parameter file.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamFile {
    /// The job described by the file.
    pub job: ToneJob,
    /// Where the job's policy came from.
    pub policy_origin: PolicyOrigin,
    /// Format the file was parsed as.
    pub source_kind: SourceKind,
}

impl ParamFile {
    /// Applies a command-line policy, which beats whatever the file named.
    pub fn with_policy_override(self, policy: Option<PeriodPolicy>) -> Self {
        match policy {
            Some(policy) => Self {
                job: self.job.with_policy(policy),
                policy_origin: PolicyOrigin::CommandLine,
                ..self
            },
            None => self,
        }
    }
}

/// Field names in text-file line order.
const TEXT_FIELDS: [&str; 4] = ["output path", "sample rate", "tone frequency", "duration"];

/// Parses the four-line text format.
///
/// Lines are trimmed and anything after the fourth line is ignored.
pub fn parse_text(source: &str) -> Result<ToneJob, InputError> {
    let mut lines = source.lines().map(str::trim);

    let output = next_line(&mut lines, 0)?.to_string();
    let sample_rate = parse_integer(next_line(&mut lines, 1)?, 1)?;
    let frequency = parse_integer(next_line(&mut lines, 2)?, 2)?;
    let duration = parse_integer(next_line(&mut lines, 3)?, 3)?;

    let params = AudioParameters::from_signed(duration, sample_rate, frequency)?;
    Ok(ToneJob::new(output, params)?)
}

fn next_line<'a>(
    lines: &mut impl Iterator<Item = &'a str>,
    index: usize,
) -> Result<&'a str, InputError> {
    lines.next().ok_or_else(|| InputError::Malformed {
        line: index + 1,
        field: TEXT_FIELDS[index],
        message: "line is missing".to_string(),
    })
}

fn parse_integer(value: &str, index: usize) -> Result<i64, InputError> {
    value.parse::<i64>().map_err(|_| InputError::Malformed {
        line: index + 1,
        field: TEXT_FIELDS[index],
        message: format!("expected an integer, found '{}'", value),
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct JsonParamFile {
    output: String,
    sample_rate_hz: i64,
    tone_frequency_hz: i64,
    duration_seconds: i64,
    #[serde(default)]
    policy: Option<PeriodPolicy>,
}

/// Parses the JSON format.
///
/// Returns the job and whether the document named a policy.
pub fn parse_json(source: &str) -> Result<(ToneJob, bool), InputError> {
    let file: JsonParamFile = serde_json::from_str(source)?;
    let params = AudioParameters::from_signed(
        file.duration_seconds,
        file.sample_rate_hz,
        file.tone_frequency_hz,
    )?;
    let job = ToneJob::new(file.output, params)?;
    match file.policy {
        Some(policy) => Ok((job.with_policy(policy), true)),
        None => Ok((job, false)),
    }
}

/// Reads and parses a parameter file, dispatching on its extension.
pub fn load_param_file(path: &Path) -> Result<ParamFile, InputError> {
    let source = fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let source_kind = SourceKind::from_path(path);
    debug!(path = %path.display(), kind = %source_kind, "parsing parameter file");

    let (job, explicit_policy) = match source_kind {
        SourceKind::Text => (parse_text(&source)?, false),
        SourceKind::Json => parse_json(&source)?,
    };
    let policy_origin = if explicit_policy {
        PolicyOrigin::File
    } else {
        PolicyOrigin::Default
    };

    Ok(ParamFile {
        job,
        policy_origin,
        source_kind,
    })
}

/// Loads a parameter file, letting a command-line policy override the file's.
pub fn load_job(
    path: &Path,
    policy_override: Option<PeriodPolicy>,
) -> Result<ParamFile, InputError> {
    let file = load_param_file(path)?.with_policy_override(policy_override);
    debug!(policy = %file.job.policy(), origin = %file.policy_origin, "resolved period policy");
    Ok(file)
}
