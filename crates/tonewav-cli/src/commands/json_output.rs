//! JSON output types for machine-readable CLI output.
//!
//! These back the `--json` flag on `generate`, `run` and `inspect`. The shape
//! is stable so scripts can consume it.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tonewav_backend_audio::{AudioError, GenerateResult, WavHeader};
use tonewav_spec::{AudioParameters, BackendError, ParamError};

use crate::analysis::ToneMetrics;
use crate::input::{InputError, ParamFile};

/// Error codes for CLI operations.
///
/// Parameter errors pass through their own `E00x` codes and backend errors
/// their `AUDIO_00x` codes.
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// Parameter file is malformed
    pub const MALFORMED_INPUT: &str = "CLI_002";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "E001", "AUDIO_002")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Stage that failed
    pub stage: String,
    /// Parameter field involved (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Line number in the parameter file (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl JsonError {
    /// Creates a new error with code, stage, and message.
    pub fn new(
        code: impl Into<String>,
        stage: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            stage: stage.into(),
            field: None,
            line: None,
        }
    }

    /// Sets the parameter field.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Sets the line number.
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

/// Converts a parameter error to JSON.
pub fn param_error_to_json(err: &ParamError) -> JsonError {
    let json = JsonError::new(err.code().code(), super::STAGE_VALIDATION, err.to_string());
    match err.field() {
        Some(field) => json.with_field(field.as_str()),
        None => json,
    }
}

/// Converts a backend error to JSON, tagging it with the stage that failed.
pub fn audio_error_to_json(err: &AudioError, stage: &str) -> JsonError {
    match err {
        AudioError::InvalidParameter(inner) => param_error_to_json(inner),
        other => JsonError::new(other.code(), stage, other.to_string()),
    }
}

/// Converts a parameter-file error to JSON.
pub fn input_error_to_json(err: &InputError) -> JsonError {
    if let InputError::InvalidParameter(inner) = err {
        return param_error_to_json(inner);
    }

    let code = if err.is_malformed() {
        error_codes::MALFORMED_INPUT
    } else {
        error_codes::FILE_READ
    };
    let json = JsonError::new(code, super::STAGE_VALIDATION, err.to_string());
    match err {
        InputError::Malformed { line, field, .. } => json.with_field(*field).with_line(*line),
        _ => json,
    }
}

/// Details of a written file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratedFile {
    /// Path the file was written to
    pub path: String,
    /// Size in bytes
    pub file_bytes: u64,
    /// Samples in the data chunk
    pub num_samples: u64,
    /// BLAKE3 hash of the PCM data
    pub pcm_hash: String,
    /// Period policy used
    pub policy: String,
    /// Period length in samples
    pub period_samples: f64,
    /// Pitch actually rendered; absent when the output is silence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rendered_frequency_hz: Option<f64>,
}

impl GeneratedFile {
    /// Builds the report from a generation result.
    pub fn from_result(result: &GenerateResult, params: &AudioParameters) -> Self {
        Self {
            path: result.path.display().to_string(),
            file_bytes: result.file_bytes,
            num_samples: result.num_samples,
            pcm_hash: result.pcm_hash.clone(),
            policy: result.policy.as_str().to_string(),
            period_samples: result.period_samples,
            rendered_frequency_hz: result.policy.rendered_frequency_hz(params),
        }
    }
}

/// Output of `generate --json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerateOutput {
    /// Whether the file was written
    pub success: bool,
    /// Errors, empty on success
    pub errors: Vec<JsonError>,
    /// Written file, present on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<GeneratedFile>,
}

impl GenerateOutput {
    /// Creates a successful output.
    pub fn success(file: GeneratedFile) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            file: Some(file),
        }
    }

    /// Creates a failed output.
    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            file: None,
        }
    }
}

/// How `run` read its parameter file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParamSource {
    /// Parameter file path
    pub path: String,
    /// Format the file was parsed as ("text" or "json")
    pub format: String,
    /// Where the period policy came from ("default", "file", "command line")
    pub policy_origin: String,
}

impl ParamSource {
    /// Describes a loaded parameter file.
    pub fn from_param_file(path: &Path, file: &ParamFile) -> Self {
        Self {
            path: path.display().to_string(),
            format: file.source_kind.as_str().to_string(),
            policy_origin: file.policy_origin.as_str().to_string(),
        }
    }
}

/// Output of `run --json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunOutput {
    /// Whether the file was written
    pub success: bool,
    /// Errors, empty on success
    pub errors: Vec<JsonError>,
    /// Parameter file details, present once the file parsed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<ParamSource>,
    /// Written file, present on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<GeneratedFile>,
}

impl RunOutput {
    /// Creates a successful output.
    pub fn success(source: ParamSource, file: GeneratedFile) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            source: Some(source),
            file: Some(file),
        }
    }

    /// Creates a failed output.
    pub fn failure(source: Option<ParamSource>, errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            source,
            file: None,
        }
    }
}

/// Header fields as reported by `inspect`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HeaderReport {
    /// RIFF chunk size
    pub chunk_size: u32,
    /// Format tag (1 = PCM)
    pub audio_format: u16,
    /// Channel count
    pub channels: u16,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Bytes per second
    pub byte_rate: u32,
    /// Bytes per sample frame
    pub block_align: u16,
    /// Bits per sample
    pub bits_per_sample: u16,
    /// Data chunk size in bytes
    pub data_size: u32,
}

impl From<&WavHeader> for HeaderReport {
    fn from(header: &WavHeader) -> Self {
        Self {
            chunk_size: header.chunk_size,
            audio_format: header.audio_format,
            channels: header.channels,
            sample_rate: header.sample_rate,
            byte_rate: header.byte_rate,
            block_align: header.block_align,
            bits_per_sample: header.bits_per_sample,
            data_size: header.data_size,
        }
    }
}

/// Result of inspecting a file.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InspectResult {
    /// Inspected path
    pub path: String,
    /// Parsed header
    pub header: HeaderReport,
    /// Samples in the data chunk
    pub num_samples: u64,
    /// Duration in seconds
    pub duration_seconds: f64,
    /// BLAKE3 hash of the PCM data
    pub pcm_hash: String,
    /// Level and frequency metrics
    pub metrics: ToneMetrics,
}

/// Output of `inspect --json`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InspectOutput {
    /// Whether the file parsed
    pub success: bool,
    /// Errors, empty on success
    pub errors: Vec<JsonError>,
    /// Inspection result, present on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<InspectResult>,
}

impl InspectOutput {
    /// Creates a successful output.
    pub fn success(result: InspectResult) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            result: Some(result),
        }
    }

    /// Creates a failed output.
    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            result: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tonewav_spec::{ParamField, PeriodPolicy};

    #[test]
    fn test_param_error_carries_code_and_field() {
        let err = ParamError::NonPositive {
            field: ParamField::SampleRateHz,
            value: -1,
        };
        let json = param_error_to_json(&err);
        assert_eq!(json.code, "E001");
        assert_eq!(json.stage, "parameter validation");
        assert_eq!(json.field.as_deref(), Some("sample_rate_hz"));
    }

    #[test]
    fn test_malformed_input_carries_line() {
        let err = InputError::Malformed {
            line: 3,
            field: "tone frequency",
            message: "line is missing".to_string(),
        };
        let json = input_error_to_json(&err);
        assert_eq!(json.code, error_codes::MALFORMED_INPUT);
        assert_eq!(json.line, Some(3));
        assert_eq!(json.field.as_deref(), Some("tone frequency"));
    }

    #[test]
    fn test_input_error_codes() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let json = input_error_to_json(&InputError::Json(json_err));
        assert_eq!(json.code, error_codes::MALFORMED_INPUT);
        assert_eq!(json.line, None);

        let read = InputError::Read {
            path: "absent.txt".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(input_error_to_json(&read).code, error_codes::FILE_READ);

        let invalid = InputError::InvalidParameter(ParamError::MissingOutputPath);
        assert_eq!(input_error_to_json(&invalid).code, "E004");
    }

    #[test]
    fn test_generated_file_reports_rendered_frequency() {
        let result = |policy: PeriodPolicy, params: &AudioParameters| GenerateResult {
            path: "t.wav".into(),
            num_samples: params.num_samples(),
            file_bytes: params.file_bytes(),
            pcm_hash: "00".repeat(32),
            policy,
            period_samples: policy.period_samples(params),
        };

        let above_rate = AudioParameters::new(1, 8000, 11000).unwrap();
        let legacy = GeneratedFile::from_result(&result(PeriodPolicy::Legacy, &above_rate), &above_rate);
        assert_eq!(legacy.rendered_frequency_hz, None);
        let value = serde_json::to_value(&legacy).unwrap();
        assert!(value.get("rendered_frequency_hz").is_none());

        let cd = AudioParameters::new(1, 44100, 1000).unwrap();
        let legacy = GeneratedFile::from_result(&result(PeriodPolicy::Legacy, &cd), &cd);
        assert_eq!(legacy.period_samples, 44.0);
        assert_eq!(legacy.rendered_frequency_hz, Some(44100.0 / 44.0));
        let exact = GeneratedFile::from_result(&result(PeriodPolicy::Exact, &cd), &cd);
        assert!((exact.rendered_frequency_hz.unwrap() - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_run_failure_before_parse_omits_source() {
        let output = RunOutput::failure(
            None,
            vec![JsonError::new(error_codes::FILE_READ, "parameter validation", "missing")],
        );
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["success"], false);
        assert!(value.get("source").is_none());
        assert!(value.get("file").is_none());
    }

    #[test]
    fn test_encode_error_uses_backend_code() {
        let err = AudioError::Encode(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let json = audio_error_to_json(&err, "encoding");
        assert_eq!(json.code, "AUDIO_002");
        assert_eq!(json.stage, "encoding");
    }

    #[test]
    fn test_failure_output_omits_file() {
        let output = GenerateOutput::failure(vec![JsonError::new("E001", "parameter validation", "bad")]);
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["success"], false);
        assert!(value.get("file").is_none());
        assert_eq!(value["errors"][0]["code"], "E001");
        assert!(value["errors"][0].get("line").is_none());
    }
}
