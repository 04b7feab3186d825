//! Error types for tone parameter validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable error codes for parameter validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// E001: Parameter is zero or negative
    NonPositiveParameter,
    /// E002: Parameter does not fit the stored integer width
    ParameterOutOfRange,
    /// E003: Encoded data would overflow the 32-bit RIFF size fields
    RiffSizeOverflow,
    /// E004: Output path missing or empty
    MissingOutputPath,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::NonPositiveParameter => "E001",
            ErrorCode::ParameterOutOfRange => "E002",
            ErrorCode::RiffSizeOverflow => "E003",
            ErrorCode::MissingOutputPath => "E004",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Names one of the three numeric tone parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamField {
    /// Length of the tone in seconds.
    DurationSeconds,
    /// Samples per second.
    SampleRateHz,
    /// Frequency of the synthesized sine.
    ToneFrequencyHz,
}

impl ParamField {
    /// Returns the field name as it appears in parameter files and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamField::DurationSeconds => "duration_seconds",
            ParamField::SampleRateHz => "sample_rate_hz",
            ParamField::ToneFrequencyHz => "tone_frequency_hz",
        }
    }
}

impl std::fmt::Display for ParamField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A rejected tone parameter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    /// Value is zero or negative.
    #[error("{field} must be greater than zero, got {value}")]
    NonPositive {
        /// The offending field.
        field: ParamField,
        /// The rejected value.
        value: i64,
    },

    /// Value is positive but larger than the field can hold.
    #[error("{field} is out of range: {value}")]
    OutOfRange {
        /// The offending field.
        field: ParamField,
        /// The rejected value.
        value: i64,
    },

    /// The data chunk would not fit a 32-bit RIFF size field.
    #[error(
        "{duration_seconds} s at {sample_rate_hz} Hz needs {data_bytes} data bytes, \
         exceeding the RIFF limit of {limit}"
    )]
    RiffSizeOverflow {
        /// Requested duration.
        duration_seconds: u32,
        /// Requested sample rate.
        sample_rate_hz: u32,
        /// Bytes the data chunk would need.
        data_bytes: u64,
        /// Largest data chunk a RIFF header can describe.
        limit: u64,
    },

    /// No output file name was given.
    #[error("output path is missing or empty")]
    MissingOutputPath,
}

impl ParamError {
    /// Returns the stable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ParamError::NonPositive { .. } => ErrorCode::NonPositiveParameter,
            ParamError::OutOfRange { .. } => ErrorCode::ParameterOutOfRange,
            ParamError::RiffSizeOverflow { .. } => ErrorCode::RiffSizeOverflow,
            ParamError::MissingOutputPath => ErrorCode::MissingOutputPath,
        }
    }

    /// Returns the field this error is about, if it concerns a single field.
    pub fn field(&self) -> Option<ParamField> {
        match self {
            ParamError::NonPositive { field, .. } | ParamError::OutOfRange { field, .. } => {
                Some(*field)
            }
            ParamError::RiffSizeOverflow { .. } => Some(ParamField::DurationSeconds),
            ParamError::MissingOutputPath => None,
        }
    }
}

/// Common trait for backend errors.
///
/// Backends expose a stable code and a category so the CLI can report
/// failures uniformly without knowing each backend's error type.
pub trait BackendError: std::error::Error {
    /// Get the error code for reporting (e.g. "AUDIO_001").
    fn code(&self) -> &'static str;

    /// Get a human-readable message describing the error.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Get the error category for grouping related errors.
    fn category(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(ErrorCode::NonPositiveParameter.code(), "E001");
        assert_eq!(ErrorCode::ParameterOutOfRange.code(), "E002");
        assert_eq!(ErrorCode::RiffSizeOverflow.code(), "E003");
        assert_eq!(ErrorCode::MissingOutputPath.code(), "E004");
    }

    #[test]
    fn test_non_positive_message_names_field() {
        let err = ParamError::NonPositive {
            field: ParamField::SampleRateHz,
            value: -3,
        };
        assert_eq!(err.to_string(), "sample_rate_hz must be greater than zero, got -3");
        assert_eq!(err.code(), ErrorCode::NonPositiveParameter);
        assert_eq!(err.field(), Some(ParamField::SampleRateHz));
    }

    #[test]
    fn test_missing_path_has_no_field() {
        let err = ParamError::MissingOutputPath;
        assert_eq!(err.field(), None);
        assert_eq!(err.code().to_string(), "E004");
    }

    #[test]
    fn test_param_field_serializes_snake_case() {
        let json = serde_json::to_string(&ParamField::ToneFrequencyHz).unwrap();
        assert_eq!(json, "\"tone_frequency_hz\"");
    }
}
