//! A complete tone request: where to write and what to synthesize.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::ParamError;
use crate::params::{AudioParameters, PeriodPolicy};

/// Everything needed to produce one WAV file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToneJob {
    output: PathBuf,
    parameters: AudioParameters,
    policy: PeriodPolicy,
}

impl ToneJob {
    /// Creates a job with the default period policy.
    ///
    /// Fails with [`ParamError::MissingOutputPath`] if `output` is empty or
    /// only whitespace.
    pub fn new(output: impl Into<PathBuf>, parameters: AudioParameters) -> Result<Self, ParamError> {
        let output = output.into();
        if output.as_os_str().to_string_lossy().trim().is_empty() {
            return Err(ParamError::MissingOutputPath);
        }
        Ok(Self {
            output,
            parameters,
            policy: PeriodPolicy::default(),
        })
    }

    /// Sets the period policy.
    pub fn with_policy(mut self, policy: PeriodPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Destination file path.
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Tone parameters.
    pub fn parameters(&self) -> &AudioParameters {
        &self.parameters
    }

    /// Period policy.
    pub fn policy(&self) -> PeriodPolicy {
        self.policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> AudioParameters {
        AudioParameters::new(1, 8000, 440).unwrap()
    }

    #[test]
    fn test_new_job_defaults_to_legacy() {
        let job = ToneJob::new("tone.wav", params()).unwrap();
        assert_eq!(job.output(), Path::new("tone.wav"));
        assert_eq!(job.policy(), PeriodPolicy::Legacy);
        assert_eq!(job.parameters().sample_rate_hz(), 8000);
    }

    #[test]
    fn test_empty_path_rejected() {
        assert_eq!(ToneJob::new("", params()), Err(ParamError::MissingOutputPath));
        assert_eq!(ToneJob::new("   ", params()), Err(ParamError::MissingOutputPath));
    }

    #[test]
    fn test_with_policy() {
        let job = ToneJob::new("a.wav", params())
            .unwrap()
            .with_policy(PeriodPolicy::Exact);
        assert_eq!(job.policy(), PeriodPolicy::Exact);
    }
}
