//! Tone parameters and period policy.

use serde::{Deserialize, Serialize};

use crate::error::{ParamError, ParamField};

/// Size of the canonical PCM header in bytes.
pub const WAV_HEADER_BYTES: u64 = 44;

/// Bytes per mono 16-bit sample frame.
pub const BYTES_PER_SAMPLE: u64 = 2;

/// Largest data chunk whose RIFF `ChunkSize` (`36 + data`) still fits in a `u32`.
pub const MAX_DATA_BYTES: u64 = u32::MAX as u64 - 36;

/// Validated parameters for a single sine tone.
///
/// All three values are strictly positive, and the resulting data chunk is
/// small enough to be described by a 32-bit RIFF header. Both properties are
/// checked on construction, so holding an `AudioParameters` means synthesis
/// and encoding cannot fail on the numbers themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawAudioParameters", into = "RawAudioParameters")]
pub struct AudioParameters {
    duration_seconds: u32,
    sample_rate_hz: u32,
    tone_frequency_hz: u32,
}

impl AudioParameters {
    /// Creates validated parameters.
    ///
    /// # Example
    /// ```
    /// use tonewav_spec::AudioParameters;
    ///
    /// let params = AudioParameters::new(5, 44100, 440).unwrap();
    /// assert_eq!(params.num_samples(), 220_500);
    /// assert!(AudioParameters::new(0, 44100, 440).is_err());
    /// ```
    pub fn new(
        duration_seconds: u32,
        sample_rate_hz: u32,
        tone_frequency_hz: u32,
    ) -> Result<Self, ParamError> {
        Self::from_signed(
            duration_seconds.into(),
            sample_rate_hz.into(),
            tone_frequency_hz.into(),
        )
    }

    /// Creates validated parameters from signed values, as read from text input.
    ///
    /// Fields are checked in order duration, sample rate, frequency; the first
    /// failure is returned.
    pub fn from_signed(
        duration_seconds: i64,
        sample_rate_hz: i64,
        tone_frequency_hz: i64,
    ) -> Result<Self, ParamError> {
        let duration_seconds = validate_positive(ParamField::DurationSeconds, duration_seconds)?;
        let sample_rate_hz = validate_positive(ParamField::SampleRateHz, sample_rate_hz)?;
        let tone_frequency_hz = validate_positive(ParamField::ToneFrequencyHz, tone_frequency_hz)?;

        let data_bytes = u64::from(duration_seconds) * u64::from(sample_rate_hz) * BYTES_PER_SAMPLE;
        if data_bytes > MAX_DATA_BYTES {
            return Err(ParamError::RiffSizeOverflow {
                duration_seconds,
                sample_rate_hz,
                data_bytes,
                limit: MAX_DATA_BYTES,
            });
        }

        Ok(Self {
            duration_seconds,
            sample_rate_hz,
            tone_frequency_hz,
        })
    }

    /// Duration in whole seconds.
    pub fn duration_seconds(&self) -> u32 {
        self.duration_seconds
    }

    /// Sample rate in Hz.
    pub fn sample_rate_hz(&self) -> u32 {
        self.sample_rate_hz
    }

    /// Tone frequency in Hz.
    pub fn tone_frequency_hz(&self) -> u32 {
        self.tone_frequency_hz
    }

    /// Number of mono samples: `duration × sample_rate`.
    pub fn num_samples(&self) -> u64 {
        u64::from(self.duration_seconds) * u64::from(self.sample_rate_hz)
    }

    /// Size of the `data` chunk payload in bytes.
    pub fn data_bytes(&self) -> u32 {
        // Bounded by MAX_DATA_BYTES at construction.
        (self.num_samples() * BYTES_PER_SAMPLE) as u32
    }

    /// Size of the complete WAV file in bytes.
    pub fn file_bytes(&self) -> u64 {
        WAV_HEADER_BYTES + u64::from(self.data_bytes())
    }
}

/// Unvalidated wire form of [`AudioParameters`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawAudioParameters {
    duration_seconds: i64,
    sample_rate_hz: i64,
    tone_frequency_hz: i64,
}

impl TryFrom<RawAudioParameters> for AudioParameters {
    type Error = ParamError;

    fn try_from(raw: RawAudioParameters) -> Result<Self, Self::Error> {
        Self::from_signed(raw.duration_seconds, raw.sample_rate_hz, raw.tone_frequency_hz)
    }
}

impl From<AudioParameters> for RawAudioParameters {
    fn from(params: AudioParameters) -> Self {
        Self {
            duration_seconds: params.duration_seconds.into(),
            sample_rate_hz: params.sample_rate_hz.into(),
            tone_frequency_hz: params.tone_frequency_hz.into(),
        }
    }
}

/// Validate that a value is strictly positive and fits in a `u32`.
///
/// # Example
/// ```
/// use tonewav_spec::params::validate_positive;
/// use tonewav_spec::ParamField;
///
/// assert_eq!(validate_positive(ParamField::SampleRateHz, 8000), Ok(8000));
/// assert!(validate_positive(ParamField::SampleRateHz, 0).is_err());
/// ```
pub fn validate_positive(field: ParamField, value: i64) -> Result<u32, ParamError> {
    if value <= 0 {
        return Err(ParamError::NonPositive { field, value });
    }
    u32::try_from(value).map_err(|_| ParamError::OutOfRange { field, value })
}

/// How the sine period is derived from sample rate and tone frequency.
///
/// `Legacy` divides the two integers before the period enters the phase
/// formula, so the rendered pitch is `sample_rate / (sample_rate / frequency)`
/// rather than `frequency` whenever the division is inexact. It is the
/// default because it reproduces the historical output byte for byte.
/// `Exact` uses real division and renders the requested pitch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodPolicy {
    /// Integer-truncated period, matching historical output.
    #[default]
    Legacy,
    /// Real-valued period.
    Exact,
}

impl PeriodPolicy {
    /// Returns the policy name used on the command line and in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodPolicy::Legacy => "legacy",
            PeriodPolicy::Exact => "exact",
        }
    }

    /// Returns the period length in samples for the given parameters.
    ///
    /// Under `Legacy` this is 0 when the frequency exceeds the sample rate.
    pub fn period_samples(&self, params: &AudioParameters) -> f64 {
        match self {
            PeriodPolicy::Legacy => f64::from(params.sample_rate_hz / params.tone_frequency_hz),
            PeriodPolicy::Exact => {
                f64::from(params.sample_rate_hz) / f64::from(params.tone_frequency_hz)
            }
        }
    }

    /// Returns the pitch the policy actually renders, or `None` when the
    /// period is zero and the output is silence.
    pub fn rendered_frequency_hz(&self, params: &AudioParameters) -> Option<f64> {
        let period = self.period_samples(params);
        if period > 0.0 {
            Some(f64::from(params.sample_rate_hz) / period)
        } else {
            None
        }
    }
}

impl std::fmt::Display for PeriodPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PeriodPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "legacy" => Ok(PeriodPolicy::Legacy),
            "exact" => Ok(PeriodPolicy::Exact),
            other => Err(format!(
                "unknown period policy '{}' (expected 'legacy' or 'exact')",
                other
            )),
        }
    }
}
