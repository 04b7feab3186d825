//! Sine tone synthesis.
//!
//! Sample `t` of a tone is `trunc(sin(2π·t / period) · 32767)`, where the
//! period comes from the job's [`PeriodPolicy`]. The float-to-`i16` cast
//! truncates toward zero and maps NaN to 0, which is what makes a zero
//! `Legacy` period (frequency above the sample rate) render as silence.

use std::f64::consts::PI;
use std::ops::Deref;

use tonewav_spec::{AudioParameters, PeriodPolicy};

/// Full-scale amplitude for 16-bit PCM.
pub const AMPLITUDE: f64 = i16::MAX as f64;

const TWO_PI: f64 = 2.0 * PI;

/// Lazy sample generator for one tone.
#[derive(Debug, Clone)]
pub struct SineTone {
    period: f64,
    next: u64,
    len: u64,
}

impl SineTone {
    /// Creates a generator yielding `params.num_samples()` samples.
    pub fn new(params: &AudioParameters, policy: PeriodPolicy) -> Self {
        Self {
            period: policy.period_samples(params),
            next: 0,
            len: params.num_samples(),
        }
    }

    /// Period length in samples used for the phase computation.
    pub fn period(&self) -> f64 {
        self.period
    }

    /// Computes sample `t` without advancing the generator.
    pub fn sample_at(&self, t: u64) -> i16 {
        let angle = TWO_PI * t as f64 / self.period;
        (angle.sin() * AMPLITUDE) as i16
    }
}

impl Iterator for SineTone {
    type Item = i16;

    fn next(&mut self) -> Option<i16> {
        if self.next >= self.len {
            return None;
        }
        let sample = self.sample_at(self.next);
        self.next += 1;
        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.len - self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SineTone {}

/// Immutable, fully materialized samples of one tone.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SampleBuffer {
    samples: Vec<i16>,
}

impl SampleBuffer {
    /// Consumes the buffer and returns the raw samples.
    pub fn into_inner(self) -> Vec<i16> {
        self.samples
    }

    /// Returns true if every sample is zero.
    pub fn is_silent(&self) -> bool {
        self.samples.iter().all(|&s| s == 0)
    }
}

impl Deref for SampleBuffer {
    type Target = [i16];

    fn deref(&self) -> &[i16] {
        &self.samples
    }
}

impl FromIterator<i16> for SampleBuffer {
    fn from_iter<I: IntoIterator<Item = i16>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

/// Synthesizes a complete tone.
///
/// # Example
/// ```
/// use tonewav_backend_audio::synthesis::synthesize;
/// use tonewav_spec::{AudioParameters, PeriodPolicy};
///
/// let params = AudioParameters::new(1, 8000, 440).unwrap();
/// let samples = synthesize(&params, PeriodPolicy::Legacy);
/// assert_eq!(samples.len(), 8000);
/// assert_eq!(samples[0], 0);
/// ```
pub fn synthesize(params: &AudioParameters, policy: PeriodPolicy) -> SampleBuffer {
    SineTone::new(params, policy).collect()
}
