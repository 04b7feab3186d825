//! Signal metrics for written tone files.

use rustfft::{num_complex::Complex, FftPlanner};
use serde::Serialize;

/// Largest FFT used for frequency estimation.
const MAX_FFT_SIZE: usize = 65536;

/// Bins below this frequency are ignored when searching for the peak.
const MIN_FREQUENCY_HZ: f64 = 20.0;

/// Fewer samples than this yield no frequency estimate.
const MIN_ANALYSIS_SAMPLES: usize = 64;

/// Level reported for digital silence.
pub const SILENCE_DB: f64 = -120.0;

/// Summary metrics for a block of PCM samples.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToneMetrics {
    /// Peak level in dBFS.
    pub peak_db: f64,
    /// RMS level in dBFS.
    pub rms_db: f64,
    /// Frequency of the strongest spectral component, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dominant_frequency_hz: Option<f64>,
    /// True when every sample is zero.
    pub silent: bool,
}

/// Computes level and frequency metrics.
pub fn analyze(samples: &[i16], sample_rate: u32) -> ToneMetrics {
    let normalized: Vec<f32> = samples.iter().map(|&s| s as f32 / 32768.0).collect();
    let silent = samples.iter().all(|&s| s == 0);

    ToneMetrics {
        peak_db: peak_db(&normalized),
        rms_db: rms_db(&normalized),
        dominant_frequency_hz: if silent {
            None
        } else {
            dominant_frequency(&normalized, sample_rate)
        },
        silent,
    }
}

fn to_db(linear: f64) -> f64 {
    if linear <= 0.0 {
        SILENCE_DB
    } else {
        (20.0 * linear.log10()).max(SILENCE_DB)
    }
}

fn peak_db(samples: &[f32]) -> f64 {
    let peak = samples.iter().fold(0.0f32, |acc, &s| acc.max(s.abs()));
    to_db(peak as f64)
}

fn rms_db(samples: &[f32]) -> f64 {
    if samples.is_empty() {
        return SILENCE_DB;
    }
    let sum_sq: f64 = samples.iter().map(|&s| (s as f64) * (s as f64)).sum();
    to_db((sum_sq / samples.len() as f64).sqrt())
}

/// Estimates the dominant frequency with a Hann-windowed FFT.
///
/// The peak bin is refined by parabolic interpolation over log magnitudes.
pub fn dominant_frequency(samples: &[f32], sample_rate: u32) -> Option<f64> {
    if samples.len() < MIN_ANALYSIS_SAMPLES {
        return None;
    }

    let fft_size = samples.len().next_power_of_two().min(MAX_FFT_SIZE);
    let window_len = samples.len().min(fft_size);

    let mut planner = FftPlanner::<f32>::new();
    let fft = planner.plan_fft_forward(fft_size);

    // Hann window over the real samples, zero-padded to the FFT size
    let mut buffer: Vec<Complex<f32>> = samples
        .iter()
        .take(window_len)
        .enumerate()
        .map(|(i, &s)| {
            let window =
                0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / window_len as f32).cos());
            Complex::new(s * window, 0.0)
        })
        .collect();
    buffer.resize(fft_size, Complex::new(0.0, 0.0));

    fft.process(&mut buffer);

    let nyquist = fft_size / 2;
    let freq_resolution = sample_rate as f64 / fft_size as f64;
    let min_bin = ((MIN_FREQUENCY_HZ / freq_resolution).ceil() as usize).max(1);

    let magnitudes: Vec<f64> = buffer
        .iter()
        .take(nyquist)
        .map(|c| (c.re as f64).hypot(c.im as f64))
        .collect();

    let (max_bin, max_magnitude) = magnitudes
        .iter()
        .enumerate()
        .skip(min_bin)
        .fold((0usize, 0.0f64), |best, (i, &m)| if m > best.1 { (i, m) } else { best });

    if max_magnitude <= 0.0 {
        return None;
    }

    let offset = if max_bin > 0 && max_bin + 1 < nyquist {
        let left = magnitudes[max_bin - 1].max(f64::MIN_POSITIVE).ln();
        let center = max_magnitude.ln();
        let right = magnitudes[max_bin + 1].max(f64::MIN_POSITIVE).ln();
        let denominator = left - 2.0 * center + right;
        if denominator.abs() > f64::EPSILON {
            (0.5 * (left - right) / denominator).clamp(-0.5, 0.5)
        } else {
            0.0
        }
    } else {
        0.0
    };

    Some((max_bin as f64 + offset) * freq_resolution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonewav_backend_audio::synthesize;
    use tonewav_spec::{AudioParameters, PeriodPolicy};

    fn metrics(rate: u32, freq: u32, policy: PeriodPolicy) -> ToneMetrics {
        let params = AudioParameters::new(1, rate, freq).unwrap();
        analyze(&synthesize(&params, policy), rate)
    }

    #[test]
    fn test_dominant_frequency_follows_policy() {
        let legacy = metrics(44100, 1000, PeriodPolicy::Legacy);
        let exact = metrics(44100, 1000, PeriodPolicy::Exact);

        // Legacy truncates the period to 44 samples: 44100 / 44 = 1002.27 Hz
        let legacy_hz = legacy.dominant_frequency_hz.unwrap();
        let exact_hz = exact.dominant_frequency_hz.unwrap();
        assert!((legacy_hz - 44100.0 / 44.0).abs() < 1.0, "legacy {legacy_hz}");
        assert!((exact_hz - 1000.0).abs() < 1.0, "exact {exact_hz}");
    }

    #[test]
    fn test_full_scale_levels() {
        let m = metrics(44100, 441, PeriodPolicy::Legacy);
        assert!(m.peak_db > -0.01 && m.peak_db <= 0.0, "peak {}", m.peak_db);
        // Full-scale sine RMS is about -3.01 dBFS
        assert!((m.rms_db + 3.01).abs() < 0.05, "rms {}", m.rms_db);
        assert!(!m.silent);
    }

    #[test]
    fn test_silent_tone() {
        let m = metrics(8000, 8000, PeriodPolicy::Legacy);
        assert!(m.silent);
        assert_eq!(m.peak_db, SILENCE_DB);
        assert_eq!(m.rms_db, SILENCE_DB);
        assert!(m.dominant_frequency_hz.is_none());
    }

    #[test]
    fn test_too_short_for_frequency() {
        let samples = vec![0.5f32; 10];
        assert!(dominant_frequency(&samples, 8000).is_none());
    }
}
