//! Time-domain amplitude math for the audio analyser.

use crate::constants::AMPLITUDE_RMS_GAIN;

/// Root-mean-square of a time-domain sample buffer (samples in [-1, 1]).
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f32 = samples.iter().map(|v| v * v).sum();
    (sum / samples.len() as f32).sqrt()
}

/// Map a raw sample buffer to the [0, 1] amplitude scalar consumed by the
/// animators. Clamped regardless of input magnitude, so clipped or otherwise
/// pathological buffers never push dependent animation out of range.
pub fn amplitude(samples: &[f32]) -> f32 {
    (rms(samples) * AMPLITUDE_RMS_GAIN).clamp(0.0, 1.0)
}
