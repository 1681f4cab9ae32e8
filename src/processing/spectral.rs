//! FFT low-pass filter with reflective edge padding and a half-cosine
//! roll-off mask.
//!
//! ```text
//!  data ──► reflect-pad (10% each side) ──► repeat last value up to 2^k
//!        ──► FFT ──► × mask[k] ──► conj ─► FFT ─► conj / M ──► strip padding
//! ```
//!
//! The mask runs over bins `0..M` as-is. Bins above `M / 2` (the negative
//! frequencies of a real signal) always fall beyond the cutoff, so only the
//! DC term survives at full weight; oscillating components come back at
//! half amplitude even with the widest cutoff.

use std::f64::consts::PI;

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

use crate::error::{PipelineError, Result};
use crate::processing::filter::FilterKind;

/// Fraction of the input length mirrored onto each end before the transform.
const PAD_FRACTION: f64 = 0.1;
/// Start of the roll-off band as a fraction of the cutoff bin.
const ROLL_OFF_START: f64 = 0.9;

/// Frequency mask of length `len` for `cutoff` given as a fraction of `len`.
///
/// 1 below `0.9 * cutoff_index`, a half-cosine down to 0 at `cutoff_index`,
/// 0 from there on. `cutoff_index` is at least 1 so DC always passes.
pub fn low_pass_mask(len: usize, cutoff: f64) -> Vec<f64> {
    let cutoff_index = ((len as f64 * cutoff).floor() as usize).max(1) as f64;
    let start = ROLL_OFF_START * cutoff_index;
    let width = (1.0 - ROLL_OFF_START) * cutoff_index;

    (0..len)
        .map(|k| {
            let k = k as f64;
            if k < start {
                1.0
            } else if k < cutoff_index {
                let x = (k - start) / width;
                0.5 * (1.0 + (PI * x).cos())
            } else {
                0.0
            }
        })
        .collect()
}

/// Mirror `pad` samples onto each end, then repeat the last value up to the
/// next power of two.
fn pad_for_transform(data: &[f64], pad: usize) -> Vec<f64> {
    let n = data.len();
    let mut padded: Vec<f64> = Vec::with_capacity(n + 2 * pad);
    padded.extend(data[..pad].iter().rev());
    padded.extend_from_slice(data);
    padded.extend(data[n - pad..].iter().rev());

    let len = padded.len().next_power_of_two();
    let last = padded[padded.len() - 1];
    padded.resize(len, last);
    padded
}

/// Low-pass `data` by masking its spectrum.
///
/// `cutoff_frequency` is a fraction of the transform length, normally in
/// `(0, 0.5]`.
pub fn low_pass_filter(data: &[f64], cutoff_frequency: f64) -> Result<Vec<f64>> {
    if data.is_empty() {
        return Err(PipelineError::DegenerateInput {
            filter: FilterKind::LowPassFilter,
        });
    }

    let n = data.len();
    let pad = (n as f64 * PAD_FRACTION).floor() as usize;
    let extended = pad_for_transform(data, pad);
    let m = extended.len();

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(m);

    let mut spectrum: Vec<Complex<f64>> =
        extended.iter().map(|&v| Complex::new(v, 0.0)).collect();
    fft.process(&mut spectrum);

    for (bin, weight) in spectrum.iter_mut().zip(low_pass_mask(m, cutoff_frequency)) {
        *bin = bin.scale(weight);
    }

    // Inverse through the forward plan: conj → FFT → conj, then 1/M.
    for bin in spectrum.iter_mut() {
        *bin = bin.conj();
    }
    fft.process(&mut spectrum);
    let scale = 1.0 / m as f64;

    Ok(spectrum[pad..pad + n]
        .iter()
        .map(|c| c.conj().re * scale)
        .collect())
}
