//! One-sided spectral estimation.
//!
//! Spectra here are FFT magnitudes normalized by the signal length, keeping
//! exactly the first `floor(N / 2)` bins for every `N`, odd or even. For even
//! `N` that drops the Nyquist bin; for odd `N` it drops the last positive
//! frequency.

use itertools::Itertools;
use num_complex::Complex;
use realfft::RealFftPlanner;

use crate::{
    error::{Result, SignalError, ensure_positive},
    filters::moving_average_zero_phase,
};

/// Moving-average length applied to code spectra unless told otherwise.
pub const DEFAULT_SMOOTHING_WINDOW: usize = 500;

/// `|FFT(signal)| / N`, bins `0..floor(N / 2)`.
pub fn magnitude_spectrum(signal: &[f64]) -> Result<Vec<f64>> {
    let n = signal.len();
    if n == 0 {
        return Err(SignalError::Domain {
            name: "signal length",
            value: 0f64,
        });
    }

    let mut planner = RealFftPlanner::<f64>::new();
    let r2c = planner.plan_fft_forward(n);

    let mut input = signal.to_vec();
    let mut output: Vec<Complex<f64>> = r2c.make_output_vec();
    r2c.process(&mut input, &mut output)?;

    log::trace!("FFT of {n} samples, keeping {} bins", n / 2);

    let len = n as f64;
    Ok(output
        .into_iter()
        .take(n / 2)
        .map(|c| (c / len).norm())
        .collect())
}

/// One-sided magnitude spectrum, smoothed by a zero-phase moving average of
/// `smoothing_window` bins when one is given.
///
/// Smoothing needs more than `3 * window` bins, so the signal must have more
/// than `6 * window` samples; shorter signals return
/// [`SignalError::FilterTooLong`].
pub fn power_spectrum(signal: &[f64], smoothing_window: Option<usize>) -> Result<Vec<f64>> {
    let spectrum = magnitude_spectrum(signal)?;
    match smoothing_window {
        // Odd reflection at the edges can dip below zero.
        Some(window) => Ok(moving_average_zero_phase(&spectrum, window)?
            .into_iter()
            .map(|m| m.max(0f64))
            .collect()),
        None => Ok(spectrum),
    }
}

/// Frequency in Hz of each bin of a one-sided spectrum of `signal_length`
/// samples taken at `sample_rate`.
pub fn frequency_axis(sample_rate: f64, signal_length: usize) -> Result<Vec<f64>> {
    let sample_rate = ensure_positive("sample_rate", sample_rate)?;
    let period = signal_length as f64 / sample_rate;

    Ok((0..signal_length / 2).map(|i| i as f64 / period).collect())
}

/// Frequency of the strongest bin, or `None` for an empty spectrum.
pub fn peak_frequency(freq_axis: &[f64], spectrum: &[f64]) -> Result<Option<f64>> {
    if freq_axis.len() != spectrum.len() {
        return Err(SignalError::ShapeMismatch {
            expected: freq_axis.len(),
            actual: spectrum.len(),
        });
    }
    Ok(spectrum
        .iter()
        .position_max_by(|a, b| a.total_cmp(b))
        .map(|idx| freq_axis[idx]))
}
