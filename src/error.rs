//! Error types for signal synthesis and spectral estimation.

use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, SignalError>;

/// Errors raised while building or analysing a signal.
///
/// Every error aborts the current computation; nothing is retried and no
/// partial output is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SignalError {
    /// A rate, duration, window or step is non-positive or not finite.
    #[error("`{name}` must be positive and finite, got {value}")]
    Domain { name: &'static str, value: f64 },

    /// The sampler asked for a chip past the end of the chip sequence.
    #[error("chip index {index} out of range for a sequence of {len} chips")]
    IndexOutOfRange { index: usize, len: usize },

    /// Two sequences combined elementwise have different lengths.
    #[error("length mismatch: expected {expected} samples, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// The smoothing window needs more bins than the spectrum has.
    #[error("smoothing window of {window} needs more than {} bins, got {len}", 3 * .window)]
    FilterTooLong { window: usize, len: usize },

    /// The FFT backend rejected its buffers.
    #[error("FFT failed: {0}")]
    Fft(String),
}

impl From<realfft::FftError> for SignalError {
    fn from(err: realfft::FftError) -> Self {
        SignalError::Fft(err.to_string())
    }
}

/// Checks that `value` is a usable rate or duration.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0f64 {
        Ok(value)
    } else {
        Err(SignalError::Domain { name, value })
    }
}
