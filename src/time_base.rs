use crate::error::{Result, ensure_positive};

/// Relative distance from an integer below which a product is treated as
/// that integer.
const SNAP_TOLERANCE: f64 = 1e-9;

/// Number of events of a `rate` process that fit in `duration`, i.e.
/// `ceil(rate * duration)`.
///
/// Products within floating-point noise of an integer are snapped to it, so
/// `0.1 * 200e6` counts exactly `20_000_000` samples.
pub(crate) fn event_count(rate: f64, duration: f64) -> usize {
    let product = rate * duration;
    let nearest = product.round();
    if (product - nearest).abs() <= SNAP_TOLERANCE * nearest.max(1f64) {
        nearest as usize
    } else {
        product.ceil() as usize
    }
}

/// Sample instants `t_k = k / sample_rate` covering `[0, duration)`.
pub fn generate_time_base(sample_rate: f64, duration: f64) -> Result<Vec<f64>> {
    let sample_rate = ensure_positive("sample_rate", sample_rate)?;
    let duration = ensure_positive("duration", duration)?;

    let num_samples = event_count(sample_rate, duration);
    log::trace!("time base: {num_samples} samples at {sample_rate} Hz");

    Ok((0..num_samples).map(|k| k as f64 / sample_rate).collect())
}
