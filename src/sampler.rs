use crate::error::{Result, SignalError, ensure_positive};

/// Bipolar cycle of a square subcarrier, one entry per half period.
const SUBCARRIER_CYCLE: [f64; 2] = [1f64, -1f64];

/// Index of the code element active at each instant: `floor(t_k * rate)`.
fn element_indices(time_base: &[f64], rate: f64) -> impl Iterator<Item = usize> + '_ {
    time_base.iter().map(move |&t| (t * rate).floor() as usize)
}

/// Zero-order hold of a chip sequence onto a time base.
///
/// Sample `k` is `chips[floor(t_k * chip_rate)]`; no value is interpolated.
/// The chip sequence must cover the whole time base.
pub fn sample_at_chip_rate(time_base: &[f64], chips: &[f64], chip_rate: f64) -> Result<Vec<f64>> {
    let chip_rate = ensure_positive("chip_rate", chip_rate)?;

    element_indices(time_base, chip_rate)
        .map(|idx| {
            chips.get(idx).copied().ok_or(SignalError::IndexOutOfRange {
                index: idx,
                len: chips.len(),
            })
        })
        .collect()
}

/// Zero-order hold of a repeating `pattern`, advancing one element per
/// `1 / rate` seconds and wrapping at the end of the pattern.
pub fn sample_cyclic(time_base: &[f64], pattern: &[f64], rate: f64) -> Result<Vec<f64>> {
    let rate = ensure_positive("rate", rate)?;
    if pattern.is_empty() {
        return Err(SignalError::ShapeMismatch {
            expected: 1,
            actual: 0,
        });
    }

    Ok(element_indices(time_base, rate)
        .map(|idx| pattern[idx % pattern.len()])
        .collect())
}

/// Square subcarrier of frequency `subcarrier_rate`, sampled on `time_base`.
///
/// The subcarrier switches sign every half period, so the `[+1, -1]` cycle is
/// indexed at twice the subcarrier rate.
pub fn sample_subcarrier(time_base: &[f64], subcarrier_rate: f64) -> Result<Vec<f64>> {
    let subcarrier_rate = ensure_positive("subcarrier_rate", subcarrier_rate)?;
    sample_cyclic(time_base, &SUBCARRIER_CYCLE, 2f64 * subcarrier_rate)
}
