//! Zero-phase moving-average smoothing.
//!
//! The filter runs a rectangular window forward over the data and then
//! backward over the result, which cancels the group delay of each pass. Edge
//! handling is the usual filtfilt scheme: the input is extended at both ends
//! by an odd reflection of `3 * window` samples, and each pass starts in the
//! steady state of its first input sample.

use crate::error::{Result, SignalError};

/// Number of reflected samples added at each end for a window of `window`.
#[inline]
fn pad_len(window: usize) -> usize {
    3 * window
}

/// Forward-backward moving average of length `window`, unit DC gain.
pub fn moving_average_zero_phase(x: &[f64], window: usize) -> Result<Vec<f64>> {
    if window == 0 {
        return Err(SignalError::Domain {
            name: "smoothing_window",
            value: 0f64,
        });
    }
    let pad = pad_len(window);
    if x.len() <= pad {
        return Err(SignalError::FilterTooLong {
            window,
            len: x.len(),
        });
    }

    let extended = odd_extension(x, pad);

    let mut y = causal_moving_average(&extended, window);
    y.reverse();
    let mut y = causal_moving_average(&y, window);
    y.reverse();

    y.truncate(pad + x.len());
    y.drain(..pad);
    Ok(y)
}

/// `x` with `pad` samples on each side, reflected through the end points.
fn odd_extension(x: &[f64], pad: usize) -> Vec<f64> {
    let first = x[0];
    let last = x[x.len() - 1];

    let mut ext = Vec::with_capacity(x.len() + 2 * pad);
    ext.extend(x[1..=pad].iter().rev().map(|&x_i| 2f64 * first - x_i));
    ext.extend_from_slice(x);
    ext.extend(
        x[x.len() - 1 - pad..x.len() - 1]
            .iter()
            .rev()
            .map(|&x_i| 2f64 * last - x_i),
    );
    ext
}

/// Running mean of the last `window` samples, as if the input had always
/// held its first value before the start.
fn causal_moving_average(samples: &[f64], window: usize) -> Vec<f64> {
    let Some(&initial) = samples.first() else {
        return vec![];
    };
    let len = window as f64;

    let mut acc = initial * len;
    samples
        .iter()
        .enumerate()
        .map(|(n, &x_n)| {
            let oldest = if n >= window {
                samples[n - window]
            } else {
                initial
            };
            acc += x_n - oldest;
            acc / len
        })
        .collect()
}
