//! Modulation of ranging codes onto a carrier.
//!
//! Every code type goes through the same path: draw a chip sequence, hold it
//! at the sample rate, optionally multiply by a square subcarrier (BOC), and
//! scale by the code's relative amplitude. Only the [`RangingCode`]
//! parameters differ between the short code, the long code and the
//! split-spectrum codes.

use std::f64::consts::FRAC_1_SQRT_2;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    chips::generate_chip_sequence,
    error::{Result, SignalError, ensure_positive},
    iter::Iter,
    sampler::{sample_at_chip_rate, sample_subcarrier},
};

/// Amplitude factor of a code transmitted 3 dB below the reference code.
pub const HALF_POWER: f64 = FRAC_1_SQRT_2;

/// Fundamental frequency all GPS code and subcarrier rates are multiples of.
pub const FUNDAMENTAL_FREQ: f64 = 1.023e6;

/// Parameters of one ranging code.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RangingCode {
    pub name: String,
    /// Chips per second.
    pub chip_rate: f64,
    /// Linear amplitude factor relative to the reference code.
    pub attenuation: f64,
    /// Square subcarrier frequency in Hz, for split-spectrum modulation.
    pub subcarrier_rate: Option<f64>,
}

impl RangingCode {
    /// Short code at 1.023 Mchip/s.
    pub fn coarse_acquisition() -> Self {
        Self {
            name: "C/A".to_string(),
            chip_rate: FUNDAMENTAL_FREQ,
            attenuation: 1f64,
            subcarrier_rate: None,
        }
    }

    /// Long code at 10.23 Mchip/s, 3 dB weaker than the short code.
    pub fn precision() -> Self {
        Self {
            name: "P(Y)".to_string(),
            chip_rate: 10f64 * FUNDAMENTAL_FREQ,
            attenuation: HALF_POWER,
            subcarrier_rate: None,
        }
    }

    /// BOC(m, n): subcarrier at `m` and chips at `n` times the fundamental.
    pub fn boc(m: usize, n: usize) -> Self {
        Self {
            name: format!("BOC({},{})", m, n),
            chip_rate: n as f64 * FUNDAMENTAL_FREQ,
            attenuation: 1f64,
            subcarrier_rate: Some(m as f64 * FUNDAMENTAL_FREQ),
        }
    }

    /// Military code, BOC(10,5).
    pub fn m_code() -> Self {
        Self {
            name: "M-code".to_string(),
            ..Self::boc(10, 5)
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive("chip_rate", self.chip_rate)?;
        ensure_positive("attenuation", self.attenuation)?;
        if let Some(rate) = self.subcarrier_rate {
            ensure_positive("subcarrier_rate", rate)?;
        }
        Ok(())
    }
}

/// Multiplies `carrier` by every sequence in `sampled` and by `attenuation`.
///
/// All sequences must have the carrier's length.
pub fn modulate(carrier: &[f64], sampled: &[&[f64]], attenuation: f64) -> Result<Vec<f64>> {
    if let Some(seq) = sampled.iter().find(|seq| seq.len() != carrier.len()) {
        return Err(SignalError::ShapeMismatch {
            expected: carrier.len(),
            actual: seq.len(),
        });
    }

    let mut signal = carrier.to_vec();
    for seq in sampled {
        signal.iter_mut().zip(seq.iter()).for_each(|(s, c)| *s *= c);
    }

    Ok(signal.into_iter().scale(attenuation).collect())
}

/// Draws a fresh code and modulates it onto `carrier`.
///
/// `duration` sizes the chip sequence; it must cover the last instant of
/// `time_base`.
pub fn modulate_code<R: Rng + ?Sized>(
    carrier: &[f64],
    time_base: &[f64],
    code: &RangingCode,
    duration: f64,
    rng: &mut R,
) -> Result<Vec<f64>> {
    code.validate()?;

    let chips = generate_chip_sequence(code.chip_rate, duration, rng)?;
    let sampled_chips = sample_at_chip_rate(time_base, &chips, code.chip_rate)?;

    match code.subcarrier_rate {
        Some(subcarrier_rate) => {
            log::debug!(
                "{}: {} chips at {} chips/s on a {} Hz subcarrier",
                code.name,
                chips.len(),
                code.chip_rate,
                subcarrier_rate
            );
            let subcarrier = sample_subcarrier(time_base, subcarrier_rate)?;
            modulate(carrier, &[&subcarrier, &sampled_chips], code.attenuation)
        }
        None => {
            log::debug!(
                "{}: {} chips at {} chips/s",
                code.name,
                chips.len(),
                code.chip_rate
            );
            modulate(carrier, &[&sampled_chips], code.attenuation)
        }
    }
}
