use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// Shape of the carrier a code is modulated onto.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Waveform {
    #[default]
    Sine,
    Cosine,
    /// 50% duty-cycle square wave with amplitude ±1.
    Square,
}

impl Waveform {
    /// Value of the waveform at `phase` radians.
    #[inline]
    pub fn at(&self, phase: f64) -> f64 {
        match self {
            Waveform::Sine => phase.sin(),
            Waveform::Cosine => phase.cos(),
            Waveform::Square => {
                if phase.rem_euclid(2f64 * PI) < PI {
                    1f64
                } else {
                    -1f64
                }
            }
        }
    }
}

/// Carrier of frequency `center_freq` evaluated at every instant of `time_base`.
pub fn generate_carrier(center_freq: f64, time_base: &[f64], waveform: Waveform) -> Vec<f64> {
    time_base
        .iter()
        .map(|&t| waveform.at(2f64 * PI * center_freq * t))
        .collect()
}
