//! End-to-end spectral comparison of several ranging codes on one carrier.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    carrier::{Waveform, generate_carrier},
    error::{Result, SignalError, ensure_positive},
    iter::Iter,
    modulator::{RangingCode, modulate_code},
    seeded_rng,
    spectrum::{DEFAULT_SMOOTHING_WINDOW, frequency_axis, power_spectrum},
    time_base::generate_time_base,
};

/// Parameters of a simulation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Carrier frequency in Hz.
    pub center_freq: f64,
    /// Samples per second.
    pub sample_rate: f64,
    /// Simulated time in seconds.
    pub duration: f64,
    pub carrier: Waveform,
    /// Moving-average length applied to every code spectrum.
    pub smoothing_window: usize,
    pub codes: Vec<RangingCode>,
    /// Seed for the chip generator; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    /// 30 MHz carrier sampled at 200 MHz for 100 ms, carrying the long code,
    /// the short code and the M-code.
    fn default() -> Self {
        Self {
            center_freq: 30e6,
            sample_rate: 200e6,
            duration: 0.1,
            carrier: Waveform::Sine,
            smoothing_window: DEFAULT_SMOOTHING_WINDOW,
            codes: vec![
                RangingCode::precision(),
                RangingCode::coarse_acquisition(),
                RangingCode::m_code(),
            ],
            seed: None,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<()> {
        ensure_positive("center_freq", self.center_freq)?;
        ensure_positive("sample_rate", self.sample_rate)?;
        ensure_positive("duration", self.duration)?;
        if self.smoothing_window == 0 {
            return Err(SignalError::Domain {
                name: "smoothing_window",
                value: 0f64,
            });
        }
        self.codes.iter().try_for_each(RangingCode::validate)
    }
}

/// Smoothed spectrum of one modulated code.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CodePsd {
    pub name: String,
    pub spectrum: Vec<f64>,
}

/// Everything a plot needs: one frequency axis and the spectra on it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PsdReport {
    /// Bin frequencies in Hz.
    pub freq_axis: Vec<f64>,
    /// Unsmoothed spectrum of the bare carrier.
    pub carrier: Vec<f64>,
    pub codes: Vec<CodePsd>,
}

impl PsdReport {
    pub fn code(&self, name: &str) -> Option<&CodePsd> {
        self.codes.iter().find(|code| code.name == name)
    }

    /// The bins with `low_hz <= f <= high_hz`.
    pub fn band(&self, low_hz: f64, high_hz: f64) -> PsdReport {
        let start = self.freq_axis.partition_point(|&f| f < low_hz);
        let end = self.freq_axis.partition_point(|&f| f <= high_hz).max(start);

        PsdReport {
            freq_axis: self.freq_axis[start..end].to_vec(),
            carrier: self.carrier[start..end].to_vec(),
            codes: self
                .codes
                .iter()
                .map(|code| CodePsd {
                    name: code.name.clone(),
                    spectrum: code.spectrum[start..end].to_vec(),
                })
                .collect(),
        }
    }

    /// Keeps every `step`-th bin, starting with the first.
    pub fn decimate(&self, step: usize) -> Result<PsdReport> {
        if step == 0 {
            return Err(SignalError::Domain {
                name: "step",
                value: 0f64,
            });
        }
        let thin = |v: &[f64]| -> Vec<f64> { v.iter().cloned().take_every(step).collect() };

        Ok(PsdReport {
            freq_axis: thin(&self.freq_axis),
            carrier: thin(&self.carrier),
            codes: self
                .codes
                .iter()
                .map(|code| CodePsd {
                    name: code.name.clone(),
                    spectrum: thin(&code.spectrum),
                })
                .collect(),
        })
    }
}

/// Runs `config` with a generator seeded from `config.seed`.
pub fn simulate(config: &SimConfig) -> Result<PsdReport> {
    let mut rng = seeded_rng(config.seed);
    simulate_with_rng(config, &mut rng)
}

/// Modulates every configured code onto the carrier and estimates the
/// spectra of the carrier and of each modulated signal.
pub fn simulate_with_rng<R: Rng + ?Sized>(config: &SimConfig, rng: &mut R) -> Result<PsdReport> {
    config.validate()?;

    let time_base = generate_time_base(config.sample_rate, config.duration)?;
    log::debug!(
        "time base: {} samples at {} Hz",
        time_base.len(),
        config.sample_rate
    );

    let carrier = generate_carrier(config.center_freq, &time_base, config.carrier);
    let carrier_psd = power_spectrum(&carrier, None)?;
    let freq_axis = frequency_axis(config.sample_rate, time_base.len())?;
    log::debug!(
        "{:?} carrier at {} Hz, {} bins",
        config.carrier,
        config.center_freq,
        freq_axis.len()
    );

    let codes = config
        .codes
        .iter()
        .map(|code| -> Result<CodePsd> {
            let signal = modulate_code(&carrier, &time_base, code, config.duration, rng)?;
            let spectrum = power_spectrum(&signal, Some(config.smoothing_window))?;
            log::debug!("{}: spectrum estimated", code.name);
            Ok(CodePsd {
                name: code.name.clone(),
                spectrum,
            })
        })
        .collect::<Result<Vec<CodePsd>>>()?;

    Ok(PsdReport {
        freq_axis,
        carrier: carrier_psd,
        codes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectrum::peak_frequency;
    use assert_approx_eq::assert_approx_eq;

    fn small_config() -> SimConfig {
        SimConfig {
            center_freq: 5e6,
            sample_rate: 20e6,
            duration: 1e-3,
            smoothing_window: 25,
            codes: vec![
                RangingCode::coarse_acquisition(),
                RangingCode::precision(),
                RangingCode::boc(1, 1),
            ],
            seed: Some(64),
            ..SimConfig::default()
        }
    }

    #[test]
    fn default_matches_study() {
        let config = SimConfig::default();
        assert_eq!(config.center_freq, 30e6);
        assert_eq!(config.sample_rate, 200e6);
        assert_eq!(config.duration, 0.1);
        assert_eq!(config.smoothing_window, 500);
        let names: Vec<&str> = config.codes.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["P(Y)", "C/A", "M-code"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn report_shape() {
        let config = small_config();
        let report = simulate(&config).unwrap();

        assert_eq!(report.freq_axis.len(), 10_000);
        assert_eq!(report.carrier.len(), 10_000);
        assert_eq!(report.codes.len(), 3);
        for code in report.codes.iter() {
            assert_eq!(code.spectrum.len(), 10_000);
        }

        let peak = peak_frequency(&report.freq_axis, &report.carrier)
            .unwrap()
            .unwrap();
        assert_approx_eq!(peak, 5e6, 1e-3);
    }

    #[test]
    fn seeded_runs_repeat() {
        let config = small_config();
        assert_eq!(simulate(&config).unwrap(), simulate(&config).unwrap());

        let other = SimConfig {
            seed: Some(65),
            ..small_config()
        };
        assert_ne!(
            simulate(&config).unwrap().codes,
            simulate(&other).unwrap().codes
        );
    }

    #[test]
    fn band_and_decimate() {
        let report = simulate(&small_config()).unwrap();

        let band = report.band(3.9995e6, 6.0005e6);
        assert_approx_eq!(band.freq_axis[0], 4e6, 1e-3);
        assert_approx_eq!(band.freq_axis[band.freq_axis.len() - 1], 6e6, 1e-3);
        assert_eq!(band.freq_axis.len(), 2001);
        assert_eq!(band.code("C/A").unwrap().spectrum.len(), 2001);

        let thin = band.decimate(10).unwrap();
        assert_eq!(thin.freq_axis.len(), 201);
        assert_eq!(thin.freq_axis[1], band.freq_axis[10]);
        assert_eq!(thin.codes[2].spectrum[3], band.codes[2].spectrum[30]);

        assert!(report.decimate(0).is_err());
        assert!(report.band(9e9, 1e10).freq_axis.is_empty());
        assert!(report.code("L5").is_none());
    }

    #[test]
    fn invalid_config() {
        let config = SimConfig {
            smoothing_window: 0,
            ..small_config()
        };
        assert!(simulate(&config).is_err());

        let config = SimConfig {
            codes: vec![RangingCode {
                chip_rate: f64::NAN,
                ..RangingCode::coarse_acquisition()
            }],
            ..small_config()
        };
        assert!(matches!(
            simulate(&config),
            Err(SignalError::Domain {
                name: "chip_rate",
                ..
            })
        ));
    }

    #[test]
    fn config_roundtrips_through_json() {
        let config = small_config();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: SimConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, parsed);
    }
}
