//! Synthesis of satellite-navigation ranging signals and estimation of their
//! power spectral density.
//!
//! The pipeline is a chain of pure functions:
//! [`generate_time_base`] → [`generate_chip_sequence`] → [`sample_at_chip_rate`]
//! → [`generate_carrier`] → [`modulate`] → [`power_spectrum`] /
//! [`frequency_axis`]. [`scenario::simulate`] runs the whole chain for a set of
//! [`RangingCode`]s. Plotting is left to the caller; the Python module built
//! from this crate hands every stage over as numpy arrays.

use numpy::{IntoPyArray, PyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use rand::{SeedableRng, rngs::StdRng};

pub mod carrier;
pub mod chips;
pub mod error;
pub mod filters;
pub mod iter;
pub mod modulator;
pub mod sampler;
pub mod scenario;
pub mod spectrum;
pub mod time_base;

pub use crate::{
    carrier::{Waveform, generate_carrier},
    chips::{chip_count, generate_chip_sequence},
    error::{Result, SignalError},
    modulator::{HALF_POWER, RangingCode, modulate, modulate_code},
    sampler::{sample_at_chip_rate, sample_cyclic, sample_subcarrier},
    scenario::{CodePsd, PsdReport, SimConfig},
    spectrum::{
        DEFAULT_SMOOTHING_WINDOW, frequency_axis, magnitude_spectrum, peak_frequency,
        power_spectrum,
    },
    time_base::generate_time_base,
};

pub type Bit = bool;

#[inline]
pub fn db(x: f64) -> f64 {
    10f64 * x.log10()
}

#[inline]
pub fn bit_to_nrz(bit: Bit) -> f64 {
    if bit { 1_f64 } else { -1_f64 }
}

pub(crate) fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

impl From<SignalError> for PyErr {
    fn from(err: SignalError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

fn parse_waveform(kind: &str) -> PyResult<Waveform> {
    match kind {
        "sine" | "sin" => Ok(Waveform::Sine),
        "cosine" | "cos" => Ok(Waveform::Cosine),
        "square" => Ok(Waveform::Square),
        other => Err(PyValueError::new_err(format!(
            "unknown waveform `{}`, expected sine, cosine or square",
            other
        ))),
    }
}


#[pymodule]
#[pyo3(name = "chipspec")]
fn module_with_functions(m: &Bound<'_, PyModule>) -> PyResult<()> {
    #[pyfunction]
    #[pyo3(name = "time_base")]
    fn time_base_py<'py>(
        py: Python<'py>,
        sample_rate: f64,
        duration: f64,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        Ok(generate_time_base(sample_rate, duration)?.into_pyarray(py))
    }

    #[pyfunction]
    #[pyo3(signature = (chip_rate, duration, seed=None))]
    fn chip_sequence<'py>(
        py: Python<'py>,
        chip_rate: f64,
        duration: f64,
        seed: Option<u64>,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let mut rng = seeded_rng(seed);
        Ok(generate_chip_sequence(chip_rate, duration, &mut rng)?.into_pyarray(py))
    }

    #[pyfunction]
    fn sample_chips<'py>(
        py: Python<'py>,
        time_base: Vec<f64>,
        chips: Vec<f64>,
        chip_rate: f64,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        Ok(sample_at_chip_rate(&time_base, &chips, chip_rate)?.into_pyarray(py))
    }

    #[pyfunction]
    fn subcarrier<'py>(
        py: Python<'py>,
        time_base: Vec<f64>,
        subcarrier_rate: f64,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        Ok(sample_subcarrier(&time_base, subcarrier_rate)?.into_pyarray(py))
    }

    #[pyfunction]
    #[pyo3(name = "carrier", signature = (center_freq, time_base, waveform="sine"))]
    fn carrier_py<'py>(
        py: Python<'py>,
        center_freq: f64,
        time_base: Vec<f64>,
        waveform: &str,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let waveform = parse_waveform(waveform)?;
        Ok(generate_carrier(center_freq, &time_base, waveform).into_pyarray(py))
    }

    #[pyfunction]
    #[pyo3(name = "modulate", signature = (carrier, sampled, attenuation=1.0))]
    fn modulate_py<'py>(
        py: Python<'py>,
        carrier: Vec<f64>,
        sampled: Vec<Vec<f64>>,
        attenuation: f64,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let sampled: Vec<&[f64]> = sampled.iter().map(Vec::as_slice).collect();
        Ok(modulate(&carrier, &sampled, attenuation)?.into_pyarray(py))
    }

    #[pyfunction]
    #[pyo3(name = "power_spectrum", signature = (signal, smoothing_window=Some(DEFAULT_SMOOTHING_WINDOW)))]
    fn power_spectrum_py<'py>(
        py: Python<'py>,
        signal: Vec<f64>,
        smoothing_window: Option<usize>,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        Ok(power_spectrum(&signal, smoothing_window)?.into_pyarray(py))
    }

    #[pyfunction]
    #[pyo3(name = "frequency_axis")]
    fn frequency_axis_py<'py>(
        py: Python<'py>,
        sample_rate: f64,
        signal_length: usize,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        Ok(frequency_axis(sample_rate, signal_length)?.into_pyarray(py))
    }

    /// Runs the default three-code study, returning the frequency axis, the
    /// carrier spectrum and a list of `(name, spectrum)` pairs.
    #[pyfunction]
    #[pyo3(signature = (seed=None, low_hz=None, high_hz=None, step=1))]
    #[allow(clippy::type_complexity)]
    fn simulate_psd<'py>(
        py: Python<'py>,
        seed: Option<u64>,
        low_hz: Option<f64>,
        high_hz: Option<f64>,
        step: usize,
    ) -> PyResult<(
        Bound<'py, PyArray1<f64>>,
        Bound<'py, PyArray1<f64>>,
        Vec<(String, Bound<'py, PyArray1<f64>>)>,
    )> {
        let config = SimConfig {
            seed,
            ..SimConfig::default()
        };
        let report = py.allow_threads(|| scenario::simulate(&config))?;
        let report = report
            .band(low_hz.unwrap_or(0f64), high_hz.unwrap_or(f64::INFINITY))
            .decimate(step)?;

        let codes = report
            .codes
            .into_iter()
            .map(|code| (code.name, code.spectrum.into_pyarray(py)))
            .collect();
        Ok((
            report.freq_axis.into_pyarray(py),
            report.carrier.into_pyarray(py),
            codes,
        ))
    }

    m.add_function(wrap_pyfunction!(time_base_py, m)?)?;
    m.add_function(wrap_pyfunction!(chip_sequence, m)?)?;
    m.add_function(wrap_pyfunction!(sample_chips, m)?)?;
    m.add_function(wrap_pyfunction!(subcarrier, m)?)?;
    m.add_function(wrap_pyfunction!(carrier_py, m)?)?;
    m.add_function(wrap_pyfunction!(modulate_py, m)?)?;
    m.add_function(wrap_pyfunction!(power_spectrum_py, m)?)?;
    m.add_function(wrap_pyfunction!(frequency_axis_py, m)?)?;
    m.add_function(wrap_pyfunction!(simulate_psd, m)?)?;
    Ok(())
}
