#![allow(dead_code, unused_macros)]
use chipspec::{PsdReport, SignalError};

macro_rules! c {
    ($str:expr) => {{
        CString::new($str).unwrap()
    }};
}

macro_rules! init_matplotlib {
    ($py: expr) => {{
        let matplotlib = $py.import("matplotlib").unwrap();
        let plt = $py.import("matplotlib.pyplot").unwrap();
        let locals = [("matplotlib", matplotlib), ("plt", plt)]
            .into_py_dict($py)
            .unwrap();
        $py.eval(&c!("matplotlib.use('agg')"), None, Some(&locals))
            .unwrap();
        locals
    }};
}

/// Plots every code spectrum of a report against its axis in MHz.
macro_rules! psd_plot {
    ($report:expr, $log:expr, $name:expr) => {
        Python::with_gil(|py| {
            let locals = init_matplotlib!(py);

            let mhz: Vec<f64> = $report.freq_axis.iter().map(|f| f / 1e6).collect();
            locals.set_item("x", mhz).unwrap();
            let (fig, axes): (PyObject, PyObject) = py
                .eval(&c!("plt.subplots(1)"), None, Some(&locals))
                .unwrap()
                .extract()
                .unwrap();
            locals.set_item("fig", fig).unwrap();
            locals.set_item("axes", axes).unwrap();
            py.eval(&c!("fig.set_size_inches(16, 9)"), None, Some(&locals))
                .unwrap();
            if $log {
                py.eval(&c!("axes.set_yscale('log')"), None, Some(&locals))
                    .unwrap();
            }
            for code in $report.codes.iter() {
                locals.set_item("y", &code.spectrum).unwrap();
                locals.set_item("label", &code.name).unwrap();
                py.eval(&c!("axes.plot(x, y, label=label)"), None, Some(&locals))
                    .unwrap();
            }
            for line in [
                "axes.grid()".to_string(),
                "axes.legend()".to_string(),
                "axes.set_xlabel('Frequency [MHz]')".to_string(),
                format!("fig.savefig('{}')", $name),
                "plt.close('all')".to_string(),
            ] {
                py.eval(&c!(line), None, Some(&locals)).unwrap();
            }
        })
    };
}

/// Index of the bin closest to `freq`.
pub fn bin_of(freq_axis: &[f64], freq: f64) -> usize {
    freq_axis.partition_point(|&f| f < freq)
}

/// Mean of `spectrum` over the bins within `half_width` Hz of `freq`.
pub fn mean_around(freq_axis: &[f64], spectrum: &[f64], freq: f64, half_width: f64) -> f64 {
    let start = bin_of(freq_axis, freq - half_width);
    let end = bin_of(freq_axis, freq + half_width).max(start + 1);
    spectrum[start..end].iter().sum::<f64>() / (end - start) as f64
}

pub fn save_report(report: &PsdReport, filename: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut w = csv::Writer::from_writer(std::fs::File::create(filename)?);

    let mut header = vec!["f (Hz)".to_string(), "carrier".to_string()];
    header.extend(report.codes.iter().map(|code| code.name.clone()));
    w.write_record(&header)?;

    for (i, f) in report.freq_axis.iter().enumerate() {
        let mut row = vec![f.to_string(), report.carrier[i].to_string()];
        row.extend(report.codes.iter().map(|code| code.spectrum[i].to_string()));
        w.write_record(&row)?;
    }
    w.flush()?;

    Ok(())
}

pub fn expect_shape_mismatch<T: std::fmt::Debug>(result: Result<T, SignalError>) {
    assert!(
        matches!(result, Err(SignalError::ShapeMismatch { .. })),
        "{:?}",
        result
    );
}
