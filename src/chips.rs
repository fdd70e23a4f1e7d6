use crate::{
    Bit, bit_to_nrz,
    error::{Result, ensure_positive},
    time_base::event_count,
};

use rand::Rng;

/// Number of chips needed to cover `duration` at `chip_rate`.
pub fn chip_count(chip_rate: f64, duration: f64) -> Result<usize> {
    let chip_rate = ensure_positive("chip_rate", chip_rate)?;
    let duration = ensure_positive("duration", duration)?;
    Ok(event_count(chip_rate, duration))
}

/// Draws a pseudorandom bipolar code long enough to cover `duration`.
///
/// Each chip is an independent fair coin flip mapped through NRZ, so every
/// value is exactly `+1.0` or `-1.0`. The sequence depends only on the state
/// of `rng`: pass a seeded generator for reproducible codes.
pub fn generate_chip_sequence<R: Rng + ?Sized>(
    chip_rate: f64,
    duration: f64,
    rng: &mut R,
) -> Result<Vec<f64>> {
    let num_chips = chip_count(chip_rate, duration)?;
    log::trace!("drawing {num_chips} chips at {chip_rate} chips/s");

    Ok((0..num_chips)
        .map(|_| bit_to_nrz(rng.random::<Bit>()))
        .collect())
}
