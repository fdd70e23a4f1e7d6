//! Iterator adaptors used by the modulator and the report helpers.

mod scale;
mod take_every;

pub use scale::Scale;
pub use take_every::TakeEvery;

pub trait Iter: Iterator + Sized {
    /// Multiplies every item by `scalar`.
    fn scale(self, scalar: f64) -> Scale<Self::Item, Self>
    where
        Self::Item: std::ops::Mul<f64, Output = Self::Item>,
    {
        Scale::new(self, scalar)
    }

    /// Yields the first item and then every `step`-th one after it.
    fn take_every(self, step: usize) -> TakeEvery<Self::Item, Self> {
        TakeEvery::new(self, step)
    }
}

impl<I: Iterator> Iter for I {}
