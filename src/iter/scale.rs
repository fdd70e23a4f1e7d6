use std::ops::Mul;

/// Applies a constant gain to every item of the source.
pub struct Scale<T: Mul<f64, Output = T>, I: Iterator<Item = T>> {
    source: I,
    gain: f64,
}

impl<T: Mul<f64, Output = T>, I: Iterator<Item = T>> Scale<T, I> {
    pub fn new(source: I, gain: f64) -> Scale<T, I> {
        Self { source, gain }
    }
}

impl<T: Mul<f64, Output = T>, I: Iterator<Item = T>> Iterator for Scale<T, I> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        Some(self.source.next()? * self.gain)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.source.size_hint()
    }
}
