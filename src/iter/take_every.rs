/// Decimating adaptor: keeps one item out of every `step`.
pub struct TakeEvery<T, I: Iterator<Item = T>> {
    source: I,
    step: usize,
    first: bool,
}

impl<T, I: Iterator<Item = T>> TakeEvery<T, I> {
    pub fn new(source: I, step: usize) -> TakeEvery<T, I> {
        assert!(step > 0, "decimation step must be at least 1");
        Self {
            source,
            step,
            first: true,
        }
    }
}

impl<T, I: Iterator<Item = T>> Iterator for TakeEvery<T, I> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.first {
            self.first = false;
            self.source.next()
        } else {
            self.source.nth(self.step - 1)
        }
    }
}
