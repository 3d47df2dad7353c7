use num_traits::Float;

use crate::{Numeric, Sample, numeric::RunningTotal};

/// Running aggregates over every floating value seen so far
///
/// The span only grows. A NaN taints the accumulator for good: unlike the
/// sliding window there is nothing for it to age out of.
#[derive(Debug, Clone)]
pub struct CumulativeAccumulator<T: Numeric> {
    /// Sum of present values
    sum: T::Total,
    /// Sum of squares of present values
    sum_sq: T::Total,
    /// Count of present values
    present: usize,
    /// Count of values that were not absent, NaN included
    observed: usize,
    /// Whether a NaN has been seen
    tainted: bool,
}

impl<T: Numeric + Float> Default for CumulativeAccumulator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Numeric + Float> CumulativeAccumulator<T> {
    /// Creates an empty accumulator
    pub fn new() -> Self {
        Self {
            sum: T::Total::default(),
            sum_sq: T::Total::default(),
            present: 0,
            observed: 0,
            tainted: false,
        }
    }

    /// Adds a slot to the span
    pub fn push(&mut self, sample: Sample<T>) {
        match sample {
            Sample::Present(value) => {
                self.sum.include(value);
                self.sum_sq.include(value * value);
                self.present += 1;
                self.observed += 1;
            }
            Sample::Tainted => {
                self.tainted = true;
                self.observed += 1;
            }
            Sample::Absent => {}
        }
    }

    /// Clears all running aggregates
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Returns the number of values that were not absent, NaN included
    #[inline]
    pub const fn count(&self) -> usize {
        self.observed
    }

    /// Returns the number of present values
    #[inline]
    pub const fn present(&self) -> usize {
        self.present
    }

    /// Returns `true` once a NaN has been pushed
    #[inline]
    pub const fn is_tainted(&self) -> bool {
        self.tainted
    }
}

impl<T: Numeric + Float> CumulativeAccumulator<T> {
    /// Returns the average of the present values
    ///
    /// # Arguments
    ///
    /// * `nullable` - Whether the source can hold absent values, decides
    ///   whether an empty span is `Absent` or `Tainted`
    pub fn mean(&self, nullable: bool) -> Sample<T> {
        if self.tainted {
            return Sample::Tainted;
        }
        super::mean(self.sum.value(), self.present, nullable)
    }

    /// Returns the sample variance of the present values
    pub fn variance(&self) -> Sample<T> {
        if self.tainted {
            return Sample::Tainted;
        }
        super::variance(self.sum.value(), self.sum_sq.value(), self.present)
    }

    /// Returns the sample standard deviation of the present values
    pub fn stdev(&self) -> Sample<T> {
        super::stdev(self.variance())
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    #[test]
    fn grows_without_eviction() {
        let mut acc = CumulativeAccumulator::new();
        for v in 1..=7 {
            acc.push(Sample::Present(f64::from(v)));
        }
        assert_eq!(acc.count(), 7);
        assert_eq!(acc.mean(false), Sample::Present(4.0));
        assert_approx_eq!(acc.variance().into_float(), 4.6667, 0.0001);
        assert_approx_eq!(acc.stdev().into_float(), 2.1602, 0.0001);
    }

    #[test]
    fn taint_is_permanent() {
        let mut acc = CumulativeAccumulator::new();
        acc.push(Sample::Present(1.0f32));
        acc.push(Sample::Tainted);
        for _ in 0..10 {
            acc.push(Sample::Present(2.0));
        }
        assert!(acc.is_tainted());
        assert_eq!(acc.mean(false), Sample::Tainted);
        assert_eq!(acc.variance(), Sample::Tainted);
        assert_eq!(acc.count(), 12);
        assert_eq!(acc.present(), 11);
    }

    #[test]
    fn absent_values_are_skipped() {
        let mut acc = CumulativeAccumulator::<f64>::default();
        acc.push(Sample::Absent);
        assert_eq!(acc.mean(true), Sample::Absent);
        acc.push(Sample::Present(1.0));
        acc.push(Sample::Absent);
        acc.push(Sample::Present(2.0));
        assert_eq!(acc.count(), 2);
        assert_eq!(acc.mean(true), Sample::Present(1.5));
        assert_eq!(acc.variance(), Sample::Present(0.5));
    }

    #[test]
    fn reset_clears_taint() {
        let mut acc = CumulativeAccumulator::<f64>::new();
        acc.push(Sample::Tainted);
        acc.reset();
        assert!(!acc.is_tainted());
        assert_eq!(acc.count(), 0);
    }
}
