use num_traits::Float;

use crate::{Sample, StatsError, accumulator::stdev};

use super::{CumulativeVariance, MovingVariance};

/// Standard deviation adapter over a variance sequence
///
/// Takes the square root of every present variance. `Tainted`, `Absent` and
/// errors pass through untouched.
#[derive(Debug, Clone)]
pub struct Stdev<V>(V);

impl<V> Stdev<V> {
    /// Wraps a variance sequence
    pub fn new(variance: V) -> Self {
        Self(variance)
    }
}

impl<V, T> Iterator for Stdev<V>
where
    V: Iterator<Item = Result<Sample<T>, StatsError>>,
    T: Float,
{
    type Item = Result<Sample<T>, StatsError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|r| r.map(stdev))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

/// Sample standard deviation over a sliding window
pub type MovingStdev<I> = Stdev<MovingVariance<I>>;

/// Sample standard deviation of every element seen so far
pub type CumulativeStdev<I> = Stdev<CumulativeVariance<I>>;

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use assert_approx_eq::assert_approx_eq;

    use super::*;
    use crate::utils::testing::assert_samples_approx;

    #[test]
    fn moving_stdev_works() {
        let inputs = [25.4, 26.2, 26.0, 26.1, 25.8, 25.9, 26.3, 26.2, 26.5];
        let variance = MovingVariance::new(inputs.into_iter(), 3).unwrap();
        let results: Vec<_> = Stdev::new(variance).collect::<Result<_, _>>().unwrap();

        let expected =
            [0.4163, 0.1, 0.1528, 0.1528, 0.2646, 0.2082, 0.1528].map(Sample::Present);
        assert_samples_approx(&results, &expected, 0.0001);
    }

    #[test]
    fn cumulative_stdev_of_two_values() {
        let mut stdev = Stdev::new(CumulativeVariance::new(1i32..=7));
        let first = stdev.next().unwrap().unwrap();
        assert_approx_eq!(first.into_float(), 0.7071, 0.0001);
        assert_eq!(stdev.count(), 5);
    }

    #[test]
    fn sentinels_and_errors_pass_through() {
        let inputs = [Some(1.0), None, None, Some(f64::NAN), Some(2.0), Some(2.0)];
        let results: Vec<_> = Stdev::new(MovingVariance::new(inputs.into_iter(), 2).unwrap())
            .collect::<Result<_, _>>()
            .unwrap();
        use Sample::*;
        assert_eq!(results, [Absent, Absent, Tainted, Tainted, Present(0.0)]);

        let mut short = Stdev::new(MovingVariance::new([1.0f64].into_iter(), 2).unwrap());
        assert!(matches!(
            short.next(),
            Some(Err(StatsError::InsufficientElements { .. }))
        ));
    }
}
