use crate::{
    BlockAccumulator, CumulativeAccumulator, Observation, Real, Sample, StatsError,
    error::insufficient_elements,
};

/// Sample variance over a sliding window of `block_size` elements
///
/// The variance is taken over the present elements of each window, a window
/// with fewer than two of them is `Absent`. A window holding a NaN is
/// `Tainted`. A source shorter than `block_size` yields a single
/// `StatsError::InsufficientElements`.
#[derive(Debug, Clone)]
pub struct MovingVariance<I>
where
    I: Iterator,
    I::Item: Observation,
{
    iter: I,
    acc: BlockAccumulator<Real<I::Item>>,
    done: bool,
}

impl<I> MovingVariance<I>
where
    I: Iterator,
    I::Item: Observation,
{
    /// Creates a moving variance over `iter`
    ///
    /// # Errors
    ///
    /// * `StatsError::InvalidBlockSize` - if `block_size` is below 2
    pub fn new(iter: I, block_size: usize) -> Result<Self, StatsError> {
        Ok(Self {
            iter,
            acc: BlockAccumulator::with_squares(block_size)?,
            done: false,
        })
    }
}

impl<I> Iterator for MovingVariance<I>
where
    I: Iterator,
    I::Item: Observation,
{
    type Item = Result<Sample<Real<I::Item>>, StatsError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if super::advance(&mut self.iter, &mut self.acc, Observation::real_sample) {
            return Some(Ok(self.acc.variance()));
        }
        self.done = true;
        (!self.acc.is_full())
            .then(|| Err(insufficient_elements(self.acc.block_size(), self.acc.len())))
    }
}

/// Sample variance of every element seen so far
///
/// Output starts at the second element that isn't absent. If the source
/// ends before that, it yields a single `StatsError::InsufficientElements`.
/// Once a NaN is seen every later variance is `Tainted`.
#[derive(Debug, Clone)]
pub struct CumulativeVariance<I>
where
    I: Iterator,
    I::Item: Observation,
{
    iter: I,
    acc: CumulativeAccumulator<Real<I::Item>>,
    done: bool,
}

impl<I> CumulativeVariance<I>
where
    I: Iterator,
    I::Item: Observation,
{
    /// Creates a cumulative variance over `iter`
    pub fn new(iter: I) -> Self {
        Self {
            iter,
            acc: CumulativeAccumulator::new(),
            done: false,
        }
    }
}

impl<I> Iterator for CumulativeVariance<I>
where
    I: Iterator,
    I::Item: Observation,
{
    type Item = Result<Sample<Real<I::Item>>, StatsError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        for item in self.iter.by_ref() {
            self.acc.push(item.real_sample());
            if self.acc.count() >= 2 {
                return Some(Ok(self.acc.variance()));
            }
        }
        self.done = true;
        (self.acc.count() < 2).then(|| Err(insufficient_elements(2, self.acc.count())))
    }
}

/// Sample variance of a whole source
pub(crate) fn variance_of<I>(iter: I) -> Result<Sample<Real<I::Item>>, StatsError>
where
    I: Iterator,
    I::Item: Observation,
{
    let mut acc = CumulativeAccumulator::new();
    for item in iter {
        acc.push(item.real_sample());
    }
    if acc.count() < 2 {
        return Err(insufficient_elements(2, acc.count()));
    }
    Ok(acc.variance())
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use assert_approx_eq::assert_approx_eq;

    use super::*;
    use crate::utils::testing::assert_samples_approx;

    #[test]
    fn moving_variance_works() {
        let inputs = [25.4, 26.2, 26.0, 26.1, 25.8, 25.9, 26.3, 26.2, 26.5];
        let results: Vec<_> = MovingVariance::new(inputs.into_iter(), 3)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        let expected =
            [0.1733, 0.01, 0.0233, 0.0233, 0.07, 0.0433, 0.0233].map(Sample::Present);
        assert_samples_approx(&results, &expected, 0.0001);
    }

    #[test]
    fn moving_variance_over_nullable_source() {
        let inputs = [
            Some(1.0),
            None,
            Some(3.0),
            None,
            Some(f64::NAN),
            Some(4.0),
            Some(6.0),
            Some(8.0),
        ];
        let results: Vec<_> = MovingVariance::new(inputs.into_iter(), 3)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        use Sample::*;
        // [1,_,3] [_,3,_] [3,_,NaN] [_,NaN,4] [NaN,4,6] [4,6,8]
        let expected = [Present(2.0), Absent, Tainted, Tainted, Tainted, Present(4.0)];
        assert_samples_approx(&results, &expected, 1e-12);
    }

    #[test]
    fn moving_variance_short_source_fails() {
        let mut variance = MovingVariance::new([1i32, 2].into_iter(), 3).unwrap();
        assert_eq!(
            variance.next(),
            Some(Err(StatsError::InsufficientElements {
                required: 3,
                found: 2
            }))
        );
        assert_eq!(variance.next(), None);
    }

    #[test]
    fn cumulative_variance_starts_at_second_value() {
        let results: Vec<_> = CumulativeVariance::new(1i32..=7)
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(results.len(), 6);
        assert_eq!(results[0], Sample::Present(0.5));
        assert_approx_eq!(results[5].into_float(), 4.6667, 0.0001);
    }

    #[test]
    fn cumulative_variance_needs_two_values() {
        let mut variance = CumulativeVariance::new([None, Some(1.0), None].into_iter());
        assert_eq!(
            variance.next(),
            Some(Err(StatsError::InsufficientElements {
                required: 2,
                found: 1
            }))
        );
        assert_eq!(variance.next(), None);
    }

    #[test]
    fn cumulative_variance_taint_never_clears() {
        let results: Vec<_> = CumulativeVariance::new([1.0, 3.0, f64::NAN, 4.0].into_iter())
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(results, [Sample::Present(2.0), Sample::Tainted, Sample::Tainted]);
    }

    #[test]
    fn whole_source_variance() {
        let inputs = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(
            variance_of(inputs.into_iter()),
            Ok(Sample::Present(32.0 / 7.0))
        );
        assert_eq!(
            variance_of([7i64].into_iter()),
            Err(StatsError::InsufficientElements {
                required: 2,
                found: 1
            })
        );
        assert_eq!(
            variance_of([Some(1.0), None, Some(f64::NAN)].into_iter()),
            Ok(Sample::Tainted)
        );
    }
}
