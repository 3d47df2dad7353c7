use crate::{BlockAccumulator, CumulativeAccumulator, Observation, Real, Sample, StatsError};

/// Standard moving average over a sliding window of `block_size` elements
///
/// The average is taken over the present elements of the window. A window
/// holding a NaN is `Tainted`. A window without any present element is
/// `Absent` for nullable sources.
///
/// Like [`MovingSum`](crate::MovingSum), a source shorter than `block_size`
/// yields a single average over whatever it held.
#[derive(Debug, Clone)]
pub struct MovingAverage<I>
where
    I: Iterator,
    I::Item: Observation,
{
    iter: I,
    acc: BlockAccumulator<Real<I::Item>>,
    done: bool,
}

impl<I> MovingAverage<I>
where
    I: Iterator,
    I::Item: Observation,
{
    /// Creates a moving average over `iter`
    ///
    /// # Errors
    ///
    /// * `StatsError::InvalidBlockSize` - if `block_size` is below 2
    pub fn new(iter: I, block_size: usize) -> Result<Self, StatsError> {
        Ok(Self {
            iter,
            acc: BlockAccumulator::new(block_size)?,
            done: false,
        })
    }

    fn mean(&self) -> Sample<Real<I::Item>> {
        self.acc.mean(<I::Item as Observation>::NULLABLE)
    }
}

impl<I> Iterator for MovingAverage<I>
where
    I: Iterator,
    I::Item: Observation,
{
    type Item = Sample<Real<I::Item>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if super::advance(&mut self.iter, &mut self.acc, Observation::real_sample) {
            return Some(self.mean());
        }
        self.done = true;
        (!self.acc.is_full()).then(|| self.mean())
    }
}

/// Average of every element seen so far
///
/// Output starts at the first element that isn't absent and continues with
/// one average per element after that. Once a NaN is seen every later
/// average is `Tainted`.
#[derive(Debug, Clone)]
pub struct CumulativeMovingAverage<I>
where
    I: Iterator,
    I::Item: Observation,
{
    iter: I,
    acc: CumulativeAccumulator<Real<I::Item>>,
}

impl<I> CumulativeMovingAverage<I>
where
    I: Iterator,
    I::Item: Observation,
{
    /// Creates a cumulative moving average over `iter`
    pub fn new(iter: I) -> Self {
        Self {
            iter,
            acc: CumulativeAccumulator::new(),
        }
    }
}

impl<I> Iterator for CumulativeMovingAverage<I>
where
    I: Iterator,
    I::Item: Observation,
{
    type Item = Sample<Real<I::Item>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let item = self.iter.next()?;
            self.acc.push(item.real_sample());
            if self.acc.count() > 0 {
                return Some(self.acc.mean(<I::Item as Observation>::NULLABLE));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn averages_each_window() {
        let means: Vec<_> = MovingAverage::new([1i32, 2, 3, 4, 5, 6].into_iter(), 3)
            .unwrap()
            .collect();
        use Sample::Present;
        assert_eq!(means, [Present(2.0), Present(3.0), Present(4.0), Present(5.0)]);
    }

    #[test]
    fn nullable_windows_average_present_values() {
        let inputs = [Some(2.0f32), None, Some(4.0), None, None, None, Some(9.0)];
        let means: Vec<_> = MovingAverage::new(inputs.into_iter(), 3)
            .unwrap()
            .collect();

        use Sample::*;
        assert_eq!(
            means,
            [Present(3.0), Present(4.0), Present(4.0), Absent, Present(9.0)]
        );
    }

    #[test]
    fn nan_taints_window() {
        let inputs = [1.0, 2.0, f64::NAN, 4.0, 5.0, 6.0, 7.0];
        let means: Vec<_> = MovingAverage::new(inputs.into_iter(), 2)
            .unwrap()
            .collect();

        use Sample::*;
        assert_eq!(
            means,
            [Present(1.5), Tainted, Tainted, Present(4.5), Present(5.5), Present(6.5)]
        );
    }

    #[test]
    fn short_source_yields_one_average() {
        let means: Vec<_> = MovingAverage::new([3i32, 5].into_iter(), 4)
            .unwrap()
            .collect();
        assert_eq!(means, [Sample::Present(4.0)]);

        let means: Vec<_> = MovingAverage::new(core::iter::empty::<f64>(), 4)
            .unwrap()
            .collect();
        assert_eq!(means, [Sample::Tainted]);

        let means: Vec<_> = MovingAverage::new(core::iter::empty::<Option<f64>>(), 4)
            .unwrap()
            .collect();
        assert_eq!(means, [Sample::Absent]);
    }

    #[test]
    fn cumulative_average_grows() {
        let means: Vec<_> = CumulativeMovingAverage::new([2i64, 4, 6, 8].into_iter()).collect();
        use Sample::Present;
        assert_eq!(means, [Present(2.0), Present(3.0), Present(4.0), Present(5.0)]);
    }

    #[test]
    fn cumulative_average_starts_at_first_value() {
        let inputs = [None, None, Some(4.0), None, Some(8.0)];
        let means: Vec<_> = CumulativeMovingAverage::new(inputs.into_iter()).collect();
        use Sample::Present;
        assert_eq!(means, [Present(4.0), Present(4.0), Present(6.0)]);

        let empty: Vec<_> =
            CumulativeMovingAverage::new([None::<f64>, None].into_iter()).collect();
        assert!(empty.is_empty());
    }

    #[test]
    fn cumulative_average_taint_never_clears() {
        let inputs = [1.0, f64::NAN, 3.0, 4.0, 5.0];
        let means: Vec<_> = CumulativeMovingAverage::new(inputs.into_iter()).collect();
        use Sample::*;
        assert_eq!(means, [Present(1.0), Tainted, Tainted, Tainted, Tainted]);
    }
}
