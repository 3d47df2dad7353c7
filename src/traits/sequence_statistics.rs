use core::iter::Map;

use crate::{
    CumulativeMovingAverage, CumulativeStdev, CumulativeVariance, MovingAverage, MovingStdev,
    MovingSum, MovingVariance, Observation, Real, Sample, StatsError, Stdev,
    WeightedMovingAverage, accumulator::stdev, operators::variance_of,
};

/// Windowed and cumulative statistics over any iterator of numeric values
///
/// Implemented for every [`Iterator`]. Elements are plain numbers (`f64`,
/// `f32`, `i64`, `i32`) or `Option`s of them. Absent (`None`) elements are
/// skipped by the aggregates but still occupy a window slot. NaN elements
/// poison the aggregates covering them, which come out as
/// [`Sample::Tainted`].
///
/// Every operation also has a `_by` variant that applies a selector to the
/// elements of an arbitrary source first.
pub trait SequenceStatistics: Iterator + Sized {
    /// Returns the sum of every window of `block_size` elements
    ///
    /// A source shorter than `block_size` yields one sum over all of it.
    ///
    /// # Errors
    ///
    /// * `StatsError::InvalidBlockSize` - if `block_size` is below 2
    ///
    /// # Examples
    ///
    /// ```
    /// # use seq_statistics::{SequenceStatistics, Sample};
    /// let inputs = [1.0, f64::NAN, 3.0, 4.0, 5.0, 6.0];
    /// let sums: Vec<_> = inputs.into_iter().moving_sum(3).unwrap().collect();
    ///
    /// use Sample::*;
    /// assert_eq!(sums, [Tainted, Tainted, Present(12.0), Present(15.0)]);
    /// ```
    fn moving_sum(self, block_size: usize) -> Result<MovingSum<Self>, StatsError>
    where
        Self::Item: Observation,
    {
        MovingSum::new(self, block_size)
    }

    /// Projects each element with `selector`, then computes
    /// [`moving_sum`](SequenceStatistics::moving_sum)
    ///
    /// # Errors
    ///
    /// * `StatsError::InvalidBlockSize` - if `block_size` is below 2
    fn moving_sum_by<O, F>(
        self,
        block_size: usize,
        selector: F,
    ) -> Result<MovingSum<Map<Self, F>>, StatsError>
    where
        F: FnMut(Self::Item) -> O,
        O: Observation,
    {
        self.map(selector).moving_sum(block_size)
    }

    /// Returns the average of the present elements of every window of
    /// `block_size` elements
    ///
    /// A source shorter than `block_size` yields one average over all of it.
    ///
    /// # Errors
    ///
    /// * `StatsError::InvalidBlockSize` - if `block_size` is below 2
    ///
    /// # Examples
    ///
    /// ```
    /// # use seq_statistics::{SequenceStatistics, Sample};
    /// let inputs = [Some(2.0), None, Some(4.0), None, None, None];
    /// let means: Vec<_> = inputs
    ///     .into_iter()
    ///     .standard_moving_average(3)
    ///     .unwrap()
    ///     .map(Sample::into_nullable)
    ///     .collect();
    ///
    /// assert_eq!(means, [Some(3.0), Some(4.0), Some(4.0), None]);
    /// ```
    fn standard_moving_average(self, block_size: usize) -> Result<MovingAverage<Self>, StatsError>
    where
        Self::Item: Observation,
    {
        MovingAverage::new(self, block_size)
    }

    /// Projects each element with `selector`, then computes
    /// [`standard_moving_average`](SequenceStatistics::standard_moving_average)
    ///
    /// # Errors
    ///
    /// * `StatsError::InvalidBlockSize` - if `block_size` is below 2
    fn standard_moving_average_by<O, F>(
        self,
        block_size: usize,
        selector: F,
    ) -> Result<MovingAverage<Map<Self, F>>, StatsError>
    where
        F: FnMut(Self::Item) -> O,
        O: Observation,
    {
        self.map(selector).standard_moving_average(block_size)
    }

    /// Returns the running average of every element seen so far, starting at
    /// the first element that isn't absent
    fn cumulative_moving_average(self) -> CumulativeMovingAverage<Self>
    where
        Self::Item: Observation,
    {
        CumulativeMovingAverage::new(self)
    }

    /// Projects each element with `selector`, then computes
    /// [`cumulative_moving_average`](SequenceStatistics::cumulative_moving_average)
    fn cumulative_moving_average_by<O, F>(
        self,
        selector: F,
    ) -> CumulativeMovingAverage<Map<Self, F>>
    where
        F: FnMut(Self::Item) -> O,
        O: Observation,
    {
        self.map(selector).cumulative_moving_average()
    }

    /// Returns the weighted average of every window of `block_size` elements
    ///
    /// `weight` maps a 1-based position in the window (1 = oldest) to its
    /// weight. Weights are re-normalized over the present elements.
    ///
    /// # Errors
    ///
    /// * `StatsError::InvalidBlockSize` - if `block_size` is below 2
    ///
    /// # Examples
    ///
    /// ```
    /// # use seq_statistics::{SequenceStatistics, Sample};
    /// # use assert_approx_eq::assert_approx_eq;
    /// let inputs = [1.0f64, 2.0, 3.0, 6.0, 7.0];
    /// let means: Vec<_> = inputs
    ///     .into_iter()
    ///     .weighted_moving_average(4, |i| (i * i) as f64)
    ///     .unwrap()
    ///     .collect::<Result<_, _>>()
    ///     .unwrap();
    ///
    /// assert_approx_eq!(means[0].into_float(), 4.4);
    /// assert_approx_eq!(means[1].into_float(), 6.0);
    /// ```
    fn weighted_moving_average<W>(
        self,
        block_size: usize,
        weight: W,
    ) -> Result<WeightedMovingAverage<Self>, StatsError>
    where
        Self::Item: Observation,
        W: Fn(usize) -> Real<Self::Item>,
    {
        WeightedMovingAverage::new(self, block_size, weight)
    }

    /// Projects each element with `selector`, then computes
    /// [`weighted_moving_average`](SequenceStatistics::weighted_moving_average)
    ///
    /// # Errors
    ///
    /// * `StatsError::InvalidBlockSize` - if `block_size` is below 2
    fn weighted_moving_average_by<O, F, W>(
        self,
        block_size: usize,
        selector: F,
        weight: W,
    ) -> Result<WeightedMovingAverage<Map<Self, F>>, StatsError>
    where
        F: FnMut(Self::Item) -> O,
        O: Observation,
        W: Fn(usize) -> Real<O>,
    {
        self.map(selector).weighted_moving_average(block_size, weight)
    }

    /// Returns the sample variance of the whole source
    ///
    /// # Errors
    ///
    /// * `StatsError::InsufficientElements` - if fewer than two elements
    ///   aren't absent
    fn variance(self) -> Result<Sample<Real<Self::Item>>, StatsError>
    where
        Self::Item: Observation,
    {
        variance_of(self)
    }

    /// Projects each element with `selector`, then computes
    /// [`variance`](SequenceStatistics::variance)
    ///
    /// # Errors
    ///
    /// * `StatsError::InsufficientElements` - if fewer than two elements
    ///   aren't absent
    fn variance_by<O, F>(self, selector: F) -> Result<Sample<Real<O>>, StatsError>
    where
        F: FnMut(Self::Item) -> O,
        O: Observation,
    {
        self.map(selector).variance()
    }

    /// Returns the sample variance of every window of `block_size` elements
    ///
    /// # Errors
    ///
    /// * `StatsError::InvalidBlockSize` - if `block_size` is below 2
    fn moving_variance(self, block_size: usize) -> Result<MovingVariance<Self>, StatsError>
    where
        Self::Item: Observation,
    {
        MovingVariance::new(self, block_size)
    }

    /// Projects each element with `selector`, then computes
    /// [`moving_variance`](SequenceStatistics::moving_variance)
    ///
    /// # Errors
    ///
    /// * `StatsError::InvalidBlockSize` - if `block_size` is below 2
    fn moving_variance_by<O, F>(
        self,
        block_size: usize,
        selector: F,
    ) -> Result<MovingVariance<Map<Self, F>>, StatsError>
    where
        F: FnMut(Self::Item) -> O,
        O: Observation,
    {
        self.map(selector).moving_variance(block_size)
    }

    /// Returns the sample variance of every element seen so far, starting at
    /// the second element that isn't absent
    fn cumulative_variance(self) -> CumulativeVariance<Self>
    where
        Self::Item: Observation,
    {
        CumulativeVariance::new(self)
    }

    /// Projects each element with `selector`, then computes
    /// [`cumulative_variance`](SequenceStatistics::cumulative_variance)
    fn cumulative_variance_by<O, F>(self, selector: F) -> CumulativeVariance<Map<Self, F>>
    where
        F: FnMut(Self::Item) -> O,
        O: Observation,
    {
        self.map(selector).cumulative_variance()
    }

    /// Returns the sample standard deviation of the whole source
    ///
    /// # Errors
    ///
    /// * `StatsError::InsufficientElements` - if fewer than two elements
    ///   aren't absent
    ///
    /// # Examples
    ///
    /// ```
    /// # use seq_statistics::{SequenceStatistics, Sample};
    /// let inputs = [2i32, 4, 4, 4, 5, 5, 7, 9];
    /// let stdev = inputs.into_iter().stdev().unwrap().into_float();
    /// assert!((stdev - 2.138).abs() < 1e-3);
    /// ```
    fn stdev(self) -> Result<Sample<Real<Self::Item>>, StatsError>
    where
        Self::Item: Observation,
    {
        variance_of(self).map(stdev)
    }

    /// Projects each element with `selector`, then computes
    /// [`stdev`](SequenceStatistics::stdev)
    ///
    /// # Errors
    ///
    /// * `StatsError::InsufficientElements` - if fewer than two elements
    ///   aren't absent
    fn stdev_by<O, F>(self, selector: F) -> Result<Sample<Real<O>>, StatsError>
    where
        F: FnMut(Self::Item) -> O,
        O: Observation,
    {
        self.map(selector).stdev()
    }

    /// Returns the sample standard deviation of every window of `block_size`
    /// elements
    ///
    /// # Errors
    ///
    /// * `StatsError::InvalidBlockSize` - if `block_size` is below 2
    fn moving_stdev(self, block_size: usize) -> Result<MovingStdev<Self>, StatsError>
    where
        Self::Item: Observation,
    {
        MovingVariance::new(self, block_size).map(Stdev::new)
    }

    /// Projects each element with `selector`, then computes
    /// [`moving_stdev`](SequenceStatistics::moving_stdev)
    ///
    /// # Errors
    ///
    /// * `StatsError::InvalidBlockSize` - if `block_size` is below 2
    fn moving_stdev_by<O, F>(
        self,
        block_size: usize,
        selector: F,
    ) -> Result<MovingStdev<Map<Self, F>>, StatsError>
    where
        F: FnMut(Self::Item) -> O,
        O: Observation,
    {
        self.map(selector).moving_stdev(block_size)
    }

    /// Returns the sample standard deviation of every element seen so far,
    /// starting at the second element that isn't absent
    fn cumulative_stdev(self) -> CumulativeStdev<Self>
    where
        Self::Item: Observation,
    {
        Stdev::new(CumulativeVariance::new(self))
    }

    /// Projects each element with `selector`, then computes
    /// [`cumulative_stdev`](SequenceStatistics::cumulative_stdev)
    fn cumulative_stdev_by<O, F>(self, selector: F) -> CumulativeStdev<Map<Self, F>>
    where
        F: FnMut(Self::Item) -> O,
        O: Observation,
    {
        self.map(selector).cumulative_stdev()
    }
}

impl<I: Iterator> SequenceStatistics for I {}
