use num_traits::Float;

use crate::{
    Numeric, Sample, StatsError,
    error::check_block_size,
    numeric::RunningTotal,
    utils::Window,
};

/// Running aggregates over a sliding window of fixed size
///
/// Each push adds the incoming slot and evicts the slot leaving the window,
/// keeping the sum, the optional sum of squares and the count of present
/// values up to date in constant time. Absent and tainted slots occupy a
/// window position but never enter the sums.
///
/// A tainted slot poisons every aggregate while it is among the trailing
/// `block_size` slots. This is tracked with a counter reset to `block_size`
/// whenever a NaN arrives and decremented on every other push.
///
/// # Examples
///
/// ```
/// # use seq_statistics::{BlockAccumulator, Sample};
/// let mut acc = BlockAccumulator::<f64>::with_squares(3).unwrap();
/// for v in [1.0, 2.0, 3.0, 4.0] {
///     acc.push(Sample::Present(v));
/// }
/// assert_eq!(acc.total(), Sample::Present(9.0));
/// assert_eq!(acc.mean(false), Sample::Present(3.0));
/// assert_eq!(acc.variance(), Sample::Present(1.0));
/// ```
#[derive(Debug, Clone)]
pub struct BlockAccumulator<T: Numeric> {
    /// Trailing slots, pre-filled with `Absent`
    window: Window<Sample<T>>,
    /// Sum of present values
    sum: T::Total,
    /// Sum of squares of present values, when tracked
    sum_sq: Option<T::Total>,
    /// Count of present values in the window
    present: usize,
    /// Pushes left until the most recent NaN ages out
    taint: usize,
}

impl<T: Numeric> BlockAccumulator<T> {
    /// Creates an accumulator that tracks the running sum only
    ///
    /// Its [`variance`](Self::variance) and [`stdev`](Self::stdev) are always
    /// `Absent`, use [`with_squares`](Self::with_squares) for those.
    ///
    /// # Errors
    ///
    /// * `StatsError::InvalidBlockSize` - if `block_size` is below 2
    pub fn new(block_size: usize) -> Result<Self, StatsError> {
        let block_size = check_block_size(block_size)?;
        Ok(Self {
            window: Window::new(block_size),
            sum: T::Total::default(),
            sum_sq: None,
            present: 0,
            taint: 0,
        })
    }

    /// Returns the window size
    #[inline]
    pub const fn block_size(&self) -> usize {
        self.window.period()
    }

    /// Returns the number of slots currently in the window
    #[inline]
    pub const fn len(&self) -> usize {
        self.window.len()
    }

    /// Returns `true` once `block_size` slots have been pushed
    #[inline]
    pub const fn is_full(&self) -> bool {
        self.window.is_full()
    }

    /// Returns the number of present values in the window
    #[inline]
    pub const fn present(&self) -> usize {
        self.present
    }

    /// Returns `true` if the sum of squares is tracked
    #[inline]
    pub const fn tracks_squares(&self) -> bool {
        self.sum_sq.is_some()
    }

    /// Returns `true` while a NaN is among the trailing `block_size` slots
    #[inline]
    pub const fn is_tainted(&self) -> bool {
        self.taint > 0
    }

    /// Pushes a slot into the window, evicting the oldest once full
    ///
    /// Once a value is evicted from a sum that is no longer finite, the sums
    /// are rebuilt from the window: subtracting an infinity leaves NaN behind.
    ///
    /// # Arguments
    ///
    /// * `sample` - The incoming slot
    pub fn push(&mut self, sample: Sample<T>) {
        let evicted = self.window.next(sample);
        if let Sample::Present(old) = evicted {
            self.sum.exclude(old);
            if let Some(sum_sq) = self.sum_sq.as_mut() {
                sum_sq.exclude(old * old);
            }
            self.present -= 1;
        }

        self.taint = match sample {
            Sample::Tainted => self.block_size(),
            _ => self.taint.saturating_sub(1),
        };

        if let Sample::Present(value) = sample {
            self.sum.include(value);
            if let Some(sum_sq) = self.sum_sq.as_mut() {
                sum_sq.include(value * value);
            }
            self.present += 1;
        }

        if evicted.is_present() && !self.sums_are_finite() {
            self.recompute();
        }
    }

    fn sums_are_finite(&self) -> bool {
        Numeric::is_finite(self.sum.value())
            && self
                .sum_sq
                .as_ref()
                .is_none_or(|sum_sq| Numeric::is_finite(sum_sq.value()))
    }

    /// Rebuilds the sums from the window contents, could be called to avoid
    /// prolonged compounding of floating rounding errors
    pub fn recompute(&mut self) {
        let mut sum = T::Total::default();
        let mut sum_sq = self.sum_sq.as_ref().map(|_| T::Total::default());
        for value in self.window.iter().filter_map(|s| s.present()) {
            sum.include(value);
            if let Some(sum_sq) = sum_sq.as_mut() {
                sum_sq.include(value * value);
            }
        }
        self.sum = sum;
        self.sum_sq = sum_sq;
    }

    /// Clears the window and all running aggregates
    pub fn reset(&mut self) {
        self.window.reset();
        self.sum = T::Total::default();
        self.sum_sq = self.sum_sq.as_ref().map(|_| T::Total::default());
        self.present = 0;
        self.taint = 0;
    }

    /// Returns the sum of the present values in the window
    ///
    /// # Returns
    ///
    /// * `Sample<T>` - `Tainted` while a NaN is in the window, the sum otherwise
    pub fn total(&self) -> Sample<T> {
        if self.is_tainted() {
            return Sample::Tainted;
        }
        Sample::Present(self.sum.value())
    }
}

impl<T: Numeric + Float> BlockAccumulator<T> {
    /// Creates an accumulator that also tracks the sum of squares, as needed
    /// for variance and standard deviation
    ///
    /// # Errors
    ///
    /// * `StatsError::InvalidBlockSize` - if `block_size` is below 2
    pub fn with_squares(block_size: usize) -> Result<Self, StatsError> {
        let mut acc = Self::new(block_size)?;
        acc.sum_sq = Some(T::Total::default());
        Ok(acc)
    }

    /// Returns the average of the present values in the window
    ///
    /// # Arguments
    ///
    /// * `nullable` - Whether the source can hold absent values, decides
    ///   whether a window without present values is `Absent` or `Tainted`
    pub fn mean(&self, nullable: bool) -> Sample<T> {
        if self.is_tainted() {
            return Sample::Tainted;
        }
        super::mean(self.sum.value(), self.present, nullable)
    }

    /// Returns the sample variance of the present values in the window
    ///
    /// # Returns
    ///
    /// * `Sample<T>` - `Tainted` while a NaN is in the window, `Absent` with
    ///   fewer than two present values. Always `Absent` for an accumulator
    ///   created with [`new`](Self::new), see
    ///   [`tracks_squares`](Self::tracks_squares)
    pub fn variance(&self) -> Sample<T> {
        if self.is_tainted() {
            return Sample::Tainted;
        }
        match &self.sum_sq {
            Some(sum_sq) => super::variance(self.sum.value(), sum_sq.value(), self.present),
            None => Sample::Absent,
        }
    }

    /// Returns the sample standard deviation of the present values in the window
    pub fn stdev(&self) -> Sample<T> {
        super::stdev(self.variance())
    }
}
