use alloc::boxed::Box;

use num_traits::Float;

use crate::{
    Observation, Real, Sample, StatsError,
    error::{check_block_size, insufficient_elements},
    utils::Window,
};

/// Weighted moving average over a sliding window of `block_size` elements
///
/// Slot `i` of the window (1 = oldest) is weighted by `weight(i)`. The weights
/// are evaluated once, when the operator is built. Absent slots drop out of
/// both the weighted sum and the normalizer, so the weights are
/// re-normalized over the present slots. Any NaN in the window makes the
/// average `Tainted`, a window with no present slot is `Absent`.
///
/// A source shorter than `block_size` yields a single
/// `StatsError::InsufficientElements`.
#[derive(Debug, Clone)]
pub struct WeightedMovingAverage<I>
where
    I: Iterator,
    I::Item: Observation,
{
    iter: I,
    window: Window<Sample<Real<I::Item>>>,
    weights: Box<[Real<I::Item>]>,
    done: bool,
}

impl<I> WeightedMovingAverage<I>
where
    I: Iterator,
    I::Item: Observation,
{
    /// Creates a weighted moving average over `iter`
    ///
    /// # Arguments
    ///
    /// * `iter` - The source
    /// * `block_size` - The window size
    /// * `weight` - Maps a 1-based position in the window to its weight
    ///
    /// # Errors
    ///
    /// * `StatsError::InvalidBlockSize` - if `block_size` is below 2
    pub fn new<F>(iter: I, block_size: usize, weight: F) -> Result<Self, StatsError>
    where
        F: Fn(usize) -> Real<I::Item>,
    {
        let block_size = check_block_size(block_size)?;
        Ok(Self {
            iter,
            window: Window::new(block_size),
            weights: (1..=block_size).map(weight).collect(),
            done: false,
        })
    }

    /// Returns the materialized weights, oldest slot first
    pub fn weights(&self) -> &[Real<I::Item>] {
        &self.weights
    }
}

/// Weighted average of a full window
fn weighted_mean<T: Float>(window: &Window<Sample<T>>, weights: &[T]) -> Sample<T> {
    let mut sum = T::zero();
    let mut norm = T::zero();
    let mut present = 0usize;
    for (slot, &w) in window.iter().zip(weights) {
        match *slot {
            Sample::Present(v) => {
                sum = sum + v * w;
                norm = norm + w;
                present += 1;
            }
            Sample::Tainted => return Sample::Tainted,
            Sample::Absent => {}
        }
    }
    if present == 0 {
        return Sample::Absent;
    }
    Sample::Present(sum / norm)
}

impl<I> Iterator for WeightedMovingAverage<I>
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
            self.window.next(item.real_sample());
            if self.window.is_full() {
                return Some(Ok(weighted_mean(&self.window, &self.weights)));
            }
        }
        self.done = true;
        (!self.window.is_full())
            .then(|| Err(insufficient_elements(self.window.period(), self.window.len())))
    }
}
