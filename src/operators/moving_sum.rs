use crate::{BlockAccumulator, Observation, Sample, StatsError};

/// Sum over a sliding window of `block_size` elements
///
/// Absent elements contribute nothing but still occupy a slot. The sum is
/// `Tainted` while a NaN is among the trailing `block_size` elements.
///
/// A source shorter than `block_size` yields exactly one sum over whatever
/// it held, so the output length is `max(1, len - block_size + 1)`.
#[derive(Debug, Clone)]
pub struct MovingSum<I>
where
    I: Iterator,
    I::Item: Observation,
{
    iter: I,
    acc: BlockAccumulator<<I::Item as Observation>::Value>,
    done: bool,
}

impl<I> MovingSum<I>
where
    I: Iterator,
    I::Item: Observation,
{
    /// Creates a moving sum over `iter`
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
}

impl<I> Iterator for MovingSum<I>
where
    I: Iterator,
    I::Item: Observation,
{
    type Item = Sample<<I::Item as Observation>::Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if super::advance(&mut self.iter, &mut self.acc, Observation::sample) {
            return Some(self.acc.total());
        }
        self.done = true;
        // short source: one sum over the partial window
        (!self.acc.is_full()).then(|| self.acc.total())
    }
}
