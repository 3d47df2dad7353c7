mod moving_sum;
pub use moving_sum::MovingSum;

mod moving_average;
pub use moving_average::{CumulativeMovingAverage, MovingAverage};

mod weighted;
pub use weighted::WeightedMovingAverage;

mod variance;
pub(crate) use variance::variance_of;
pub use variance::{CumulativeVariance, MovingVariance};

mod stdev;
pub use stdev::{CumulativeStdev, MovingStdev, Stdev};

use crate::{BlockAccumulator, Numeric, Sample};

/// Pulls from `source` until the accumulator holds a full window
///
/// Returns `true` when a window is ready, `false` once the source is
/// exhausted. While priming several elements are consumed per call, after
/// that exactly one.
fn advance<I, T>(
    source: &mut I,
    acc: &mut BlockAccumulator<T>,
    lift: fn(I::Item) -> Sample<T>,
) -> bool
where
    I: Iterator,
    T: Numeric,
{
    for item in source.by_ref() {
        acc.push(lift(item));
        if acc.is_full() {
            return true;
        }
    }
    false
}
