mod block;
pub use block::BlockAccumulator;

mod cumulative;
pub use cumulative::CumulativeAccumulator;

use num_traits::Float;

use crate::{Numeric, Sample};

/// Average of `present` values summing to `sum`
///
/// An empty span is `Absent` for nullable sources and `Tainted` otherwise.
#[inline]
fn mean<T: Numeric + Float>(sum: T, present: usize, nullable: bool) -> Sample<T> {
    if present == 0 {
        return if nullable {
            Sample::Absent
        } else {
            Sample::Tainted
        };
    }
    Sample::Present(sum / count(present))
}

/// Sample variance of `present` values from their sum and sum of squares
#[inline]
fn variance<T: Numeric + Float>(sum: T, sum_sq: T, present: usize) -> Sample<T> {
    if present < 2 {
        return Sample::Absent;
    }
    let n = count::<T>(present);
    Sample::Present((sum_sq - sum * (sum / n)) / (n - T::one()))
}

/// Square root of a variance, clamping the rounding residue below zero
#[inline]
pub(crate) fn stdev<T: Float>(variance: Sample<T>) -> Sample<T> {
    variance.map(|v| v.max(T::zero()).sqrt())
}

#[inline]
fn count<T: Float>(n: usize) -> T {
    T::from(n).unwrap_or_else(T::nan)
}
