#![doc = include_str!("../README.md")]
#![no_std]
#![deny(
    unsafe_code,
    unused_imports,
    unused_variables,
    unused_must_use,
    missing_docs,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented
)]
#![allow(clippy::len_without_is_empty)]

#[macro_use]
extern crate alloc;

pub(crate) type Kbn<T> = compensated_summation::KahanBabuskaNeumaier<T>;

/// Emits a `tracing` debug event when the `tracing` feature is enabled
macro_rules! trace_debug {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::debug!($($arg)*);
    };
}
pub(crate) use trace_debug;

mod utils;

mod error;
pub use error::StatsError;

mod sample;
pub use sample::Sample;

mod numeric;
pub use numeric::{Numeric, Observation, Real, RunningTotal};

mod accumulator;
pub use accumulator::{BlockAccumulator, CumulativeAccumulator};

mod operators;
pub use operators::{
    CumulativeMovingAverage, CumulativeStdev, CumulativeVariance, MovingAverage, MovingStdev,
    MovingSum, MovingVariance, Stdev, WeightedMovingAverage,
};

mod traits;
pub use traits::SequenceStatistics;
