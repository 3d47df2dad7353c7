use core::fmt::Debug;

use num_traits::{Float, Num, Zero};

use crate::{Kbn, Sample};

/// A running total that supports both adding and removing terms
///
/// Floating representations use the Kahan-Babuska-Neumaier compensated sum so
/// that long sliding windows don't drift. Integers sum exactly with wrapping
/// arithmetic, so a total that overflows is back in range once the terms that
/// pushed it out are removed.
pub trait RunningTotal<T>: Debug + Clone + Default {
    /// Adds a term to the total
    fn include(&mut self, value: T);
    /// Removes a term previously added
    fn exclude(&mut self, value: T);
    /// Returns the current total
    fn value(&self) -> T;
}

/// Numeric representation the statistics are computed over
///
/// Provides the arithmetic (through [`Num`]), whether the representation can
/// carry a NaN sentinel, and the floating type averages and dispersion
/// measures are expressed in.
pub trait Numeric: Copy + Default + PartialOrd + Debug + Num {
    /// Floating representation used for averages, variance and stdev
    type Real: Numeric + Float;
    /// Running total accumulator for this representation
    type Total: RunningTotal<Self>;
    /// Whether the representation has a NaN sentinel
    const TAINTABLE: bool;

    /// Returns `true` if the value is the NaN sentinel, always `false` for
    /// representations that don't have one
    fn is_tainted(self) -> bool;

    /// Returns `true` unless the value is infinite or NaN
    fn is_finite(self) -> bool;

    /// Converts into the floating representation
    fn to_real(self) -> Self::Real;
}

/// A source element: a numeric value that may additionally be absent
///
/// Implemented for the plain numeric types (never absent) and for `Option`
/// of each (absent when `None`).
pub trait Observation: Copy {
    /// The underlying numeric representation
    type Value: Numeric;
    /// Whether elements of this type can be absent
    const NULLABLE: bool;

    /// Classifies the element as present, tainted or absent
    fn sample(self) -> Sample<Self::Value>;

    /// Classifies the element after converting it to the floating representation
    #[inline]
    fn real_sample(self) -> Sample<Real<Self>> {
        self.sample().map(Numeric::to_real)
    }

    /// Returns `true` unless the element is absent
    #[inline]
    fn is_present(self) -> bool {
        !self.sample().is_absent()
    }

    /// Returns the value, or zero when absent or tainted
    #[inline]
    fn value_or_zero(self) -> Self::Value {
        self.sample().present().unwrap_or_else(<Self::Value as Zero>::zero)
    }
}

/// The floating representation of an observation type
pub type Real<O> = <<O as Observation>::Value as Numeric>::Real;

impl RunningTotal<f64> for Kbn<f64> {
    #[inline]
    fn include(&mut self, value: f64) {
        *self += value;
    }

    #[inline]
    fn exclude(&mut self, value: f64) {
        *self -= value;
    }

    #[inline]
    fn value(&self) -> f64 {
        // compensation turns NaN once an infinity is added
        if self.sum.is_finite() {
            self.total()
        } else {
            self.sum
        }
    }
}

impl RunningTotal<f32> for Kbn<f32> {
    #[inline]
    fn include(&mut self, value: f32) {
        *self += value;
    }

    #[inline]
    fn exclude(&mut self, value: f32) {
        *self -= value;
    }

    #[inline]
    fn value(&self) -> f32 {
        // compensation turns NaN once an infinity is added
        if self.sum.is_finite() {
            self.total()
        } else {
            self.sum
        }
    }
}

macro_rules! impl_integer_total {
    ($($t:ty),*) => {$(
        impl RunningTotal<$t> for $t {
            #[inline]
            fn include(&mut self, value: $t) {
                *self = self.wrapping_add(value);
            }

            #[inline]
            fn exclude(&mut self, value: $t) {
                *self = self.wrapping_sub(value);
            }

            #[inline]
            fn value(&self) -> $t {
                *self
            }
        }
    )*};
}

impl_integer_total!(i32, i64);

macro_rules! impl_numeric {
    (
        $t:ty, $real:ty, $total:ty, $taintable:expr,
        |$v:ident| $is_tainted:expr, $is_finite:expr
    ) => {
        impl Numeric for $t {
            type Real = $real;
            type Total = $total;
            const TAINTABLE: bool = $taintable;

            #[inline]
            fn is_tainted(self) -> bool {
                let $v = self;
                $is_tainted
            }

            #[inline]
            fn is_finite(self) -> bool {
                let $v = self;
                $is_finite
            }

            #[inline]
            #[allow(clippy::unnecessary_cast)]
            fn to_real(self) -> $real {
                self as $real
            }
        }

        impl Observation for $t {
            type Value = $t;
            const NULLABLE: bool = false;

            #[inline]
            fn sample(self) -> Sample<$t> {
                if self.is_tainted() {
                    Sample::Tainted
                } else {
                    Sample::Present(self)
                }
            }
        }

        impl Observation for Option<$t> {
            type Value = $t;
            const NULLABLE: bool = true;

            #[inline]
            fn sample(self) -> Sample<$t> {
                self.map_or(Sample::Absent, Observation::sample)
            }
        }
    };
}

impl_numeric!(f64, f64, Kbn<f64>, true, |v| v.is_nan(), v.is_finite());
impl_numeric!(f32, f32, Kbn<f32>, true, |v| v.is_nan(), v.is_finite());
impl_numeric!(i64, f64, i64, false, |_v| false, true);
impl_numeric!(i32, f64, i32, false, |_v| false, true);
