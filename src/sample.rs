use num_traits::Float;

/// A single slot of a source or output sequence
///
/// Separates the two ways a value can be unusable from the value itself:
/// an absent slot (a `None` in a nullable source) contributes nothing to an
/// aggregate, while a tainted slot (NaN) poisons every aggregate that covers it.
/// Both still occupy a window position and age out like any other value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Sample<T> {
    /// A usable value
    Present(T),
    /// A not-a-number value that poisons the aggregates covering it
    Tainted,
    /// A missing value
    #[default]
    Absent,
}

impl<T> Sample<T> {
    /// Returns the value if present
    #[inline]
    pub fn present(self) -> Option<T> {
        match self {
            Sample::Present(v) => Some(v),
            _ => None,
        }
    }

    /// Returns `true` if the slot carries a usable value
    #[inline]
    pub const fn is_present(&self) -> bool {
        matches!(self, Sample::Present(_))
    }

    /// Returns `true` if the slot is a not-a-number value
    #[inline]
    pub const fn is_tainted(&self) -> bool {
        matches!(self, Sample::Tainted)
    }

    /// Returns `true` if the slot is missing
    #[inline]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Sample::Absent)
    }

    /// Maps a present value, tainted and absent slots are kept as they are
    #[inline]
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Sample<U> {
        match self {
            Sample::Present(v) => Sample::Present(f(v)),
            Sample::Tainted => Sample::Tainted,
            Sample::Absent => Sample::Absent,
        }
    }

    /// Converts into an `Option`, dropping the tainted / absent distinction
    #[inline]
    pub fn into_option(self) -> Option<T> {
        self.present()
    }
}

impl<T: Float> Sample<T> {
    /// Converts into a plain float, tainted and absent slots become NaN
    ///
    /// # Examples
    ///
    /// ```
    /// # use seq_statistics::Sample;
    /// assert_eq!(Sample::Present(1.5).into_float(), 1.5);
    /// assert!(Sample::<f64>::Tainted.into_float().is_nan());
    /// assert!(Sample::<f64>::Absent.into_float().is_nan());
    /// ```
    #[inline]
    pub fn into_float(self) -> T {
        match self {
            Sample::Present(v) => v,
            _ => T::nan(),
        }
    }

    /// Converts into a nullable float: tainted slots become `Some(NaN)`,
    /// absent slots become `None`
    #[inline]
    pub fn into_nullable(self) -> Option<T> {
        match self {
            Sample::Present(v) => Some(v),
            Sample::Tainted => Some(T::nan()),
            Sample::Absent => None,
        }
    }
}

impl<T> From<Option<T>> for Sample<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Sample::Absent, Sample::Present)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicates() {
        let present = Sample::Present(2.0);
        assert!(present.is_present());
        assert!(!present.is_tainted());
        assert!(Sample::<f64>::Tainted.is_tainted());
        assert!(Sample::<f64>::Absent.is_absent());
        assert_eq!(Sample::<f64>::default(), Sample::Absent);
    }

    #[test]
    fn map_keeps_sentinels() {
        assert_eq!(Sample::Present(3).map(|v| v * 2), Sample::Present(6));
        assert_eq!(Sample::<i32>::Tainted.map(|v| v * 2), Sample::Tainted);
        assert_eq!(Sample::<i32>::Absent.map(|v| v * 2), Sample::Absent);
    }

    #[test]
    fn nullable_conversion() {
        assert_eq!(Sample::Present(1.0).into_nullable(), Some(1.0));
        assert!(
            Sample::<f32>::Tainted
                .into_nullable()
                .is_some_and(|v| v.is_nan())
        );
        assert_eq!(Sample::<f32>::Absent.into_nullable(), None);
        assert_eq!(Sample::<f32>::Tainted.into_option(), None);
    }

    #[test]
    fn from_option() {
        assert_eq!(Sample::from(Some(4)), Sample::Present(4));
        assert_eq!(Sample::<i32>::from(None), Sample::Absent);
    }
}
