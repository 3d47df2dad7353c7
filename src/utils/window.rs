use alloc::boxed::Box;

/// A fixed-size circular buffer holding the trailing slots of a sequence.
///
/// The buffer starts out filled with `T::default()`, so pushing into a window
/// that is still priming evicts a default value. With [`Sample`](crate::Sample)
/// slots the default is `Absent`, which an accumulator can drop as a no-op.
#[derive(Debug, Clone)]
pub struct Window<T> {
    /// The buffer that stores the values
    buf: Box<[T]>,
    /// The period of the window
    period: usize,
    /// Slot of the next write, which is also the oldest slot once full
    pos: usize,
    /// Whether the buffer has hit full once
    full: bool,
}

impl<T> Window<T> {
    /// Creates a new window with the specified period
    ///
    /// # Panics
    ///
    /// Panics if `period` is zero, callers validate block sizes first
    pub fn new(period: usize) -> Self
    where
        T: Default + Clone,
    {
        assert!(period > 0, "period can not be zero");

        Self {
            buf: vec![T::default(); period].into_boxed_slice(),
            pos: 0,
            full: false,
            period,
        }
    }

    /// Clears the buffer, resetting its state.
    pub fn reset(&mut self)
    where
        T: Default + Clone,
    {
        self.buf.fill(T::default());
        self.pos = 0;
        self.full = false;
    }

    /// Returns the period of the window
    pub const fn period(&self) -> usize {
        self.period
    }

    /// Returns `true` once `period` values have been pushed
    pub const fn is_full(&self) -> bool {
        self.full
    }

    /// Returns the current number of values in the window
    pub const fn len(&self) -> usize {
        if self.full { self.period } else { self.pos }
    }

    /// Pushes a new value into the window and returns the value it replaced
    ///
    /// # Arguments
    ///
    /// * `value` - The value to push into the window
    ///
    /// # Returns
    ///
    /// * `T` - The oldest value once full, `T::default()` while priming
    pub fn next(&mut self, value: T) -> T {
        let prev = core::mem::replace(&mut self.buf[self.pos], value);

        self.pos = (self.pos + 1) % self.period;

        if self.pos == 0 {
            self.full = true;
        }
        prev
    }

    /// Returns an iterator over the values, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        let start = if self.full { self.pos } else { 0 };
        (0..self.len()).map(move |i| &self.buf[(start + i) % self.period])
    }
}
