use core::fmt;

/// Errors raised by the statistical operators
///
/// Block sizes are validated when an operator is built. Running out of
/// elements before the first aggregate surfaces as the first (and only) item
/// of the output sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsError {
    /// The requested block size is below the minimum of two
    InvalidBlockSize {
        /// The rejected block size
        block_size: usize,
    },
    /// The source ended before the operator could produce its first aggregate
    InsufficientElements {
        /// Number of elements the operator needs
        required: usize,
        /// Number of elements the source delivered
        found: usize,
    },
}

impl fmt::Display for StatsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatsError::InvalidBlockSize { block_size } => {
                write!(f, "invalid block size {block_size}, must be at least 2")
            }
            StatsError::InsufficientElements { required, found } => {
                write!(
                    f,
                    "insufficient elements: required {required}, found {found}"
                )
            }
        }
    }
}

impl core::error::Error for StatsError {}

/// Validates a block size, the smallest meaningful window holds two elements
pub(crate) fn check_block_size(block_size: usize) -> Result<usize, StatsError> {
    if block_size < 2 {
        crate::trace_debug!(block_size, "rejected block size");
        return Err(StatsError::InvalidBlockSize { block_size });
    }
    Ok(block_size)
}

/// Builds the error for a source that ended before the first aggregate
pub(crate) fn insufficient_elements(required: usize, found: usize) -> StatsError {
    crate::trace_debug!(required, found, "source ended before the first aggregate");
    StatsError::InsufficientElements { required, found }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn block_size_below_two_is_rejected() {
        assert_eq!(
            check_block_size(0),
            Err(StatsError::InvalidBlockSize { block_size: 0 })
        );
        assert_eq!(
            check_block_size(1),
            Err(StatsError::InvalidBlockSize { block_size: 1 })
        );
        assert_eq!(check_block_size(2), Ok(2));
    }

    #[test]
    fn display_messages() {
        assert_eq!(
            StatsError::InvalidBlockSize { block_size: 1 }.to_string(),
            "invalid block size 1, must be at least 2"
        );
        assert_eq!(
            StatsError::InsufficientElements {
                required: 4,
                found: 2
            }
            .to_string(),
            "insufficient elements: required 4, found 2"
        );
    }
}
