use assert_approx_eq::assert_approx_eq;

use crate::Sample;

/// Compares sample sequences, present values within `eps`
pub(crate) fn assert_samples_approx(actual: &[Sample<f64>], expected: &[Sample<f64>], eps: f64) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "length mismatch: {actual:?} vs {expected:?}"
    );
    for (a, e) in actual.iter().zip(expected) {
        match (a, e) {
            (Sample::Present(a), Sample::Present(e)) => assert_approx_eq!(a, e, eps),
            _ => assert_eq!(a, e),
        }
    }
}
