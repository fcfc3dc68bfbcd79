//! Error taxonomy shared by the ranking engine and every hypothesis test.

use thiserror::Error;

/// Errors raised by rank-based tests.
///
/// All variants are fatal precondition failures: no partial result is
/// produced. Advisory notices (small samples, unclamped p-values) are
/// reported as [`crate::Diagnostic`] values instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RankTestError {
    /// Paired sequences or matrix rows differ in length.
    #[error("Length mismatch in {context}: expected {expected}, got {actual}")]
    LengthMismatch {
        /// What was being compared (e.g. "paired samples", "row 2")
        context: String,
        /// Length of the reference sequence
        expected: usize,
        /// Length of the offending sequence
        actual: usize,
    },

    /// Input that cannot be ranked or tested (empty, NaN, wrong shape).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Every paired difference vanished, leaving nothing to test.
    #[error("Degenerate sample: {0}")]
    DegenerateSample(String),

    /// A reference distribution rejected its parameters.
    #[error("Distribution error: {0}")]
    Distribution(String),
}

impl RankTestError {
    /// Builds a [`RankTestError::LengthMismatch`].
    #[must_use]
    pub fn length_mismatch(context: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::LengthMismatch {
            context: context.into(),
            expected,
            actual,
        }
    }
}

pub type Result<T> = std::result::Result<T, RankTestError>;

/// Fails with [`RankTestError::LengthMismatch`] unless `x` and `y` pair up.
///
/// # Errors
/// Returns `LengthMismatch` when the lengths differ.
pub fn ensure_paired(x: &[f64], y: &[f64]) -> Result<()> {
    if x.len() != y.len() {
        return Err(RankTestError::length_mismatch(
            "paired samples",
            x.len(),
            y.len(),
        ));
    }
    Ok(())
}
