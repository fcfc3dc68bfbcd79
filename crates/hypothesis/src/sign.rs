//! Sign test for two paired samples.
//!
//! Counts how often each sample outperforms the other. Exact ties are split
//! half-and-half between both tallies so every pair contributes to `n`.

use algo_rank_core::distributions::fair_coin_cdf;
use algo_rank_core::{ensure_paired, Diagnostic, Result, SignificanceLevel, TestKind};
use serde::{Deserialize, Serialize};

/// Result of a sign test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignTestResult {
    /// Doubled one-sided binomial tail. Not clamped, so it may exceed 1.
    pub p_value: f64,
    /// Pairs where `x` beat `y`, plus half of the ties
    pub wins_x: f64,
    /// Pairs where `y` beat `x`, plus half of the ties
    pub wins_y: f64,
    /// Number of pairs
    pub sample_size: usize,
    /// Advisory notices raised while testing
    pub diagnostics: Vec<Diagnostic>,
}

impl SignTestResult {
    /// Returns true if the p-value falls below `alpha`.
    #[must_use]
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }

    /// Returns true if the p-value falls below the alpha of `level`.
    ///
    /// Pass [`RankTestConfig::significance`](algo_rank_core::RankTestConfig)
    /// to decide at the configured level.
    #[must_use]
    pub fn is_significant_at(&self, level: SignificanceLevel) -> bool {
        self.is_significant(level.alpha())
    }
}

/// Runs the two-sided sign test on paired samples `x` and `y`.
///
/// With `m = floor(min(wins_x, wins_y))`, the p-value is
/// `2 * sum_{i=0..=m} C(n, i) * 0.5^n`. The doubled sum is reported as is;
/// when it exceeds 1 a [`Diagnostic::PValueAboveOne`] is attached.
///
/// # Errors
/// Returns `LengthMismatch` if `x` and `y` differ in length.
///
/// # Examples
/// ```
/// use algo_rank_hypothesis::sign_test;
///
/// let x = [142.0, 140.0, 144.0, 144.0, 142.0, 146.0, 149.0, 150.0, 142.0, 148.0];
/// let y = [138.0, 136.0, 147.0, 139.0, 143.0, 141.0, 143.0, 145.0, 136.0, 146.0];
///
/// let result = sign_test(&x, &y).unwrap();
/// assert_eq!(result.p_value, 0.109375);
/// ```
pub fn sign_test(x: &[f64], y: &[f64]) -> Result<SignTestResult> {
    ensure_paired(x, y)?;

    let mut wins_x = 0.0;
    let mut wins_y = 0.0;

    for (x_i, y_i) in x.iter().zip(y.iter()) {
        if x_i > y_i {
            wins_x += 1.0;
        } else if y_i > x_i {
            wins_y += 1.0;
        } else {
            wins_x += 0.5;
            wins_y += 0.5;
        }
    }

    let n = x.len();
    let m = f64::min(wins_x, wins_y).floor() as u64;

    // One-sided tail, adjusted for the two-sidedness
    let p_value = 2.0 * fair_coin_cdf(m, n as u64);

    let mut diagnostics = Vec::new();
    if p_value > 1.0 {
        diagnostics.push(
            Diagnostic::PValueAboveOne {
                test: TestKind::Sign,
                p_value,
            }
            .raise(),
        );
    }

    tracing::debug!(n, wins_x, wins_y, p_value, "Sign test complete");

    Ok(SignTestResult {
        p_value,
        wins_x,
        wins_y,
        sample_size: n,
        diagnostics,
    })
}
