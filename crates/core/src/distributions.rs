//! Reference distributions backing the hypothesis tests.
//!
//! Thin wrappers over `statrs` so that the tests only see plain `f64`
//! arithmetic and a single error type.

use crate::error::{RankTestError, Result};
use statrs::distribution::{ChiSquared, ContinuousCDF, Normal};
use statrs::function::factorial::{binomial, ln_binomial};

/// Above this many trials `C(n, i) * 0.5^n` is evaluated in log space to
/// avoid `inf * 0`.
const DIRECT_BINOMIAL_LIMIT: u64 = 1000;

/// Binomial coefficient `C(n, k)`; zero when `k > n`.
#[must_use]
pub fn binomial_coefficient(n: u64, k: u64) -> f64 {
    binomial(n, k)
}

/// Cumulative probability of `0..=successes` heads in `trials` fair coin flips.
///
/// # Examples
/// ```
/// use algo_rank_core::distributions::fair_coin_cdf;
///
/// // (1 + 10 + 45) / 1024
/// assert_eq!(fair_coin_cdf(2, 10), 0.0546875);
/// ```
#[must_use]
pub fn fair_coin_cdf(successes: u64, trials: u64) -> f64 {
    let upper = successes.min(trials);

    if trials <= DIRECT_BINOMIAL_LIMIT {
        let half_pow = 0.5f64.powi(trials as i32);
        (0..=upper)
            .map(|i| binomial_coefficient(trials, i) * half_pow)
            .sum()
    } else {
        let ln_half_pow = trials as f64 * std::f64::consts::LN_2;
        (0..=upper)
            .map(|i| (ln_binomial(trials, i) - ln_half_pow).exp())
            .sum()
    }
}

/// Standard normal survival function `P(Z >= z)`.
///
/// # Errors
/// Returns `Distribution` if the standard normal cannot be constructed.
pub fn normal_sf(z: f64) -> Result<f64> {
    let standard = Normal::new(0.0, 1.0)
        .map_err(|e| RankTestError::Distribution(format!("standard normal: {e}")))?;
    Ok(standard.sf(z))
}

/// Chi-squared survival function `P(X >= x)` with `df` degrees of freedom.
///
/// # Errors
/// Returns `Distribution` if `df` is not a positive finite number.
pub fn chi_squared_sf(df: f64, x: f64) -> Result<f64> {
    let chi_squared = ChiSquared::new(df)
        .map_err(|e| RankTestError::Distribution(format!("chi-squared with df={df}: {e}")))?;
    Ok(chi_squared.sf(x))
}
