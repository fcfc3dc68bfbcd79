//! Friedman test over a methods-by-domains measurement matrix.
//!
//! `matrix[i][j]` is the score of method `i` on domain `j`. Within each
//! domain the methods are ranked best-first (the highest score gets rank 1),
//! and the per-method average ranks feed a chi-squared statistic.

use algo_rank_core::distributions::chi_squared_sf;
use algo_rank_core::{
    rank, Diagnostic, FriedmanConfig, RankOrder, RankTestError, Result, SignificanceLevel,
    TestKind,
};
use serde::{Deserialize, Serialize};

/// Result of a Friedman test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FriedmanResult {
    /// Friedman statistic `Q`
    pub statistic: f64,
    /// Doubled chi-squared survival probability. Not clamped, so it may exceed 1.
    pub p_value: f64,
    /// Average rank of each method, in input row order
    pub average_ranks: Vec<f64>,
    /// Degrees of freedom (`k - 1`)
    pub degrees_of_freedom: usize,
    /// Number of methods `k`
    pub methods: usize,
    /// Number of domains `n`
    pub domains: usize,
    /// Advisory notices raised while testing
    pub diagnostics: Vec<Diagnostic>,
}

impl FriedmanResult {
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

    /// Index of the method with the lowest (best) average rank.
    ///
    /// Ties resolve to the earliest row.
    #[must_use]
    pub fn best_method(&self) -> Option<usize> {
        self.average_ranks
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
    }
}

/// Validates the matrix shape and returns `(methods, domains)`.
pub(crate) fn matrix_shape<R: AsRef<[f64]>>(matrix: &[R]) -> Result<(usize, usize)> {
    let k = matrix.len();
    if k < 2 {
        return Err(RankTestError::InvalidInput(format!(
            "at least two methods are required, got {k}"
        )));
    }

    let n = matrix[0].as_ref().len();
    for (i, row) in matrix.iter().enumerate().skip(1) {
        let len = row.as_ref().len();
        if len != n {
            return Err(RankTestError::length_mismatch(format!("row {i}"), n, len));
        }
    }

    if n == 0 {
        return Err(RankTestError::InvalidInput(
            "at least one domain is required".to_string(),
        ));
    }

    Ok((k, n))
}

/// Average best-first rank of each method across all domains.
///
/// Ties are resolved with midranks within each domain only.
///
/// # Errors
/// Returns `InvalidInput` for fewer than two methods, no domains, or NaN
/// scores, and `LengthMismatch` for ragged rows.
///
/// # Examples
/// ```
/// use algo_rank_hypothesis::average_ranks;
///
/// let matrix = [vec![0.9, 0.8], vec![0.7, 0.8]];
/// assert_eq!(average_ranks(&matrix).unwrap(), vec![1.25, 1.75]);
/// ```
pub fn average_ranks<R: AsRef<[f64]>>(matrix: &[R]) -> Result<Vec<f64>> {
    let (k, n) = matrix_shape(matrix)?;

    let mut rank_sums = vec![0.0; k];
    let mut column = Vec::with_capacity(k);

    for j in 0..n {
        column.clear();
        column.extend(matrix.iter().map(|row| row.as_ref()[j]));

        let ranks = rank(&column, RankOrder::LargestFirst)?;
        for (sum, r) in rank_sums.iter_mut().zip(ranks) {
            *sum += r;
        }
    }

    Ok(rank_sums.into_iter().map(|sum| sum / n as f64).collect())
}

/// Runs the Friedman test with default thresholds.
///
/// # Errors
/// See [`friedman_with_config`].
pub fn friedman<R: AsRef<[f64]>>(matrix: &[R]) -> Result<FriedmanResult> {
    friedman_with_config(matrix, &FriedmanConfig::default())
}

/// Runs the Friedman test on a `k x n` measurement matrix.
///
/// ```text
/// Q = 12 / (n k (k+1)) * sum_i (R_i n)^2 - 3 n (k+1)
/// ```
///
/// The p-value doubles the chi-squared survival function with `k - 1`
/// degrees of freedom. A [`Diagnostic::SmallDesign`] is attached when
/// `n < config.min_domains` or `k < config.min_methods`, and a
/// [`Diagnostic::PValueAboveOne`] when the doubled probability exceeds 1.
///
/// # Errors
/// Returns `InvalidInput` for fewer than two methods, no domains, or NaN
/// scores, and `LengthMismatch` for ragged rows.
pub fn friedman_with_config<R: AsRef<[f64]>>(
    matrix: &[R],
    config: &FriedmanConfig,
) -> Result<FriedmanResult> {
    let (k, n) = matrix_shape(matrix)?;

    let mut diagnostics = Vec::new();
    if n < config.min_domains || k < config.min_methods {
        diagnostics.push(
            Diagnostic::SmallDesign {
                domains: n,
                methods: k,
                min_domains: config.min_domains,
                min_methods: config.min_methods,
            }
            .raise(),
        );
    }

    let average_ranks = average_ranks(matrix)?;

    let n_f = n as f64;
    let k_f = k as f64;
    let squared_rank_sums: f64 = average_ranks.iter().map(|r| (r * n_f).powi(2)).sum();
    let statistic =
        12.0 / (n_f * k_f * (k_f + 1.0)) * squared_rank_sums - 3.0 * n_f * (k_f + 1.0);

    let degrees_of_freedom = k - 1;
    let p_value = 2.0 * chi_squared_sf(degrees_of_freedom as f64, statistic)?;

    if p_value > 1.0 {
        diagnostics.push(
            Diagnostic::PValueAboveOne {
                test: TestKind::Friedman,
                p_value,
            }
            .raise(),
        );
    }

    tracing::debug!(k, n, statistic, p_value, "Friedman test complete");

    Ok(FriedmanResult {
        statistic,
        p_value,
        average_ranks,
        degrees_of_freedom,
        methods: k,
        domains: n,
        diagnostics,
    })
}
