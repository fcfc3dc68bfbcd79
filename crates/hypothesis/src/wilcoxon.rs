//! Wilcoxon signed-rank test for two paired samples.
//!
//! Exact ties are discarded, the remaining absolute differences are ranked
//! (smallest magnitude first) and the smaller of the two signed rank sums is
//! compared against its normal approximation.

use algo_rank_core::distributions::normal_sf;
use algo_rank_core::{
    ensure_paired, rank, Diagnostic, RankOrder, RankTestError, Result, SignificanceLevel,
    WilcoxonConfig,
};
use serde::{Deserialize, Serialize};

/// Result of a Wilcoxon signed-rank test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WilcoxonResult {
    /// Test statistic `T = min(W+, W-)`
    pub statistic: f64,
    /// P-value (two-tailed, normal approximation)
    pub p_value: f64,
    /// Rank sum of pairs where `x > y`
    pub positive_rank_sum: f64,
    /// Rank sum of pairs where `x < y`
    pub negative_rank_sum: f64,
    /// Standardized statistic
    pub z_score: f64,
    /// Pairs left after dropping exact ties
    pub reduced_sample_size: usize,
    /// Advisory notices raised while testing
    pub diagnostics: Vec<Diagnostic>,
}

impl WilcoxonResult {
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

/// Runs the Wilcoxon signed-rank test with default thresholds.
///
/// # Errors
/// See [`wilcoxon_with_config`].
pub fn wilcoxon(x: &[f64], y: &[f64]) -> Result<WilcoxonResult> {
    wilcoxon_with_config(x, y, &WilcoxonConfig::default())
}

/// Runs the Wilcoxon signed-rank test on paired samples `x` and `y`.
///
/// Under the null hypothesis `T` is approximately normal with mean
/// `n(n+1)/4` and variance `n(n+1)(2n+1)/24`, where `n` is the number of
/// non-tied pairs. A [`Diagnostic::SmallReducedSample`] is attached when `n`
/// falls below `config.min_reduced_sample_size`; the test still runs.
///
/// # Errors
/// Returns `LengthMismatch` if `x` and `y` differ in length,
/// `DegenerateSample` if every pair is tied, and `InvalidInput` if a
/// difference is NaN.
pub fn wilcoxon_with_config(
    x: &[f64],
    y: &[f64],
    config: &WilcoxonConfig,
) -> Result<WilcoxonResult> {
    ensure_paired(x, y)?;

    let (positive, absolute_differences): (Vec<bool>, Vec<f64>) = x
        .iter()
        .zip(y.iter())
        .filter(|(x_i, y_i)| x_i != y_i)
        .map(|(x_i, y_i)| (x_i > y_i, (x_i - y_i).abs()))
        .unzip();

    let n = absolute_differences.len();
    if n == 0 {
        return Err(RankTestError::DegenerateSample(format!(
            "all {} paired differences are zero",
            x.len()
        )));
    }

    let mut diagnostics = Vec::new();
    if n < config.min_reduced_sample_size {
        diagnostics.push(
            Diagnostic::SmallReducedSample {
                observed: n,
                minimum: config.min_reduced_sample_size,
            }
            .raise(),
        );
    }

    let ranks = rank(&absolute_differences, RankOrder::SmallestFirst)?;

    let (positive_rank_sum, negative_rank_sum) = ranks.iter().zip(positive.iter()).fold(
        (0.0, 0.0),
        |(plus, minus), (&r, &is_positive)| {
            if is_positive {
                (plus + r, minus)
            } else {
                (plus, minus + r)
            }
        },
    );

    let statistic = f64::min(positive_rank_sum, negative_rank_sum);

    let n_f = n as f64;
    let mean = n_f * (n_f + 1.0) / 4.0;
    let std_dev = (n_f * (n_f + 1.0) * (2.0 * n_f + 1.0) / 24.0).sqrt();
    let z_score = (statistic - mean) / std_dev;

    let p_value = 2.0 * normal_sf(z_score.abs())?;

    tracing::debug!(n, statistic, z_score, p_value, "Wilcoxon signed-rank test complete");

    Ok(WilcoxonResult {
        statistic,
        p_value,
        positive_rank_sum,
        negative_rank_sum,
        z_score,
        reduced_sample_size: n,
        diagnostics,
    })
}
