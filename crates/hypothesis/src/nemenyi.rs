//! Nemenyi post-hoc comparison of methods after a Friedman test.
//!
//! Two methods differ significantly when their average ranks are further
//! apart than the critical difference
//!
//! ```text
//! CD = q_alpha * sqrt(k (k+1) / (6 n))
//! ```
//!
//! where `q_alpha` is the studentized range statistic divided by `sqrt(2)`.

use crate::friedman::{average_ranks, matrix_shape};
use algo_rank_core::{NemenyiConfig, RankTestError, Result, SignificanceLevel};
use serde::{Deserialize, Serialize};

/// Largest number of methods with a tabulated critical value.
pub const MAX_METHODS: usize = 10;

// Indexed by k - 2 for k = 2..=10
const Q_ALPHA_05: [f64; 9] = [1.960, 2.343, 2.569, 2.728, 2.850, 2.949, 3.031, 3.102, 3.164];
const Q_ALPHA_10: [f64; 9] = [1.645, 2.052, 2.291, 2.459, 2.589, 2.693, 2.780, 2.855, 2.920];

/// Critical value `q_alpha` for `methods` methods.
///
/// # Errors
/// Returns `InvalidInput` outside `2..=MAX_METHODS`.
pub fn critical_value(methods: usize, significance: SignificanceLevel) -> Result<f64> {
    if !(2..=MAX_METHODS).contains(&methods) {
        return Err(RankTestError::InvalidInput(format!(
            "no Nemenyi critical value for {methods} methods (supported: 2..={MAX_METHODS})"
        )));
    }

    let table = match significance {
        SignificanceLevel::P05 => &Q_ALPHA_05,
        SignificanceLevel::P10 => &Q_ALPHA_10,
    };
    Ok(table[methods - 2])
}

/// Outcome for one unordered pair of methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairwiseComparison {
    /// Lower method index
    pub first: usize,
    /// Higher method index
    pub second: usize,
    /// `|R_first - R_second|`
    pub rank_difference: f64,
    /// Whether the difference exceeds the critical difference
    pub significant: bool,
}

/// Result of a Nemenyi post-hoc test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NemenyiResult {
    /// Average-rank gap a pair must exceed to differ significantly
    pub critical_difference: f64,
    /// Average rank of each method, in input row order
    pub average_ranks: Vec<f64>,
    /// Level the critical value was taken at
    pub significance: SignificanceLevel,
    /// Every pair `(i, j)` with `i < j`, in lexicographic order
    pub comparisons: Vec<PairwiseComparison>,
}

impl NemenyiResult {
    /// Looks up the comparison between methods `a` and `b` in either order.
    #[must_use]
    pub fn comparison(&self, a: usize, b: usize) -> Option<&PairwiseComparison> {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        self.comparisons
            .iter()
            .find(|c| c.first == first && c.second == second)
    }

    /// Pairs whose rank difference exceeds the critical difference.
    pub fn significant_pairs(&self) -> impl Iterator<Item = &PairwiseComparison> {
        self.comparisons.iter().filter(|c| c.significant)
    }
}

/// Runs the Nemenyi test at alpha = 0.05.
///
/// # Errors
/// See [`nemenyi_with_config`].
pub fn nemenyi<R: AsRef<[f64]>>(matrix: &[R]) -> Result<NemenyiResult> {
    nemenyi_with_config(matrix, &NemenyiConfig::default())
}

/// Runs the Nemenyi test on a `k x n` measurement matrix.
///
/// Uses the same best-first average ranks as the Friedman test.
///
/// # Errors
/// Returns `InvalidInput` for fewer than two or more than [`MAX_METHODS`]
/// methods, no domains, or NaN scores, and `LengthMismatch` for ragged rows.
pub fn nemenyi_with_config<R: AsRef<[f64]>>(
    matrix: &[R],
    config: &NemenyiConfig,
) -> Result<NemenyiResult> {
    let (k, n) = matrix_shape(matrix)?;
    let q_alpha = critical_value(k, config.significance)?;
    let average_ranks = average_ranks(matrix)?;

    let critical_difference = q_alpha * ((k * (k + 1)) as f64 / (6.0 * n as f64)).sqrt();

    let comparisons: Vec<PairwiseComparison> = (0..k)
        .flat_map(|first| (first + 1..k).map(move |second| (first, second)))
        .map(|(first, second)| {
            let rank_difference = (average_ranks[first] - average_ranks[second]).abs();
            PairwiseComparison {
                first,
                second,
                rank_difference,
                significant: rank_difference > critical_difference,
            }
        })
        .collect();

    tracing::debug!(
        k,
        n,
        critical_difference,
        significant = comparisons.iter().filter(|c| c.significant).count(),
        "Nemenyi test complete"
    );

    Ok(NemenyiResult {
        critical_difference,
        average_ranks,
        significance: config.significance,
        comparisons,
    })
}
