//! Tie-corrected ranking shared by the Wilcoxon and Friedman tests.
//!
//! Each element's provisional rank is one plus the number of elements that
//! are strictly more extreme under the chosen [`RankOrder`]. Elements that
//! share a provisional rank `r` form a tie group of size `c` and all receive
//! the midrank `r + (c - 1) / 2`, so the ranks of any input always sum to
//! `n(n+1)/2`.

use crate::error::{RankTestError, Result};
use serde::{Deserialize, Serialize};

/// Which end of the value range receives rank 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankOrder {
    /// The largest value gets rank 1 (best score first).
    LargestFirst,
    /// The smallest value gets rank 1 (smallest magnitude first).
    SmallestFirst,
}

impl RankOrder {
    /// Returns true if `other` outranks `value` under this order.
    #[inline]
    fn is_more_extreme(self, other: f64, value: f64) -> bool {
        match self {
            Self::LargestFirst => other > value,
            Self::SmallestFirst => other < value,
        }
    }
}

/// Ranks `values` under `order`, resolving ties with midranks.
///
/// The returned vector has the same length and index correspondence as the
/// input. Ranks are integers except inside tie groups.
///
/// # Arguments
/// * `values` - Measurements to rank
/// * `order` - Which end of the range receives rank 1
///
/// # Errors
/// Returns `InvalidInput` if `values` is empty or contains NaN.
///
/// # Examples
/// ```
/// use algo_rank_core::ranking::{rank, RankOrder};
///
/// let ranks = rank(&[10.0, 30.0, 20.0, 20.0, 20.0], RankOrder::LargestFirst).unwrap();
/// assert_eq!(ranks, vec![5.0, 1.0, 3.0, 3.0, 3.0]);
/// ```
pub fn rank(values: &[f64], order: RankOrder) -> Result<Vec<f64>> {
    if values.is_empty() {
        return Err(RankTestError::InvalidInput(
            "cannot rank an empty sequence".to_string(),
        ));
    }
    if let Some(position) = values.iter().position(|v| v.is_nan()) {
        return Err(RankTestError::InvalidInput(format!(
            "cannot rank NaN at position {position}"
        )));
    }

    let n = values.len();

    // Provisional ranks live in 1..=n
    let provisional: Vec<usize> = values
        .iter()
        .map(|&value| {
            1 + values
                .iter()
                .filter(|&&other| order.is_more_extreme(other, value))
                .count()
        })
        .collect();

    let mut group_sizes = vec![0usize; n + 1];
    for &r in &provisional {
        group_sizes[r] += 1;
    }

    Ok(provisional
        .iter()
        .map(|&r| r as f64 + 0.5 * (group_sizes[r] - 1) as f64)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ============================================
    // rank Tests
    // ============================================

    #[test]
    fn rank_distinct_largest_first() {
        let ranks = rank(&[3.0, 1.0, 2.0], RankOrder::LargestFirst).unwrap();
        assert_eq!(ranks, vec![1.0, 3.0, 2.0]);
    }

    #[test]
    fn rank_distinct_smallest_first() {
        let ranks = rank(&[3.0, 1.0, 2.0], RankOrder::SmallestFirst).unwrap();
        assert_eq!(ranks, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn rank_three_way_tie_gets_midrank() {
        // Tied for ranks 2, 3, 4
        let ranks = rank(&[9.0, 5.0, 5.0, 5.0, 1.0], RankOrder::LargestFirst).unwrap();
        assert_eq!(ranks, vec![1.0, 3.0, 3.0, 3.0, 5.0]);
    }

    #[test]
    fn rank_two_way_tie_gets_half_rank() {
        let ranks = rank(&[0.1, 0.4, 0.4, 0.2], RankOrder::SmallestFirst).unwrap();
        assert_eq!(ranks, vec![1.0, 3.5, 3.5, 2.0]);
    }

    #[test]
    fn rank_multiple_tie_groups() {
        let ranks = rank(&[1.0, 1.0, 2.0, 2.0, 2.0, 3.0], RankOrder::SmallestFirst).unwrap();
        assert_eq!(ranks, vec![1.5, 1.5, 4.0, 4.0, 4.0, 6.0]);
    }

    #[test]
    fn rank_fully_tied_input() {
        let ranks = rank(&[7.0; 4], RankOrder::LargestFirst).unwrap();
        assert!(ranks.iter().all(|&r| (r - 2.5).abs() < f64::EPSILON));

        let ranks = rank(&[7.0; 5], RankOrder::SmallestFirst).unwrap();
        assert!(ranks.iter().all(|&r| (r - 3.0).abs() < f64::EPSILON));
    }

    #[test]
    fn rank_single_element() {
        let ranks = rank(&[42.0], RankOrder::LargestFirst).unwrap();
        assert_eq!(ranks, vec![1.0]);
    }

    #[test]
    fn rank_empty_is_invalid() {
        let err = rank(&[], RankOrder::LargestFirst).unwrap_err();
        assert!(matches!(err, RankTestError::InvalidInput(_)));
    }

    #[test]
    fn rank_nan_is_invalid() {
        let err = rank(&[1.0, f64::NAN], RankOrder::SmallestFirst).unwrap_err();
        assert!(
            matches!(err, RankTestError::InvalidInput(ref msg) if msg.contains("position 1")),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn rank_orders_are_mirror_images() {
        let values = [4.0, 8.0, 8.0, 1.0, 6.0];
        let largest = rank(&values, RankOrder::LargestFirst).unwrap();
        let smallest = rank(&values, RankOrder::SmallestFirst).unwrap();
        let n = values.len() as f64;
        for (l, s) in largest.iter().zip(smallest.iter()) {
            assert!((l + s - (n + 1.0)).abs() < 1e-12, "{l} + {s} != n + 1");
        }
    }

    // ============================================
    // Properties
    // ============================================

    fn order_strategy() -> impl Strategy<Value = RankOrder> {
        prop_oneof![Just(RankOrder::LargestFirst), Just(RankOrder::SmallestFirst)]
    }

    // Small integer-valued samples so ties are frequent.
    fn tie_heavy_values() -> impl Strategy<Value = Vec<f64>> {
        prop::collection::vec((0i32..6).prop_map(f64::from), 1..40)
    }

    // Values paired with an arbitrary permutation of their indices.
    fn shuffled_values() -> impl Strategy<Value = (Vec<f64>, Vec<usize>)> {
        tie_heavy_values().prop_flat_map(|values| {
            let indices: Vec<usize> = (0..values.len()).collect();
            (Just(values), Just(indices).prop_shuffle())
        })
    }

    proptest! {
        #[test]
        fn prop_rank_sum_is_triangular(values in tie_heavy_values(), order in order_strategy()) {
            let ranks = rank(&values, order).unwrap();
            let n = values.len() as f64;
            let total: f64 = ranks.iter().sum();
            prop_assert!((total - n * (n + 1.0) / 2.0).abs() < 1e-9);
        }

        #[test]
        fn prop_ranks_follow_values_under_permutation(
            (values, permutation) in shuffled_values(),
            order in order_strategy(),
        ) {
            let permuted: Vec<f64> = permutation.iter().map(|&i| values[i]).collect();

            let ranks = rank(&values, order).unwrap();
            let permuted_ranks = rank(&permuted, order).unwrap();

            for (position, &source) in permutation.iter().enumerate() {
                prop_assert!((permuted_ranks[position] - ranks[source]).abs() < 1e-12);
            }
        }

        #[test]
        fn prop_distinct_values_get_integer_ranks(
            values in prop::collection::hash_set(-1000i32..1000, 1..30),
            order in order_strategy(),
        ) {
            let values: Vec<f64> = values.into_iter().map(f64::from).collect();
            let mut ranks = rank(&values, order).unwrap();
            ranks.sort_by(|a, b| a.total_cmp(b));
            let expected: Vec<f64> = (1..=values.len()).map(|r| r as f64).collect();
            prop_assert_eq!(ranks, expected);
        }

        #[test]
        fn prop_ranks_lie_within_bounds(values in tie_heavy_values(), order in order_strategy()) {
            let ranks = rank(&values, order).unwrap();
            let n = values.len() as f64;
            prop_assert!(ranks.iter().all(|&r| (1.0..=n).contains(&r)));
        }
    }
}
