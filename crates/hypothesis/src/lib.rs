//! Nonparametric tests for comparing algorithms across measurement domains.
//!
//! Provides:
//! - Sign test for two paired samples
//! - Wilcoxon signed-rank test for two paired samples
//! - Friedman test for `k` methods over `n` domains
//! - Nemenyi post-hoc comparison of Friedman average ranks
//!
//! Every test is a pure function over its inputs. Small-sample and
//! unclamped p-value notices are returned in each result's `diagnostics`
//! and logged through `tracing`.

pub mod friedman;
pub mod nemenyi;
pub mod sign;
pub mod wilcoxon;

pub use friedman::{average_ranks, friedman, friedman_with_config, FriedmanResult};
pub use nemenyi::{
    critical_value, nemenyi, nemenyi_with_config, NemenyiResult, PairwiseComparison,
};
pub use sign::{sign_test, SignTestResult};
pub use wilcoxon::{wilcoxon, wilcoxon_with_config, WilcoxonResult};

// Re-export the shared vocabulary so callers need a single dependency
pub use algo_rank_core::{
    Diagnostic, FriedmanConfig, NemenyiConfig, RankTestConfig, RankTestError, Result,
    SignificanceLevel, TestKind, WilcoxonConfig,
};
