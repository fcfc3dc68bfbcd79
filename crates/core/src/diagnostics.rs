//! Advisory notices raised alongside test results.
//!
//! Diagnostics never abort a computation. They are returned on every result
//! so callers can inspect them, and are mirrored to `tracing` at `warn` level
//! when raised.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which hypothesis test raised a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TestKind {
    /// Sign test over paired samples
    Sign,
    /// Wilcoxon signed-rank test over paired samples
    Wilcoxon,
    /// Friedman test over a measurement matrix
    Friedman,
}

impl TestKind {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sign => "sign",
            Self::Wilcoxon => "wilcoxon",
            Self::Friedman => "friedman",
        }
    }
}

/// A non-fatal notice about the reliability of a result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Diagnostic {
    /// Too few non-zero paired differences for the normal approximation.
    SmallReducedSample {
        /// Pairs left after dropping exact ties
        observed: usize,
        /// Smallest size considered reliable
        minimum: usize,
    },
    /// Too few domains or methods for the chi-squared approximation.
    SmallDesign {
        /// Domains (columns) in the matrix
        domains: usize,
        /// Methods (rows) in the matrix
        methods: usize,
        /// Smallest domain count considered reliable
        min_domains: usize,
        /// Smallest method count considered reliable
        min_methods: usize,
    },
    /// A doubled one-sided probability exceeded 1 and was left unclamped.
    PValueAboveOne {
        /// Test that produced the value
        test: TestKind,
        /// The unclamped p-value
        p_value: f64,
    },
}

impl Diagnostic {
    /// Logs the diagnostic through `tracing` and hands it back.
    #[must_use]
    pub fn raise(self) -> Self {
        match &self {
            Self::SmallReducedSample { observed, minimum } => {
                tracing::warn!(
                    test = TestKind::Wilcoxon.name(),
                    observed,
                    minimum,
                    "{}",
                    self
                );
            }
            Self::SmallDesign {
                domains, methods, ..
            } => {
                tracing::warn!(
                    test = TestKind::Friedman.name(),
                    domains,
                    methods,
                    "{}",
                    self
                );
            }
            Self::PValueAboveOne { test, p_value } => {
                tracing::warn!(test = test.name(), p_value, "{}", self);
            }
        }
        self
    }

    /// Returns true for the small-sample family of notices.
    #[must_use]
    pub const fn is_small_sample(&self) -> bool {
        matches!(
            self,
            Self::SmallReducedSample { .. } | Self::SmallDesign { .. }
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SmallReducedSample { observed, minimum } => write!(
                f,
                "sample size after the reduction is too small (should be >= {minimum}, is {observed})"
            ),
            Self::SmallDesign {
                domains,
                methods,
                min_domains,
                min_methods,
            } => write!(
                f,
                "the number of domains or evaluated methods is too small \
                 (should be >= {min_domains} and >= {min_methods}, is {domains} and {methods})"
            ),
            Self::PValueAboveOne { test, p_value } => write!(
                f,
                "{} test p-value {p_value} exceeds 1 (doubled one-sided probability is not clamped)",
                test.name()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_reduced_sample_message() {
        let diagnostic = Diagnostic::SmallReducedSample {
            observed: 7,
            minimum: 10,
        };
        assert_eq!(
            diagnostic.to_string(),
            "sample size after the reduction is too small (should be >= 10, is 7)"
        );
        assert!(diagnostic.is_small_sample());
    }

    #[test]
    fn small_design_message_lists_both_dimensions() {
        let diagnostic = Diagnostic::SmallDesign {
            domains: 10,
            methods: 3,
            min_domains: 16,
            min_methods: 5,
        };
        let text = diagnostic.to_string();
        assert!(text.contains("is 10 and 3"), "message was {text}");
        assert!(diagnostic.is_small_sample());
    }

    #[test]
    fn p_value_above_one_is_not_small_sample() {
        let diagnostic = Diagnostic::PValueAboveOne {
            test: TestKind::Sign,
            p_value: 1.5,
        };
        assert!(!diagnostic.is_small_sample());
        assert!(diagnostic.to_string().starts_with("sign test"));
    }

    #[test]
    fn raise_returns_the_same_diagnostic() {
        let diagnostic = Diagnostic::SmallReducedSample {
            observed: 3,
            minimum: 10,
        };
        assert_eq!(diagnostic.clone().raise(), diagnostic);
    }

    #[test]
    fn diagnostic_serializes_correctly() {
        let diagnostic = Diagnostic::PValueAboveOne {
            test: TestKind::Friedman,
            p_value: 1.2,
        };
        let json = serde_json::to_string(&diagnostic).unwrap();
        assert!(json.contains("PValueAboveOne"));

        let deserialized: Diagnostic = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, diagnostic);
    }
}
