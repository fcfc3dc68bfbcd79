//! Core machinery for rank-based comparison of algorithms.
//!
//! Provides the tie-corrected ranking engine, the reference distributions,
//! the error taxonomy, the diagnostics side-channel, and configuration
//! shared by the tests in `algo-rank-hypothesis`.

pub mod config;
pub mod config_loader;
pub mod diagnostics;
pub mod distributions;
pub mod error;
pub mod ranking;

pub use config::{FriedmanConfig, NemenyiConfig, RankTestConfig, SignificanceLevel, WilcoxonConfig};
pub use config_loader::ConfigLoader;
pub use diagnostics::{Diagnostic, TestKind};
pub use error::{ensure_paired, RankTestError, Result};
pub use ranking::{rank, RankOrder};
