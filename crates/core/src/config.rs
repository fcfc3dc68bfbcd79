use serde::{Deserialize, Serialize};

/// Significance level for decisions and tabulated critical values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignificanceLevel {
    /// alpha = 0.05
    #[default]
    P05,
    /// alpha = 0.10
    P10,
}

impl SignificanceLevel {
    #[must_use]
    pub const fn alpha(&self) -> f64 {
        match self {
            Self::P05 => 0.05,
            Self::P10 => 0.10,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankTestConfig {
    pub significance: SignificanceLevel,
    pub wilcoxon: WilcoxonConfig,
    pub friedman: FriedmanConfig,
    pub nemenyi: NemenyiConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WilcoxonConfig {
    /// Below this many non-tied pairs the normal approximation is flagged
    pub min_reduced_sample_size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FriedmanConfig {
    pub min_domains: usize,
    pub min_methods: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NemenyiConfig {
    pub significance: SignificanceLevel,
}

impl Default for WilcoxonConfig {
    fn default() -> Self {
        Self {
            min_reduced_sample_size: 10,
        }
    }
}

impl Default for FriedmanConfig {
    fn default() -> Self {
        Self {
            min_domains: 16,
            min_methods: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_thresholds() {
        let config = RankTestConfig::default();
        assert_eq!(config.wilcoxon.min_reduced_sample_size, 10);
        assert_eq!(config.friedman.min_domains, 16);
        assert_eq!(config.friedman.min_methods, 5);
        assert_eq!(config.nemenyi.significance, SignificanceLevel::P05);
    }

    #[test]
    fn significance_level_alpha() {
        assert!((SignificanceLevel::P05.alpha() - 0.05).abs() < f64::EPSILON);
        assert!((SignificanceLevel::P10.alpha() - 0.10).abs() < f64::EPSILON);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config: RankTestConfig =
            serde_json::from_str(r#"{"friedman": {"min_domains": 8}}"#).unwrap();
        assert_eq!(config.friedman.min_domains, 8);
        assert_eq!(config.friedman.min_methods, 5);
        assert_eq!(config.wilcoxon, WilcoxonConfig::default());
    }

    #[test]
    fn significance_level_uses_snake_case() {
        let json = serde_json::to_string(&SignificanceLevel::P10).unwrap();
        assert_eq!(json, "\"p10\"");
    }
}
