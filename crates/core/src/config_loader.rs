use crate::config::RankTestConfig;
use anyhow::Result;
use figment::{
    providers::{Env, Format, Json, Serialized, Toml},
    Figment,
};
use std::path::Path;

const DEFAULT_TOML: &str = "config/RankTests.toml";
const DEFAULT_JSON: &str = "config/RankTests.json";
const ENV_PREFIX: &str = "RANK_TESTS_";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads test configuration by merging TOML and environment variables, then joining JSON.
    ///
    /// Precedence is environment over TOML over JSON over built-in defaults.
    /// Missing files are skipped, so with no configuration present this
    /// yields [`RankTestConfig::default`].
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration source cannot be parsed.
    pub fn load() -> Result<RankTestConfig> {
        Self::load_from(DEFAULT_TOML)
    }

    /// Loads test configuration with `path` in place of the default TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration source cannot be parsed.
    pub fn load_from(path: impl AsRef<Path>) -> Result<RankTestConfig> {
        // Joined providers only fill keys that are still unset
        let config: RankTestConfig = Figment::new()
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .join(Json::file(DEFAULT_JSON))
            .join(Serialized::defaults(RankTestConfig::default()))
            .extract()?;

        tracing::debug!(?config, "Loaded rank test configuration");
        Ok(config)
    }
}
