//! Configuration for the `whodunit` binary.
//!
//! A small TOML file with two sections:
//!
//! ```toml
//! [game]
//! # directory of seed JSON files; the built-in world is used when unset
//! data_dir = "worlds/manor"
//! # fixed RNG seed for reproducible runs; random when unset
//! rng_seed = 7
//!
//! [logging]
//! level = "info"
//! ```
//!
//! Every field has a default, and a missing file simply means defaults.
//! The engine itself never reads configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

use anyhow::{Context, Result};

/// Game-facing settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GameConfig {
    /// Seed data directory; `None` selects the built-in world.
    #[serde(default)]
    pub data_dir: Option<String>,
    /// Fixed seed for the game's randomness source.
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log level filter, overridden by `-v` flags.
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load a TOML config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        Ok(config)
    }

    /// Load a config file, falling back to defaults when it is absent.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_missing_sections() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.game.data_dir.is_none());
        assert!(config.game.rng_seed.is_none());
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn sections_parse() {
        let config: Config = toml::from_str(
            r#"
            [game]
            data_dir = "worlds/manor"
            rng_seed = 7

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.game.data_dir.as_deref(), Some("worlds/manor"));
        assert_eq!(config.game.rng_seed, Some(7));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = Config::load_or_default("definitely/not/here.toml").unwrap();
        assert!(config.game.data_dir.is_none());
    }
}
