//! Unit defaults loader.

use std::path::Path;

use tactics_core::TacticsConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`TacticsConfig`] from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys keep their built-in defaults.
    pub fn load(path: &Path) -> LoadResult<TacticsConfig> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<TacticsConfig> {
        let config: TacticsConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ConfigLoader::parse("default_movement_points = 5\n").unwrap();

        assert_eq!(config.default_movement_points, 5);
        assert_eq!(config.default_max_health, TacticsConfig::DEFAULT_MAX_HEALTH);
        assert_eq!(config.default_max_aura, TacticsConfig::DEFAULT_MAX_AURA);
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(ConfigLoader::parse("").unwrap(), TacticsConfig::default());
    }

    #[test]
    fn wrong_type_is_an_error() {
        assert!(ConfigLoader::parse("default_max_health = \"lots\"").is_err());
    }
}
