//! Content factory for building catalogs from data files.

use std::path::{Path, PathBuf};

use tactics_core::{AbilityData, StatusEffectData, TacticsConfig};

use crate::catalog::ContentCatalog;
use crate::loaders::{AbilityLoader, ConfigLoader, LoadResult, StatusEffectLoader};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── abilities.ron
/// └── status_effects.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load unit defaults from `config.toml`.
    pub fn load_config(&self) -> LoadResult<TacticsConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load ability definitions from `abilities.ron`.
    pub fn load_abilities(&self) -> LoadResult<Vec<AbilityData>> {
        AbilityLoader::load(&self.data_dir.join("abilities.ron"))
    }

    /// Load status effect definitions from `status_effects.ron`.
    pub fn load_status_effects(&self) -> LoadResult<Vec<StatusEffectData>> {
        StatusEffectLoader::load(&self.data_dir.join("status_effects.ron"))
    }

    /// Load both definition files into one catalog.
    pub fn load_catalog(&self) -> LoadResult<ContentCatalog> {
        let catalog = ContentCatalog::new(self.load_abilities()?, self.load_status_effects()?);
        tracing::info!(
            "loaded {} abilities and {} status effects from {}",
            catalog.ability_count(),
            catalog.status_effect_count(),
            self.data_dir.display()
        );
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tactics_core::{AbilityCatalog, StatusEffectCatalog, StatusEffectKind};

    use super::*;

    #[test]
    fn loads_a_data_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("abilities.ron"),
            r#"(abilities: [(id: "mend", name: "Mend", kind: Heal, cooldown: 1, aura_cost: 5, range: 2, power: 15)])"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("status_effects.ron"),
            r#"(status_effects: [(kind: Regeneration, name: "Regeneration", base_duration: 3, max_stacks: 1)])"#,
        )
        .unwrap();
        fs::write(dir.path().join("config.toml"), "default_max_health = 80\n").unwrap();

        let factory = ContentFactory::new(dir.path());
        let catalog = factory.load_catalog().unwrap();
        let config = factory.load_config().unwrap();

        assert_eq!(catalog.ability("mend").map(|a| a.power), Some(15));
        assert!(catalog.status_effect(StatusEffectKind::Regeneration).is_some());
        assert_eq!(config.default_max_health, 80);
    }

    #[test]
    fn missing_file_fails_the_whole_catalog() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("abilities.ron"), "(abilities: [])").unwrap();

        let err = ContentFactory::new(dir.path()).load_catalog().unwrap_err();
        assert!(err.to_string().contains("status_effects.ron"));
    }

    #[test]
    fn shipped_data_directory_loads() {
        let factory = ContentFactory::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"));

        assert!(factory.load_catalog().is_ok());
        assert!(factory.load_config().is_ok());
    }
}
