//! Status effect catalog loader.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tactics_core::StatusEffectData;

use crate::loaders::{LoadResult, read_file};

/// Status effect catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusEffectCatalogFile {
    pub status_effects: Vec<StatusEffectData>,
}

/// Loader for status effect definitions from RON files.
pub struct StatusEffectLoader;

impl StatusEffectLoader {
    /// Load status effect definitions from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<StatusEffectData>> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    /// Parse status effect definitions from RON source.
    ///
    /// `max_stacks` of zero is raised to one, matching [`StatusEffectData::new`].
    pub fn parse(content: &str) -> LoadResult<Vec<StatusEffectData>> {
        let catalog: StatusEffectCatalogFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse status effect catalog RON: {}", e))?;

        let effects: Vec<_> = catalog
            .status_effects
            .into_iter()
            .map(|mut effect| {
                effect.max_stacks = effect.max_stacks.max(1);
                effect
            })
            .collect();

        tracing::debug!("parsed {} status effect definitions", effects.len());
        Ok(effects)
    }
}
