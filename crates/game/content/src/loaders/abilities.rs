//! Ability catalog loader.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tactics_core::AbilityData;

use crate::loaders::{LoadResult, read_file};

/// Ability catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityCatalogFile {
    pub abilities: Vec<AbilityData>,
}

/// Loader for ability definitions from RON files.
pub struct AbilityLoader;

impl AbilityLoader {
    /// Load ability definitions from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing an AbilityCatalogFile
    pub fn load(path: &Path) -> LoadResult<Vec<AbilityData>> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    /// Parse ability definitions from RON source.
    pub fn parse(content: &str) -> LoadResult<Vec<AbilityData>> {
        let catalog: AbilityCatalogFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse ability catalog RON: {}", e))?;

        tracing::debug!("parsed {} ability definitions", catalog.abilities.len());
        Ok(catalog.abilities)
    }
}
