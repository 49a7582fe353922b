//! In-memory definition catalog.

use std::collections::HashMap;

use tactics_core::{
    AbilityCatalog, AbilityData, StatusEffectCatalog, StatusEffectData, StatusEffectKind,
};

/// Immutable ability and status effect definitions keyed by id / kind.
///
/// Later definitions replace earlier ones with the same key.
#[derive(Clone, Debug, Default)]
pub struct ContentCatalog {
    abilities: HashMap<String, AbilityData>,
    status_effects: HashMap<StatusEffectKind, StatusEffectData>,
}

impl ContentCatalog {
    pub fn new(
        abilities: impl IntoIterator<Item = AbilityData>,
        status_effects: impl IntoIterator<Item = StatusEffectData>,
    ) -> Self {
        let mut catalog = Self::default();
        for ability in abilities {
            catalog.insert_ability(ability);
        }
        for effect in status_effects {
            catalog.insert_status_effect(effect);
        }
        catalog
    }

    /// Catalog built from the data files embedded in this crate.
    #[cfg(feature = "loaders")]
    pub fn builtin() -> crate::loaders::LoadResult<Self> {
        use crate::loaders::{AbilityLoader, StatusEffectLoader};

        let abilities = AbilityLoader::parse(include_str!("../data/abilities.ron"))?;
        let status_effects = StatusEffectLoader::parse(include_str!("../data/status_effects.ron"))?;
        Ok(Self::new(abilities, status_effects))
    }

    pub fn insert_ability(&mut self, ability: AbilityData) {
        if let Some(previous) = self.abilities.insert(ability.id.to_string(), ability) {
            tracing::warn!("ability {} defined more than once", previous.id);
        }
    }

    pub fn insert_status_effect(&mut self, effect: StatusEffectData) {
        if let Some(previous) = self.status_effects.insert(effect.kind, effect) {
            tracing::warn!("status effect {} defined more than once", previous.kind);
        }
    }

    pub fn ability_count(&self) -> usize {
        self.abilities.len()
    }

    pub fn status_effect_count(&self) -> usize {
        self.status_effects.len()
    }

    /// Ability ids in sorted order.
    pub fn ability_ids(&self) -> Vec<&str> {
        let mut ids: Vec<_> = self.abilities.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl AbilityCatalog for ContentCatalog {
    fn ability(&self, id: &str) -> Option<&AbilityData> {
        self.abilities.get(id)
    }
}

impl StatusEffectCatalog for ContentCatalog {
    fn status_effect(&self, kind: StatusEffectKind) -> Option<&StatusEffectData> {
        self.status_effects.get(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactics_core::AbilityKind;

    #[test]
    fn lookup_by_id_and_kind() {
        let catalog = ContentCatalog::new(
            [AbilityData::new("strike", "Strike", AbilityKind::Attack)],
            [StatusEffectData::new(StatusEffectKind::Root, "Root", 1, 1)],
        );

        assert_eq!(catalog.ability("strike").map(|a| a.name.as_str()), Some("Strike"));
        assert!(catalog.ability("missing").is_none());
        assert!(catalog.status_effect(StatusEffectKind::Root).is_some());
        assert!(catalog.status_effect(StatusEffectKind::Burn).is_none());
    }

    #[test]
    fn later_definitions_replace_earlier_ones() {
        let catalog = ContentCatalog::new(
            [
                AbilityData::new("strike", "Strike", AbilityKind::Attack),
                AbilityData::new("strike", "Heavy Strike", AbilityKind::Attack).with_power(30),
            ],
            Vec::<StatusEffectData>::new(),
        );

        assert_eq!(catalog.ability_count(), 1);
        assert_eq!(catalog.ability("strike").map(|a| a.power), Some(30));
    }

    #[cfg(feature = "loaders")]
    #[test]
    fn builtin_data_parses() {
        let catalog = ContentCatalog::builtin().unwrap();

        assert!(catalog.ability_count() >= 4);
        assert!(catalog.status_effect(StatusEffectKind::Burn).is_some());
        // Every ability effect must resolve to a known status definition.
        for id in catalog.ability_ids() {
            let ability = catalog.ability(id).unwrap();
            if let Some(kind) = ability.effect {
                assert!(
                    catalog.status_effect(kind).is_some(),
                    "{id} references undefined {kind}"
                );
            }
        }
    }
}
