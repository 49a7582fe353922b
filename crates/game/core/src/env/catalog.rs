use crate::state::{AbilityData, StatusEffectData, StatusEffectKind};

/// Read-only source of ability definitions.
pub trait AbilityCatalog: Send + Sync {
    fn ability(&self, id: &str) -> Option<&AbilityData>;
}

/// Read-only source of status effect definitions.
pub trait StatusEffectCatalog: Send + Sync {
    fn status_effect(&self, kind: StatusEffectKind) -> Option<&StatusEffectData>;
}
