pub mod abilities;
pub mod common;
pub mod cooldowns;
pub mod resources;
pub mod status;
pub mod unit;

// Re-export identifiers and board coordinates
pub use common::{GridCoordinate, TeamId, UnitId};

// Re-export resource pools
pub use resources::{DamageKind, HealthChange, ResourceMeter};

// Re-export status effect types
pub use status::{
    StatusApplication, StatusEffectData, StatusEffectInstance, StatusEffectKind, StatusEffects,
};

// Re-export ability and cooldown types
pub use abilities::{AbilityData, AbilityKind, AbilityLoadout, PendingAbility, ResolvedAbility};
pub use cooldowns::{AbilityId, CooldownTable};

// Re-export the unit aggregate
pub use unit::{EndTurnReport, GroundClick, MoveOutcome, UnitSpec, UnitState};
