//! Authoritative unit state representation.
//!
//! This module owns the data structures that describe a unit's resources,
//! status effects, cooldowns and pending actions. Hosts query this state freely
//! but mutate it exclusively through [`UnitState`] operations.
pub mod error;
pub mod types;

pub use error::UnitError;
pub use types::{
    AbilityData, AbilityId, AbilityKind, AbilityLoadout, CooldownTable, DamageKind,
    EndTurnReport, GridCoordinate, GroundClick, HealthChange, MoveOutcome, PendingAbility,
    ResolvedAbility, ResourceMeter, StatusApplication, StatusEffectData, StatusEffectInstance,
    StatusEffectKind, StatusEffects, TeamId, UnitId, UnitSpec, UnitState,
};
