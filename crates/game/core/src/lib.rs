//! Turn-scoped unit logic for grid tactics games.
//!
//! `tactics-core` defines the canonical rules for a single unit (resources,
//! status effects, ability cooldowns, movement and ability targeting) and
//! exposes pure APIs that hosts drive from their own turn loop. All unit
//! mutation flows through [`UnitState`], and the collaborators it needs
//! (occupancy, movement execution, definition catalogs, event delivery) are
//! passed in through the traits in [`env`] and [`event`].
pub mod config;
pub mod env;
pub mod error;
pub mod event;
pub mod movement;
pub mod state;

pub use config::TacticsConfig;
pub use env::{
    AbilityCatalog, GridDimensions, GridOccupancy, MoveQueue, MoveRequest, MovementExecutor,
    OccupancyIndex, StatusEffectCatalog, UnitContext,
};
pub use error::{ErrorSeverity, GameError};
pub use event::{EventBus, EventSink, SubscriptionId, Topic, UnitEvent};
pub use movement::{MovementValidator, valid_move_positions};
pub use state::{
    AbilityData, AbilityId, AbilityKind, AbilityLoadout, CooldownTable, DamageKind,
    EndTurnReport, GridCoordinate, GroundClick, HealthChange, MoveOutcome, PendingAbility,
    ResolvedAbility, ResourceMeter, StatusApplication, StatusEffectData, StatusEffectInstance,
    StatusEffectKind, StatusEffects, TeamId, UnitError, UnitId, UnitSpec, UnitState,
};
