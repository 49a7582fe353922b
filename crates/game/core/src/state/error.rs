//! Unit state errors.
//!
//! Every operation on [`UnitState`](crate::state::UnitState) that can refuse its
//! input reports why through [`UnitError`]. A returned error guarantees the unit
//! was not modified.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{AbilityId, GridCoordinate, UnitId};

/// Rejections produced by the unit turn-resolution state machine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnitError {
    /// Unit is defeated; defeat permanently gates mutation.
    #[error("unit {unit} is defeated")]
    Defeated { unit: UnitId },

    /// No definition was supplied or found in the catalog.
    #[error("definition not found")]
    MissingDefinition,

    /// Status effect list is full (max capacity reached).
    #[error("status effect list is full (max: {max})")]
    StatusEffectsFull { max: usize },

    /// Ability loadout is full (max capacity reached).
    #[error("ability loadout is full (max: {max})")]
    AbilityLoadoutFull { max: usize },

    /// Move target is not in the current valid-move set.
    #[error("move target {target} is not reachable")]
    InvalidMoveTarget { target: GridCoordinate },

    /// Unit is still executing a previous movement.
    #[error("unit {unit} is already moving")]
    AlreadyMoving { unit: UnitId },

    /// Movement completion for a destination that is not the pending move.
    #[error("unit {unit} has no pending move to {destination}")]
    UnexpectedMoveCompletion {
        unit: UnitId,
        destination: GridCoordinate,
    },

    /// Ability index does not address the loadout.
    #[error("ability index {index} out of range (loadout size: {len})")]
    AbilityIndexOutOfRange { index: usize, len: usize },

    /// Ability is cooling down.
    #[error("ability {ability} on cooldown for {remaining} turn(s)")]
    AbilityOnCooldown { ability: AbilityId, remaining: u32 },

    /// Not enough aura to pay the ability cost.
    #[error("insufficient aura (required: {required}, available: {available})")]
    InsufficientAura { required: u32, available: u32 },

    /// Targeting or committing without a planned ability.
    #[error("no ability is pending")]
    NoPendingAbility,

    /// Committing a pending ability that has no target yet.
    #[error("pending ability {ability} has no target")]
    NoAbilityTarget { ability: AbilityId },

    /// Ability target lies outside the ability's range.
    #[error("target {target} is out of range (distance: {distance}, range: {range})")]
    TargetOutOfRange {
        target: GridCoordinate,
        distance: u32,
        range: u32,
    },
}

impl GameError for UnitError {
    fn severity(&self) -> ErrorSeverity {
        use UnitError::*;
        match self {
            // Conditions that clear up as turns pass or state changes
            AlreadyMoving { .. } | AbilityOnCooldown { .. } | InsufficientAura { .. } => {
                ErrorSeverity::Recoverable
            }

            Defeated { .. }
            | MissingDefinition
            | StatusEffectsFull { .. }
            | AbilityLoadoutFull { .. }
            | InvalidMoveTarget { .. }
            | UnexpectedMoveCompletion { .. }
            | AbilityIndexOutOfRange { .. }
            | NoPendingAbility
            | NoAbilityTarget { .. }
            | TargetOutOfRange { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use UnitError::*;
        match self {
            Defeated { .. } => "UNIT_DEFEATED",
            MissingDefinition => "UNIT_MISSING_DEFINITION",
            StatusEffectsFull { .. } => "UNIT_STATUS_EFFECTS_FULL",
            AbilityLoadoutFull { .. } => "UNIT_ABILITY_LOADOUT_FULL",
            InvalidMoveTarget { .. } => "UNIT_INVALID_MOVE_TARGET",
            AlreadyMoving { .. } => "UNIT_ALREADY_MOVING",
            UnexpectedMoveCompletion { .. } => "UNIT_UNEXPECTED_MOVE_COMPLETION",
            AbilityIndexOutOfRange { .. } => "UNIT_ABILITY_INDEX_OUT_OF_RANGE",
            AbilityOnCooldown { .. } => "UNIT_ABILITY_ON_COOLDOWN",
            InsufficientAura { .. } => "UNIT_INSUFFICIENT_AURA",
            NoPendingAbility => "UNIT_NO_PENDING_ABILITY",
            NoAbilityTarget { .. } => "UNIT_NO_ABILITY_TARGET",
            TargetOutOfRange { .. } => "UNIT_TARGET_OUT_OF_RANGE",
        }
    }
}
