//! Ability definitions and the per-unit ability loadout.
//!
//! # Design
//!
//! - **AbilityData**: Immutable catalog definition (cost, cooldown, range, effect)
//! - **PendingAbility**: A planned use waiting for a target and commit
//! - **ResolvedAbility**: A committed use handed to the external executor
//!
//! Costs (aura, cooldown) are only paid at commit time, so a pending ability
//! can be cancelled without any rollback.

use arrayvec::ArrayVec;

use super::cooldowns::AbilityId;
use super::status::StatusEffectKind;
use crate::config::TacticsConfig;
use crate::state::{GridCoordinate, UnitId};

/// Broad category of an ability, used by hosts to route resolution.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AbilityKind {
    /// Deals `power` damage to the target.
    Attack,
    /// Restores `power` health to the target.
    Heal,
    /// Applies a beneficial status effect.
    Buff,
    /// Applies a harmful status effect.
    Debuff,
    Utility,
}

/// Immutable definition of an ability, provided by the content catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityData {
    pub id: AbilityId,
    pub name: String,
    pub kind: AbilityKind,
    /// Turns the ability stays unavailable after use.
    pub cooldown: u32,
    pub aura_cost: u32,
    /// Maximum Chebyshev distance from the caster to the target tile.
    pub range: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effect: Option<StatusEffectKind>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effect_duration: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub power: i32,
}

impl AbilityData {
    pub fn new(id: impl Into<AbilityId>, name: impl Into<String>, kind: AbilityKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            cooldown: 0,
            aura_cost: 0,
            range: 1,
            effect: None,
            effect_duration: 0,
            power: 0,
        }
    }

    pub fn with_cooldown(mut self, cooldown: u32) -> Self {
        self.cooldown = cooldown;
        self
    }

    pub fn with_aura_cost(mut self, aura_cost: u32) -> Self {
        self.aura_cost = aura_cost;
        self
    }

    pub fn with_range(mut self, range: u32) -> Self {
        self.range = range;
        self
    }

    pub fn with_power(mut self, power: i32) -> Self {
        self.power = power;
        self
    }

    pub fn with_effect(mut self, effect: StatusEffectKind, duration: u32) -> Self {
        self.effect = Some(effect);
        self.effect_duration = duration;
        self
    }
}

/// Abilities a unit can use, addressed by index.
pub type AbilityLoadout = ArrayVec<AbilityData, { TacticsConfig::MAX_ABILITIES }>;

/// A planned ability use awaiting a target and commit.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingAbility {
    /// Index into the unit's loadout.
    pub index: usize,
    pub ability: AbilityId,
    pub target: Option<GridCoordinate>,
}

/// A committed ability use. Costs have already been paid by the caster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedAbility {
    pub caster: UnitId,
    pub ability: AbilityData,
    pub target: GridCoordinate,
}
