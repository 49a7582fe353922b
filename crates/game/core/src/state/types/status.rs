//! Status effect system for units.
//!
//! Status effects are timed modifiers attached to a unit. Each active effect
//! is a [`StatusEffectInstance`] pointing at an immutable [`StatusEffectData`]
//! definition from the content catalog.
//!
//! # Turn-based Duration
//!
//! Effects store `remaining_duration` in whole turns. [`StatusEffects::tick`]
//! runs once per turn end, decrements every non-permanent effect and removes
//! the ones that reach zero.

use arrayvec::ArrayVec;

use crate::config::TacticsConfig;
use crate::state::UnitId;
use crate::state::error::UnitError;

/// Types of status effects.
///
/// Two applications of the same kind always merge into one instance.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatusEffectKind {
    // ========================================================================
    // Damage over time
    // ========================================================================
    Burn,
    Poison,
    Bleed,

    // ========================================================================
    // Crowd Control
    // ========================================================================
    /// Cannot act.
    Stun,
    /// Cannot move.
    Root,
    /// Cannot use abilities.
    Silence,

    // ========================================================================
    // Buffs / Debuffs
    // ========================================================================
    Haste,
    Shield,
    Regeneration,
    Weaken,
}

/// Immutable definition of a status effect, provided by the content catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffectData {
    pub kind: StatusEffectKind,
    pub name: String,
    /// Duration used when an ability applies the effect without an override.
    pub base_duration: u32,
    /// Upper bound for `stacks` on an instance; always at least 1.
    pub max_stacks: u32,
    /// Permanent effects are never decremented or expired by turn processing.
    #[cfg_attr(feature = "serde", serde(default))]
    pub permanent: bool,
}

impl StatusEffectData {
    pub fn new(
        kind: StatusEffectKind,
        name: impl Into<String>,
        base_duration: u32,
        max_stacks: u32,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            base_duration,
            max_stacks: max_stacks.max(1),
            permanent: false,
        }
    }

    pub fn permanent(mut self) -> Self {
        self.permanent = true;
        self
    }
}

/// A single active effect on a unit.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffectInstance {
    definition: StatusEffectData,
    /// Unit that applied the effect, if any.
    pub source: Option<UnitId>,
    remaining_duration: u32,
    stacks: u32,
}

impl StatusEffectInstance {
    fn new(definition: &StatusEffectData, duration: u32, source: Option<UnitId>) -> Self {
        Self {
            definition: definition.clone(),
            source,
            remaining_duration: duration,
            stacks: 1,
        }
    }

    pub fn definition(&self) -> &StatusEffectData {
        &self.definition
    }

    pub fn kind(&self) -> StatusEffectKind {
        self.definition.kind
    }

    pub fn remaining_duration(&self) -> u32 {
        self.remaining_duration
    }

    pub fn stacks(&self) -> u32 {
        self.stacks
    }

    pub fn is_permanent(&self) -> bool {
        self.definition.permanent
    }

    /// Merges a re-application: duration never shrinks, stacks saturate at
    /// the definition's cap.
    fn merge(&mut self, duration: u32, source: Option<UnitId>) {
        self.remaining_duration = self.remaining_duration.max(duration);
        self.stacks = (self.stacks + 1).min(self.definition.max_stacks.max(1));
        if source.is_some() {
            self.source = source;
        }
    }
}

/// Outcome of applying a status effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusApplication {
    /// A new instance was attached.
    Created { remaining_duration: u32 },
    /// An existing instance of the same kind absorbed the application.
    Merged {
        stacks: u32,
        remaining_duration: u32,
    },
}

impl StatusApplication {
    pub fn stacks(&self) -> u32 {
        match self {
            Self::Created { .. } => 1,
            Self::Merged { stacks, .. } => *stacks,
        }
    }
}

/// Active status effects on a unit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffectInstance, { TacticsConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusEffects {
    /// Creates an empty status effect set.
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    /// Applies an effect, merging with an existing instance of the same kind.
    ///
    /// Fails only when a new instance is needed and the set is full.
    pub fn apply(
        &mut self,
        definition: &StatusEffectData,
        duration: u32,
        source: Option<UnitId>,
    ) -> Result<StatusApplication, UnitError> {
        if let Some(existing) = self
            .effects
            .iter_mut()
            .find(|e| e.kind() == definition.kind)
        {
            existing.merge(duration, source);
            return Ok(StatusApplication::Merged {
                stacks: existing.stacks,
                remaining_duration: existing.remaining_duration,
            });
        }

        self.effects
            .try_push(StatusEffectInstance::new(definition, duration, source))
            .map_err(|_| UnitError::StatusEffectsFull {
                max: TacticsConfig::MAX_STATUS_EFFECTS,
            })?;

        Ok(StatusApplication::Created {
            remaining_duration: duration,
        })
    }

    /// Advances every non-permanent effect by one turn.
    ///
    /// Returns the definitions of expired effects in the order they were
    /// attached. Iterates from the tail so removals never shift an entry
    /// that has not been visited yet.
    pub fn tick(&mut self) -> Vec<StatusEffectData> {
        let mut expired = Vec::new();

        for index in (0..self.effects.len()).rev() {
            let effect = &mut self.effects[index];
            if effect.is_permanent() {
                continue;
            }

            effect.remaining_duration = effect.remaining_duration.saturating_sub(1);
            tracing::trace!(
                "status {} ticked to {} turn(s)",
                effect.kind(),
                effect.remaining_duration
            );

            if effect.remaining_duration == 0 {
                expired.push(self.effects.remove(index).definition);
            }
        }

        expired.reverse();
        expired
    }

    /// Removes an effect immediately, returning it if it was active.
    pub fn remove(&mut self, kind: StatusEffectKind) -> Option<StatusEffectInstance> {
        let index = self.effects.iter().position(|e| e.kind() == kind)?;
        Some(self.effects.remove(index))
    }

    /// Removes every effect, returning them in insertion order.
    pub fn clear(&mut self) -> Vec<StatusEffectInstance> {
        self.effects.drain(..).collect()
    }

    /// Checks if a specific status effect is active.
    pub fn has(&self, kind: StatusEffectKind) -> bool {
        self.effects.iter().any(|e| e.kind() == kind)
    }

    pub fn get(&self, kind: StatusEffectKind) -> Option<&StatusEffectInstance> {
        self.effects.iter().find(|e| e.kind() == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffectInstance> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn burn() -> StatusEffectData {
        StatusEffectData::new(StatusEffectKind::Burn, "Burn", 3, 2)
    }

    #[test]
    fn reapplication_merges_by_kind() {
        let mut effects = StatusEffects::empty();

        let first = effects.apply(&burn(), 3, None).unwrap();
        let second = effects.apply(&burn(), 3, Some(UnitId(7))).unwrap();

        assert_eq!(first, StatusApplication::Created { remaining_duration: 3 });
        assert_eq!(
            second,
            StatusApplication::Merged {
                stacks: 2,
                remaining_duration: 3
            }
        );
        assert_eq!(effects.len(), 1);
        assert_eq!(effects.get(StatusEffectKind::Burn).unwrap().source, Some(UnitId(7)));
    }

    #[test]
    fn merge_never_shortens_and_never_overflows_stacks() {
        let mut effects = StatusEffects::empty();
        effects.apply(&burn(), 5, None).unwrap();

        for duration in [1, 4, 2, 6, 0] {
            effects.apply(&burn(), duration, None).unwrap();
        }

        let instance = effects.get(StatusEffectKind::Burn).unwrap();
        assert_eq!(instance.remaining_duration(), 6);
        assert_eq!(instance.stacks(), 2);
    }

    #[test]
    fn tick_removes_expired_without_skipping_neighbours() {
        let mut effects = StatusEffects::empty();
        let poison = StatusEffectData::new(StatusEffectKind::Poison, "Poison", 1, 1);
        let bleed = StatusEffectData::new(StatusEffectKind::Bleed, "Bleed", 1, 1);
        let haste = StatusEffectData::new(StatusEffectKind::Haste, "Haste", 2, 1);

        // Two adjacent expiring entries around a surviving one.
        effects.apply(&poison, 1, None).unwrap();
        effects.apply(&bleed, 1, None).unwrap();
        effects.apply(&haste, 2, None).unwrap();
        effects.apply(&burn(), 1, None).unwrap();

        let expired: Vec<_> = effects.tick().into_iter().map(|d| d.kind).collect();

        assert_eq!(
            expired,
            vec![
                StatusEffectKind::Poison,
                StatusEffectKind::Bleed,
                StatusEffectKind::Burn
            ]
        );
        assert_eq!(effects.len(), 1);
        assert_eq!(
            effects.get(StatusEffectKind::Haste).unwrap().remaining_duration(),
            1
        );
    }

    #[test]
    fn permanent_effects_do_not_decay() {
        let mut effects = StatusEffects::empty();
        let aura = StatusEffectData::new(StatusEffectKind::Shield, "Warded", 1, 1).permanent();
        effects.apply(&aura, 1, None).unwrap();

        for _ in 0..5 {
            assert!(effects.tick().is_empty());
        }
        assert_eq!(
            effects.get(StatusEffectKind::Shield).unwrap().remaining_duration(),
            1
        );
    }

    #[test]
    fn zero_duration_effect_expires_on_next_tick() {
        let mut effects = StatusEffects::empty();
        effects.apply(&burn(), 0, None).unwrap();
        assert_eq!(effects.tick().len(), 1);
        assert!(effects.is_empty());
    }

    #[test]
    fn full_set_rejects_new_kinds_but_merges_existing() {
        let mut effects = StatusEffects::empty();
        let kinds = [
            StatusEffectKind::Burn,
            StatusEffectKind::Poison,
            StatusEffectKind::Bleed,
            StatusEffectKind::Stun,
            StatusEffectKind::Root,
            StatusEffectKind::Silence,
            StatusEffectKind::Haste,
            StatusEffectKind::Shield,
            StatusEffectKind::Regeneration,
            StatusEffectKind::Weaken,
        ];
        let (fits, overflow) = kinds.split_at(TacticsConfig::MAX_STATUS_EFFECTS);
        for kind in fits {
            effects
                .apply(&StatusEffectData::new(*kind, kind.to_string(), 2, 3), 2, None)
                .unwrap();
        }

        let rejected = effects.apply(&StatusEffectData::new(overflow[0], "extra", 2, 3), 2, None);
        assert_eq!(
            rejected,
            Err(UnitError::StatusEffectsFull {
                max: TacticsConfig::MAX_STATUS_EFFECTS
            })
        );
        assert_eq!(effects.len(), TacticsConfig::MAX_STATUS_EFFECTS);

        let merged = effects
            .apply(&StatusEffectData::new(StatusEffectKind::Burn, "Burn", 2, 3), 4, None)
            .unwrap();
        assert_eq!(merged.stacks(), 2);
    }

    #[test]
    fn remove_and_clear() {
        let mut effects = StatusEffects::empty();
        effects.apply(&burn(), 3, None).unwrap();
        assert!(effects.has(StatusEffectKind::Burn));
        assert!(effects.remove(StatusEffectKind::Burn).is_some());
        assert!(effects.remove(StatusEffectKind::Burn).is_none());

        effects.apply(&burn(), 3, None).unwrap();
        assert_eq!(effects.clear().len(), 1);
        assert!(effects.is_empty());
    }
}
