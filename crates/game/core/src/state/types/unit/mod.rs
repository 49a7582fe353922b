//! Unit aggregate and its turn-resolution protocol.
//!
//! [`UnitState`] owns everything that decides what a unit may do this turn:
//! - Resources: health, aura and the per-turn movement pool
//! - Status effects and ability cooldowns (turn-scoped counters)
//! - Pending movement / ability (per-attempt flags)
//!
//! # Invariants
//!
//! - `health`, `aura` and `movement` stay inside `[0, max]`
//! - `is_defeated` never reverts and gates health and status mutation
//! - `position` is the single source of truth; every change is mirrored into
//!   the occupancy index (clear, then set)
//! - [`UnitState::end_turn`] runs status decay, cooldown decrement, then clears
//!   pending movement and pending ability, always in that order
mod actions;

pub use actions::{GroundClick, MoveOutcome};

use crate::config::TacticsConfig;
use crate::env::{AbilityCatalog, OccupancyIndex, StatusEffectCatalog};
use crate::event::{EventSink, UnitEvent};
use crate::state::error::UnitError;

use super::abilities::{AbilityData, AbilityLoadout, PendingAbility};
use super::common::{GridCoordinate, TeamId, UnitId};
use super::cooldowns::{AbilityId, CooldownTable};
use super::resources::{DamageKind, HealthChange, ResourceMeter};
use super::status::{
    StatusApplication, StatusEffectData, StatusEffectInstance, StatusEffectKind, StatusEffects,
};

/// Creation parameters for a unit.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitSpec {
    pub id: UnitId,
    pub team: TeamId,
    pub player_controlled: bool,
    pub name: String,
    pub max_health: u32,
    pub max_aura: u32,
    pub movement_points: u32,
}

impl UnitSpec {
    /// Spec with the config's default pools.
    pub fn new(id: UnitId, team: TeamId, config: &TacticsConfig) -> Self {
        Self {
            id,
            team,
            player_controlled: false,
            name: format!("unit-{}", id.0),
            max_health: config.default_max_health,
            max_aura: config.default_max_aura,
            movement_points: config.default_movement_points,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn player_controlled(mut self) -> Self {
        self.player_controlled = true;
        self
    }

    pub fn with_max_health(mut self, max_health: u32) -> Self {
        self.max_health = max_health;
        self
    }

    pub fn with_max_aura(mut self, max_aura: u32) -> Self {
        self.max_aura = max_aura;
        self
    }

    pub fn with_movement_points(mut self, movement_points: u32) -> Self {
        self.movement_points = movement_points;
        self
    }
}

/// Counters that changed during [`UnitState::end_turn`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EndTurnReport {
    pub expired_effects: Vec<StatusEffectKind>,
    pub cooldowns_ready: Vec<AbilityId>,
}

/// Complete per-unit state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitState {
    // === Identity (immutable) ===
    id: UnitId,
    team: TeamId,
    player_controlled: bool,
    name: String,

    // === Resources ===
    health: ResourceMeter,
    aura: ResourceMeter,
    /// Movement points for the current turn, refilled by `start_turn`.
    movement: ResourceMeter,

    // === Position ===
    position: GridCoordinate,

    // === Pending actions (per attempt) ===
    pending_movement: Option<GridCoordinate>,
    pending_ability: Option<PendingAbility>,
    is_moving: bool,
    interactable: bool,

    is_defeated: bool,

    // === Turn-scoped counters ===
    status_effects: StatusEffects,
    cooldowns: CooldownTable,

    abilities: AbilityLoadout,
}

impl UnitState {
    /// Creates a unit with full pools and empty collections.
    ///
    /// Does not touch any occupancy index; use [`spawn`](Self::spawn) to place
    /// the unit on a board.
    pub fn new(spec: UnitSpec, position: GridCoordinate) -> Self {
        Self {
            id: spec.id,
            team: spec.team,
            player_controlled: spec.player_controlled,
            name: spec.name,
            health: ResourceMeter::full(spec.max_health),
            aura: ResourceMeter::full(spec.max_aura),
            movement: ResourceMeter::full(spec.movement_points),
            position,
            pending_movement: None,
            pending_ability: None,
            is_moving: false,
            interactable: true,
            is_defeated: false,
            status_effects: StatusEffects::empty(),
            cooldowns: CooldownTable::new(),
            abilities: AbilityLoadout::new(),
        }
    }

    /// Creates a unit and registers it as the occupant of `position`.
    pub fn spawn(
        spec: UnitSpec,
        position: GridCoordinate,
        occupancy: &mut dyn OccupancyIndex,
    ) -> Self {
        let unit = Self::new(spec, position);
        occupancy.clear_occupant(unit.id);
        occupancy.set_occupant(position, unit.id);
        tracing::debug!("spawned unit {} ({}) at {}", unit.id, unit.name, position);
        unit
    }

    /// Removes the unit from the board. Its effects and cooldowns are dropped.
    pub fn destroy(self, occupancy: &mut dyn OccupancyIndex) {
        occupancy.clear_occupant(self.id);
        tracing::debug!("destroyed unit {} at {}", self.id, self.position);
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn id(&self) -> UnitId {
        self.id
    }

    pub fn team(&self) -> TeamId {
        self.team
    }

    pub fn is_player_controlled(&self) -> bool {
        self.player_controlled
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn health(&self) -> ResourceMeter {
        self.health
    }

    pub fn aura(&self) -> ResourceMeter {
        self.aura
    }

    pub fn movement(&self) -> ResourceMeter {
        self.movement
    }

    pub fn position(&self) -> GridCoordinate {
        self.position
    }

    pub fn pending_movement(&self) -> Option<GridCoordinate> {
        self.pending_movement
    }

    pub fn has_pending_movement(&self) -> bool {
        self.pending_movement.is_some()
    }

    pub fn pending_ability(&self) -> Option<&PendingAbility> {
        self.pending_ability.as_ref()
    }

    pub fn has_pending_ability(&self) -> bool {
        self.pending_ability.is_some()
    }

    pub fn is_moving(&self) -> bool {
        self.is_moving
    }

    pub fn is_interactable(&self) -> bool {
        self.interactable
    }

    /// Enables or disables selection of this unit by the input layer.
    pub fn set_interactable(&mut self, interactable: bool) {
        self.interactable = interactable;
    }

    pub fn is_defeated(&self) -> bool {
        self.is_defeated
    }

    pub fn status_effects(&self) -> &StatusEffects {
        &self.status_effects
    }

    pub fn status_effect(&self, kind: StatusEffectKind) -> Option<&StatusEffectInstance> {
        self.status_effects.get(kind)
    }

    pub fn has_status(&self, kind: StatusEffectKind) -> bool {
        self.status_effects.has(kind)
    }

    pub fn cooldowns(&self) -> &CooldownTable {
        &self.cooldowns
    }

    pub fn abilities(&self) -> &[AbilityData] {
        &self.abilities
    }

    /// A unit is ready when it can be selected, is not moving, and has
    /// neither a pending movement nor a pending ability.
    pub fn is_ready(&self) -> bool {
        self.interactable
            && !self.is_moving
            && self.pending_movement.is_none()
            && self.pending_ability.is_none()
    }

    // ========================================================================
    // Abilities
    // ========================================================================

    /// Appends an ability to the loadout and returns its index.
    pub fn learn_ability(&mut self, ability: AbilityData) -> Result<usize, UnitError> {
        self.abilities
            .try_push(ability)
            .map_err(|_| UnitError::AbilityLoadoutFull {
                max: TacticsConfig::MAX_ABILITIES,
            })?;
        Ok(self.abilities.len() - 1)
    }

    /// Looks an ability up in the catalog and appends it to the loadout.
    pub fn learn_ability_from(
        &mut self,
        catalog: &dyn AbilityCatalog,
        id: &str,
    ) -> Result<usize, UnitError> {
        let ability = catalog.ability(id).ok_or(UnitError::MissingDefinition)?;
        self.learn_ability(ability.clone())
    }

    // ========================================================================
    // Resources
    // ========================================================================

    /// Adds `amount` (negative for damage) to health, clamped to `[0, max]`.
    ///
    /// Emits a damage or healing event for non-zero amounts, and the defeat
    /// event on the call that takes health from above zero to zero.
    pub fn modify_health(
        &mut self,
        amount: i32,
        kind: DamageKind,
        events: &mut dyn EventSink,
    ) -> Result<HealthChange, UnitError> {
        self.ensure_active()?;

        let previous = self.health.current();
        let current = self.health.apply(amount);

        if amount < 0 {
            events.emit(UnitEvent::DamageTaken {
                unit: self.id,
                amount: amount.unsigned_abs(),
                kind,
            });
        } else if amount > 0 {
            events.emit(UnitEvent::HealingReceived {
                unit: self.id,
                amount: amount as u32,
            });
        }

        let defeated = previous > 0 && current == 0;
        if defeated {
            self.is_defeated = true;
            tracing::debug!("unit {} defeated", self.id);
            events.emit(UnitEvent::Defeated { unit: self.id });
        }

        Ok(HealthChange {
            previous,
            current,
            defeated,
        })
    }

    /// Adds `amount` to the aura pool, clamped to `[0, max]`. Returns the new value.
    pub fn modify_aura(&mut self, amount: i32) -> u32 {
        self.aura.apply(amount)
    }

    /// Removes `cost` aura, or fails without touching the pool. Returns the
    /// remaining aura.
    pub fn spend_aura(&mut self, cost: u32) -> Result<u32, UnitError> {
        let available = self.aura.current();
        if !self.aura.try_spend(cost) {
            return Err(UnitError::InsufficientAura {
                required: cost,
                available,
            });
        }
        Ok(self.aura.current())
    }

    // ========================================================================
    // Status effects
    // ========================================================================

    /// Applies (or merges) a status effect.
    ///
    /// Merging never shortens the remaining duration and never pushes stacks
    /// past the definition's cap. Emits `StatusApplied` on every success.
    pub fn apply_status_effect(
        &mut self,
        definition: Option<&StatusEffectData>,
        duration: u32,
        source: Option<UnitId>,
        events: &mut dyn EventSink,
    ) -> Result<StatusApplication, UnitError> {
        self.ensure_active()?;
        let definition = definition.ok_or(UnitError::MissingDefinition)?;

        let application = self
            .status_effects
            .apply(definition, duration, source)
            .inspect_err(|e| {
                tracing::debug!("unit {} rejected {}: {}", self.id, definition.kind, e);
            })?;

        events.emit(UnitEvent::StatusApplied {
            unit: self.id,
            effect: definition.clone(),
        });

        Ok(application)
    }

    /// Applies a status effect by kind, resolving its definition from the
    /// catalog. `duration: None` uses the definition's base duration.
    pub fn apply_status_from(
        &mut self,
        catalog: &dyn StatusEffectCatalog,
        kind: StatusEffectKind,
        duration: Option<u32>,
        source: Option<UnitId>,
        events: &mut dyn EventSink,
    ) -> Result<StatusApplication, UnitError> {
        let definition = catalog.status_effect(kind);
        let duration = duration
            .or_else(|| definition.map(|d| d.base_duration))
            .unwrap_or(0);
        self.apply_status_effect(definition, duration, source, events)
    }

    /// Advances every status effect by one turn, removing the expired ones.
    ///
    /// Emits `StatusRemoved` for each expired effect. Returns their kinds.
    pub fn process_status_effects(&mut self, events: &mut dyn EventSink) -> Vec<StatusEffectKind> {
        let expired = self.status_effects.tick();
        let mut kinds = Vec::with_capacity(expired.len());

        for effect in expired {
            kinds.push(effect.kind);
            events.emit(UnitEvent::StatusRemoved {
                unit: self.id,
                effect,
            });
        }

        kinds
    }

    /// Removes an effect immediately (dispel). Returns true if it was active.
    pub fn remove_status_effect(
        &mut self,
        kind: StatusEffectKind,
        events: &mut dyn EventSink,
    ) -> bool {
        match self.status_effects.remove(kind) {
            Some(instance) => {
                events.emit(UnitEvent::StatusRemoved {
                    unit: self.id,
                    effect: instance.definition().clone(),
                });
                true
            }
            None => false,
        }
    }

    // ========================================================================
    // Cooldowns
    // ========================================================================

    /// Sets a cooldown; `turns <= 0` marks the ability ready.
    pub fn set_ability_cooldown(&mut self, ability: impl Into<AbilityId>, turns: i32) {
        self.cooldowns.set(ability, turns);
    }

    /// Turns remaining before the ability is ready (0 when ready).
    pub fn get_ability_cooldown(&self, ability: &str) -> u32 {
        self.cooldowns.get(ability)
    }

    /// Decrements every cooldown, dropping the ones that reach zero.
    pub fn update_cooldowns(&mut self) -> Vec<AbilityId> {
        self.cooldowns.tick()
    }

    // ========================================================================
    // Turn lifecycle
    // ========================================================================

    /// Refills the movement pool for a new turn.
    pub fn start_turn(&mut self) {
        self.movement.refill();
    }

    /// Resolves the turn boundary for this unit.
    ///
    /// Order: status decay, cooldown decrement, pending movement cleared,
    /// pending ability cleared.
    pub fn end_turn(&mut self, events: &mut dyn EventSink) -> EndTurnReport {
        let expired_effects = self.process_status_effects(events);
        let cooldowns_ready = self.update_cooldowns();
        self.reset_action_state();
        self.reset_ability_state();

        tracing::debug!(
            "unit {} ended turn: {} effect(s) expired, {} ability(ies) ready",
            self.id,
            expired_effects.len(),
            cooldowns_ready.len()
        );

        EndTurnReport {
            expired_effects,
            cooldowns_ready,
        }
    }

    /// Cancels any pending movement.
    pub fn reset_action_state(&mut self) {
        self.pending_movement = None;
        self.is_moving = false;
    }

    /// Cancels any pending ability. Nothing was paid yet, so nothing is refunded.
    pub fn reset_ability_state(&mut self) {
        self.pending_ability = None;
    }

    fn ensure_active(&self) -> Result<(), UnitError> {
        if self.is_defeated {
            tracing::debug!("unit {} is defeated; request ignored", self.id);
            return Err(UnitError::Defeated { unit: self.id });
        }
        Ok(())
    }
}
