//! Pending-action bookkeeping: movement targets and ability planning.

use std::collections::HashSet;

use super::UnitState;
use crate::env::{OccupancyIndex, UnitContext};
use crate::movement::MovementValidator;
use crate::state::error::UnitError;
use crate::state::{GridCoordinate, PendingAbility, ResolvedAbility};

/// How an accepted move target was carried out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Handed to the movement executor; completion is reported later.
    Dispatched,
    /// No executor was available, so the position was written immediately.
    Completed,
}

/// What a ground click was interpreted as.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroundClick {
    AbilityTargeted,
    Move(MoveOutcome),
}

impl UnitState {
    // ========================================================================
    // Movement
    // ========================================================================

    /// Tiles the unit may currently be ordered to, bounded by its remaining
    /// movement points.
    pub fn valid_move_positions(&self, occupancy: &dyn OccupancyIndex) -> HashSet<GridCoordinate> {
        MovementValidator::new(occupancy).valid_positions(self.position, self.movement.current())
    }

    /// Accepts a move target from the valid set and starts the movement.
    ///
    /// On success the pending movement is recorded and the movement executor
    /// takes over. Without an executor the move completes immediately.
    pub fn set_target_position(
        &mut self,
        target: GridCoordinate,
        ctx: &mut UnitContext<'_>,
    ) -> Result<MoveOutcome, UnitError> {
        self.ensure_active()?;
        if self.is_moving {
            return Err(UnitError::AlreadyMoving { unit: self.id });
        }

        if !MovementValidator::new(&*ctx.occupancy).can_move_to(
            self.position,
            self.movement.current(),
            target,
        ) {
            tracing::debug!(
                "unit {} at {} rejected move target {}",
                self.id,
                self.position,
                target
            );
            return Err(UnitError::InvalidMoveTarget { target });
        }

        self.pending_movement = Some(target);
        self.is_moving = true;

        match ctx.mover.as_deref_mut() {
            Some(mover) => {
                mover.begin_move(self.id, self.position, target);
                Ok(MoveOutcome::Dispatched)
            }
            None => {
                tracing::debug!("no movement executor; moving unit {} instantly", self.id);
                self.complete_movement(target, &mut *ctx.occupancy)?;
                Ok(MoveOutcome::Completed)
            }
        }
    }

    /// Position-changed callback from the movement executor.
    ///
    /// Updates the occupancy index (clear, then set), spends movement points
    /// for the distance travelled and resolves the pending movement.
    ///
    /// Only the currently pending destination is accepted. A completion for a
    /// move that was cancelled (or never dispatched) leaves the unit as is.
    pub fn complete_movement(
        &mut self,
        destination: GridCoordinate,
        occupancy: &mut dyn OccupancyIndex,
    ) -> Result<(), UnitError> {
        if self.pending_movement != Some(destination) {
            tracing::debug!(
                "unit {} ignored stale move completion to {} (pending: {:?})",
                self.id,
                destination,
                self.pending_movement
            );
            return Err(UnitError::UnexpectedMoveCompletion {
                unit: self.id,
                destination,
            });
        }

        let travelled = self.position.chebyshev_distance(destination);

        occupancy.clear_occupant(self.id);
        occupancy.set_occupant(destination, self.id);
        self.position = destination;

        self.movement
            .apply(-i32::try_from(travelled).unwrap_or(i32::MAX));
        self.pending_movement = None;
        self.is_moving = false;

        tracing::debug!(
            "unit {} arrived at {} ({} movement left)",
            self.id,
            destination,
            self.movement.current()
        );
        Ok(())
    }

    // ========================================================================
    // Abilities
    // ========================================================================

    /// Plans the ability at `index` in the loadout. Nothing is paid yet.
    pub fn plan_ability_use(&mut self, index: usize) -> Result<(), UnitError> {
        self.ensure_active()?;

        let ability = self
            .abilities
            .get(index)
            .ok_or(UnitError::AbilityIndexOutOfRange {
                index,
                len: self.abilities.len(),
            })?;

        let remaining = self.cooldowns.get(ability.id.as_str());
        if remaining > 0 {
            return Err(UnitError::AbilityOnCooldown {
                ability: ability.id.clone(),
                remaining,
            });
        }

        if self.aura.current() < ability.aura_cost {
            return Err(UnitError::InsufficientAura {
                required: ability.aura_cost,
                available: self.aura.current(),
            });
        }

        tracing::debug!("unit {} planned {}", self.id, ability.id);
        self.pending_ability = Some(PendingAbility {
            index,
            ability: ability.id.clone(),
            target: None,
        });
        Ok(())
    }

    /// Chooses the target tile of the pending ability.
    pub fn set_ability_target(&mut self, target: GridCoordinate) -> Result<(), UnitError> {
        self.ensure_active()?;

        let pending = self
            .pending_ability
            .as_mut()
            .ok_or(UnitError::NoPendingAbility)?;
        let ability = self
            .abilities
            .get(pending.index)
            .ok_or(UnitError::NoPendingAbility)?;

        let distance = self.position.chebyshev_distance(target);
        if distance > ability.range {
            return Err(UnitError::TargetOutOfRange {
                target,
                distance,
                range: ability.range,
            });
        }

        pending.target = Some(target);
        Ok(())
    }

    /// Pays the pending ability's costs and hands it off for resolution.
    ///
    /// Spends aura, starts the cooldown and clears the pending ability.
    pub fn commit_ability(&mut self) -> Result<ResolvedAbility, UnitError> {
        self.ensure_active()?;

        let pending = self
            .pending_ability
            .as_ref()
            .ok_or(UnitError::NoPendingAbility)?;
        let target = pending.target.ok_or_else(|| UnitError::NoAbilityTarget {
            ability: pending.ability.clone(),
        })?;
        let ability = self
            .abilities
            .get(pending.index)
            .ok_or(UnitError::NoPendingAbility)?
            .clone();

        self.spend_aura(ability.aura_cost)?;
        self.cooldowns.set(
            ability.id.clone(),
            i32::try_from(ability.cooldown).unwrap_or(i32::MAX),
        );
        self.pending_ability = None;

        tracing::debug!("unit {} committed {} at {}", self.id, ability.id, target);
        Ok(ResolvedAbility {
            caster: self.id,
            ability,
            target,
        })
    }

    /// Routes an already-resolved ground click: targets the pending ability
    /// if there is one, otherwise treats the tile as a move target.
    pub fn handle_ground_click(
        &mut self,
        target: GridCoordinate,
        ctx: &mut UnitContext<'_>,
    ) -> Result<GroundClick, UnitError> {
        if self.pending_ability.is_some() {
            self.set_ability_target(target)?;
            return Ok(GroundClick::AbilityTargeted);
        }
        self.set_target_position(target, ctx).map(GroundClick::Move)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TacticsConfig;
    use crate::env::{GridDimensions, GridOccupancy, MoveQueue};
    use crate::event::UnitEvent;
    use crate::state::{AbilityData, AbilityKind, DamageKind, TeamId, UnitId, UnitSpec};

    fn board() -> GridOccupancy {
        GridOccupancy::new(GridDimensions::new(10, 10))
    }

    fn spawn(grid: &mut GridOccupancy, at: GridCoordinate) -> UnitState {
        let spec = UnitSpec::new(UnitId(1), TeamId::PLAYER, &TacticsConfig::default());
        UnitState::spawn(spec, at, grid)
    }

    fn fireball() -> AbilityData {
        AbilityData::new("fireball", "Fireball", AbilityKind::Attack)
            .with_cooldown(2)
            .with_aura_cost(20)
            .with_range(3)
            .with_power(25)
    }

    #[test]
    fn instant_move_without_executor() {
        let mut grid = board();
        let mut unit = spawn(&mut grid, GridCoordinate::new(2, 2));
        let target = GridCoordinate::new(4, 3);

        let outcome = unit
            .set_target_position(target, &mut UnitContext::new(&mut grid))
            .unwrap();

        assert_eq!(outcome, MoveOutcome::Completed);
        assert_eq!(unit.position(), target);
        assert!(!unit.has_pending_movement());
        assert!(!unit.is_moving());
        assert_eq!(unit.movement().current(), 1);
        assert_eq!(grid.occupant(target), Some(UnitId(1)));
        assert_eq!(grid.occupant(GridCoordinate::new(2, 2)), None);
    }

    #[test]
    fn dispatched_move_waits_for_completion() {
        let mut grid = board();
        let mut queue = MoveQueue::new();
        let mut unit = spawn(&mut grid, GridCoordinate::new(2, 2));
        let target = GridCoordinate::new(3, 3);

        let outcome = unit
            .set_target_position(
                target,
                &mut UnitContext::new(&mut grid).with_mover(&mut queue),
            )
            .unwrap();

        assert_eq!(outcome, MoveOutcome::Dispatched);
        assert_eq!(unit.pending_movement(), Some(target));
        assert!(unit.is_moving());
        assert!(!unit.is_ready());
        assert_eq!(unit.position(), GridCoordinate::new(2, 2));

        let second = unit.set_target_position(
            GridCoordinate::new(1, 1),
            &mut UnitContext::new(&mut grid).with_mover(&mut queue),
        );
        assert_eq!(second, Err(UnitError::AlreadyMoving { unit: UnitId(1) }));

        let request = queue.pop().unwrap();
        assert_eq!(request.to, target);
        unit.complete_movement(request.to, &mut grid).unwrap();

        assert_eq!(unit.position(), target);
        assert!(!unit.has_pending_movement());
        assert!(unit.is_ready());
    }

    #[test]
    fn rejected_target_leaves_state_untouched() {
        let mut grid = board();
        let mut unit = spawn(&mut grid, GridCoordinate::new(0, 0));
        let before = unit.clone();

        let result = unit.set_target_position(
            GridCoordinate::new(7, 7),
            &mut UnitContext::new(&mut grid),
        );

        assert_eq!(
            result,
            Err(UnitError::InvalidMoveTarget {
                target: GridCoordinate::new(7, 7)
            })
        );
        assert_eq!(unit, before);
    }

    #[test]
    fn movement_points_bound_the_valid_set_until_next_turn() {
        let mut grid = board();
        let mut unit = spawn(&mut grid, GridCoordinate::new(0, 0));

        unit.set_target_position(GridCoordinate::new(3, 0), &mut UnitContext::new(&mut grid))
            .unwrap();
        assert_eq!(unit.movement().current(), 0);
        assert!(unit.valid_move_positions(&grid).is_empty());

        unit.start_turn();
        assert_eq!(unit.valid_move_positions(&grid).len(), 27);
    }

    #[test]
    fn ability_plan_target_commit() {
        let mut unit = UnitState::new(
            UnitSpec::new(UnitId(1), TeamId::PLAYER, &TacticsConfig::default()),
            GridCoordinate::new(5, 5),
        );
        unit.learn_ability(fireball()).unwrap();

        unit.plan_ability_use(0).unwrap();
        assert!(unit.has_pending_ability());
        assert_eq!(
            unit.commit_ability(),
            Err(UnitError::NoAbilityTarget {
                ability: "fireball".into()
            })
        );

        assert_eq!(
            unit.set_ability_target(GridCoordinate::new(9, 5)),
            Err(UnitError::TargetOutOfRange {
                target: GridCoordinate::new(9, 5),
                distance: 4,
                range: 3
            })
        );
        unit.set_ability_target(GridCoordinate::new(8, 7)).unwrap();

        let resolved = unit.commit_ability().unwrap();
        assert_eq!(resolved.caster, UnitId(1));
        assert_eq!(resolved.target, GridCoordinate::new(8, 7));
        assert_eq!(resolved.ability.power, 25);
        assert_eq!(unit.aura().current(), TacticsConfig::DEFAULT_MAX_AURA - 20);
        assert_eq!(unit.get_ability_cooldown("fireball"), 2);
        assert!(!unit.has_pending_ability());

        assert_eq!(
            unit.plan_ability_use(0),
            Err(UnitError::AbilityOnCooldown {
                ability: "fireball".into(),
                remaining: 2
            })
        );
    }

    #[test]
    fn plan_rejects_bad_index_and_low_aura() {
        let mut unit = UnitState::new(
            UnitSpec::new(UnitId(1), TeamId::PLAYER, &TacticsConfig::default()).with_max_aura(10),
            GridCoordinate::ORIGIN,
        );
        unit.learn_ability(fireball()).unwrap();

        assert_eq!(
            unit.plan_ability_use(3),
            Err(UnitError::AbilityIndexOutOfRange { index: 3, len: 1 })
        );
        assert_eq!(
            unit.plan_ability_use(0),
            Err(UnitError::InsufficientAura {
                required: 20,
                available: 10
            })
        );
        assert!(!unit.has_pending_ability());
    }

    #[test]
    fn cancelling_a_planned_ability_costs_nothing() {
        let mut unit = UnitState::new(
            UnitSpec::new(UnitId(1), TeamId::PLAYER, &TacticsConfig::default()),
            GridCoordinate::ORIGIN,
        );
        unit.learn_ability(fireball()).unwrap();
        unit.plan_ability_use(0).unwrap();

        unit.reset_ability_state();

        assert!(unit.is_ready());
        assert_eq!(unit.aura().current(), TacticsConfig::DEFAULT_MAX_AURA);
        assert_eq!(unit.get_ability_cooldown("fireball"), 0);
    }

    #[test]
    fn ground_click_routes_by_pending_ability() {
        let mut grid = board();
        let mut unit = spawn(&mut grid, GridCoordinate::new(5, 5));
        unit.learn_ability(fireball()).unwrap();

        unit.plan_ability_use(0).unwrap();
        let click = unit
            .handle_ground_click(GridCoordinate::new(6, 6), &mut UnitContext::new(&mut grid))
            .unwrap();
        assert_eq!(click, GroundClick::AbilityTargeted);
        assert_eq!(unit.position(), GridCoordinate::new(5, 5));

        unit.reset_ability_state();
        let click = unit
            .handle_ground_click(GridCoordinate::new(6, 6), &mut UnitContext::new(&mut grid))
            .unwrap();
        assert_eq!(click, GroundClick::Move(MoveOutcome::Completed));
        assert_eq!(unit.position(), GridCoordinate::new(6, 6));
    }

    #[test]
    fn cancelled_move_ignores_late_completion() {
        let mut grid = board();
        let mut queue = MoveQueue::new();
        let mut events: Vec<UnitEvent> = Vec::new();
        let origin = GridCoordinate::new(2, 2);
        let mut unit = spawn(&mut grid, origin);

        unit.set_target_position(
            GridCoordinate::new(4, 2),
            &mut UnitContext::new(&mut grid).with_mover(&mut queue),
        )
        .unwrap();
        unit.reset_action_state();
        unit.end_turn(&mut events);
        unit.start_turn();
        let refilled = unit.movement().current();

        let request = queue.pop().unwrap();
        assert_eq!(
            unit.complete_movement(request.to, &mut grid),
            Err(UnitError::UnexpectedMoveCompletion {
                unit: UnitId(1),
                destination: GridCoordinate::new(4, 2)
            })
        );

        assert_eq!(unit.position(), origin);
        assert_eq!(unit.movement().current(), refilled);
        assert_eq!(grid.occupant(origin), Some(UnitId(1)));
        assert_eq!(grid.occupant(GridCoordinate::new(4, 2)), None);
        assert!(unit.is_ready());
    }

    #[test]
    fn completion_must_match_the_pending_destination() {
        let mut grid = board();
        let mut queue = MoveQueue::new();
        let mut unit = spawn(&mut grid, GridCoordinate::new(2, 2));

        unit.set_target_position(
            GridCoordinate::new(3, 3),
            &mut UnitContext::new(&mut grid).with_mover(&mut queue),
        )
        .unwrap();

        assert!(unit.complete_movement(GridCoordinate::new(1, 1), &mut grid).is_err());
        assert_eq!(unit.position(), GridCoordinate::new(2, 2));
        assert_eq!(unit.pending_movement(), Some(GridCoordinate::new(3, 3)));
        assert!(unit.is_moving());
    }

    #[test]
    fn defeated_unit_rejects_ability_target() {
        let mut grid = board();
        let mut events: Vec<UnitEvent> = Vec::new();
        let mut unit = spawn(&mut grid, GridCoordinate::new(5, 5));
        unit.learn_ability(fireball()).unwrap();
        unit.plan_ability_use(0).unwrap();

        unit.modify_health(-1000, DamageKind::True, &mut events).unwrap();
        assert!(unit.is_defeated());

        assert_eq!(
            unit.set_ability_target(GridCoordinate::new(6, 6)),
            Err(UnitError::Defeated { unit: UnitId(1) })
        );
        assert_eq!(
            unit.handle_ground_click(GridCoordinate::new(6, 6), &mut UnitContext::new(&mut grid)),
            Err(UnitError::Defeated { unit: UnitId(1) })
        );
    }
}
