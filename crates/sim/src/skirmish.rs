//! Scripted skirmish between two teams on an in-memory board.
//!
//! Each round every living unit, in roster order:
//! 1. starts its turn and suffers or benefits from periodic effects
//! 2. uses the first ability that has a target in range, otherwise advances
//!    toward the nearest hostile and tries again
//! 3. ends its turn
//!
//! Defeated units are taken off the board at the end of the round.
use std::cell::Cell;
use std::rc::Rc;

use anyhow::Context;
use tactics_content::ContentCatalog;
use tactics_core::{
    AbilityData, AbilityKind, DamageKind, EventBus, EventSink, GridCoordinate, GridDimensions,
    GridOccupancy, MoveQueue, OccupancyIndex, ResolvedAbility, StatusEffectCatalog,
    StatusEffectKind, TacticsConfig, TeamId, Topic, UnitContext, UnitError, UnitEvent, UnitId,
    UnitSpec, UnitState,
};

use crate::config::SimConfig;

/// Damage (or healing) per stack dealt by periodic effects at turn start.
const PERIODIC_POWER: i32 = 3;

struct Recruit {
    name: &'static str,
    team: TeamId,
    max_health: u32,
    abilities: &'static [&'static str],
}

const ROSTER: [Recruit; 4] = [
    Recruit {
        name: "knight",
        team: TeamId::PLAYER,
        max_health: 120,
        abilities: &["strike", "quicken"],
    },
    Recruit {
        name: "mage",
        team: TeamId::PLAYER,
        max_health: 80,
        abilities: &["strike", "fireball", "mend"],
    },
    Recruit {
        name: "raider",
        team: TeamId::ENEMY,
        max_health: 100,
        abilities: &["strike", "venom_dart"],
    },
    Recruit {
        name: "shaman",
        team: TeamId::ENEMY,
        max_health: 90,
        abilities: &["strike", "bind", "mend"],
    },
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SurvivorSummary {
    pub id: UnitId,
    pub name: String,
    pub position: GridCoordinate,
    pub health: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkirmishReport {
    pub turns_played: u32,
    pub winner: Option<TeamId>,
    pub survivors: Vec<SurvivorSummary>,
    pub defeats: u32,
    pub events_published: u64,
}

pub struct Skirmish {
    grid: GridOccupancy,
    units: Vec<UnitState>,
    catalog: ContentCatalog,
    bus: EventBus,
    moves: MoveQueue,
    defeats: Rc<Cell<u32>>,
}

impl Skirmish {
    /// Spawns the roster on a fresh board, players on the left edge and
    /// enemies on the right edge.
    pub fn new(
        config: &SimConfig,
        tactics: &TacticsConfig,
        catalog: ContentCatalog,
    ) -> anyhow::Result<Self> {
        let mut grid =
            GridOccupancy::new(GridDimensions::new(config.grid_width, config.grid_height));
        let mut units = Vec::with_capacity(ROSTER.len());
        let mut rows = [0u32; 2];

        for (id, recruit) in (1u32..).zip(ROSTER.iter()) {
            let is_player = recruit.team == TeamId::PLAYER;
            let row = &mut rows[usize::from(!is_player)];
            let y = (1 + 2 * *row).min(config.grid_height.saturating_sub(1));
            *row += 1;
            let x = if is_player {
                0
            } else {
                config.grid_width.saturating_sub(1)
            };
            let position = GridCoordinate::new(i32::try_from(x)?, i32::try_from(y)?);

            let mut spec = UnitSpec::new(UnitId(id), recruit.team, tactics)
                .named(recruit.name)
                .with_max_health(recruit.max_health);
            if is_player {
                spec = spec.player_controlled();
            }

            let mut unit = UnitState::spawn(spec, position, &mut grid);
            for ability in recruit.abilities {
                unit.learn_ability_from(&catalog, ability)
                    .with_context(|| format!("{} cannot learn {}", recruit.name, ability))?;
            }
            units.push(unit);
        }

        let defeats = Rc::new(Cell::new(0));
        let mut bus = EventBus::new();
        bus.subscribe_all(log_event);
        let counter = Rc::clone(&defeats);
        bus.subscribe(&[Topic::Defeat], move |_| counter.set(counter.get() + 1));

        Ok(Self {
            grid,
            units,
            catalog,
            bus,
            moves: MoveQueue::new(),
            defeats,
        })
    }

    /// Plays up to `turns` rounds, stopping early once one team remains.
    pub fn run(&mut self, turns: u32) -> SkirmishReport {
        let mut turns_played = 0;

        for turn in 1..=turns {
            if self.winner().is_some() {
                break;
            }
            tracing::info!("--- turn {} ---", turn);
            for index in 0..self.units.len() {
                self.take_turn(index);
            }
            self.remove_defeated();
            turns_played = turn;
        }

        self.report(turns_played)
    }

    fn take_turn(&mut self, index: usize) {
        if self.units[index].is_defeated() {
            return;
        }

        self.units[index].start_turn();
        self.apply_periodic_effects(index);

        let unit = &self.units[index];
        if unit.is_defeated() {
            return;
        }
        if unit.has_status(StatusEffectKind::Stun) {
            tracing::info!("{} is stunned", unit.name());
        } else if !self.try_ability(index) {
            self.advance(index);
            self.try_ability(index);
        }

        let report = self.units[index].end_turn(&mut self.bus);
        tracing::debug!(
            "{} end of turn: expired {:?}, ready {:?}",
            self.units[index].name(),
            report.expired_effects,
            report.cooldowns_ready
        );
    }

    /// Damage and healing from active effects, scaled by stacks.
    fn apply_periodic_effects(&mut self, index: usize) {
        let unit = &mut self.units[index];
        let active: Vec<_> = unit
            .status_effects()
            .iter()
            .map(|effect| (effect.kind(), effect.stacks()))
            .collect();

        for (kind, stacks) in active {
            let amount = i32::try_from(stacks)
                .unwrap_or(i32::MAX)
                .saturating_mul(PERIODIC_POWER);
            let result = match kind {
                StatusEffectKind::Burn => {
                    unit.modify_health(-amount, DamageKind::Fire, &mut self.bus)
                }
                StatusEffectKind::Poison => {
                    unit.modify_health(-amount, DamageKind::Poison, &mut self.bus)
                }
                StatusEffectKind::Bleed => {
                    unit.modify_health(-amount, DamageKind::Physical, &mut self.bus)
                }
                StatusEffectKind::Regeneration => {
                    unit.modify_health(amount, DamageKind::Physical, &mut self.bus)
                }
                _ => continue,
            };
            if let Err(e) = result {
                tracing::debug!("periodic {} on {} stopped: {}", kind, unit.name(), e);
                break;
            }
        }
    }

    /// Uses the first ability in loadout order that can be planned, targeted
    /// and committed. Returns true if one was used.
    fn try_ability(&mut self, index: usize) -> bool {
        if self.units[index].has_status(StatusEffectKind::Silence) {
            return false;
        }

        for slot in 0..self.units[index].abilities().len() {
            let Some(target) = self.pick_target(index, slot) else {
                continue;
            };

            let caster = &mut self.units[index];
            if let Err(e) = caster.plan_ability_use(slot) {
                tracing::trace!("{} skips slot {}: {}", caster.name(), slot, e);
                continue;
            }
            if let Err(e) = caster.set_ability_target(target) {
                tracing::trace!("{} cannot reach {}: {}", caster.name(), target, e);
                caster.reset_ability_state();
                continue;
            }
            match caster.commit_ability() {
                Ok(resolved) => {
                    self.resolve(resolved);
                    return true;
                }
                Err(e) => {
                    tracing::debug!("{} failed to commit: {}", caster.name(), e);
                    caster.reset_ability_state();
                }
            }
        }

        false
    }

    fn pick_target(&self, index: usize, slot: usize) -> Option<GridCoordinate> {
        let caster = &self.units[index];
        let ability = caster.abilities().get(slot)?;
        let mut candidates = self.units.iter().filter(|other| !other.is_defeated());

        let target = match ability.kind {
            AbilityKind::Attack | AbilityKind::Debuff => candidates
                .filter(|other| caster.team().is_hostile_to(other.team()))
                .min_by_key(|other| {
                    (
                        caster.position().chebyshev_distance(other.position()),
                        other.id(),
                    )
                })?,
            AbilityKind::Heal => candidates
                .filter(|other| {
                    !caster.team().is_hostile_to(other.team())
                        && other.health().current() < other.health().maximum()
                })
                .min_by_key(|other| (other.health().current(), other.id()))?,
            AbilityKind::Buff | AbilityKind::Utility => {
                if ability.effect.is_some_and(|kind| caster.has_status(kind)) {
                    return None;
                }
                candidates.find(|other| other.id() == caster.id())?
            }
        };

        Some(target.position())
    }

    fn resolve(&mut self, resolved: ResolvedAbility) {
        let ResolvedAbility {
            caster,
            ability,
            target,
        } = resolved;
        tracing::info!("unit {} uses {} on {}", caster, ability.name, target);

        let Some(occupant) = self.grid.occupant(target) else {
            tracing::debug!("{} hits empty ground at {}", ability.name, target);
            return;
        };
        let Some(unit) = self.units.iter_mut().find(|unit| unit.id() == occupant) else {
            tracing::warn!("occupant {} at {} is not in the skirmish", occupant, target);
            return;
        };

        if let Err(e) = apply_ability(unit, &ability, caster, &self.catalog, &mut self.bus) {
            tracing::debug!("{} on {} had no effect: {}", ability.name, occupant, e);
        }
    }

    /// Moves toward the nearest hostile through the movement queue.
    fn advance(&mut self, index: usize) {
        let unit = &self.units[index];
        if unit.has_status(StatusEffectKind::Root) {
            return;
        }
        let Some(goal) = self.nearest_hostile(unit) else {
            return;
        };

        let current = unit.position().chebyshev_distance(goal);
        let Some(destination) = unit
            .valid_move_positions(&self.grid)
            .into_iter()
            .min_by_key(|position| (position.chebyshev_distance(goal), *position))
            .filter(|position| position.chebyshev_distance(goal) < current)
        else {
            return;
        };

        let unit = &mut self.units[index];
        let mut ctx = UnitContext::new(&mut self.grid).with_mover(&mut self.moves);
        if let Err(e) = unit.set_target_position(destination, &mut ctx) {
            tracing::debug!("{} cannot advance: {}", unit.name(), e);
            return;
        }
        self.drain_moves();
    }

    fn nearest_hostile(&self, unit: &UnitState) -> Option<GridCoordinate> {
        self.units
            .iter()
            .filter(|other| !other.is_defeated() && unit.team().is_hostile_to(other.team()))
            .map(UnitState::position)
            .min_by_key(|position| (unit.position().chebyshev_distance(*position), *position))
    }

    /// Completes every queued move. Movement here is instantaneous, so each
    /// request finishes as soon as it is dispatched.
    fn drain_moves(&mut self) {
        while let Some(request) = self.moves.pop() {
            match self.units.iter_mut().find(|unit| unit.id() == request.unit) {
                Some(unit) => {
                    if let Err(err) = unit.complete_movement(request.to, &mut self.grid) {
                        tracing::warn!("dropped move request: {err}");
                    }
                }
                None => tracing::warn!("move request for unknown unit {}", request.unit),
            }
        }
    }

    fn remove_defeated(&mut self) {
        let (defeated, alive): (Vec<_>, Vec<_>) = std::mem::take(&mut self.units)
            .into_iter()
            .partition(UnitState::is_defeated);
        self.units = alive;

        for unit in defeated {
            tracing::info!("{} is removed from the board", unit.name());
            unit.destroy(&mut self.grid);
        }
    }

    fn winner(&self) -> Option<TeamId> {
        let mut teams = self
            .units
            .iter()
            .filter(|unit| !unit.is_defeated())
            .map(UnitState::team);
        let first = teams.next()?;
        teams.all(|team| team == first).then_some(first)
    }

    fn report(&self, turns_played: u32) -> SkirmishReport {
        SkirmishReport {
            turns_played,
            winner: self.winner(),
            survivors: self
                .units
                .iter()
                .filter(|unit| !unit.is_defeated())
                .map(|unit| SurvivorSummary {
                    id: unit.id(),
                    name: unit.name().to_string(),
                    position: unit.position(),
                    health: unit.health().current(),
                })
                .collect(),
            defeats: self.defeats.get(),
            events_published: self.bus.published(),
        }
    }
}

/// Applies a committed ability's damage or healing and its status effect.
fn apply_ability(
    unit: &mut UnitState,
    ability: &AbilityData,
    caster: UnitId,
    catalog: &dyn StatusEffectCatalog,
    events: &mut dyn EventSink,
) -> Result<(), UnitError> {
    match ability.kind {
        AbilityKind::Attack | AbilityKind::Debuff if ability.power > 0 => {
            unit.modify_health(-ability.power, damage_kind(ability), events)?;
        }
        AbilityKind::Heal if ability.power > 0 => {
            unit.modify_health(ability.power, DamageKind::Physical, events)?;
        }
        _ => {}
    }

    if let Some(kind) = ability.effect {
        // Zero means "use the definition's base duration".
        let duration = (ability.effect_duration > 0).then_some(ability.effect_duration);
        unit.apply_status_from(catalog, kind, duration, Some(caster), events)?;
    }

    Ok(())
}

fn damage_kind(ability: &AbilityData) -> DamageKind {
    match ability.effect {
        Some(StatusEffectKind::Burn) => DamageKind::Fire,
        Some(StatusEffectKind::Poison) => DamageKind::Poison,
        _ => DamageKind::Physical,
    }
}

fn log_event(event: &UnitEvent) {
    match event {
        UnitEvent::DamageTaken { unit, amount, kind } => {
            tracing::info!("unit {} took {} {} damage", unit, amount, kind)
        }
        UnitEvent::HealingReceived { unit, amount } => {
            tracing::info!("unit {} recovered {} health", unit, amount)
        }
        UnitEvent::Defeated { unit } => tracing::info!("unit {} was defeated", unit),
        UnitEvent::StatusApplied { unit, effect } => {
            tracing::info!("unit {} is affected by {}", unit, effect.name)
        }
        UnitEvent::StatusRemoved { unit, effect } => {
            tracing::info!("unit {} is no longer affected by {}", unit, effect.name)
        }
    }
}
