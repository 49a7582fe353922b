//! Candidate filtering for unit movement.
//!
//! The validator answers "which tiles may this unit be ordered to?" by scanning
//! the square of half-width `range` around the origin and keeping every tile
//! both oracles accept. It does not search paths: a tile behind a wall is a
//! candidate if it is itself walkable. Hosts that need cost-aware reachability
//! intersect this set with their pathfinding service.

use std::collections::HashSet;

use crate::env::OccupancyIndex;
use crate::state::GridCoordinate;

/// Every coordinate within Chebyshev distance `range` of `origin` accepted by
/// both `is_valid` and `is_walkable`.
pub fn valid_move_positions<V, W>(
    origin: GridCoordinate,
    range: u32,
    is_valid: V,
    is_walkable: W,
) -> HashSet<GridCoordinate>
where
    V: Fn(GridCoordinate) -> bool,
    W: Fn(GridCoordinate) -> bool,
{
    let reach = range.min(i32::MAX as u32) as i32;
    let mut positions = HashSet::new();

    for dy in -reach..=reach {
        for dx in -reach..=reach {
            let Some(candidate) = origin.checked_offset(dx, dy) else {
                continue;
            };
            if is_valid(candidate) && is_walkable(candidate) {
                positions.insert(candidate);
            }
        }
    }

    positions
}

/// Movement validation backed by an occupancy index.
#[derive(Clone, Copy)]
pub struct MovementValidator<'a> {
    occupancy: &'a dyn OccupancyIndex,
}

impl<'a> MovementValidator<'a> {
    pub fn new(occupancy: &'a dyn OccupancyIndex) -> Self {
        Self { occupancy }
    }

    pub fn valid_positions(&self, origin: GridCoordinate, range: u32) -> HashSet<GridCoordinate> {
        valid_move_positions(
            origin,
            range,
            |position| self.occupancy.is_position_valid(position),
            |position| self.occupancy.is_walkable(position),
        )
    }

    /// Membership test equivalent to `valid_positions(origin, range).contains(&target)`
    /// without building the set.
    pub fn can_move_to(&self, origin: GridCoordinate, range: u32, target: GridCoordinate) -> bool {
        origin.chebyshev_distance(target) <= range
            && self.occupancy.is_position_valid(target)
            && self.occupancy.is_walkable(target)
    }
}
