use std::collections::{HashMap, HashSet};

use crate::state::{GridCoordinate, UnitId};

/// Grid→unit lookup maintained alongside unit positions.
///
/// Units call [`clear_occupant`](Self::clear_occupant) then
/// [`set_occupant`](Self::set_occupant) on every position change, and clear on
/// destruction. Hosts running several units in parallel must serialize access.
pub trait OccupancyIndex {
    fn set_occupant(&mut self, position: GridCoordinate, unit: UnitId);

    fn clear_occupant(&mut self, unit: UnitId);

    fn occupant(&self, position: GridCoordinate) -> Option<UnitId>;

    /// True if the position lies on the board.
    fn is_position_valid(&self, position: GridCoordinate) -> bool;

    /// True if a unit could stand on the position right now.
    fn is_walkable(&self, position: GridCoordinate) -> bool;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridDimensions {
    pub width: u32,
    pub height: u32,
}

impl GridDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: GridCoordinate) -> bool {
        position.x >= 0
            && position.y >= 0
            && i64::from(position.x) < i64::from(self.width)
            && i64::from(position.y) < i64::from(self.height)
    }
}

/// Rectangular board with static blocked tiles and one occupant per tile.
#[derive(Clone, Debug)]
pub struct GridOccupancy {
    dimensions: GridDimensions,
    blocked: HashSet<GridCoordinate>,
    occupants: HashMap<GridCoordinate, UnitId>,
    positions: HashMap<UnitId, GridCoordinate>,
}

impl GridOccupancy {
    pub fn new(dimensions: GridDimensions) -> Self {
        Self {
            dimensions,
            blocked: HashSet::new(),
            occupants: HashMap::new(),
            positions: HashMap::new(),
        }
    }

    pub fn with_blocked(mut self, tiles: impl IntoIterator<Item = GridCoordinate>) -> Self {
        self.blocked.extend(tiles);
        self
    }

    pub fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    /// Marks a tile as impassable terrain.
    pub fn block(&mut self, position: GridCoordinate) {
        self.blocked.insert(position);
    }

    pub fn is_blocked(&self, position: GridCoordinate) -> bool {
        self.blocked.contains(&position)
    }

    pub fn position_of(&self, unit: UnitId) -> Option<GridCoordinate> {
        self.positions.get(&unit).copied()
    }

    pub fn occupied_count(&self) -> usize {
        self.occupants.len()
    }
}

impl OccupancyIndex for GridOccupancy {
    fn set_occupant(&mut self, position: GridCoordinate, unit: UnitId) {
        // Keep both directions consistent even if the caller skipped the clear.
        if let Some(previous) = self.positions.insert(unit, position)
            && previous != position
        {
            self.occupants.remove(&previous);
        }
        if let Some(displaced) = self.occupants.insert(position, unit)
            && displaced != unit
        {
            tracing::warn!(
                "unit {} displaced unit {} at {}",
                unit,
                displaced,
                position
            );
            self.positions.remove(&displaced);
        }
    }

    fn clear_occupant(&mut self, unit: UnitId) {
        if let Some(position) = self.positions.remove(&unit) {
            self.occupants.remove(&position);
        }
    }

    fn occupant(&self, position: GridCoordinate) -> Option<UnitId> {
        self.occupants.get(&position).copied()
    }

    fn is_position_valid(&self, position: GridCoordinate) -> bool {
        self.dimensions.contains(position)
    }

    fn is_walkable(&self, position: GridCoordinate) -> bool {
        self.is_position_valid(position)
            && !self.is_blocked(position)
            && !self.occupants.contains_key(&position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> GridOccupancy {
        GridOccupancy::new(GridDimensions::new(8, 8)).with_blocked([GridCoordinate::new(2, 2)])
    }

    #[test]
    fn walkability_respects_bounds_terrain_and_units() {
        let mut grid = board();
        grid.set_occupant(GridCoordinate::new(3, 3), UnitId(1));

        assert!(grid.is_walkable(GridCoordinate::new(0, 0)));
        assert!(!grid.is_walkable(GridCoordinate::new(-1, 0)));
        assert!(!grid.is_walkable(GridCoordinate::new(8, 0)));
        assert!(!grid.is_walkable(GridCoordinate::new(2, 2)));
        assert!(!grid.is_walkable(GridCoordinate::new(3, 3)));
        assert!(grid.is_position_valid(GridCoordinate::new(3, 3)));
    }

    #[test]
    fn clear_then_set_moves_the_occupant() {
        let mut grid = board();
        let unit = UnitId(4);
        grid.set_occupant(GridCoordinate::new(1, 1), unit);

        grid.clear_occupant(unit);
        grid.set_occupant(GridCoordinate::new(1, 2), unit);

        assert_eq!(grid.occupant(GridCoordinate::new(1, 1)), None);
        assert_eq!(grid.occupant(GridCoordinate::new(1, 2)), Some(unit));
        assert_eq!(grid.position_of(unit), Some(GridCoordinate::new(1, 2)));
        assert_eq!(grid.occupied_count(), 1);
    }

    #[test]
    fn set_without_clear_does_not_leave_stale_entries() {
        let mut grid = board();
        let unit = UnitId(4);
        grid.set_occupant(GridCoordinate::new(1, 1), unit);
        grid.set_occupant(GridCoordinate::new(5, 5), unit);

        assert_eq!(grid.occupant(GridCoordinate::new(1, 1)), None);
        assert_eq!(grid.occupied_count(), 1);
    }

    #[test]
    fn clearing_unknown_unit_is_harmless() {
        let mut grid = board();
        grid.clear_occupant(UnitId(99));
        assert_eq!(grid.occupied_count(), 0);
    }
}
