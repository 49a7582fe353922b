use std::fmt;

/// Unique identifier for a unit on the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitId(pub u32);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Team allegiance of a unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TeamId(pub u8);

impl TeamId {
    /// Conventional team for player-controlled units.
    pub const PLAYER: Self = Self(0);
    /// Conventional team for the opposing side.
    pub const ENEMY: Self = Self(1);

    #[inline]
    pub fn is_hostile_to(self, other: TeamId) -> bool {
        self != other
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "team-{}", self.0)
    }
}

/// Discrete grid position expressed in tile coordinates (column, row).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridCoordinate {
    pub x: i32,
    pub y: i32,
}

impl GridCoordinate {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the coordinate shifted by `(dx, dy)`, or `None` on integer overflow.
    pub fn checked_offset(self, dx: i32, dy: i32) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
        })
    }

    /// Chebyshev (king-move) distance: diagonal steps count as one.
    pub fn chebyshev_distance(self, other: Self) -> u32 {
        let dx = (i64::from(self.x) - i64::from(other.x)).unsigned_abs();
        let dy = (i64::from(self.y) - i64::from(other.y)).unsigned_abs();
        dx.max(dy).min(u64::from(u32::MAX)) as u32
    }
}

impl Default for GridCoordinate {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for GridCoordinate {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chebyshev_distance_counts_diagonals_as_one() {
        let origin = GridCoordinate::new(5, 5);
        assert_eq!(origin.chebyshev_distance(GridCoordinate::new(6, 6)), 1);
        assert_eq!(origin.chebyshev_distance(GridCoordinate::new(2, 7)), 3);
        assert_eq!(origin.chebyshev_distance(origin), 0);
    }

    #[test]
    fn checked_offset_rejects_overflow() {
        let edge = GridCoordinate::new(i32::MAX, 0);
        assert_eq!(edge.checked_offset(1, 0), None);
        assert_eq!(
            edge.checked_offset(-1, 2),
            Some(GridCoordinate::new(i32::MAX - 1, 2))
        );
    }

    #[test]
    fn coordinates_compare_by_value() {
        assert_eq!(GridCoordinate::from((3, -2)), GridCoordinate::new(3, -2));
        assert_eq!(GridCoordinate::new(1, 2).to_string(), "(1, 2)");
        assert!(TeamId::PLAYER.is_hostile_to(TeamId::ENEMY));
        assert!(!TeamId::ENEMY.is_hostile_to(TeamId::ENEMY));
    }
}
