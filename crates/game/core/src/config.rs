/// Tunable defaults for unit creation and compile-time capacities.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TacticsConfig {
    /// Maximum health given to units whose spec does not override it.
    pub default_max_health: u32,
    /// Maximum aura given to units whose spec does not override it.
    pub default_max_aura: u32,
    /// Movement points restored at the start of every turn.
    pub default_movement_points: u32,
}

impl TacticsConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_STATUS_EFFECTS: usize = 8;
    pub const MAX_ABILITIES: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_HEALTH: u32 = 100;
    pub const DEFAULT_MAX_AURA: u32 = 50;
    pub const DEFAULT_MOVEMENT_POINTS: u32 = 3;

    pub fn new() -> Self {
        Self {
            default_max_health: Self::DEFAULT_MAX_HEALTH,
            default_max_aura: Self::DEFAULT_MAX_AURA,
            default_movement_points: Self::DEFAULT_MOVEMENT_POINTS,
        }
    }

    pub fn with_movement_points(mut self, movement_points: u32) -> Self {
        self.default_movement_points = movement_points;
        self
    }
}

impl Default for TacticsConfig {
    fn default() -> Self {
        Self::new()
    }
}
