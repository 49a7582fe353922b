//! Boundary contracts for the collaborators a unit talks to.
//!
//! Occupancy, movement execution, definition catalogs and the event sink are
//! all owned by the host. They are handed to unit operations explicitly
//! (through [`UnitContext`] or as plain parameters), never looked up globally.
mod catalog;
mod movement;
mod occupancy;

pub use catalog::{AbilityCatalog, StatusEffectCatalog};
pub use movement::{MoveQueue, MoveRequest, MovementExecutor};
pub use occupancy::{GridDimensions, GridOccupancy, OccupancyIndex};

/// Mutable collaborators required by position-changing unit operations.
///
/// The movement executor is optional: without one, accepted moves are applied
/// instantly.
pub struct UnitContext<'a> {
    pub occupancy: &'a mut dyn OccupancyIndex,
    pub mover: Option<&'a mut dyn MovementExecutor>,
}

impl<'a> UnitContext<'a> {
    pub fn new(occupancy: &'a mut dyn OccupancyIndex) -> Self {
        Self {
            occupancy,
            mover: None,
        }
    }

    pub fn with_mover(mut self, mover: &'a mut dyn MovementExecutor) -> Self {
        self.mover = Some(mover);
        self
    }
}
