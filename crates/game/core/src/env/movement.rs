use std::collections::VecDeque;

use crate::state::{GridCoordinate, UnitId};

/// Performs the interpolated relocation of a unit.
///
/// The core never animates movement itself. Once the relocation finishes,
/// the host reports the new coordinate back through
/// [`UnitState::complete_movement`](crate::state::UnitState::complete_movement).
pub trait MovementExecutor {
    fn begin_move(&mut self, unit: UnitId, from: GridCoordinate, to: GridCoordinate);
}

/// A relocation handed to a [`MovementExecutor`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveRequest {
    pub unit: UnitId,
    pub from: GridCoordinate,
    pub to: GridCoordinate,
}

/// Executor that queues requests for the host to complete later, e.g. after
/// an animation frame or at a fixed simulation step.
#[derive(Clone, Debug, Default)]
pub struct MoveQueue {
    pending: VecDeque<MoveRequest>,
}

impl MoveQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pop(&mut self) -> Option<MoveRequest> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl MovementExecutor for MoveQueue {
    fn begin_move(&mut self, unit: UnitId, from: GridCoordinate, to: GridCoordinate) {
        tracing::debug!("queued move for unit {} from {} to {}", unit, from, to);
        self.pending.push_back(MoveRequest { unit, from, to });
    }
}
