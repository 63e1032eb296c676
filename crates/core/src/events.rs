//! Outbound notifications
//!
//! The game pushes events onto a queue as operations complete; the driver drains it after each
//! call. Events carry plain data only, so presentation code can animate removals and shifts
//! without looking at the field again.

use serde::Serialize;

use crate::field::{LockedCell, RowShift};
use crate::types::{CellPos, PieceKind, Rgb, RotationDirection};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CoreEvent {
    PieceSpawned {
        piece_id: u32,
        kind: PieceKind,
        origin: CellPos,
    },
    PieceLocked {
        piece_id: u32,
        kind: PieceKind,
        color: Rgb,
        cells: Vec<CellPos>,
    },
    /// Emitted before removal; `cells` are the blocks that were in `rows`
    RowsCompleted {
        rows: Vec<usize>,
        cells: Vec<LockedCell>,
    },
    RowsShifted {
        shifts: Vec<RowShift>,
    },
    RotationRejected {
        piece_id: u32,
        direction: RotationDirection,
    },
    PieceHeld {
        held: PieceKind,
        released: Option<PieceKind>,
    },
    ToppedOut {
        kind: PieceKind,
    },
}

impl CoreEvent {
    /// Short name, e.g. for log prefixes
    pub fn name(&self) -> &'static str {
        match self {
            CoreEvent::PieceSpawned { .. } => "piece_spawned",
            CoreEvent::PieceLocked { .. } => "piece_locked",
            CoreEvent::RowsCompleted { .. } => "rows_completed",
            CoreEvent::RowsShifted { .. } => "rows_shifted",
            CoreEvent::RotationRejected { .. } => "rotation_rejected",
            CoreEvent::PieceHeld { .. } => "piece_held",
            CoreEvent::ToppedOut { .. } => "topped_out",
        }
    }
}
