//! Error types
//!
//! Only contract violations and configuration mistakes are errors. A rejected move or rotation
//! is an ordinary `false`, never an `Err`.

use thiserror::Error;

use crate::types::{CellPos, PieceKind};

/// Invalid configuration, raised before any game state exists
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("field dimensions must be positive, got {width}x{height}")]
    NonPositiveDimensions { width: u16, height: u16 },

    #[error("field width {width} is narrower than the widest piece ({min})")]
    FieldTooNarrow { width: u16, min: u16 },

    #[error("field of {cells} cells exceeds the limit of {max}")]
    FieldTooLarge { cells: usize, max: usize },

    #[error("cell size must be positive")]
    ZeroCellSize,

    #[error("gravity interval must be positive")]
    ZeroGravityInterval,

    #[error("weight table is empty")]
    EmptyWeights,

    #[error("all piece weights are zero")]
    AllWeightsZero,

    #[error("piece weights sum to a non-finite total")]
    WeightTotalOverflow,

    #[error("weight for {kind} must be finite and non-negative, got {weight}")]
    InvalidWeight { kind: PieceKind, weight: f32 },

    #[error("could not parse weight entry {0:?} (expected e.g. \"I=1.0\")")]
    MalformedWeight(String),
}

/// Field contract violations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("cell {0} is already locked")]
    CellOccupied(CellPos),

    #[error("cell {0} lies outside the field")]
    OutOfBounds(CellPos),
}

/// Game-level contract violations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("no active piece")]
    NoActivePiece,

    #[error("piece {0} is still falling")]
    PieceAlreadyActive(u32),

    #[error("spawn position for {0} is blocked")]
    SpawnBlocked(PieceKind),

    #[error("game is over")]
    GameOver,

    #[error(transparent)]
    Field(#[from] FieldError),
}
