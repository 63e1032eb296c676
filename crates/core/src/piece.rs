//! Piece module - the falling piece and its rotation
//!
//! A piece is an N×N occupancy matrix anchored at a field-relative origin (the matrix's
//! top-left cell). Rotation is a pure transform of the matrix; whether the result fits is the
//! field's and the kick resolver's business.

use arrayvec::ArrayVec;

use crate::shapes::{ShapeLibrary, ShapeMatrix, MAX_SHAPE_SIZE};
use crate::types::{CellPos, PieceKind, Rgb, Rotation, RotationDirection};

/// Absolute cells of a piece (at most one per matrix entry)
pub type PieceCells = ArrayVec<CellPos, { MAX_SHAPE_SIZE * MAX_SHAPE_SIZE }>;

/// Pivot-relative coordinate of each matrix index, per size 2, 3, 4.
///
/// Even sizes have no center cell, so the pivot sits between the middle indices.
const PIVOT_COORDS: [&[i8]; 3] = [&[-1, 1], &[-1, 0, 1], &[-2, -1, 1, 2]];

/// Index whose pivot coordinate is the negation of `index`'s
fn reflect(size: usize, index: usize) -> usize {
    let coords = PIVOT_COORDS[size - 2];
    let mirrored = -coords[index];
    coords
        .iter()
        .position(|&c| c == mirrored)
        .unwrap_or(size - 1 - index)
}

/// Turn a matrix 90° in `direction`
///
/// Clockwise: `new[r][c] = old[reflect(c)][r]`.
/// Counter-clockwise: `new[r][c] = old[c][reflect(r)]`.
pub fn rotate_matrix(matrix: &ShapeMatrix, direction: RotationDirection) -> ShapeMatrix {
    let n = matrix.size();
    let mut out = ShapeMatrix::empty(n);
    for row in 0..n {
        for col in 0..n {
            let value = match direction {
                RotationDirection::Clockwise => matrix.get(reflect(n, col), row),
                RotationDirection::CounterClockwise => matrix.get(col, reflect(n, row)),
            };
            out.set(row, col, value);
        }
    }
    out
}

/// The active, player-controlled piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub id: u32,
    pub kind: PieceKind,
    pub color: Rgb,
    /// Tracks `matrix`; only rotation changes it
    rotation: Rotation,
    pub origin: CellPos,
    matrix: ShapeMatrix,
}

impl Piece {
    /// Piece in spawn orientation at `origin`
    pub fn new(id: u32, kind: PieceKind, color: Rgb, origin: CellPos) -> Self {
        Self {
            id,
            kind,
            color,
            rotation: Rotation::North,
            origin,
            matrix: crate::shapes::shape_cells(kind),
        }
    }

    /// Piece colored from a shape library
    pub fn from_library(library: &ShapeLibrary, id: u32, kind: PieceKind, origin: CellPos) -> Self {
        Self {
            matrix: library.shape_cells(kind),
            ..Self::new(id, kind, library.color(kind), origin)
        }
    }

    /// Orientation relative to the spawn layout
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Current occupancy matrix
    pub fn matrix(&self) -> &ShapeMatrix {
        &self.matrix
    }

    /// Edge length of the occupancy matrix
    pub fn size(&self) -> usize {
        self.matrix.size()
    }

    /// Absolute field coordinates of every occupied entry, row-major
    pub fn cells(&self) -> PieceCells {
        self.matrix
            .entries()
            .map(|(row, col)| self.origin + CellPos::new(col as i32, row as i32))
            .collect()
    }

    /// Copy shifted by `delta`
    pub fn translated(&self, delta: CellPos) -> Self {
        Self {
            origin: self.origin + delta,
            ..*self
        }
    }

    /// Copy turned 90° in `direction` around the same origin
    pub fn rotated(&self, direction: RotationDirection) -> Self {
        Self {
            matrix: rotate_matrix(&self.matrix, direction),
            rotation: self.rotation.turned(direction),
            ..*self
        }
    }

    /// Turn in place; never checks legality
    pub fn rotate(&mut self, direction: RotationDirection) {
        *self = self.rotated(direction);
    }
}
