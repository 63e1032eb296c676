//! Kick module - boundary kicks after rotation
//!
//! A rotation may leave some cells past a wall, below the floor or above the top row. Cells are
//! grouped by overshoot direction on each axis and each group contributes one shift:
//!
//! - horizontal groups shift by the number of overshooting cells, or by 1 when those cells sit
//!   on more than one row
//! - vertical groups shift by the number of overshooting cells, or by 1 when those cells sit in
//!   more than one column
//!
//! The shifts are summed into a single translation. The kicked piece must then fit (in bounds,
//! no locked block underneath); otherwise the rotation is rejected. Locked blocks never cause a
//! kick of their own.

use std::collections::BTreeSet;

use crate::field::Field;
use crate::piece::Piece;
use crate::types::{CellPos, RotationDirection};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HorizontalOvershoot {
    None,
    PastLeftWall,
    PastRightWall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerticalOvershoot {
    None,
    PastFloor,
    AboveCeiling,
}

/// Overshoot of a single cell on each axis
pub fn classify(field: &Field, pos: CellPos) -> (HorizontalOvershoot, VerticalOvershoot) {
    let horizontal = if pos.x < 0 {
        HorizontalOvershoot::PastLeftWall
    } else if pos.x >= field.width() as i32 {
        HorizontalOvershoot::PastRightWall
    } else {
        HorizontalOvershoot::None
    };

    let vertical = if pos.y >= field.height() as i32 {
        VerticalOvershoot::PastFloor
    } else if pos.y < 0 {
        VerticalOvershoot::AboveCeiling
    } else {
        VerticalOvershoot::None
    };

    (horizontal, vertical)
}

/// Cells of one overshoot group
#[derive(Debug, Default)]
struct Group {
    count: i32,
    rows: BTreeSet<i32>,
    cols: BTreeSet<i32>,
}

impl Group {
    fn add(&mut self, pos: CellPos) {
        self.count += 1;
        self.rows.insert(pos.y);
        self.cols.insert(pos.x);
    }

    fn horizontal_shift(&self) -> i32 {
        if self.rows.len() > 1 {
            1
        } else {
            self.count
        }
    }

    fn vertical_shift(&self) -> i32 {
        if self.cols.len() > 1 {
            1
        } else {
            self.count
        }
    }
}

/// Combined translation that pushes `piece` back toward the field
///
/// Returns `(0, 0)` when nothing overshoots.
pub fn kick_offset(field: &Field, piece: &Piece) -> CellPos {
    let mut left = Group::default();
    let mut right = Group::default();
    let mut floor = Group::default();
    let mut ceiling = Group::default();

    for pos in piece.cells() {
        let (h, v) = classify(field, pos);
        match h {
            HorizontalOvershoot::PastLeftWall => left.add(pos),
            HorizontalOvershoot::PastRightWall => right.add(pos),
            HorizontalOvershoot::None => {}
        }
        match v {
            VerticalOvershoot::PastFloor => floor.add(pos),
            VerticalOvershoot::AboveCeiling => ceiling.add(pos),
            VerticalOvershoot::None => {}
        }
    }

    let mut dx = 0;
    if left.count > 0 {
        dx += left.horizontal_shift();
    }
    if right.count > 0 {
        dx -= right.horizontal_shift();
    }

    let mut dy = 0;
    if floor.count > 0 {
        dy -= floor.vertical_shift();
    }
    if ceiling.count > 0 {
        dy += ceiling.vertical_shift();
    }

    CellPos::new(dx, dy)
}

/// A successful rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kicked {
    pub piece: Piece,
    /// Translation applied after the turn
    pub offset: CellPos,
}

/// Kick an already rotated piece into a legal placement, if one exists
pub fn resolve(field: &Field, rotated: &Piece) -> Option<Kicked> {
    let offset = kick_offset(field, rotated);
    let kicked = rotated.translated(offset);
    field.fits(&kicked).then_some(Kicked {
        piece: kicked,
        offset,
    })
}

/// Rotate `piece` and resolve the kick; `None` means the rotation is rejected
pub fn try_rotate(field: &Field, piece: &Piece, direction: RotationDirection) -> Option<Kicked> {
    resolve(field, &piece.rotated(direction))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PieceKind, Rgb};

    fn field() -> Field {
        Field::new(10, 20).unwrap()
    }

    #[test]
    fn test_classify() {
        let f = field();
        assert_eq!(
            classify(&f, CellPos::new(-1, 5)),
            (HorizontalOvershoot::PastLeftWall, VerticalOvershoot::None)
        );
        assert_eq!(
            classify(&f, CellPos::new(10, 20)),
            (HorizontalOvershoot::PastRightWall, VerticalOvershoot::PastFloor)
        );
        assert_eq!(
            classify(&f, CellPos::new(3, -1)),
            (HorizontalOvershoot::None, VerticalOvershoot::AboveCeiling)
        );
        assert_eq!(
            classify(&f, CellPos::new(9, 19)),
            (HorizontalOvershoot::None, VerticalOvershoot::None)
        );
    }

    #[test]
    fn test_no_overshoot_means_no_offset() {
        let piece = Piece::new(1, PieceKind::T, Rgb::PURPLE, CellPos::new(3, 3));
        assert_eq!(kick_offset(&field(), &piece), CellPos::new(0, 0));
    }

    #[test]
    fn test_multi_row_overhang_collapses_to_one() {
        // Vertical I in matrix column 2 with the origin at x = 8 puts every cell at x = 10.
        let piece = Piece::new(1, PieceKind::I, Rgb::AQUA, CellPos::new(8, 0))
            .rotated(RotationDirection::Clockwise);
        assert_eq!(kick_offset(&field(), &piece), CellPos::new(-1, 0));
    }

    #[test]
    fn test_floor_overhang_in_one_column_shifts_by_count() {
        // Vertical I at rows 18..=21 overshoots the floor by two cells.
        let piece = Piece::new(1, PieceKind::I, Rgb::AQUA, CellPos::new(3, 18))
            .rotated(RotationDirection::Clockwise);
        assert_eq!(kick_offset(&field(), &piece), CellPos::new(0, -2));
        let kicked = resolve(&field(), &piece).unwrap();
        assert!(kicked.piece.cells().iter().all(|c| c.y <= 19));
    }

    #[test]
    fn test_corner_overhang_combines_both_axes() {
        // O at the bottom-right corner hanging one column and one row outside.
        let piece = Piece::new(1, PieceKind::O, Rgb::YELLOW, CellPos::new(9, 19));
        assert_eq!(kick_offset(&field(), &piece), CellPos::new(-1, -1));
        let kicked = resolve(&field(), &piece).unwrap();
        assert_eq!(kicked.piece.origin, CellPos::new(8, 18));
    }

    #[test]
    fn test_ceiling_overhang_shifts_down() {
        // T's nub sits one row above the top.
        let piece = Piece::new(1, PieceKind::T, Rgb::PURPLE, CellPos::new(3, -1));
        assert_eq!(kick_offset(&field(), &piece), CellPos::new(0, 1));
        let kicked = resolve(&field(), &piece).unwrap();
        assert_eq!(kicked.piece.origin, CellPos::new(3, 0));
    }

    #[test]
    fn test_ceiling_overhang_in_one_column_shifts_by_count() {
        // Vertical I at rows -3..=0: three cells above the top, all in column 5.
        let piece = Piece::new(1, PieceKind::I, Rgb::AQUA, CellPos::new(3, -3))
            .rotated(RotationDirection::Clockwise);
        assert_eq!(kick_offset(&field(), &piece), CellPos::new(0, 3));
        let kicked = resolve(&field(), &piece).unwrap();
        assert!(kicked.piece.cells().iter().all(|c| c.y >= 0 && c.x == 5));
    }

    #[test]
    fn test_ceiling_and_left_wall_combine() {
        let piece = Piece::new(1, PieceKind::O, Rgb::YELLOW, CellPos::new(-1, -1));
        assert_eq!(kick_offset(&field(), &piece), CellPos::new(1, 1));
        let kicked = resolve(&field(), &piece).unwrap();
        assert_eq!(kicked.offset, CellPos::new(1, 1));
        assert_eq!(kicked.piece.origin, CellPos::new(0, 0));
    }
}
