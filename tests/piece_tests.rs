//! Piece tests - templates and pivot-table rotation

use blockfall::core::{rotate_matrix, shape_cells, ColorScheme, Piece, ShapeLibrary};
use blockfall::types::{CellPos, PieceKind, Rgb, Rotation, RotationDirection};

const CW: RotationDirection = RotationDirection::Clockwise;
const CCW: RotationDirection = RotationDirection::CounterClockwise;

fn sorted_cells(piece: &Piece) -> Vec<CellPos> {
    let mut cells: Vec<CellPos> = piece.cells().into_iter().collect();
    cells.sort();
    cells
}

#[test]
fn test_template_dimensions() {
    for kind in PieceKind::ALL {
        let matrix = shape_cells(kind);
        let expected = match kind {
            PieceKind::I => 4,
            PieceKind::O => 2,
            _ => 3,
        };
        assert_eq!(matrix.size(), expected, "{}", kind);
        assert_eq!(matrix.count(), 4, "{}", kind);
    }
}

#[test]
fn test_i_template_is_second_row() {
    let matrix = shape_cells(PieceKind::I);
    let entries: Vec<(usize, usize)> = matrix.entries().collect();
    assert_eq!(entries, vec![(1, 0), (1, 1), (1, 2), (1, 3)]);
}

#[test]
fn test_library_colors_pieces() {
    let library = ShapeLibrary::new(ColorScheme::default());
    let piece = Piece::from_library(&library, 1, PieceKind::L, CellPos::new(0, 0));
    assert_eq!(piece.color, Rgb::ORANGE);
    assert_eq!(library.color(PieceKind::T), Rgb::PURPLE);
    assert_eq!(library.shape_cells(PieceKind::S), shape_cells(PieceKind::S));
}

#[test]
fn test_four_turns_are_identity() {
    for kind in PieceKind::ALL {
        for direction in [CW, CCW] {
            let start = Piece::new(1, kind, Rgb::RED, CellPos::new(3, 5));
            let mut piece = start;
            for _ in 0..4 {
                piece.rotate(direction);
            }
            assert_eq!(piece, start, "{} {:?}", kind, direction);
        }
    }
}

#[test]
fn test_cw_cw_ccw_ccw_is_identity_from_every_orientation() {
    for kind in PieceKind::ALL {
        let mut start = Piece::new(1, kind, Rgb::RED, CellPos::new(3, 5));
        for _ in 0..4 {
            let turned = start.rotated(CW).rotated(CW).rotated(CCW).rotated(CCW);
            assert_eq!(turned, start, "{} from {:?}", kind, start.rotation());
            start.rotate(CW);
        }
    }
}

#[test]
fn test_opposite_turns_cancel() {
    for kind in PieceKind::ALL {
        let piece = Piece::new(1, kind, Rgb::RED, CellPos::new(0, 0));
        assert_eq!(piece.rotated(CW).rotated(CCW), piece, "{}", kind);
        assert_eq!(piece.rotated(CCW).rotated(CW), piece, "{}", kind);
    }
}

#[test]
fn test_rotation_keeps_origin_and_cell_count() {
    for kind in PieceKind::ALL {
        let piece = Piece::new(1, kind, Rgb::RED, CellPos::new(4, 7));
        let turned = piece.rotated(CW);
        assert_eq!(turned.origin, piece.origin);
        assert_eq!(turned.cells().len(), 4);
        assert_eq!(turned.rotation(), Rotation::East);
    }
}

#[test]
fn test_i_ccw_lands_in_column_one() {
    let piece = Piece::new(1, PieceKind::I, Rgb::AQUA, CellPos::new(0, 0));
    let turned = piece.rotated(CCW);
    assert_eq!(
        sorted_cells(&turned),
        vec![
            CellPos::new(1, 0),
            CellPos::new(1, 1),
            CellPos::new(1, 2),
            CellPos::new(1, 3)
        ]
    );
}

#[test]
fn test_t_cw_points_right() {
    let piece = Piece::new(1, PieceKind::T, Rgb::PURPLE, CellPos::new(0, 0));
    let turned = piece.rotated(CW);
    assert_eq!(
        sorted_cells(&turned),
        vec![
            CellPos::new(1, 0),
            CellPos::new(1, 1),
            CellPos::new(1, 2),
            CellPos::new(2, 1)
        ]
    );
}

#[test]
fn test_rotate_matrix_half_turn_of_s() {
    let s = shape_cells(PieceKind::S);
    let half = rotate_matrix(&rotate_matrix(&s, CW), CW);
    let entries: Vec<(usize, usize)> = half.entries().collect();
    // S is symmetric under a half turn about the center, shifted down one row.
    assert_eq!(entries, vec![(1, 1), (1, 2), (2, 0), (2, 1)]);
}
