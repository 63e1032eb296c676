//! Shapes module - piece templates and the shape library
//!
//! Every kind has an immutable N×N template (O: 2, I: 4, the rest: 3) in (row, column)
//! order. Rotation always works on a copy; see [`crate::piece`].

use crate::config::ColorScheme;
use crate::types::{PieceKind, Rgb};

/// Largest template edge (the I piece)
pub const MAX_SHAPE_SIZE: usize = 4;

/// N×N occupancy matrix, stored in a fixed 4×4 block
///
/// Entries outside `size × size` are always `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeMatrix {
    size: usize,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl ShapeMatrix {
    /// Build from occupied (row, col) entries
    ///
    /// # Panics
    ///
    /// If `size` is not 2, 3 or 4, or an entry lies outside the matrix. Templates are static
    /// data, so this only fires on a programming error.
    pub fn from_entries(size: usize, entries: &[(usize, usize)]) -> Self {
        assert!((2..=MAX_SHAPE_SIZE).contains(&size), "unsupported size {size}");
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for &(row, col) in entries {
            assert!(row < size && col < size, "entry ({row}, {col}) outside {size}x{size}");
            cells[row][col] = true;
        }
        Self { size, cells }
    }

    pub(crate) fn empty(size: usize) -> Self {
        Self {
            size,
            cells: [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
        }
    }

    /// Edge length N
    pub fn size(&self) -> usize {
        self.size
    }

    /// Occupancy at (row, col); out-of-range reads are `false`
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size && self.cells[row][col]
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, value: bool) {
        self.cells[row][col] = value;
    }

    /// Occupied (row, col) entries in row-major order
    pub fn entries(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.size).flat_map(move |row| {
            (0..self.size).filter_map(move |col| self.cells[row][col].then_some((row, col)))
        })
    }

    /// Number of occupied entries
    pub fn count(&self) -> usize {
        self.entries().count()
    }
}

/// Canonical unrotated template for a kind
pub fn shape_cells(kind: PieceKind) -> ShapeMatrix {
    match kind {
        PieceKind::I => ShapeMatrix::from_entries(4, &[(1, 0), (1, 1), (1, 2), (1, 3)]),
        PieceKind::O => ShapeMatrix::from_entries(2, &[(0, 0), (0, 1), (1, 0), (1, 1)]),
        PieceKind::T => ShapeMatrix::from_entries(3, &[(0, 1), (1, 0), (1, 1), (1, 2)]),
        PieceKind::J => ShapeMatrix::from_entries(3, &[(0, 0), (1, 0), (1, 1), (1, 2)]),
        PieceKind::L => ShapeMatrix::from_entries(3, &[(0, 2), (1, 0), (1, 1), (1, 2)]),
        PieceKind::S => ShapeMatrix::from_entries(3, &[(0, 1), (0, 2), (1, 0), (1, 1)]),
        PieceKind::Z => ShapeMatrix::from_entries(3, &[(0, 0), (0, 1), (1, 1), (1, 2)]),
    }
}

/// Templates plus the color scheme they are drawn with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeLibrary {
    /// Indexed by [`PieceKind::index`]
    templates: [ShapeMatrix; 7],
    colors: ColorScheme,
}

impl ShapeLibrary {
    /// Library with the canonical templates and the given colors
    pub fn new(colors: ColorScheme) -> Self {
        Self {
            templates: PieceKind::ALL.map(shape_cells),
            colors,
        }
    }

    /// Spawn template for `kind`
    pub fn shape_cells(&self, kind: PieceKind) -> ShapeMatrix {
        self.templates[kind.index()]
    }

    /// Color every piece of `kind` is drawn and locked with
    pub fn color(&self, kind: PieceKind) -> Rgb {
        self.colors.color(kind)
    }

    /// The scheme this library was built from
    pub fn colors(&self) -> &ColorScheme {
        &self.colors
    }
}

impl Default for ShapeLibrary {
    fn default() -> Self {
        Self::new(ColorScheme::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_sizes() {
        assert_eq!(shape_cells(PieceKind::O).size(), 2);
        assert_eq!(shape_cells(PieceKind::I).size(), 4);
        for kind in [PieceKind::T, PieceKind::J, PieceKind::L, PieceKind::S, PieceKind::Z] {
            assert_eq!(shape_cells(kind).size(), 3, "{kind}");
        }
    }

    #[test]
    fn test_every_template_has_four_cells() {
        for kind in PieceKind::ALL {
            assert_eq!(shape_cells(kind).count(), 4, "{kind}");
        }
    }

    #[test]
    fn test_entries_are_row_major() {
        let t = shape_cells(PieceKind::T);
        let entries: Vec<_> = t.entries().collect();
        assert_eq!(entries, vec![(0, 1), (1, 0), (1, 1), (1, 2)]);
    }

    #[test]
    fn test_get_out_of_range_is_false() {
        let o = shape_cells(PieceKind::O);
        assert!(o.get(1, 1));
        assert!(!o.get(2, 0));
        assert!(!o.get(0, 3));
    }

    #[test]
    fn test_library_uses_configured_colors() {
        let colors = ColorScheme {
            t: Rgb(1, 2, 3),
            ..ColorScheme::default()
        };
        let lib = ShapeLibrary::new(colors);
        assert_eq!(lib.color(PieceKind::T), Rgb(1, 2, 3));
        assert_eq!(lib.color(PieceKind::I), Rgb::AQUA);
    }

    #[test]
    fn test_library_templates_match_canonical_shapes() {
        let lib = ShapeLibrary::default();
        for kind in PieceKind::ALL {
            assert_eq!(lib.shape_cells(kind), shape_cells(kind), "{kind}");
        }
    }
}
