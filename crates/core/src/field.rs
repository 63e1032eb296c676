//! Field module - the grid of locked blocks
//!
//! The field is a `width × height` grid stored as a flat row-major array so occupancy lookups
//! are O(1). A per-row occupancy count makes complete-row detection independent of width.
//! Coordinates: (x, y) where x grows to the right and y grows downward; row 0 is the top.

use crate::config::MAX_FIELD_CELLS;
use crate::error::{ConfigError, FieldError};
use crate::piece::Piece;
use crate::types::{CellPos, MoveDirection, PieceKind, Rgb};

/// A locked block and the piece it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Block {
    pub kind: PieceKind,
    pub color: Rgb,
    pub piece_id: u32,
}

impl Block {
    /// Block carrying the kind, color and id of `piece`
    pub fn from_piece(piece: &Piece) -> Self {
        Self {
            kind: piece.kind,
            color: piece.color,
            piece_id: piece.id,
        }
    }
}

/// A block together with its position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub struct LockedCell {
    pub pos: CellPos,
    pub block: Block,
}

/// One block moved by compaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub struct RowShift {
    pub from: CellPos,
    pub to: CellPos,
}

/// What [`Field::clear_rows`] did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearReport {
    /// Rows actually cleared, bottom to top
    pub rows: Vec<usize>,
    /// Blocks that were in those rows before removal
    pub removed: Vec<LockedCell>,
    /// Old → new position of every block that moved down
    pub shifts: Vec<RowShift>,
}

impl ClearReport {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The playfield
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    width: u16,
    height: u16,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Option<Block>>,
    /// Occupied cells per row
    row_counts: Vec<u16>,
}

impl Field {
    /// Create an empty field
    pub fn new(width: u16, height: u16) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::NonPositiveDimensions { width, height });
        }
        let cells = width as usize * height as usize;
        if cells > MAX_FIELD_CELLS {
            return Err(ConfigError::FieldTooLarge {
                cells,
                max: MAX_FIELD_CELLS,
            });
        }
        Ok(Self {
            width,
            height,
            cells: vec![None; cells],
            row_counts: vec![0; height as usize],
        })
    }

    /// Number of columns
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Number of rows
    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline(always)]
    fn index(&self, pos: CellPos) -> Option<usize> {
        if self.is_out_of_bounds(pos) {
            return None;
        }
        Some(pos.y as usize * self.width as usize + pos.x as usize)
    }

    /// Column outside `[0, width)`
    pub fn is_position_out_of_bounds_x(&self, pos: CellPos) -> bool {
        pos.x < 0 || pos.x >= self.width as i32
    }

    /// Row outside `[0, height)`
    pub fn is_position_out_of_bounds_y(&self, pos: CellPos) -> bool {
        pos.y < 0 || pos.y >= self.height as i32
    }

    /// Outside the field on either axis
    pub fn is_out_of_bounds(&self, pos: CellPos) -> bool {
        self.is_position_out_of_bounds_x(pos) || self.is_position_out_of_bounds_y(pos)
    }

    /// Block at `pos`, if any (out of bounds reads as empty)
    pub fn get(&self, pos: CellPos) -> Option<&Block> {
        self.index(pos).and_then(|i| self.cells[i].as_ref())
    }

    /// True iff a locked block exists at `pos`
    pub fn is_occupied(&self, pos: CellPos) -> bool {
        self.get(pos).is_some()
    }

    /// In bounds and empty
    pub fn is_free(&self, pos: CellPos) -> bool {
        matches!(self.index(pos), Some(i) if self.cells[i].is_none())
    }

    /// Every cell of `piece` is in bounds and empty
    pub fn fits(&self, piece: &Piece) -> bool {
        piece.cells().iter().all(|&c| self.is_free(c))
    }

    /// Whether `piece` can take one step in `direction`
    ///
    /// Horizontal moves are checked against the side walls, downward moves against the floor.
    /// Both fail if a translated cell is already locked.
    pub fn can_move(&self, piece: &Piece, direction: MoveDirection) -> bool {
        let delta = direction.delta();
        piece.cells().iter().all(|&cell| {
            let target = cell + delta;
            let blocked_by_wall = if direction.is_horizontal() {
                self.is_position_out_of_bounds_x(target)
            } else {
                target.y >= self.height as i32
            };
            !blocked_by_wall && !self.is_occupied(target)
        })
    }

    /// Put a single block at `pos`
    pub fn insert(&mut self, pos: CellPos, block: Block) -> Result<(), FieldError> {
        let idx = self.index(pos).ok_or(FieldError::OutOfBounds(pos))?;
        if self.cells[idx].is_some() {
            return Err(FieldError::CellOccupied(pos));
        }
        self.cells[idx] = Some(block);
        self.row_counts[pos.y as usize] += 1;
        Ok(())
    }

    /// Transfer every cell of `piece` into the field
    ///
    /// All targets are checked before anything is written, so an `Err` leaves the field as it
    /// was.
    pub fn lock(&mut self, piece: &Piece) -> Result<Vec<LockedCell>, FieldError> {
        let cells = piece.cells();
        for &pos in &cells {
            if self.is_out_of_bounds(pos) {
                return Err(FieldError::OutOfBounds(pos));
            }
            if self.is_occupied(pos) {
                return Err(FieldError::CellOccupied(pos));
            }
        }

        let block = Block::from_piece(piece);
        let mut locked = Vec::with_capacity(cells.len());
        for &pos in &cells {
            self.insert(pos, block)?;
            locked.push(LockedCell { pos, block });
        }
        Ok(locked)
    }

    /// Number of locked blocks in row `y`
    pub fn row_count(&self, y: usize) -> usize {
        self.row_counts.get(y).copied().unwrap_or(0) as usize
    }

    /// Every column of row `y` is occupied
    pub fn is_row_complete(&self, y: usize) -> bool {
        self.row_count(y) == self.width as usize
    }

    /// Indices of complete rows, bottom to top
    pub fn complete_rows(&self) -> Vec<usize> {
        (0..self.height as usize)
            .rev()
            .filter(|&y| self.is_row_complete(y))
            .collect()
    }

    /// Blocks in row `y`, left to right
    pub fn row(&self, y: usize) -> impl Iterator<Item = LockedCell> + '_ {
        let width = self.width as usize;
        let start = (y.min(self.height as usize)) * width;
        let end = if y < self.height as usize { start + width } else { start };
        self.cells[start..end]
            .iter()
            .enumerate()
            .filter_map(move |(x, cell)| {
                cell.map(|block| LockedCell {
                    pos: CellPos::new(x as i32, y as i32),
                    block,
                })
            })
    }

    /// Remove the given rows and drop everything above them in a single pass
    ///
    /// A block ends up `n` rows lower, where `n` is the number of cleared rows strictly below
    /// it. Duplicates and out-of-range indices are ignored.
    pub fn clear_rows(&mut self, rows: &[usize]) -> ClearReport {
        let height = self.height as usize;
        let width = self.width as usize;

        let mut cleared = vec![false; height];
        for &y in rows {
            if y < height {
                cleared[y] = true;
            }
        }

        let mut report = ClearReport::default();
        for y in (0..height).rev().filter(|&y| cleared[y]) {
            report.rows.push(y);
            report.removed.extend(self.row(y));
        }
        if report.rows.is_empty() {
            return report;
        }

        // Two-pointer compaction, bottom to top. `write_y >= read_y` always holds, so every
        // destination row has already been read.
        let mut write_y = height;
        for read_y in (0..height).rev() {
            if cleared[read_y] {
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                for (x, cell) in self.cells[read_y * width..(read_y + 1) * width]
                    .iter()
                    .enumerate()
                {
                    if cell.is_some() {
                        report.shifts.push(RowShift {
                            from: CellPos::new(x as i32, read_y as i32),
                            to: CellPos::new(x as i32, write_y as i32),
                        });
                    }
                }
                self.cells
                    .copy_within(read_y * width..(read_y + 1) * width, write_y * width);
                self.row_counts[write_y] = self.row_counts[read_y];
            }
        }

        for y in 0..write_y {
            self.cells[y * width..(y + 1) * width].fill(None);
            self.row_counts[y] = 0;
        }

        report
    }

    /// All locked blocks, row-major
    pub fn locked_cells(&self) -> impl Iterator<Item = LockedCell> + '_ {
        let width = self.width as usize;
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.map(|block| LockedCell {
                pos: CellPos::new((i % width) as i32, (i / width) as i32),
                block,
            })
        })
    }

    /// Number of locked blocks
    pub fn len(&self) -> usize {
        self.row_counts.iter().map(|&c| c as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every block
    pub fn clear(&mut self) {
        self.cells.fill(None);
        self.row_counts.fill(0);
    }
}
