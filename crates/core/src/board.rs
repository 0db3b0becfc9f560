//! Board module - manages the locked-cell grid
//!
//! The board is a 10x20 grid where each cell can be empty or filled with a piece kind.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)
//!
//! The board only ever changes through [`Board::merge`] and [`Board::collapse_full_rows`]
//! during play; [`Board::set`] exists for puzzle setups and tests.

use tracing::debug;

use crate::pieces::Piece;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if Self::out_of_bounds(x, y) {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    #[inline(always)]
    fn out_of_bounds(x: i8, y: i8) -> bool {
        x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied
    ///
    /// Anything outside the grid counts as occupied, so walls and floor collide.
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        !matches!(self.get(x, y), Some(None))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .is_some_and(|row| row.iter().all(|cell| cell.is_some()))
    }

    /// Cells of row `y`, left to right
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= BOARD_HEIGHT as usize {
            return None;
        }
        let start = y * BOARD_WIDTH as usize;
        Some(&self.cells[start..start + BOARD_WIDTH as usize])
    }

    /// Write every filled cell of `piece` into the grid, tagged with its kind
    ///
    /// Cells above the top row are dropped. Merging never overwrites a filled
    /// cell: where the piece overlaps the stack (only possible after editing the
    /// board by hand), the locked cell keeps its kind.
    pub fn merge(&mut self, piece: &Piece) {
        for (x, y) in piece.cells() {
            if let Some(idx) = Self::index(x, y) {
                if self.cells[idx].is_none() {
                    self.cells[idx] = Some(piece.kind);
                }
            }
        }
    }

    /// Remove all full rows, shift the rest down and refill the top with empty rows
    ///
    /// Uses a two-pointer scan with zero allocation. Returns the number of rows removed.
    pub fn collapse_full_rows(&mut self) -> usize {
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;
        let mut cleared = 0;

        // Scan from bottom to top
        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
            } else {
                // This row is not full, move it down to the write position
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        // Clear the remaining rows at the top
        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        if cleared > 0 {
            debug!(cleared, "collapsed full rows");
        }
        cleared
    }

    /// Number of filled cells on the whole board
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Write the board as a `u8` grid (0 = empty, otherwise [`PieceKind::grid_id`])
    ///
    /// [`PieceKind::grid_id`]: crate::types::PieceKind::grid_id
    pub fn write_u8_grid(&self, out: &mut [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        let width = BOARD_WIDTH as usize;
        for (y, out_row) in out.iter_mut().enumerate() {
            for (x, out_cell) in out_row.iter_mut().enumerate() {
                *out_cell = self.cells[y * width + x].map_or(0, |kind| kind.grid_id());
            }
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// Build a board from text rows, bottom-aligned
    ///
    /// `.` is empty, a piece letter (`i o t s z j l`, any case) fills the cell
    /// with that kind and `#` fills it with `I`. Returns `None` when a row is not
    /// exactly 10 characters, there are more than 20 rows, or a character is unknown.
    ///
    /// ```
    /// use blockfall_core::Board;
    ///
    /// let board = Board::from_rows(&["##########", "#.....####"]).unwrap();
    /// assert!(board.is_row_full(18));
    /// assert!(!board.is_row_full(19));
    /// ```
    pub fn from_rows(rows: &[&str]) -> Option<Self> {
        use crate::types::PieceKind;

        if rows.len() > BOARD_HEIGHT as usize {
            return None;
        }
        let mut board = Self::new();
        let top = BOARD_HEIGHT as usize - rows.len();
        for (i, row) in rows.iter().enumerate() {
            if row.chars().count() != BOARD_WIDTH as usize {
                return None;
            }
            for (x, ch) in row.chars().enumerate() {
                let cell = match ch {
                    '.' => None,
                    '#' => Some(PieceKind::I),
                    other => Some(PieceKind::from_str(&other.to_string())?),
                };
                board.set(x as i8, (top + i) as i8, cell);
            }
        }
        Some(board)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
    }

    #[test]
    fn test_board_flat_array() {
        let mut board = Board::new();

        board.set(0, 0, Some(PieceKind::I));
        board.set(5, 10, Some(PieceKind::T));

        assert_eq!(board.get(0, 0), Some(Some(PieceKind::I)));
        assert_eq!(board.get(5, 10), Some(Some(PieceKind::T)));

        assert_eq!(board.cells[0], Some(PieceKind::I));
        assert_eq!(board.cells[10 * 10 + 5], Some(PieceKind::T));
    }

    #[test]
    fn test_out_of_bounds_is_occupied() {
        let board = Board::new();
        assert!(board.is_occupied(-1, 5));
        assert!(board.is_occupied(10, 5));
        assert!(board.is_occupied(3, 20));
        assert!(!board.is_occupied(3, 19));
    }

    #[test]
    fn test_merge_drops_cells_above_board() {
        let mut board = Board::new();
        let vertical_i = Piece {
            shape: crate::pieces::get_shape(PieceKind::I).rotate_cw(),
            ..Piece::at(PieceKind::I, 0, -2)
        };
        board.merge(&vertical_i);
        assert_eq!(board.filled_count(), 2);
        assert_eq!(board.get(0, 0), Some(Some(PieceKind::I)));
        assert_eq!(board.get(0, 1), Some(Some(PieceKind::I)));
    }

    #[test]
    fn test_merge_keeps_existing_cells() {
        let mut board = Board::new();
        board.set(1, 19, Some(PieceKind::Z));
        board.merge(&Piece::at(PieceKind::I, 0, 19));
        assert_eq!(board.get(0, 19), Some(Some(PieceKind::I)));
        assert_eq!(board.get(1, 19), Some(Some(PieceKind::Z)));
        assert_eq!(board.filled_count(), 4);
    }

    #[test]
    fn test_write_u8_grid() {
        let mut board = Board::new();
        board.set(2, 19, Some(PieceKind::L));
        let mut grid = [[0u8; 10]; 20];
        board.write_u8_grid(&mut grid);
        assert_eq!(grid[19][2], PieceKind::L.grid_id());
        assert_eq!(grid[19][3], 0);
    }
}
