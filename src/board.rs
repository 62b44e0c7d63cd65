//! Game board representation and line clearing

use crate::error::GameError;
use crate::piece::Piece;
use crate::tetromino::TetrominoType;

/// Standard board dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;
/// Smallest side that still fits the I piece's 4x4 box
pub const MIN_DIMENSION: usize = 4;
/// Largest side; keeps coordinates in i32 and the drawn board in a u16 rect
pub const MAX_DIMENSION: usize = 1024;

/// A cell on the board - either empty or filled by a piece type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(TetrominoType),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }

    pub fn piece_type(&self) -> Option<TetrominoType> {
        match self {
            Cell::Empty => None,
            Cell::Filled(piece_type) => Some(*piece_type),
        }
    }
}

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    /// Row-major cells, row 0 is the top row
    cells: Vec<Cell>,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            cells: vec![Cell::Empty; BOARD_WIDTH * BOARD_HEIGHT],
        }
    }
}

impl Board {
    /// Create a new empty board
    pub fn new(width: usize, height: usize) -> Result<Self, GameError> {
        let dimensions = MIN_DIMENSION..=MAX_DIMENSION;
        if !dimensions.contains(&width) || !dimensions.contains(&height) {
            return Err(GameError::InvalidDimensions { width, height });
        }
        let len = width
            .checked_mul(height)
            .ok_or(GameError::InvalidDimensions { width, height })?;
        Ok(Self {
            width,
            height,
            cells: vec![Cell::Empty; len],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if row < 0 || col < 0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(row * self.width + col)
    }

    /// Whether (row, col) lies on the grid
    pub fn in_bounds(&self, row: i32, col: i32) -> bool {
        self.index(row, col).is_some()
    }

    /// Get the cell at a position (row, col)
    /// Returns None if out of bounds
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    /// Set a cell at a position
    /// Returns false if out of bounds
    pub fn set(&mut self, row: i32, col: i32, cell: Cell) -> bool {
        match self.index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check whether a cell holds settled material
    pub fn is_occupied(&self, row: i32, col: i32) -> Result<bool, GameError> {
        self.get(row, col)
            .map(|cell| cell.is_filled())
            .ok_or(GameError::OutOfBounds { row, col })
    }

    /// Merge a piece into the grid.
    ///
    /// Every target cell is validated before anything is written, so a
    /// failed placement leaves the board untouched.
    pub fn place(&mut self, piece: &Piece) -> Result<(), GameError> {
        let positions = piece.cells();
        for &(row, col) in &positions {
            if self.is_occupied(row, col)? {
                return Err(GameError::Overlap { row, col });
            }
        }
        for &(row, col) in &positions {
            self.set(row, col, Cell::Filled(piece.piece_type));
        }
        Ok(())
    }

    /// Remove every full row and return the number removed.
    ///
    /// Rows above a removed row drop down by the number of removed rows
    /// beneath them; the top is refilled with empty rows.
    pub fn clear_filled_rows(&mut self) -> usize {
        let mut lines_cleared = 0;
        let mut write_row = self.height;

        for read_row in (0..self.height).rev() {
            if self.is_row_full(read_row) {
                lines_cleared += 1;
                continue;
            }
            write_row -= 1;
            if write_row != read_row {
                let src = read_row * self.width;
                self.cells
                    .copy_within(src..src + self.width, write_row * self.width);
            }
        }

        // Fill the top with empty rows
        self.cells[..write_row * self.width].fill(Cell::Empty);

        lines_cleared
    }

    /// Check if a row is completely filled
    fn is_row_full(&self, row: usize) -> bool {
        self.row(row).iter().all(|cell| cell.is_filled())
    }

    /// Cells of one row, left to right
    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row * self.width;
        &self.cells[start..start + self.width]
    }

    /// Iterate over rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }

    /// Check if the board is completely empty
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_empty())
    }

    /// Empty every cell, keeping the dimensions
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tetromino::Rotation;

    fn fill_row(board: &mut Board, row: i32) {
        for col in 0..board.width() as i32 {
            board.set(row, col, Cell::Filled(TetrominoType::I));
        }
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::default();
        assert!(board.is_empty());
        assert_eq!(board.width(), 10);
        assert_eq!(board.height(), 20);
    }

    #[test]
    fn test_rejects_tiny_board() {
        assert_eq!(
            Board::new(3, 20),
            Err(GameError::InvalidDimensions { width: 3, height: 20 })
        );
        assert!(Board::new(4, 4).is_ok());
    }

    #[test]
    fn test_rejects_huge_board() {
        assert_eq!(
            Board::new(usize::MAX / 2 + 1, 4),
            Err(GameError::InvalidDimensions { width: usize::MAX / 2 + 1, height: 4 })
        );
        assert_eq!(
            Board::new(70_000, 20),
            Err(GameError::InvalidDimensions { width: 70_000, height: 20 })
        );
        let largest = Board::new(MAX_DIMENSION, MAX_DIMENSION).unwrap();
        assert_eq!(largest.rows().count(), MAX_DIMENSION);
    }

    #[test]
    fn test_in_bounds() {
        let board = Board::new(6, 5).unwrap();
        assert!(board.in_bounds(0, 0));
        assert!(board.in_bounds(4, 5));
        assert!(!board.in_bounds(5, 0));
        assert!(!board.in_bounds(0, 6));
        assert!(!board.in_bounds(-1, 2));
    }

    #[test]
    fn test_set_and_get() {
        let mut board = Board::default();
        assert!(board.set(5, 5, Cell::Filled(TetrominoType::Z)));
        assert_eq!(board.get(5, 5), Some(Cell::Filled(TetrominoType::Z)));
        assert_eq!(board.is_occupied(5, 5), Ok(true));
        assert_eq!(board.is_occupied(5, 6), Ok(false));
    }

    #[test]
    fn test_out_of_bounds() {
        let board = Board::default();
        assert_eq!(board.get(-1, 0), None);
        assert_eq!(board.get(0, -1), None);
        assert_eq!(board.get(20, 0), None);
        assert_eq!(board.get(0, 10), None);
        assert_eq!(
            board.is_occupied(20, 3),
            Err(GameError::OutOfBounds { row: 20, col: 3 })
        );
    }

    #[test]
    fn test_place_writes_piece_cells() {
        let mut board = Board::default();
        let piece = Piece::at(TetrominoType::O, Rotation::North, 18, 0);
        board.place(&piece).unwrap();
        for (row, col) in [(18, 0), (18, 1), (19, 0), (19, 1)] {
            assert_eq!(board.get(row, col), Some(Cell::Filled(TetrominoType::O)));
        }
    }

    #[test]
    fn test_place_overlap_writes_nothing() {
        let mut board = Board::default();
        board.set(19, 1, Cell::Filled(TetrominoType::L));
        let before = board.clone();
        let piece = Piece::at(TetrominoType::O, Rotation::North, 18, 0);
        assert_eq!(board.place(&piece), Err(GameError::Overlap { row: 19, col: 1 }));
        assert_eq!(board, before);
    }

    #[test]
    fn test_place_out_of_bounds() {
        let mut board = Board::default();
        let piece = Piece::at(TetrominoType::O, Rotation::North, 19, 0);
        assert_eq!(
            board.place(&piece),
            Err(GameError::OutOfBounds { row: 20, col: 0 })
        );
        assert!(board.is_empty());
    }

    #[test]
    fn test_clear_single_line() {
        let mut board = Board::default();
        fill_row(&mut board, 19);
        board.set(18, 0, Cell::Filled(TetrominoType::T));

        assert_eq!(board.clear_filled_rows(), 1);
        // The block from row 18 should now be on row 19
        assert_eq!(board.get(19, 0), Some(Cell::Filled(TetrominoType::T)));
        assert!(board.get(18, 0).unwrap().is_empty());
    }

    #[test]
    fn test_clear_non_adjacent_lines() {
        let mut board = Board::default();
        fill_row(&mut board, 19);
        fill_row(&mut board, 17);
        board.set(18, 3, Cell::Filled(TetrominoType::S));
        board.set(16, 4, Cell::Filled(TetrominoType::J));

        assert_eq!(board.clear_filled_rows(), 2);
        assert_eq!(board.get(19, 3), Some(Cell::Filled(TetrominoType::S)));
        assert_eq!(board.get(18, 4), Some(Cell::Filled(TetrominoType::J)));
        assert_eq!(board.rows().filter(|row| row.iter().any(|c| c.is_filled())).count(), 2);
    }

    #[test]
    fn test_clear_nothing() {
        let mut board = Board::default();
        board.set(19, 0, Cell::Filled(TetrominoType::T));
        let before = board.clone();
        assert_eq!(board.clear_filled_rows(), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn test_clear_resets_cells() {
        let mut board = Board::default();
        fill_row(&mut board, 10);
        board.clear();
        assert!(board.is_empty());
    }
}
