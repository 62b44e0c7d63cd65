//! Active falling piece logic

use crate::board::Board;
use crate::collision::can_place;
use crate::srs::kicks;
use crate::tetromino::{Rotation, RotationDirection, TetrominoType};

/// Outcome of an attempted shift or rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResult {
    /// The piece moved
    Accepted,
    /// The piece is where it was
    Rejected,
}

impl MoveResult {
    pub fn is_accepted(&self) -> bool {
        matches!(self, MoveResult::Accepted)
    }
}

/// An active falling piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    /// The type of tetromino
    pub piece_type: TetrominoType,
    /// Current rotation state
    pub rotation: Rotation,
    /// Top-left corner of the shape's bounding box
    pub row: i32,
    pub col: i32,
    /// Which wall kick was used for the last rotation
    /// 0 = no rotation since the last shift, 1-5 = kick index
    pub last_kick: u8,
}

impl Piece {
    /// Create a piece at the spawn anchor of a board `board_width` wide
    pub fn spawn(piece_type: TetrominoType, board_width: usize) -> Self {
        Self::at(piece_type, Rotation::North, 0, spawn_col(board_width))
    }

    /// Create a piece at an explicit anchor
    pub fn at(piece_type: TetrominoType, rotation: Rotation, row: i32, col: i32) -> Self {
        Self {
            piece_type,
            rotation,
            row,
            col,
            last_kick: 0,
        }
    }

    /// Get the absolute positions of all 4 blocks
    pub fn cells(&self) -> [(i32, i32); 4] {
        self.cells_at(self.rotation, self.row, self.col)
    }

    fn cells_at(&self, rotation: Rotation, row: i32, col: i32) -> [(i32, i32); 4] {
        self.piece_type
            .cells(rotation)
            .map(|(dr, dc)| (row + dr, col + dc))
    }

    /// Try to move by (dr, dc); the piece is unchanged when rejected
    pub fn shift(&mut self, dr: i32, dc: i32, board: &Board) -> MoveResult {
        let target = self.cells_at(self.rotation, self.row + dr, self.col + dc);
        if !can_place(&target, board) {
            return MoveResult::Rejected;
        }
        self.row += dr;
        self.col += dc;
        self.last_kick = 0;
        MoveResult::Accepted
    }

    /// Try to rotate, using SRS wall kicks
    pub fn rotate(&mut self, direction: RotationDirection, board: &Board) -> MoveResult {
        let new_rotation = match direction {
            RotationDirection::Clockwise => self.rotation.cw(),
            RotationDirection::CounterClockwise => self.rotation.ccw(),
        };

        for (kick_idx, (kick_row, kick_col)) in kicks(self.piece_type, self.rotation, direction)
            .into_iter()
            .enumerate()
        {
            let (row, col) = (self.row + kick_row, self.col + kick_col);
            if can_place(&self.cells_at(new_rotation, row, col), board) {
                self.rotation = new_rotation;
                self.row = row;
                self.col = col;
                self.last_kick = (kick_idx + 1) as u8;
                return MoveResult::Accepted;
            }
        }

        MoveResult::Rejected
    }

    /// Row the piece would come to rest on if dropped straight down
    pub fn landing_row(&self, board: &Board) -> i32 {
        let mut row = self.row;
        while can_place(&self.cells_at(self.rotation, row + 1, self.col), board) {
            row += 1;
        }
        row
    }
}

/// Column of the spawn anchor: top center, two columns left of the middle
pub fn spawn_col(board_width: usize) -> i32 {
    board_width as i32 / 2 - 2
}
