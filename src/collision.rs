//! Placement checks against the board

use crate::board::Board;

/// Can every cell sit on the board? (in bounds and unoccupied)
pub fn can_place(cells: &[(i32, i32)], board: &Board) -> bool {
    cells
        .iter()
        .all(|&(row, col)| board.in_bounds(row, col) && board.is_occupied(row, col) == Ok(false))
}
