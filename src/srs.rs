//! Super Rotation System (SRS) wall kick data
//!
//! If a rotation would collide, these offsets are tried in order and the
//! first one that fits wins. Offsets are (row, col) with row growing downward.

use crate::tetromino::{Rotation, RotationDirection, TetrominoType};

/// Number of candidates tried per rotation
pub const KICK_COUNT: usize = 5;

/// Get wall kick offsets for a rotation attempt
pub fn kicks(
    piece_type: TetrominoType,
    from: Rotation,
    direction: RotationDirection,
) -> [(i32, i32); KICK_COUNT] {
    match piece_type {
        // O piece looks the same in every orientation, nothing to kick
        TetrominoType::O => [(0, 0); KICK_COUNT],
        TetrominoType::I => i_piece_kicks(from, direction),
        _ => jlstz_kicks(from, direction),
    }
}

/// Wall kicks for J, L, S, T, Z pieces
fn jlstz_kicks(from: Rotation, direction: RotationDirection) -> [(i32, i32); KICK_COUNT] {
    use Rotation::*;
    use RotationDirection::*;

    match (from, direction) {
        // 0→R
        (North, Clockwise) => [(0, 0), (0, -1), (-1, -1), (2, 0), (2, -1)],
        // R→0
        (East, CounterClockwise) => [(0, 0), (0, 1), (1, 1), (-2, 0), (-2, 1)],
        // R→2
        (East, Clockwise) => [(0, 0), (0, 1), (1, 1), (-2, 0), (-2, 1)],
        // 2→R
        (South, CounterClockwise) => [(0, 0), (0, -1), (-1, -1), (2, 0), (2, -1)],
        // 2→L
        (South, Clockwise) => [(0, 0), (0, 1), (-1, 1), (2, 0), (2, 1)],
        // L→2
        (West, CounterClockwise) => [(0, 0), (0, -1), (1, -1), (-2, 0), (-2, -1)],
        // L→0
        (West, Clockwise) => [(0, 0), (0, -1), (1, -1), (-2, 0), (-2, -1)],
        // 0→L
        (North, CounterClockwise) => [(0, 0), (0, 1), (-1, 1), (2, 0), (2, 1)],
    }
}

/// Wall kicks for the I piece
fn i_piece_kicks(from: Rotation, direction: RotationDirection) -> [(i32, i32); KICK_COUNT] {
    use Rotation::*;
    use RotationDirection::*;

    match (from, direction) {
        // 0→R
        (North, Clockwise) => [(0, 0), (0, -2), (0, 1), (1, -2), (-2, 1)],
        // R→0
        (East, CounterClockwise) => [(0, 0), (0, 2), (0, -1), (-1, 2), (2, -1)],
        // R→2
        (East, Clockwise) => [(0, 0), (0, -1), (0, 2), (-2, -1), (1, 2)],
        // 2→R
        (South, CounterClockwise) => [(0, 0), (0, 1), (0, -2), (2, 1), (-1, -2)],
        // 2→L
        (South, Clockwise) => [(0, 0), (0, 2), (0, -1), (-1, 2), (2, -1)],
        // L→2
        (West, CounterClockwise) => [(0, 0), (0, -2), (0, 1), (1, -2), (-2, 1)],
        // L→0
        (West, Clockwise) => [(0, 0), (0, 1), (0, -2), (2, 1), (-1, -2)],
        // 0→L
        (North, CounterClockwise) => [(0, 0), (0, -1), (0, 2), (-2, -1), (1, 2)],
    }
}
