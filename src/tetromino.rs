//! Tetromino definitions and shapes
//!
//! All 7 standard tetrominoes with their four orientations. Offsets are
//! (row, col) inside the shape's bounding box, row growing downward.
//! Each orientation is the clockwise quarter turn of the previous one.

use serde::{Deserialize, Serialize};

/// The 7 tetromino types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TetrominoType {
    I, // long bar
    O, // square
    T,
    S,
    Z,
    J,
    L,
}

impl TetrominoType {
    /// Get all tetromino types for bag randomization
    pub fn all() -> [TetrominoType; 7] {
        [
            TetrominoType::I,
            TetrominoType::O,
            TetrominoType::T,
            TetrominoType::S,
            TetrominoType::Z,
            TetrominoType::J,
            TetrominoType::L,
        ]
    }

    /// Side length of the square box the shape rotates in
    pub fn box_size(&self) -> i32 {
        match self {
            TetrominoType::I => 4,
            TetrominoType::O => 2,
            _ => 3,
        }
    }

    /// Single-letter name used in text snapshots
    pub fn letter(&self) -> char {
        match self {
            TetrominoType::I => 'I',
            TetrominoType::O => 'O',
            TetrominoType::T => 'T',
            TetrominoType::S => 'S',
            TetrominoType::Z => 'Z',
            TetrominoType::J => 'J',
            TetrominoType::L => 'L',
        }
    }

    /// Get the cell offsets for this tetromino at a given rotation
    pub fn cells(&self, rotation: Rotation) -> [(i32, i32); 4] {
        match self {
            // ....    ..I.    ....    .I..
            // IIII    ..I.    ....    .I..
            // ....    ..I.    IIII    .I..
            // ....    ..I.    ....    .I..
            TetrominoType::I => match rotation {
                Rotation::North => [(1, 0), (1, 1), (1, 2), (1, 3)],
                Rotation::East => [(0, 2), (1, 2), (2, 2), (3, 2)],
                Rotation::South => [(2, 0), (2, 1), (2, 2), (2, 3)],
                Rotation::West => [(0, 1), (1, 1), (2, 1), (3, 1)],
            },
            // O piece doesn't change under rotation
            TetrominoType::O => [(0, 0), (0, 1), (1, 0), (1, 1)],
            TetrominoType::T => match rotation {
                Rotation::North => [(0, 1), (1, 0), (1, 1), (1, 2)],
                Rotation::East => [(0, 1), (1, 1), (1, 2), (2, 1)],
                Rotation::South => [(1, 0), (1, 1), (1, 2), (2, 1)],
                Rotation::West => [(0, 1), (1, 0), (1, 1), (2, 1)],
            },
            // .SS    .S.    ...    S..
            // SS.    .SS    .SS    SS.
            // ...    ..S    SS.    .S.
            TetrominoType::S => match rotation {
                Rotation::North => [(0, 1), (0, 2), (1, 0), (1, 1)],
                Rotation::East => [(0, 1), (1, 1), (1, 2), (2, 2)],
                Rotation::South => [(1, 1), (1, 2), (2, 0), (2, 1)],
                Rotation::West => [(0, 0), (1, 0), (1, 1), (2, 1)],
            },
            // ZZ.    ..Z    ...    .Z.
            // .ZZ    .ZZ    ZZ.    ZZ.
            // ...    .Z.    .ZZ    Z..
            TetrominoType::Z => match rotation {
                Rotation::North => [(0, 0), (0, 1), (1, 1), (1, 2)],
                Rotation::East => [(0, 2), (1, 1), (1, 2), (2, 1)],
                Rotation::South => [(1, 0), (1, 1), (2, 1), (2, 2)],
                Rotation::West => [(0, 1), (1, 0), (1, 1), (2, 0)],
            },
            TetrominoType::J => match rotation {
                Rotation::North => [(0, 0), (1, 0), (1, 1), (1, 2)],
                Rotation::East => [(0, 1), (0, 2), (1, 1), (2, 1)],
                Rotation::South => [(1, 0), (1, 1), (1, 2), (2, 2)],
                Rotation::West => [(0, 1), (1, 1), (2, 0), (2, 1)],
            },
            TetrominoType::L => match rotation {
                Rotation::North => [(0, 2), (1, 0), (1, 1), (1, 2)],
                Rotation::East => [(0, 1), (1, 1), (2, 1), (2, 2)],
                Rotation::South => [(1, 0), (1, 1), (1, 2), (2, 0)],
                Rotation::West => [(0, 0), (0, 1), (1, 1), (2, 1)],
            },
        }
    }
}

/// Rotation states (using SRS naming convention)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    North, // Spawn state
    East,  // Clockwise from North
    South, // 180 from North
    West,  // Counter-clockwise from North
}

impl Rotation {
    /// Rotate clockwise: North → East → South → West → North
    pub fn cw(&self) -> Rotation {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise: North → West → South → East → North
    pub fn ccw(&self) -> Rotation {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    /// Orientation index 0-3
    pub fn index(&self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    pub fn all() -> [Rotation; 4] {
        [Rotation::North, Rotation::East, Rotation::South, Rotation::West]
    }
}

/// Direction for rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}
