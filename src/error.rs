//! Engine error type

use std::fmt;

/// Errors raised by board operations.
///
/// None of these are reachable through the public controller API; a blocked
/// move or rotation is a rejected result, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// A coordinate outside the grid
    OutOfBounds { row: i32, col: i32 },
    /// Placement onto a cell that already holds material
    Overlap { row: i32, col: i32 },
    /// Board too small to hold every shape's bounding box
    InvalidDimensions { width: usize, height: usize },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::OutOfBounds { row, col } => {
                write!(f, "cell ({}, {}) is outside the board", row, col)
            }
            GameError::Overlap { row, col } => {
                write!(f, "cell ({}, {}) is already occupied", row, col)
            }
            GameError::InvalidDimensions { width, height } => write!(
                f,
                "board sides must be between {} and {}, got {}x{}",
                crate::board::MIN_DIMENSION,
                crate::board::MAX_DIMENSION,
                width,
                height
            ),
        }
    }
}

impl std::error::Error for GameError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_cell() {
        let err = GameError::Overlap { row: 19, col: 4 };
        assert_eq!(err.to_string(), "cell (19, 4) is already occupied");
    }

    #[test]
    fn test_display_dimensions() {
        let err = GameError::InvalidDimensions { width: 2, height: 20 };
        assert_eq!(err.to_string(), "board sides must be between 4 and 1024, got 2x20");
    }
}
