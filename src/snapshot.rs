//! Renderable view of a game for presentation layers

use crate::game::{Game, GameState};
use crate::tetromino::{Rotation, TetrominoType};
use serde::Serialize;

/// The falling piece as seen by a renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveSnapshot {
    pub piece: TetrominoType,
    pub rotation: Rotation,
    pub row: i32,
    pub col: i32,
    /// Absolute (row, col) of each block
    pub cells: Vec<(i32, i32)>,
}

/// Board and piece at one instant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub width: usize,
    pub height: usize,
    pub state: GameState,
    /// Settled cells, top row first
    pub board: Vec<Vec<Option<TetrominoType>>>,
    pub active: Option<ActiveSnapshot>,
    pub lines_cleared: u32,
    pub pieces_locked: u32,
}

impl Snapshot {
    pub fn capture(game: &Game) -> Self {
        let board = game.board();
        Self {
            width: board.width(),
            height: board.height(),
            state: game.state(),
            board: board
                .rows()
                .map(|row| row.iter().map(|cell| cell.piece_type()).collect())
                .collect(),
            active: game.active_piece().map(|piece| ActiveSnapshot {
                piece: piece.piece_type,
                rotation: piece.rotation,
                row: piece.row,
                col: piece.col,
                cells: piece.cells().to_vec(),
            }),
            lines_cleared: game.lines_cleared(),
            pieces_locked: game.pieces_locked(),
        }
    }

    /// Settled cells with the falling piece drawn on top
    pub fn merged(&self) -> Vec<Vec<Option<TetrominoType>>> {
        let mut grid = self.board.clone();
        if let Some(active) = &self.active {
            for &(row, col) in &active.cells {
                if let Some(cell) = grid
                    .get_mut(row as usize)
                    .and_then(|cells| cells.get_mut(col as usize))
                {
                    *cell = Some(active.piece);
                }
            }
        }
        grid
    }

    /// One line per row: `.` for empty, the piece letter otherwise
    pub fn to_text(&self) -> String {
        self.merged()
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.map_or('.', |piece| piece.letter()))
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_shows_active_piece() {
        let mut game = Game::default();
        game.spawn_test_mino();
        let snapshot = game.snapshot();
        let text = snapshot.to_text();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 20);
        assert_eq!(lines[0], "....T.....");
        assert_eq!(lines[1], "...TTT....");
        assert_eq!(lines[19], "..........");
        // The settled layer does not include the falling piece
        assert!(snapshot.board.iter().flatten().all(|c| c.is_none()));
    }

    #[test]
    fn test_serializes_state_and_cells() {
        let mut game = Game::default();
        game.spawn_test_mino();
        let json = serde_json::to_value(game.snapshot()).unwrap();
        assert_eq!(json["state"], "Falling");
        assert_eq!(json["width"], 10);
        assert_eq!(json["active"]["piece"], "T");
        assert_eq!(json["active"]["cells"][0], serde_json::json!([0, 4]));
    }
}
