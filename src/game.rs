//! Core game state and logic
//!
//! The controller owns the board and the active piece. Every public method
//! runs to completion; gravity and input are both just calls into it.

use crate::bag::PieceSource;
use crate::board::{Board, Cell};
use crate::collision::can_place;
use crate::error::GameError;
use crate::piece::{MoveResult, Piece};
use crate::snapshot::Snapshot;
use crate::tetromino::{RotationDirection, TetrominoType};
use serde::Serialize;

/// Controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameState {
    /// No active piece yet
    Empty,
    /// A piece is falling and accepts input
    Falling,
    /// The piece could not move down and is being merged
    Locking,
    /// Full rows are being removed
    Clearing,
    /// Spawn was blocked; terminal until reset
    GameOver,
}

/// Outcome of a `move_down` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownResult {
    /// The piece dropped one row
    Moved,
    /// The piece locked; carries the number of rows cleared
    Locked { lines_cleared: usize },
    /// Nothing is falling
    Ignored,
}

/// Construction parameters
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub source: PieceSource,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: crate::board::BOARD_WIDTH,
            height: crate::board::BOARD_HEIGHT,
            source: PieceSource::default(),
        }
    }
}

/// The main game struct
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    active: Option<Piece>,
    state: GameState,
    source: PieceSource,
    lines_cleared: u32,
    pieces_locked: u32,
}

impl Game {
    /// Create a game; nothing falls until `spawn_test_mino`
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        Ok(Self {
            board: Board::new(config.width, config.height)?,
            active: None,
            state: GameState::Empty,
            source: config.source,
            lines_cleared: 0,
            pieces_locked: 0,
        })
    }

    /// Create a game around an existing board
    pub fn with_board(board: Board, source: PieceSource) -> Self {
        Self {
            board,
            active: None,
            state: GameState::Empty,
            source,
            lines_cleared: 0,
            pieces_locked: 0,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active_piece(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    /// Total rows cleared this session
    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn is_over(&self) -> bool {
        self.state == GameState::GameOver
    }

    /// Get preview of next pieces
    pub fn preview(&self, count: usize) -> Vec<TetrominoType> {
        self.source.preview(count)
    }

    /// Renderable view of the board and the falling piece
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }

    /// Bring the next piece in at the top center.
    ///
    /// A piece that is still falling is replaced. A blocked spawn ends the game.
    pub fn spawn_test_mino(&mut self) {
        if self.state == GameState::GameOver {
            return;
        }

        let piece = Piece::spawn(self.source.next(), self.board.width());
        if !can_place(&piece.cells(), &self.board) {
            tracing::info!(
                piece = ?piece.piece_type,
                lines = self.lines_cleared,
                pieces = self.pieces_locked,
                "spawn blocked, game over"
            );
            self.active = None;
            self.state = GameState::GameOver;
            return;
        }

        tracing::debug!(piece = ?piece.piece_type, row = piece.row, col = piece.col, "spawned");
        self.active = Some(piece);
        self.state = GameState::Falling;
    }

    pub fn move_left(&mut self) -> MoveResult {
        self.shift(0, -1)
    }

    pub fn move_right(&mut self) -> MoveResult {
        self.shift(0, 1)
    }

    /// Drop one row, or lock the piece when it cannot fall any further
    pub fn move_down(&mut self) -> DownResult {
        if self.state != GameState::Falling {
            return DownResult::Ignored;
        }
        let Some(piece) = &mut self.active else {
            return DownResult::Ignored;
        };

        if piece.shift(1, 0, &self.board).is_accepted() {
            return DownResult::Moved;
        }

        let lines_cleared = self.lock_piece();
        DownResult::Locked { lines_cleared }
    }

    /// Rotate clockwise
    pub fn rotate(&mut self) -> MoveResult {
        self.turn(RotationDirection::Clockwise)
    }

    pub fn rotate_ccw(&mut self) -> MoveResult {
        self.turn(RotationDirection::CounterClockwise)
    }

    /// Start over with an empty board and a fresh piece sequence
    pub fn reset(&mut self) {
        self.board.clear();
        self.source.restart();
        self.active = None;
        self.state = GameState::Empty;
        self.lines_cleared = 0;
        self.pieces_locked = 0;
        tracing::debug!("game reset");
    }

    /// Debug helper: put a few settled cells on the diagonal
    pub fn test_fill(&mut self) {
        let material = [TetrominoType::I, TetrominoType::O, TetrominoType::T];
        for (i, piece_type) in material.into_iter().enumerate() {
            let pos = i as i32;
            let under_active = self
                .active
                .as_ref()
                .is_some_and(|piece| piece.cells().contains(&(pos, pos)));
            // Never write under the falling piece
            if !under_active {
                self.board.set(pos, pos, Cell::Filled(piece_type));
            }
        }
    }

    fn shift(&mut self, dr: i32, dc: i32) -> MoveResult {
        if self.state != GameState::Falling {
            return MoveResult::Rejected;
        }
        match &mut self.active {
            Some(piece) => piece.shift(dr, dc, &self.board),
            None => MoveResult::Rejected,
        }
    }

    fn turn(&mut self, direction: RotationDirection) -> MoveResult {
        if self.state != GameState::Falling {
            return MoveResult::Rejected;
        }
        match &mut self.active {
            Some(piece) => piece.rotate(direction, &self.board),
            None => MoveResult::Rejected,
        }
    }

    /// Lock the current piece, clear rows and spawn the next one
    fn lock_piece(&mut self) -> usize {
        let Some(piece) = self.active.take() else {
            return 0;
        };

        self.state = GameState::Locking;
        if let Err(err) = self.board.place(&piece) {
            // The piece was validated on every move, so this is a bug
            tracing::error!(%err, piece = ?piece.piece_type, "failed to merge piece into board");
            debug_assert!(false, "lock placement failed: {}", err);
            self.state = GameState::GameOver;
            return 0;
        }
        self.pieces_locked += 1;

        self.state = GameState::Clearing;
        let lines_cleared = self.board.clear_filled_rows();
        self.lines_cleared += lines_cleared as u32;
        tracing::debug!(
            piece = ?piece.piece_type,
            row = piece.row,
            col = piece.col,
            lines_cleared,
            "locked"
        );

        self.state = GameState::Empty;
        self.spawn_test_mino();
        lines_cleared
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::with_board(Board::default(), PieceSource::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tetromino::Rotation;

    fn filled(piece_type: TetrominoType) -> Cell {
        Cell::Filled(piece_type)
    }

    #[test]
    fn test_new_game_waits_for_spawn() {
        let mut game = Game::default();
        assert_eq!(game.state(), GameState::Empty);
        assert!(game.active_piece().is_none());
        assert_eq!(game.move_left(), MoveResult::Rejected);
        assert_eq!(game.move_down(), DownResult::Ignored);
    }

    #[test]
    fn test_invalid_dimensions() {
        let config = GameConfig {
            width: 2,
            ..GameConfig::default()
        };
        assert!(matches!(
            Game::new(config),
            Err(GameError::InvalidDimensions { width: 2, height: 20 })
        ));
    }

    #[test]
    fn test_spawn_test_mino_is_t_at_top_center() {
        let mut game = Game::default();
        game.spawn_test_mino();
        assert_eq!(game.state(), GameState::Falling);
        let piece = game.active_piece().unwrap();
        assert_eq!(piece.piece_type, TetrominoType::T);
        assert_eq!(piece.rotation, Rotation::North);
        assert_eq!((piece.row, piece.col), (0, 3));
    }

    #[test]
    fn test_left_then_right_restores_anchor() {
        let mut game = Game::default();
        game.spawn_test_mino();
        let before = game.active_piece().cloned();
        assert!(game.move_left().is_accepted());
        assert!(game.move_right().is_accepted());
        assert_eq!(game.active_piece().cloned(), before);
    }

    #[test]
    fn test_blocked_shift_is_silent() {
        let mut game = Game::default();
        game.spawn_test_mino();
        for _ in 0..3 {
            assert!(game.move_left().is_accepted());
        }
        let before = game.active_piece().cloned();
        assert_eq!(game.move_left(), MoveResult::Rejected);
        assert_eq!(game.active_piece().cloned(), before);
        assert_eq!(game.state(), GameState::Falling);
    }

    #[test]
    fn test_nineteen_drops_lock_at_bottom() {
        let mut game = Game::default();
        game.spawn_test_mino();
        for _ in 0..18 {
            assert_eq!(game.move_down(), DownResult::Moved);
        }
        assert_eq!(game.move_down(), DownResult::Locked { lines_cleared: 0 });

        let board = game.board();
        assert_eq!(board.get(19, 3), Some(filled(TetrominoType::T)));
        assert_eq!(board.get(19, 4), Some(filled(TetrominoType::T)));
        assert_eq!(board.get(19, 5), Some(filled(TetrominoType::T)));
        assert_eq!(board.get(18, 4), Some(filled(TetrominoType::T)));
        assert_eq!(game.pieces_locked(), 1);

        // The next piece is already falling from the top
        assert_eq!(game.state(), GameState::Falling);
        assert_eq!(game.active_piece().map(|p| p.row), Some(0));
    }

    #[test]
    fn test_lock_clears_completed_row() {
        let mut board = Board::default();
        // Bottom row full except columns 3-6, where a flat I lands
        for col in (0..3).chain(7..10) {
            board.set(19, col, filled(TetrominoType::J));
        }
        board.set(18, 0, filled(TetrominoType::Z));
        let mut game = Game::with_board(board, PieceSource::fixed(TetrominoType::I));
        game.spawn_test_mino();

        let mut result = game.move_down();
        while result == DownResult::Moved {
            result = game.move_down();
        }
        assert_eq!(result, DownResult::Locked { lines_cleared: 1 });
        assert_eq!(game.lines_cleared(), 1);
        // The stray block on row 18 slid into the bottom row
        assert_eq!(game.board().get(19, 0), Some(filled(TetrominoType::Z)));
        assert!(game.board().row(19)[1..].iter().all(|c| c.is_empty()));
    }

    #[test]
    fn test_blocked_spawn_is_game_over() {
        let mut board = Board::default();
        board.set(1, 4, filled(TetrominoType::O));
        let mut game = Game::with_board(board, PieceSource::default());
        game.spawn_test_mino();
        assert_eq!(game.state(), GameState::GameOver);
        assert!(game.active_piece().is_none());

        let before = game.board().clone();
        assert_eq!(game.move_left(), MoveResult::Rejected);
        assert_eq!(game.rotate(), MoveResult::Rejected);
        assert_eq!(game.move_down(), DownResult::Ignored);
        game.spawn_test_mino();
        assert_eq!(game.state(), GameState::GameOver);
        assert_eq!(game.board(), &before);
    }

    #[test]
    fn test_stack_to_the_top_ends_game() {
        let mut game = Game::default();
        game.spawn_test_mino();
        let mut locks = 0;
        while !game.is_over() {
            if let DownResult::Locked { .. } = game.move_down() {
                locks += 1;
            }
            assert!(locks < 50, "game should top out");
        }
        assert_eq!(game.pieces_locked(), locks);
        assert_eq!(game.move_down(), DownResult::Ignored);
    }

    #[test]
    fn test_rotate_four_times_restores_orientation() {
        let mut game = Game::default();
        game.spawn_test_mino();
        game.move_down();
        game.move_down();
        let before = game.active_piece().cloned().unwrap();
        for _ in 0..4 {
            assert!(game.rotate().is_accepted());
        }
        let after = game.active_piece().unwrap();
        assert_eq!(after.rotation, before.rotation);
        assert_eq!((after.row, after.col), (before.row, before.col));
    }

    #[test]
    fn test_reset_starts_over() {
        let mut game = Game::default();
        game.spawn_test_mino();
        while game.move_down() == DownResult::Moved {}
        game.test_fill();
        game.reset();
        assert_eq!(game.state(), GameState::Empty);
        assert!(game.board().is_empty());
        assert_eq!(game.pieces_locked(), 0);
        game.spawn_test_mino();
        assert_eq!(game.state(), GameState::Falling);
    }

    #[test]
    fn test_spawn_while_falling_replaces_piece() {
        let mut game = Game::default();
        game.spawn_test_mino();
        assert!(game.move_left().is_accepted());
        assert!(game.rotate().is_accepted());
        assert_eq!(game.move_down(), DownResult::Moved);

        game.spawn_test_mino();
        assert_eq!(game.state(), GameState::Falling);
        let piece = game.active_piece().unwrap();
        assert_eq!(piece.rotation, Rotation::North);
        assert_eq!((piece.row, piece.col), (0, 3));
        assert_eq!(game.pieces_locked(), 0);
        assert!(game.board().is_empty());
    }

    #[test]
    fn test_rotate_ccw_then_cw_restores_piece() {
        let mut game = Game::default();
        game.spawn_test_mino();
        game.move_down();
        game.move_down();
        let before = game.active_piece().cloned().unwrap();

        assert!(game.rotate_ccw().is_accepted());
        let turned = game.active_piece().unwrap();
        assert_eq!(turned.rotation, Rotation::West);
        assert_eq!((turned.row, turned.col), (2, 3));
        assert_eq!(turned.last_kick, 1);

        assert!(game.rotate().is_accepted());
        let after = game.active_piece().unwrap();
        assert_eq!(after.rotation, Rotation::North);
        assert_eq!(after.cells(), before.cells());
    }

    #[test]
    fn test_fill_skips_cells_under_active_piece() {
        let mut game = Game::with_board(Board::default(), PieceSource::fixed(TetrominoType::O));
        game.spawn_test_mino();
        while game.move_left().is_accepted() {}
        let piece = game.active_piece().cloned().unwrap();
        assert_eq!(piece.cells(), [(0, 0), (0, 1), (1, 0), (1, 1)]);

        game.test_fill();
        assert_eq!(game.board().get(0, 0), Some(Cell::Empty));
        assert_eq!(game.board().get(1, 1), Some(Cell::Empty));
        assert_eq!(game.board().get(2, 2), Some(filled(TetrominoType::T)));
        assert_eq!(game.move_down(), DownResult::Moved);
    }

    #[test]
    fn test_preview_follows_bag_order() {
        let mut game = Game::with_board(Board::default(), PieceSource::bag(7));
        let upcoming = game.preview(3);
        assert_eq!(upcoming.len(), 3);

        game.spawn_test_mino();
        assert_eq!(game.active_piece().map(|p| p.piece_type), Some(upcoming[0]));
        assert_eq!(game.preview(2), upcoming[1..]);

        while game.move_down() == DownResult::Moved {}
        assert_eq!(game.active_piece().map(|p| p.piece_type), Some(upcoming[1]));
        assert_eq!(game.preview(1), upcoming[2..]);
    }

    #[test]
    fn test_fill_marks_diagonal() {
        let mut game = Game::default();
        game.test_fill();
        assert_eq!(game.board().get(0, 0), Some(filled(TetrominoType::I)));
        assert_eq!(game.board().get(1, 1), Some(filled(TetrominoType::O)));
        assert_eq!(game.board().get(2, 2), Some(filled(TetrominoType::T)));
    }
}
