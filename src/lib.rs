//! Falling-block puzzle engine.
//!
//! [`Game`] is the controller a frontend drives: `spawn_test_mino`,
//! `move_left`, `move_right`, `move_down` and `rotate`, with
//! [`Game::snapshot`] for rendering.

pub mod bag;
pub mod board;
pub mod collision;
pub mod error;
pub mod game;
pub mod piece;
pub mod settings;
pub mod snapshot;
pub mod srs;
pub mod tetromino;

pub use board::{Board, Cell};
pub use error::GameError;
pub use game::{DownResult, Game, GameConfig, GameState};
pub use piece::{MoveResult, Piece};
pub use snapshot::Snapshot;
pub use tetromino::{Rotation, RotationDirection, TetrominoType};
