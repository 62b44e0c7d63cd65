//! Piece generation
//!
//! The default source deals the same "test mino" every time. The 7-bag
//! source shuffles all 7 pieces, deals them out, then reshuffles, which
//! prevents long droughts.

use crate::tetromino::TetrominoType;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// How spawned pieces are chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceMode {
    /// Always the configured test piece
    #[default]
    Test,
    /// Seeded 7-bag randomizer
    Bag,
}

/// The 7-bag piece randomizer
#[derive(Debug, Clone)]
pub struct Bag {
    /// Preview queue for upcoming pieces
    queue: Vec<TetrominoType>,
    rng: ChaCha8Rng,
}

impl Bag {
    /// Create a bag randomizer with a fixed seed
    pub fn with_seed(seed: u64) -> Self {
        let mut bag = Self {
            queue: Vec::with_capacity(14),
            rng: ChaCha8Rng::seed_from_u64(seed),
        };
        // Fill the queue with at least 2 full bags
        bag.refill();
        bag.refill();
        bag
    }

    /// Get the next piece from the queue
    pub fn next(&mut self) -> TetrominoType {
        if self.queue.len() <= 7 {
            self.refill();
        }
        self.queue.remove(0)
    }

    /// Preview the next N pieces without removing them
    pub fn preview(&self, count: usize) -> &[TetrominoType] {
        &self.queue[..count.min(self.queue.len())]
    }

    /// Refill the queue with a new shuffled bag
    fn refill(&mut self) {
        let mut new_bag = TetrominoType::all();
        new_bag.shuffle(&mut self.rng);
        self.queue.extend(new_bag);
    }
}

/// Where the controller takes its next piece from
#[derive(Debug, Clone)]
pub enum PieceSource {
    Fixed(TetrominoType),
    Bag { seed: u64, bag: Bag },
}

impl PieceSource {
    pub fn fixed(piece_type: TetrominoType) -> Self {
        PieceSource::Fixed(piece_type)
    }

    pub fn bag(seed: u64) -> Self {
        PieceSource::Bag {
            seed,
            bag: Bag::with_seed(seed),
        }
    }

    pub fn next(&mut self) -> TetrominoType {
        match self {
            PieceSource::Fixed(piece_type) => *piece_type,
            PieceSource::Bag { bag, .. } => bag.next(),
        }
    }

    /// Upcoming pieces; a fixed source repeats its piece
    pub fn preview(&self, count: usize) -> Vec<TetrominoType> {
        match self {
            PieceSource::Fixed(piece_type) => vec![*piece_type; count],
            PieceSource::Bag { bag, .. } => bag.preview(count).to_vec(),
        }
    }

    /// Start the sequence over from the original seed
    pub fn restart(&mut self) {
        if let PieceSource::Bag { seed, bag } = self {
            *bag = Bag::with_seed(*seed);
        }
    }
}

impl Default for PieceSource {
    fn default() -> Self {
        PieceSource::Fixed(TetrominoType::T)
    }
}
