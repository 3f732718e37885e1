use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::piece::PieceType;

/// Supplies the type of each newly spawned piece.
pub trait PieceSource {
    fn next_piece(&mut self) -> PieceType;
}

/// Walks the piece table in order, wrapping after the last type.
#[derive(Clone, Debug, Default)]
pub struct SequentialPieces {
    next: usize,
}

impl SequentialPieces {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PieceSource for SequentialPieces {
    fn next_piece(&mut self) -> PieceType {
        let piece = PieceType::from_index(self.next);
        self.next = (self.next + 1) % PieceType::COUNT;
        piece
    }
}

#[derive(Clone, Debug)]
pub struct RandomPieces {
    rng: ChaCha8Rng,
}

impl RandomPieces {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Folds `entropy` into the stream. The same state and entropy always give the same
    /// continuation.
    pub fn reseed(&mut self, entropy: u64) {
        let state: u64 = self.rng.gen();
        self.rng = ChaCha8Rng::seed_from_u64(state ^ entropy);
    }
}

impl PieceSource for RandomPieces {
    fn next_piece(&mut self) -> PieceType {
        PieceType::from_index(self.rng.gen_range(0..PieceType::COUNT))
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PieceOrder {
    Sequential,
    Random { seed: u64 },
}

impl Default for PieceOrder {
    fn default() -> Self {
        PieceOrder::Sequential
    }
}

#[derive(Clone, Debug)]
pub enum Pieces {
    Sequential(SequentialPieces),
    Random(RandomPieces),
}

impl Pieces {
    pub fn new(order: PieceOrder) -> Self {
        match order {
            PieceOrder::Sequential => Pieces::Sequential(SequentialPieces::new()),
            PieceOrder::Random { seed } => Pieces::Random(RandomPieces::new(seed)),
        }
    }

    /// Mixes outside entropy into a random order. Sequential order ignores it.
    pub fn reseed(&mut self, entropy: u64) {
        if let Pieces::Random(source) = self {
            source.reseed(entropy);
        }
    }
}

impl PieceSource for Pieces {
    fn next_piece(&mut self) -> PieceType {
        match self {
            Pieces::Sequential(source) => source.next_piece(),
            Pieces::Random(source) => source.next_piece(),
        }
    }
}
