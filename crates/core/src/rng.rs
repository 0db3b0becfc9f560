//! RNG module - piece generation
//!
//! [`PieceSource`] decides which kind comes next. The default draws every piece
//! independently and uniformly, so the same kind can repeat any number of times.
//! The 7-bag variant hands out each kind exactly once per seven draws, and the
//! sequence variant cycles through a fixed list (puzzles and scripted tests).
//!
//! Randomness comes from a seedable ChaCha stream owned by the session, so a
//! seed fully determines the piece order within one process.

use arrayvec::ArrayVec;
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::pieces::Piece;
use crate::types::PieceKind;

/// The RNG a session draws pieces from
pub type GameRng = ChaCha8Rng;

/// Create the session RNG, drawing a fresh seed when none is given
///
/// Returns the RNG together with the seed actually used.
pub fn game_rng(seed: Option<u64>) -> (GameRng, u64) {
    let seed = seed.unwrap_or_else(rand::random);
    (GameRng::seed_from_u64(seed), seed)
}

/// Piece factory
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PieceSource {
    /// Independent uniform choice per piece
    #[default]
    Random,
    /// Shuffled 7-bag; refilled when empty
    Bag { remaining: ArrayVec<PieceKind, 7> },
    /// Cycles through `kinds` forever
    Sequence { kinds: Vec<PieceKind>, cursor: usize },
}

impl PieceSource {
    pub const fn random() -> Self {
        Self::Random
    }

    pub fn bag() -> Self {
        Self::Bag {
            remaining: ArrayVec::new(),
        }
    }

    /// Returns `None` for an empty list
    pub fn sequence(kinds: impl IntoIterator<Item = PieceKind>) -> Option<Self> {
        let kinds: Vec<PieceKind> = kinds.into_iter().collect();
        if kinds.is_empty() {
            return None;
        }
        Some(Self::Sequence { kinds, cursor: 0 })
    }

    /// Pick the next piece kind
    pub fn next_kind<R: Rng>(&mut self, rng: &mut R) -> PieceKind {
        match self {
            PieceSource::Random => PieceKind::ALL[rng.random_range(0..PieceKind::ALL.len())],
            PieceSource::Bag { remaining } => loop {
                if let Some(kind) = remaining.pop() {
                    break kind;
                }
                remaining.extend(PieceKind::ALL);
                remaining.as_mut_slice().shuffle(rng);
            },
            PieceSource::Sequence { kinds, cursor } => {
                let kind = kinds[*cursor % kinds.len()];
                *cursor = (*cursor + 1) % kinds.len();
                kind
            }
        }
    }

    /// Produce the next piece at its spawn position
    pub fn next_piece<R: Rng>(&mut self, rng: &mut R) -> Piece {
        Piece::spawn(self.next_kind(rng))
    }

    /// Forget any bag or sequence progress
    pub fn reset(&mut self) {
        match self {
            PieceSource::Random => {}
            PieceSource::Bag { remaining } => remaining.clear(),
            PieceSource::Sequence { cursor, .. } => *cursor = 0,
        }
    }
}
