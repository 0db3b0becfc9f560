//! Session configuration
//!
//! Everything here is fixed for the lifetime of a [`Session`](crate::Session);
//! a new configuration means a new session.

use crate::pieces::RotationMode;
use crate::rng::PieceSource;

/// Construction-time options for a session
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionConfig {
    /// RNG seed; a random one is drawn when `None`
    pub seed: Option<u64>,
    /// Piece factory, reset at every game start
    pub pieces: PieceSource,
    pub rotation: RotationMode,
}

impl SessionConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_pieces(mut self, pieces: PieceSource) -> Self {
        self.pieces = pieces;
        self
    }

    pub fn with_rotation(mut self, rotation: RotationMode) -> Self {
        self.rotation = rotation;
        self
    }
}
