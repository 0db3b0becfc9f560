//! Read-only projection of a session for presentation layers
//!
//! A snapshot is plain `Copy` data; renderers can keep one around and refill it
//! every frame with [`Session::snapshot_into`](crate::Session::snapshot_into)
//! without allocating.

use serde::Serialize;

use crate::pieces::{Piece, Shape};
use crate::types::{GameStatus, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl From<Piece> for PieceSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GameSnapshot {
    /// Locked cells, 0 = empty, otherwise `PieceKind::grid_id`
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub current: Option<PieceSnapshot>,
    /// Preview of the piece that spawns next
    pub next: Option<PieceSnapshot>,
    /// Row the current piece would land on
    pub ghost_y: Option<i8>,
    pub status: GameStatus,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub drop_interval_ms: u32,
    /// Filled in by whoever owns the score store
    pub best_score: Option<u32>,
    pub games_started: u32,
    pub seed: u64,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        self.status.is_playing()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            current: None,
            next: None,
            ghost_y: None,
            status: GameStatus::Menu,
            score: 0,
            level: 1,
            lines: 0,
            drop_interval_ms: 0,
            best_score: None,
            games_started: 0,
            seed: 0,
        }
    }
}
