//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules of the falling-block game and the session state
//! machine that applies them. It does no I/O: rendering, input mapping and score
//! persistence are the caller's business.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid of locked cells, merging and row collapse
//! - [`pieces`]: the seven shapes, clockwise rotation and optional wall kicks
//! - [`placement`]: collision checks and drop distance
//! - [`rng`]: piece factory (uniform, 7-bag or fixed sequence)
//! - [`scoring`]: line and hard-drop points, levels and the gravity curve
//! - [`timing`]: gravity accumulator
//! - [`session`]: one game's progress and the commands that drive it
//! - [`snapshot`]: `Copy` projection of a session for renderers
//!
//! # Game Rules
//!
//! - New pieces spawn centered on the top row; a spawn that collides ends the game
//! - Rotation is clockwise only and either applies cleanly or not at all
//! - A piece locks as soon as a downward move is blocked (no lock delay)
//! - Each cleared row is worth `100 * level`; a hard drop adds 2 points per row
//! - The level rises every 10 lines and gravity speeds up by 100ms per level
//!
//! # Example
//!
//! ```
//! use blockfall_core::Session;
//! use blockfall_core::types::{Command, Direction, GameStatus};
//!
//! let mut session = Session::with_seed(12345);
//! assert_eq!(session.status(), GameStatus::Menu);
//!
//! session.apply(Command::StartGame);
//! session.apply(Command::Move(Direction::Right));
//! session.apply(Command::Rotate);
//! session.apply(Command::HardDrop);
//!
//! // Hard drop awards points
//! assert!(session.score() > 0);
//! ```
//!
//! # Timing
//!
//! Call [`Session::tick`] with the elapsed time (nominally every
//! [`TICK_MS`](types::TICK_MS)). Gravity fires once the accumulated time reaches
//! the level's interval; larger steps still move the piece a single row.

pub mod board;
pub mod config;
pub mod pieces;
pub mod placement;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;
pub mod timing;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::SessionConfig;
pub use pieces::{get_shape, rotate_cw, try_rotate, Piece, RotationMode, Shape};
pub use placement::{drop_distance, is_valid};
pub use rng::PieceSource;
pub use scoring::{calculate_drop_score, calculate_level, calculate_score, get_drop_interval_ms, ScoreResult};
pub use session::{LockEvent, Session};
pub use snapshot::{GameSnapshot, PieceSnapshot};
pub use timing::DropTimer;
