//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are plain data with no game logic attached, making them usable
//! from the session controller, persistence adapters and presentation layers alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn row**: 0, pieces centered horizontally
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Suggested fixed timestep for drivers (~60 FPS) |
//! | `BASE_DROP_MS` | 1000 | Gravity interval at level 1 |
//! | `DROP_STEP_MS` | 100 | Interval reduction per level |
//! | `DROP_INTERVAL_FLOOR_MS` | 50 | Fastest gravity interval |
//!
//! # Drop Intervals by Level
//!
//! `max(50, 1000 - (level - 1) * 100)`:
//!
//! | Level | Interval |
//! |-------|----------|
//! | 1 | 1000ms |
//! | 2 | 900ms |
//! | 5 | 600ms |
//! | 10 | 100ms |
//! | 11+ | 50ms |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Command, Direction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let parsed = PieceKind::from_str("t").unwrap();
//! assert_eq!(parsed, PieceKind::T);
//!
//! let command = Command::from_str("moveLeft").unwrap();
//! assert_eq!(command, Command::Move(Direction::Left));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Suggested fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 1 (1000ms = 1 second per row)
pub const BASE_DROP_MS: u32 = 1000;

/// How much faster gravity gets with every level
pub const DROP_STEP_MS: u32 = 100;

/// Gravity never gets faster than this
pub const DROP_INTERVAL_FLOOR_MS: u32 = 50;

/// Points per cleared line, multiplied by the level
pub const LINE_CLEAR_POINTS: u32 = 100;

/// Points per row travelled during a hard drop
pub const HARD_DROP_POINTS_PER_CELL: u32 = 2;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Level a fresh game starts at
pub const STARTING_LEVEL: u32 = 1;


/// The seven tetromino piece kinds
///
/// Each kind doubles as the color tag of the cells it leaves on the board:
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Magenta, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds, in canonical order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Non-zero id used in `u8` grid projections (0 means empty)
    pub fn grid_id(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }

    /// Inverse of [`PieceKind::grid_id`]
    pub fn from_grid_id(id: u8) -> Option<Self> {
        PieceKind::ALL.into_iter().find(|k| k.grid_id() == id)
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by a locked piece of that kind
pub type Cell = Option<PieceKind>;

/// Directions a falling piece can be moved in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    Left,
    Right,
    Down,
}

impl Direction {
    /// Board offset `(dx, dy)` for one step in this direction
    pub fn offset(&self) -> (i8, i8) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
        }
    }
}

/// Commands accepted from the input-handling collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Command {
    /// Start a fresh game (accepted in any state)
    StartGame,
    /// Move the falling piece one cell; a blocked `Down` locks it
    Move(Direction),
    /// Rotate the falling piece 90° clockwise
    Rotate,
    /// Drop the piece as far as it goes and lock it
    HardDrop,
    /// Stop gravity and ignore piece commands
    Pause,
    /// Continue a paused game
    Resume,
}

impl Command {
    /// Parse command from its camelCase protocol name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::{Command, Direction};
    ///
    /// assert_eq!(Command::from_str("hardDrop"), Some(Command::HardDrop));
    /// assert_eq!(Command::from_str("movedown"), Some(Command::Move(Direction::Down)));
    /// assert_eq!(Command::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "startgame" => Some(Command::StartGame),
            "moveleft" => Some(Command::Move(Direction::Left)),
            "moveright" => Some(Command::Move(Direction::Right)),
            "movedown" => Some(Command::Move(Direction::Down)),
            "rotate" => Some(Command::Rotate),
            "harddrop" => Some(Command::HardDrop),
            "pause" => Some(Command::Pause),
            "resume" => Some(Command::Resume),
            _ => None,
        }
    }

    /// Convert to camelCase protocol name
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::StartGame => "startGame",
            Command::Move(Direction::Left) => "moveLeft",
            Command::Move(Direction::Right) => "moveRight",
            Command::Move(Direction::Down) => "moveDown",
            Command::Rotate => "rotate",
            Command::HardDrop => "hardDrop",
            Command::Pause => "pause",
            Command::Resume => "resume",
        }
    }
}

/// Lifecycle of one game
///
/// `Menu` → `Playing` → {`Paused` ⇄ `Playing`, `GameOver`}.
/// `GameOver` only leaves through [`Command::StartGame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameStatus {
    #[default]
    Menu,
    Playing,
    Paused,
    GameOver,
}

impl GameStatus {
    pub fn is_playing(&self) -> bool {
        matches!(self, GameStatus::Playing)
    }

    /// Whether `command` has its precondition met in this state
    pub fn accepts(&self, command: Command) -> bool {
        match command {
            Command::StartGame => true,
            Command::Move(_) | Command::Rotate | Command::HardDrop | Command::Pause => {
                self.is_playing()
            }
            Command::Resume => matches!(self, GameStatus::Paused),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Menu => "menu",
            GameStatus::Playing => "playing",
            GameStatus::Paused => "paused",
            GameStatus::GameOver => "gameOver",
        }
    }
}
