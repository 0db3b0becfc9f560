//! Session module - one game's mutable progress and the commands that drive it
//!
//! The session ties together the board, the piece factory, the placement checks,
//! scoring and the gravity timer. Every command is total: it either applies a
//! validated change or does nothing. The only way a game ends is a lock whose
//! freshly promoted piece cannot spawn.

use tracing::{debug, info, trace};

use crate::board::Board;
use crate::config::SessionConfig;
use crate::pieces::{try_rotate, Piece};
use crate::placement::{drop_distance, is_valid};
use crate::rng::{game_rng, GameRng, PieceSource};
use crate::scoring::{calculate_level, calculate_score, get_drop_interval_ms};
use crate::snapshot::{GameSnapshot, PieceSnapshot};
use crate::timing::DropTimer;
use crate::types::{Command, Direction, GameStatus, STARTING_LEVEL};

/// Record of the most recent lock (consumed by observers)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    /// The piece exactly as it was merged into the board
    pub piece: Piece,
    pub lines_cleared: u32,
    /// Rows travelled by the hard drop that caused this lock, 0 otherwise
    pub drop_distance: u32,
    pub line_clear_score: u32,
    pub drop_score: u32,
    /// The promoted piece could not spawn
    pub game_over: bool,
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    rng: GameRng,
    seed: u64,
    pieces: PieceSource,
    board: Board,
    current: Option<Piece>,
    next: Option<Piece>,
    status: GameStatus,
    score: u32,
    level: u32,
    lines: u32,
    drop_timer: DropTimer,
    /// Monotonic game counter (increments on every start).
    games_started: u32,
    last_event: Option<LockEvent>,
}

impl Session {
    /// Create a session in the menu state
    pub fn new(config: SessionConfig) -> Self {
        let (rng, seed) = game_rng(config.seed);
        let pieces = config.pieces.clone();

        Self {
            config,
            rng,
            seed,
            pieces,
            board: Board::new(),
            current: None,
            next: None,
            status: GameStatus::Menu,
            score: 0,
            level: STARTING_LEVEL,
            lines: 0,
            drop_timer: DropTimer::new(),
            games_started: 0,
            last_event: None,
        }
    }

    /// Default rules with a fixed seed
    pub fn with_seed(seed: u64) -> Self {
        Self::new(SessionConfig::default().with_seed(seed))
    }

    /// Start a fresh game from any state
    ///
    /// Empties the board, zeroes score and lines, and draws the current and
    /// next piece. The RNG keeps running, so consecutive games differ.
    pub fn start_game(&mut self) {
        self.board.clear();
        self.score = 0;
        self.level = STARTING_LEVEL;
        self.lines = 0;
        self.drop_timer.reset();
        self.last_event = None;
        self.pieces.reset();

        let current = self.pieces.next_piece(&mut self.rng);
        let next = self.pieces.next_piece(&mut self.rng);
        self.current = Some(current);
        self.next = Some(next);

        self.status = GameStatus::Playing;
        self.games_started = self.games_started.wrapping_add(1);
        info!(
            game = self.games_started,
            seed = self.seed,
            first = current.kind.as_str(),
            "game started"
        );
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn games_started(&self) -> u32 {
        self.games_started
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for puzzle setups and tests
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn current(&self) -> Option<Piece> {
        self.current
    }

    pub fn next(&self) -> Option<Piece> {
        self.next
    }

    /// Get current drop interval based on level
    pub fn drop_interval_ms(&self) -> u32 {
        get_drop_interval_ms(self.level)
    }

    /// Time accumulated towards the next gravity step
    pub fn drop_timer_ms(&self) -> u32 {
        self.drop_timer.elapsed_ms()
    }

    /// Where the current piece would land if hard dropped
    pub fn ghost(&self) -> Option<Piece> {
        let piece = self.current?;
        let distance = drop_distance(&piece, &self.board);
        Some(piece.shifted(0, distance as i8))
    }

    pub fn last_event(&self) -> Option<&LockEvent> {
        self.last_event.as_ref()
    }

    /// Take and clear the last lock event
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Apply a command; returns whether anything changed
    ///
    /// Commands whose precondition is not met (see [`GameStatus::accepts`]) are no-ops.
    pub fn apply(&mut self, command: Command) -> bool {
        if !self.status.accepts(command) {
            trace!(command = command.as_str(), status = self.status.as_str(), "command ignored");
            return false;
        }

        match command {
            Command::StartGame => {
                self.start_game();
                true
            }
            Command::Move(direction) => self.move_piece(direction),
            Command::Rotate => self.rotate(),
            Command::HardDrop => self.hard_drop(),
            Command::Pause => self.pause(),
            Command::Resume => self.resume(),
        }
    }

    /// Move the current piece one cell
    ///
    /// A blocked downward move locks the piece instead.
    pub fn move_piece(&mut self, direction: Direction) -> bool {
        if !self.status.is_playing() {
            return false;
        }
        let Some(piece) = self.current else {
            return false;
        };

        let (dx, dy) = direction.offset();
        if is_valid(&piece, &self.board, dx, dy) {
            self.current = Some(piece.shifted(dx, dy));
            return true;
        }

        if direction == Direction::Down {
            self.lock_piece(0);
            return true;
        }

        false
    }

    /// Rotate the current piece clockwise if the result fits
    pub fn rotate(&mut self) -> bool {
        if !self.status.is_playing() {
            return false;
        }
        let Some(piece) = self.current else {
            return false;
        };

        let board = &self.board;
        match try_rotate(&piece, self.config.rotation, |candidate| {
            is_valid(candidate, board, 0, 0)
        }) {
            Some(rotated) => {
                self.current = Some(rotated);
                true
            }
            None => false,
        }
    }

    /// Drop the current piece as far as it goes and lock it
    ///
    /// Awards 2 points per row travelled on top of the line-clear score.
    pub fn hard_drop(&mut self) -> bool {
        if !self.status.is_playing() {
            return false;
        }
        let Some(piece) = self.current else {
            return false;
        };

        let distance = drop_distance(&piece, &self.board);
        self.current = Some(piece.shifted(0, distance as i8));
        self.lock_piece(distance);
        true
    }

    pub fn pause(&mut self) -> bool {
        if !self.status.is_playing() {
            return false;
        }
        self.status = GameStatus::Paused;
        debug!("paused");
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.status != GameStatus::Paused {
            return false;
        }
        self.status = GameStatus::Playing;
        debug!("resumed");
        true
    }

    /// Advance the gravity timer by `elapsed_ms`
    ///
    /// Does nothing unless playing. Returns true when a gravity step ran.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.status.is_playing() {
            return false;
        }

        if !self.drop_timer.advance(elapsed_ms, self.drop_interval_ms()) {
            return false;
        }

        trace!(level = self.level, "gravity step");
        self.move_piece(Direction::Down)
    }

    /// Lock the current piece and run the line-clear, scoring and spawn sequence
    fn lock_piece(&mut self, hard_drop_cells: u32) {
        let Some(piece) = self.current.take() else {
            return;
        };

        self.board.merge(&piece);
        let lines_cleared = self.board.collapse_full_rows() as u32;

        // Score with the level in effect before these lines count.
        let result = calculate_score(lines_cleared, self.level, hard_drop_cells);
        self.score = self.score.saturating_add(result.total);
        self.lines = self.lines.saturating_add(lines_cleared);

        let level = calculate_level(self.lines);
        if level != self.level {
            info!(level, lines = self.lines, "level up");
        }
        self.level = level;

        let spawned = match self.next.take() {
            Some(next) => next,
            None => self.pieces.next_piece(&mut self.rng),
        };
        self.next = Some(self.pieces.next_piece(&mut self.rng));
        self.current = Some(spawned);

        let game_over = !is_valid(&spawned, &self.board, 0, 0);
        debug!(
            kind = piece.kind.as_str(),
            x = piece.x,
            y = piece.y,
            lines_cleared,
            score = self.score,
            "piece locked"
        );
        if game_over {
            self.status = GameStatus::GameOver;
            info!(
                score = self.score,
                lines = self.lines,
                level = self.level,
                "game over"
            );
        }

        self.last_event = Some(LockEvent {
            piece,
            lines_cleared,
            drop_distance: hard_drop_cells,
            line_clear_score: result.line_clear_score,
            drop_score: result.drop_score,
            game_over,
        });
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);

        out.current = self.current.map(PieceSnapshot::from);
        out.next = self.next.map(PieceSnapshot::from);
        out.ghost_y = self.ghost().map(|ghost| ghost.y);
        out.status = self.status;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.drop_interval_ms = self.drop_interval_ms();
        out.games_started = self.games_started;
        out.seed = self.seed;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
