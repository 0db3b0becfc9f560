//! Engine - a session plus best-score bookkeeping
//!
//! [`Engine`] forwards commands and ticks to a [`Session`] and keeps the best
//! score in an injected [`ScoreStore`]. Store access is best effort: failures are
//! logged and never touch the session.
//!
//! The stored best only ever increases. Nothing is written until the stored value
//! has been read successfully, so a failed read can never clobber a higher score.

pub mod store;

use tracing::{debug, warn};

use blockfall_core::{GameSnapshot, Session, SessionConfig};
use blockfall_types::Command;

pub use store::{JsonFileStore, MemoryStore, ScoreStore, StoreError, BEST_SCORE_KEY};

#[derive(Debug)]
pub struct Engine<S: ScoreStore> {
    session: Session,
    store: S,
    /// Last value known to be in the store; `None` until a read succeeds
    stored: Option<u32>,
    /// Highest of the stored value and every score seen by this engine
    best: u32,
}

impl<S: ScoreStore> Engine<S> {
    pub fn new(config: SessionConfig, store: S) -> Self {
        Self::with_session(Session::new(config), store)
    }

    pub fn with_session(session: Session, store: S) -> Self {
        Self {
            session,
            store,
            stored: None,
            best: 0,
        }
    }

    /// Apply a command to the session, then update the best score
    pub fn apply(&mut self, command: Command) -> bool {
        if command == Command::StartGame {
            self.load_best();
        }
        let changed = self.session.apply(command);
        if changed {
            self.record_score();
        }
        changed
    }

    /// Advance gravity, then update the best score
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        let stepped = self.session.tick(elapsed_ms);
        if stepped {
            self.record_score();
        }
        stepped
    }

    /// Best score seen so far, including the stored one once it has been read
    pub fn best_score(&self) -> u32 {
        self.best
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.session.snapshot_into(out);
        out.best_score = self.stored.map(|_| self.best);
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    fn load_best(&mut self) {
        if self.stored.is_some() {
            return;
        }

        match self.store.get(BEST_SCORE_KEY) {
            Ok(value) => {
                let stored = value.unwrap_or(0);
                debug!(stored, "best score loaded");
                self.stored = Some(stored);
                self.best = self.best.max(stored);
            }
            Err(e) => warn!(error = %e, "failed to read best score"),
        }
    }

    fn record_score(&mut self) {
        let score = self.session.score();
        if score <= self.best {
            return;
        }
        self.best = score;

        // Retry the read; never write over a value we have not seen.
        self.load_best();
        let Some(stored) = self.stored else {
            warn!(score, "best score not persisted, store unreadable");
            return;
        };
        if self.best <= stored {
            return;
        }

        match self.store.set(BEST_SCORE_KEY, self.best) {
            Ok(()) => self.stored = Some(self.best),
            Err(e) => warn!(error = %e, score = self.best, "failed to persist best score"),
        }
    }
}
