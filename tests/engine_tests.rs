//! Engine tests - best score bookkeeping across games and stores

use std::cell::Cell;
use std::path::PathBuf;

use blockfall::core::{PieceSource, Session, SessionConfig};
use blockfall::engine::store::Result as StoreResult;
use blockfall::engine::{Engine, JsonFileStore, MemoryStore, ScoreStore, StoreError, BEST_SCORE_KEY};
use blockfall::types::{Command, Direction, GameStatus, PieceKind};

fn i_pieces() -> SessionConfig {
    SessionConfig::default()
        .with_seed(3)
        .with_pieces(PieceSource::sequence([PieceKind::I]).unwrap())
}

fn temp_store_path(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("blockfall-engine-{}-{}", std::process::id(), name))
        .join("scores.json")
}

/// Store whose every operation fails
#[derive(Debug, Default)]
struct BrokenStore {
    writes: u32,
}

impl ScoreStore for BrokenStore {
    fn get(&self, _key: &str) -> StoreResult<Option<u32>> {
        Err(StoreError::Unavailable("read refused".into()))
    }

    fn set(&mut self, _key: &str, _value: u32) -> StoreResult<()> {
        self.writes += 1;
        Err(StoreError::Unavailable("write refused".into()))
    }
}

/// Store whose first `failed_reads` reads fail; writes always succeed
#[derive(Debug)]
struct FlakyStore {
    inner: MemoryStore,
    failed_reads: Cell<u32>,
}

impl FlakyStore {
    fn new(best: u32, failed_reads: u32) -> Self {
        Self {
            inner: MemoryStore::with_value(BEST_SCORE_KEY, best),
            failed_reads: Cell::new(failed_reads),
        }
    }
}

impl ScoreStore for FlakyStore {
    fn get(&self, key: &str) -> StoreResult<Option<u32>> {
        let remaining = self.failed_reads.get();
        if remaining > 0 {
            self.failed_reads.set(remaining - 1);
            return Err(StoreError::Unavailable("read timed out".into()));
        }
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: u32) -> StoreResult<()> {
        self.inner.set(key, value)
    }
}

#[test]
fn test_best_score_follows_session_score() {
    let mut engine = Engine::new(i_pieces(), MemoryStore::new());
    engine.apply(Command::StartGame);

    for _ in 0..3 {
        assert!(engine.apply(Command::HardDrop));
        assert_eq!(engine.best_score(), engine.session().score());
    }
    assert_eq!(
        engine.store().get(BEST_SCORE_KEY).unwrap(),
        Some(engine.session().score())
    );
}

#[test]
fn test_best_score_survives_restart() {
    let mut engine = Engine::new(i_pieces(), MemoryStore::new());
    engine.apply(Command::StartGame);
    engine.apply(Command::HardDrop);
    engine.apply(Command::HardDrop);
    // 19 rows, then 18 onto the first piece
    let best = engine.best_score();
    assert_eq!(best, 38 + 36);

    engine.apply(Command::StartGame);
    assert_eq!(engine.session().score(), 0);
    engine.apply(Command::HardDrop);
    assert_eq!(engine.best_score(), best);
    assert_eq!(engine.snapshot().best_score, Some(best));
}

#[test]
fn test_soft_moves_do_not_write() {
    let store = MemoryStore::with_value(BEST_SCORE_KEY, 10);
    let mut engine = Engine::new(i_pieces(), store);
    engine.apply(Command::StartGame);
    engine.apply(Command::Move(Direction::Left));
    engine.apply(Command::Rotate);
    engine.tick(1000);

    assert_eq!(engine.best_score(), 10);
    assert_eq!(engine.into_store().get(BEST_SCORE_KEY).unwrap(), Some(10));
}

#[test]
fn test_store_failures_do_not_disturb_play() {
    let mut plain = Engine::new(i_pieces(), MemoryStore::new());
    let mut broken = Engine::new(i_pieces(), BrokenStore::default());

    for command in [
        Command::StartGame,
        Command::HardDrop,
        Command::Move(Direction::Left),
        Command::HardDrop,
        Command::Rotate,
    ] {
        assert_eq!(plain.apply(command), broken.apply(command));
    }

    assert_eq!(broken.session().score(), plain.session().score());
    assert_eq!(broken.session().status(), GameStatus::Playing);
    assert_eq!(broken.session().board(), plain.session().board());
    // Kept in memory; nothing is written to a store that was never read
    assert_eq!(broken.best_score(), plain.best_score());
    assert_eq!(broken.store().writes, 0);
    assert_eq!(broken.snapshot().best_score, None);
}

#[test]
fn test_json_store_persists_between_engines() {
    let path = temp_store_path("persist");

    let mut first = Engine::new(i_pieces(), JsonFileStore::new(&path));
    first.apply(Command::StartGame);
    first.apply(Command::HardDrop);
    assert_eq!(first.best_score(), 38);

    let mut second = Engine::new(i_pieces(), JsonFileStore::new(&path));
    assert_eq!(second.best_score(), 0);
    second.apply(Command::StartGame);
    assert_eq!(second.best_score(), 38);

    let text = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["best_score"], 38);

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn test_corrupt_json_store_falls_back_to_zero() {
    let path = temp_store_path("corrupt");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "{ not json").unwrap();

    let mut engine = Engine::new(i_pieces(), JsonFileStore::new(&path));
    assert!(engine.apply(Command::StartGame));
    assert_eq!(engine.best_score(), 0);
    assert!(engine.apply(Command::HardDrop));
    assert_eq!(engine.session().score(), 38);
    // Kept in memory; the unreadable file is left alone
    assert_eq!(engine.best_score(), 38);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn test_prestarted_session_does_not_lower_stored_best() {
    let mut session = Session::new(i_pieces());
    session.start_game();
    let mut engine = Engine::with_session(session, MemoryStore::with_value(BEST_SCORE_KEY, 500));

    assert!(engine.apply(Command::HardDrop));
    assert_eq!(engine.session().score(), 38);
    assert_eq!(engine.best_score(), 500);
    assert_eq!(engine.store().get(BEST_SCORE_KEY).unwrap(), Some(500));
}

#[test]
fn test_direct_restart_does_not_lower_stored_best() {
    let mut engine = Engine::new(i_pieces(), MemoryStore::with_value(BEST_SCORE_KEY, 500));
    engine.session_mut().start_game();

    engine.apply(Command::HardDrop);
    engine.apply(Command::HardDrop);
    assert_eq!(engine.best_score(), 500);
    assert_eq!(engine.snapshot().best_score, Some(500));
    assert_eq!(engine.store().get(BEST_SCORE_KEY).unwrap(), Some(500));
}

#[test]
fn test_failed_read_does_not_lower_stored_best() {
    // Fails at game start and again on the first lock
    let mut engine = Engine::new(i_pieces(), FlakyStore::new(50, 2));
    engine.apply(Command::StartGame);
    assert_eq!(engine.best_score(), 0);

    assert!(engine.apply(Command::HardDrop));
    assert_eq!(engine.session().score(), 38);
    assert_eq!(engine.store().inner.get(BEST_SCORE_KEY).unwrap(), Some(50));

    // The read succeeds now; 74 beats the stored 50
    assert!(engine.apply(Command::HardDrop));
    assert_eq!(engine.best_score(), 74);
    assert_eq!(engine.store().inner.get(BEST_SCORE_KEY).unwrap(), Some(74));
}

#[test]
fn test_failed_read_then_higher_stored_best_wins() {
    let mut engine = Engine::new(i_pieces(), FlakyStore::new(500, 1));
    engine.apply(Command::StartGame);
    assert_eq!(engine.snapshot().best_score, None);

    engine.apply(Command::HardDrop);
    assert_eq!(engine.best_score(), 500);
    assert_eq!(engine.snapshot().best_score, Some(500));
    assert_eq!(engine.store().inner.get(BEST_SCORE_KEY).unwrap(), Some(500));
}
