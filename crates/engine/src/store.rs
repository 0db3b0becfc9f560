//! Best-score persistence
//!
//! A [`ScoreStore`] is a tiny key-value collaborator. The engine only ever uses
//! the [`BEST_SCORE_KEY`] entry, but backends accept any key.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Key under which the best score is stored
pub const BEST_SCORE_KEY: &str = "best_score";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("score file {path} could not be accessed")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("score file {path} is not a valid score map")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("score store unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Key-value persistence for scores
pub trait ScoreStore {
    fn get(&self, key: &str) -> Result<Option<u32>>;

    fn set(&mut self, key: &str, value: u32) -> Result<()>;
}

impl<S: ScoreStore + ?Sized> ScoreStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<u32>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: u32) -> Result<()> {
        (**self).set(key, value)
    }
}

/// In-process store; forgets everything on drop
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, u32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: u32) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_owned(), value);
        store
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<u32>> {
        Ok(self.values.get(key).copied())
    }

    fn set(&mut self, key: &str, value: u32) -> Result<()> {
        self.values.insert(key.to_owned(), value);
        Ok(())
    }
}

/// JSON object file, e.g. `{"best_score": 1234}`
///
/// Every `set` rewrites the whole file. A missing file reads as empty.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn load(&self) -> Result<BTreeMap<String, u32>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(self.io_error(e)),
        };

        serde_json::from_str(&text).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, values: &BTreeMap<String, u32>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        let text = serde_json::to_string_pretty(values).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, text).map_err(|e| self.io_error(e))?;
        debug!(path = %self.path.display(), "score file written");
        Ok(())
    }
}

impl ScoreStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<u32>> {
        Ok(self.load()?.get(key).copied())
    }

    fn set(&mut self, key: &str, value: u32) -> Result<()> {
        let mut values = self.load()?;
        values.insert(key.to_owned(), value);
        self.save(&values)
    }
}
