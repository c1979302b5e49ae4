use chrono::{DateTime, Local};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use crate::app_dirs::AppDirs;

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("score file I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed score file: {0}")]
    Format(#[from] serde_json::Error),
}

/// The (min, max, attempt limit) slot a round's result competes in
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Signature {
    pub min: i64,
    pub max: i64,
    pub attempt_limit: u32,
}

impl Signature {
    pub fn new(min: i64, max: i64, attempt_limit: u32) -> Self {
        Self {
            min,
            max,
            attempt_limit,
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.min, self.max, self.attempt_limit)
    }
}

impl FromStr for Signature {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        let [min, max, limit] = parts.as_slice() else {
            return Err(format!("expected min:max:attempts, got {s:?}"));
        };
        let bad = |e: std::num::ParseIntError| format!("bad signature {s:?}: {e}");
        Ok(Signature {
            min: min.parse().map_err(bad)?,
            max: max.parse().map_err(bad)?,
            attempt_limit: limit.parse().map_err(bad)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub best_attempts: u32,
    pub achieved_at: DateTime<Local>,
}

/// On-disk shape of the score file, keyed by `Signature`'s display form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBook {
    #[serde(default)]
    pub records: BTreeMap<String, ScoreEntry>,
}

pub trait ScoreStore {
    fn load(&self) -> Result<ScoreBook, ScoreError>;
    fn save(&self, book: &ScoreBook) -> Result<(), ScoreError>;
}

#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = AppDirs::score_path().unwrap_or_else(|| PathBuf::from("guessnum_scores.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileScoreStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreStore for FileScoreStore {
    /// A missing file is an empty book, not an error
    fn load(&self) -> Result<ScoreBook, ScoreError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(ScoreBook::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, book: &ScoreBook) -> Result<(), ScoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(book)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

/// In-memory store for tests; counts saves so callers can check write behaviour
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    book: RefCell<ScoreBook>,
    saves: Cell<usize>,
}

impl MemoryScoreStore {
    pub fn new(book: ScoreBook) -> Self {
        Self {
            book: RefCell::new(book),
            saves: Cell::new(0),
        }
    }

    pub fn saves(&self) -> usize {
        self.saves.get()
    }

    pub fn snapshot(&self) -> ScoreBook {
        self.book.borrow().clone()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> Result<ScoreBook, ScoreError> {
        Ok(self.book.borrow().clone())
    }

    fn save(&self, book: &ScoreBook) -> Result<(), ScoreError> {
        *self.book.borrow_mut() = book.clone();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

/// Best attempts-to-win per signature.
///
/// The backing store is read once when the ledger is opened and written
/// whole each time a record improves. Unreadable data starts the ledger
/// empty; a failed write keeps the improvement in memory only.
#[derive(Debug)]
pub struct ScoreLedger<S: ScoreStore> {
    store: S,
    book: ScoreBook,
}

impl<S: ScoreStore> ScoreLedger<S> {
    pub fn open(store: S) -> Self {
        let book = match store.load() {
            Ok(book) => book,
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable score file");
                ScoreBook::default()
            }
        };
        tracing::debug!(records = book.records.len(), "score ledger opened");
        Self { store, book }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn load(&self, signature: &Signature) -> Option<u32> {
        self.book
            .records
            .get(&signature.to_string())
            .map(|entry| entry.best_attempts)
    }

    /// Store `attempts_used` when it beats the current best (or there is none).
    /// Returns whether the record improved.
    pub fn record_if_better(&mut self, signature: &Signature, attempts_used: u32) -> bool {
        if let Some(best) = self.load(signature) {
            if attempts_used >= best {
                return false;
            }
        }

        self.book.records.insert(
            signature.to_string(),
            ScoreEntry {
                best_attempts: attempts_used,
                achieved_at: Local::now(),
            },
        );

        match self.store.save(&self.book) {
            Ok(()) => tracing::debug!(%signature, attempts_used, "new best record saved"),
            Err(e) => tracing::warn!(error = %e, %signature, "could not save score file"),
        }
        true
    }

    /// Records in signature order. Keys that do not parse are skipped.
    pub fn records(&self) -> Vec<(Signature, &ScoreEntry)> {
        self.book
            .records
            .iter()
            .filter_map(|(key, entry)| key.parse::<Signature>().ok().map(|sig| (sig, entry)))
            .sorted_by_key(|(sig, _)| *sig)
            .collect()
    }
}
