//! JSON-file persistence layer
//!
//! This module stores the three record collections as independent,
//! pretty-printed JSON files under a data directory. Every save rewrites
//! the whole file from the in-memory collection (snapshot write, never an
//! append), so callers must pass the complete, already-mutated collection.
//!
//! The layer knows nothing about business rules. It has exactly two error
//! modes: `CorruptData` when a file exists but holds invalid JSON, and
//! `IoFailure` for every other read or write problem. A file that does not
//! exist is not an error; it reads as an empty collection, which is the
//! expected state on first run.
//!
//! There is no locking and no atomic rename. A crash in the middle of a
//! write can leave a file truncated; that file will then fail to load as
//! `CorruptData`. Accepted limitation at this scale.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, StoreError};
use crate::model::{Link, Stats, User};

/// Backing file for the link collection
pub const LINKS_FILE: &str = "links.json";

/// Backing file for the user collection
pub const USERS_FILE: &str = "users.json";

/// Backing file for the stats collection
pub const STATS_FILE: &str = "stats.json";

/// Handle on the data directory holding the three collection files
#[derive(Debug, Clone)]
pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    /// Opens the storage rooted at `dir`, creating the directory if needed
    ///
    /// Creation is idempotent; an already existing directory is fine.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StoreError::IoFailure {
            file: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    /// Path of a collection file inside the data directory
    pub fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    pub fn load_links(&self) -> Result<Vec<Link>> {
        self.load(LINKS_FILE)
    }

    pub fn save_links(&self, links: &[Link]) -> Result<()> {
        self.save(LINKS_FILE, links)
    }

    pub fn load_users(&self) -> Result<Vec<User>> {
        self.load(USERS_FILE)
    }

    pub fn save_users(&self, users: &[User]) -> Result<()> {
        self.save(USERS_FILE, users)
    }

    pub fn load_stats(&self) -> Result<Vec<Stats>> {
        self.load(STATS_FILE)
    }

    pub fn save_stats(&self, stats: &[Stats]) -> Result<()> {
        self.save(STATS_FILE, stats)
    }

    /// Reads a whole collection from its backing file
    ///
    /// A missing file is treated as an empty collection so that the first
    /// run of the service starts with no data instead of an error.
    fn load<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>> {
        let path = self.path(file);
        let content = match fs::read(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::IoFailure {
                    file: file.to_string(),
                    source,
                })
            }
        };

        serde_json::from_slice(&content).map_err(|source| StoreError::CorruptData {
            file: file.to_string(),
            source,
        })
    }

    /// Overwrites a collection file with the full snapshot of `records`
    fn save<T: Serialize>(&self, file: &str, records: &[T]) -> Result<()> {
        let content =
            serde_json::to_string_pretty(records).map_err(|source| StoreError::IoFailure {
                file: file.to_string(),
                source: source.into(),
            })?;

        fs::write(self.path(file), content).map_err(|source| StoreError::IoFailure {
            file: file.to_string(),
            source,
        })
    }
}
