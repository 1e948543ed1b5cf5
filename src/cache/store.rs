//! Cache store implementations.
//!
//! Three backings for the same [`CacheStore`] surface:
//! - [`MemoryStore`]: in-memory LRU, gone when the process exits
//! - [`FileStore`]: one JSON file per key under the user cache directory
//! - [`SqliteStore`]: a single sqlite database of response rows

use std::fs;
use std::io::{Read, Write};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use lru::LruCache;
use rusqlite::{params, Connection, OptionalExtension};

use super::{CacheEntry, CacheStore};
use crate::error::{Result, YahooError};

/// Directory name under the user cache dir for all on-disk stores.
const CACHE_DIR_NAME: &str = "yahoo-fantasy";

fn cache_base_dir() -> PathBuf {
    let base = dirs::cache_dir().unwrap_or_else(|| {
        let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.push(".cache");
        home
    });
    base.join(CACHE_DIR_NAME)
}

/// Try to read a file into a String
fn try_read_to_string(path: &Path) -> Option<String> {
    let mut f = fs::File::open(path).ok()?;
    let mut s = String::new();

    f.read_to_string(&mut s).ok()?;

    Some(s)
}

/// Write a string to file, creating parent directories as needed
fn write_string(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut f = fs::File::create(path)?;
    f.write_all(contents.as_bytes())
}

/// In-memory LRU cache store.
pub struct MemoryStore {
    entries: Mutex<LruCache<String, CacheEntry>>,
    capacity: usize,
}

impl MemoryStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(
                NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN),
            )),
            capacity: capacity.max(1),
        }
    }

    /// (used, capacity) for the underlying LRU.
    pub fn stats(&self) -> (usize, usize) {
        (self.entries.lock().unwrap().len(), self.capacity)
    }
}

impl CacheStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<CacheEntry>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn put(&self, key: &str, entry: CacheEntry) -> Result<()> {
        self.entries.lock().unwrap().put(key.to_string(), entry);
        Ok(())
    }
}

/// File-per-key cache store under `~/.cache/yahoo-fantasy`.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new() -> Self {
        Self {
            root: cache_base_dir(),
        }
    }

    /// Store entries under a specific directory instead of the user cache dir.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path: `{root}/{sanitized key}.json`
    fn entry_path(&self, key: &str) -> PathBuf {
        let sanitized: String = key
            .chars()
            .map(|c| match c {
                'a'..='z' | 'A'..='Z' | '0'..='9' | '.' | '_' | '-' => c,
                _ => '_',
            })
            .collect();
        self.root.join(format!("{}.json", sanitized))
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<CacheEntry>> {
        let path = self.entry_path(key);
        let Some(content) = try_read_to_string(&path) else {
            return Ok(None);
        };
        // An unreadable entry is treated as absent rather than fatal; the
        // fetcher will overwrite it on the next successful fetch.
        Ok(serde_json::from_str(&content).ok())
    }

    fn put(&self, key: &str, entry: CacheEntry) -> Result<()> {
        let path = self.entry_path(key);
        let content = serde_json::to_string_pretty(&entry)?;
        write_string(&path, &content)?;
        Ok(())
    }
}

/// Sqlite-backed cache store.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database at `~/.cache/yahoo-fantasy/responses.db`.
    pub fn new() -> Result<Self> {
        let db_path = Self::database_path()?;

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&db_path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// In-memory database, used by tests.
    pub fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    fn database_path() -> Result<PathBuf> {
        let base = dirs::cache_dir().ok_or_else(|| YahooError::Cache {
            message: "could not determine cache directory".to_string(),
        })?;
        Ok(base.join(CACHE_DIR_NAME).join("responses.db"))
    }

    fn initialize_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS responses (
                key TEXT PRIMARY KEY,
                body TEXT NOT NULL,
                fetched_at INTEGER NOT NULL
            )",
            [],
        )?;
        Ok(())
    }
}

impl CacheStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<CacheEntry>> {
        let row: Option<(String, i64)> = self
            .conn
            .query_row(
                "SELECT body, fetched_at FROM responses WHERE key = ?1",
                params![key],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        match row {
            Some((body, fetched_at)) => Ok(Some(CacheEntry {
                body: serde_json::from_str(&body)?,
                fetched_at: fetched_at as u64,
            })),
            None => Ok(None),
        }
    }

    fn put(&self, key: &str, entry: CacheEntry) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO responses (key, body, fetched_at)
             VALUES (?1, ?2, ?3)",
            params![
                key,
                serde_json::to_string(&entry.body)?,
                entry.fetched_at as i64
            ],
        )?;
        Ok(())
    }
}
