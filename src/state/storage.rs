use log::debug;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

pub const STORAGE_ENV: &str = "COURTSIDE_STORAGE";

const REVEALED_PREFIX: &str = "revealed-";
const VOTE_PREFIX: &str = "vote-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageError(pub String);

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "storage error: {}", self.0)
    }
}

impl std::error::Error for StorageError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vote {
    Up,
    Down,
}

impl Vote {
    pub fn as_str(&self) -> &'static str {
        match self {
            Vote::Up => "up",
            Vote::Down => "down",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "up" => Some(Vote::Up),
            "down" => Some(Vote::Down),
            _ => None,
        }
    }
}

/// String key/value store persisted as one JSON object.
///
/// Every write goes straight to disk. A store without a path lives in memory
/// only, which is what the viewer falls back to when the file is unusable.
#[derive(Debug, Default)]
pub struct LocalStore {
    path: Option<PathBuf>,
    entries: BTreeMap<String, String>,
}

impl LocalStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str(&content)
                .map_err(|e| StorageError(format!("{}: invalid json: {e}", path.display())))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(StorageError(format!("{}: read failed: {e}", path.display()))),
        };
        debug!("opened {} with {} entries", path.display(), entries.len());
        Ok(Self { path: Some(path), entries })
    }

    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Result<(), StorageError> {
        self.entries.insert(key.into(), value.into());
        self.save()
    }

    pub fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if self.entries.remove(key).is_some() {
            return self.save();
        }
        Ok(())
    }

    pub fn is_revealed(&self, game_id: &str) -> bool {
        self.get(&format!("{REVEALED_PREFIX}{game_id}")) == Some("true")
    }

    pub fn set_revealed(&mut self, game_id: &str, revealed: bool) -> Result<(), StorageError> {
        let key = format!("{REVEALED_PREFIX}{game_id}");
        if revealed {
            self.set(key, "true")
        } else {
            self.remove(&key)
        }
    }

    pub fn vote(&self, game_id: &str) -> Option<Vote> {
        self.get(&format!("{VOTE_PREFIX}{game_id}")).and_then(Vote::parse)
    }

    pub fn record_vote(&mut self, game_id: &str, vote: Vote) -> Result<(), StorageError> {
        self.set(format!("{VOTE_PREFIX}{game_id}"), vote.as_str())
    }

    fn save(&self) -> Result<(), StorageError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| StorageError(format!("create dir failed: {e}")))?;
        }
        let payload = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| StorageError(format!("serialize failed: {e}")))?;
        std::fs::write(path, payload)
            .map_err(|e| StorageError(format!("{}: write failed: {e}", path.display())))
    }
}

/// `COURTSIDE_STORAGE`, else `$XDG_CONFIG_HOME/courtside/storage.json`, else
/// `~/.config/courtside/storage.json`.
pub fn storage_path() -> PathBuf {
    resolve_storage_path(
        std::env::var(STORAGE_ENV).ok(),
        std::env::var("XDG_CONFIG_HOME").ok(),
        std::env::var("HOME").ok(),
    )
}

fn resolve_storage_path(
    explicit: Option<String>,
    config_home: Option<String>,
    home: Option<String>,
) -> PathBuf {
    let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

    if let Some(path) = non_empty(explicit) {
        return PathBuf::from(path);
    }
    if let Some(config_dir) = non_empty(config_home) {
        return PathBuf::from(config_dir).join("courtside").join("storage.json");
    }
    if let Some(home) = non_empty(home) {
        return PathBuf::from(home)
            .join(".config")
            .join("courtside")
            .join("storage.json");
    }
    PathBuf::from("courtside-storage.json")
}
