use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_PLAYER_NAME, DEFAULT_TICK_INTERVAL_MS};
use crate::error::StoreError;

const APP_DIR_NAME: &str = "grid-snake";
const HIGH_SCORE_FILE_NAME: &str = "high_score.json";
const PREFERENCES_FILE_NAME: &str = "preferences.json";

/// Best score seen so far and who set it.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub name: String,
    pub score: u32,
}

impl Default for HighScoreRecord {
    fn default() -> Self {
        Self {
            name: DEFAULT_PLAYER_NAME.to_owned(),
            score: 0,
        }
    }
}

/// User preferences that outlive any single session.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    pub tick_interval_ms: u64,
    pub player_name: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            player_name: DEFAULT_PLAYER_NAME.to_owned(),
        }
    }
}

/// Persistent storage for the high score record and preferences.
///
/// Loads return `Ok(None)` when nothing has been stored yet.
pub trait ProfileStore {
    fn load_high_score(&self) -> Result<Option<HighScoreRecord>, StoreError>;
    fn save_high_score(&mut self, record: &HighScoreRecord) -> Result<(), StoreError>;
    fn load_preferences(&self) -> Result<Option<Preferences>, StoreError>;
    fn save_preferences(&mut self, preferences: &Preferences) -> Result<(), StoreError>;
}

/// JSON files in one directory, one file per record.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Stores files under `dir`, which is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Uses the platform-correct local data directory.
    pub fn in_data_dir() -> Result<Self, StoreError> {
        let mut base = dirs::data_local_dir().ok_or(StoreError::NoDataDir)?;
        base.push(APP_DIR_NAME);
        Ok(Self::new(base))
    }

    /// Returns the directory holding the store's files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn high_score_path(&self) -> PathBuf {
        self.dir.join(HIGH_SCORE_FILE_NAME)
    }

    fn preferences_path(&self) -> PathBuf {
        self.dir.join(PREFERENCES_FILE_NAME)
    }
}

impl ProfileStore for JsonFileStore {
    fn load_high_score(&self) -> Result<Option<HighScoreRecord>, StoreError> {
        load_json(&self.high_score_path())
    }

    fn save_high_score(&mut self, record: &HighScoreRecord) -> Result<(), StoreError> {
        save_json(&self.high_score_path(), record)
    }

    fn load_preferences(&self) -> Result<Option<Preferences>, StoreError> {
        load_json(&self.preferences_path())
    }

    fn save_preferences(&mut self, preferences: &Preferences) -> Result<(), StoreError> {
        save_json(&self.preferences_path(), preferences)
    }
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StoreError::Malformed {
            path: path.to_path_buf(),
            source,
        })
}

fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let io_error = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_error)?;
    }

    let json = serde_json::to_string_pretty(value).map_err(|source| StoreError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;

    fs::write(path, json).map_err(io_error)
}

/// In-process store; can be told to fail to exercise fallback paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub high_score: Option<HighScoreRecord>,
    pub preferences: Option<Preferences>,
    pub fail_reads: bool,
    pub fail_writes: bool,
    pub high_score_writes: usize,
    pub preference_writes: usize,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every read and write fails.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            fail_reads: true,
            fail_writes: true,
            ..Self::default()
        }
    }
}

impl ProfileStore for MemoryStore {
    fn load_high_score(&self) -> Result<Option<HighScoreRecord>, StoreError> {
        if self.fail_reads {
            return Err(StoreError::Unavailable);
        }
        Ok(self.high_score.clone())
    }

    fn save_high_score(&mut self, record: &HighScoreRecord) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Unavailable);
        }
        self.high_score = Some(record.clone());
        self.high_score_writes += 1;
        Ok(())
    }

    fn load_preferences(&self) -> Result<Option<Preferences>, StoreError> {
        if self.fail_reads {
            return Err(StoreError::Unavailable);
        }
        Ok(self.preferences.clone())
    }

    fn save_preferences(&mut self, preferences: &Preferences) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Unavailable);
        }
        self.preferences = Some(preferences.clone());
        self.preference_writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{HighScoreRecord, JsonFileStore, Preferences, ProfileStore};
    use crate::error::StoreError;

    #[test]
    fn high_score_survives_a_reload() {
        let dir = unique_test_dir("high_score");
        let mut store = JsonFileStore::new(&dir);
        let record = HighScoreRecord {
            name: "Ada".to_owned(),
            score: 420,
        };

        store.save_high_score(&record).expect("save should succeed");
        let loaded = JsonFileStore::new(&dir)
            .load_high_score()
            .expect("load should succeed");

        assert_eq!(loaded, Some(record));
        cleanup_test_dir(&dir);
    }

    #[test]
    fn preferences_are_stored_separately() {
        let dir = unique_test_dir("preferences");
        let mut store = JsonFileStore::new(&dir);
        let preferences = Preferences {
            tick_interval_ms: 150,
            player_name: "Grace".to_owned(),
        };

        store
            .save_preferences(&preferences)
            .expect("save should succeed");

        assert_eq!(
            store.load_preferences().expect("load should succeed"),
            Some(preferences)
        );
        assert_eq!(store.load_high_score().expect("load should succeed"), None);
        cleanup_test_dir(&dir);
    }

    #[test]
    fn missing_files_read_as_nothing_stored() {
        let store = JsonFileStore::new(unique_test_dir("missing"));

        assert_eq!(store.load_high_score().expect("missing is not an error"), None);
        assert_eq!(store.load_preferences().expect("missing is not an error"), None);
    }

    #[test]
    fn malformed_file_returns_error() {
        let dir = unique_test_dir("malformed");
        fs::create_dir_all(&dir).expect("test directory should be creatable");
        fs::write(dir.join("high_score.json"), "not-json").expect("test file write should succeed");

        let result = JsonFileStore::new(&dir).load_high_score();
        assert!(matches!(result, Err(StoreError::Malformed { .. })));

        cleanup_test_dir(&dir);
    }

    #[test]
    fn defaults_match_a_first_run() {
        assert_eq!(
            HighScoreRecord::default(),
            HighScoreRecord {
                name: "Player".to_owned(),
                score: 0,
            }
        );
        assert_eq!(Preferences::default().tick_interval_ms, 100);
    }

    fn unique_test_dir(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("grid-snake-store-tests")
            .join(format!("{label}-{nanos}"))
    }

    fn cleanup_test_dir(dir: &PathBuf) {
        let _ = fs::remove_dir_all(dir);
    }
}
