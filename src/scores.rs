//! Persistence of the best & worst final scores
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Key under which the highest score ever reached is stored
pub(crate) const HIGH_SCORE_KEY: &str = "highScore";

/// Key under which the lowest final score of a finished game is stored
pub(crate) const LOW_SCORE_KEY: &str = "leastScore";

/// A persistent string-to-string store
pub(crate) trait KeyValueStore: fmt::Debug {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: String) -> Result<(), SaveError>;
}

/// A store that lives only as long as the process
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct MemoryStore(BTreeMap<String, String>);

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), SaveError> {
        self.0.insert(key.to_owned(), value);
        Ok(())
    }
}

/// A store kept on disk as a JSON object of strings.  The whole file is
/// rewritten on every change.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Return the default path at which scores are stored, if the local data
    /// directory can be determined
    pub(crate) fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|p| p.join("wrapsnake").join("scores.json"))
    }

    /// Load the store at `path`.  A missing file is treated as an empty store.
    pub(crate) fn open(path: PathBuf) -> Result<JsonFileStore, LoadError> {
        let entries = match fs_err::read(&path) {
            Ok(src) => serde_json::from_slice(&src).map_err(LoadError::deserialize)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(LoadError::read(e)),
        };
        Ok(JsonFileStore { path, entries })
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<(), SaveError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(SaveError::mkdir)?;
        }
        let mut src = serde_json::to_string(&self.entries).map_err(SaveError::serialize)?;
        src.push('\n');
        fs_err::write(&self.path, &src).map_err(SaveError::write)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), SaveError> {
        self.entries.insert(key.to_owned(), value);
        self.save()
    }
}

/// Typed access to the high & low scores held in a [`KeyValueStore`]
#[derive(Debug)]
pub(crate) struct ScoreBook {
    store: Box<dyn KeyValueStore>,
}

impl ScoreBook {
    pub(crate) fn new(store: Box<dyn KeyValueStore>) -> ScoreBook {
        ScoreBook { store }
    }

    /// The highest score ever reached, or 0 if none has been recorded
    pub(crate) fn high(&self) -> u32 {
        self.read(HIGH_SCORE_KEY).unwrap_or(0)
    }

    /// The lowest final score of any finished game, if one has been recorded
    pub(crate) fn low(&self) -> Option<u32> {
        self.read(LOW_SCORE_KEY)
    }

    /// Store `score` as the new high score if it beats the current one.
    /// Returns `true` if anything was written.
    pub(crate) fn record_high(&mut self, score: u32) -> Result<bool, SaveError> {
        if score > self.high() {
            self.store.set(HIGH_SCORE_KEY, score.to_string())?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Store `score` as the new low score if there is no low score yet or if
    /// it is below the current one.  Returns `true` if anything was written.
    pub(crate) fn record_final(&mut self, score: u32) -> Result<bool, SaveError> {
        if self.low().is_none_or(|low| score < low) {
            self.store.set(LOW_SCORE_KEY, score.to_string())?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn read(&self, key: &str) -> Option<u32> {
        let value = self.store.get(key)?;
        match value.trim().parse() {
            Ok(n) => Some(n),
            Err(e) => {
                tracing::warn!(key, value = %value, error = %e, "Ignoring unparseable stored score");
                None
            }
        }
    }
}

#[derive(Debug, Error)]
#[error("Failed to save scores to disk")]
pub(crate) struct SaveError(#[source] SaveErrorSource);

impl SaveError {
    fn mkdir(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Mkdir(e))
    }

    fn serialize(e: serde_json::Error) -> Self {
        SaveError(SaveErrorSource::Serialize(e))
    }

    fn write(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Write(e))
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to serialize scores")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write scores file")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, Error)]
#[error("Failed to read scores from disk")]
pub(crate) struct LoadError(#[source] LoadErrorSource);

impl LoadError {
    pub(crate) fn no_path() -> Self {
        LoadError(LoadErrorSource::NoPath)
    }

    fn read(e: std::io::Error) -> Self {
        LoadError(LoadErrorSource::Read(e))
    }

    fn deserialize(e: serde_json::Error) -> Self {
        LoadError(LoadErrorSource::Deserialize(e))
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("failed to determine path to local data directory")]
    NoPath,
    #[error("failed to read scores file")]
    Read(#[source] std::io::Error),
    #[error("failed to deserialize scores")]
    Deserialize(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn memory_book() -> ScoreBook {
        ScoreBook::new(Box::new(MemoryStore::default()))
    }

    #[test]
    fn empty_defaults() {
        let book = memory_book();
        assert_eq!(book.high(), 0);
        assert_eq!(book.low(), None);
    }

    #[test]
    fn high_only_rises() {
        let mut book = memory_book();
        assert!(book.record_high(3).unwrap());
        assert!(book.record_high(7).unwrap());
        assert!(!book.record_high(7).unwrap());
        assert!(!book.record_high(2).unwrap());
        assert_eq!(book.high(), 7);
    }

    #[test]
    fn zero_is_not_a_new_high() {
        let mut book = memory_book();
        assert!(!book.record_high(0).unwrap());
        assert_eq!(book.high(), 0);
    }

    #[test]
    fn low_tracks_minimum() {
        let mut book = memory_book();
        assert!(book.record_final(6).unwrap());
        assert_eq!(book.low(), Some(6));
        assert!(!book.record_final(9).unwrap());
        assert_eq!(book.low(), Some(6));
        assert!(book.record_final(2).unwrap());
        assert!(!book.record_final(2).unwrap());
        assert_eq!(book.low(), Some(2));
        assert!(book.record_final(0).unwrap());
        assert_eq!(book.low(), Some(0));
    }

    #[test]
    fn garbage_values_read_as_missing() {
        let mut store = MemoryStore::default();
        store.set(HIGH_SCORE_KEY, String::from("lots")).unwrap();
        store.set(LOW_SCORE_KEY, String::from("-3")).unwrap();
        let mut book = ScoreBook::new(Box::new(store));
        assert_eq!(book.high(), 0);
        assert_eq!(book.low(), None);
        assert!(book.record_final(4).unwrap());
        assert_eq!(book.low(), Some(4));
    }

    #[test]
    fn json_store_missing_file_is_empty() {
        let tmp = tempdir().unwrap();
        let store = JsonFileStore::open(tmp.path().join("scores.json")).unwrap();
        assert_eq!(store.get(HIGH_SCORE_KEY), None);
    }

    #[test]
    fn json_store_persists() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("nested").join("scores.json");
        let mut book = ScoreBook::new(Box::new(JsonFileStore::open(path.clone()).unwrap()));
        book.record_high(12).unwrap();
        book.record_final(4).unwrap();
        let src = fs_err::read_to_string(&path).unwrap();
        assert_eq!(src, "{\"highScore\":\"12\",\"leastScore\":\"4\"}\n");

        let reopened = JsonFileStore::open(path).unwrap();
        assert_eq!(reopened.get(HIGH_SCORE_KEY).as_deref(), Some("12"));
        let book = ScoreBook::new(Box::new(reopened));
        assert_eq!(book.high(), 12);
        assert_eq!(book.low(), Some(4));
    }

    #[test]
    fn json_store_rejects_malformed_file() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("scores.json");
        fs_err::write(&path, "[1, 2, 3]").unwrap();
        let e = JsonFileStore::open(path).unwrap_err();
        assert!(matches!(e.0, LoadErrorSource::Deserialize(_)));
    }
}
