use crate::options::{Difficulty, Intervals, Options};
use crate::scores::{JsonFileStore, LoadError, MemoryStore, ScoreBook};
use serde::Deserialize;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    /// Initial gameplay choices
    #[serde(default)]
    pub(crate) game: GameConfig,

    /// Starting tick period for each difficulty
    #[serde(default)]
    pub(crate) intervals: Intervals,

    /// Settings about data files
    #[serde(default)]
    pub(crate) files: FileConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("wrapsnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    /// The menu options to show when the program starts
    pub(crate) fn options(&self) -> Options {
        Options {
            difficulty: self.game.difficulty,
            sound: self.game.sound,
        }
    }

    /// Return the filepath at which scores should be stored: the file given in
    /// the configuration or, if that is not set, the default scores file path.
    /// Return `None` if no path is present in the configuration and the
    /// default path could not be computed.
    fn scores_file(&self) -> Option<Cow<'_, Path>> {
        self.files
            .scores_file
            .as_deref()
            .map(Cow::from)
            .or_else(|| JsonFileStore::default_path().map(Cow::from))
    }

    /// Open the score store.  If `self.files.save_scores` is `false`, scores
    /// are kept in memory only and nothing is read from disk.
    pub(crate) fn open_scores(&self) -> Result<ScoreBook, LoadError> {
        if !self.files.save_scores {
            tracing::info!("Score saving disabled; keeping scores in memory");
            return Ok(ScoreBook::new(Box::new(MemoryStore::default())));
        }
        let path = self.scores_file().ok_or_else(LoadError::no_path)?;
        let store = JsonFileStore::open(path.into_owned())?;
        tracing::info!(path = %store.path().display(), "Loaded scores");
        Ok(ScoreBook::new(Box::new(store)))
    }
}

#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(default)]
pub(crate) struct GameConfig {
    /// Difficulty preselected on the main menu
    pub(crate) difficulty: Difficulty,

    /// Whether sound cues start out enabled
    pub(crate) sound: bool,

    /// Whether sound cues ring the terminal bell.  When `false`, cues are
    /// silently dropped regardless of `sound`.
    pub(crate) bell: bool,
}

impl Default for GameConfig {
    fn default() -> GameConfig {
        GameConfig {
            difficulty: Difficulty::default(),
            sound: true,
            bell: true,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct FileConfig {
    /// Path at which scores should be stored
    scores_file: Option<PathBuf>,

    /// Whether to load & save scores in a file
    save_scores: bool,
}

impl Default for FileConfig {
    fn default() -> FileConfig {
        FileConfig {
            scores_file: None,
            save_scores: true,
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}
