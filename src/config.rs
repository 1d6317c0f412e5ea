use crate::consts;
use crate::settings::Difficulty;
use crate::store::JsonStore;
use crate::util::{records_file_path, LoadError};
use serde::Deserialize;
use std::num::NonZeroU16;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    /// Gameplay parameters
    #[serde(default)]
    pub(crate) game: GameConfig,

    /// Settings about data & log files
    #[serde(default)]
    pub(crate) files: FileConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("gridsnake").join("config.toml"))
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

    /// Open the records store.  If `files.save-records` is false, the store
    /// lives only in memory.
    pub(crate) fn open_store(&self) -> Result<JsonStore, LoadError> {
        if !self.files.save_records {
            return Ok(JsonStore::in_memory());
        }
        match self.files.records_file.clone().or_else(records_file_path) {
            Some(p) => JsonStore::load(&p),
            None => Err(LoadError::no_path("records")),
        }
    }
}

#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct GameConfig {
    pub(crate) grid_width: NonZeroU16,
    pub(crate) grid_height: NonZeroU16,
    pub(crate) base_score_per_food: u32,
    pub(crate) difficulty: Difficulty,
}

impl Default for GameConfig {
    fn default() -> GameConfig {
        let size = NonZeroU16::new(consts::DEFAULT_GRID_SIZE).unwrap_or(NonZeroU16::MIN);
        GameConfig {
            grid_width: size,
            grid_height: size,
            base_score_per_food: consts::DEFAULT_BASE_SCORE_PER_FOOD,
            difficulty: Difficulty::default(),
        }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct FileConfig {
    /// Path at which high score & survival time records are stored
    pub(crate) records_file: Option<PathBuf>,

    /// Whether to load & save records in a file
    pub(crate) save_records: bool,

    /// File to write log messages to; no logging is done if unset
    pub(crate) log_file: Option<PathBuf>,

    pub(crate) log_level: log::LevelFilter,
}

impl Default for FileConfig {
    fn default() -> FileConfig {
        FileConfig {
            records_file: None,
            save_records: true,
            log_file: None,
            log_level: log::LevelFilter::Warn,
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

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    fn parse(src: &str) -> Config {
        toml::from_str(src).unwrap()
    }

    #[test]
    fn empty_config() {
        assert_eq!(parse(""), Config::default());
        let cfg = Config::default();
        assert_eq!(cfg.game.grid_width.get(), 20);
        assert_eq!(cfg.game.grid_height.get(), 20);
        assert_eq!(cfg.game.base_score_per_food, 10);
        assert_eq!(cfg.game.difficulty, Difficulty::Normal);
        assert!(cfg.files.save_records);
        assert_eq!(cfg.files.log_level, log::LevelFilter::Warn);
    }

    #[test]
    fn full_config() {
        let cfg = parse(concat!(
            "[game]\n",
            "grid-width = 30\n",
            "grid-height = 15\n",
            "base-score-per-food = 5\n",
            "difficulty = \"hard\"\n",
            "\n",
            "[files]\n",
            "records-file = \"/tmp/records.json\"\n",
            "save-records = false\n",
            "log-file = \"/tmp/gridsnake.log\"\n",
            "log-level = \"debug\"\n",
        ));
        assert_eq!(
            cfg,
            Config {
                game: GameConfig {
                    grid_width: NonZeroU16::new(30).unwrap(),
                    grid_height: NonZeroU16::new(15).unwrap(),
                    base_score_per_food: 5,
                    difficulty: Difficulty::Hard,
                },
                files: FileConfig {
                    records_file: Some(PathBuf::from("/tmp/records.json")),
                    save_records: false,
                    log_file: Some(PathBuf::from("/tmp/gridsnake.log")),
                    log_level: log::LevelFilter::Debug,
                },
            }
        );
    }

    #[test]
    fn partial_section() {
        let cfg = parse("[game]\ndifficulty = \"easy\"\n");
        assert_eq!(cfg.game.difficulty, Difficulty::Easy);
        assert_eq!(cfg.game.grid_width.get(), 20);
    }

    #[test]
    fn zero_grid_size_is_error() {
        assert!(toml::from_str::<Config>("[game]\ngrid-width = 0\n").is_err());
    }

    #[test]
    fn unknown_difficulty_is_error() {
        assert!(toml::from_str::<Config>("[game]\ndifficulty = \"nightmare\"\n").is_err());
    }

    #[test]
    fn load_missing() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        assert_eq!(Config::load(&path, true).unwrap(), Config::default());
        assert!(matches!(
            Config::load(&path, false),
            Err(ConfigError::Read(_))
        ));
    }

    #[test]
    fn load_file() {
        let mut tmpfile = NamedTempFile::new().unwrap();
        writeln!(tmpfile, "[game]\nbase-score-per-food = 25").unwrap();
        tmpfile.flush().unwrap();
        let cfg = Config::load(tmpfile.path(), false).unwrap();
        assert_eq!(cfg.game.base_score_per_food, 25);
    }

    #[test]
    fn load_malformed() {
        let mut tmpfile = NamedTempFile::new().unwrap();
        writeln!(tmpfile, "[game\n").unwrap();
        tmpfile.flush().unwrap();
        assert!(matches!(
            Config::load(tmpfile.path(), false),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn store_not_saved() {
        let mut cfg = Config::default();
        cfg.files.save_records = false;
        let store = cfg.open_store().unwrap();
        assert_eq!(store.path(), None);
    }

    #[test]
    fn store_at_configured_path() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("records.json");
        let mut cfg = Config::default();
        cfg.files.records_file = Some(path.clone());
        let store = cfg.open_store().unwrap();
        assert_eq!(store.path(), Some(path.as_path()));
    }
}
