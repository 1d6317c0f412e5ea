use crate::util::{LoadError, SaveError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Store key for the best score ever reached
pub(crate) const HIGH_SCORE_KEY: &str = "HighScore";

/// Store key for the longest time survived in one game, in seconds
pub(crate) const LONGEST_SURVIVAL_KEY: &str = "LongestSurvivalTime";

/// A persistent key-value store of scalar values
pub(crate) trait KeyValueStore {
    fn get_int(&self, key: &str, default: i64) -> i64;
    fn set_int(&mut self, key: &str, value: i64);
    fn get_float(&self, key: &str, default: f64) -> f64;
    fn set_float(&mut self, key: &str, value: f64);

    /// Flush all values set so far to the backing storage
    fn save(&mut self) -> Result<(), SaveError>;
}

/// A [`KeyValueStore`] kept in memory and, if it has a path, written to disk
/// as JSON on every save
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct JsonStore {
    path: Option<PathBuf>,
    data: StoreData,
}

impl JsonStore {
    /// Create a store that is never written to disk
    pub(crate) fn in_memory() -> JsonStore {
        JsonStore::default()
    }

    /// Read the store from `path`.  A missing file yields an empty store that
    /// will be created on the first save.
    pub(crate) fn load(path: &Path) -> Result<JsonStore, LoadError> {
        let data = match fs_err::read(path) {
            Ok(src) => serde_json::from_slice(&src).map_err(|e| LoadError::deserialize("records", e))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => StoreData::default(),
            Err(e) => return Err(LoadError::read("records", e)),
        };
        Ok(JsonStore {
            path: Some(path.to_owned()),
            data,
        })
    }

    pub(crate) fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl KeyValueStore for JsonStore {
    fn get_int(&self, key: &str, default: i64) -> i64 {
        self.data.ints.get(key).copied().unwrap_or(default)
    }

    fn set_int(&mut self, key: &str, value: i64) {
        self.data.ints.insert(key.to_owned(), value);
    }

    fn get_float(&self, key: &str, default: f64) -> f64 {
        self.data.floats.get(key).copied().unwrap_or(default)
    }

    fn set_float(&mut self, key: &str, value: f64) {
        self.data.floats.insert(key.to_owned(), value);
    }

    fn save(&mut self) -> Result<(), SaveError> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(|e| SaveError::mkdir("records", e))?;
        }
        let mut src =
            serde_json::to_string_pretty(&self.data).map_err(|e| SaveError::serialize("records", e))?;
        src.push('\n');
        fs_err::write(path, &src).map_err(|e| SaveError::write("records", e))?;
        Ok(())
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
struct StoreData {
    #[serde(default)]
    ints: BTreeMap<String, i64>,
    #[serde(default)]
    floats: BTreeMap<String, f64>,
}
