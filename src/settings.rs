use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::data::filter::{UnparsablePolicy, DEFAULT_SAMPLING_INTERVAL};
use crate::error::{ProcessError, Result};

const DATA_DIR_NAME: &str = "data";

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Where to read from, where to write to, and how to sample.
///
/// Every field has a default, so a config file only needs the keys it
/// changes:
///
/// ```json
/// { "data_root": "../data", "on_unparsable": "fail" }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Directory holding `experiments/`.
    pub data_root: PathBuf,
    /// Directory the flattened `<key>_<id>.csv` files go to.
    pub output_dir: PathBuf,
    pub sampling_interval: i64,
    pub on_unparsable: UnparsablePolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_root: find_data_dir(Path::new(".")),
            output_dir: PathBuf::from(".").join(DATA_DIR_NAME),
            sampling_interval: DEFAULT_SAMPLING_INTERVAL,
            on_unparsable: UnparsablePolicy::Drop,
        }
    }
}

impl Settings {
    /// Read settings from a JSON file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| ProcessError::io(path, e))?;
        let settings: Settings =
            serde_json::from_str(&text).map_err(|source| ProcessError::Config {
                path: path.to_path_buf(),
                source,
            })?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sampling_interval <= 0 {
            return Err(ProcessError::InvalidSetting(format!(
                "sampling_interval must be positive, got {}",
                self.sampling_interval
            )));
        }
        Ok(())
    }
}

/// Look for `data/` in `start`, then in its parent. Falls back to
/// `start/data` when neither exists so the eventual read error names a
/// sensible path.
pub fn find_data_dir(start: &Path) -> PathBuf {
    let here = start.join(DATA_DIR_NAME);
    if here.is_dir() {
        return here;
    }
    let parent = start.join("..").join(DATA_DIR_NAME);
    if parent.is_dir() {
        return parent;
    }
    here
}
