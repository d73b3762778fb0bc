use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub post_dir: String,
    pub watch: WatchConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    pub debounce_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            post_dir: "posts".to_string(),
            watch: WatchConfig::default(),
        }
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self { debounce_ms: 250 }
    }
}

impl Config {
    /// Read a TOML config. A missing file yields the defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config> {
        let path = path.as_ref();
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("{} not found, using defaults", path.display());
                return Ok(Config::default());
            }
            Err(e) => return Err(Error::Io(e)),
        };

        Self::parse(text.as_str())
    }

    pub fn parse(text: &str) -> Result<Config> {
        toml::from_str(text).map_err(Error::Deserialize)
    }

    pub fn post_path<P: AsRef<Path>>(&self, cwd: P) -> PathBuf {
        cwd.as_ref().join(self.post_dir.as_str())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.watch.debounce_ms)
    }
}
