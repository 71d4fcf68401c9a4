use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::constants::{DATA_DIR_ENV, DEFAULT_CONFIG_PATH, DEFAULT_DATA_DIR, SITE_URL_ENV};
use crate::error::{ContentError, Result};
use crate::site::SiteConfig;
use crate::storage::Layout;

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub content: ContentConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ContentConfig {
    pub data_dir: PathBuf,
    pub layout: Layout,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            layout: Layout::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Reads `path` (defaults when it does not exist), then applies `.env` and
    /// environment overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        dotenv::dotenv().ok();

        let mut config = match fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content)?,
            Err(e) if e.kind() == ErrorKind::NotFound => Config::default(),
            Err(e) => {
                return Err(ContentError::Config(format!(
                    "Failed to read config file '{}': {}",
                    path.display(),
                    e
                )))
            }
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Applies `SITE_URL` / `CONTENT_DATA_DIR` style overrides from `lookup`
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(SITE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.site.url = url;
        }
        if let Some(dir) = lookup(DATA_DIR_ENV).filter(|v| !v.trim().is_empty()) {
            self.content.data_dir = PathBuf::from(dir);
        }
    }
}
