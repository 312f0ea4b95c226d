use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{DocreelError, Result};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
pub const API_URL_ENV_VAR: &str = "DOCREEL_API_URL";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub api_base_url: String,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    api_base_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
        }
    }
}

pub fn get_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("docreel")
}

pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.toml")
}

impl Config {
    /// Resolve configuration: explicit override, then `DOCREEL_API_URL`, then
    /// the user config file, then the local default.
    pub fn load(api_url_override: Option<&str>) -> Result<Self> {
        let env_url = std::env::var(API_URL_ENV_VAR).ok();
        Self::resolve(api_url_override, env_url.as_deref(), &get_config_path())
    }

    pub fn resolve(
        api_url_override: Option<&str>,
        env_url: Option<&str>,
        config_path: &Path,
    ) -> Result<Self> {
        let non_blank = |s: &&str| !s.trim().is_empty();

        if let Some(url) = api_url_override.filter(non_blank) {
            return Ok(Self::with_api_url(url));
        }
        if let Some(url) = env_url.filter(non_blank) {
            return Ok(Self::with_api_url(url));
        }

        let file = read_config_file(config_path)?;
        Ok(file
            .api_base_url
            .as_deref()
            .filter(non_blank)
            .map(Self::with_api_url)
            .unwrap_or_default())
    }

    fn with_api_url(url: &str) -> Self {
        Self {
            api_base_url: url.trim().trim_end_matches('/').to_string(),
        }
    }
}

fn read_config_file(path: &Path) -> Result<ConfigFile> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(ConfigFile::default()),
        Err(e) => return Err(e.into()),
    };

    toml::from_str(&content).map_err(|e| DocreelError::Config {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
