use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{
    CONFIG_DIR_NAME, DEFAULT_API_URL, DEFAULT_ITEMS_PER_PAGE, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_SLIDER_INTERVAL_MS,
};

const CONFIG_FILE_NAME: &str = "config.yaml";

/// Runtime settings; every field is optional in the YAML file
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    pub items_per_page: usize,
    pub slider_interval_ms: u64,
    pub auto_play: bool,
    pub request_timeout_secs: u64,
    /// Ignore settlements of fetches superseded by a newer one
    pub fence_fetches: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: String::from(DEFAULT_API_URL),
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            slider_interval_ms: DEFAULT_SLIDER_INTERVAL_MS,
            auto_play: true,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            fence_fetches: false,
        }
    }
}

impl Config {
    /// Load from the user config dir and environment, falling back to defaults
    pub fn load() -> Self {
        let mut config = match default_path() {
            Some(path) if path.exists() => Self::from_file(&path).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring invalid config file");
                Config::default()
            }),
            _ => Config::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        config.sanitize();
        config
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let mut config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        config.sanitize();
        Ok(config)
    }

    /// Apply `COUNTRIES_*` overrides from the given lookup
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("COUNTRIES_API_URL") {
            if !url.trim().is_empty() {
                self.api_url = url;
            }
        }
        if let Some(raw) = lookup("COUNTRIES_ITEMS_PER_PAGE") {
            match raw.trim().parse::<usize>() {
                Ok(n) => self.items_per_page = n,
                Err(_) => tracing::warn!(value = %raw, "Ignoring invalid COUNTRIES_ITEMS_PER_PAGE"),
            }
        }
    }

    fn sanitize(&mut self) {
        if self.items_per_page == 0 {
            tracing::warn!("items_per_page must be positive, using default");
            self.items_per_page = DEFAULT_ITEMS_PER_PAGE;
        }
        if self.slider_interval_ms == 0 {
            self.slider_interval_ms = DEFAULT_SLIDER_INTERVAL_MS;
        }
    }

    pub fn slider_interval(&self) -> Duration {
        Duration::from_millis(self.slider_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// `~/.countries-explorer/config.yaml`
pub fn default_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "items_per_page: 24\nfence_fetches: true\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.items_per_page, 24);
        assert!(config.fence_fetches);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.slider_interval(), Duration::from_millis(5000));
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "items_per_page: 0\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.items_per_page, DEFAULT_ITEMS_PER_PAGE);
    }

    #[test]
    fn test_invalid_file_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "items_per_page: [not a number]\n").unwrap();
        assert!(Config::from_file(&path).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("COUNTRIES_API_URL", "http://localhost:9000/all"),
            ("COUNTRIES_ITEMS_PER_PAGE", "36"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_env(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.api_url, "http://localhost:9000/all");
        assert_eq!(config.items_per_page, 36);

        config.apply_env(|key| (key == "COUNTRIES_ITEMS_PER_PAGE").then(|| "many".to_string()));
        assert_eq!(config.items_per_page, 36);
    }
}
