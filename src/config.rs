use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigSortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    /// Base URL of the REST service, e.g. https://xyz.supabase.co
    #[serde(default)]
    pub(crate) url: Option<String>,
    #[serde(default)]
    pub(crate) api_key: Option<String>,
    /// Local JSON store directory (takes precedence over `url`)
    #[serde(default)]
    pub(crate) data_dir: Option<PathBuf>,
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
    #[serde(default)]
    pub(crate) compact: bool,
    #[serde(default)]
    pub(crate) no_color: bool,
    #[serde(default)]
    pub(crate) order: Option<ConfigSortOrder>,
    #[serde(default)]
    pub(crate) color: Option<ConfigColorMode>,
    #[serde(default)]
    pub(crate) locale: Option<String>,
}

impl Config {
    /// Load the first config file that exists and parses
    pub(crate) fn load() -> Self {
        for path in Self::get_config_paths() {
            if let Some(config) = Self::load_from(&path) {
                return config;
            }
        }
        Self::default()
    }

    fn load_from(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read config");
                return None;
            }
        };
        match toml::from_str::<Config>(&content) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "loaded config");
                Some(config)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to parse config");
                None
            }
        }
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/bizdash/config.toml (Linux/cross-platform)
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("bizdash").join("config.toml"));
        }

        // 2. Platform config dir (e.g. ~/Library/Application Support on macOS)
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("bizdash").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        // 3. Home directory: ~/.bizdash.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".bizdash.toml"));
        }

        paths
    }
}
