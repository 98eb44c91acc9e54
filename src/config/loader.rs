//! Configuration structures and loading logic.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::download::DEFAULT_CONCURRENCY;
use crate::error::{Error, Result};

/// Application name used for the configuration directory.
const APP_NAME: &str = "profile-media-downloader";

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub targets: TargetConfig,

    #[serde(default)]
    pub options: OptionsConfig,

    #[serde(default)]
    pub network: NetworkConfig,
}

/// Profile targeting configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Profile names to download.
    #[serde(default)]
    pub profiles: Vec<String>,
}

/// Download options configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsConfig {
    /// Base directory for downloads.
    #[serde(default)]
    pub download_directory: Option<PathBuf>,

    /// Directory holding `<profile>.json` enumeration manifests.
    #[serde(default)]
    pub manifest_directory: Option<PathBuf>,

    /// Whether to download posts.
    #[serde(default = "default_true")]
    pub download_posts: bool,

    /// Whether to download story highlights.
    #[serde(default = "default_true")]
    pub download_highlights: bool,

    /// Suffix appended to profile folders.
    #[serde(default = "default_folder_suffix")]
    pub folder_suffix: String,

    /// Whether to print a line per downloaded item.
    #[serde(default = "default_true")]
    pub show_downloads: bool,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            download_directory: None,
            manifest_directory: None,
            download_posts: true,
            download_highlights: true,
            folder_suffix: default_folder_suffix(),
            show_downloads: true,
        }
    }
}

/// Network and pacing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Maximum number of simultaneous downloads.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Minimum delay between submitting two post downloads.
    #[serde(default = "default_interval_ms")]
    pub post_interval_ms: u64,

    /// Minimum delay between submitting two highlight downloads.
    #[serde(default = "default_interval_ms")]
    pub highlight_interval_ms: u64,

    /// Random extra delay added on top of the submission interval.
    #[serde(default)]
    pub interval_jitter_ms: u64,

    /// Per-request timeout. No timeout when unset.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// User agent sent with media requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            post_interval_ms: default_interval_ms(),
            highlight_interval_ms: default_interval_ms(),
            interval_jitter_ms: 0,
            request_timeout_secs: None,
            user_agent: default_user_agent(),
        }
    }
}

impl NetworkConfig {
    pub fn post_interval(&self) -> Duration {
        Duration::from_millis(self.post_interval_ms)
    }

    pub fn highlight_interval(&self) -> Duration {
        Duration::from_millis(self.highlight_interval_ms)
    }

    pub fn jitter(&self) -> Duration {
        Duration::from_millis(self.interval_jitter_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

fn default_true() -> bool {
    true
}

fn default_folder_suffix() -> String {
    "_media".to_string()
}

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

fn default_interval_ms() -> u64 {
    200
}

fn default_user_agent() -> String {
    format!("{}/{}", APP_NAME, env!("CARGO_PKG_VERSION"))
}

impl Config {
    /// Default configuration file location, e.g.
    /// `~/.config/profile-media-downloader/config.toml` on Linux.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!("Configuration file not found: {}", path.display()))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file when it exists, otherwise start from defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("No configuration at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Get the effective download directory.
    pub fn download_directory(&self) -> PathBuf {
        self.options
            .download_directory
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }

    /// Get the effective manifest directory (defaults to the download directory).
    pub fn manifest_directory(&self) -> PathBuf {
        self.options
            .manifest_directory
            .clone()
            .unwrap_or_else(|| self.download_directory())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_file() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.network.concurrency, 4);
        assert_eq!(config.network.post_interval(), Duration::from_millis(200));
        assert_eq!(config.network.jitter(), Duration::ZERO);
        assert!(config.network.request_timeout().is_none());
        assert!(config.options.download_posts);
        assert!(config.options.download_highlights);
        assert_eq!(config.options.folder_suffix, "_media");
        assert!(config.targets.profiles.is_empty());
    }

    #[test]
    fn test_load_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[targets]
profiles = ["first.profile", "second_one"]

[options]
download_directory = "/srv/media"
download_highlights = false

[network]
concurrency = 8
highlight_interval_ms = 1500
request_timeout_secs = 30
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.targets.profiles, vec!["first.profile", "second_one"]);
        assert_eq!(config.download_directory(), PathBuf::from("/srv/media"));
        assert_eq!(config.manifest_directory(), PathBuf::from("/srv/media"));
        assert!(!config.options.download_highlights);
        assert_eq!(config.network.concurrency, 8);
        assert_eq!(config.network.post_interval_ms, 200);
        assert_eq!(config.network.highlight_interval(), Duration::from_millis(1500));
        assert_eq!(config.network.request_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(matches!(Config::load(&path), Err(Error::Config(_))));
        assert!(Config::load_or_default(&path).is_ok());
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[network]\nconcurrency = \"many\"\n").unwrap();
        assert!(matches!(Config::load(&path), Err(Error::TomlParse(_))));
    }
}
