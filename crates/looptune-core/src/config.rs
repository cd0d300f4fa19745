use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::error::ConfigError;
use super::platform::{self, ToolLookup};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tools: ToolsConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub playback: PlaybackConfig,
}

/// Locations of the external programs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolsConfig {
    #[serde(default)]
    pub yt_dlp: Option<PathBuf>,
    #[serde(default)]
    pub mpv: Option<PathBuf>,
    /// Only search PATH, never beside the executable.
    #[serde(default)]
    pub use_system_deps: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionConfig {
    /// Cookie jar handed to yt-dlp as-is. Never read by looptune.
    #[serde(default = "default_cookies_file")]
    pub cookies_file: Option<PathBuf>,
    #[serde(default = "default_audio_format")]
    pub audio_format: String,
    /// Prefix that a bare playlist id is appended to.
    #[serde(default = "default_playlist_base_url")]
    pub playlist_base_url: String,
    /// Prefix that a bare video id is appended to.
    #[serde(default = "default_watch_base_url")]
    pub watch_base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Phrase appended to free-text searches. Empty disables it.
    #[serde(default = "default_qualifier")]
    pub qualifier: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaybackConfig {
    /// Extra arguments passed to every mpv invocation, before the URLs.
    #[serde(default)]
    pub extra_args: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            cookies_file: default_cookies_file(),
            audio_format: default_audio_format(),
            playlist_base_url: default_playlist_base_url(),
            watch_base_url: default_watch_base_url(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            qualifier: default_qualifier(),
        }
    }
}

fn default_cookies_file() -> Option<PathBuf> {
    Some(PathBuf::from("cookies.txt"))
}

fn default_audio_format() -> String {
    "bestaudio".to_string()
}

fn default_playlist_base_url() -> String {
    "https://www.youtube.com/playlist?list=".to_string()
}

fn default_watch_base_url() -> String {
    "https://www.youtube.com/watch?v=".to_string()
}

fn default_qualifier() -> String {
    "lyrical video".to_string()
}

impl ToolsConfig {
    pub fn yt_dlp_lookup(&self) -> ToolLookup {
        ToolLookup {
            configured: self.yt_dlp.clone(),
            use_system_deps: self.use_system_deps,
        }
    }

    pub fn mpv_lookup(&self) -> ToolLookup {
        ToolLookup {
            configured: self.mpv.clone(),
            use_system_deps: self.use_system_deps,
        }
    }
}

impl Config {
    /// Load the user config if one exists. A missing file is not an error and
    /// nothing is written back.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}
