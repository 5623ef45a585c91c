use std::path::PathBuf;

use directories::ProjectDirs;
use serde::Deserialize;

/// Application configuration loaded from TOML config file.
/// All fields have defaults; the config file is optional.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Output root used when `plan` has no `--output`.
    pub output_dir: Option<PathBuf>,
    /// AAC bitrate passed to the encoder.
    pub bitrate: String,
    /// Embed the cover into every encoded file.
    pub embed_cover_art: bool,
    /// Disc-level performer replacement (CLI flag wins).
    pub disc_performer_override: Option<String>,
    /// Sheet encodings to try, in order.
    pub cue_encodings: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            bitrate: "192k".to_string(),
            embed_cover_art: false,
            disc_performer_override: None,
            cue_encodings: crate::DEFAULT_SHEET_ENCODINGS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl AppConfig {
    /// Load config from `~/.config/cuesplit/config.toml`.
    /// Returns default config if file doesn't exist.
    /// Logs a warning if the file exists but can't be parsed.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) if path.exists() => match std::fs::read_to_string(&path) {
                Ok(contents) => match Self::from_toml(&contents) {
                    Ok(config) => {
                        log::info!("Loaded config from {}", path.display());
                        config
                    }
                    Err(e) => {
                        log::warn!("Failed to parse {}: {}. Using defaults.", path.display(), e);
                        Self::default()
                    }
                },
                Err(e) => {
                    log::warn!("Failed to read {}: {}. Using defaults.", path.display(), e);
                    Self::default()
                }
            },
            _ => {
                log::debug!("No config file found, using defaults");
                Self::default()
            }
        }
    }

    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Get the config file path.
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", crate::APP_NAME)
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
