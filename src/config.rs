//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\godless-player\config.toml
//! - macOS: ~/Library/Application Support/godless-player/config.toml
//! - Linux: ~/.config/godless-player/config.toml
//!
//! The config file is human-readable and editable. Settings are
//! loaded at startup and saved when changed through the UI.

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Database location
    pub database: DatabaseConfig,

    /// Audio settings
    pub audio: AudioConfig,

    /// Library settings
    pub library: LibraryConfig,
}

/// Database location settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite file path (None = OS data directory)
    pub path: Option<PathBuf>,
}

/// Audio playback settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Last volume level (0.0 - 1.0)
    pub volume: f32,

    /// Pick the next track at random
    pub shuffle: bool,

    /// Replay the current track when it ends
    pub repeat: bool,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            volume: 0.5,
            shuffle: false,
            repeat: false,
        }
    }
}

/// Library import settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// File extension accepted by import (without the dot)
    pub import_extension: String,

    /// Artist assigned to newly imported tracks
    pub default_artist: String,

    /// Album assigned to newly imported tracks
    pub default_album: String,

    /// Genre assigned to newly imported tracks
    pub default_genre: String,

    /// Directory the file picker opens in
    pub last_import_dir: Option<PathBuf>,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            import_extension: "mp3".to_string(),
            default_artist: "Unknown".to_string(),
            default_album: "No Album".to_string(),
            default_genre: "Unclassified".to_string(),
            last_import_dir: None,
        }
    }
}

/// Clamp a stored volume into 0.0 - 1.0; non-finite values fall back to the default.
fn sanitize_volume(volume: f32) -> f32 {
    if volume.is_finite() {
        volume.clamp(0.0, 1.0)
    } else {
        AudioConfig::default().volume
    }
}

impl Config {
    /// Resolve the database file path: explicit override, then config,
    /// then the OS data directory, then the working directory.
    pub fn database_path(&self, override_path: Option<&std::path::Path>) -> PathBuf {
        if let Some(p) = override_path {
            return p.to_path_buf();
        }
        if let Some(ref p) = self.database.path {
            return p.clone();
        }
        data_dir()
            .map(|d| d.join(crate::db::DEFAULT_DB_NAME))
            .unwrap_or_else(|| PathBuf::from(crate::db::DEFAULT_DB_NAME))
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("godless-player"))
}

/// Get the data directory path (default database location)
pub fn data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("godless-player"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from disk
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };
    load_from(&path)
}

/// Load configuration from a specific file, falling back to defaults.
pub fn load_from(path: &std::path::Path) -> Config {
    if !path.exists() {
        tracing::info!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str::<Config>(&contents) {
            Ok(mut config) => {
                config.audio.volume = sanitize_volume(config.audio.volume);
                tracing::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

/// Save configuration to a specific file.
///
/// Creates the parent directory if it doesn't exist.
pub fn save_to(config: &Config, path: &std::path::Path) -> Result<(), ConfigError> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => std::path::Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDir(dir.to_path_buf(), e))?;

    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write atomically: each save gets its own temp file next to the target
    let mut temp = tempfile::NamedTempFile::new_in(dir)
        .map_err(|e| ConfigError::Write(dir.to_path_buf(), e))?;
    let temp_path = temp.path().to_path_buf();
    temp.write_all(contents.as_bytes())
        .map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    temp.persist(path)
        .map_err(|e| ConfigError::Rename(temp_path, path.to_path_buf(), e.error))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

/// Orders background saves so an older snapshot never replaces a newer one.
///
/// Take a ticket when the snapshot is made, then save with it from any
/// thread. Saves run one at a time; a ticket older than the last written
/// one is dropped.
#[derive(Debug)]
pub struct SaveQueue {
    issued: AtomicU64,
    written: Mutex<u64>,
}

impl SaveQueue {
    pub const fn new() -> Self {
        Self {
            issued: AtomicU64::new(0),
            written: Mutex::new(0),
        }
    }

    pub fn ticket(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Write `config` unless a newer ticket was already written.
    ///
    /// Returns false when the snapshot was superseded.
    pub fn save_to(
        &self,
        config: &Config,
        path: &std::path::Path,
        ticket: u64,
    ) -> Result<bool, ConfigError> {
        let mut written = self.written.lock().unwrap_or_else(PoisonError::into_inner);
        if *written > ticket {
            tracing::debug!(ticket, "Skipping superseded config save");
            return Ok(false);
        }
        save_to(config, path)?;
        *written = ticket;
        Ok(true)
    }
}

impl Default for SaveQueue {
    fn default() -> Self {
        Self::new()
    }
}

static SAVES: SaveQueue = SaveQueue::new();

/// Save configuration asynchronously (for use in Iced tasks)
///
/// The snapshot's place in line is fixed when this is called, not when
/// the returned future runs.
pub fn save_async(config: Config) -> impl Future<Output = Result<(), ConfigError>> {
    let ticket = SAVES.ticket();
    async move {
        tokio::task::spawn_blocking(move || {
            let path = config_path().ok_or(ConfigError::NoConfigDir)?;
            SAVES.save_to(&config, &path, ticket).map(|_| ())
        })
        .await
        .map_err(|e| ConfigError::TaskJoin(e.to_string()))?
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),

    #[error("Task join error: {0}")]
    TaskJoin(String),
}

// ============================================================================
// Tests
// ============================================================================
