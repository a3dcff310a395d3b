//! YAML configuration with environment overrides and validation.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

use crate::schedule::DEFAULT_MAX_ENTRIES;

/// Environment variable listing media roots, split on `:`, `;` or `,`.
pub const SOURCE_DIRECTORIES_ENV: &str = "VIDEO_SOURCE_DIRECTORIES";
/// Environment variable overriding the playlist file location.
pub const PLAYLIST_FILE_ENV: &str = "PLAYLIST_FILE";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Configuration {
    /// Media roots scanned for shows, in priority order.
    pub video_source_directories: Vec<PathBuf>,
    /// Where the master sequence is written before each playback cycle.
    pub playlist_file: PathBuf,
    /// Maximum number of entries in one master sequence.
    pub max_entries: usize,
    /// Delay before rediscovering when nothing playable was found.
    #[serde(with = "humantime_serde")]
    pub empty_retry_delay: Duration,
    /// External player invocation.
    pub player: PlayerOptions,
}

impl Configuration {
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        serde_yaml::from_str(&s)
            .with_context(|| format!("failed to parse config at {}", path.display()))
    }

    /// Apply `VIDEO_SOURCE_DIRECTORIES` and `PLAYLIST_FILE` from the process
    /// environment.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply environment-style overrides using `lookup` to resolve variables.
    /// Blank values leave the configured value untouched.
    #[must_use]
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(SOURCE_DIRECTORIES_ENV) {
            let dirs = split_source_directories(&raw);
            if !dirs.is_empty() {
                self.video_source_directories = dirs;
            }
        }
        if let Some(raw) = lookup(PLAYLIST_FILE_ENV) {
            let raw = raw.trim();
            if !raw.is_empty() {
                self.playlist_file = PathBuf::from(raw);
            }
        }
        self
    }

    /// Validate runtime invariants that cannot be expressed via serde defaults alone.
    pub fn validated(self) -> Result<Self> {
        ensure!(
            !self.video_source_directories.is_empty(),
            "video-source-directories must list at least one directory"
        );
        ensure!(
            !self.playlist_file.as_os_str().is_empty(),
            "playlist-file must not be empty"
        );
        ensure!(self.max_entries > 0, "max-entries must be greater than zero");
        ensure!(
            !self.empty_retry_delay.is_zero(),
            "empty-retry-delay must be positive"
        );
        self.player.validate()?;
        Ok(self)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            video_source_directories: vec![
                PathBuf::from("/mnt"),
                PathBuf::from("/srv/reception-tv/videos"),
            ],
            playlist_file: PathBuf::from("/tmp/playlist.txt"),
            max_entries: DEFAULT_MAX_ENTRIES,
            empty_retry_delay: Duration::from_secs(30),
            player: PlayerOptions::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct PlayerOptions {
    /// Player executable followed by its fixed arguments.
    pub command: Vec<String>,
    /// Prefix joined with the playlist path to form the last argument.
    pub playlist_flag: String,
}

impl PlayerOptions {
    /// The argument handing the playlist file to the player.
    #[must_use]
    pub fn playlist_arg(&self, playlist: &Path) -> OsString {
        let mut arg = OsString::from(&self.playlist_flag);
        arg.push(playlist.as_os_str());
        arg
    }

    fn validate(&self) -> Result<()> {
        ensure!(
            self.command.first().is_some_and(|exe| !exe.trim().is_empty()),
            "player.command must name an executable"
        );
        Ok(())
    }
}

impl Default for PlayerOptions {
    fn default() -> Self {
        Self {
            command: vec![
                "mpv".to_string(),
                "--fullscreen".to_string(),
                "--no-terminal".to_string(),
                "--loop-file=no".to_string(),
            ],
            playlist_flag: "--playlist=".to_string(),
        }
    }
}

/// Split a `:`/`;`/`,` separated list of directories, dropping blanks.
#[must_use]
pub fn split_source_directories(raw: &str) -> Vec<PathBuf> {
    raw.split([':', ';', ','])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect()
}
