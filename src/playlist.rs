//! Per-show circular playlist with an explicit cursor.

use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::shows::ShowDirectory;

/// A show's fixed video sequence plus the index of the next video to emit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    show_name: String,
    videos: Vec<PathBuf>,
    cursor: usize,
}

impl Playlist {
    /// Construct a playlist starting at the first video.
    ///
    /// # Errors
    /// Returns [`Error::EmptyPlaylist`] if `videos` is empty.
    pub fn new(show_name: impl Into<String>, videos: Vec<PathBuf>) -> Result<Self, Error> {
        let show_name = show_name.into();
        if videos.is_empty() {
            return Err(Error::EmptyPlaylist(show_name));
        }
        Ok(Self {
            show_name,
            videos,
            cursor: 0,
        })
    }

    /// Build the playlist for a discovered show.
    ///
    /// # Errors
    /// Returns [`Error::EmptyPlaylist`] if the show carries no videos.
    pub fn from_show(show: ShowDirectory) -> Result<Self, Error> {
        Self::new(show.name, show.videos)
    }

    #[must_use]
    pub fn show_name(&self) -> &str {
        &self.show_name
    }

    /// Number of videos in the playlist.
    #[must_use]
    pub fn len(&self) -> usize {
        self.videos.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }

    /// Index of the next video [`advance`](Self::advance) will return.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Borrow the next video without advancing.
    #[must_use]
    pub fn peek(&self) -> Option<&Path> {
        self.videos.get(self.cursor).map(PathBuf::as_path)
    }

    /// Return the video at the cursor and move the cursor on, wrapping at
    /// the end.
    ///
    /// # Errors
    /// Returns [`Error::EmptyPlaylist`] if the playlist holds no videos.
    pub fn advance(&mut self) -> Result<&Path, Error> {
        if self.videos.is_empty() {
            tracing::error!(show = %self.show_name, "advanced an empty playlist");
            return Err(Error::EmptyPlaylist(self.show_name.clone()));
        }
        let idx = self.cursor;
        self.cursor = (idx + 1) % self.videos.len();
        Ok(&self.videos[idx])
    }

    /// Borrow the video sequence (read-only).
    #[must_use]
    pub fn as_slice(&self) -> &[PathBuf] {
        &self.videos
    }
}
