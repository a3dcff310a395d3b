//! Round-robin interleaving of show playlists into one master sequence.

use std::path::PathBuf;

use tracing::debug;

use crate::error::Error;
use crate::playlist::Playlist;
use crate::shows::ShowDirectory;

/// Default cap on the length of a master sequence.
pub const DEFAULT_MAX_ENTRIES: usize = 100;

/// Build one playlist per show, in discovery order, each starting at its
/// first video. Shows without videos are dropped.
#[must_use]
pub fn build_show_playlists<I>(shows: I) -> Vec<Playlist>
where
    I: IntoIterator<Item = ShowDirectory>,
{
    shows
        .into_iter()
        .filter_map(|show| {
            let path = show.path.clone();
            match Playlist::from_show(show) {
                Ok(playlist) => Some(playlist),
                Err(err) => {
                    debug!(path = %path.display(), error = %err, "dropping show");
                    None
                }
            }
        })
        .collect()
}

/// Endless round-robin over a set of playlists.
///
/// Each round advances every playlist exactly once, in the order the
/// playlists were given. With no playlists the iterator is empty.
#[derive(Debug)]
pub struct RoundRobin {
    playlists: Vec<Playlist>,
    next: usize,
}

impl RoundRobin {
    #[must_use]
    pub fn new(playlists: Vec<Playlist>) -> Self {
        Self { playlists, next: 0 }
    }

    /// Number of playlists visited per round.
    #[must_use]
    pub fn round_len(&self) -> usize {
        self.playlists.len()
    }
}

impl Iterator for RoundRobin {
    type Item = Result<PathBuf, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.playlists.is_empty() {
            return None;
        }
        let idx = self.next;
        self.next = (idx + 1) % self.playlists.len();
        Some(self.playlists[idx].advance().map(|p| p.to_path_buf()))
    }
}

/// Interleave `playlists` round-robin until `cap` videos are collected.
///
/// Any `playlists.len()` consecutive entries contain exactly one video from
/// each playlist. An empty set yields an empty sequence, which callers treat
/// as "nothing to play".
///
/// # Errors
/// Returns [`Error::EmptyPlaylist`] if a playlist without videos slipped in.
pub fn build_master_sequence(playlists: Vec<Playlist>, cap: usize) -> Result<Vec<PathBuf>, Error> {
    RoundRobin::new(playlists).take(cap).collect()
}
