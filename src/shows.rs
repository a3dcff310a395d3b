//! Show discovery over a set of media roots.
//!
//! A show is the deepest directory that holds playable videos once
//! organizational wrappers (season, disc, extras...) and hidden folders are
//! filtered out. Rules:
//! - Roots are processed in the order given; children in name order.
//! - A child that is missing, not a directory, hidden or organizational is
//!   skipped.
//! - Each surviving child is probed recursively. Shows found below it win;
//!   the child itself only becomes a show when nothing below it does and it
//!   holds at least one video.
//! - A show is never nested inside another show.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::classify::{directory_show_name, is_hidden_path, is_organizational};
use crate::scan::enumerate_videos;

/// A directory classified as a show, with its non-empty video sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowDirectory {
    pub path: PathBuf,
    pub name: String,
    pub videos: Vec<PathBuf>,
}

impl ShowDirectory {
    /// Classify `path` as a show if it contains videos.
    ///
    /// The display name comes from `path` itself, skipping organizational
    /// segments, so a root pointed at `My Show/Season 1` is titled
    /// `"My Show"` wherever the episodes sit below it.
    #[must_use]
    pub fn from_dir(path: &Path) -> Option<Self> {
        let videos = enumerate_videos(path);
        if videos.is_empty() {
            return None;
        }
        let name = directory_show_name(path);
        Some(Self {
            path: path.to_path_buf(),
            name,
            videos,
        })
    }
}

/// Result of probing one directory for shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe {
    NoShowsFound,
    ShowsFound(Vec<ShowDirectory>),
}

impl Probe {
    #[must_use]
    pub fn into_shows(self) -> Vec<ShowDirectory> {
        match self {
            Self::NoShowsFound => Vec::new(),
            Self::ShowsFound(shows) => shows,
        }
    }
}

/// Discover every show below `roots`, in a stable order.
///
/// Roots that are missing, not directories or hidden are skipped. A root
/// that yields no nested shows but holds videos itself is a show, so a root
/// can point straight at a single show's folder.
pub fn find_shows<P: AsRef<Path>>(roots: &[P]) -> Vec<ShowDirectory> {
    let mut shows = Vec::new();
    for root in roots {
        let root = root.as_ref();
        if !is_valid_directory(root) {
            continue;
        }
        let mut stack = Vec::new();
        shows.extend(probe_within(root, &mut stack).into_shows());
    }
    shows
}

/// Probe a single directory, treating it as a root.
#[must_use]
pub fn probe(dir: &Path) -> Probe {
    let mut stack = Vec::new();
    probe_within(dir, &mut stack)
}

// `stack` holds the canonical paths of the directories currently being
// probed so symlinked cycles terminate.
fn probe_within(dir: &Path, stack: &mut Vec<PathBuf>) -> Probe {
    let Ok(canonical) = dir.canonicalize() else {
        debug!(path = %dir.display(), "cannot resolve directory; skipping");
        return Probe::NoShowsFound;
    };
    if stack.contains(&canonical) {
        debug!(path = %dir.display(), "directory loops back onto an ancestor; skipping");
        return Probe::NoShowsFound;
    }
    stack.push(canonical);

    let mut nested = Vec::new();
    for child in sorted_children(dir) {
        if !is_valid_directory(&child) {
            continue;
        }
        let organizational = child
            .file_name()
            .is_some_and(|name| is_organizational(&name.to_string_lossy()));
        if organizational {
            debug!(path = %child.display(), "organizational directory; not a show root");
            continue;
        }
        if let Probe::ShowsFound(found) = probe_within(&child, stack) {
            nested.extend(found);
        }
    }

    stack.pop();

    if !nested.is_empty() {
        return Probe::ShowsFound(nested);
    }
    match ShowDirectory::from_dir(dir) {
        Some(show) => Probe::ShowsFound(vec![show]),
        None => Probe::NoShowsFound,
    }
}

fn is_valid_directory(path: &Path) -> bool {
    if !path.exists() {
        debug!(path = %path.display(), "directory not found; skipping");
        return false;
    }
    if !path.is_dir() {
        debug!(path = %path.display(), "not a directory; skipping");
        return false;
    }
    if is_hidden_path(path) {
        debug!(path = %path.display(), "directory is hidden; skipping");
        return false;
    }
    true
}

fn sorted_children(dir: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            debug!(path = %dir.display(), error = %err, "cannot list directory");
            return Vec::new();
        }
    };
    let mut children: Vec<PathBuf> = entries.flatten().map(|e| e.path()).collect();
    children.sort();
    children
}
