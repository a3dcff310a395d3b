//! Directory scanning utilities for discovering video files.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::classify::is_hidden;

/// Recognized video extensions (lowercase, without dot).
pub const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "mkv", "avi", "flv", "wmv", "mov", "webm", "mpg", "mpeg", "m4v", "3gp", "3g2", "f4v",
    "m4p", "mp2", "mpe", "mpv", "m2v", "vob", "ogv", "ogg", "drc", "gif", "gifv", "mng", "qt",
    "yuv", "rm", "rmvb", "asf", "amv", "m2ts", "ts", "mts",
];

/// Return `true` if `path` has a recognized video extension (case-insensitive).
#[must_use]
pub fn is_video(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| {
            let ext = ext.to_ascii_lowercase();
            VIDEO_EXTENSIONS.iter().any(|e| *e == ext)
        })
}

/// Recursively collect the videos below `root` in playback order.
///
/// Traversal is depth-first. Within each directory, subdirectories are
/// visited first (by name), then the directory's own videos follow sorted
/// by file name, so nested episodes keep the position of their parent
/// folder rather than being re-sorted across the whole tree.
///
/// Hidden entries are skipped and hidden directories are never entered.
/// Unreadable directories, broken links and link loops contribute nothing;
/// they are not errors at this level. A file reachable through more than
/// one link is listed once, at its first position.
#[must_use]
pub fn enumerate_videos(root: &Path) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .sort_by(directories_first)
        .into_iter()
        .filter_entry(|e| !should_skip(e))
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                debug!(root = %root.display(), error = %err, "scan: skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() || !is_video(entry.path()) {
            continue;
        }
        // The same file reached through a second link keeps its first slot.
        let key = fs::canonicalize(entry.path()).unwrap_or_else(|_| entry.path().to_path_buf());
        if seen.insert(key) {
            out.push(entry.into_path());
        } else {
            debug!(path = %entry.path().display(), "scan: duplicate through link; skipping");
        }
    }

    out
}

fn directories_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    b.file_type()
        .is_dir()
        .cmp(&a.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

fn should_skip(entry: &DirEntry) -> bool {
    // The root's own visibility is the caller's decision.
    if entry.depth() == 0 {
        return false;
    }
    is_hidden(&entry.file_name().to_string_lossy())
}
