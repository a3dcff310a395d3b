//! Path-segment classification: organizational wrapper folders, hidden
//! entries, and show-name recovery from nested layouts.

use std::path::Path;

/// Substrings that mark a folder as a wrapper (season, disc, extras...)
/// rather than a show of its own. Season abbreviations `s01`..`s50` are
/// matched separately by [`contains_season_abbrev`].
pub const ORGANIZATIONAL_TOKENS: &[&str] = &["season", "disc", "extras", "specials", "bonus"];

const MAX_SEASON_ABBREV: u8 = 50;

/// Return `true` if `name` (a single path segment) looks like organizational
/// noise. Matching is case-insensitive and by substring, so both
/// `"Season 1 Extras"` and `"S01E02-ish"` qualify.
#[must_use]
pub fn is_organizational(name: &str) -> bool {
    let lowered = name.to_lowercase();
    ORGANIZATIONAL_TOKENS
        .iter()
        .any(|token| lowered.contains(token))
        || contains_season_abbrev(&lowered)
}

/// Return `true` for dot-prefixed entries (`.Trash`, `.hidden.mp4`).
#[must_use]
pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Same as [`is_hidden`] but for the final component of a path. Paths
/// without a file name (`/`, `..`) are not hidden.
#[must_use]
pub fn is_hidden_path(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| is_hidden(&name.to_string_lossy()))
}

/// Recover a human-meaningful show title for `path`.
///
/// Walks upward starting at the immediate parent and returns the first
/// ancestor name that is not organizational, so
/// `.../My Show/Season 1/Disc 2/ep1.mp4` yields `"My Show"`. Falls back to
/// the immediate parent's name when every ancestor is organizational.
#[must_use]
pub fn show_name(path: &Path) -> String {
    path.parent().map(directory_show_name).unwrap_or_default()
}

/// Title for a show directory: `dir`'s own name unless it is organizational,
/// in which case the nearest non-organizational ancestor wins. Falls back to
/// `dir`'s name when every segment is organizational.
#[must_use]
pub fn directory_show_name(dir: &Path) -> String {
    for ancestor in dir.ancestors() {
        let Some(name) = ancestor.file_name() else {
            continue;
        };
        let name = name.to_string_lossy();
        if !is_organizational(&name) {
            return name.into_owned();
        }
    }
    dir.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

// `s` followed by two digits in 01..=50, anywhere in the segment.
fn contains_season_abbrev(lowered: &str) -> bool {
    lowered.as_bytes().windows(3).any(|w| {
        w[0] == b's'
            && w[1].is_ascii_digit()
            && w[2].is_ascii_digit()
            && (1..=MAX_SEASON_ABBREV).contains(&((w[1] - b'0') * 10 + (w[2] - b'0')))
    })
}
