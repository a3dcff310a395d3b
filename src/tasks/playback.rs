//! Discovery-to-player cycle and the long-running playback loop.

use crate::config::{Configuration, PlayerOptions};
use crate::error::Error;
use crate::schedule::{build_master_sequence, build_show_playlists};
use crate::shows::find_shows;
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

/// A show as seen by one discovery pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowSummary {
    pub name: String,
    pub path: PathBuf,
    pub videos: usize,
}

/// Everything one playback cycle needs: the shows found and the
/// interleaved sequence built from them.
#[derive(Debug, Clone, Default)]
pub struct CyclePlan {
    pub shows: Vec<ShowSummary>,
    pub sequence: Vec<PathBuf>,
}

#[derive(Debug)]
pub enum CycleOutcome {
    /// The player ran to completion, successfully or not.
    Played(ExitStatus),
    /// Discovery found no shows.
    NothingToPlay,
    /// The playlist file could not be written.
    WriteFailed,
    /// The player could not be launched or waited on.
    PlayerFailed,
    /// Shutdown was requested mid-cycle.
    Cancelled,
}

/// Discover shows under `roots` and interleave them into at most
/// `max_entries` videos. Pure filesystem work; blocks the calling thread.
///
/// # Errors
/// Returns [`Error::EmptyPlaylist`] if discovery produced a show without
/// videos.
pub fn plan_cycle(roots: &[PathBuf], max_entries: usize) -> Result<CyclePlan, Error> {
    let shows = find_shows(roots);
    let summaries = shows
        .iter()
        .map(|show| ShowSummary {
            name: show.name.clone(),
            path: show.path.clone(),
            videos: show.videos.len(),
        })
        .collect();
    let playlists = build_show_playlists(shows);
    let sequence = build_master_sequence(playlists, max_entries)?;
    Ok(CyclePlan {
        shows: summaries,
        sequence,
    })
}

/// Write one absolute path per line, replacing any previous playlist.
///
/// On unix paths are written as raw bytes so non-UTF-8 names survive.
pub fn write_playlist(path: &Path, videos: &[PathBuf]) -> Result<(), Error> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut out = BufWriter::new(File::create(path)?);
    for video in videos {
        write_entry(&mut out, video)?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(unix)]
fn write_entry(out: &mut impl Write, video: &Path) -> io::Result<()> {
    use std::os::unix::ffi::OsStrExt;
    out.write_all(video.as_os_str().as_bytes())?;
    out.write_all(b"\n")
}

#[cfg(not(unix))]
fn write_entry(out: &mut impl Write, video: &Path) -> io::Result<()> {
    match video.to_str() {
        Some(path) => writeln!(out, "{path}"),
        None => {
            warn!(path = %video.display(), "path is not valid unicode; leaving it out of the playlist");
            Ok(())
        }
    }
}

/// Run discovery, write the playlist and block on the player.
#[instrument(skip_all, fields(roots = cfg.video_source_directories.len()))]
pub async fn run_cycle(cfg: &Configuration, cancel: &CancellationToken) -> Result<CycleOutcome> {
    let roots = cfg.video_source_directories.clone();
    let max_entries = cfg.max_entries;
    let plan = tokio::select! {
        _ = cancel.cancelled() => return Ok(CycleOutcome::Cancelled),
        res = tokio::task::spawn_blocking(move || plan_cycle(&roots, max_entries)) => {
            res.context("discovery task failed")?.context("scheduling failed")?
        }
    };

    for show in &plan.shows {
        debug!(show = %show.name, path = %show.path.display(), videos = show.videos, "show discovered");
    }
    if plan.sequence.is_empty() {
        info!("no shows found");
        return Ok(CycleOutcome::NothingToPlay);
    }
    info!(
        shows = plan.shows.len(),
        entries = plan.sequence.len(),
        "master playlist built"
    );

    if let Err(err) = write_playlist(&cfg.playlist_file, &plan.sequence) {
        error!(path = %cfg.playlist_file.display(), error = %err, "failed to write playlist");
        return Ok(CycleOutcome::WriteFailed);
    }
    info!(path = %cfg.playlist_file.display(), "playlist written");

    Ok(play(&cfg.player, &cfg.playlist_file, cancel).await)
}

async fn play(player: &PlayerOptions, playlist: &Path, cancel: &CancellationToken) -> CycleOutcome {
    let Some((exe, args)) = player.command.split_first() else {
        error!("player command is empty");
        return CycleOutcome::PlayerFailed;
    };
    let mut command = Command::new(exe);
    command
        .args(args)
        .arg(player.playlist_arg(playlist))
        .stdin(Stdio::null())
        .kill_on_drop(true);

    let mut child = match command.spawn() {
        Ok(child) => child,
        Err(err) => {
            error!(player = %exe, error = %err, "failed to launch player");
            return CycleOutcome::PlayerFailed;
        }
    };
    info!(pid = child.id(), player = %exe, "player started");

    tokio::select! {
        _ = cancel.cancelled() => {
            info!("cancel received; stopping player");
            if let Err(err) = child.start_kill() {
                warn!(error = %err, "failed to signal player");
            }
            if let Err(err) = child.wait().await {
                warn!(error = %err, "failed to reap player");
            }
            CycleOutcome::Cancelled
        }
        status = child.wait() => match status {
            Ok(status) if status.success() => {
                info!("player exited");
                CycleOutcome::Played(status)
            }
            Ok(status) => {
                warn!(code = ?status.code(), "player exited abnormally");
                CycleOutcome::Played(status)
            }
            Err(err) => {
                error!(error = %err, "failed waiting on player");
                CycleOutcome::PlayerFailed
            }
        }
    }
}

/// Loop discovery and playback until `cancel` fires.
///
/// Each cycle starts from a fresh discovery so newly mounted or removed media
/// is picked up. Cycles that produce nothing to play back off for
/// `empty-retry-delay` before trying again.
pub async fn run(cfg: Configuration, cancel: CancellationToken) -> Result<()> {
    info!("starting playback loop");
    loop {
        let backoff = match run_cycle(&cfg, &cancel).await? {
            CycleOutcome::Cancelled => break,
            CycleOutcome::Played(_) => false,
            CycleOutcome::NothingToPlay
            | CycleOutcome::WriteFailed
            | CycleOutcome::PlayerFailed => true,
        };
        if cancel.is_cancelled() {
            break;
        }
        if backoff {
            debug!(delay = ?cfg.empty_retry_delay, "backing off before rediscovery");
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = sleep(cfg.empty_retry_delay) => {}
            }
        }
    }
    info!("playback loop stopped");
    Ok(())
}
