//! Binary entrypoint for reception-tv.
//!
//! Delegates all logic to the library crate; no local modules here.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use reception_tv::config::Configuration;
use reception_tv::tasks::playback;
use tokio_util::sync::CancellationToken;
use tracing::{Level, info};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{EnvFilter, fmt};

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

#[derive(Debug, Parser)]
#[command(
    name = "reception-tv",
    version,
    about = "Round-robin show player for an always-on display"
)]
struct Cli {
    /// Path to YAML config file (built-in defaults when omitted)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the master playlist length
    #[arg(long, value_name = "COUNT")]
    max_entries: Option<usize>,

    /// Print discovered shows and the planned order without launching the player
    #[arg(long)]
    dry_run: bool,

    /// Play a single cycle, then exit
    #[arg(long, conflicts_with = "dry_run")]
    once: bool,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) -> Result<()> {
    // RUST_LOG wins; otherwise map -v to our level
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let level = match verbosity {
                0 => Level::INFO,
                1 => Level::DEBUG,
                _ => Level::TRACE,
            };
            EnvFilter::new("warn")
                .add_directive(format!("reception_tv={level}").parse::<Directive>()?)
        }
    };
    fmt().with_env_filter(filter).with_target(true).init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let mut cfg = match &cli.config {
        Some(path) => Configuration::from_yaml_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Configuration::default(),
    }
    .with_env_overrides();
    if let Some(max_entries) = cli.max_entries {
        cfg.max_entries = max_entries;
    }
    let cfg = cfg.validated().context("invalid configuration values")?;
    info!(
        roots = ?cfg.video_source_directories,
        playlist = %cfg.playlist_file.display(),
        max_entries = cfg.max_entries,
        "configuration loaded"
    );

    if cli.dry_run {
        return run_dry_run(&cfg);
    }

    let cancel = CancellationToken::new();
    spawn_shutdown_listener(cancel.clone());

    if cli.once {
        let outcome = playback::run_cycle(&cfg, &cancel).await?;
        info!(?outcome, "single cycle finished");
        return Ok(());
    }

    playback::run(cfg, cancel).await
}

fn run_dry_run(cfg: &Configuration) -> Result<()> {
    let plan = playback::plan_cycle(&cfg.video_source_directories, cfg.max_entries)
        .context("building master playlist")?;

    println!(
        "# playlist dry run\n# shows: {}\n# entries: {}\n",
        plan.shows.len(),
        plan.sequence.len()
    );

    if plan.shows.is_empty() {
        println!("(no shows discovered)");
        return Ok(());
    }

    println!("# shows (videos per show):");
    for show in &plan.shows {
        println!("  {:>4} x {} ({})", show.videos, show.name, show.path.display());
    }

    println!("\n# planned order:");
    for (idx, path) in plan.sequence.iter().enumerate() {
        println!("  {:>4}: {}", idx + 1, path.display());
    }

    Ok(())
}

fn spawn_shutdown_listener(cancel: CancellationToken) {
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::warn!("ctrl-c handler failed: {err}");
                return;
            }
            info!("ctrl-c received; initiating shutdown");
            cancel.cancel();
        });
    }

    #[cfg(unix)]
    tokio::spawn(async move {
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = cancel.cancelled() => {}
                    _ = sigterm.recv() => {
                        info!("SIGTERM received; initiating shutdown");
                        cancel.cancel();
                    }
                }
            }
            Err(err) => tracing::warn!("failed to register SIGTERM handler: {err}"),
        }
    });
}
