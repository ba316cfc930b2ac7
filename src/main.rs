//! Interactive wordlist merger.
//!
//! Keeps a local mirror of a wordlist corpus in sync with its git remote,
//! lets the user browse it by numbered menus and writes the sorted,
//! de-duplicated union of the picked files to one output list.

mod app;
mod config;
mod core;
mod error;
mod sync;
mod ui;

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use crate::app::handler;
use crate::app::shell::{Report, Shell};
use crate::app::state::AppState;
use crate::config::AppConfig;
use crate::core::browser::TreeBrowser;
use crate::error::Interrupted;
use crate::sync::{SyncError, SyncOutcome};
use crate::ui::console::ConsoleShell;
use crate::ui::progress::ProgressLine;

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Browse a wordlist corpus and merge lists")]
struct Cli {
    /// Local mirror of the corpus (default `./SecLists`).
    #[arg(long)]
    mirror: Option<PathBuf>,

    /// Merged list to write (default `<mirror>/merged_list.txt`).
    #[arg(long)]
    output: Option<PathBuf>,

    /// Git remote to clone from.
    #[arg(long)]
    remote: Option<String>,

    /// Skip cloning/pulling and use the mirror as it is.
    #[arg(long)]
    no_sync: bool,

    /// Show hidden (dot) files while browsing.
    #[arg(long)]
    hidden: bool,

    /// Read settings from this file instead of the default location.
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Cli {
    /// Settings file first, then flags on top.
    fn resolve_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load_from(path)?,
            None => AppConfig::load(),
        };
        if let Some(mirror) = &self.mirror {
            config.mirror_dir = mirror.clone();
        }
        if let Some(output) = &self.output {
            config.output_file = Some(output.clone());
        }
        if let Some(remote) = &self.remote {
            config.remote_url = remote.clone();
        }
        if self.no_sync {
            config.sync_on_start = false;
        }
        if self.hidden {
            config.show_hidden = true;
        }
        Ok(config)
    }
}

// ───────────────────────────────────────── sync ──────────────

/// Bring the mirror up to date. Failures are reported and the session
/// carries on with whatever is on disk; only Ctrl+C stops it.
fn sync_corpus<S: Shell + ?Sized>(
    config: &AppConfig,
    mirror: &Path,
    shell: &mut S,
) -> Result<(), Interrupted> {
    if config.sync_on_start {
        let heading = if mirror.exists() {
            format!("Updating {}", mirror.display())
        } else {
            format!("Cloning {} into {}", config.remote_url, mirror.display())
        };
        shell.report(Report::Heading(heading));

        let mut progress = ProgressLine::new(io::stdout());
        let result = sync::ensure_local(
            &config.remote_url,
            mirror,
            &config.sync_options(),
            &mut progress,
        );
        progress.finish();
        shell.report(sync_report(result)?);
    }

    if mirror.is_dir() {
        shell.report(Report::Corpus(crate::core::fs::summarize(mirror)));
    }
    Ok(())
}

/// What to tell the user about a finished sync.
fn sync_report(result: Result<SyncOutcome, SyncError>) -> Result<Report, Interrupted> {
    match result {
        Ok(outcome) => {
            tracing::debug!("sync finished: {outcome:?}");
            Ok(Report::Synced(outcome))
        }
        Err(SyncError::Interrupted) => Err(Interrupted),
        Err(err) => {
            tracing::warn!("sync failed: {err}");
            Ok(Report::SyncFailed(err))
        }
    }
}

/// Ctrl+C outside a raw-mode prompt (plain reads, a running merge) ends the
/// session with the same farewell as an interrupt at a prompt.
fn watch_interrupts() {
    let spawned = std::thread::Builder::new()
        .name("interrupt".into())
        .spawn(|| {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(err) => {
                    tracing::warn!("cannot watch for Ctrl+C: {err}");
                    return;
                }
            };
            if runtime.block_on(tokio::signal::ctrl_c()).is_ok() {
                let _ = crossterm::terminal::disable_raw_mode();
                println!();
                ConsoleShell::new(io::empty(), io::stdout())
                    .report(Report::Farewell { interrupted: true });
                std::process::exit(0);
            }
        });
    if let Err(err) = spawned {
        tracing::warn!("cannot watch for Ctrl+C: {err}");
    }
}

// ───────────────────────────────────────── main ─────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    let mirror = std::path::absolute(&config.mirror_dir)
        .with_context(|| format!("resolving mirror path {}", config.mirror_dir.display()))?;
    let output_path = config.output_path();
    let output = std::path::absolute(&output_path)
        .with_context(|| format!("resolving output path {}", output_path.display()))?;
    tracing::debug!(
        "mirror {} -> output {}",
        mirror.display(),
        output.display()
    );

    let mut shell = ConsoleShell::stdio();
    if sync_corpus(&config, &mirror, &mut shell).is_err() {
        shell.report(Report::Farewell { interrupted: true });
        return Ok(());
    }
    watch_interrupts();

    let browser = TreeBrowser::new(mirror, config.list_config(), config.mixed_selection);
    let mut state = AppState::new(browser, output, config.confirm_merge);
    handler::run(&mut state, &mut shell);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_settings() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("config.toml");
        std::fs::write(
            &file,
            "mirror_dir = /srv/lists\nshow_hidden = false\nsync_on_start = true\n",
        )
        .unwrap();

        let cli = Cli::parse_from([
            "wordmerge",
            "--config",
            file.to_str().unwrap(),
            "--output",
            "out.txt",
            "--no-sync",
            "--hidden",
        ]);
        let config = cli.resolve_config().unwrap();

        assert_eq!(config.mirror_dir, PathBuf::from("/srv/lists"));
        assert_eq!(config.output_path(), PathBuf::from("out.txt"));
        assert!(!config.sync_on_start);
        assert!(config.show_hidden);
    }

    #[test]
    fn interrupted_sync_ends_the_session() {
        assert_eq!(
            sync_report(Err(SyncError::Interrupted)).unwrap_err(),
            Interrupted
        );
        assert!(matches!(
            sync_report(Ok(SyncOutcome::Cloned)),
            Ok(Report::Synced(SyncOutcome::Cloned))
        ));
        assert!(matches!(
            sync_report(Err(SyncError::TimedOut(std::time::Duration::from_secs(5)))),
            Ok(Report::SyncFailed(SyncError::TimedOut(_)))
        ));
    }

    #[test]
    fn failed_or_skipped_sync_carries_on() {
        // A plain directory without `.git` fails before git is started.
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("mine.txt"), "admin\n").unwrap();
        let mut shell = ConsoleShell::new(io::empty(), Vec::new());
        assert_eq!(
            sync_corpus(&AppConfig::default(), dir.path(), &mut shell),
            Ok(())
        );

        let skipped = AppConfig {
            sync_on_start: false,
            ..AppConfig::default()
        };
        assert_eq!(sync_corpus(&skipped, dir.path(), &mut shell), Ok(()));
    }

    #[test]
    fn explicit_config_must_exist() {
        let cli = Cli::parse_from(["wordmerge", "--config", "/no/such/wordmerge.toml"]);
        assert!(cli.resolve_config().is_err());
    }
}
