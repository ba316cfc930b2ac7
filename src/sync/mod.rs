//! Corpus synchronization: keep the local mirror cloned and up to date by
//! driving the `git` command line.
//!
//! The child process runs on a current-thread tokio runtime so it can be
//! bounded by a timeout while its progress is forwarded to the listener on
//! the caller's thread. Failures are returned, never fatal: the caller keeps
//! working with whatever is already on disk.

pub mod progress;

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use thiserror::Error;
use tokio::io::AsyncReadExt;
use tokio::process::Command;

pub use progress::{ProgressListener, SyncProgress};
use progress::{parse_progress, LineSplitter};

/// What [`ensure_local`] ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Cloned,
    Updated,
}

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("could not run git: {0}")]
    GitUnavailable(#[source] std::io::Error),

    #[error("{} exists but is not a git checkout", .0.display())]
    NotARepository(PathBuf),

    #[error("git {operation} failed ({status}): {message}")]
    Failed {
        operation: &'static str,
        status: ExitStatus,
        message: String,
    },

    #[error("git timed out after {}s", .0.as_secs())]
    TimedOut(Duration),

    /// Ctrl+C arrived while git was running; the child has been killed.
    #[error("sync interrupted by user")]
    Interrupted,

    #[error("sync I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Tuning for a sync run.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub timeout: Duration,
    /// `--depth` for fresh clones; `None` fetches full history.
    pub clone_depth: Option<u32>,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(600),
            clone_depth: Some(1),
        }
    }
}

/// Clone `remote` into `local` when it is missing, otherwise pull.
pub fn ensure_local(
    remote: &str,
    local: &Path,
    options: &SyncOptions,
    listener: &mut dyn ProgressListener,
) -> Result<SyncOutcome, SyncError> {
    let (operation, args, outcome) = if local.exists() {
        if !local.join(".git").exists() {
            return Err(SyncError::NotARepository(local.to_path_buf()));
        }
        ("pull", pull_args(local), SyncOutcome::Updated)
    } else {
        ("clone", clone_args(remote, local, options), SyncOutcome::Cloned)
    };

    tracing::debug!("running git {operation} for {}", local.display());
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run_git(operation, args, options.timeout, listener))?;
    Ok(outcome)
}

fn clone_args(remote: &str, local: &Path, options: &SyncOptions) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["clone".into(), "--progress".into()];
    if let Some(depth) = options.clone_depth {
        args.push(format!("--depth={depth}").into());
    }
    args.push(remote.into());
    args.push(local.as_os_str().to_owned());
    args
}

fn pull_args(local: &Path) -> Vec<OsString> {
    vec![
        "-C".into(),
        local.as_os_str().to_owned(),
        "pull".into(),
        "--ff-only".into(),
        "--progress".into(),
    ]
}

async fn run_git(
    operation: &'static str,
    args: Vec<OsString>,
    timeout: Duration,
    listener: &mut dyn ProgressListener,
) -> Result<(), SyncError> {
    let mut child = Command::new("git")
        .args(&args)
        .env("GIT_TERMINAL_PROMPT", "0")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(SyncError::GitUnavailable)?;

    let mut stderr = child
        .stderr
        .take()
        .ok_or_else(|| std::io::Error::other("git stderr was not captured"))?;

    let mut last_message = String::new();
    let work = async {
        let mut splitter = LineSplitter::default();
        let mut buf = [0u8; 4096];
        loop {
            let n = stderr.read(&mut buf).await?;
            if n == 0 {
                break;
            }
            for line in splitter.push(&buf[..n]) {
                route_line(line, listener, &mut last_message);
            }
        }
        if let Some(line) = splitter.finish() {
            route_line(line, listener, &mut last_message);
        }
        child.wait().await
    };

    let status = tokio::select! {
        biased;
        Ok(()) = tokio::signal::ctrl_c() => {
            tracing::warn!("git {operation} interrupted, killing it");
            return Err(SyncError::Interrupted);
        }
        finished = tokio::time::timeout(timeout, work) => match finished {
            Ok(status) => status?,
            Err(_) => {
                tracing::warn!("git {operation} timed out, killing it");
                return Err(SyncError::TimedOut(timeout));
            }
        },
    };

    if status.success() {
        Ok(())
    } else {
        Err(SyncError::Failed {
            operation,
            status,
            message: last_message,
        })
    }
}

fn route_line(line: String, listener: &mut dyn ProgressListener, last_message: &mut String) {
    match parse_progress(&line) {
        Some(progress) => listener.on_progress(&progress),
        None => {
            tracing::debug!("git: {line}");
            *last_message = line;
        }
    }
}
