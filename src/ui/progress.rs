//! Sync progress indicator: one redrawn line with a spinner, the git phase,
//! a bar, a percentage and elapsed / remaining time.

use std::io::Write;
use std::time::{Duration, Instant};

use crossterm::{
    queue,
    terminal::{Clear, ClearType},
};

use crate::sync::{ProgressListener, SyncProgress};

use super::render::queue_styled;
use super::theme::Theme;

/// Braille-dot spinner frames.  Cycles through these on each update.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const BAR_WIDTH: usize = 24;

/// Renders [`SyncProgress`] updates onto one terminal line.
pub struct ProgressLine<W: Write> {
    out: W,
    tick: u64,
    drawn: bool,
    started: Instant,
    /// Current git phase and when it began; remaining time is per phase.
    phase: Option<(String, Instant)>,
}

impl<W: Write> ProgressLine<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            tick: 0,
            drawn: false,
            started: Instant::now(),
            phase: None,
        }
    }

    /// Move past the progress line once the sync is over.
    pub fn finish(&mut self) {
        if self.drawn {
            let _ = writeln!(self.out);
            let _ = self.out.flush();
            self.drawn = false;
        }
    }
}

impl<W: Write> ProgressListener for ProgressLine<W> {
    fn on_progress(&mut self, progress: &SyncProgress) {
        let now = Instant::now();
        let phase_started = match &self.phase {
            Some((name, at)) if *name == progress.phase => *at,
            _ => {
                self.phase = Some((progress.phase.clone(), now));
                now
            }
        };
        let timing = Timing {
            elapsed: now.duration_since(self.started),
            remaining: remaining(progress.percent, now.duration_since(phase_started)),
        };
        let line = format_progress(self.tick, progress, timing);
        self.tick += 1;
        let result = queue!(self.out, crossterm::style::Print("\r"), Clear(ClearType::CurrentLine))
            .and_then(|_| queue_styled(&mut self.out, &line, Theme::progress_style()))
            .and_then(|_| self.out.flush());
        match result {
            Ok(()) => self.drawn = true,
            Err(err) => tracing::debug!("progress redraw failed: {err}"),
        }
    }
}

/// Clock readings shown after the bar.
#[derive(Debug, Clone, Copy, Default)]
pub struct Timing {
    pub elapsed: Duration,
    pub remaining: Option<Duration>,
}

/// Linear estimate from how long the phase took to reach `percent`.
fn remaining(percent: Option<u8>, in_phase: Duration) -> Option<Duration> {
    let pct = u32::from(percent?.min(100));
    if pct == 0 {
        return None;
    }
    Some(in_phase * (100 - pct) / pct)
}

/// `m:ss`, or `h:mm:ss` past the hour.
fn clock(d: Duration) -> String {
    let secs = d.as_secs();
    let (h, m, s) = (secs / 3600, secs / 60 % 60, secs % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    }
}

/// Text of one progress frame.
pub fn format_progress(tick: u64, progress: &SyncProgress, timing: Timing) -> String {
    let frame = SPINNER_FRAMES[(tick as usize) % SPINNER_FRAMES.len()];
    let elapsed = clock(timing.elapsed);
    let Some(pct) = progress.percent else {
        return format!("{frame} {} {elapsed}", progress.phase);
    };
    let filled = (usize::from(pct.min(100)) * BAR_WIDTH) / 100;
    let bar = format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled));
    let counts = match (progress.current, progress.total) {
        (Some(cur), Some(total)) => format!(" ({cur}/{total})"),
        _ => String::new(),
    };
    let left = timing
        .remaining
        .map(|d| format!(" ~{} left", clock(d)))
        .unwrap_or_default();
    format!(
        "{frame} {:<20} {bar} {pct:>3}%{counts} {elapsed}{left}",
        progress.phase
    )
}
