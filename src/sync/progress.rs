//! Parsing of git's human-readable progress output.
//!
//! `git clone --progress` rewrites a single terminal line with `\r`, so the
//! raw stderr stream is split on both `\r` and `\n` before parsing.

use std::sync::OnceLock;

use regex::Regex;

/// One progress tick reported by the sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncProgress {
    /// e.g. `"Receiving objects"`.
    pub phase: String,
    pub percent: Option<u8>,
    pub current: Option<u64>,
    pub total: Option<u64>,
}

/// Observer handed to [`super::ensure_local`]; called on the calling thread.
pub trait ProgressListener {
    fn on_progress(&mut self, progress: &SyncProgress);
}

fn progress_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^(?:remote:\s*)?(?P<phase>[A-Za-z][A-Za-z ]*?):\s+(?P<pct>\d{1,3})%(?:\s+\((?P<cur>\d+)/(?P<total>\d+)\))?",
        )
        .expect("progress regex is valid")
    })
}

/// Parse one line such as `Receiving objects:  45% (123/456), 1.2 MiB`.
pub fn parse_progress(line: &str) -> Option<SyncProgress> {
    let caps = progress_re().captures(line.trim())?;
    let percent = caps["pct"].parse::<u8>().ok().map(|p| p.min(100));
    Some(SyncProgress {
        phase: caps["phase"].trim().to_string(),
        percent,
        current: caps.name("cur").and_then(|m| m.as_str().parse().ok()),
        total: caps.name("total").and_then(|m| m.as_str().parse().ok()),
    })
}

/// Accumulates raw stderr bytes and yields complete lines.
#[derive(Debug, Default)]
pub struct LineSplitter {
    pending: Vec<u8>,
}

impl LineSplitter {
    /// Feed a chunk; returns every line it completed (empty lines skipped).
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        let mut lines = Vec::new();
        for &byte in chunk {
            if byte == b'\r' || byte == b'\n' {
                self.flush_into(&mut lines);
            } else {
                self.pending.push(byte);
            }
        }
        lines
    }

    /// Whatever is left once the stream ends.
    pub fn finish(&mut self) -> Option<String> {
        let mut lines = Vec::new();
        self.flush_into(&mut lines);
        lines.pop()
    }

    fn flush_into(&mut self, lines: &mut Vec<String>) {
        if !self.pending.is_empty() {
            lines.push(String::from_utf8_lossy(&self.pending).into_owned());
            self.pending.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_receiving_objects() {
        let p = parse_progress("Receiving objects:  45% (1234/2742), 1.20 MiB | 2.34 MiB/s").unwrap();
        assert_eq!(p.phase, "Receiving objects");
        assert_eq!(p.percent, Some(45));
        assert_eq!(p.current, Some(1234));
        assert_eq!(p.total, Some(2742));
    }

    #[test]
    fn parses_remote_prefixed_lines() {
        let p = parse_progress("remote: Compressing objects: 100% (10/10), done.").unwrap();
        assert_eq!(p.phase, "Compressing objects");
        assert_eq!(p.percent, Some(100));
    }

    #[test]
    fn ignores_non_progress_lines() {
        assert_eq!(parse_progress("Cloning into 'SecLists'..."), None);
        assert_eq!(parse_progress("remote: Enumerating objects: 5213, done."), None);
        assert_eq!(parse_progress("fatal: repository not found"), None);
    }

    #[test]
    fn splits_on_carriage_returns() {
        let mut splitter = LineSplitter::default();
        let mut lines = splitter.push(b"Receiving objects:  1% (1/100)\rReceiving obj");
        lines.extend(splitter.push(b"ects:  2% (2/100)\r\nResolving"));
        assert_eq!(
            lines,
            vec!["Receiving objects:  1% (1/100)", "Receiving objects:  2% (2/100)"]
        );
        assert_eq!(splitter.finish().as_deref(), Some("Resolving"));
        assert_eq!(splitter.finish(), None);
    }
}
