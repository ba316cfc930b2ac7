//! Filesystem path completion and clean-up for free-form path answers.

use std::path::{self, PathBuf, MAIN_SEPARATOR};

/// Expand a leading `~` to `$HOME`.
pub fn expand_home(input: &str) -> PathBuf {
    let home = std::env::var_os("HOME").map(PathBuf::from);
    match (input, home) {
        ("~", Some(home)) => home,
        (s, Some(home)) if s.starts_with("~/") => home.join(&s[2..]),
        (s, _) => PathBuf::from(s),
    }
}

/// Trim whitespace and one pair of surrounding quotes, as left behind by
/// drag-and-drop into a terminal.
pub fn clean_path_answer(input: &str) -> String {
    let s = input.trim();
    for quote in ['"', '\''] {
        if let Some(inner) = s
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner.to_string();
        }
    }
    s.to_string()
}

/// Complete the last component of `input` against the filesystem.
///
/// Returns the extended input when at least one more character can be
/// filled in. A unique directory match gets a trailing separator.
pub fn complete_path(input: &str) -> Option<String> {
    let (dir_part, prefix) = match input.rfind(path::is_separator) {
        Some(i) => input.split_at(i + 1),
        None => ("", input),
    };
    let search_dir = if dir_part.is_empty() {
        PathBuf::from(".")
    } else {
        expand_home(dir_part)
    };

    let mut matches: Vec<(String, bool)> = std::fs::read_dir(&search_dir)
        .ok()?
        .filter_map(Result::ok)
        .filter_map(|e| {
            let name = e.file_name().into_string().ok()?;
            if !name.starts_with(prefix) || (name.starts_with('.') && !prefix.starts_with('.')) {
                return None;
            }
            let is_dir = e.path().is_dir();
            Some((name, is_dir))
        })
        .collect();
    if matches.is_empty() {
        return None;
    }
    matches.sort();

    let mut common = matches[0].0.clone();
    for (name, _) in &matches[1..] {
        while !name.starts_with(&common) {
            common.pop();
        }
    }

    let mut completed = format!("{dir_part}{common}");
    if let [(_, true)] = matches.as_slice() {
        completed.push(MAIN_SEPARATOR);
    }
    (completed.len() > input.len()).then_some(completed)
}
