//! User configuration: mirror location, output path, browse and sync knobs.
//!
//! Settings are read from a simple key-value text file at
//! `$XDG_CONFIG_HOME/wordmerge/config.toml` (default
//! `~/.config/wordmerge/config.toml`). The file is optional; command-line
//! flags are applied on top of it in `main`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;

use crate::core::browser::MixedSelection;
use crate::core::fs::ListConfig;
use crate::sync::SyncOptions;

pub const DEFAULT_REMOTE: &str = "https://github.com/danielmiessler/SecLists.git";
pub const DEFAULT_MIRROR_DIR: &str = "SecLists";
pub const OUTPUT_FILE_NAME: &str = "merged_list.txt";

/// Application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub remote_url: String,
    /// Local mirror directory, relative to the working directory unless
    /// absolute.
    pub mirror_dir: PathBuf,
    /// Merge/import destination; defaults to `<mirror_dir>/merged_list.txt`.
    pub output_file: Option<PathBuf>,
    pub show_hidden: bool,
    pub respect_gitignore: bool,
    pub mixed_selection: MixedSelection,
    /// Ask before writing a merge.
    pub confirm_merge: bool,
    pub sync_on_start: bool,
    pub sync_timeout_secs: u64,
    /// Shallow-clone depth; `0` in the file means full history.
    pub clone_depth: Option<u32>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            remote_url: DEFAULT_REMOTE.to_string(),
            mirror_dir: PathBuf::from(DEFAULT_MIRROR_DIR),
            output_file: None,
            show_hidden: false,
            respect_gitignore: false,
            mixed_selection: MixedSelection::default(),
            confirm_merge: true,
            sync_on_start: true,
            sync_timeout_secs: 600,
            clone_depth: Some(1),
        }
    }
}

impl AppConfig {
    /// Where merges and imports are written.
    pub fn output_path(&self) -> PathBuf {
        self.output_file
            .clone()
            .unwrap_or_else(|| self.mirror_dir.join(OUTPUT_FILE_NAME))
    }

    pub fn list_config(&self) -> ListConfig {
        ListConfig {
            show_hidden: self.show_hidden,
            respect_gitignore: self.respect_gitignore,
        }
    }

    pub fn sync_options(&self) -> SyncOptions {
        SyncOptions {
            timeout: Duration::from_secs(self.sync_timeout_secs),
            clone_depth: self.clone_depth,
        }
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load the default config file, falling back to defaults when it is
    /// missing or unreadable.
    pub fn load() -> Self {
        let path = config_path();
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(contents) => return Self::parse_config(&contents),
                Err(err) => tracing::warn!("ignoring {}: {err}", path.display()),
            }
        }
        Self::default()
    }

    /// Load an explicitly requested config file; unlike [`AppConfig::load`]
    /// a missing file is an error.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Ok(Self::parse_config(&contents))
    }

    fn parse_config(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            match key {
                "remote_url" if !value.is_empty() => config.remote_url = value.to_string(),
                "mirror_dir" if !value.is_empty() => config.mirror_dir = PathBuf::from(value),
                "output_file" if !value.is_empty() => {
                    config.output_file = Some(PathBuf::from(value))
                }
                "show_hidden" => config.show_hidden = value == "true",
                "respect_gitignore" => config.respect_gitignore = value == "true",
                "confirm_merge" => config.confirm_merge = value != "false",
                "sync_on_start" => config.sync_on_start = value != "false",
                "mixed_selection" => {
                    if let Some(policy) = MixedSelection::parse(value) {
                        config.mixed_selection = policy;
                    }
                }
                "sync_timeout_secs" => {
                    if let Ok(v) = value.parse::<u64>() {
                        // Bounded to 10s ..= 1 day.
                        config.sync_timeout_secs = v.clamp(10, 24 * 60 * 60);
                    }
                }
                "clone_depth" => {
                    if let Ok(v) = value.parse::<u32>() {
                        config.clone_depth = (v > 0).then_some(v);
                    }
                }
                other => tracing::debug!("unknown config key `{other}`"),
            }
        }

        config
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/wordmerge/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join(env!("CARGO_PKG_NAME")).join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_into_the_mirror() {
        let config = AppConfig::default();
        assert_eq!(config.output_path(), PathBuf::from("SecLists/merged_list.txt"));
        assert_eq!(config.sync_options().timeout, Duration::from_secs(600));
    }

    #[test]
    fn parses_known_keys_and_skips_noise() {
        let config = AppConfig::parse_config(
            r#"
# wordmerge configuration
[paths]
mirror_dir = "/srv/lists"
output_file = /tmp/out.txt
show_hidden = true
mixed_selection = reject
confirm_merge = false
clone_depth = 0
sync_timeout_secs = 1
no_such_key = 3
garbage line
"#,
        );
        assert_eq!(config.mirror_dir, PathBuf::from("/srv/lists"));
        assert_eq!(config.output_path(), PathBuf::from("/tmp/out.txt"));
        assert!(config.show_hidden);
        assert_eq!(config.mixed_selection, MixedSelection::Reject);
        assert!(!config.confirm_merge);
        assert_eq!(config.clone_depth, None);
        assert_eq!(config.sync_timeout_secs, 10);
        assert_eq!(config.remote_url, DEFAULT_REMOTE);
    }

    #[test]
    fn bad_values_keep_defaults() {
        let config = AppConfig::parse_config(
            "mixed_selection = sometimes\nclone_depth = deep\nsync_timeout_secs = -4\n",
        );
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AppConfig::load_from(&dir.path().join("absent.toml")).is_err());

        let path = dir.path().join("config.toml");
        std::fs::write(&path, "remote_url = https://mirror/lists.git\n").unwrap();
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.remote_url, "https://mirror/lists.git");
    }
}
