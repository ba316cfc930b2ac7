//! Central session state.
//!
//! The interactive flow is an explicit state machine: [`Screen`] is the
//! current state and the handler computes the next one from the user's
//! validated answers.

use std::path::PathBuf;

use crate::core::browser::TreeBrowser;

/// Why the browser is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowsePurpose {
    /// Any number of files, merged together.
    MergeMany,
    /// First side of a two-file merge.
    PairFirst,
    /// Second side, with the first already chosen.
    PairSecond { first: PathBuf },
}

/// A merge waiting for confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergePlan {
    Files(Vec<PathBuf>),
    Pair { first: PathBuf, second: PathBuf },
}

impl MergePlan {
    pub fn inputs(&self) -> Vec<PathBuf> {
        match self {
            MergePlan::Files(files) => files.clone(),
            MergePlan::Pair { first, second } => vec![first.clone(), second.clone()],
        }
    }
}

/// Which screen is active.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    MainMenu,
    Browsing(BrowsePurpose),
    ConfirmMerge(MergePlan),
    Exit,
}

/// Everything one interactive session needs.
pub struct AppState {
    pub browser: TreeBrowser,
    /// Destination of every merge and import in this session.
    pub output: PathBuf,
    pub confirm_merge: bool,
    pub screen: Screen,
}

impl AppState {
    pub fn new(browser: TreeBrowser, output: PathBuf, confirm_merge: bool) -> Self {
        Self {
            browser,
            output,
            confirm_merge,
            screen: Screen::default(),
        }
    }
}
