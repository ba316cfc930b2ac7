//! Transition function of the menu state machine.
//!
//! [`step`] performs the work of the current [`Screen`] and moves to the
//! next one. Command errors are reported through the shell and always lead
//! back to the main menu; only [`Interrupted`] escapes.

use std::path::{Path, PathBuf};

use crate::core::{import, merge};
use crate::error::{CommandError, Interrupted};

use super::shell::{MenuChoice, Report, Shell};
use super::state::{AppState, BrowsePurpose, MergePlan, Screen};

/// Drive the session until the user exits or interrupts.
pub fn run<S: Shell + ?Sized>(state: &mut AppState, shell: &mut S) {
    loop {
        if state.screen == Screen::Exit {
            shell.report(Report::Farewell { interrupted: false });
            return;
        }
        if step(state, shell).is_err() {
            tracing::debug!("session interrupted");
            state.screen = Screen::Exit;
            shell.report(Report::Farewell { interrupted: true });
            return;
        }
    }
}

/// Execute the current screen and advance to the next one.
pub fn step<S: Shell + ?Sized>(state: &mut AppState, shell: &mut S) -> Result<(), Interrupted> {
    let screen = std::mem::take(&mut state.screen);
    state.screen = match screen {
        Screen::MainMenu => main_menu(state, shell)?,
        Screen::Browsing(purpose) => browse(state, shell, purpose)?,
        Screen::ConfirmMerge(plan) => confirm_merge(state, shell, plan)?,
        Screen::Exit => Screen::Exit,
    };
    Ok(())
}

// ── Main menu ───────────────────────────────────────────────────

fn main_menu<S: Shell + ?Sized>(state: &AppState, shell: &mut S) -> Result<Screen, Interrupted> {
    Ok(match shell.choose()? {
        MenuChoice::Exit => Screen::Exit,
        MenuChoice::BrowseAndMerge => Screen::Browsing(BrowsePurpose::MergeMany),
        MenuChoice::MergeTwo => Screen::Browsing(BrowsePurpose::PairFirst),
        MenuChoice::Import => {
            import_file(state, shell)?;
            Screen::MainMenu
        }
    })
}

fn import_file<S: Shell + ?Sized>(state: &AppState, shell: &mut S) -> Result<(), Interrupted> {
    let answer = shell.ask_path("Path to your wordlist file")?;
    if answer.is_empty() {
        shell.report(Report::NothingSelected);
        return Ok(());
    }
    let report = match import::import_as_merged(Path::new(&answer), &state.output) {
        Ok(report) => Report::Imported(report),
        Err(err) => Report::Failed(err.into()),
    };
    shell.report(report);
    Ok(())
}

// ── Browsing ────────────────────────────────────────────────────

fn browse<S: Shell + ?Sized>(
    state: &AppState,
    shell: &mut S,
    purpose: BrowsePurpose,
) -> Result<Screen, Interrupted> {
    tracing::debug!("browse session under {}", state.browser.root().display());
    match purpose {
        BrowsePurpose::MergeMany => {
            let files = state.browser.browse(shell)?;
            if files.is_empty() {
                shell.report(Report::NothingSelected);
                return Ok(Screen::MainMenu);
            }
            Ok(Screen::ConfirmMerge(MergePlan::Files(files)))
        }
        BrowsePurpose::PairFirst => {
            shell.report(Report::Heading("Select the first wordlist file".into()));
            let files = state.browser.browse(shell)?;
            Ok(match exactly_one(files, "first") {
                Ok(first) => Screen::Browsing(BrowsePurpose::PairSecond { first }),
                Err(err) => {
                    shell.report(Report::Failed(err));
                    Screen::MainMenu
                }
            })
        }
        BrowsePurpose::PairSecond { first } => {
            shell.report(Report::Heading("Select the second wordlist file".into()));
            let files = state.browser.browse(shell)?;
            Ok(match exactly_one(files, "second") {
                Ok(second) => Screen::ConfirmMerge(MergePlan::Pair { first, second }),
                Err(err) => {
                    shell.report(Report::Failed(err));
                    Screen::MainMenu
                }
            })
        }
    }
}

/// One side of a pair merge. The browser already collapsed repeated indices,
/// so `1,1` counts as a single file here.
fn exactly_one(files: Vec<PathBuf>, side: &str) -> Result<PathBuf, CommandError> {
    let count = files.len();
    match <[PathBuf; 1]>::try_from(files) {
        Ok([file]) => Ok(file),
        Err(_) => Err(CommandError::InvalidSelection(format!(
            "select exactly one file for the {side} list (got {count})"
        ))),
    }
}

// ── Confirm + merge ─────────────────────────────────────────────

fn confirm_merge<S: Shell + ?Sized>(
    state: &AppState,
    shell: &mut S,
    plan: MergePlan,
) -> Result<Screen, Interrupted> {
    if state.confirm_merge {
        let prompt = format!(
            "Merge {} file(s) into {}?",
            plan.inputs().len(),
            state.output.display()
        );
        if !shell.confirm(&prompt, true)? {
            shell.report(Report::Aborted);
            return Ok(Screen::MainMenu);
        }
    }

    let result = match &plan {
        MergePlan::Files(files) => merge::merge_files(files, &state.output),
        MergePlan::Pair { first, second } => merge::merge_two(first, second, &state.output),
    };
    shell.report(match result {
        Ok(report) => Report::Merged(report),
        Err(err) => Report::Failed(err.into()),
    });
    Ok(Screen::MainMenu)
}
