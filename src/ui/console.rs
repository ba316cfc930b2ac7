//! Line-oriented console front end.
//!
//! On a terminal, answers are read through a small raw-mode line editor
//! (Tab completes paths, Esc clears, Ctrl+C interrupts). Otherwise lines are
//! read plainly and end of input counts as an interrupt.

use std::io::{self, BufRead, IsTerminal, Stdout, StdinLock, Write};
use std::path::Path;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::{queue, terminal};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Widget};

use crate::app::shell::{MenuChoice, Report, Shell};
use crate::core::browser::{BrowseNotice, Picker};
use crate::core::entry::Entry;
use crate::core::selection::Selection;
use crate::error::Interrupted;
use crate::sync::SyncOutcome;

use super::complete::{clean_path_answer, complete_path, expand_home};
use super::entry_table::{human_size, EntryTable};
use super::input::{parse_confirm, parse_menu_choice, parse_selection};
use super::render::{queue_styled, write_buffer};
use super::theme::Theme;

/// Table width when the terminal size is unknown.
const FALLBACK_WIDTH: u16 = 100;
const MAX_WIDTH: u16 = 120;

// ───────────────────────────────────────── raw mode ──────────

/// Keeps the terminal in raw mode while alive.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

// ───────────────────────────────────────── shell ─────────────

pub struct ConsoleShell<R, W> {
    input: R,
    out: W,
    interactive: bool,
    /// Number of rows in the listing shown last.
    shown: usize,
}

impl ConsoleShell<StdinLock<'static>, Stdout> {
    /// Shell on the process's stdin/stdout.
    pub fn stdio() -> Self {
        let stdin = io::stdin();
        let stdout = io::stdout();
        let interactive = stdin.is_terminal() && stdout.is_terminal();
        tracing::debug!("console interactive: {interactive}");
        Self {
            input: stdin.lock(),
            out: stdout,
            interactive,
            shown: 0,
        }
    }
}

impl<R: BufRead, W: Write> ConsoleShell<R, W> {
    /// Non-interactive shell over arbitrary streams.
    pub fn new(input: R, out: W) -> Self {
        Self {
            input,
            out,
            interactive: false,
            shown: 0,
        }
    }

    fn say(&mut self, text: &str, style: Style) {
        let result = queue_styled(&mut self.out, text, style)
            .and_then(|_| queue!(self.out, Print("\n")))
            .and_then(|_| self.out.flush());
        if let Err(err) = result {
            tracing::debug!("console write failed: {err}");
        }
    }

    fn width(&self) -> u16 {
        if !self.interactive {
            return FALLBACK_WIDTH;
        }
        terminal::size()
            .map(|(w, _)| w)
            .unwrap_or(FALLBACK_WIDTH)
            .min(MAX_WIDTH)
    }

    fn draw(&mut self, widget: impl Widget, height: u16) {
        let area = Rect::new(0, 0, self.width(), height);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        if let Err(err) = write_buffer(&mut self.out, &buf) {
            tracing::debug!("console write failed: {err}");
        }
    }

    /// Prompt and read one answer. The default is only displayed; callers
    /// treat an empty answer as taking it.
    fn read_line(
        &mut self,
        prompt: &str,
        default: Option<&str>,
        complete: bool,
    ) -> Result<String, Interrupted> {
        let shown = match default {
            Some(d) => format!("{prompt} [{d}]: "),
            None => format!("{prompt}: "),
        };
        let printed = queue_styled(&mut self.out, &shown, Theme::prompt_style())
            .and_then(|_| self.out.flush());

        let answer = printed.and_then(|_| {
            if self.interactive {
                self.read_raw(complete)
            } else {
                self.read_plain()
            }
        });
        match answer {
            Ok(Some(line)) => Ok(line),
            Ok(None) => Err(Interrupted),
            Err(err) => {
                tracing::warn!("reading input failed: {err}");
                Err(Interrupted)
            }
        }
    }

    fn read_plain(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn read_raw(&mut self, complete: bool) -> io::Result<Option<String>> {
        let _raw = RawModeGuard::enable()?;
        let mut line = String::new();
        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
            match key.code {
                KeyCode::Char('c') if ctrl => {
                    queue!(self.out, Print("^C\r\n"))?;
                    self.out.flush()?;
                    return Ok(None);
                }
                KeyCode::Char('d') if ctrl && line.is_empty() => {
                    queue!(self.out, Print("\r\n"))?;
                    self.out.flush()?;
                    return Ok(None);
                }
                KeyCode::Enter => {
                    queue!(self.out, Print("\r\n"))?;
                    self.out.flush()?;
                    return Ok(Some(line));
                }
                KeyCode::Backspace => {
                    if line.pop().is_some() {
                        queue!(self.out, Print("\u{8} \u{8}"))?;
                    }
                }
                KeyCode::Esc => {
                    for _ in line.chars() {
                        queue!(self.out, Print("\u{8} \u{8}"))?;
                    }
                    line.clear();
                }
                KeyCode::Tab if complete => {
                    if let Some(done) = complete_path(&line) {
                        queue!(self.out, Print(&done[line.len()..]))?;
                        line = done;
                    }
                }
                KeyCode::Char(c) if !ctrl => {
                    line.push(c);
                    queue!(self.out, Print(c))?;
                }
                _ => {}
            }
            self.out.flush()?;
        }
    }
}

// ───────────────────────────────────────── browsing ──────────

impl<R: BufRead, W: Write> Picker for ConsoleShell<R, W> {
    fn present(&mut self, location: &Path, entries: &[Entry]) {
        self.shown = entries.len();
        let table = EntryTable::new(location, entries);
        let height = table.height();
        self.say("", Style::default());
        self.draw(table, height);
    }

    fn pick(&mut self) -> Result<Selection, Interrupted> {
        loop {
            let answer =
                self.read_line("Enter numbers separated by commas (0 = cancel)", Some("0"), false)?;
            match parse_selection(&answer) {
                Ok(selection) => {
                    if let Selection::Indices(indices) = &selection {
                        let shown = self.shown;
                        for i in indices.iter().filter(|&&i| i == 0 || i > shown) {
                            self.say(
                                &format!("Ignoring {i}: no such entry."),
                                Theme::warning_style(),
                            );
                        }
                    }
                    return Ok(selection);
                }
                Err(reason) => self.say(&format!("Invalid selection: {reason}"), Theme::error_style()),
            }
        }
    }

    fn notice(&mut self, notice: BrowseNotice) {
        match notice {
            BrowseNotice::Empty(path) => self.say(
                &format!("{} has nothing to pick, going back.", path.display()),
                Theme::warning_style(),
            ),
            BrowseNotice::Unreadable { path, reason } => self.say(
                &format!("Cannot read {}: {reason}", path.display()),
                Theme::error_style(),
            ),
            BrowseNotice::MixedRejected => self.say(
                "Pick a single directory, or only files.",
                Theme::warning_style(),
            ),
        }
    }
}

// ───────────────────────────────────────── menus ─────────────

impl<R: BufRead, W: Write> Shell for ConsoleShell<R, W> {
    fn choose(&mut self) -> Result<MenuChoice, Interrupted> {
        let lines: Vec<Line> = MenuChoice::ALL
            .iter()
            .map(|(n, choice)| {
                Line::from(vec![
                    Span::styled(format!(" {n}) "), Theme::index_style()),
                    Span::styled(choice.label(), Theme::file_style()),
                ])
            })
            .collect();
        let height = u16::try_from(lines.len() + 2).unwrap_or(u16::MAX);
        let menu = Paragraph::new(lines).block(
            Block::default()
                .title(" Wordlist Merger ")
                .title_style(Theme::title_style())
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Theme::border_style()),
        );
        self.say("", Style::default());
        self.draw(menu, height);

        let default = MenuChoice::ALL
            .iter()
            .find(|(_, c)| *c == MenuChoice::DEFAULT)
            .map(|(n, _)| n.to_string());
        loop {
            let answer = self.read_line("Your choice", default.as_deref(), false)?;
            match parse_menu_choice(&answer) {
                Some(choice) => return Ok(choice),
                None => self.say("Please enter one of the listed numbers.", Theme::error_style()),
            }
        }
    }

    fn ask_path(&mut self, prompt: &str) -> Result<String, Interrupted> {
        let answer = clean_path_answer(&self.read_line(prompt, None, true)?);
        if answer.is_empty() {
            return Ok(answer);
        }
        Ok(expand_home(&answer).display().to_string())
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, Interrupted> {
        let hint = if default { "Y/n" } else { "y/N" };
        loop {
            let answer = self.read_line(&format!("{prompt} [{hint}]"), None, false)?;
            match parse_confirm(&answer, default) {
                Some(yes) => return Ok(yes),
                None => self.say("Please answer y or n.", Theme::error_style()),
            }
        }
    }

    fn report(&mut self, report: Report) {
        match report {
            Report::Heading(text) => {
                self.say("", Style::default());
                self.say(&format!("» {text}"), Theme::title_style());
            }
            Report::Synced(SyncOutcome::Cloned) => {
                self.say("Corpus cloned.", Theme::success_style())
            }
            Report::Synced(SyncOutcome::Updated) => {
                self.say("Corpus is up to date.", Theme::success_style())
            }
            Report::SyncFailed(err) => self.say(
                &format!("Sync failed: {err}. Continuing with the local copy."),
                Theme::warning_style(),
            ),
            Report::Corpus(summary) => self.say(
                &format!(
                    "Corpus: {} files in {} directories, {}",
                    summary.files,
                    summary.dirs,
                    human_size(summary.bytes)
                ),
                Theme::meta_style(),
            ),
            Report::Merged(merged) => {
                for input in &merged.inputs {
                    if input.lossy {
                        self.say(
                            &format!("{}: skipped bytes that are not UTF-8", input.path.display()),
                            Theme::warning_style(),
                        );
                    }
                    if let Some(mime) = input.non_text {
                        self.say(
                            &format!("{}: looks like {mime}, merged anyway", input.path.display()),
                            Theme::warning_style(),
                        );
                    }
                }
                self.say(
                    &format!(
                        "Merged {} file(s): {} unique lines written to {}",
                        merged.inputs.len(),
                        merged.line_count,
                        merged.output.display()
                    ),
                    Theme::success_style(),
                );
            }
            Report::Imported(imported) => self.say(
                &format!(
                    "Imported {} into {}",
                    human_size(imported.bytes),
                    imported.output.display()
                ),
                Theme::success_style(),
            ),
            Report::NothingSelected => self.say("Nothing selected.", Theme::warning_style()),
            Report::Aborted => self.say("Merge cancelled.", Theme::warning_style()),
            Report::Failed(err) => self.say(&format!("Error: {err}"), Theme::error_style()),
            Report::Farewell { interrupted: true } => {
                self.say("Interrupted by user.", Theme::warning_style())
            }
            Report::Farewell { interrupted: false } => self.say("Goodbye!", Theme::success_style()),
        }
    }
}
