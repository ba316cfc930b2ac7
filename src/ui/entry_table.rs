//! Ratatui widget that renders one directory listing as an indexed table.

use std::path::Path;

use chrono::{DateTime, Local};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Widget},
};

use crate::core::entry::Entry;

use super::theme::Theme;

const KIND_WIDTH: usize = 4;
const SIZE_WIDTH: usize = 10;
const MODIFIED_WIDTH: usize = 16;
/// Below this inner width the size and modified columns are dropped.
const META_MIN_WIDTH: u16 = 60;

/// Bordered table: index, name, type and (when wide enough) size + mtime.
pub struct EntryTable<'a> {
    entries: &'a [Entry],
    title: String,
}

impl<'a> EntryTable<'a> {
    /// `location` is relative to the mirror root; empty means the root.
    pub fn new(location: &Path, entries: &'a [Entry]) -> Self {
        let shown = if location.as_os_str().is_empty() {
            ".".to_string()
        } else {
            location.display().to_string()
        };
        Self {
            entries,
            title: format!(" Browsing: {shown} "),
        }
    }

    /// Rows needed: two borders, a header, one per entry.
    pub fn height(&self) -> u16 {
        u16::try_from(self.entries.len() + 3).unwrap_or(u16::MAX)
    }

    fn index_width(&self) -> usize {
        self.entries.len().max(1).to_string().len().max(2)
    }
}

impl Widget for EntryTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(self.title.clone())
            .title_style(Theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border_style());
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let idx_w = self.index_width();
        let show_meta = inner.width >= META_MIN_WIDTH;
        let fixed = idx_w
            + 2
            + 2
            + KIND_WIDTH
            + if show_meta {
                2 + SIZE_WIDTH + 2 + MODIFIED_WIDTH
            } else {
                0
            };
        let name_w = (inner.width as usize).saturating_sub(fixed + 1).max(4);

        let mut header = vec![
            Span::styled(format!(" {:>idx_w$}", "#"), Theme::header_style()),
            Span::raw("  "),
            Span::styled(pad("Name", name_w), Theme::header_style()),
            Span::raw("  "),
            Span::styled(pad("Type", KIND_WIDTH), Theme::header_style()),
        ];
        if show_meta {
            header.push(Span::raw("  "));
            header.push(Span::styled(format!("{:>SIZE_WIDTH$}", "Size"), Theme::header_style()));
            header.push(Span::raw("  "));
            header.push(Span::styled(pad("Modified", MODIFIED_WIDTH), Theme::header_style()));
        }
        buf.set_line(inner.x, inner.y, &Line::from(header), inner.width);

        for (i, entry) in self.entries.iter().enumerate() {
            let Some(y) = u16::try_from(i + 1).ok().map(|dy| inner.y + dy) else {
                break;
            };
            if y >= inner.bottom() {
                break;
            }

            let name_style = if entry.is_dir() {
                Theme::dir_style()
            } else {
                Theme::file_style()
            };
            let mut spans = vec![
                Span::styled(format!(" {:>idx_w$}", i + 1), Theme::index_style()),
                Span::raw("  "),
                Span::styled(pad(&display_name(entry), name_w), name_style),
                Span::raw("  "),
                Span::styled(pad(entry.kind.label(), KIND_WIDTH), Theme::kind_style()),
            ];
            if show_meta {
                let size = if entry.is_dir() {
                    "-".to_string()
                } else {
                    human_size(entry.size)
                };
                let modified = entry
                    .modified
                    .map(|t| DateTime::<Local>::from(t).format("%Y/%m/%d %H:%M").to_string())
                    .unwrap_or_else(|| "-".to_string());
                spans.push(Span::raw("  "));
                spans.push(Span::styled(format!("{size:>SIZE_WIDTH$}"), Theme::meta_style()));
                spans.push(Span::raw("  "));
                spans.push(Span::styled(pad(&modified, MODIFIED_WIDTH), Theme::meta_style()));
            }
            buf.set_line(inner.x, y, &Line::from(spans), inner.width);
        }
    }
}

fn display_name(entry: &Entry) -> String {
    if entry.is_dir() {
        format!("{}/", entry.name)
    } else {
        entry.name.clone()
    }
}

/// Left-align `text` in `width` columns, truncating with `…`.
fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        format!("{text}{}", " ".repeat(width - len))
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}

/// Human-readable size string.
pub fn human_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KiB", "MiB", "GiB", "TiB"];
    let mut size = bytes as f64;
    for &unit in UNITS {
        if size < 1024.0 {
            return format!("{size:.1} {unit}");
        }
        size /= 1024.0;
    }
    format!("{size:.1} PiB")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entry::EntryKind;
    use crate::ui::render::buffer_lines;
    use std::path::PathBuf;

    fn entry(name: &str, kind: EntryKind, size: u64) -> Entry {
        Entry {
            name: name.to_string(),
            kind,
            path: PathBuf::from(name),
            size,
            modified: None,
        }
    }

    fn render(table: EntryTable<'_>, width: u16) -> Vec<String> {
        let area = Rect::new(0, 0, width, table.height());
        let mut buf = Buffer::empty(area);
        table.render(area, &mut buf);
        buffer_lines(&buf)
    }

    #[test]
    fn renders_indexed_rows() {
        let entries = vec![
            entry("Passwords", EntryKind::Directory, 4096),
            entry("top.txt", EntryKind::File, 2048),
        ];
        let lines = render(EntryTable::new(Path::new(""), &entries), 90);

        assert_eq!(lines.len(), 5);
        assert!(lines[0].contains("Browsing: ."));
        assert!(lines[1].contains("Name") && lines[1].contains("Modified"));
        assert!(lines[2].contains(" 1  Passwords/"));
        assert!(lines[2].contains("dir"));
        assert!(lines[3].contains(" 2  top.txt"));
        assert!(lines[3].contains("2.0 KiB"));
    }

    #[test]
    fn narrow_tables_drop_metadata_and_truncate() {
        let entries = vec![entry(
            "a-really-long-wordlist-name-that-will-not-fit.txt",
            EntryKind::File,
            1,
        )];
        let lines = render(EntryTable::new(Path::new("Discovery/Web"), &entries), 30);

        assert!(lines[0].contains("Discovery/Web"));
        assert!(!lines[1].contains("Size"));
        assert!(lines[2].contains('…'));
        assert!(lines[2].contains("file"));
    }

    #[test]
    fn human_sizes() {
        assert_eq!(human_size(0), "0.0 B");
        assert_eq!(human_size(1536), "1.5 KiB");
        assert_eq!(human_size(5 * 1024 * 1024), "5.0 MiB");
    }
}
