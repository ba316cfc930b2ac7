//! Print ratatui styles and buffers to a plain (scrolling) terminal.
//!
//! Widgets are rendered into an off-screen [`Buffer`] and then written out
//! line by line with crossterm escape sequences, so tables scroll with the
//! rest of the session instead of taking over the screen.

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Attribute, Color as CtColor, Print, ResetColor, SetAttribute, SetForegroundColor};
use ratatui::buffer::Buffer;
use ratatui::style::{Color, Modifier, Style};

/// Map a ratatui colour to the crossterm colour with the same ANSI code.
pub fn to_crossterm(color: Color) -> Option<CtColor> {
    Some(match color {
        Color::Reset => return None,
        Color::Black => CtColor::Black,
        Color::Red => CtColor::DarkRed,
        Color::Green => CtColor::DarkGreen,
        Color::Yellow => CtColor::DarkYellow,
        Color::Blue => CtColor::DarkBlue,
        Color::Magenta => CtColor::DarkMagenta,
        Color::Cyan => CtColor::DarkCyan,
        Color::Gray => CtColor::Grey,
        Color::DarkGray => CtColor::DarkGrey,
        Color::LightRed => CtColor::Red,
        Color::LightGreen => CtColor::Green,
        Color::LightYellow => CtColor::Yellow,
        Color::LightBlue => CtColor::Blue,
        Color::LightMagenta => CtColor::Magenta,
        Color::LightCyan => CtColor::Cyan,
        Color::White => CtColor::White,
        Color::Rgb(r, g, b) => CtColor::Rgb { r, g, b },
        Color::Indexed(i) => CtColor::AnsiValue(i),
    })
}

/// Queue `text` with `style` applied, then reset attributes.
pub fn queue_styled<W: Write>(out: &mut W, text: &str, style: Style) -> io::Result<()> {
    if let Some(fg) = style.fg.and_then(to_crossterm) {
        queue!(out, SetForegroundColor(fg))?;
    }
    if style.add_modifier.contains(Modifier::BOLD) {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if style.add_modifier.contains(Modifier::ITALIC) {
        queue!(out, SetAttribute(Attribute::Italic))?;
    }
    queue!(out, Print(text), SetAttribute(Attribute::Reset), ResetColor)
}

/// Write every row of `buf`, grouping cells with identical styling.
pub fn write_buffer<W: Write>(out: &mut W, buf: &Buffer) -> io::Result<()> {
    let area = buf.area;
    for y in area.top()..area.bottom() {
        let mut run = String::new();
        let mut run_style = Style::default();
        for x in area.left()..area.right() {
            let Some(cell) = buf.cell((x, y)) else {
                continue;
            };
            let style = Style::default().fg(cell.fg).add_modifier(cell.modifier);
            if style != run_style && !run.is_empty() {
                queue_styled(out, &run, run_style)?;
                run.clear();
            }
            run_style = style;
            run.push_str(cell.symbol());
        }
        let trimmed = run.trim_end();
        if !trimmed.is_empty() {
            queue_styled(out, trimmed, run_style)?;
        }
        queue!(out, Print("\n"))?;
    }
    out.flush()
}

/// Plain-text rows of `buf` with trailing blanks removed.
pub fn buffer_lines(buf: &Buffer) -> Vec<String> {
    let area = buf.area;
    (area.top()..area.bottom())
        .map(|y| {
            let row: String = (area.left()..area.right())
                .filter_map(|x| buf.cell((x, y)).map(|c| c.symbol()))
                .collect();
            row.trim_end().to_string()
        })
        .collect()
}
