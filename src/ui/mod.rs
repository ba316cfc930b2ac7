//! Console front end: everything that reads from or writes to the terminal.
//!
//! Core types come in, styled text goes out. Listings and the main menu are
//! ratatui widgets rendered off-screen and printed with crossterm.

pub mod complete;
pub mod console;
pub mod entry_table;
pub mod input;
pub mod progress;
pub mod render;
pub mod theme;
