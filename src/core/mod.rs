//! Core algorithms – directory listing, browsing, and merging.
//!
//! Nothing in this module depends on any terminal or rendering crate; user
//! interaction comes in through the [`browser::Picker`] trait.

pub mod browser;
pub mod entry;
pub mod fs;
pub mod import;
pub mod merge;
pub mod output;
pub mod selection;
