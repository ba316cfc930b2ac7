//! Application orchestration: session state, the menu state machine, and the
//! shell capability it drives.

pub mod handler;
pub mod shell;
pub mod state;
