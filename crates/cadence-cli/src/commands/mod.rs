//! CLI subcommand implementations.

pub mod check;
pub mod progress;
pub mod recurrences;
pub mod slots;
pub mod util;
pub mod windows;
