//! Cadence CLI library.
//!
//! This crate provides the command-line interface over a JSON plan file.

mod cli;
pub mod commands;
mod config;
mod plan;

pub use cli::{Cli, Commands};
pub use config::Config;
pub use plan::PlanFile;
