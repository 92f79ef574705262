//! Command-line argument definitions.

use std::num::NonZeroU32;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Weekly availability planner.
///
/// Checks candidate sessions against declared availability and existing
/// sessions, finds open slots, and suggests repeats of past sessions.
#[derive(Debug, Parser)]
#[command(name = "cadence", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the plan file (overrides `plan_path` from config).
    #[arg(long, global = true)]
    pub plan: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check whether a session could be committed at a given time.
    Check {
        /// Start time (e.g., 2025-01-13T10:00).
        #[arg(long)]
        start: String,

        /// Session length in minutes.
        #[arg(long)]
        duration: NonZeroU32,
    },

    /// List open slots for a session of the given length.
    Slots {
        /// Session length in minutes.
        #[arg(long)]
        duration: NonZeroU32,

        /// First day to search (YYYY-MM-DD, today, tomorrow, "3 days ago"). Defaults to today.
        #[arg(long)]
        from: Option<String>,

        /// Number of days to search.
        #[arg(long)]
        horizon: Option<u32>,

        /// Minutes between candidate start times.
        #[arg(long)]
        granularity: Option<NonZeroU32>,

        /// Maximum number of slots to list.
        #[arg(long)]
        limit: Option<usize>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Suggest repeating past completed sessions.
    Recurrences {
        /// Day to suggest for. Defaults to today.
        #[arg(long)]
        date: Option<String>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show completion statistics.
    Progress {
        /// Day to compute the streak for. Defaults to today.
        #[arg(long)]
        date: Option<String>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List declared availability by weekday.
    Windows {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}
