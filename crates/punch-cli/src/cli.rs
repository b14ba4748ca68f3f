//! Command-line argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use punch_core::{EventKind, YearMonth};

/// Personal check-in/check-out time tracker.
///
/// Toggles an online/offline status, records each change as a timestamped
/// event, and derives per-day and per-month worked-hours summaries.
#[derive(Debug, Parser)]
#[command(name = "punch", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check in when offline, check out when online.
    Toggle,

    /// Record an explicit check-in or check-out.
    Record {
        /// The event kind (check-in or check-out).
        kind: EventKind,

        /// Free-text note to attach to the event.
        #[arg(long)]
        notes: Option<String>,
    },

    /// Show the current status and today's total.
    Status,

    /// Show a day's events and worked total.
    Day {
        /// The day to show, e.g. 2024-01-05 (defaults to today).
        date: Option<NaiveDate>,
    },

    /// Show a month's worked total.
    Month {
        /// The month to show, e.g. 2024-01 (defaults to the current month).
        month: Option<YearMonth>,
    },

    /// List the days of a month with recorded activity.
    Calendar {
        /// The month to list, e.g. 2024-01 (defaults to the current month).
        month: Option<YearMonth>,
    },
}
