//! Status command: current status, open session and today's total.

use std::io::Write;

use anyhow::Result;
use chrono::{Duration, Local};
use punch_core::{ActivityStatus, EventStore, StatusController};

use super::util::{format_clock, format_duration};

pub fn run<W: Write, S: EventStore>(
    writer: &mut W,
    controller: &StatusController<S>,
) -> Result<()> {
    match controller.status() {
        ActivityStatus::Online { session } => {
            let elapsed = controller.current_elapsed().unwrap_or_else(Duration::zero);
            writeln!(
                writer,
                "Online since {} ({})",
                format_clock(session.timestamp),
                format_duration(elapsed)
            )?;
        }
        ActivityStatus::Offline => writeln!(writer, "Offline")?,
    }

    let view = controller.query(Local::now().date_naive());
    match view.total {
        Some(total) => writeln!(writer, "Today: {}", format_duration(total))?,
        None => writeln!(writer, "Today: no completed sessions")?,
    }

    Ok(())
}
