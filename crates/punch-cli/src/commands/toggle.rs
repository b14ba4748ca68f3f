//! Toggle command: flip between online and offline.

use std::io::Write;

use anyhow::Result;
use chrono::Local;
use punch_core::{EventKind, EventStore, StatusController};

use super::util::{format_clock, format_duration};

pub fn run<W: Write, S: EventStore>(
    writer: &mut W,
    controller: &mut StatusController<S>,
) -> Result<()> {
    let event = controller.toggle()?;
    let clock = format_clock(event.timestamp);

    match event.kind {
        EventKind::CheckIn => writeln!(writer, "Checked in at {clock}")?,
        EventKind::CheckOut => {
            writeln!(writer, "Checked out at {clock}")?;
            let view = controller.query(Local::now().date_naive());
            if let Some(total) = view.total {
                writeln!(writer, "Today: {}", format_duration(total))?;
            }
        }
    }

    Ok(())
}
