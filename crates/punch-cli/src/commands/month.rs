//! Month command: a month's worked total.

use std::io::Write;

use anyhow::Result;
use chrono::Local;
use punch_core::{EventStore, StatusController, YearMonth};

use super::util::format_duration;

pub fn run<W: Write, S: EventStore>(
    writer: &mut W,
    controller: &StatusController<S>,
    month: Option<YearMonth>,
) -> Result<()> {
    let month = month.unwrap_or_else(|| YearMonth::containing(Local::now().date_naive()));
    let total = controller.query_month(month);
    writeln!(writer, "{month}: {}", format_duration(total))?;
    Ok(())
}
