//! Record command: append an explicit event with optional notes.

use std::io::Write;

use anyhow::Result;
use punch_core::{EventKind, EventStore, StatusController};

use super::util::format_clock;

pub fn run<W: Write, S: EventStore>(
    writer: &mut W,
    controller: &mut StatusController<S>,
    kind: EventKind,
    notes: Option<String>,
) -> Result<()> {
    let event = controller.record(kind, notes)?;
    writeln!(
        writer,
        "Recorded {} at {}",
        event.kind,
        format_clock(event.timestamp)
    )?;
    Ok(())
}
