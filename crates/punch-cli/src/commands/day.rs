//! Day command: a single day's events and worked total.

use std::io::Write;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use punch_core::{EventStore, StatusController};

use super::util::{format_clock, format_duration};

pub fn run<W: Write, S: EventStore>(
    writer: &mut W,
    controller: &StatusController<S>,
    date: Option<NaiveDate>,
) -> Result<()> {
    let date = date.unwrap_or_else(|| Local::now().date_naive());
    let view = controller.query(date);

    if view.events.is_empty() {
        writeln!(writer, "No events on {date}")?;
        return Ok(());
    }

    writeln!(writer, "{date}")?;
    for event in &view.events {
        write!(writer, "  {}  {}", format_clock(event.timestamp), event.kind)?;
        if let Some(notes) = &event.notes {
            write!(writer, "  ({notes})")?;
        }
        writeln!(writer)?;
    }

    match view.total {
        Some(total) => writeln!(writer, "Total: {}", format_duration(total))?,
        None => writeln!(writer, "Total: session still open")?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use punch_core::EventKind;
    use punch_store::StateFile;

    fn controller_in(temp: &tempfile::TempDir) -> StatusController<StateFile> {
        StatusController::initialize(StateFile::new(temp.path().join("state.json"))).unwrap()
    }

    #[test]
    fn empty_day_prints_no_events() {
        let temp = tempfile::tempdir().unwrap();
        let controller = controller_in(&temp);

        let mut output = Vec::new();
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        run(&mut output, &controller, Some(date)).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "No events on 2024-01-05\n"
        );
    }

    #[test]
    fn lists_events_with_notes_and_total() {
        let temp = tempfile::tempdir().unwrap();
        let mut controller = controller_in(&temp);
        controller
            .record(EventKind::CheckIn, Some("standup".into()))
            .unwrap();
        controller.record(EventKind::CheckOut, None).unwrap();

        let mut output = Vec::new();
        run(&mut output, &controller, None).unwrap();
        let output = String::from_utf8(output).unwrap();

        assert!(output.contains("CheckIn  (standup)"), "got: {output}");
        assert!(output.contains("CheckOut"), "got: {output}");
        assert!(output.contains("Total: 0m"), "got: {output}");
    }

    #[test]
    fn open_day_reports_session_still_open() {
        let temp = tempfile::tempdir().unwrap();
        let mut controller = controller_in(&temp);
        controller.record(EventKind::CheckIn, None).unwrap();

        let mut output = Vec::new();
        run(&mut output, &controller, None).unwrap();
        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Total: session still open"), "got: {output}");
    }
}
