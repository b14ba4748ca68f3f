//! Calendar command: days of a month with recorded activity.

use std::io::Write;

use anyhow::Result;
use chrono::Local;
use punch_core::{EventStore, StatusController, YearMonth};

pub fn run<W: Write, S: EventStore>(
    writer: &mut W,
    controller: &StatusController<S>,
    month: Option<YearMonth>,
) -> Result<()> {
    let month = month.unwrap_or_else(|| YearMonth::containing(Local::now().date_naive()));
    let days = controller.active_days(month);

    if days.is_empty() {
        writeln!(writer, "No activity in {month}")?;
        return Ok(());
    }

    let list = days
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    writeln!(writer, "Active days in {month}: {list}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Datelike;
    use punch_core::EventKind;
    use punch_store::StateFile;

    #[test]
    fn reports_no_activity_for_an_empty_month() {
        let temp = tempfile::tempdir().unwrap();
        let store = StateFile::new(temp.path().join("state.json"));
        let controller = StatusController::initialize(store).unwrap();

        let mut output = Vec::new();
        let month = YearMonth::new(2020, 6).unwrap();
        run(&mut output, &controller, Some(month)).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "No activity in 2020-06\n");
    }

    #[test]
    fn lists_today_after_recording() {
        let temp = tempfile::tempdir().unwrap();
        let store = StateFile::new(temp.path().join("state.json"));
        let mut controller = StatusController::initialize(store).unwrap();
        controller.record(EventKind::CheckIn, None).unwrap();

        let mut output = Vec::new();
        run(&mut output, &controller, None).unwrap();
        let output = String::from_utf8(output).unwrap();
        let today = Local::now().date_naive();
        assert!(
            output.contains(&format!("Active days in {}", YearMonth::containing(today))),
            "got: {output}"
        );
        assert!(output.contains(&today.day().to_string()), "got: {output}");
    }
}
