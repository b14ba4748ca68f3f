//! Session accounting over an event log snapshot.
//!
//! Pure functions deriving status and duration aggregates from an
//! [`EventLog`]. Nothing here performs I/O or caches between calls; every
//! query recomputes from the snapshot it is given.
//!
//! # Pairing
//!
//! Events are filtered to the query window, stably sorted by timestamp, and
//! walked in order: each `CheckIn` opens a session, the next `CheckOut`
//! closes it and contributes the pair's duration. A `CheckOut` with no open
//! session is skipped for pairing (it still appears in day views). A
//! trailing unmatched `CheckIn` is an open session and contributes nothing
//! to completed totals.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Local, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::event::{Event, EventKind, EventLog};
use crate::types::YearMonth;

/// Current online/offline status, derived from the last event of the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityStatus {
    /// The last event is a `CheckIn`; that event is the open session.
    Online {
        /// The check-in that opened the current session.
        session: Event,
    },
    /// The log is empty or its last event is a `CheckOut`.
    Offline,
}

impl ActivityStatus {
    #[must_use]
    pub const fn is_online(&self) -> bool {
        matches!(self, Self::Online { .. })
    }

    /// The open session's check-in event, when online.
    #[must_use]
    pub const fn open_session(&self) -> Option<&Event> {
        match self {
            Self::Online { session } => Some(session),
            Self::Offline => None,
        }
    }
}

/// Derived view of a single calendar day.
///
/// Recomputed on every query; never cached across mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayView {
    /// The local calendar day this view covers.
    pub date: NaiveDate,
    /// The day's events, sorted ascending by timestamp.
    pub events: Vec<Event>,
    /// Sum of completed check-in/check-out pairs.
    ///
    /// `None` when the day has no events, or when its only sessions are
    /// still open (no pair completed). An open trailing session never
    /// contributes, even when completed pairs precede it.
    pub total: Option<Duration>,
}

/// Result of walking a sorted event sequence and pairing sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PairSummary {
    total: Duration,
    completed: usize,
    open: bool,
}

/// Pairs each `CheckIn` with the next `CheckOut` and sums pair durations.
///
/// `events` must already be sorted ascending by timestamp; ties keep
/// insertion order (the callers use a stable sort, never a secondary key).
fn pair_sessions(events: &[Event]) -> PairSummary {
    let mut total = Duration::zero();
    let mut completed = 0;
    let mut open: Option<&Event> = None;

    for event in events {
        match event.kind {
            EventKind::CheckIn => open = Some(event),
            EventKind::CheckOut => {
                if let Some(check_in) = open.take() {
                    total += event.timestamp - check_in.timestamp;
                    completed += 1;
                }
            }
        }
    }

    PairSummary {
        total,
        completed,
        open: open.is_some(),
    }
}

/// Converts a local date at midnight to UTC.
/// Handles DST ambiguity by picking the earlier time.
fn local_day_start(date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    match Local.from_local_datetime(&midnight) {
        // Single or ambiguous (DST fall-back): use the earlier time
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.with_timezone(&Utc),
        LocalResult::None => {
            // DST spring-forward gap at midnight is rare but possible
            // Use 1am local which is guaranteed to exist
            let one_am = date.and_time(NaiveTime::from_hms_opt(1, 0, 0).unwrap());
            Local
                .from_local_datetime(&one_am)
                .unwrap()
                .with_timezone(&Utc)
        }
    }
}

/// The local calendar day an instant falls on.
fn local_date_of(timestamp: DateTime<Utc>) -> NaiveDate {
    timestamp.with_timezone(&Local).date_naive()
}

/// Derives the current status from the last event in insertion order.
///
/// Must be recomputed after every load and mutation; it is never read from
/// persisted state.
#[must_use]
pub fn status_of(log: &EventLog) -> ActivityStatus {
    match log.last() {
        Some(event) if event.kind == EventKind::CheckIn => ActivityStatus::Online {
            session: event.clone(),
        },
        _ => ActivityStatus::Offline,
    }
}

/// Derives the view of a single local calendar day.
///
/// Events are filtered to the day, sorted ascending by timestamp (stable,
/// so identical timestamps keep insertion order), and paired. Unpreceded
/// check-outs stay visible in `events` but never pair.
#[must_use]
pub fn day_view(log: &EventLog, date: NaiveDate) -> DayView {
    let mut events: Vec<Event> = log
        .events()
        .iter()
        .filter(|event| local_date_of(event.timestamp) == date)
        .cloned()
        .collect();
    events.sort_by_key(|event| event.timestamp);

    let summary = pair_sessions(&events);
    let total = if events.is_empty() || (summary.completed == 0 && summary.open) {
        None
    } else {
        Some(summary.total)
    };

    DayView {
        date,
        events,
        total,
    }
}

/// Sums completed session durations for events in `[start of month, now]`.
///
/// The window is inclusive on both ends. A pair spanning several days
/// counts once; a session still open at `now` contributes nothing. An
/// event whose check-out falls after `now` is outside the window, leaving
/// its check-in unmatched.
#[must_use]
pub fn monthly_total(log: &EventLog, month: YearMonth, now: DateTime<Utc>) -> Duration {
    let start = local_day_start(month.first_day());
    let mut events: Vec<Event> = log
        .events()
        .iter()
        .filter(|event| event.timestamp >= start && event.timestamp <= now)
        .cloned()
        .collect();
    events.sort_by_key(|event| event.timestamp);

    pair_sessions(&events).total
}

/// The distinct local calendar days of `month` holding at least one event,
/// regardless of kind or pairing.
#[must_use]
pub fn days_with_activity(log: &EventLog, month: YearMonth) -> BTreeSet<u32> {
    use chrono::Datelike;

    log.events()
        .iter()
        .map(|event| local_date_of(event.timestamp))
        .filter(|date| month.contains(*date))
        .map(|date| date.day())
        .collect()
}
