//! The stateful façade over the event log and its derived views.
//!
//! [`StatusController`] owns the live [`EventLog`] snapshot and a cached
//! [`ActivityStatus`], recomputed from the log after every load and every
//! mutation. The status is never persisted on its own, so it cannot drift
//! from the log across process restarts.
//!
//! # Concurrency
//!
//! Mutations take `&mut self`; the exclusive borrow serializes concurrent
//! toggles within a process, so two racing toggles cannot both observe the
//! pre-toggle status and append contradictory events. For multi-threaded
//! access, wrap the controller in a `Mutex`.

use chrono::{Duration, NaiveDate, Utc};
use thiserror::Error;

use crate::accumulate::{self, ActivityStatus, DayView};
use crate::event::{Event, EventKind, EventLog};
use crate::store::{EventStore, LoadError, PersistenceError};
use crate::types::YearMonth;

/// A mutation was rejected because the durable write failed.
///
/// The in-memory log is unchanged; the event that failed to persist is
/// returned so the caller can retry.
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("event {} was not persisted: {}", .event.id, .source)]
    Unpersisted {
        event: Event,
        source: PersistenceError,
    },
}

/// Owns the live event log and exposes the accounting queries.
pub struct StatusController<S> {
    store: S,
    log: EventLog,
    status: ActivityStatus,
}

impl<S: EventStore> StatusController<S> {
    /// Loads persisted state and derives the initial status from it.
    ///
    /// A corrupt store fails the whole initialization; there is no silent
    /// fallback to an empty log, since that would discard the user's
    /// history. The caller decides whether to reset or abort.
    pub fn initialize(store: S) -> Result<Self, LoadError> {
        let log = store.load()?;
        let status = accumulate::status_of(&log);
        tracing::debug!(
            events = log.len(),
            online = status.is_online(),
            "rehydrated event log"
        );
        Ok(Self { store, log, status })
    }

    /// Flips the status, appending a `CheckIn` when offline and a
    /// `CheckOut` when online. Returns the newly appended event.
    ///
    /// The event is persisted before it becomes visible; on save failure
    /// the toggle did not happen.
    pub fn toggle(&mut self) -> Result<Event, ControllerError> {
        let kind = if self.status.is_online() {
            EventKind::CheckOut
        } else {
            EventKind::CheckIn
        };
        self.record(kind, None)
    }

    /// Appends an explicit event with optional notes.
    ///
    /// Shares the persist-then-commit path with [`toggle`](Self::toggle);
    /// the cached status is recomputed afterwards, so recording a bare
    /// `CheckIn` is observationally the same as toggling online.
    pub fn record(
        &mut self,
        kind: EventKind,
        notes: Option<String>,
    ) -> Result<Event, ControllerError> {
        let event = Event::new(kind, Utc::now(), notes);

        let next = self.log.append(event.clone());
        if let Err(source) = self.store.save(&next) {
            tracing::warn!(
                event_id = %event.id,
                error = %source,
                "save failed, rolling back event"
            );
            return Err(ControllerError::Unpersisted { event, source });
        }

        self.log = next;
        self.status = accumulate::status_of(&self.log);
        tracing::debug!(event_id = %event.id, kind = %event.kind, "recorded event");
        Ok(event)
    }

    /// The current derived status.
    #[must_use]
    pub const fn status(&self) -> &ActivityStatus {
        &self.status
    }

    /// Time since the open session's check-in, or `None` when offline.
    ///
    /// A single synchronous read; display timers that poll this are the UI
    /// collaborator's concern.
    #[must_use]
    pub fn current_elapsed(&self) -> Option<Duration> {
        self.status
            .open_session()
            .map(|session| Utc::now() - session.timestamp)
    }

    /// The derived view of a local calendar day.
    #[must_use]
    pub fn query(&self, date: NaiveDate) -> DayView {
        accumulate::day_view(&self.log, date)
    }

    /// Total worked duration for a month, up to now.
    #[must_use]
    pub fn query_month(&self, month: YearMonth) -> Duration {
        accumulate::monthly_total(&self.log, month, Utc::now())
    }

    /// The days of `month` holding at least one event.
    #[must_use]
    pub fn active_days(&self, month: YearMonth) -> std::collections::BTreeSet<u32> {
        accumulate::days_with_activity(&self.log, month)
    }

    /// The current log snapshot.
    #[must_use]
    pub const fn log(&self) -> &EventLog {
        &self.log
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use chrono::Local;

    use super::*;

    /// In-memory store capturing every saved snapshot.
    struct MemoryStore {
        initial: EventLog,
        saved: RefCell<Option<EventLog>>,
    }

    impl MemoryStore {
        fn empty() -> Self {
            Self::with_log(EventLog::new())
        }

        fn with_log(initial: EventLog) -> Self {
            Self {
                initial,
                saved: RefCell::new(None),
            }
        }
    }

    impl EventStore for MemoryStore {
        fn load(&self) -> Result<EventLog, LoadError> {
            Ok(self.initial.clone())
        }

        fn save(&self, log: &EventLog) -> Result<(), PersistenceError> {
            *self.saved.borrow_mut() = Some(log.clone());
            Ok(())
        }
    }

    /// Store whose writes always fail.
    struct FailingStore;

    impl EventStore for FailingStore {
        fn load(&self) -> Result<EventLog, LoadError> {
            Ok(EventLog::new())
        }

        fn save(&self, _log: &EventLog) -> Result<(), PersistenceError> {
            Err(PersistenceError::Io(std::io::Error::other("disk full")))
        }
    }

    #[test]
    fn first_run_starts_offline() {
        let controller = StatusController::initialize(MemoryStore::empty()).unwrap();
        assert_eq!(*controller.status(), ActivityStatus::Offline);
        assert!(controller.current_elapsed().is_none());
        assert!(controller.log().is_empty());
    }

    #[test]
    fn toggles_alternate_check_in_and_check_out() {
        // Starting offline, n toggles append an alternating sequence,
        // and an even number of toggles lands back on offline.
        let mut controller = StatusController::initialize(MemoryStore::empty()).unwrap();

        let kinds: Vec<EventKind> = (0..4).map(|_| controller.toggle().unwrap().kind).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::CheckIn,
                EventKind::CheckOut,
                EventKind::CheckIn,
                EventKind::CheckOut,
            ]
        );
        assert_eq!(*controller.status(), ActivityStatus::Offline);
        assert_eq!(controller.log().len(), 4);
    }

    #[test]
    fn toggle_persists_before_returning() {
        let mut controller = StatusController::initialize(MemoryStore::empty()).unwrap();
        let event = controller.toggle().unwrap();

        let saved = controller.store.saved.borrow().clone().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved.last().unwrap().id, event.id);
    }

    #[test]
    fn rehydration_recomputes_status_from_last_event() {
        let session = Event::new(EventKind::CheckIn, Utc::now(), None);
        let log = EventLog::new()
            .append(Event::new(EventKind::CheckIn, Utc::now(), None))
            .append(Event::new(EventKind::CheckOut, Utc::now(), None))
            .append(session.clone());

        let controller = StatusController::initialize(MemoryStore::with_log(log)).unwrap();
        assert_eq!(
            *controller.status(),
            ActivityStatus::Online { session }
        );
        assert!(controller.current_elapsed().is_some());
    }

    #[test]
    fn failed_save_rolls_back_the_toggle() {
        let mut controller = StatusController::initialize(FailingStore).unwrap();

        let error = controller.toggle().unwrap_err();
        let ControllerError::Unpersisted { event, .. } = error;
        assert_eq!(event.kind, EventKind::CheckIn);

        // The toggle did not happen: nothing changed, status unchanged.
        assert!(controller.log().is_empty());
        assert_eq!(*controller.status(), ActivityStatus::Offline);
    }

    #[test]
    fn record_attaches_notes_and_updates_status() {
        let mut controller = StatusController::initialize(MemoryStore::empty()).unwrap();

        let event = controller
            .record(EventKind::CheckIn, Some("standup".into()))
            .unwrap();
        assert_eq!(event.notes.as_deref(), Some("standup"));
        assert!(controller.status().is_online());

        controller.record(EventKind::CheckOut, None).unwrap();
        assert_eq!(*controller.status(), ActivityStatus::Offline);
    }

    #[test]
    fn queries_reflect_recorded_events() {
        use chrono::Datelike;

        let mut controller = StatusController::initialize(MemoryStore::empty()).unwrap();
        controller.toggle().unwrap();
        controller.toggle().unwrap();

        let today = Local::now().date_naive();
        let view = controller.query(today);
        assert_eq!(view.events.len(), 2);
        assert!(view.total.is_some());

        let month = YearMonth::containing(today);
        assert!(controller.active_days(month).contains(&today.day()));
        assert!(controller.query_month(month) >= Duration::zero());
    }
}
