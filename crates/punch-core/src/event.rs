//! Check-in/check-out events and the append-only event log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{EventId, ValidationError};

/// The direction of a status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// The user went online.
    CheckIn,
    /// The user went offline.
    CheckOut,
}

impl EventKind {
    /// String representation, matching the persisted form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CheckIn => "CheckIn",
            Self::CheckOut => "CheckOut",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EventKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CheckIn" | "check-in" => Ok(Self::CheckIn),
            "CheckOut" | "check-out" => Ok(Self::CheckOut),
            _ => Err(ValidationError::InvalidEventKind {
                value: s.to_string(),
            }),
        }
    }
}

/// A recorded status change.
///
/// Events are immutable once created: the log they live in is append-only,
/// with no editing or deletion of past events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier, assigned at creation.
    pub id: EventId,
    /// Whether this was a check-in or a check-out.
    pub kind: EventKind,
    /// When the status change happened.
    pub timestamp: DateTime<Utc>,
    /// Optional free-text note attached at creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Event {
    /// Creates an event with a freshly generated ID.
    #[must_use]
    pub fn new(kind: EventKind, timestamp: DateTime<Utc>, notes: Option<String>) -> Self {
        Self {
            id: EventId::generate(),
            kind,
            timestamp,
            notes,
        }
    }
}

/// An ordered, append-only sequence of events.
///
/// Insertion order is creation order. It is NOT guaranteed to be sorted by
/// timestamp (the system clock may move backward between events), so
/// consumers sort by timestamp before pairing check-ins with check-outs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog(Vec<Event>);

impl EventLog {
    /// An empty log, as on first run.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Returns a new log with `event` placed at the end.
    ///
    /// The receiver is left untouched; callers holding the previous snapshot
    /// keep a valid view.
    #[must_use]
    pub fn append(&self, event: Event) -> Self {
        let mut events = self.0.clone();
        events.push(event);
        Self(events)
    }

    /// The events in insertion order.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.0
    }

    /// The most recently appended event, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Event> {
        self.0.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Event>> for EventLog {
    fn from(events: Vec<Event>) -> Self {
        Self(events)
    }
}

impl FromIterator<Event> for EventLog {
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
