//! Storage layer for the punch time tracker.
//!
//! Persists the event log as a single JSON document (schema v1):
//!
//! ```json
//! { "events": [ { "id": "...", "kind": "CheckIn",
//!                 "timestamp": "2024-01-05T09:00:00.000+00:00",
//!                 "notes": "optional" } ] }
//! ```
//!
//! # Timestamp Format
//!
//! Timestamps are stored as RFC 3339 strings with an explicit offset at
//! millisecond precision. The offset is what makes the representation an
//! unambiguous absolute instant: a reader in any timezone reconstructs the
//! exact same moment. Parsing accepts any offset and normalizes to UTC.
//!
//! # Schema Evolution
//!
//! There is a single schema version and no migration path. Unknown fields
//! in the document are ignored rather than rejected, so a newer writer's
//! additions do not break this reader.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use punch_core::{
    CorruptStateError, Event, EventId, EventKind, EventLog, EventStore, LoadError,
    PersistenceError,
};

/// The persisted document. Unknown fields are tolerated on read.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StateDocument {
    events: Vec<StoredEvent>,
}

/// A raw persisted event, validated field-by-field into an [`Event`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredEvent {
    #[serde(default)]
    id: String,
    kind: String,
    timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
}

impl StoredEvent {
    fn from_event(event: &Event) -> Self {
        Self {
            id: event.id.to_string(),
            kind: event.kind.as_str().to_string(),
            timestamp: event
                .timestamp
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            notes: event.notes.clone(),
        }
    }

    /// Validates this record into a domain event.
    ///
    /// `index` is the record's position in the document, used to report
    /// events that are missing an ID.
    fn into_event(self, index: usize) -> Result<Event, CorruptStateError> {
        let id = EventId::new(self.id).map_err(|_| CorruptStateError::MissingId { index })?;

        let kind: EventKind =
            self.kind
                .parse()
                .map_err(|_| CorruptStateError::UnknownKind {
                    event_id: id.to_string(),
                    value: self.kind,
                })?;

        let timestamp = DateTime::parse_from_rfc3339(&self.timestamp)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|source| CorruptStateError::TimestampParse {
                event_id: id.to_string(),
                value: self.timestamp,
                source,
            })?;

        Ok(Event {
            id,
            kind,
            timestamp,
            notes: self.notes,
        })
    }
}

/// File-backed event store.
///
/// Saves are atomic: the document is written to a temporary file in the
/// same directory and renamed over the target, so readers never observe a
/// half-written log.
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    /// Creates a store backed by the given file path.
    ///
    /// The file does not have to exist yet; a missing file loads as an
    /// empty log.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path this store reads and writes.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse(content: &str) -> Result<EventLog, CorruptStateError> {
        let document: StateDocument = serde_json::from_str(content)?;

        let mut seen = std::collections::HashSet::with_capacity(document.events.len());
        let mut events = Vec::with_capacity(document.events.len());
        for (index, stored) in document.events.into_iter().enumerate() {
            let event = stored.into_event(index)?;
            if !seen.insert(event.id.clone()) {
                return Err(CorruptStateError::DuplicateId {
                    event_id: event.id.to_string(),
                });
            }
            events.push(event);
        }

        Ok(EventLog::from(events))
    }
}

impl EventStore for StateFile {
    fn load(&self) -> Result<EventLog, LoadError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no persisted state, starting empty");
                return Ok(EventLog::new());
            }
            Err(e) => return Err(e.into()),
        };

        let log = Self::parse(&content)?;
        tracing::debug!(path = %self.path.display(), events = log.len(), "loaded event log");
        Ok(log)
    }

    fn save(&self, log: &EventLog) -> Result<(), PersistenceError> {
        let document = StateDocument {
            events: log.events().iter().map(StoredEvent::from_event).collect(),
        };
        let content = serde_json::to_string_pretty(&document)?;

        // Write to a sibling temp file, then rename (atomic on same filesystem).
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, &content)?;
        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        tracing::debug!(path = %self.path.display(), events = log.len(), "saved event log");
        Ok(())
    }
}
