//! The event store seam and its error taxonomy.
//!
//! The engine never talks to a concrete storage backend; the controller is
//! generic over [`EventStore`] so tests can inject in-memory or failing
//! stores without touching the filesystem.

use thiserror::Error;

use crate::event::EventLog;

/// Durable home for the event log.
///
/// `load` and `save` must appear atomic to callers: there is no observable
/// state where the log is half saved. Retrying transient I/O failures is an
/// implementation's choice; surfacing the error is sufficient.
pub trait EventStore {
    /// Reads the persisted log. Absence of any persisted data is an empty
    /// log, not an error.
    fn load(&self) -> Result<EventLog, LoadError>;

    /// Serializes and durably writes the full log.
    fn save(&self, log: &EventLog) -> Result<(), PersistenceError>;
}

/// Persisted data exists but fails schema validation.
///
/// Never recovered locally: the initialization caller decides between
/// resetting and aborting, the engine does not guess.
#[derive(Debug, Error)]
pub enum CorruptStateError {
    /// The persisted document is not parseable at all.
    #[error("malformed state document: {0}")]
    Malformed(#[from] serde_json::Error),

    /// An event's timestamp is not a valid RFC 3339 instant.
    #[error("invalid timestamp for event {event_id}: {value:?}")]
    TimestampParse {
        event_id: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// An event carries a kind the schema does not know.
    #[error("unknown event kind for event {event_id}: {value:?}")]
    UnknownKind { event_id: String, value: String },

    /// An event has an empty or missing ID.
    #[error("event at position {index} has no ID")]
    MissingId { index: usize },

    /// Two events share an ID.
    #[error("duplicate event ID: {event_id}")]
    DuplicateId { event_id: String },
}

/// Failure to load persisted state.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The persisted data could not be read.
    #[error("failed to read persisted state: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted data was read but is not valid.
    #[error(transparent)]
    Corrupt(#[from] CorruptStateError),
}

/// The durable-write step failed; the triggering mutation must be rolled
/// back by the caller so no accepted event exists only in memory.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Writing the serialized log failed.
    #[error("failed to write persisted state: {0}")]
    Io(#[from] std::io::Error),

    /// The log could not be serialized.
    #[error("failed to serialize event log: {0}")]
    Serialize(#[from] serde_json::Error),
}
