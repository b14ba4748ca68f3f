//! Event-accounting engine for the punch time tracker.
//!
//! This crate contains the fundamental types and logic for:
//! - Events: the append-only check-in/check-out log
//! - Accounting: pure derivation of status, day and month totals
//! - Control: the stateful façade that toggles status and persists events

pub mod accumulate;
mod controller;
mod event;
pub mod store;
pub mod types;

pub use accumulate::{ActivityStatus, DayView, day_view, days_with_activity, monthly_total, status_of};
pub use controller::{ControllerError, StatusController};
pub use event::{Event, EventKind, EventLog};
pub use store::{CorruptStateError, EventStore, LoadError, PersistenceError};
pub use types::{EventId, ValidationError, YearMonth};
