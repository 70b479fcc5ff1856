//! Error types for the simulation engine

use crate::time::SimTime;
use crate::types::EventId;
use thiserror::Error;

/// Errors related to event scheduling
///
/// Both variants indicate a programming bug in the caller, not a recoverable
/// condition: simulated time never runs backwards, and a handle that was never
/// issued cannot be cancelled.
#[derive(Debug, Error)]
pub enum EventError {
    #[error("Event scheduling failed: cannot schedule event at {requested} before current time {now}")]
    ScheduleInPast { requested: SimTime, now: SimTime },

    #[error("Unknown event handle: {0} was never issued by this scheduler")]
    UnknownHandle(EventId),
}
