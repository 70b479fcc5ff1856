//! Core type definitions and newtypes for the simulation engine

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for events in the simulation
///
/// Ids are issued in insertion order by the scheduler, which makes them the
/// deterministic tie-break for events sharing a timestamp and rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(pub u64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Event({})", self.0)
    }
}
