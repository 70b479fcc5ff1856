//! Event clock and totally ordered event queue
//!
//! The scheduler holds the simulated clock and every pending event. Events are
//! dispatched in nondecreasing timestamp order; events sharing a timestamp are
//! ordered by `(rank, insertion id)` so that identical runs replay identically
//! and the model can state which kind wins a same-instant race.

use std::cell::Cell;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;
use tracing::trace;

use crate::error::EventError;
use crate::time::SimTime;
use crate::types::EventId;

/// Event payload contract for the scheduler.
///
/// `rank` breaks ties among events scheduled for the same instant: lower ranks
/// are dispatched first, and equal ranks fall back to insertion order. The
/// default rank makes insertion order the only tie-break.
pub trait Payload: fmt::Debug {
    fn rank(&self) -> u8 {
        0
    }
}

/// Entry stored in the scheduler: the payload plus the time it fires at and
/// the id that doubles as the FIFO tie-break.
#[derive(Debug)]
pub struct EventEntry<P> {
    id: EventId,
    time: SimTime,
    rank: u8,
    payload: P,
}

impl<P> EventEntry<P> {
    pub fn id(&self) -> EventId {
        self.id
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }

    pub fn into_payload(self) -> P {
        self.payload
    }
}

impl<P> PartialEq for EventEntry<P> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<P> Eq for EventEntry<P> {}

impl<P> PartialOrd for EventEntry<P> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<P> Ord for EventEntry<P> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for min-heap behavior in BinaryHeap: earliest time first,
        // then lowest rank, then lowest (oldest) id.
        other
            .time
            .cmp(&self.time)
            .then_with(|| other.rank.cmp(&self.rank))
            .then_with(|| other.id.cmp(&self.id))
    }
}

type Clock = Rc<Cell<SimTime>>;

/// Immutable access to the simulation clock.
///
/// The clock itself is owned by the scheduler; collaborators hold a `ClockRef`
/// to read the current simulation time.
pub struct ClockRef {
    clock: Clock,
}

impl ClockRef {
    /// Return the current simulation time.
    #[must_use]
    pub fn time(&self) -> SimTime {
        self.clock.get()
    }
}

/// Scheduler keeps the current time and the ordered set of upcoming events.
pub struct Scheduler<P> {
    next_event_id: u64,
    events: BinaryHeap<EventEntry<P>>,
    /// Handles scheduled but not yet fired or cancelled.
    live: HashSet<EventId>,
    /// Handles cancelled before firing. Entries are dropped lazily by `pop`.
    cancelled: HashSet<EventId>,
    clock: Clock,
}

impl<P> Default for Scheduler<P> {
    fn default() -> Self {
        Self {
            next_event_id: 0,
            events: BinaryHeap::default(),
            live: HashSet::default(),
            cancelled: HashSet::default(),
            clock: Rc::new(Cell::new(SimTime::default())),
        }
    }
}

impl<P: Payload> Scheduler<P> {
    /// Schedules `payload` to fire at the absolute time `time`.
    ///
    /// Returns the handle that can later be passed to [`Scheduler::cancel`].
    /// Scheduling earlier than the current simulated time is a programming
    /// bug and is rejected, never silently reordered.
    pub fn schedule_at(&mut self, time: SimTime, payload: P) -> Result<EventId, EventError> {
        let now = self.time();
        if time < now {
            return Err(EventError::ScheduleInPast {
                requested: time,
                now,
            });
        }
        self.next_event_id += 1;
        let id = EventId(self.next_event_id);
        trace!(event_id = %id, time = %time, payload = ?payload, "Event scheduled");
        self.live.insert(id);
        self.events.push(EventEntry {
            id,
            time,
            rank: payload.rank(),
            payload,
        });
        Ok(id)
    }

    /// Schedules `payload` to fire at `self.time() + delay`.
    pub fn schedule_in(&mut self, delay: Duration, payload: P) -> EventId {
        let time = self.time() + delay;
        // Relative delays never land in the past.
        self.schedule_at(time, payload)
            .expect("relative schedule cannot precede current time")
    }

    /// Cancels a previously scheduled event before it fires.
    ///
    /// Cancelling an event that already fired or was already cancelled is a
    /// no-op. Cancelling a handle this scheduler never issued is an error: it
    /// signals a bookkeeping bug in the caller.
    pub fn cancel(&mut self, id: EventId) -> Result<(), EventError> {
        if id.0 == 0 || id.0 > self.next_event_id {
            return Err(EventError::UnknownHandle(id));
        }
        if self.live.remove(&id) {
            trace!(event_id = %id, "Event cancelled");
            self.cancelled.insert(id);
        }
        Ok(())
    }

    /// Removes and returns the next pending event, advancing the clock to its
    /// timestamp, or `None` once the queue is drained.
    pub fn pop(&mut self) -> Option<EventEntry<P>> {
        while let Some(entry) = self.events.pop() {
            if self.cancelled.remove(&entry.id) {
                continue;
            }
            self.live.remove(&entry.id);
            self.clock.replace(entry.time);
            return Some(entry);
        }
        None
    }

    /// Returns the timestamp of the next pending event without dispatching it.
    pub fn peek_time(&mut self) -> Option<SimTime> {
        while let Some(entry) = self.events.peek() {
            if self.cancelled.remove(&entry.id) {
                self.events.pop();
                continue;
            }
            return Some(entry.time);
        }
        None
    }

    /// Returns the current simulation time.
    #[must_use]
    pub fn time(&self) -> SimTime {
        self.clock.get()
    }

    /// Returns a structure with immutable access to the simulation time.
    #[must_use]
    pub fn clock(&self) -> ClockRef {
        ClockRef {
            clock: Rc::clone(&self.clock),
        }
    }

    /// Number of pending (not yet fired or cancelled) events.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.live.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TestEvent {
        Fast(u32),
        Slow(u32),
    }

    impl Payload for TestEvent {
        fn rank(&self) -> u8 {
            match self {
                TestEvent::Fast(_) => 0,
                TestEvent::Slow(_) => 1,
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Plain(u32);

    impl Payload for Plain {}

    #[test]
    fn test_pop_advances_clock_in_time_order() {
        let mut scheduler = Scheduler::default();
        scheduler
            .schedule_at(SimTime::from_minutes(2), Plain(2))
            .unwrap();
        scheduler
            .schedule_at(SimTime::from_minutes(1), Plain(1))
            .unwrap();
        scheduler
            .schedule_at(SimTime::from_minutes(3), Plain(3))
            .unwrap();

        assert_eq!(scheduler.time(), SimTime::zero());
        assert_eq!(scheduler.pending(), 3);

        let entry = scheduler.pop().unwrap();
        assert_eq!(*entry.payload(), Plain(1));
        assert_eq!(scheduler.time(), SimTime::from_minutes(1));
        assert_eq!(scheduler.clock().time(), SimTime::from_minutes(1));

        let entry = scheduler.pop().unwrap();
        assert_eq!(*entry.payload(), Plain(2));

        let entry = scheduler.pop().unwrap();
        assert_eq!(*entry.payload(), Plain(3));
        assert_eq!(scheduler.time(), SimTime::from_minutes(3));

        assert!(scheduler.pop().is_none());
    }

    #[test]
    fn test_same_time_events_pop_in_insertion_order() {
        let mut scheduler = Scheduler::default();
        let t = SimTime::from_minutes(5);
        for i in 0..100 {
            scheduler.schedule_at(t, Plain(i)).unwrap();
        }
        for i in 0..100 {
            assert_eq!(*scheduler.pop().unwrap().payload(), Plain(i));
        }
    }

    #[test]
    fn test_rank_beats_insertion_order_at_equal_time() {
        let mut scheduler = Scheduler::default();
        let t = SimTime::from_minutes(1);
        scheduler.schedule_at(t, TestEvent::Slow(1)).unwrap();
        scheduler.schedule_at(t, TestEvent::Fast(2)).unwrap();
        scheduler.schedule_at(t, TestEvent::Slow(3)).unwrap();
        scheduler.schedule_at(t, TestEvent::Fast(4)).unwrap();

        assert_eq!(*scheduler.pop().unwrap().payload(), TestEvent::Fast(2));
        assert_eq!(*scheduler.pop().unwrap().payload(), TestEvent::Fast(4));
        assert_eq!(*scheduler.pop().unwrap().payload(), TestEvent::Slow(1));
        assert_eq!(*scheduler.pop().unwrap().payload(), TestEvent::Slow(3));
    }

    #[test]
    fn test_rank_does_not_cross_timestamps() {
        let mut scheduler = Scheduler::default();
        scheduler
            .schedule_at(SimTime::from_minutes(1), TestEvent::Slow(1))
            .unwrap();
        scheduler
            .schedule_at(SimTime::from_minutes(2), TestEvent::Fast(2))
            .unwrap();

        assert_eq!(*scheduler.pop().unwrap().payload(), TestEvent::Slow(1));
        assert_eq!(*scheduler.pop().unwrap().payload(), TestEvent::Fast(2));
    }

    #[test]
    fn test_schedule_in_past_is_rejected() {
        let mut scheduler = Scheduler::default();
        scheduler
            .schedule_at(SimTime::from_minutes(10), Plain(1))
            .unwrap();
        scheduler.pop().unwrap();
        assert_eq!(scheduler.time(), SimTime::from_minutes(10));

        let err = scheduler
            .schedule_at(SimTime::from_minutes(5), Plain(2))
            .unwrap_err();
        assert!(matches!(err, EventError::ScheduleInPast { .. }));

        // Scheduling exactly at the current time is allowed.
        scheduler
            .schedule_at(SimTime::from_minutes(10), Plain(3))
            .unwrap();
    }

    #[test]
    fn test_cancel_removes_pending_event() {
        let mut scheduler = Scheduler::default();
        let keep = scheduler
            .schedule_at(SimTime::from_minutes(1), Plain(1))
            .unwrap();
        let drop = scheduler
            .schedule_at(SimTime::from_minutes(2), Plain(2))
            .unwrap();
        let _ = keep;

        scheduler.cancel(drop).unwrap();
        assert_eq!(scheduler.pending(), 1);

        assert_eq!(*scheduler.pop().unwrap().payload(), Plain(1));
        assert!(scheduler.pop().is_none());
    }

    #[test]
    fn test_cancel_fired_or_cancelled_is_noop() {
        let mut scheduler = Scheduler::default();
        let id = scheduler
            .schedule_at(SimTime::from_minutes(1), Plain(1))
            .unwrap();
        scheduler.pop().unwrap();

        // Already fired: no-op, not an error.
        scheduler.cancel(id).unwrap();

        let id2 = scheduler
            .schedule_at(SimTime::from_minutes(2), Plain(2))
            .unwrap();
        scheduler.cancel(id2).unwrap();
        // Double cancel: no-op.
        scheduler.cancel(id2).unwrap();
        assert!(scheduler.pop().is_none());
    }

    #[test]
    fn test_cancel_unknown_handle_is_error() {
        let mut scheduler: Scheduler<Plain> = Scheduler::default();
        let err = scheduler.cancel(EventId(42)).unwrap_err();
        assert!(matches!(err, EventError::UnknownHandle(EventId(42))));
    }

    #[test]
    fn test_peek_time_skips_cancelled() {
        let mut scheduler = Scheduler::default();
        let first = scheduler
            .schedule_at(SimTime::from_minutes(1), Plain(1))
            .unwrap();
        scheduler
            .schedule_at(SimTime::from_minutes(2), Plain(2))
            .unwrap();

        scheduler.cancel(first).unwrap();
        assert_eq!(scheduler.peek_time(), Some(SimTime::from_minutes(2)));
        // Peek does not advance the clock.
        assert_eq!(scheduler.time(), SimTime::zero());
    }
}
