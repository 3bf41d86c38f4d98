use std::time::{Duration, Instant};

use ahash::AHashMap;

use crate::{InputEvent, NodeId};

/// Quiet period a pointer event must survive before it is applied.
pub const HOVER_DEBOUNCE_DELAY: Duration = Duration::from_millis(50);

#[derive(Debug, Clone)]
struct Pending {
    event: InputEvent,
    deadline: Instant,
}

/// Per-marker debounce timers for pointer events.
///
/// Each marker owns exactly one pending slot: scheduling a new event for a
/// marker replaces its pending event and restarts its timer, which is what
/// collapses enter/leave flicker into the final event. Markers never interact.
/// The arena owns no clock; callers pass `now` in and drain due events from
/// their own loop.
#[derive(Debug)]
pub struct DebounceArena {
    delay: Duration,
    pending: AHashMap<NodeId, Pending>,
}

impl DebounceArena {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: AHashMap::new(),
        }
    }

    /// Queue `event` for `marker`, cancelling any event already pending on it.
    pub fn schedule(&mut self, marker: NodeId, event: InputEvent, now: Instant) {
        self.pending.insert(
            marker,
            Pending {
                event,
                deadline: now + self.delay,
            },
        );
    }

    /// Remove and return every event whose quiet period has elapsed, ordered
    /// by deadline (ties broken by marker id for determinism).
    pub fn drain_due(&mut self, now: Instant) -> Vec<InputEvent> {
        let mut due: Vec<(Instant, NodeId)> = self
            .pending
            .iter()
            .filter(|(_, p)| p.deadline <= now)
            .map(|(id, p)| (p.deadline, id.clone()))
            .collect();
        due.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1 .0.cmp(&b.1 .0)));

        due.into_iter()
            .filter_map(|(_, id)| self.pending.remove(&id).map(|p| p.event))
            .collect()
    }

    /// Earliest pending deadline, if any; what the driver should sleep until.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().map(|p| p.deadline).min()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl Default for DebounceArena {
    fn default() -> Self {
        Self::new(HOVER_DEBOUNCE_DELAY)
    }
}
