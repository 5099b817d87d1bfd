use std::time::{Duration, Instant};

/// Identifies one scheduled deferred task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Deferred {
    id: TimerId,
    due: Instant,
}

/// A single outstanding deferred task. Starting a new one cancels the old.
#[derive(Debug, Default)]
pub struct TimerSlot {
    next_id: u64,
    pending: Option<Deferred>,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule the task `delay` after `now`, replacing any pending one.
    pub fn start(&mut self, now: Instant, delay: Duration) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending = Some(Deferred {
            id,
            due: now + delay,
        });
        id
    }

    /// Drop the pending task, if any.
    pub fn cancel(&mut self) -> Option<TimerId> {
        self.pending.take().map(|deferred| deferred.id)
    }

    pub fn pending(&self) -> Option<TimerId> {
        self.pending.map(|deferred| deferred.id)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|deferred| deferred.due)
    }

    /// Take the pending task if it is due at `now`.
    pub fn take_due(&mut self, now: Instant) -> Option<TimerId> {
        match self.pending {
            Some(deferred) if deferred.due <= now => {
                self.pending = None;
                Some(deferred.id)
            }
            _ => None,
        }
    }
}
