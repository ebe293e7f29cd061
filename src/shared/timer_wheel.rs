use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Handle to a scheduled task, used for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// Deferred-task queue driven by a virtual clock.
///
/// Nothing here sleeps. The owner advances the clock from its frame loop and
/// drains due tasks with `pop_due`. Each popped task moves the clock to its own
/// deadline, so a task scheduled while handling it is measured from the moment
/// it fired rather than from the end of the frame.
pub struct TimerWheel<T> {
    now: Duration,
    next_seq: u64,
    pending: BTreeMap<(Duration, u64), T>,
    deadlines: HashMap<u64, Duration>,
}

impl<T> TimerWheel<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            pending: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule `task` to become due `delay` after the current clock.
    pub fn schedule(&mut self, delay: Duration, task: T) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        let deadline = self.now + delay;
        self.pending.insert((deadline, seq), task);
        self.deadlines.insert(seq, deadline);
        TimerId(seq)
    }

    /// Cancel a pending task. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.deadlines.remove(&id.0) {
            Some(deadline) => self.pending.remove(&(deadline, id.0)).is_some(),
            None => false,
        }
    }

    /// Pop the earliest task whose deadline is at or before `until`.
    pub fn pop_due(&mut self, until: Duration) -> Option<T> {
        let (&(deadline, seq), _) = self.pending.first_key_value()?;
        if deadline > until {
            return None;
        }
        self.deadlines.remove(&seq);
        let task = self.pending.remove(&(deadline, seq))?;
        if deadline > self.now {
            self.now = deadline;
        }
        Some(task)
    }

    /// Move the clock forward once every due task has been drained.
    /// The clock never runs backwards.
    pub fn advance_to(&mut self, until: Duration) {
        if until > self.now {
            self.now = until;
        }
    }

    #[cfg(test)]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.deadlines.contains_key(&id.0)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
        self.deadlines.clear();
    }
}

impl<T> Default for TimerWheel<T> {
    fn default() -> Self {
        Self::new()
    }
}
