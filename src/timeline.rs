//! Cancellable one-shot scheduling on a caller-supplied millisecond clock.
//!
//! Nothing in here owns a platform timer. The host asks for [`Timeline::next_deadline`],
//! arms a single timer for it, and feeds the current time back through
//! [`Timeline::drain_due`]. Cancelling an entry removes it, so a late platform timer
//! can only ever find work that is still valid.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Entry<A> {
    id: TimerId,
    due_at: u64,
    action: A,
}

#[derive(Debug)]
pub struct Timeline<A> {
    next_id: u64,
    entries: Vec<Entry<A>>,
}

impl<A> Default for Timeline<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Timeline<A> {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            entries: Vec::new(),
        }
    }

    pub fn schedule(&mut self, now_ms: u64, delay_ms: u64, action: A) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            due_at: now_ms.saturating_add(delay_ms),
            action,
        });
        id
    }

    /// Returns `false` when the entry already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.entries.len();
        self.entries.clear();
        cancelled
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.entries.iter().map(|entry| entry.due_at).min()
    }

    /// Removes and returns every action due at or before `now_ms`, earliest first.
    /// Entries sharing a deadline come out in scheduling order.
    pub fn drain_due(&mut self, now_ms: u64) -> Vec<A> {
        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|entry| entry.due_at <= now_ms);
        self.entries = pending;

        due.sort_by_key(|entry| (entry.due_at, entry.id));
        due.into_iter().map(|entry| entry.action).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Finished,
    Aborted,
}

/// Ordered `(delay_ms, step)` pairs, each delay measured from the previous step.
///
/// A runner starts at most once. After [`SequenceRunner::abort`] it never yields again.
#[derive(Debug)]
pub struct SequenceRunner<A> {
    steps: Vec<(u64, A)>,
    state: RunState,
    anchor_ms: u64,
    next: usize,
}

impl<A: Clone> SequenceRunner<A> {
    pub fn new(steps: Vec<(u64, A)>) -> Self {
        Self {
            steps,
            state: RunState::Idle,
            anchor_ms: 0,
            next: 0,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == RunState::Finished
    }

    /// Returns `false` unless the runner was idle.
    pub fn start(&mut self, now_ms: u64) -> bool {
        if self.state != RunState::Idle {
            return false;
        }

        self.anchor_ms = now_ms;
        self.next = 0;
        self.state = if self.steps.is_empty() {
            RunState::Finished
        } else {
            RunState::Running
        };
        true
    }

    pub fn next_deadline(&self) -> Option<u64> {
        if self.state != RunState::Running {
            return None;
        }

        self.steps
            .get(self.next)
            .map(|(delay, _)| self.anchor_ms.saturating_add(*delay))
    }

    /// Yields every step whose deadline has passed. Deadlines chain off the previous
    /// step's deadline, not off the time `poll` happened to run.
    pub fn poll(&mut self, now_ms: u64) -> Vec<A> {
        let mut fired = Vec::new();

        while self.state == RunState::Running {
            let Some((delay, step)) = self.steps.get(self.next) else {
                self.state = RunState::Finished;
                break;
            };

            let due_at = self.anchor_ms.saturating_add(*delay);
            if due_at > now_ms {
                break;
            }

            fired.push(step.clone());
            self.anchor_ms = due_at;
            self.next += 1;

            if self.next == self.steps.len() {
                self.state = RunState::Finished;
            }
        }

        fired
    }

    /// Yields every remaining step at once. Only valid while running.
    pub fn finish_now(&mut self) -> Vec<A> {
        if self.state != RunState::Running {
            return Vec::new();
        }

        let remaining = self.steps[self.next..]
            .iter()
            .map(|(_, step)| step.clone())
            .collect();
        self.next = self.steps.len();
        self.state = RunState::Finished;
        remaining
    }

    pub fn abort(&mut self) -> bool {
        match self.state {
            RunState::Idle | RunState::Running => {
                self.state = RunState::Aborted;
                true
            }
            RunState::Finished | RunState::Aborted => false,
        }
    }
}
