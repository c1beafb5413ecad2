//! Virtual-time scheduler.
//!
//! Keeps pending timers in a deadline-ordered queue. Nothing fires on its
//! own: a driver pulls due timers with [`SimScheduler::pop_due`], which also
//! moves the shared clock to each timer's deadline before handing it out.

use std::{
    collections::{BTreeMap, HashMap},
    time::Duration,
};

use castor_core::{Scheduler, Timer, TimerId, TimerTask};

use crate::SimEnv;

/// Queue key: deadline first, then scheduling sequence for stable ties.
type Slot = (Duration, u64);

#[derive(Debug, Clone, Copy)]
struct Entry {
    id: TimerId,
    task: TimerTask,
    period: Option<Duration>,
}

/// Deterministic [`Scheduler`] driven by virtual time.
pub struct SimScheduler {
    env: SimEnv,
    queue: BTreeMap<Slot, Entry>,
    slots: HashMap<TimerId, Slot>,
    next_id: u64,
    next_seq: u64,
}

impl SimScheduler {
    /// Create a scheduler on the clock of `env`.
    pub fn new(env: SimEnv) -> Self {
        Self { env, queue: BTreeMap::new(), slots: HashMap::new(), next_id: 1, next_seq: 0 }
    }

    /// Number of outstanding timers.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Deadline of the earliest outstanding timer.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Whether `id` is still scheduled.
    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.slots.contains_key(&id)
    }

    /// Remove and return the earliest timer due at or before `until`.
    ///
    /// Advances the shared clock to that timer's deadline. Repeating timers
    /// are re-armed one period later.
    pub fn pop_due(&mut self, until: Duration) -> Option<Timer> {
        let (&slot, _) = self.queue.iter().next().filter(|((deadline, _), _)| *deadline <= until)?;
        let entry = self.queue.remove(&slot)?;
        let (deadline, _) = slot;

        self.env.advance_to(deadline);
        self.slots.remove(&entry.id);

        if let Some(period) = entry.period {
            self.insert(deadline + period, entry);
        }

        Some(Timer { id: entry.id, task: entry.task })
    }

    fn allocate(&mut self) -> TimerId {
        let id = TimerId::new(self.next_id);
        self.next_id += 1;
        id
    }

    fn insert(&mut self, deadline: Duration, entry: Entry) {
        let slot = (deadline, self.next_seq);
        self.next_seq += 1;
        self.queue.insert(slot, entry);
        self.slots.insert(entry.id, slot);
    }
}

impl Scheduler for SimScheduler {
    fn after(&mut self, delay: Duration, task: TimerTask) -> TimerId {
        let id = self.allocate();
        let deadline = self.env.elapsed() + delay;
        self.insert(deadline, Entry { id, task, period: None });
        id
    }

    fn every(&mut self, period: Duration, task: TimerTask) -> TimerId {
        let id = self.allocate();
        let deadline = self.env.elapsed() + period;
        self.insert(deadline, Entry { id, task, period: Some(period) });
        id
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(slot) = self.slots.remove(&id) {
            self.queue.remove(&slot);
        }
    }

    fn cancel_all(&mut self) {
        self.queue.clear();
        self.slots.clear();
    }
}
