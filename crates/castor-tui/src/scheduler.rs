//! Tokio-backed timer scheduler.
//!
//! Each timer is a spawned task that sleeps and then sends a [`Timer`] into
//! an unbounded channel. The runtime's select loop receives from that
//! channel and hands timers to the engine, so the engine is never touched
//! from more than one task.

use std::{collections::HashMap, time::Duration};

use castor_core::{Scheduler, Timer, TimerId, TimerTask};
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{Instant, MissedTickBehavior},
};

/// [`Scheduler`] that delivers timers through a Tokio channel.
///
/// Must be used from within a Tokio runtime.
pub struct TokioScheduler {
    fired: mpsc::UnboundedSender<Timer>,
    handles: HashMap<TimerId, JoinHandle<()>>,
    next_id: u64,
}

impl TokioScheduler {
    /// Create a scheduler and the receiver fired timers arrive on.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Timer>) {
        let (fired, receiver) = mpsc::unbounded_channel();
        (Self { fired, handles: HashMap::new(), next_id: 1 }, receiver)
    }

    /// Timers spawned and not yet cancelled.
    pub fn pending(&self) -> usize {
        self.handles.len()
    }

    fn allocate(&mut self) -> TimerId {
        let id = TimerId::new(self.next_id);
        self.next_id += 1;
        id
    }
}

impl Scheduler for TokioScheduler {
    fn after(&mut self, delay: Duration, task: TimerTask) -> TimerId {
        let id = self.allocate();
        let fired = self.fired.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = fired.send(Timer { id, task });
        });
        self.handles.insert(id, handle);
        id
    }

    fn every(&mut self, period: Duration, task: TimerTask) -> TimerId {
        let id = self.allocate();
        let fired = self.fired.clone();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if fired.send(Timer { id, task }).is_err() {
                    break;
                }
            }
        });
        self.handles.insert(id, handle);
        id
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(handle) = self.handles.remove(&id) {
            handle.abort();
        }
    }

    fn cancel_all(&mut self) {
        for (_, handle) in self.handles.drain() {
            handle.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
