use std::ops::RangeInclusive;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::Duration;

use log::trace;
use rand::Rng;
use rand::rngs::StdRng;

use crate::sync::{Coordinator, WorkerId};

/// The part of a worker shared with the coordinator: an identity, the
/// per-worker increment, and the accumulated counter.
///
/// The counter is written only by the owning worker thread, outside any
/// lock, and only between permit and report; loads are free-running and
/// meant for display, which is why relaxed ordering is enough.
pub struct WorkerHandle {
    id: WorkerId,
    increment: u64,
    counter: AtomicU64,
}

impl WorkerHandle {
    pub fn new(id: WorkerId, increment: u64) -> Self {
        Self {
            id,
            increment,
            counter: AtomicU64::new(0),
        }
    }

    pub fn id(&self) -> WorkerId {
        self.id
    }

    pub fn increment(&self) -> u64 {
        self.increment
    }

    pub fn counter(&self) -> u64 {
        self.counter.load(Ordering::Relaxed)
    }

    fn add_increment(&self) {
        self.counter.fetch_add(self.increment, Ordering::Relaxed);
    }
}

/// One worker of the pool: a private quota of work units, performed one
/// per round under the coordinator's barrier.
pub struct Worker {
    handle: Arc<WorkerHandle>,
    coordinator: Arc<Coordinator>,
    quota: u32,
    pause: RangeInclusive<u64>,
    rng: StdRng,
}

impl Worker {
    /// Creates the worker and registers it with the coordinator in the
    /// blocked state, so it cannot run ahead of the first release even
    /// though its thread does not exist yet.
    pub fn new(
        id: WorkerId,
        increment: u64,
        quota: u32,
        pause: RangeInclusive<u64>,
        rng: StdRng,
        coordinator: Arc<Coordinator>,
    ) -> Self {
        let handle = Arc::new(WorkerHandle::new(id, increment));
        coordinator.register(handle.clone());
        Self {
            handle,
            coordinator,
            quota,
            pause,
            rng,
        }
    }

    pub fn handle(&self) -> Arc<WorkerHandle> {
        self.handle.clone()
    }

    pub fn quota(&self) -> u32 {
        self.quota
    }

    /// Starts the worker's thread. The returned handle resolves when the
    /// worker has deregistered and exited.
    pub fn spawn(self) -> thread::JoinHandle<()> {
        let name = format!("worker-{}", self.handle.id());
        thread::Builder::new()
            .name(name)
            .spawn(move || self.run())
            .expect("failed to spawn worker thread")
    }

    /// Repeatedly: get a permit, do one unit of work, settle. The final
    /// unit settles through `deregister` instead of `report_completion`,
    /// removing this worker from the barrier in the same critical section.
    fn run(mut self) {
        for unit in 1..=self.quota {
            self.coordinator.request_permit(&self.handle);
            self.pause_for_work();
            self.handle.add_increment();
            trace!(
                "worker {} finished unit {}/{}",
                self.handle.id(),
                unit,
                self.quota,
            );
            if unit < self.quota {
                self.coordinator.report_completion(&self.handle);
            }
        }
        self.coordinator.deregister(&self.handle);
    }

    /// Simulates variable-latency work. Runs strictly outside the
    /// coordinator's lock, so a slow unit delays only the round, never
    /// other workers' permit and report calls.
    fn pause_for_work(&mut self) {
        let millis = self.rng.random_range(self.pause.clone());
        if millis > 0 {
            thread::sleep(Duration::from_millis(millis));
        }
    }
}
