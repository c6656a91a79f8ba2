use std::sync::{Arc, Condvar, Mutex};

use log::{debug, trace};

use crate::worker::WorkerHandle;

pub type WorkerId = usize;

struct LiveWorker {
    handle: Arc<WorkerHandle>,
    /// True while the worker has settled after its current unit and is
    /// waiting for the next release.
    blocked: bool,
}

struct CoordinatorCore {
    live: Vec<LiveWorker>,
    rounds: usize,
}

/// The master barrier. One lock and one condition serialize every touch of
/// the live set and of the per-worker blocked flags; all waiting re-checks
/// its predicate in a loop, so spurious wakeups and a live set that shrank
/// mid-wait are both harmless.
pub struct Coordinator {
    core: Mutex<CoordinatorCore>,
    cond: Condvar,
}

/// Progress snapshot taken at the instant of a barrier release, before any
/// worker starts its next unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSnapshot {
    /// 1-based index of the round this release starts.
    pub round: usize,
    /// `(id, counter)` for every worker live at release time, in
    /// registration order.
    pub counters: Vec<(WorkerId, u64)>,
}

impl Coordinator {
    pub fn new() -> Self {
        Self {
            core: Mutex::new(CoordinatorCore {
                live: Vec::new(),
                rounds: 0,
            }),
            cond: Condvar::new(),
        }
    }

    /// Adds a worker to the pool in the blocked state. Must happen before
    /// the worker's thread starts, so it cannot race ahead of the first
    /// release.
    pub fn register(&self, handle: Arc<WorkerHandle>) {
        let mut core = self.core.lock().unwrap();
        assert!(
            core.live.iter().all(|w| w.handle.id() != handle.id()),
            "worker {} is already registered",
            handle.id(),
        );
        trace!("worker {} registered (blocked)", handle.id());
        core.live.push(LiveWorker {
            handle,
            blocked: true,
        });
    }

    /// Called by a worker to get permission for its next unit of work.
    /// Blocks until the barrier has released this worker; observes state
    /// only, mutates nothing.
    pub fn request_permit(&self, worker: &WorkerHandle) {
        let mut core = self.core.lock().unwrap();
        trace!("worker {} is asking for a work permit", worker.id());
        while core.is_blocked(worker.id()) {
            core = self.cond.wait(core).unwrap();
        }
        trace!("worker {} got a work permit", worker.id());
    }

    /// Called by a worker right after finishing a (non-final) unit of
    /// work: the worker settles back into the blocked state and everyone
    /// waiting on the "all settled" condition gets a chance to re-check.
    pub fn report_completion(&self, worker: &WorkerHandle) {
        let mut core = self.core.lock().unwrap();
        core.set_blocked(worker.id());
        debug!(
            "worker {} has done a unit and is now blocked",
            worker.id(),
        );
        self.cond.notify_all();
    }

    /// The master's loop body: waits until every live worker is blocked,
    /// snapshots their counters, then releases them all for one more unit.
    ///
    /// Returns `None` once the pool has drained. The predicate is always
    /// evaluated against the current live set, so a worker deregistering
    /// mid-wait shrinks the target count instead of stalling the barrier.
    ///
    /// A released worker that never reports back stalls this method
    /// forever; that is the modeled behavior, and no timeout is applied
    /// here.
    pub fn release_barrier(&self) -> Option<RoundSnapshot> {
        let mut core = self.core.lock().unwrap();
        loop {
            if core.live.is_empty() {
                debug!("pool drained after {} rounds", core.rounds);
                return None;
            }
            if core.live.iter().all(|w| w.blocked) {
                break;
            }
            core = self.cond.wait(core).unwrap();
        }
        core.rounds += 1;
        let snapshot = RoundSnapshot {
            round: core.rounds,
            counters: core
                .live
                .iter()
                .map(|w| (w.handle.id(), w.handle.counter()))
                .collect(),
        };
        for w in &mut core.live {
            w.blocked = false;
        }
        debug!(
            "released round {} to {} workers",
            core.rounds,
            core.live.len(),
        );
        self.cond.notify_all();
        Some(snapshot)
    }

    /// Called by a worker once, after its last unit of work. Removal
    /// doubles as the final completion report: it happens in one critical
    /// section, so the barrier never waits on a departed worker and never
    /// releases an extra round to one.
    pub fn deregister(&self, worker: &WorkerHandle) {
        let mut core = self.core.lock().unwrap();
        let pos = core
            .live
            .iter()
            .position(|w| w.handle.id() == worker.id())
            .expect("deregistering a worker that is not registered");
        core.live.remove(pos);
        println!("* Worker {} has terminated.", worker.id());
        self.cond.notify_all();
    }

    /// Number of workers still in the pool.
    pub fn live_workers(&self) -> usize {
        self.core.lock().unwrap().live.len()
    }
}

impl CoordinatorCore {
    fn is_blocked(&self, id: WorkerId) -> bool {
        self.live
            .iter()
            .find(|w| w.handle.id() == id)
            .expect("requesting a permit for a worker that is not registered")
            .blocked
    }

    fn set_blocked(&mut self, id: WorkerId) {
        self.live
            .iter_mut()
            .find(|w| w.handle.id() == id)
            .expect("reporting completion for a worker that is not registered")
            .blocked = true;
    }
}
