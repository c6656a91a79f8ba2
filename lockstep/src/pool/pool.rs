use std::sync::Arc;

use log::info;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

use crate::config::Config;
use crate::sync::{Coordinator, RoundSnapshot, WorkerId};
use crate::worker::Worker;

/// Everything observable about a finished run: the snapshot taken at each
/// barrier release, and each worker's counter after the pool drained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub snapshots: Vec<RoundSnapshot>,
    pub final_counters: Vec<(WorkerId, u64)>,
}

impl RunReport {
    pub fn rounds(&self) -> usize {
        self.snapshots.len()
    }
}

/// The master side of a run: creates the workers, drives the barrier until
/// the pool drains, and reports progress on stdout.
pub struct Pool {
    config: Config,
}

impl Pool {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn run(self) -> RunReport {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let coordinator = Arc::new(Coordinator::new());

        // Create and register every worker (blocked) before any thread
        // starts, then spawn them all.
        let mut increment = self.config.first_increment;
        let mut handles = Vec::with_capacity(self.config.workers);
        let mut joins = Vec::with_capacity(self.config.workers);
        for id in 0..self.config.workers {
            let quota = rng.random_range(self.config.quota.clone());
            let worker = Worker::new(
                id,
                increment,
                quota,
                self.config.pause.clone(),
                StdRng::seed_from_u64(rng.random()),
                coordinator.clone(),
            );
            println!("Worker {} will do {} units.", id, quota);
            handles.push(worker.handle());
            joins.push(worker.spawn());
            increment = increment.saturating_mul(self.config.increment_multiplier);
        }
        info!("pool started with {} workers", self.config.workers);

        let mut snapshots = Vec::new();
        while let Some(snapshot) = coordinator.release_barrier() {
            let line: Vec<String> = snapshot
                .counters
                .iter()
                .map(|(id, counter)| format!("Worker {} -> {}", id, counter))
                .collect();
            println!("{}", line.join("    "));
            snapshots.push(snapshot);
        }

        for join in joins {
            join.join().expect("worker thread panicked");
        }
        println!("Master thread dies.");

        RunReport {
            snapshots,
            final_counters: handles
                .iter()
                .map(|handle| (handle.id(), handle.counter()))
                .collect(),
        }
    }
}
