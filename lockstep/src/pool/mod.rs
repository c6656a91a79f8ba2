//! Pool setup, the master's driving loop, and run reporting.

pub(crate) mod pool;

pub use pool::{
    Pool,
    RunReport,
};

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::config::Config;
    use crate::sync::Coordinator;
    use crate::worker::Worker;

    use super::*;

    fn fast_config() -> Config {
        Config {
            pause: 0..=0,
            seed: Some(42),
            ..Config::default()
        }
    }

    #[test]
    fn empty_pool_run_terminates() {
        let report = Pool::new(Config {
            workers: 0,
            ..fast_config()
        })
        .run();
        assert_eq!(report.rounds(), 0);
        assert!(report.final_counters.is_empty());
    }

    #[test]
    fn fixed_quota_run_reports_one_round_per_unit() {
        let report = Pool::new(Config {
            workers: 3,
            quota: 1..=1,
            ..fast_config()
        })
        .run();
        assert_eq!(report.rounds(), 1);
        assert_eq!(report.snapshots[0].counters, vec![(0, 0), (1, 0), (2, 0)]);
        assert_eq!(report.final_counters, vec![(0, 1), (1, 10), (2, 100)]);
    }

    #[test]
    fn uneven_quotas_shrink_the_rounds() {
        // The original scenario: quotas 2, 3, 2 with increments 1, 10, 100.
        let coordinator = Arc::new(Coordinator::new());
        let quotas = [2, 3, 2];
        let increments = [1, 10, 100];
        let mut handles = Vec::new();
        let mut joins = Vec::new();
        for id in 0..3 {
            let worker = Worker::new(
                id,
                increments[id],
                quotas[id],
                0..=0,
                StdRng::seed_from_u64(id as u64),
                coordinator.clone(),
            );
            handles.push(worker.handle());
            joins.push(worker.spawn());
        }

        let mut snapshots = Vec::new();
        while let Some(snapshot) = coordinator.release_barrier() {
            snapshots.push(snapshot);
        }
        for join in joins {
            join.join().unwrap();
        }

        // Exactly max(quotas) rounds; workers with smaller quotas leave
        // the pool before the last release and stop appearing.
        assert_eq!(snapshots.len(), 3);
        assert_eq!(snapshots[0].counters, vec![(0, 0), (1, 0), (2, 0)]);
        assert_eq!(snapshots[1].counters, vec![(0, 1), (1, 10), (2, 100)]);
        assert_eq!(snapshots[2].counters, vec![(1, 20)]);

        let finals: Vec<u64> = handles.iter().map(|h| h.counter()).collect();
        assert_eq!(finals, vec![2, 30, 200]);
        assert_eq!(coordinator.live_workers(), 0);
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let config = Config {
            workers: 4,
            quota: 2..=5,
            pause: 0..=2,
            seed: Some(7),
            ..Config::default()
        };
        let first = Pool::new(config.clone()).run();
        let second = Pool::new(config).run();
        assert_eq!(first, second);
    }
}
