use lockstep::{config::Config, pool::Pool};

// A wider pool with uneven small quotas, to watch the barrier's population
// shrink: each round's progress line lists only the workers still alive.
fn main() {
    env_logger::init();

    let report = Pool::new(Config {
        workers: 8,
        first_increment: 1,
        increment_multiplier: 2,
        quota: 1..=5,
        pause: 0..=10,
        seed: None,
    })
    .run();

    for snapshot in &report.snapshots {
        println!("round {:>2}: {} workers were still alive", snapshot.round, snapshot.counters.len());
    }
}
