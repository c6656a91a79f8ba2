use lockstep::{config::Config, pool::Pool};

// Two runs from the same seed produce the same quotas, the same round
// snapshots, and the same final counters, even with real pauses.
fn main() {
    env_logger::init();

    let config = Config {
        seed: Some(0xC0FFEE),
        pause: 0..=20,
        quota: 3..=6,
        ..Config::default()
    };

    let first = Pool::new(config.clone()).run();
    let second = Pool::new(config).run();

    assert_eq!(first, second);
    println!("both runs took {} rounds; reports are identical", first.rounds());
}
