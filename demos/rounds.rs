use lockstep::{config::Config, pool::Pool};

// The classic run: 3 workers with increments 1, 10, 100, random quotas of
// 10..=20 units, random pauses up to 99 ms. Set RUST_LOG=lockstep=trace to
// watch the permit/report traffic under the progress lines.
fn main() {
    env_logger::init();

    let report = Pool::new(Config::default()).run();
    println!(
        "({} rounds, {} workers)",
        report.rounds(),
        report.final_counters.len(),
    );
}
