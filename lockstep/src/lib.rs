//! Lockstep is a library for driving a fixed pool of worker threads in
//! coordinated rounds: a single master barrier releases every live worker
//! for one unit of work, waits for all of them to settle, and repeats,
//! while workers whose quota is exhausted leave the pool for good.

pub mod config;
pub mod sync;
pub mod worker;
pub mod pool;
