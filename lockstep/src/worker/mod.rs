//! Workers: the units of concurrent execution driven by the barrier.

pub(crate) mod worker;

pub use worker::{
    Worker,
    WorkerHandle,
};
