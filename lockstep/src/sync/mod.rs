//! The master-owned barrier keeping the pool in lockstep rounds.

pub(crate) mod coordinator;

pub use coordinator::{
    Coordinator,
    RoundSnapshot,
    WorkerId,
};
