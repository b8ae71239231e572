//! Recurrence expansion for lazycal events.

pub mod expand;

pub use expand::{MAX_ITERATIONS, generate_instances};
