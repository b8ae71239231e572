//! Event storage: the contract the aggregator and HTTP API read and write
//! through, plus its local, in-memory and remote variants.

pub mod error;
pub mod store;
