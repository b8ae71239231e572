//! lazycal - integration test support.
//!
//! Re-exports the workspace crates so integration tests can use a single
//! `lazycal_test::` path.

pub use lazycal_core as core;
pub use lazycal_recur as recur;
pub use lazycal_service as service;
pub use lazycal_store as store;

pub mod app {
    pub use lazycal_app::*;

    pub mod api {
        pub use lazycal_app::app::api::*;
    }
}
