//! Shared model, configuration and error types for the lazycal workspace.

pub mod config;
pub mod constants;
pub mod error;
pub mod model;
