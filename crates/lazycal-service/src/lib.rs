//! Calendar queries over the stored event collection.

pub mod calendar;
pub mod error;
