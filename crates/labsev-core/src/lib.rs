//! labsev-core
//!
//! Pure domain types for the lab severity cohort: severity categories,
//! condition tags, patient records, and the record-level classification
//! rules. No I/O; this is the shared vocabulary of the dashboard.

pub mod classify;
pub mod error;
pub mod models;
pub mod schema;
