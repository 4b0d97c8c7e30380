//! labsev-cohort
//!
//! Load-once access to the precomputed severity table and the cohort-level
//! queries a dashboard runs against it. The loaded [`table::CohortTable`] is
//! immutable; share it behind an `Arc` or the [`cache::CohortCache`].

pub mod aggregate;
pub mod cache;
pub mod error;
pub mod load;
pub mod query;
pub mod source;
pub mod table;
