//! labsev-dashboard
//!
//! Session glue between the cohort model and a presentation layer:
//! configuration, tracing setup, the per-session selection state, and the
//! serializable views a UI renders.

pub mod config;
pub mod logging;
pub mod session;
pub mod view;
