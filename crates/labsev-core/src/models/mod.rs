pub mod condition;
pub mod distribution;
pub mod indicator;
pub mod patient;
pub mod severity;
