//! Explain Module - per-project risk drivers
//!
//! Ranks the base risk dimensions of a flagged project by how far they sit
//! above the batch mean, weighted by their share of the composite score.

pub mod types;
pub mod engine;

pub use engine::{explain, MAX_DRIVERS};
pub use types::{RiskDriver, RiskExplanation};
