//! Hotspot Module
//!
//! Fuses cluster risk and individual anomaly into one [0, 100] score per
//! project, then bins it into Low / Medium / High / Critical.
//!
//! ## Structure
//! - `types`: `RiskCategory`, `CategoryThresholds`, score records
//! - `rules`: fusion weights
//! - `scorer`: `HotspotScorer`

pub mod types;
pub mod rules;
pub mod scorer;

pub use scorer::{normalize, HotspotScorer};
pub use types::{CategoryThresholds, ClusterProfile, HotspotScores, RiskCategory, ScoreBreakdown};
