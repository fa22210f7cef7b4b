//! Analyzer Module - batch orchestration
//!
//! `HotspotEngine` sequences feature construction, clustering selection,
//! anomaly detection, scoring and recommendations, and returns one
//! `HotspotReport` per call.
//!
//! ## Usage
//! ```ignore
//! let report = analyze_hotspots(&records, &HotspotConfig::default())?;
//! println!("{}", report.to_json()?);
//! ```

pub mod types;
pub mod engine;


pub use engine::{analyze_hotspots, HotspotEngine, MIN_RECORDS};
pub use types::{HotspotReport, ProjectHotspot};
