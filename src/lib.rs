//! PowerGrid Hotspot Engine - Library Entry Point
//!
//! Flags infrastructure projects likely to overrun cost or schedule.
//!
//! Pipeline: records -> risk features -> {clustering selection, isolation
//! forest} -> fused hotspot score -> risk category -> recommendations.
//!
//! ## Usage
//! ```ignore
//! use powergrid_hotspot::{HotspotConfig, HotspotEngine, ProjectRecord};
//!
//! let engine = HotspotEngine::new(HotspotConfig::default())?;
//! let report = engine.analyze(&records)?;
//! for project in &report.projects {
//!     println!("{:?} -> {} ({:.1})", project.project_id, project.category, project.hotspot_score);
//! }
//! ```

pub mod constants;
pub mod error;
pub mod logic;

pub use error::{HotspotError, HotspotResult};
pub use logic::analyzer::{analyze_hotspots, HotspotEngine, HotspotReport, ProjectHotspot};
pub use logic::config::HotspotConfig;
pub use logic::features::{ProjectRecord, RiskFeatureVector};
pub use logic::hotspot::{CategoryThresholds, RiskCategory};
