//! Logic Module - Hotspot Engines
//!
//! ## Architecture
//! - `features/` - ProjectRecord -> RiskFeatureVector, batch matrix, scaler
//! - `clustering/` - four clustering families, silhouette model selection
//! - `model/` - isolation forest anomaly scoring and contamination threshold
//! - `hotspot/` - score fusion and risk categories
//! - `recommend/` - per-category actions and highlighted projects
//! - `explain/` - risk drivers for flagged projects
//! - `projection` - 2-D coordinates for plotting
//! - `config` - HotspotConfig
//! - `analyzer/` - batch orchestrator and report

pub mod features;
pub mod clustering;
pub mod model;
pub mod hotspot;
pub mod recommend;
pub mod explain;
pub mod projection;
pub mod config;
pub mod analyzer;
