//! Hotspot Fusion Weights
//!
//! Constants only. These are heuristic and kept exactly for compatibility
//! with existing hotspot reports; see DESIGN.md before changing them.

/// Cluster risk: weight of 1 / cluster_size (small clusters are outlier groups)
pub const SIZE_WEIGHT: f64 = 0.3;

/// Cluster risk: weight of the members' mean anomaly score
pub const CLUSTER_ANOMALY_WEIGHT: f64 = 0.7;

/// Final score: weight of the project's cluster risk
pub const CLUSTER_WEIGHT: f64 = 0.4;

/// Final score: weight of the project's own anomaly score
pub const INDIVIDUAL_WEIGHT: f64 = 0.6;

/// Upper end of the normalized scale
pub const SCORE_SCALE: f64 = 100.0;
