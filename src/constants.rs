//! Central Configuration Constants
//!
//! Single source of truth for all engine defaults.
//! To change a default grid or seed, only edit this file.

/// Default random seed threaded into every stochastic step
pub const DEFAULT_SEED: u64 = 42;

/// Default expected fraction of anomalies (binary flag only)
pub const DEFAULT_CONTAMINATION: f64 = 0.1;

/// Default cluster-count grid (partition, mixture, hierarchical)
pub const DEFAULT_CLUSTER_COUNTS: std::ops::RangeInclusive<usize> = 2..=10;

/// Default DBSCAN neighbourhood radii (standardized units)
pub const DEFAULT_DBSCAN_EPS: [f64; 5] = [0.1, 0.3, 0.5, 0.7, 1.0];

/// Default DBSCAN core-point threshold (point itself included)
pub const DEFAULT_DBSCAN_MIN_SAMPLES: usize = 5;

/// Isolation forest size
pub const DEFAULT_N_ESTIMATORS: usize = 100;

/// Isolation forest subsample cap
pub const DEFAULT_MAX_SAMPLES: usize = 256;

/// K-means restarts per cluster count
pub const DEFAULT_KMEANS_N_INIT: usize = 10;

/// Lloyd iteration cap
pub const DEFAULT_MAX_ITER: usize = 300;

/// EM iteration cap for the mixture family
pub const DEFAULT_GMM_MAX_ITER: usize = 100;

/// Highlighted projects for Critical Hotspot
pub const DEFAULT_CRITICAL_TOP_N: usize = 5;

/// Highlighted projects for High Risk
pub const DEFAULT_HIGH_TOP_N: usize = 10;

/// Engine version
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name
pub const ENGINE_NAME: &str = "PowerGrid-Hotspot";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get random seed from environment or use default
pub fn get_seed() -> u64 {
    std::env::var("HOTSPOT_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SEED)
}

/// Get contamination from environment or use default
///
/// Not range-checked here; `HotspotConfig::validate` rejects bad values.
pub fn get_contamination() -> f64 {
    std::env::var("HOTSPOT_CONTAMINATION")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_CONTAMINATION)
}

/// Get Critical Hotspot top-N from environment or use default
pub fn get_critical_top_n() -> usize {
    std::env::var("HOTSPOT_CRITICAL_TOP_N")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_CRITICAL_TOP_N)
}

/// Get High Risk top-N from environment or use default
pub fn get_high_top_n() -> usize {
    std::env::var("HOTSPOT_HIGH_TOP_N")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_HIGH_TOP_N)
}

/// Check if parallel grid evaluation is enabled
pub fn is_parallel_enabled() -> bool {
    std::env::var("HOTSPOT_PARALLEL")
        .map(|v| v != "0" && v.to_lowercase() != "false")
        .unwrap_or(true)
}
