//! Engine Configuration
//!
//! Every tunable of a batch run. Validated once, before any computation.
//! Can be built from defaults, presets, environment, or deserialized JSON.

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{HotspotError, HotspotResult};
use crate::logic::clustering::SelectorSettings;
use crate::logic::hotspot::CategoryThresholds;
use crate::logic::model::{AnomalySettings, ContaminationThreshold};
use crate::logic::recommend::HighlightLimits;

// ============================================================================
// HOTSPOT CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HotspotConfig {
    /// Cluster counts tried by partition, mixture and hierarchical
    pub cluster_counts: Vec<usize>,
    /// DBSCAN radii, standardized units
    pub dbscan_eps: Vec<f64>,
    pub dbscan_min_samples: usize,
    /// Expected anomaly fraction, (0, 0.5]
    pub contamination: f64,
    pub seed: u64,
    pub n_estimators: usize,
    pub max_samples: usize,
    pub kmeans_n_init: usize,
    pub max_iter: usize,
    pub gmm_max_iter: usize,
    pub critical_top_n: usize,
    pub high_top_n: usize,
    pub thresholds: CategoryThresholds,
    /// Evaluate clustering trials and trees on the rayon pool
    pub parallel: bool,
}

impl Default for HotspotConfig {
    fn default() -> Self {
        Self {
            cluster_counts: constants::DEFAULT_CLUSTER_COUNTS.collect(),
            dbscan_eps: constants::DEFAULT_DBSCAN_EPS.to_vec(),
            dbscan_min_samples: constants::DEFAULT_DBSCAN_MIN_SAMPLES,
            contamination: constants::DEFAULT_CONTAMINATION,
            seed: constants::DEFAULT_SEED,
            n_estimators: constants::DEFAULT_N_ESTIMATORS,
            max_samples: constants::DEFAULT_MAX_SAMPLES,
            kmeans_n_init: constants::DEFAULT_KMEANS_N_INIT,
            max_iter: constants::DEFAULT_MAX_ITER,
            gmm_max_iter: constants::DEFAULT_GMM_MAX_ITER,
            critical_top_n: constants::DEFAULT_CRITICAL_TOP_N,
            high_top_n: constants::DEFAULT_HIGH_TOP_N,
            thresholds: CategoryThresholds::default(),
            parallel: true,
        }
    }
}

impl HotspotConfig {
    /// Defaults overridden by HOTSPOT_* environment variables
    pub fn from_env() -> Self {
        Self {
            seed: constants::get_seed(),
            contamination: constants::get_contamination(),
            critical_top_n: constants::get_critical_top_n(),
            high_top_n: constants::get_high_top_n(),
            parallel: constants::is_parallel_enabled(),
            ..Default::default()
        }
    }

    /// Sensitive mode - lower category boundaries, more projects flagged
    pub fn sensitive() -> Self {
        Self {
            thresholds: CategoryThresholds::high_sensitivity(),
            contamination: 0.15,
            ..Default::default()
        }
    }

    /// Conservative mode - only the clearest outliers escalate
    pub fn conservative() -> Self {
        Self {
            thresholds: CategoryThresholds::low_sensitivity(),
            contamination: 0.05,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> HotspotResult<()> {
        ContaminationThreshold::validate(self.contamination)?;

        if self.cluster_counts.is_empty() {
            return Err(HotspotError::invalid_config("cluster_counts", "grid is empty"));
        }
        if let Some(k) = self.cluster_counts.iter().find(|k| **k < 2) {
            return Err(HotspotError::invalid_config(
                "cluster_counts",
                format!("cluster count {} is below 2", k),
            ));
        }
        if self.dbscan_eps.is_empty() {
            return Err(HotspotError::invalid_config("dbscan_eps", "grid is empty"));
        }
        if let Some(eps) = self.dbscan_eps.iter().find(|e| !(e.is_finite() && **e > 0.0)) {
            return Err(HotspotError::invalid_config(
                "dbscan_eps",
                format!("radius {} must be positive", eps),
            ));
        }

        let counts = [
            ("dbscan_min_samples", self.dbscan_min_samples),
            ("n_estimators", self.n_estimators),
            ("max_samples", self.max_samples),
            ("kmeans_n_init", self.kmeans_n_init),
            ("max_iter", self.max_iter),
            ("gmm_max_iter", self.gmm_max_iter),
        ];
        if let Some((field, _)) = counts.iter().find(|(_, v)| *v == 0) {
            return Err(HotspotError::invalid_config(*field, "must be at least 1"));
        }

        self.thresholds.validate()
    }

    pub fn selector_settings(&self) -> SelectorSettings {
        SelectorSettings {
            cluster_counts: self.cluster_counts.clone(),
            dbscan_eps: self.dbscan_eps.clone(),
            dbscan_min_samples: self.dbscan_min_samples,
            kmeans_n_init: self.kmeans_n_init,
            max_iter: self.max_iter,
            gmm_max_iter: self.gmm_max_iter,
            seed: self.seed,
            parallel: self.parallel,
        }
    }

    pub fn anomaly_settings(&self) -> AnomalySettings {
        AnomalySettings {
            contamination: self.contamination,
            n_estimators: self.n_estimators,
            max_samples: self.max_samples,
            seed: self.seed,
            parallel: self.parallel,
        }
    }

    pub fn highlight_limits(&self) -> HighlightLimits {
        HighlightLimits {
            critical: self.critical_top_n,
            high: self.high_top_n,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HotspotConfig::default();
        assert_eq!(config.cluster_counts, vec![2, 3, 4, 5, 6, 7, 8, 9, 10]);
        assert_eq!(config.dbscan_eps, vec![0.1, 0.3, 0.5, 0.7, 1.0]);
        assert_eq!(config.contamination, 0.1);
        assert_eq!(config.seed, 42);
        assert_eq!(config.critical_top_n, 5);
        assert_eq!(config.high_top_n, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(HotspotConfig::sensitive().validate().is_ok());
        assert!(HotspotConfig::conservative().validate().is_ok());
        assert!(HotspotConfig::sensitive().thresholds.critical < HotspotConfig::conservative().thresholds.critical);
    }

    #[test]
    fn test_contamination_out_of_range() {
        let config = HotspotConfig {
            contamination: 0.6,
            ..Default::default()
        };
        match config.validate() {
            Err(HotspotError::InvalidConfiguration { field, .. }) => assert_eq!(field, "contamination"),
            other => panic!("expected InvalidConfiguration, got {:?}", other),
        }
    }

    #[test]
    fn test_grid_rules() {
        let empty = HotspotConfig {
            cluster_counts: vec![],
            ..Default::default()
        };
        assert!(empty.validate().is_err());

        let too_small = HotspotConfig {
            cluster_counts: vec![1, 2],
            ..Default::default()
        };
        assert!(too_small.validate().is_err());

        let bad_eps = HotspotConfig {
            dbscan_eps: vec![0.5, 0.0],
            ..Default::default()
        };
        assert!(bad_eps.validate().is_err());

        let no_trees = HotspotConfig {
            n_estimators: 0,
            ..Default::default()
        };
        match no_trees.validate() {
            Err(HotspotError::InvalidConfiguration { field, .. }) => assert_eq!(field, "n_estimators"),
            other => panic!("expected InvalidConfiguration, got {:?}", other),
        }
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: HotspotConfig = serde_json::from_str(r#"{"seed": 7, "parallel": false}"#).unwrap();
        assert_eq!(config.seed, 7);
        assert!(!config.parallel);
        assert_eq!(config.n_estimators, 100);
    }
}
