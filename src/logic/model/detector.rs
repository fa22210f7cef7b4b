//! Anomaly Detector
//!
//! Scores every record's outlierness independently of cluster structure.
//! Input is the standardized feature matrix shared with the clustering
//! selector; it is only read.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::isolation::IsolationForest;
use super::threshold::ContaminationThreshold;
use crate::error::HotspotResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnomalySettings {
    pub contamination: f64,
    pub n_estimators: usize,
    pub max_samples: usize,
    pub seed: u64,
    pub parallel: bool,
}

/// Per-batch detector output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnomalyReport {
    /// Continuous score per record, higher = more anomalous
    pub scores: Vec<f64>,
    /// Binary flag per record from the contamination threshold
    pub flags: Vec<bool>,
    pub threshold: f64,
    pub contamination: f64,
    pub flagged: usize,
}

#[derive(Debug, Clone)]
pub struct AnomalyDetector {
    settings: AnomalySettings,
}

impl AnomalyDetector {
    pub fn new(settings: AnomalySettings) -> HotspotResult<Self> {
        ContaminationThreshold::validate(settings.contamination)?;
        Ok(Self { settings })
    }

    pub fn detect(&self, standardized: &Array2<f64>) -> HotspotResult<AnomalyReport> {
        let s = &self.settings;
        let forest = IsolationForest::fit(standardized, s.n_estimators, s.max_samples, s.seed, s.parallel);
        let scores = forest.score_all(standardized);

        let cut = ContaminationThreshold::fit(&scores, s.contamination)?;
        let flags: Vec<bool> = scores.iter().map(|v| cut.is_anomaly(*v)).collect();
        let flagged = flags.iter().filter(|f| **f).count();

        log::info!(
            "Isolation forest ({} trees): {} anomalies out of {} projects (threshold {:.4})",
            forest.n_trees(),
            flagged,
            scores.len(),
            cut.threshold
        );

        Ok(AnomalyReport {
            scores,
            flags,
            threshold: cut.threshold,
            contamination: cut.contamination,
            flagged,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn settings(contamination: f64) -> AnomalySettings {
        AnomalySettings {
            contamination,
            n_estimators: 100,
            max_samples: 256,
            seed: 42,
            parallel: false,
        }
    }

    #[test]
    fn test_rejects_bad_contamination() {
        assert!(AnomalyDetector::new(settings(0.6)).is_err());
        assert!(AnomalyDetector::new(settings(0.0)).is_err());
    }

    #[test]
    fn test_scores_independent_of_contamination() {
        let data = array![[0.0, 0.1], [0.1, 0.0], [0.05, 0.05], [0.0, 0.0], [4.0, 4.0]];
        let low = AnomalyDetector::new(settings(0.05)).unwrap().detect(&data).unwrap();
        let high = AnomalyDetector::new(settings(0.5)).unwrap().detect(&data).unwrap();

        assert_eq!(low.scores, high.scores);
        assert!(low.flagged <= high.flagged);
        assert!(high.flags[4]);
    }
}
