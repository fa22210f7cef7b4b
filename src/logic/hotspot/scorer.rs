//! Hotspot Scorer
//!
//! Fuses cluster-level risk with each project's own anomaly score, rescales
//! the batch to [0, 100] and bins into risk categories. Deterministic.

use std::collections::BTreeMap;

use super::rules::{CLUSTER_ANOMALY_WEIGHT, CLUSTER_WEIGHT, INDIVIDUAL_WEIGHT, SCORE_SCALE, SIZE_WEIGHT};
use super::types::{CategoryThresholds, ClusterProfile, HotspotScores, ScoreBreakdown};
use crate::error::{HotspotError, HotspotResult};

/// Ranges at or below this normalize to all-zero scores
const FLAT_RANGE: f64 = 1e-12;

#[derive(Debug, Clone, Default)]
pub struct HotspotScorer {
    thresholds: CategoryThresholds,
}

impl HotspotScorer {
    pub fn new(thresholds: CategoryThresholds) -> HotspotResult<Self> {
        thresholds.validate()?;
        Ok(Self { thresholds })
    }

    pub fn thresholds(&self) -> &CategoryThresholds {
        &self.thresholds
    }

    /// One cluster profile per distinct label, ascending by label
    pub fn cluster_profiles(labels: &[i32], anomaly: &[f64]) -> Vec<ClusterProfile> {
        let mut groups: BTreeMap<i32, (usize, f64)> = BTreeMap::new();
        for (label, score) in labels.iter().zip(anomaly) {
            let entry = groups.entry(*label).or_insert((0, 0.0));
            entry.0 += 1;
            entry.1 += score;
        }

        groups
            .into_iter()
            .map(|(label, (size, sum))| {
                let mean_anomaly = sum / size as f64;
                ClusterProfile {
                    label,
                    size,
                    mean_anomaly,
                    cluster_risk: SIZE_WEIGHT / size as f64 + CLUSTER_ANOMALY_WEIGHT * mean_anomaly,
                }
            })
            .collect()
    }

    pub fn score(&self, labels: &[i32], anomaly: &[f64]) -> HotspotResult<HotspotScores> {
        if labels.len() != anomaly.len() {
            return Err(HotspotError::insufficient(
                anomaly.len(),
                format!("{} cluster labels for {} anomaly scores", labels.len(), anomaly.len()),
            ));
        }
        if labels.is_empty() {
            return Err(HotspotError::insufficient(0, "nothing to score"));
        }

        let clusters = Self::cluster_profiles(labels, anomaly);
        let risk_of = |label: i32| {
            clusters
                .iter()
                .find(|c| c.label == label)
                .map(|c| c.cluster_risk)
                .unwrap_or(0.0)
        };

        let breakdown: Vec<ScoreBreakdown> = labels
            .iter()
            .zip(anomaly)
            .map(|(label, score)| {
                let cluster_contribution = CLUSTER_WEIGHT * risk_of(*label);
                let anomaly_contribution = INDIVIDUAL_WEIGHT * score;
                ScoreBreakdown {
                    cluster_contribution,
                    anomaly_contribution,
                    raw_score: cluster_contribution + anomaly_contribution,
                }
            })
            .collect();

        let raw: Vec<f64> = breakdown.iter().map(|b| b.raw_score).collect();
        let scores = normalize(&raw);
        let categories = scores.iter().map(|s| self.thresholds.categorize(*s)).collect();

        Ok(HotspotScores {
            scores,
            categories,
            breakdown,
            clusters,
        })
    }
}

/// Batch min/max rescale to [0, 100]; a flat batch maps to all zeros
pub fn normalize(raw: &[f64]) -> Vec<f64> {
    let min = raw.iter().copied().fold(f64::INFINITY, f64::min);
    let max = raw.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    if !range.is_finite() || range <= FLAT_RANGE {
        return vec![0.0; raw.len()];
    }

    raw.iter()
        .map(|v| ((v - min) / range * SCORE_SCALE).clamp(0.0, SCORE_SCALE))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::hotspot::types::RiskCategory;

    #[test]
    fn test_cluster_risk_formula() {
        let profiles = HotspotScorer::cluster_profiles(&[0, 0, 1], &[0.4, 0.6, 0.9]);
        assert_eq!(profiles.len(), 2);
        assert!((profiles[0].cluster_risk - (0.3 / 2.0 + 0.7 * 0.5)).abs() < 1e-12);
        assert!((profiles[1].cluster_risk - (0.3 + 0.7 * 0.9)).abs() < 1e-12);
    }

    #[test]
    fn test_scores_span_full_range() {
        let scorer = HotspotScorer::default();
        let result = scorer.score(&[0, 0, 0, 1], &[0.40, 0.42, 0.45, 0.80]).unwrap();

        let min = result.scores.iter().copied().fold(f64::INFINITY, f64::min);
        let max = result.scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(min, 0.0);
        assert_eq!(max, 100.0);
        assert_eq!(result.categories[3], RiskCategory::Critical);
        assert_eq!(result.categories[0], RiskCategory::Low);
    }

    #[test]
    fn test_flat_batch_is_all_zero() {
        let result = HotspotScorer::default().score(&[0, 0, 0], &[0.5, 0.5, 0.5]).unwrap();
        assert!(result.scores.iter().all(|s| *s == 0.0));
        assert!(result.categories.iter().all(|c| *c == RiskCategory::Low));
    }

    #[test]
    fn test_half_open_bins() {
        let t = CategoryThresholds::default();
        assert_eq!(t.categorize(0.0), RiskCategory::Low);
        assert_eq!(t.categorize(24.999), RiskCategory::Low);
        assert_eq!(t.categorize(25.0), RiskCategory::Medium);
        assert_eq!(t.categorize(50.0), RiskCategory::High);
        assert_eq!(t.categorize(74.999), RiskCategory::High);
        assert_eq!(t.categorize(75.0), RiskCategory::Critical);
        assert_eq!(t.categorize(100.0), RiskCategory::Critical);
    }

    #[test]
    fn test_invalid_thresholds_rejected() {
        let t = CategoryThresholds {
            medium: 50.0,
            high: 25.0,
            critical: 75.0,
        };
        assert!(HotspotScorer::new(t).is_err());
        assert!(HotspotScorer::new(CategoryThresholds::high_sensitivity()).is_ok());
    }

    #[test]
    fn test_length_mismatch_rejected() {
        assert!(HotspotScorer::default().score(&[0, 1], &[0.5]).is_err());
    }
}
