//! Contamination Threshold
//!
//! Turns continuous anomaly scores into a binary flag. Only the flag depends
//! on `contamination`; the scores themselves never do.

use serde::{Deserialize, Serialize};

use crate::error::{HotspotError, HotspotResult};

/// Upper bound on the expected outlier fraction
pub const MAX_CONTAMINATION: f64 = 0.5;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ContaminationThreshold {
    /// Expected fraction of anomalies, in (0, 0.5]
    pub contamination: f64,
    /// Scores strictly above this are flagged
    pub threshold: f64,
}

impl ContaminationThreshold {
    pub fn validate(contamination: f64) -> HotspotResult<()> {
        if contamination.is_finite() && contamination > 0.0 && contamination <= MAX_CONTAMINATION {
            Ok(())
        } else {
            Err(HotspotError::invalid_config(
                "contamination",
                format!("{} outside (0, {}]", contamination, MAX_CONTAMINATION),
            ))
        }
    }

    /// Threshold = score percentile at 100 * (1 - contamination)
    pub fn fit(scores: &[f64], contamination: f64) -> HotspotResult<Self> {
        Self::validate(contamination)?;
        Ok(Self {
            contamination,
            threshold: percentile(scores, 100.0 * (1.0 - contamination)),
        })
    }

    pub fn is_anomaly(&self, score: f64) -> bool {
        score > self.threshold
    }
}

/// Linear-interpolated percentile (`q` in [0, 100]); 0 for empty input
pub fn percentile(values: &[f64], q: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let rank = (q.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(percentile(&values, 0.0), 1.0);
        assert_eq!(percentile(&values, 50.0), 3.0);
        assert_eq!(percentile(&values, 100.0), 5.0);
        assert!((percentile(&values, 90.0) - 4.6).abs() < 1e-12);
        assert_eq!(percentile(&[], 50.0), 0.0);
    }

    #[test]
    fn test_contamination_bounds() {
        assert!(ContaminationThreshold::validate(0.1).is_ok());
        assert!(ContaminationThreshold::validate(0.5).is_ok());
        assert!(ContaminationThreshold::validate(0.0).is_err());
        assert!(ContaminationThreshold::validate(0.6).is_err());
        assert!(ContaminationThreshold::validate(f64::NAN).is_err());
    }

    #[test]
    fn test_flags_top_fraction() {
        let scores: Vec<f64> = (0..10).map(|i| i as f64 / 10.0).collect();
        let t = ContaminationThreshold::fit(&scores, 0.1).unwrap();
        let flagged = scores.iter().filter(|s| t.is_anomaly(**s)).count();
        assert_eq!(flagged, 1);
    }
}
