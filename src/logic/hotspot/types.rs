//! Hotspot Types
//!
//! Core types for hotspot categorisation.
//! No scoring logic here - data structures only.

use serde::{Deserialize, Serialize};

use crate::error::{HotspotError, HotspotResult};

// ============================================================================
// RISK CATEGORY
// ============================================================================

/// Ordered risk tiers, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskCategory {
    #[serde(rename = "Low Risk")]
    Low,
    #[serde(rename = "Medium Risk")]
    Medium,
    #[serde(rename = "High Risk")]
    High,
    #[serde(rename = "Critical Hotspot")]
    Critical,
}

impl RiskCategory {
    /// Most urgent first
    pub const BY_URGENCY: [RiskCategory; 4] = [
        RiskCategory::Critical,
        RiskCategory::High,
        RiskCategory::Medium,
        RiskCategory::Low,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::Low => "Low Risk",
            RiskCategory::Medium => "Medium Risk",
            RiskCategory::High => "High Risk",
            RiskCategory::Critical => "Critical Hotspot",
        }
    }

    /// Only the two upper tiers get highlighted projects and risk drivers
    pub fn needs_attention(&self) -> bool {
        matches!(self, RiskCategory::High | RiskCategory::Critical)
    }
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// THRESHOLDS
// ============================================================================

/// Lower bounds of Medium, High and Critical on the 0-100 scale.
///
/// Bins are half-open: [0, medium) [medium, high) [high, critical) [critical, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryThresholds {
    pub medium: f64,
    pub high: f64,
    pub critical: f64,
}

impl Default for CategoryThresholds {
    fn default() -> Self {
        Self {
            medium: 25.0,
            high: 50.0,
            critical: 75.0,
        }
    }
}

impl CategoryThresholds {
    /// More projects land in the upper tiers
    pub fn high_sensitivity() -> Self {
        Self {
            medium: 20.0,
            high: 40.0,
            critical: 60.0,
        }
    }

    /// Fewer projects land in the upper tiers
    pub fn low_sensitivity() -> Self {
        Self {
            medium: 30.0,
            high: 60.0,
            critical: 85.0,
        }
    }

    pub fn validate(&self) -> HotspotResult<()> {
        let ordered = 0.0 < self.medium && self.medium < self.high && self.high < self.critical && self.critical <= 100.0;
        if ordered {
            Ok(())
        } else {
            Err(HotspotError::invalid_config(
                "thresholds",
                format!(
                    "expected 0 < medium < high < critical <= 100, got {}/{}/{}",
                    self.medium, self.high, self.critical
                ),
            ))
        }
    }

    pub fn categorize(&self, score: f64) -> RiskCategory {
        if score >= self.critical {
            RiskCategory::Critical
        } else if score >= self.high {
            RiskCategory::High
        } else if score >= self.medium {
            RiskCategory::Medium
        } else {
            RiskCategory::Low
        }
    }
}

// ============================================================================
// CLUSTER PROFILE
// ============================================================================

/// Aggregate risk of one cluster of the selected labelling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterProfile {
    pub label: i32,
    pub size: usize,
    pub mean_anomaly: f64,
    /// 0.3 / size + 0.7 * mean_anomaly
    pub cluster_risk: f64,
}

/// How one project's final score was put together
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub cluster_contribution: f64,
    pub anomaly_contribution: f64,
    /// Before batch min/max normalization
    pub raw_score: f64,
}

/// Scorer output for a batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotspotScores {
    /// [0, 100] per record
    pub scores: Vec<f64>,
    pub categories: Vec<RiskCategory>,
    pub breakdown: Vec<ScoreBreakdown>,
    pub clusters: Vec<ClusterProfile>,
}
