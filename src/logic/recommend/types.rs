//! Recommendation Types

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::logic::hotspot::RiskCategory;

/// A project singled out in a High Risk or Critical Hotspot entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightedProject {
    /// Position in the input batch
    pub index: usize,
    pub project_id: Option<String>,
    pub project_type: Option<String>,
    pub location: Option<String>,
    pub hotspot_score: f64,
}

/// Everything the report says about one category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRecommendation {
    pub category: RiskCategory,
    pub count: usize,
    pub avg_risk_score: f64,
    pub recommendations: Vec<String>,
    /// Empty for Medium and Low
    pub top_projects: Vec<HighlightedProject>,
}

/// Keyed by category; only categories present in the batch appear
pub type RecommendationSet = BTreeMap<RiskCategory, CategoryRecommendation>;

/// How many projects to highlight per tier
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HighlightLimits {
    pub critical: usize,
    pub high: usize,
}

impl Default for HighlightLimits {
    fn default() -> Self {
        Self {
            critical: crate::constants::DEFAULT_CRITICAL_TOP_N,
            high: crate::constants::DEFAULT_HIGH_TOP_N,
        }
    }
}
