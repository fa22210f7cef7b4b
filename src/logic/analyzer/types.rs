//! Report Types
//!
//! One `HotspotReport` per batch run. Everything a caller needs to render,
//! persist, or forward the analysis lives here; the engine keeps nothing.

use serde::{Deserialize, Serialize};

use crate::error::HotspotResult;
use crate::logic::clustering::ClusteringOutcome;
use crate::logic::explain::RiskDriver;
use crate::logic::features::LayoutInfo;
use crate::logic::hotspot::{ClusterProfile, RiskCategory, ScoreBreakdown};
use crate::logic::model::AnomalyReport;
use crate::logic::recommend::RecommendationSet;

/// Per-project result, in input order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectHotspot {
    pub index: usize,
    pub project_id: Option<String>,
    pub project_type: Option<String>,
    pub location: Option<String>,
    /// Label of the selected clustering; -1 marks density noise
    pub cluster: i32,
    pub anomaly_score: f64,
    pub is_anomaly: bool,
    /// [0, 100]
    pub hotspot_score: f64,
    pub category: RiskCategory,
    pub breakdown: ScoreBreakdown,
    /// First two principal components
    pub projection: [f64; 2],
    /// Filled for High Risk and Critical Hotspot only
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub drivers: Vec<RiskDriver>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotspotReport {
    pub run_id: String,
    /// RFC 3339
    pub analyzed_at: String,
    pub engine_version: String,
    pub layout: LayoutInfo,
    pub seed: u64,
    pub projects: Vec<ProjectHotspot>,
    /// None when the batch has no feature variance to cluster
    pub clustering: Option<ClusteringOutcome>,
    pub cluster_profiles: Vec<ClusterProfile>,
    pub anomaly: AnomalyReport,
    pub recommendations: RecommendationSet,
}

impl HotspotReport {
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn count(&self, category: RiskCategory) -> usize {
        self.projects.iter().filter(|p| p.category == category).count()
    }

    /// Highest-scoring project; earliest index on ties
    pub fn top_hotspot(&self) -> Option<&ProjectHotspot> {
        self.projects
            .iter()
            .fold(None, |best: Option<&ProjectHotspot>, p| match best {
                Some(b) if p.hotspot_score <= b.hotspot_score => Some(b),
                _ => Some(p),
            })
    }

    pub fn to_json(&self) -> HotspotResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
