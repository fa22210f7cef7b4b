//! Clustering Types
//!
//! Data structures only. Each grid evaluation becomes one immutable
//! `ClusteringTrial`; selection is a fold over the trial list.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Label DBSCAN gives to points outside every dense region
pub const NOISE_LABEL: i32 = -1;

// ============================================================================
// FAMILY
// ============================================================================

/// Clustering families, declared in tie-break priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusteringFamily {
    /// k-means
    Partition,
    /// Gaussian mixture
    Mixture,
    /// Ward agglomerative
    Hierarchical,
    /// DBSCAN
    Density,
}

impl ClusteringFamily {
    /// Priority order used to break quality ties
    pub const ALL: [ClusteringFamily; 4] = [
        ClusteringFamily::Partition,
        ClusteringFamily::Mixture,
        ClusteringFamily::Hierarchical,
        ClusteringFamily::Density,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClusteringFamily::Partition => "kmeans",
            ClusteringFamily::Mixture => "gmm",
            ClusteringFamily::Hierarchical => "agglomerative",
            ClusteringFamily::Density => "dbscan",
        }
    }
}

impl std::fmt::Display for ClusteringFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// GRID PARAMETER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridParameter {
    /// Cluster / component count
    Clusters(usize),
    /// DBSCAN neighbourhood radius
    Radius(f64),
}

impl std::fmt::Display for GridParameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridParameter::Clusters(k) => write!(f, "k={}", k),
            GridParameter::Radius(eps) => write!(f, "eps={}", eps),
        }
    }
}

// ============================================================================
// TRIAL RESULTS
// ============================================================================

/// A usable clustering of the batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusteringCandidate {
    pub family: ClusteringFamily,
    pub parameter: GridParameter,
    /// One label per record; `NOISE_LABEL` for density noise
    pub labels: Vec<i32>,
    /// Mean silhouette in standardized space (selection metric)
    pub silhouette: f64,
    /// Diagnostic only
    pub calinski_harabasz: f64,
    /// Clusters excluding noise
    pub n_clusters: usize,
    pub noise_points: usize,
}

/// Grid point discarded locally; never surfaced as a fatal error
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[error("{family} {parameter} degenerate: {reason}")]
pub struct DegenerateClustering {
    pub family: ClusteringFamily,
    pub parameter: GridParameter,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct ClusteringTrial {
    pub family: ClusteringFamily,
    pub parameter: GridParameter,
    pub outcome: Result<ClusteringCandidate, DegenerateClustering>,
}

impl ClusteringTrial {
    pub fn candidate(&self) -> Option<&ClusteringCandidate> {
        self.outcome.as_ref().ok()
    }
}

// ============================================================================
// SELECTION OUTCOME
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusteringOutcome {
    /// Winning configuration across all families
    pub selected: ClusteringCandidate,
    /// Best grid point of every family that produced one, priority order
    pub family_best: Vec<ClusteringCandidate>,
    pub trials_evaluated: usize,
    pub trials_discarded: usize,
}

impl ClusteringOutcome {
    pub fn best_for(&self, family: ClusteringFamily) -> Option<&ClusteringCandidate> {
        self.family_best.iter().find(|c| c.family == family)
    }
}
