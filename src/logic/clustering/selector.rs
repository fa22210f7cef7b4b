//! Clustering Selector
//!
//! Runs every (family, grid point) trial on the same standardized matrix,
//! keeps the best silhouette per family, then the best family overall.
//! Ties go to the family declared first in `ClusteringFamily::ALL`.

use ndarray::Array2;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::agglomerative::WardDendrogram;
use super::dbscan::{cluster_count, Dbscan};
use super::gmm::GaussianMixture;
use super::kmeans::KMeans;
use super::metrics::{calinski_harabasz, silhouette, DistanceMatrix};
use super::types::{
    ClusteringCandidate, ClusteringFamily, ClusteringOutcome, ClusteringTrial, DegenerateClustering,
    GridParameter, NOISE_LABEL,
};
use crate::error::{HotspotError, HotspotResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorSettings {
    pub cluster_counts: Vec<usize>,
    pub dbscan_eps: Vec<f64>,
    pub dbscan_min_samples: usize,
    pub kmeans_n_init: usize,
    pub max_iter: usize,
    pub gmm_max_iter: usize,
    pub seed: u64,
    pub parallel: bool,
}

/// Shared read-only inputs for every trial
struct TrialContext<'a> {
    data: &'a Array2<f64>,
    distances: &'a DistanceMatrix,
    dendrogram: Option<&'a WardDendrogram>,
}

#[derive(Debug, Clone)]
pub struct ClusteringSelector {
    settings: SelectorSettings,
}

impl ClusteringSelector {
    pub fn new(settings: SelectorSettings) -> HotspotResult<Self> {
        if settings.cluster_counts.is_empty() {
            return Err(HotspotError::invalid_config("cluster_counts", "grid is empty"));
        }
        Ok(Self { settings })
    }

    /// Trial plan in family priority order, grid order within a family
    pub fn plan(&self) -> Vec<(ClusteringFamily, GridParameter)> {
        let mut plan = Vec::new();
        for family in ClusteringFamily::ALL {
            match family {
                ClusteringFamily::Density => plan.extend(
                    self.settings
                        .dbscan_eps
                        .iter()
                        .map(|eps| (family, GridParameter::Radius(*eps))),
                ),
                _ => plan.extend(
                    self.settings
                        .cluster_counts
                        .iter()
                        .map(|k| (family, GridParameter::Clusters(*k))),
                ),
            }
        }
        plan
    }

    pub fn select(&self, standardized: &Array2<f64>) -> HotspotResult<ClusteringOutcome> {
        let trials = self.run_trials(standardized)?;
        fold_trials(trials, standardized.nrows())
    }

    /// Evaluate the whole grid; one immutable record per trial
    pub fn run_trials(&self, standardized: &Array2<f64>) -> HotspotResult<Vec<ClusteringTrial>> {
        let n = standardized.nrows();
        if n < 2 {
            return Err(HotspotError::insufficient(n, "clustering needs at least 2 records"));
        }

        let distances = DistanceMatrix::euclidean(standardized);
        if distances.max() == 0.0 {
            return Err(HotspotError::insufficient(n, "all records identical (zero feature variance)"));
        }

        let plan = self.plan();
        let dendrogram = plan
            .iter()
            .any(|(f, _)| *f == ClusteringFamily::Hierarchical)
            .then(|| WardDendrogram::build(standardized));

        let ctx = TrialContext {
            data: standardized,
            distances: &distances,
            dendrogram: dendrogram.as_ref(),
        };

        log::info!("Evaluating {} clustering trials over {} projects", plan.len(), n);

        let trials: Vec<ClusteringTrial> = if self.settings.parallel {
            plan.par_iter().map(|(f, p)| self.run_trial(&ctx, *f, *p)).collect()
        } else {
            plan.iter().map(|(f, p)| self.run_trial(&ctx, *f, *p)).collect()
        };

        Ok(trials)
    }

    fn run_trial(&self, ctx: &TrialContext<'_>, family: ClusteringFamily, parameter: GridParameter) -> ClusteringTrial {
        let outcome = self
            .labels_for(ctx, family, parameter)
            .and_then(|labels| evaluate(ctx, family, parameter, labels));

        match &outcome {
            Ok(c) => log::debug!(
                "{} {}: silhouette {:.4}, {} clusters",
                family,
                parameter,
                c.silhouette,
                c.n_clusters
            ),
            Err(e) => log::debug!("Discarded: {}", e),
        }

        ClusteringTrial {
            family,
            parameter,
            outcome,
        }
    }

    fn labels_for(
        &self,
        ctx: &TrialContext<'_>,
        family: ClusteringFamily,
        parameter: GridParameter,
    ) -> Result<Vec<i32>, DegenerateClustering> {
        let n = ctx.data.nrows();
        let s = &self.settings;
        let degenerate = |reason: String| DegenerateClustering { family, parameter, reason };

        let to_i32 = |labels: Vec<usize>| labels.into_iter().map(|l| l as i32).collect::<Vec<_>>();

        match (family, parameter) {
            (ClusteringFamily::Density, GridParameter::Radius(eps)) => {
                Ok(Dbscan::new(eps, s.dbscan_min_samples).fit(ctx.distances))
            }
            (_, GridParameter::Clusters(k)) if k < 2 || k >= n => {
                Err(degenerate(format!("needs 2 <= k < {} records", n)))
            }
            (ClusteringFamily::Partition, GridParameter::Clusters(k)) => {
                Ok(to_i32(KMeans::new(k, s.kmeans_n_init, s.max_iter, s.seed).fit(ctx.data).labels))
            }
            (ClusteringFamily::Mixture, GridParameter::Clusters(k)) => GaussianMixture::new(k, s.gmm_max_iter, s.seed)
                .fit_predict(ctx.data)
                .map(to_i32)
                .ok_or_else(|| degenerate("covariance not positive definite".to_string())),
            (ClusteringFamily::Hierarchical, GridParameter::Clusters(k)) => match ctx.dendrogram {
                Some(d) => Ok(to_i32(d.cut(k))),
                None => Err(degenerate("dendrogram unavailable".to_string())),
            },
            _ => Err(degenerate("parameter does not apply to this family".to_string())),
        }
    }
}

fn evaluate(
    ctx: &TrialContext<'_>,
    family: ClusteringFamily,
    parameter: GridParameter,
    labels: Vec<i32>,
) -> Result<ClusteringCandidate, DegenerateClustering> {
    let degenerate = |reason: String| DegenerateClustering { family, parameter, reason };

    let n_clusters = cluster_count(&labels);
    let noise_points = labels.iter().filter(|l| **l == NOISE_LABEL).count();

    if n_clusters < 2 {
        return Err(degenerate(format!("{} non-noise clusters", n_clusters)));
    }

    let score = silhouette(&labels, ctx.distances)
        .ok_or_else(|| degenerate("silhouette undefined for this labelling".to_string()))?;

    Ok(ClusteringCandidate {
        family,
        parameter,
        calinski_harabasz: calinski_harabasz(ctx.data, &labels),
        labels,
        silhouette: score,
        n_clusters,
        noise_points,
    })
}

/// Argmax within each family, then across families in priority order
pub fn fold_trials(trials: Vec<ClusteringTrial>, records: usize) -> HotspotResult<ClusteringOutcome> {
    let trials_evaluated = trials.len();
    let trials_discarded = trials.iter().filter(|t| t.outcome.is_err()).count();

    let family_best: Vec<ClusteringCandidate> = ClusteringFamily::ALL
        .iter()
        .filter_map(|family| {
            trials
                .iter()
                .filter(|t| t.family == *family)
                .filter_map(ClusteringTrial::candidate)
                .fold(None, keep_better)
                .cloned()
        })
        .collect();

    let selected = family_best
        .iter()
        .fold(None, keep_better)
        .cloned()
        .ok_or_else(|| {
            HotspotError::insufficient(
                records,
                format!("all {} clustering candidates degenerated", trials_evaluated),
            )
        })?;

    log::info!(
        "Best clustering method: {} {} (silhouette {:.3}, {} clusters)",
        selected.family,
        selected.parameter,
        selected.silhouette,
        selected.n_clusters
    );

    Ok(ClusteringOutcome {
        selected,
        family_best,
        trials_evaluated,
        trials_discarded,
    })
}

/// Strictly better replaces; earlier wins ties
fn keep_better<'a>(
    best: Option<&'a ClusteringCandidate>,
    next: &'a ClusteringCandidate,
) -> Option<&'a ClusteringCandidate> {
    match best {
        Some(b) if next.silhouette <= b.silhouette => Some(b),
        _ => Some(next),
    }
}
