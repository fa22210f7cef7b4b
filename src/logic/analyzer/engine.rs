//! Hotspot Engine - batch orchestrator
//!
//! records -> features -> standardize -> {clustering, isolation forest}
//! -> fused score -> category -> drivers, projection, recommendations.
//!
//! The engine holds configuration only. Every fitted model lives inside one
//! `analyze` call and is dropped when the report is returned.

use ndarray::Array2;

use super::types::{HotspotReport, ProjectHotspot};
use crate::constants::{ENGINE_NAME, ENGINE_VERSION};
use crate::error::{HotspotError, HotspotResult};
use crate::logic::clustering::{ClusteringOutcome, ClusteringSelector};
use crate::logic::config::HotspotConfig;
use crate::logic::explain;
use crate::logic::features::{FeatureMatrix, LayoutInfo, ProjectRecord, RiskFeatureBuilder, StandardScaler};
use crate::logic::hotspot::{HotspotScorer, HotspotScores};
use crate::logic::model::{AnomalyDetector, AnomalyReport};
use crate::logic::projection::Projection;
use crate::logic::recommend::RecommendationEngine;

/// Records below this cannot be clustered or normalized
pub const MIN_RECORDS: usize = 2;

#[derive(Debug, Clone)]
pub struct HotspotEngine {
    config: HotspotConfig,
}

impl HotspotEngine {
    pub fn new(config: HotspotConfig) -> HotspotResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &HotspotConfig {
        &self.config
    }

    pub fn analyze(&self, records: &[ProjectRecord]) -> HotspotResult<HotspotReport> {
        let n = records.len();
        if n < MIN_RECORDS {
            return Err(HotspotError::insufficient(
                n,
                format!("at least {} records required", MIN_RECORDS),
            ));
        }

        log::info!("{} v{}: analyzing {} projects", ENGINE_NAME, ENGINE_VERSION, n);

        // 1. Features
        let vectors = RiskFeatureBuilder::new().build_batch(records);
        for (i, vector) in vectors.iter().enumerate() {
            log::debug!("features[{}] = {}", i, vector.to_log_entry());
        }
        let matrix = FeatureMatrix::from_vectors(&vectors);
        let (scaler, standardized) = StandardScaler::fit_transform(&matrix);

        // 2. Clustering; a batch with one risk profile has nothing to separate
        let clustering = if scaler.is_degenerate() {
            log::warn!("All {} projects share one risk profile; scores collapse to 0", n);
            None
        } else {
            Some(ClusteringSelector::new(self.config.selector_settings())?.select(&standardized)?)
        };
        let labels = cluster_labels(clustering.as_ref(), n);

        // 3. Anomaly
        let anomaly = AnomalyDetector::new(self.config.anomaly_settings())?.detect(&standardized)?;

        // 4. Fusion + categories
        let scored = HotspotScorer::new(self.config.thresholds)?.score(&labels, &anomaly.scores)?;

        // 5. Presentation extras
        let projection = Projection::fit(&standardized, self.config.seed);
        let recommendations = RecommendationEngine::new(self.config.highlight_limits()).recommend(
            records,
            &scored.scores,
            &scored.categories,
        );

        let projects = build_projects(records, &standardized, &labels, &anomaly, &scored, &projection);

        let report = HotspotReport {
            run_id: uuid::Uuid::new_v4().to_string(),
            analyzed_at: chrono::Utc::now().to_rfc3339(),
            engine_version: ENGINE_VERSION.to_string(),
            layout: LayoutInfo::current(),
            seed: self.config.seed,
            projects,
            clustering,
            cluster_profiles: scored.clusters,
            anomaly,
            recommendations,
        };

        if let Some(top) = report.top_hotspot() {
            log::info!(
                "Hotspot analysis complete: top project {} at {:.1} ({})",
                records[top.index].display_id(top.index),
                top.hotspot_score,
                top.category
            );
        }

        Ok(report)
    }
}

/// Run the full pipeline once with `config`
pub fn analyze_hotspots(records: &[ProjectRecord], config: &HotspotConfig) -> HotspotResult<HotspotReport> {
    HotspotEngine::new(config.clone())?.analyze(records)
}

/// Selected labels, or one shared cluster when clustering was skipped
fn cluster_labels(clustering: Option<&ClusteringOutcome>, n: usize) -> Vec<i32> {
    match clustering {
        Some(outcome) => outcome.selected.labels.clone(),
        None => vec![0; n],
    }
}

fn build_projects(
    records: &[ProjectRecord],
    standardized: &Array2<f64>,
    labels: &[i32],
    anomaly: &AnomalyReport,
    scored: &HotspotScores,
    projection: &Projection,
) -> Vec<ProjectHotspot> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let category = scored.categories[index];
            let drivers = explain::explain(category, standardized.row(index))
                .map(|e| e.drivers)
                .unwrap_or_default();

            ProjectHotspot {
                index,
                project_id: record.project_id.clone(),
                project_type: record.project_type.clone(),
                location: record.location.clone(),
                cluster: labels[index],
                anomaly_score: anomaly.scores[index],
                is_anomaly: anomaly.flags[index],
                hotspot_score: scored.scores[index],
                category,
                breakdown: scored.breakdown[index],
                projection: projection.coordinates[index],
                drivers,
            }
        })
        .collect()
}
