use ndarray::ArrayView1;

use super::types::{RiskDriver, RiskExplanation};
use crate::logic::features::layout::{feature_name, COMPOSITE_WEIGHTS, DIMENSION_COUNT};
use crate::logic::hotspot::RiskCategory;

/// Drivers reported per project
pub const MAX_DRIVERS: usize = 3;

/// Deviations below this importance are not worth reporting
const MIN_IMPORTANCE: f64 = 0.05;

/// Explain why a project scored where it did, from its standardized row.
///
/// Only High Risk and Critical Hotspot projects get drivers.
pub fn explain(category: RiskCategory, standardized: ArrayView1<'_, f64>) -> Option<RiskExplanation> {
    if !category.needs_attention() {
        return None;
    }

    let mut drivers = Vec::new();

    // Base dimensions only; composite and multiplier are derived from them
    for (i, &z) in standardized.iter().enumerate().take(DIMENSION_COUNT) {
        // Below-average dimensions do not drive risk up
        if z <= 0.0 {
            continue;
        }

        let weight = COMPOSITE_WEIGHTS[i];
        let importance = z.abs() * weight;

        if importance > MIN_IMPORTANCE {
            let name = feature_name(i).unwrap_or("unknown").to_string();
            drivers.push(RiskDriver {
                description: describe(&name),
                name,
                z_score: z,
                weight,
                importance,
            });
        }
    }

    drivers.sort_by(|a, b| b.importance.total_cmp(&a.importance));
    drivers.truncate(MAX_DRIVERS);

    if drivers.is_empty() {
        return None;
    }

    Some(RiskExplanation { drivers })
}

fn describe(name: &str) -> Option<String> {
    match name {
        "cost_overrun_risk" => Some("Material and labour cost pressure above peers".to_string()),
        "timeline_risk" => Some("Regulatory or seasonal schedule exposure".to_string()),
        "technical_risk" => Some("Complex technology or weak vendor track record".to_string()),
        "environmental_risk" => Some("Difficult terrain or weather exposure".to_string()),
        "resource_risk" => Some("Scarce skilled manpower or vendor capacity".to_string()),
        "historical_risk" => Some("Region has a history of delays".to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_low_categories_not_explained() {
        let row = array![3.0, 3.0, 3.0, 3.0, 3.0, 3.0, 3.0, 0.0];
        assert!(explain(RiskCategory::Low, row.view()).is_none());
        assert!(explain(RiskCategory::Medium, row.view()).is_none());
    }

    #[test]
    fn test_top_drivers_ranked_by_weighted_deviation() {
        // cost 2.0*0.25, timeline 1.0*0.25, technical 3.0*0.20, resource 4.0*0.10
        let row = array![2.0, 1.0, 3.0, -2.0, 4.0, 0.5, 2.5, 0.0];
        let result = explain(RiskCategory::Critical, row.view()).unwrap();

        let names: Vec<&str> = result.drivers.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["technical_risk", "cost_overrun_risk", "resource_risk"]);
        assert!((result.drivers[0].importance - 0.6).abs() < 1e-12);
        assert!(result.drivers[0].description.is_some());
    }

    #[test]
    fn test_average_project_has_no_drivers() {
        let row = array![0.0, 0.1, -1.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        assert!(explain(RiskCategory::High, row.view()).is_none());
    }
}
