//! Integration tests for feature construction over a batch

#[cfg(test)]
mod integration_tests {
    use serde_json::json;

    use crate::logic::features::{
        layout::{source_attributes, COMPOSITE_INDEX},
        FeatureMatrix, ProjectRecord, RiskFeatureBuilder, StandardScaler, FEATURE_COUNT,
    };

    fn row(value: f64, project_type: &str) -> ProjectRecord {
        source_attributes()
            .fold(ProjectRecord::new(), |r, name| r.with_attribute(name, value))
            .with_type(project_type)
    }

    /// JSON rows -> vectors -> matrix keeps order and width
    #[test]
    fn test_json_batch_to_matrix() {
        let rows = vec![
            json!({"project_id": "A", "material_cost_ratio": 0.9, "technology_risk": 0.8}),
            json!({"project_id": "B", "material_cost_ratio": "0.1"}),
            json!({"project_id": "C"}),
        ];
        let records: Vec<_> = rows.iter().map(ProjectRecord::from_json).collect();
        let vectors = RiskFeatureBuilder::new().build_batch(&records);
        let matrix = FeatureMatrix::from_vectors(&vectors);

        assert_eq!(matrix.rows(), 3);
        assert_eq!(matrix.cols(), FEATURE_COUNT);
        assert!((matrix.row(0)[0] - 0.27).abs() < 1e-12);
        assert!((matrix.row(1)[0] - 0.03).abs() < 1e-12);
        assert_eq!(matrix.row(2)[0], 0.0);
        assert!((matrix.row(0)[2] - 0.32).abs() < 1e-12);
    }

    /// Type multiplier column varies only when types differ
    #[test]
    fn test_multiplier_column_variance() {
        let builder = RiskFeatureBuilder::new();

        let same = builder.build_batch(&[row(0.2, "substation"), row(0.4, "substation")]);
        let scaler = StandardScaler::fit(&FeatureMatrix::from_vectors(&same));
        assert!(!scaler.varying[FEATURE_COUNT - 1]);
        assert!(scaler.varying[COMPOSITE_INDEX]);

        let mixed = builder.build_batch(&[row(0.2, "substation"), row(0.2, "overhead_line")]);
        let scaler = StandardScaler::fit(&FeatureMatrix::from_vectors(&mixed));
        assert!(scaler.varying[FEATURE_COUNT - 1]);
        assert!(!scaler.varying[0]);
    }
}
