//! Risk Feature Vector - fixed-width numeric risk summary per project
//!
//! **Versioned feature vector with layout validation**
//!
//! Built by a pure function over one `ProjectRecord`; never mutated after
//! creation.

use serde::{Deserialize, Serialize};

use super::layout::{
    layout_hash, project_type_multiplier, COMPOSITE_INDEX, COMPOSITE_WEIGHTS, DIMENSION_COUNT,
    DIMENSION_SOURCES, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION, MULTIPLIER_INDEX,
};
use super::record::ProjectRecord;

// ============================================================================
// VERSIONED FEATURE VECTOR
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFeatureVector {
    /// Feature layout version
    pub version: u8,
    /// CRC32 hash of the feature layout
    pub layout_hash: u32,
    /// Values in order defined by FEATURE_LAYOUT
    pub values: [f64; FEATURE_COUNT],
}

impl RiskFeatureVector {
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values,
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    pub fn get_by_name(&self, name: &str) -> Option<f64> {
        super::layout::feature_index(name).and_then(|i| self.get(i))
    }

    pub fn composite(&self) -> f64 {
        self.values[COMPOSITE_INDEX]
    }

    pub fn multiplier(&self) -> f64 {
        self.values[MULTIPLIER_INDEX]
    }

    /// JSON form for debug logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        serde_json::json!({
            "feature_version": self.version,
            "layout_hash": self.layout_hash,
            "named_values": FEATURE_LAYOUT.iter()
                .zip(self.values.iter())
                .map(|(name, value)| (name.to_string(), *value))
                .collect::<std::collections::BTreeMap<_, _>>(),
        })
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Converts raw records into risk feature vectors
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskFeatureBuilder;

impl RiskFeatureBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build the vector for one record. Missing attributes read as 0.
    pub fn build(&self, record: &ProjectRecord) -> RiskFeatureVector {
        let mut values = [0.0; FEATURE_COUNT];

        for (dim, sources) in DIMENSION_SOURCES.iter().enumerate() {
            values[dim] = sources
                .iter()
                .map(|(name, weight)| record.attribute(name) * weight)
                .sum();
        }

        let multiplier = record
            .project_type
            .as_deref()
            .map(project_type_multiplier)
            .unwrap_or(1.0);

        let composite: f64 = (0..DIMENSION_COUNT)
            .map(|dim| values[dim] * COMPOSITE_WEIGHTS[dim])
            .sum();

        values[COMPOSITE_INDEX] = composite * multiplier;
        values[MULTIPLIER_INDEX] = multiplier;

        RiskFeatureVector::from_values(values)
    }

    pub fn build_batch(&self, records: &[ProjectRecord]) -> Vec<RiskFeatureVector> {
        records.iter().map(|r| self.build(r)).collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================
