//! Feature Layout - Centralized Risk Dimension Definition
//!
//! **This file controls the risk feature schema**
//!
//! ## Rules:
//! 1. Add dimension -> increment FEATURE_VERSION
//! 2. Change order -> increment FEATURE_VERSION
//! 3. Change a weight -> increment FEATURE_VERSION
//!
//! Reports carry the version and layout hash so downstream consumers can
//! refuse scores produced under a different schema.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Dimension names in exact order they appear in the vector
pub const FEATURE_LAYOUT: &[&str] = &[
    "cost_overrun_risk",       // 0
    "timeline_risk",           // 1
    "technical_risk",          // 2
    "environmental_risk",      // 3
    "resource_risk",           // 4
    "historical_risk",         // 5
    "composite_risk_score",    // 6: weighted sum of 0-5, times type multiplier
    "project_type_multiplier", // 7
];

/// Total number of dimensions
pub const FEATURE_COUNT: usize = 8;

/// Number of base risk dimensions feeding the composite score
pub const DIMENSION_COUNT: usize = 6;

pub const COMPOSITE_INDEX: usize = 6;
pub const MULTIPLIER_INDEX: usize = 7;

// ============================================================================
// DIMENSION WEIGHTS
// ============================================================================

/// (source attribute, weight) pairs per base dimension. Weights sum to 1.0
/// within each dimension.
pub const DIMENSION_SOURCES: [&[(&str, f64)]; DIMENSION_COUNT] = [
    &[
        ("material_cost_ratio", 0.30),
        ("labor_cost_ratio", 0.25),
        ("cost_escalation_risk", 0.25),
        ("demand_supply_impact", 0.20),
    ],
    &[
        ("regulatory_complexity_score", 0.30),
        ("monsoon_impact_score", 0.25),
        ("timeline_pressure_score", 0.25),
        ("critical_path_risk", 0.20),
    ],
    &[
        ("technology_risk", 0.4),
        ("project_complexity_score", 0.3),
        ("vendor_risk_score", 0.3),
    ],
    &[
        ("terrain_difficulty_score", 0.4),
        ("weather_impact_ratio", 0.3),
        ("seasonal_factor", 0.3),
    ],
    &[
        ("resource_availability_score", 0.4),
        ("trained_manpower_availability", 0.3),
        ("vendor_performance_score", 0.3),
    ],
    &[
        ("historical_delay_pattern", 0.5),
        ("regional_delay_factor", 0.5),
    ],
];

/// Composite score weights over the six base dimensions
pub const COMPOSITE_WEIGHTS: [f64; DIMENSION_COUNT] = [0.25, 0.25, 0.20, 0.15, 0.10, 0.05];

/// Per-type complexity multipliers; unknown types use 1.0
pub const PROJECT_TYPE_MULTIPLIERS: &[(&str, f64)] = &[
    ("substation", 1.2),
    ("overhead_line", 1.0),
    ("underground_cable", 1.4),
];

/// Every source attribute the builder reads, in layout order
pub fn source_attributes() -> impl Iterator<Item = &'static str> {
    DIMENSION_SOURCES
        .iter()
        .flat_map(|sources| sources.iter().map(|(name, _)| *name))
}

/// Multiplier for a project type string ("Underground Cable" == "underground_cable")
pub fn project_type_multiplier(project_type: &str) -> f64 {
    let key: String = project_type
        .trim()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c.to_ascii_lowercase() })
        .collect();

    PROJECT_TYPE_MULTIPLIERS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, multiplier)| *multiplier)
        .unwrap_or(1.0)
}

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// CRC32 over version, dimension names and weights
pub fn compute_layout_hash() -> u32 {
    let mut hasher = Hasher::new();

    hasher.update(&[FEATURE_VERSION]);

    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]);
    }

    for sources in DIMENSION_SOURCES.iter() {
        for (name, weight) in sources.iter() {
            hasher.update(name.as_bytes());
            hasher.update(&weight.to_le_bytes());
        }
    }

    for weight in COMPOSITE_WEIGHTS.iter() {
        hasher.update(&weight.to_le_bytes());
    }

    hasher.finalize()
}

pub fn layout_hash() -> u32 {
    compute_layout_hash()
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Feature layout a report was computed with
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_count: FEATURE_COUNT,
            feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        }
    }
}

// ============================================================================
// FEATURE INDEX LOOKUP
// ============================================================================

pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|&n| n == name)
}

pub fn feature_name(index: usize) -> Option<&'static str> {
    FEATURE_LAYOUT.get(index).copied()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_count() {
        assert_eq!(FEATURE_LAYOUT.len(), FEATURE_COUNT);
        assert_eq!(feature_index("composite_risk_score"), Some(COMPOSITE_INDEX));
        assert_eq!(feature_index("project_type_multiplier"), Some(MULTIPLIER_INDEX));
    }

    #[test]
    fn test_dimension_weights_sum_to_one() {
        for (i, sources) in DIMENSION_SOURCES.iter().enumerate() {
            let total: f64 = sources.iter().map(|(_, w)| w).sum();
            assert!((total - 1.0).abs() < 1e-12, "dimension {} sums to {}", i, total);
        }

        let composite: f64 = COMPOSITE_WEIGHTS.iter().sum();
        assert!((composite - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_source_attribute_list() {
        let names: Vec<_> = source_attributes().collect();
        assert_eq!(names.len(), 19);
        assert_eq!(names[0], "material_cost_ratio");
        assert_eq!(names[18], "regional_delay_factor");
    }

    #[test]
    fn test_project_type_multiplier() {
        assert_eq!(project_type_multiplier("substation"), 1.2);
        assert_eq!(project_type_multiplier("overhead_line"), 1.0);
        assert_eq!(project_type_multiplier("Underground Cable"), 1.4);
        assert_eq!(project_type_multiplier("underground-cable"), 1.4);
        assert_eq!(project_type_multiplier("hvdc_link"), 1.0);
    }

    #[test]
    fn test_layout_hash_consistency() {
        assert_eq!(compute_layout_hash(), compute_layout_hash());
        assert_ne!(layout_hash(), 0);
    }

    #[test]
    fn test_feature_name() {
        assert_eq!(feature_name(0), Some("cost_overrun_risk"));
        assert_eq!(feature_name(100), None);
    }
}
