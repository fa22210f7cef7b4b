//! Project Record - raw per-project risk attributes
//!
//! Records are immutable once handed to a batch run. Missing or malformed
//! attributes are not errors: the builder reads them as 0.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Keys read as metadata rather than numeric attributes
const ID_KEY: &str = "project_id";
const TYPE_KEY: &str = "project_type";
const LOCATION_KEY: &str = "location";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Opaque identifier used in reports
    #[serde(default)]
    pub project_id: Option<String>,
    /// substation / overhead_line / underground_cable (others allowed)
    #[serde(default)]
    pub project_type: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    /// Named risk attributes, nominally in [0, 1]
    #[serde(default)]
    pub attributes: BTreeMap<String, f64>,
}

impl ProjectRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.project_id = Some(id.into());
        self
    }

    pub fn with_type(mut self, project_type: impl Into<String>) -> Self {
        self.project_type = Some(project_type.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: f64) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    /// Attribute value, or 0 when missing or non-finite
    pub fn attribute(&self, name: &str) -> f64 {
        match self.attributes.get(name) {
            Some(v) if v.is_finite() => *v,
            _ => 0.0,
        }
    }

    /// Build a record from a loosely typed JSON object (one CSV/DB row).
    ///
    /// Numbers and numeric strings become attributes; anything else is
    /// dropped with a warning and later reads as 0.
    pub fn from_json(value: &Value) -> Self {
        let mut record = Self::new();

        let object = match value.as_object() {
            Some(obj) => obj,
            None => {
                log::warn!("Project record is not a JSON object ({}), using empty record", kind(value));
                return record;
            }
        };

        for (key, field) in object {
            match key.as_str() {
                ID_KEY => record.project_id = text(field),
                TYPE_KEY => record.project_type = text(field),
                LOCATION_KEY => record.location = text(field),
                _ => match numeric(field) {
                    Some(v) => {
                        record.attributes.insert(key.clone(), v);
                    }
                    None => {
                        log::warn!("Attribute '{}' is not numeric ({}), defaulting to 0", key, kind(field));
                    }
                },
            }
        }

        record
    }

    /// Label used when highlighting a project
    pub fn display_id(&self, index: usize) -> String {
        self.project_id
            .clone()
            .unwrap_or_else(|| format!("#{}", index))
    }
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn numeric(value: &Value) -> Option<f64> {
    let v = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    v.is_finite().then_some(v)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "non-finite number",
        Value::String(_) => "unparsable string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_attribute_reads_zero() {
        let record = ProjectRecord::new().with_attribute("technology_risk", 0.7);
        assert_eq!(record.attribute("technology_risk"), 0.7);
        assert_eq!(record.attribute("seasonal_factor"), 0.0);
    }

    #[test]
    fn test_non_finite_attribute_reads_zero() {
        let record = ProjectRecord::new().with_attribute("technology_risk", f64::NAN);
        assert_eq!(record.attribute("technology_risk"), 0.0);
    }

    #[test]
    fn test_from_json_object() {
        let record = ProjectRecord::from_json(&json!({
            "project_id": "PG-001",
            "project_type": "substation",
            "location": "Assam",
            "material_cost_ratio": 0.4,
            "labor_cost_ratio": "0.35",
            "vendor_risk_score": null,
            "seasonal_factor": "high",
            "critical_path_risk": true,
        }));

        assert_eq!(record.project_id.as_deref(), Some("PG-001"));
        assert_eq!(record.project_type.as_deref(), Some("substation"));
        assert_eq!(record.location.as_deref(), Some("Assam"));
        assert_eq!(record.attribute("material_cost_ratio"), 0.4);
        assert_eq!(record.attribute("labor_cost_ratio"), 0.35);
        assert_eq!(record.attribute("vendor_risk_score"), 0.0);
        assert_eq!(record.attribute("seasonal_factor"), 0.0);
        assert_eq!(record.attribute("critical_path_risk"), 0.0);
        assert_eq!(record.attributes.len(), 2);
    }

    #[test]
    fn test_from_json_non_object() {
        let record = ProjectRecord::from_json(&json!([1, 2, 3]));
        assert_eq!(record, ProjectRecord::default());
    }

    #[test]
    fn test_display_id_fallback() {
        assert_eq!(ProjectRecord::new().display_id(7), "#7");
        assert_eq!(ProjectRecord::new().with_id("X").display_id(7), "X");
    }
}
