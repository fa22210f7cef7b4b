use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskDriver {
    pub name: String,
    pub z_score: f64, // signed: above or below the batch mean
    pub weight: f64,
    pub importance: f64, // |z_score| * weight
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RiskExplanation {
    pub drivers: Vec<RiskDriver>,
}
