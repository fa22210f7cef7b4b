//! Feature Matrix & Standardization
//!
//! One row per record, one column per layout dimension. The matrix is
//! built once per batch and only ever read afterwards.

use ndarray::{Array1, Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};

use super::layout::FEATURE_COUNT;
use super::vector::RiskFeatureVector;

/// Columns whose spread falls below this are treated as constant
pub const VARIANCE_EPSILON: f64 = 1e-12;

#[derive(Debug, Clone)]
pub struct FeatureMatrix {
    data: Array2<f64>,
}

impl FeatureMatrix {
    pub fn from_vectors(vectors: &[RiskFeatureVector]) -> Self {
        let mut data = Array2::zeros((vectors.len(), FEATURE_COUNT));
        for (mut row, vector) in data.axis_iter_mut(Axis(0)).zip(vectors) {
            for (cell, value) in row.iter_mut().zip(vector.values.iter()) {
                *cell = *value;
            }
        }
        Self { data }
    }

    pub fn from_array(data: Array2<f64>) -> Self {
        Self { data }
    }

    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    pub fn row(&self, index: usize) -> ArrayView1<'_, f64> {
        self.data.row(index)
    }

    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }
}

// ============================================================================
// STANDARD SCALER
// ============================================================================

/// Per-column mean/std fitted once on the batch (population std).
///
/// Zero-variance columns get scale 1.0 so they standardize to 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
    /// Columns that actually vary across the batch
    pub varying: Vec<bool>,
}

impl StandardScaler {
    pub fn fit(matrix: &FeatureMatrix) -> Self {
        let data = matrix.data();
        let n = data.nrows().max(1) as f64;

        let mean: Array1<f64> = data.sum_axis(Axis(0)) / n;

        let mut scale = Vec::with_capacity(data.ncols());
        let mut varying = Vec::with_capacity(data.ncols());

        for (j, column) in data.axis_iter(Axis(1)).enumerate() {
            let variance = column.iter().map(|v| (v - mean[j]).powi(2)).sum::<f64>() / n;
            let std = variance.sqrt();
            if std > VARIANCE_EPSILON {
                scale.push(std);
                varying.push(true);
            } else {
                scale.push(1.0);
                varying.push(false);
            }
        }

        Self {
            mean: mean.to_vec(),
            scale,
            varying,
        }
    }

    pub fn transform(&self, matrix: &FeatureMatrix) -> Array2<f64> {
        let mut out = matrix.data().clone();
        for (j, mut column) in out.axis_iter_mut(Axis(1)).enumerate() {
            let (m, s) = (self.mean[j], self.scale[j]);
            column.mapv_inplace(|v| (v - m) / s);
        }
        out
    }

    pub fn fit_transform(matrix: &FeatureMatrix) -> (Self, Array2<f64>) {
        let scaler = Self::fit(matrix);
        let scaled = scaler.transform(matrix);
        (scaler, scaled)
    }

    /// True when no column varies: every record has the same risk profile
    pub fn is_degenerate(&self) -> bool {
        !self.varying.iter().any(|v| *v)
    }
}
