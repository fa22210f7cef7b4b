//! Features Module - Risk Feature Construction
//!
//! Turns raw project attributes into the fixed-width risk vector every
//! downstream engine reads.
//!
//! - `layout`: dimension order, weights, version hash
//! - `record`: `ProjectRecord` input entity
//! - `vector`: `RiskFeatureVector` and `RiskFeatureBuilder`
//! - `matrix`: batch `FeatureMatrix` and `StandardScaler`

pub mod layout;
pub mod record;
pub mod vector;
pub mod matrix;

#[cfg(test)]
mod tests;

pub use layout::{feature_name, LayoutInfo, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION};
pub use matrix::{FeatureMatrix, StandardScaler};
pub use record::ProjectRecord;
pub use vector::{RiskFeatureBuilder, RiskFeatureVector};
