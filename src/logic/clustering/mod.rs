//! Clustering Module - Unsupervised Model Selection
//!
//! Four families over a parameter grid, scored by silhouette on the
//! standardized risk features.
//!
//! ## Structure
//! - `types`: trial records, candidates, outcome
//! - `metrics`: distance matrix, silhouette, Calinski-Harabasz
//! - `kmeans`, `dbscan`, `gmm`, `agglomerative`: the families
//! - `selector`: grid evaluation and argmax fold
//!
//! ## Usage
//! ```ignore
//! let selector = ClusteringSelector::new(settings)?;
//! let outcome = selector.select(&standardized)?;
//! println!("{} {}", outcome.selected.family, outcome.selected.parameter);
//! ```

pub mod types;
pub mod metrics;
pub mod kmeans;
pub mod dbscan;
pub mod gmm;
pub mod agglomerative;
pub mod selector;

#[cfg(test)]
mod tests;

pub use selector::{fold_trials, ClusteringSelector, SelectorSettings};
pub use types::{
    ClusteringCandidate, ClusteringFamily, ClusteringOutcome, ClusteringTrial, DegenerateClustering,
    GridParameter, NOISE_LABEL,
};
