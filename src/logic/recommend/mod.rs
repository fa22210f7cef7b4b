//! Recommendation Module
//!
//! Maps each risk category to its action list and highlighted projects.

pub mod types;
pub mod engine;

pub use engine::{actions, RecommendationEngine};
pub use types::{CategoryRecommendation, HighlightLimits, HighlightedProject, RecommendationSet};
