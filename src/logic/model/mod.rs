//! Model Module - Anomaly Detection
//!
//! Isolation forest scoring plus the contamination cut used for the binary
//! is-anomaly flag.

pub mod isolation;
pub mod threshold;
pub mod detector;

pub use detector::{AnomalyDetector, AnomalyReport, AnomalySettings};
pub use isolation::IsolationForest;
pub use threshold::{ContaminationThreshold, MAX_CONTAMINATION};
