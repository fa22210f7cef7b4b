//! Error handling

use thiserror::Error;

pub type HotspotResult<T> = Result<T, HotspotError>;

/// Fatal conditions surfaced to the caller. A run either returns a full
/// report or one of these, never a partial result.
#[derive(Debug, Error)]
pub enum HotspotError {
    /// Too few records, zero variance, or no usable clustering candidate
    #[error("insufficient data ({records} records): {reason}")]
    InsufficientData { records: usize, reason: String },

    /// Rejected before any computation starts
    #[error("invalid configuration `{field}`: {reason}")]
    InvalidConfiguration { field: &'static str, reason: String },

    /// Report export failed
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl HotspotError {
    pub fn insufficient(records: usize, reason: impl Into<String>) -> Self {
        HotspotError::InsufficientData {
            records,
            reason: reason.into(),
        }
    }

    pub fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        HotspotError::InvalidConfiguration {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_context() {
        let err = HotspotError::insufficient(1, "at least 2 records required");
        assert_eq!(
            err.to_string(),
            "insufficient data (1 records): at least 2 records required"
        );

        let err = HotspotError::invalid_config("contamination", "0.6 outside (0, 0.5]");
        assert!(err.to_string().contains("contamination"));
        assert!(err.to_string().contains("0.6"));
    }
}
