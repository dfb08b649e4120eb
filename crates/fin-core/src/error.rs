//! Error kinds shared by the geometry engine, the data feed and the UI

use thiserror::Error;

/// Result alias used throughout the workspace
pub type ChartResult<T> = Result<T, ChartError>;

/// Everything that can stop a chart from producing geometry.
///
/// Numeric edge cases (equal domain bounds, zero bar maxima, radar values
/// above their ceiling) are *not* errors; layouts resolve them with fixed
/// degenerate rules. Only the three conditions below surface to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    /// Network or HTTP failure while retrieving a dataset. Never retried.
    #[error("failed to load chart data: {0}")]
    FetchFailure(String),

    /// Zero records, or a breakdown whose values sum to zero.
    #[error("no data available")]
    EmptyDataset,

    /// Precondition violation: a caller bug, not a transient condition.
    #[error("invalid chart input: {0}")]
    InvalidInput(String),
}

impl ChartError {
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::FetchFailure(msg.into())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Empty datasets are shown as a neutral placeholder, not an error banner
    pub fn is_empty_dataset(&self) -> bool {
        matches!(self, Self::EmptyDataset)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::FetchFailure(_) => "Failed to load chart",
            Self::EmptyDataset => "No data available",
            Self::InvalidInput(_) => "Invalid chart data",
        }
    }
}

impl From<serde_json::Error> for ChartError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

/// Reject NaN and infinities before they turn into NaN geometry
pub(crate) fn ensure_finite(field: &str, value: f64) -> ChartResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ChartError::invalid(format!("{field} is not a finite number")))
    }
}

pub(crate) fn ensure_non_negative(field: &str, value: f64) -> ChartResult<()> {
    ensure_finite(field, value)?;
    if value < 0.0 {
        return Err(ChartError::invalid(format!("{field} must not be negative (got {value})")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_maps_to_invalid_input() {
        let err: ChartError = serde_json::from_str::<Vec<i32>>("{").unwrap_err().into();
        assert!(matches!(err, ChartError::InvalidInput(_)));
    }

    #[test]
    fn test_guards() {
        assert!(ensure_finite("price", 1.0).is_ok());
        assert!(ensure_finite("price", f64::NAN).is_err());
        assert!(ensure_non_negative("price", 0.0).is_ok());
        assert!(ensure_non_negative("price", -0.5).is_err());
        assert!(ensure_non_negative("price", f64::INFINITY).is_err());
    }

    #[test]
    fn test_empty_dataset_is_not_a_failure() {
        assert!(ChartError::EmptyDataset.is_empty_dataset());
        assert!(!ChartError::fetch("timeout").is_empty_dataset());
        assert_eq!(ChartError::fetch("boom").to_string(), "failed to load chart data: boom");
    }
}
